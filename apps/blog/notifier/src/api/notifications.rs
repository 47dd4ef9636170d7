//! Blog notification endpoints: dispatch and the queue's delivery callback.

use axum::{Json, Router, extract::State, http::HeaderMap, routing::post};
use axum_helpers::{
    AppError, ValidatedJson,
    errors::responses::{
        BadGatewayResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        InvalidSignatureResponse, ServiceUnavailableResponse,
    },
};
use email::{
    BlogPost, CallbackOutcome, DeliveryMode, DispatchStatus, NotifyReport, NotifyRequest,
    RecipientOutcome, SIGNATURE_HEADER,
};
use utoipa::OpenApi;

use crate::state::AppState;

/// Header QStash uses for its own message id.
pub const MESSAGE_ID_HEADER: &str = "Upstash-Message-Id";

pub const TAG: &str = "notifications";

#[derive(OpenApi)]
#[openapi(
    paths(notify_blog, delivery_callback),
    components(
        schemas(
            BlogPost,
            DeliveryMode,
            NotifyRequest,
            NotifyReport,
            RecipientOutcome,
            DispatchStatus,
            CallbackOutcome
        ),
        responses(
            BadRequestValidationResponse,
            InvalidSignatureResponse,
            BadGatewayResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Blog post email notifications"))
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/blog", post(notify_blog))
        .route("/callback", post(delivery_callback))
        .with_state(state)
}

/// Render a blog post and send it to every recipient
///
/// `direct` sends within this request and accepts at most
/// `MAX_DIRECT_RECIPIENTS` distinct addresses; `queued` publishes one job
/// per recipient and returns once the queue has accepted them.
#[utoipa::path(
    post,
    path = "/blog",
    tag = TAG,
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Per-recipient dispatch report", body = NotifyReport),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn notify_blog(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<NotifyRequest>,
) -> Result<Json<NotifyReport>, AppError> {
    let report = state.notifications.notify(&request).await?;
    Ok(Json(report))
}

/// Delivery webhook called by the queue
///
/// The raw body is hashed for signature verification, so it is read as
/// text and only parsed afterwards.
#[utoipa::path(
    post,
    path = "/callback",
    tag = TAG,
    request_body(
        content = String,
        content_type = "application/json",
        description = "Dispatch job published by this service, exactly as signed"
    ),
    params(
        ("Upstash-Signature" = String, Header, description = "Signed JWT over the request body"),
        ("Upstash-Message-Id" = Option<String>, Header, description = "Queue message id, logged only; deduplication uses the signed job id")
    ),
    responses(
        (status = 200, description = "Delivered, or acknowledged as a duplicate", body = CallbackOutcome),
        (status = 400, description = "Signed body is not a dispatch job"),
        (status = 401, response = InvalidSignatureResponse),
        (status = 502, response = BadGatewayResponse)
    )
)]
async fn delivery_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<CallbackOutcome>, AppError> {
    let signature = header_str(&headers, SIGNATURE_HEADER);
    let message_id = header_str(&headers, MESSAGE_ID_HEADER);

    let outcome = state
        .notifications
        .handle_callback(body.as_bytes(), signature, message_id)
        .await?;
    Ok(Json(outcome))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
