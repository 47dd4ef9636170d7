use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::errors::responses::{BadGatewayResponse, InternalServerErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProgramResult;
use crate::models::Program;
use crate::repository::ProgramRepository;
use crate::service::ProgramService;

/// OpenAPI documentation for Programs API
#[derive(OpenApi)]
#[openapi(
    paths(list_programs),
    components(
        schemas(Program),
        responses(BadGatewayResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = Program::TAG, description = "Published programs")
    )
)]
pub struct ApiDoc;

/// Create the program router
pub fn router<R: ProgramRepository + 'static>(service: ProgramService<R>) -> Router {
    Router::new()
        .route("/", get(list_programs))
        .with_state(Arc::new(service))
}

/// List active programs, newest first
#[utoipa::path(
    get,
    path = "",
    tag = Program::TAG,
    responses(
        (status = 200, description = "Active programs", body = Vec<Program>),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_programs<R: ProgramRepository>(
    State(service): State<Arc<ProgramService<R>>>,
) -> ProgramResult<Json<Vec<Program>>> {
    let programs = service.list_active_programs().await?;
    Ok(Json(programs))
}
