use utoipa::OpenApi;

use crate::api::notifications;

/// Aggregated OpenAPI document for the service.
#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "Blog Notifier API",
        version = "0.1.0",
        description = "Blog post email notifications and the public programs listing"
    ),
    servers((url = "/api", description = "API base path")),
    nest(
        (path = "/notifications", api = notifications::ApiDoc),
        (path = "/programs", api = domain_programs::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
