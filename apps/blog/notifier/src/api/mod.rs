pub mod health;
pub mod notifications;

use axum::{Router, routing::get};
use domain_programs::handlers as programs;

use crate::state::AppState;

/// API routes, nested under `/api` by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/notifications", notifications::router(state.clone()))
        .nest("/programs", programs::router(state.programs.clone()))
}

/// `/ready` sits next to `/health`, outside `/api`.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
