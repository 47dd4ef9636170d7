//! Blog notification service.
//!
//! Renders blog post emails and sends them over SMTP, either inline or
//! through QStash with a signed delivery callback. Also serves the list of
//! active programs from the hosted store.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::health_router;
use core_config::{AppInfo, server::ServerConfig};
use std::io;

use crate::state::AppState;

/// Full application router: API, docs, `/health` and `/ready`.
pub fn build_router(state: AppState, server: &ServerConfig, app: AppInfo) -> io::Result<Router> {
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state), server)?;

    Ok(router
        .merge(health_router(app))
        .merge(api::ready_router(state)))
}
