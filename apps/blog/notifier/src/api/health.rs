//! Readiness check against the services this app depends on.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Readiness: the hosted store answers and the mail transport accepts a connection.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "store",
            Box::pin(async {
                state
                    .programs
                    .health_check()
                    .await
                    .map_err(|e| format!("Store check failed: {}", e))
            }),
        ),
        (
            "smtp",
            Box::pin(async {
                state
                    .notifications
                    .health_check()
                    .await
                    .map_err(|e| format!("SMTP check failed: {}", e))
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
