//! Error types for the notification service.

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur while composing or dispatching a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The request failed field validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The request is well-formed but cannot be processed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The email template could not be registered or rendered
    #[error("Template error: {0}")]
    Template(String),

    /// The mail transport did not accept the message
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// The queue did not accept the job
    #[error("Queue error: {0}")]
    Queue(String),

    /// Queued delivery was requested but no queue is configured
    #[error("Queued delivery is not configured")]
    QueueNotConfigured,

    /// An inbound callback did not carry a valid signature
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<handlebars::RenderError> for NotificationError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Template(err.to_string())
    }
}

impl From<NotificationError> for AppError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::Validation(e) => AppError::ValidationError(e),
            NotificationError::InvalidInput(msg) => AppError::BadRequest(msg),
            NotificationError::Template(msg) => AppError::Template(msg),
            NotificationError::Delivery(msg) => AppError::MailDelivery(msg),
            NotificationError::Queue(msg) => AppError::QueuePublish(msg),
            NotificationError::QueueNotConfigured => AppError::ServiceUnavailable(
                "Queued delivery is not configured on this server".to_string(),
            ),
            NotificationError::InvalidSignature(msg) => AppError::InvalidSignature(msg),
            NotificationError::Serialization(e) => AppError::SerdeJson(e),
            NotificationError::Config(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for NotificationError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
