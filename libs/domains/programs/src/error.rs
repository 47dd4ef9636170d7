use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("Hosted store error: {0}")]
    Store(#[from] DatabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProgramResult<T> = Result<T, ProgramError>;

/// Convert ProgramError to AppError for standardized error responses
impl From<ProgramError> for AppError {
    fn from(err: ProgramError) -> Self {
        match err {
            ProgramError::Store(e) => AppError::Upstream(e.to_string()),
            ProgramError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProgramError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_store_failure_is_bad_gateway() {
        let err = ProgramError::Store(DatabaseError::Status {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(AppError::from(err).status(), StatusCode::BAD_GATEWAY);
    }
}
