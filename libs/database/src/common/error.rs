/// Unified error type for hosted-store operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The request never produced a response (connect, TLS, timeout)
    #[error("Request to hosted store failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Hosted store returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected row shape
    #[error("Failed to decode hosted store response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DatabaseError {
    /// True when the request timed out before the store answered.
    pub fn is_timeout(&self) -> bool {
        matches!(self, DatabaseError::Request(e) if e.is_timeout())
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
