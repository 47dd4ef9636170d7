//! Mail transport implementations

pub mod mock;
pub mod smtp;

pub use mock::MockSmtpProvider;
pub use smtp::{SmtpConfig, SmtpProvider};

use crate::error::NotificationResult;
use crate::models::{EmailMessage, SendResult};
use async_trait::async_trait;

/// Trait for mail transports
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send a message. Every transport failure is a `Delivery` error.
    async fn send(&self, message: &EmailMessage) -> NotificationResult<SendResult>;

    /// Check if the transport is reachable
    async fn health_check(&self) -> NotificationResult<()>;

    /// Get provider name
    fn name(&self) -> &'static str;
}
