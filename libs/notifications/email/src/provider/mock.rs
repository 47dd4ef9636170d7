//! Mock email provider for testing

use super::EmailProvider;
use crate::error::{NotificationError, NotificationResult};
use crate::models::{EmailMessage, SendResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock email provider that captures sent messages
#[derive(Clone, Default)]
pub struct MockSmtpProvider {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failure_message: Option<String>,
    rejected_recipients: HashSet<String>,
}

impl MockSmtpProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider that always fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Fail only for the given recipient, as a server rejecting `RCPT TO` would.
    pub fn rejecting(mut self, recipient: impl Into<String>) -> Self {
        self.rejected_recipients.insert(recipient.into());
        self
    }

    /// Get all sent messages
    pub async fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }

    /// Get the count of sent messages
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Check if a message was sent to a specific address
    pub async fn was_sent_to(&self, email: &str) -> bool {
        self.sent.lock().await.iter().any(|m| m.to == email)
    }
}

#[async_trait]
impl EmailProvider for MockSmtpProvider {
    async fn send(&self, message: &EmailMessage) -> NotificationResult<SendResult> {
        if let Some(failure) = &self.failure_message {
            return Err(NotificationError::Delivery(failure.clone()));
        }
        if self.rejected_recipients.contains(&message.to) {
            return Err(NotificationError::Delivery(format!(
                "550 mailbox unavailable: {}",
                message.to
            )));
        }

        self.sent.lock().await.push(message.clone());

        Ok(SendResult {
            message_id: format!("mock-{}", message.id),
        })
    }

    async fn health_check(&self) -> NotificationResult<()> {
        match &self.failure_message {
            Some(_) => Err(NotificationError::Delivery(
                "Mock health check failed".to_string(),
            )),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
