//! In-memory queue for tests

use super::MessageQueue;
use crate::error::{NotificationError, NotificationResult};
use crate::models::{DispatchJob, PublishReceipt};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Queue double that records published jobs
#[derive(Clone, Default)]
pub struct MockMessageQueue {
    published: Arc<Mutex<Vec<DispatchJob>>>,
    failure_message: Option<String>,
}

impl MockMessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub async fn published_jobs(&self) -> Vec<DispatchJob> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl MessageQueue for MockMessageQueue {
    async fn publish(&self, job: &DispatchJob) -> NotificationResult<PublishReceipt> {
        if let Some(failure) = &self.failure_message {
            return Err(NotificationError::Queue(failure.clone()));
        }

        self.published.lock().await.push(job.clone());
        Ok(PublishReceipt {
            message_id: format!("msg_{}", job.id),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
