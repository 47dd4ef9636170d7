//! Durable queue clients
//!
//! The queue owns retry and backoff; publishing is a single attempt.

pub mod mock;
pub mod qstash;

pub use mock::MockMessageQueue;
pub use qstash::{QStashClient, QStashConfig};

use crate::error::NotificationResult;
use crate::models::{DispatchJob, PublishReceipt};
use async_trait::async_trait;

#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Publish a job for later delivery to `job.target_url`.
    async fn publish(&self, job: &DispatchJob) -> NotificationResult<PublishReceipt>;

    fn name(&self) -> &'static str;
}
