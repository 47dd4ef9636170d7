//! QStash publisher
//!
//! Jobs are published with `POST {base}/v2/publish/{destination}`; QStash
//! then calls the destination with the job as body and an
//! `Upstash-Signature` header, retrying on non-2xx answers.

use super::MessageQueue;
use crate::error::{NotificationError, NotificationResult};
use crate::models::{DispatchJob, PublishReceipt};
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_any, env_or_default, env_parse_or};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_QSTASH_URL: &str = "https://qstash.upstash.io";

/// Header carrying the deduplication id; QStash drops repeats within its window.
pub const DEDUPLICATION_HEADER: &str = "Upstash-Deduplication-Id";

/// Queue settings. Everything is optional: without a token and a callback
/// URL queued delivery is off, and without signing keys every callback is
/// rejected.
#[derive(Clone)]
pub struct QStashConfig {
    pub url: String,
    pub token: Option<String>,
    /// Public URL of this service's callback endpoint
    pub callback_url: Option<String>,
    pub current_signing_key: Option<String>,
    pub next_signing_key: Option<String>,
    pub timeout: Duration,
}

impl QStashConfig {
    /// Build a publisher when a token and a callback URL are both configured.
    pub fn publisher(&self) -> NotificationResult<Option<QStashClient>> {
        match (&self.token, &self.callback_url) {
            (Some(token), Some(_)) => Ok(Some(QStashClient::new(&self.url, token, self.timeout)?)),
            _ => Ok(None),
        }
    }
}

impl Default for QStashConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_QSTASH_URL.to_string(),
            token: None,
            callback_url: None,
            current_signing_key: None,
            next_signing_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl fmt::Debug for QStashConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("QStashConfig")
            .field("url", &self.url)
            .field("token", &redact(&self.token))
            .field("callback_url", &self.callback_url)
            .field("current_signing_key", &redact(&self.current_signing_key))
            .field("next_signing_key", &redact(&self.next_signing_key))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FromEnv for QStashConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_or_default("QSTASH_URL", DEFAULT_QSTASH_URL)
                .trim_end_matches('/')
                .to_string(),
            token: env_any(&["QSTASH_TOKEN"]),
            callback_url: env_any(&["QSTASH_CALLBACK_URL"]),
            current_signing_key: env_any(&["QSTASH_CURRENT_SIGNING_KEY"]),
            next_signing_key: env_any(&["QSTASH_NEXT_SIGNING_KEY"]),
            timeout: Duration::from_secs(env_parse_or("QSTASH_TIMEOUT_SECS", 10)?),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    message_id: String,
}

/// HTTP client for the QStash publish API
#[derive(Clone)]
pub struct QStashClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl QStashClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> NotificationResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotificationError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn publish_url(&self, target_url: &str) -> String {
        format!("{}/v2/publish/{}", self.base_url, target_url)
    }
}

#[async_trait]
impl MessageQueue for QStashClient {
    async fn publish(&self, job: &DispatchJob) -> NotificationResult<PublishReceipt> {
        let response = self
            .http
            .post(self.publish_url(&job.target_url))
            .bearer_auth(&self.token)
            .header(DEDUPLICATION_HEADER, &job.id)
            .json(job)
            .send()
            .await
            .map_err(|e| NotificationError::Queue(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Queue(format!(
                "QStash answered {}: {}",
                status, body
            )));
        }

        let receipt: PublishResponse = response
            .json()
            .await
            .map_err(|e| NotificationError::Queue(format!("Unexpected QStash response: {}", e)))?;

        tracing::info!(
            job_id = %job.id,
            message_id = %receipt.message_id,
            to = %job.payload.to,
            "Job published to QStash"
        );

        Ok(PublishReceipt {
            message_id: receipt.message_id,
        })
    }

    fn name(&self) -> &'static str {
        "qstash"
    }
}
