use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

/// A published blog post, as sent by the web application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BlogPost {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    #[schema(example = "Launch")]
    pub title: String,

    /// URL slug; the call-to-action link ends in it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "launch")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Pre-sanitized HTML fragment, inserted into the email verbatim
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    #[schema(example = "<p>Hi</p>")]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Cover image must be an absolute URL"))]
    pub cover_image: Option<String>,
}

/// How a notification reaches the mail transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Send over SMTP within the request
    #[default]
    Direct,
    /// Publish to the queue; delivery happens on the signed callback
    Queued,
}

/// Request body for `POST /notifications/blog`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct NotifyRequest {
    #[validate(nested)]
    pub post: BlogPost,

    #[validate(
        length(min = 1, message = "At least one recipient is required"),
        custom(function = "validate_recipients")
    )]
    #[schema(example = json!(["reader@example.com"]))]
    pub recipients: Vec<String>,

    #[serde(default)]
    pub mode: DeliveryMode,
}

fn validate_recipients(recipients: &[String]) -> Result<(), ValidationError> {
    if recipients.iter().all(|r| r.validate_email()) {
        Ok(())
    } else {
        Err(ValidationError::new("email")
            .with_message("Every recipient must be an email address".into()))
    }
}

/// A rendered email for one recipient. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// UUID v4; also the queue deduplication id
    pub id: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
        text_body: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            to: to.into(),
            subject: subject.into(),
            html_body: html_body.into(),
            text_body: text_body.into(),
        }
    }
}

/// Unit of work handed to the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchJob {
    pub id: String,
    pub target_url: String,
    pub payload: EmailMessage,
}

impl DispatchJob {
    /// The job shares its id with the message it carries.
    pub fn new(payload: EmailMessage, target_url: impl Into<String>) -> Self {
        Self {
            id: payload.id.clone(),
            target_url: target_url.into(),
            payload,
        }
    }
}

/// Queue acknowledgement for a published job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublishReceipt {
    pub message_id: String,
}

/// Mail transport acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SendResult {
    pub message_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Sent,
    Queued,
    Failed,
}

/// What happened to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipientOutcome {
    pub recipient: String,
    pub status: DispatchStatus,
    /// Transport or queue message id when dispatch succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-recipient report returned by `notify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotifyReport {
    pub mode: DeliveryMode,
    pub sent: usize,
    pub queued: usize,
    pub failed: usize,
    pub results: Vec<RecipientOutcome>,
}

impl NotifyReport {
    pub fn from_outcomes(mode: DeliveryMode, results: Vec<RecipientOutcome>) -> Self {
        let count = |status: DispatchStatus| results.iter().filter(|r| r.status == status).count();
        Self {
            mode,
            sent: count(DispatchStatus::Sent),
            queued: count(DispatchStatus::Queued),
            failed: count(DispatchStatus::Failed),
            results,
        }
    }
}

/// Result of handling a queue callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CallbackOutcome {
    /// The payload was sent
    Delivered { email_id: String },
    /// The job was already handled; nothing was sent
    Duplicate { email_id: String },
}

/// Site-wide values the template takes from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBranding {
    pub site_name: String,
    pub site_url: String,
}

impl SiteBranding {
    pub fn new(site_name: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            site_url: site_url.into(),
        }
    }

    /// `{site_url}/blog/{slug}` with the slug percent-encoded as one path
    /// segment; a missing slug leaves the segment empty.
    pub fn post_url(&self, slug: Option<&str>) -> String {
        format!(
            "{}/blog/{}",
            self.site_url.trim_end_matches('/'),
            urlencoding::encode(slug.unwrap_or_default())
        )
    }
}

impl Default for SiteBranding {
    fn default() -> Self {
        Self::new("Blog", "http://localhost:5173")
    }
}

impl core_config::FromEnv for SiteBranding {
    /// Reads `SITE_NAME` and `SITE_URL`.
    fn from_env() -> Result<Self, core_config::ConfigError> {
        let defaults = Self::default();
        Ok(Self::new(
            core_config::env_or_default("SITE_NAME", &defaults.site_name),
            core_config::env_or_default("SITE_URL", &defaults.site_url),
        ))
    }
}
