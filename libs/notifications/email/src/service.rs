//! Notification service: compose blog post emails and dispatch them.
//!
//! Direct mode sends within the request. Queued mode publishes one job per
//! recipient; the queue later calls [`NotificationService::handle_callback`]
//! with the job, which sends it.

use crate::error::{NotificationError, NotificationResult};
use crate::gateway::DispatchGateway;
use crate::ledger::DeliveryLedger;
use crate::models::{
    CallbackOutcome, DeliveryMode, DispatchJob, DispatchStatus, EmailMessage, NotifyReport,
    NotifyRequest, RecipientOutcome,
};
use crate::templates::{RenderedTemplate, TemplateEngine};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

/// Most recipients a single direct-mode request may address. Direct sends
/// happen inside the HTTP request and its timeout; larger lists go queued.
pub const MAX_DIRECT_RECIPIENTS: usize = 50;

#[derive(Clone)]
pub struct NotificationService {
    gateway: DispatchGateway,
    templates: Arc<TemplateEngine>,
    ledger: Arc<dyn DeliveryLedger>,
    callback_url: Option<String>,
}

impl NotificationService {
    pub fn new(
        gateway: DispatchGateway,
        templates: TemplateEngine,
        ledger: Arc<dyn DeliveryLedger>,
    ) -> Self {
        Self {
            gateway,
            templates: Arc::new(templates),
            ledger,
            callback_url: None,
        }
    }

    /// Where the queue should deliver jobs. Required for queued mode.
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    pub fn queued_enabled(&self) -> bool {
        self.gateway.has_queue() && self.callback_url.is_some()
    }

    pub fn gateway(&self) -> &DispatchGateway {
        &self.gateway
    }

    /// Validate, render once, and dispatch to every recipient.
    ///
    /// Recipient failures are reported, not returned; the call only fails
    /// for problems that affect every recipient: validation, rendering,
    /// queued mode not configured, or a direct send to more than
    /// [`MAX_DIRECT_RECIPIENTS`] distinct addresses.
    #[instrument(skip_all, fields(mode = ?request.mode, recipients = request.recipients.len()))]
    pub async fn notify(&self, request: &NotifyRequest) -> NotificationResult<NotifyReport> {
        request.validate()?;

        let callback_url = match request.mode {
            DeliveryMode::Queued => Some(
                self.callback_url
                    .as_deref()
                    .filter(|_| self.gateway.has_queue())
                    .ok_or(NotificationError::QueueNotConfigured)?,
            ),
            DeliveryMode::Direct => None,
        };

        let mut seen = HashSet::new();
        let recipients: Vec<&str> = request
            .recipients
            .iter()
            .map(|r| r.trim())
            .filter(|r| seen.insert(r.to_ascii_lowercase()))
            .collect();

        if request.mode == DeliveryMode::Direct && recipients.len() > MAX_DIRECT_RECIPIENTS {
            return Err(NotificationError::InvalidInput(format!(
                "direct mode accepts at most {} recipients, got {}; use queued mode",
                MAX_DIRECT_RECIPIENTS,
                recipients.len()
            )));
        }

        let rendered = self.templates.render(&request.post)?;

        let dispatches = recipients.into_iter().map(|recipient| {
            let message = message_for(&rendered, recipient);
            async move {
                let result = match callback_url {
                    Some(url) => self
                        .gateway
                        .enqueue(message, url)
                        .await
                        .map(|receipt| (DispatchStatus::Queued, receipt.message_id)),
                    None => self
                        .gateway
                        .send_direct(&message)
                        .await
                        .map(|sent| (DispatchStatus::Sent, sent.message_id)),
                };
                outcome(recipient, result)
            }
        });

        let report = NotifyReport::from_outcomes(request.mode, join_all(dispatches).await);

        info!(
            title = %request.post.title,
            sent = report.sent,
            queued = report.queued,
            failed = report.failed,
            "Blog notification dispatched"
        );

        Ok(report)
    }

    /// Deliver a job the queue called back with.
    ///
    /// The dedup key is the job id from the signed body. It is stable across
    /// the queue's retries and matches the deduplication id sent on publish.
    /// The queue's message id is only logged. A failed send releases the key
    /// so the queue's retry is not mistaken for a duplicate.
    #[instrument(skip_all, fields(queue_message_id = message_id))]
    pub async fn handle_callback(
        &self,
        raw_body: &[u8],
        signature: Option<&str>,
        message_id: Option<&str>,
    ) -> NotificationResult<CallbackOutcome> {
        let signature = signature
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                NotificationError::InvalidSignature("missing Upstash-Signature header".to_string())
            })?;

        let claims = self.gateway.verify_inbound_signature(raw_body, signature)?;

        let job: DispatchJob = serde_json::from_slice(raw_body).map_err(|e| {
            NotificationError::InvalidInput(format!("callback body is not a dispatch job: {}", e))
        })?;

        if !self.ledger.claim(&job.id).await {
            info!(email_id = %job.id, jti = ?claims.jti, "Duplicate callback acknowledged");
            return Ok(CallbackOutcome::Duplicate { email_id: job.id });
        }

        match self.gateway.send_direct(&job.payload).await {
            Ok(_) => Ok(CallbackOutcome::Delivered { email_id: job.id }),
            Err(e) => {
                self.ledger.release(&job.id).await;
                Err(e)
            }
        }
    }

    /// Mail transport reachability, for readiness checks.
    pub async fn health_check(&self) -> NotificationResult<()> {
        self.gateway.provider().health_check().await
    }
}

fn message_for(rendered: &RenderedTemplate, recipient: &str) -> EmailMessage {
    EmailMessage::new(
        recipient,
        rendered.subject.clone(),
        rendered.html_body.clone(),
        rendered.text_body.clone(),
    )
}

fn outcome(
    recipient: &str,
    result: NotificationResult<(DispatchStatus, String)>,
) -> RecipientOutcome {
    match result {
        Ok((status, message_id)) => RecipientOutcome {
            recipient: recipient.to_string(),
            status,
            message_id: Some(message_id),
            error: None,
        },
        Err(e) => RecipientOutcome {
            recipient: recipient.to_string(),
            status: DispatchStatus::Failed,
            message_id: None,
            error: Some(e.to_string()),
        },
    }
}
