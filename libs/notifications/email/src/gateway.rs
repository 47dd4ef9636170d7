use crate::error::{NotificationError, NotificationResult};
use crate::models::{DispatchJob, EmailMessage, PublishReceipt, SendResult};
use crate::provider::EmailProvider;
use crate::queue::MessageQueue;
use crate::signature::{CallbackClaims, SignatureVerifier};
use std::sync::Arc;
use tracing::{info, warn};

/// Hands rendered messages to the mail transport or the queue, and checks
/// the signature on messages coming back from the queue.
#[derive(Clone)]
pub struct DispatchGateway {
    provider: Arc<dyn EmailProvider>,
    queue: Option<Arc<dyn MessageQueue>>,
    verifier: SignatureVerifier,
}

impl DispatchGateway {
    pub fn new(provider: Arc<dyn EmailProvider>, verifier: SignatureVerifier) -> Self {
        Self {
            provider,
            queue: None,
            verifier,
        }
    }

    pub fn with_queue(mut self, queue: Arc<dyn MessageQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn has_queue(&self) -> bool {
        self.queue.is_some()
    }

    pub fn provider(&self) -> &Arc<dyn EmailProvider> {
        &self.provider
    }

    /// Send over the mail transport. No retry.
    pub async fn send_direct(&self, message: &EmailMessage) -> NotificationResult<SendResult> {
        match self.provider.send(message).await {
            Ok(result) => {
                info!(
                    email_id = %message.id,
                    to = %message.to,
                    mode = "direct",
                    provider = self.provider.name(),
                    "Notification delivered"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(
                    email_id = %message.id,
                    to = %message.to,
                    mode = "direct",
                    error = %e,
                    "Notification delivery failed"
                );
                Err(e)
            }
        }
    }

    /// Publish a job for asynchronous delivery to `target_url`.
    pub async fn enqueue(
        &self,
        message: EmailMessage,
        target_url: &str,
    ) -> NotificationResult<PublishReceipt> {
        let queue = self
            .queue
            .as_ref()
            .ok_or(NotificationError::QueueNotConfigured)?;

        let job = DispatchJob::new(message, target_url);
        let receipt = queue.publish(&job).await.inspect_err(|e| {
            warn!(email_id = %job.id, to = %job.payload.to, mode = "queued", error = %e, "Enqueue failed");
        })?;

        info!(
            email_id = %job.id,
            to = %job.payload.to,
            mode = "queued",
            queue_message_id = %receipt.message_id,
            "Notification queued"
        );
        Ok(receipt)
    }

    /// Check an inbound `Upstash-Signature` against the raw body.
    pub fn verify_inbound_signature(
        &self,
        raw_body: &[u8],
        signature_header: &str,
    ) -> NotificationResult<CallbackClaims> {
        self.verifier.verify(raw_body, signature_header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockSmtpProvider;
    use crate::queue::MockMessageQueue;
    use crate::signature::tests::{CURRENT, NEXT, claims_for, sign};

    fn message() -> EmailMessage {
        EmailMessage::new("reader@example.com", "New post: Launch", "<p>Hi</p>", "Launch")
    }

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::new(Some(CURRENT), Some(NEXT), None)
    }

    #[tokio::test]
    async fn test_send_direct_uses_provider() {
        let provider = MockSmtpProvider::new();
        let gateway = DispatchGateway::new(Arc::new(provider.clone()), verifier());

        let result = gateway.send_direct(&message()).await.unwrap();

        assert!(result.message_id.starts_with("mock-"));
        assert!(provider.was_sent_to("reader@example.com").await);
    }

    #[tokio::test]
    async fn test_send_direct_surfaces_delivery_failure() {
        let gateway = DispatchGateway::new(
            Arc::new(MockSmtpProvider::failing("535 authentication failed")),
            verifier(),
        );

        assert!(matches!(
            gateway.send_direct(&message()).await,
            Err(NotificationError::Delivery(_))
        ));
    }

    #[tokio::test]
    async fn test_enqueue_without_queue_is_not_configured() {
        let gateway = DispatchGateway::new(Arc::new(MockSmtpProvider::new()), verifier());

        assert!(matches!(
            gateway.enqueue(message(), "https://example.com/cb").await,
            Err(NotificationError::QueueNotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_enqueue_publishes_job() {
        let queue = MockMessageQueue::new();
        let gateway = DispatchGateway::new(Arc::new(MockSmtpProvider::new()), verifier())
            .with_queue(Arc::new(queue.clone()));
        let message = message();

        let receipt = gateway
            .enqueue(message.clone(), "https://example.com/cb")
            .await
            .unwrap();

        let jobs = queue.published_jobs().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, message.id);
        assert_eq!(jobs[0].target_url, "https://example.com/cb");
        assert_eq!(receipt.message_id, format!("msg_{}", message.id));
    }

    #[test]
    fn test_verify_inbound_signature_delegates() {
        let gateway = DispatchGateway::new(Arc::new(MockSmtpProvider::new()), verifier());
        let body = b"{}";

        assert!(gateway
            .verify_inbound_signature(body, &sign(&claims_for(body), NEXT))
            .is_ok());
        assert!(gateway
            .verify_inbound_signature(body, &sign(&claims_for(body), "other"))
            .is_err());
    }
}
