//! End-to-end flows through the public API of the email library

use email::signature::{CallbackClaims, ISSUER};
use email::{
    BlogPost, CallbackOutcome, DeliveryMode, DispatchGateway, InMemoryDeliveryLedger,
    MockMessageQueue, MockSmtpProvider, NotificationService, NotifyRequest, SignatureVerifier,
    SiteBranding, TemplateEngine, body_hash,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

const CURRENT_KEY: &str = "sig_current";
const NEXT_KEY: &str = "sig_next";
const CALLBACK: &str = "https://blog.example.com/api/notifications/callback";

fn qstash_token(body: &[u8], key: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = CallbackClaims {
        iss: ISSUER.to_string(),
        sub: CALLBACK.to_string(),
        exp: now + 300,
        nbf: now,
        iat: Some(now),
        jti: None,
        body: body_hash(body),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .unwrap()
}

fn service(provider: &MockSmtpProvider, queue: &MockMessageQueue) -> NotificationService {
    let gateway = DispatchGateway::new(
        Arc::new(provider.clone()),
        SignatureVerifier::new(Some(CURRENT_KEY), Some(NEXT_KEY), Some(CALLBACK.to_string())),
    )
    .with_queue(Arc::new(queue.clone()));

    NotificationService::new(
        gateway,
        TemplateEngine::new(SiteBranding::new("Acme", "https://blog.example.com")).unwrap(),
        Arc::new(InMemoryDeliveryLedger::default()),
    )
    .with_callback_url(CALLBACK)
}

fn launch_request(mode: DeliveryMode) -> NotifyRequest {
    NotifyRequest {
        post: BlogPost {
            title: "Launch".to_string(),
            slug: Some("launch".to_string()),
            excerpt: None,
            content: "<p>Hi</p>".to_string(),
            cover_image: None,
        },
        recipients: vec!["reader@example.com".to_string()],
        mode,
    }
}

#[tokio::test]
async fn test_queued_notification_is_delivered_by_signed_callback() {
    let provider = MockSmtpProvider::new();
    let queue = MockMessageQueue::new();
    let service = service(&provider, &queue);

    let report = service
        .notify(&launch_request(DeliveryMode::Queued))
        .await
        .unwrap();
    assert_eq!(report.queued, 1);
    assert_eq!(provider.sent_count().await, 0);

    // What the queue would POST back to us.
    let job = queue.published_jobs().await.remove(0);
    let body = serde_json::to_vec(&job).unwrap();
    let token = qstash_token(&body, NEXT_KEY);

    let outcome = service
        .handle_callback(&body, Some(&token), Some("msg_abc"))
        .await
        .unwrap();

    assert!(matches!(outcome, CallbackOutcome::Delivered { .. }));
    let sent = provider.sent_messages().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id, job.id);
    assert!(sent[0].html_body.contains("https://blog.example.com/blog/launch"));

    // Redelivery by the queue is acknowledged without a second email.
    let again = service
        .handle_callback(&body, Some(&token), Some("msg_abc"))
        .await
        .unwrap();
    assert!(matches!(again, CallbackOutcome::Duplicate { .. }));
    assert_eq!(provider.sent_count().await, 1);
}

#[tokio::test]
async fn test_direct_notification_with_failed_transport_persists_nothing() {
    let provider = MockSmtpProvider::failing("535 authentication failed");
    let queue = MockMessageQueue::new();
    let service = service(&provider, &queue);

    let report = service
        .notify(&launch_request(DeliveryMode::Direct))
        .await
        .unwrap();

    assert_eq!(report.failed, 1);
    assert!(report.results[0]
        .error
        .as_deref()
        .unwrap()
        .contains("535 authentication failed"));
    assert!(queue.published_jobs().await.is_empty());
    assert_eq!(provider.sent_count().await, 0);
}
