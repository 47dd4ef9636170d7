//! Blog post email notifications
//!
//! Renders a blog post into an HTML email and delivers it either directly
//! over SMTP or through QStash, which calls back a signed webhook that
//! performs the send.
//!
//! ## Components
//!
//! - **Models**: `BlogPost`, `EmailMessage`, `DispatchJob`, `NotifyRequest`, `NotifyReport`
//! - **Templates**: Handlebars-based `TemplateEngine`
//! - **Providers**: `SmtpProvider` (lettre) and `MockSmtpProvider`
//! - **Queue**: `QStashClient` and `MockMessageQueue`
//! - **Signatures**: `SignatureVerifier` for `Upstash-Signature` tokens
//! - **Ledger**: `DeliveryLedger` for at-least-once callbacks
//! - **Service**: `DispatchGateway` and `NotificationService`
//!
//! ## Usage
//!
//! ```ignore
//! use email::{DispatchGateway, NotificationService, SmtpProvider, TemplateEngine};
//!
//! let gateway = DispatchGateway::new(Arc::new(SmtpProvider::new(smtp)?), verifier)
//!     .with_queue(Arc::new(qstash));
//! let service = NotificationService::new(gateway, TemplateEngine::new(branding)?, ledger)
//!     .with_callback_url(callback_url);
//!
//! let report = service.notify(&request).await?;
//! ```

pub mod error;
pub mod gateway;
pub mod ledger;
pub mod models;
pub mod provider;
pub mod queue;
pub mod service;
pub mod signature;
pub mod templates;

pub use error::{NotificationError, NotificationResult};
pub use gateway::DispatchGateway;
pub use ledger::{DEFAULT_LEDGER_TTL, DeliveryLedger, InMemoryDeliveryLedger};
pub use models::{
    BlogPost, CallbackOutcome, DeliveryMode, DispatchJob, DispatchStatus, EmailMessage,
    NotifyReport, NotifyRequest, PublishReceipt, RecipientOutcome, SendResult, SiteBranding,
};
pub use provider::{EmailProvider, MockSmtpProvider, SmtpConfig, SmtpProvider};
pub use queue::{MessageQueue, MockMessageQueue, QStashClient, QStashConfig};
pub use service::{MAX_DIRECT_RECIPIENTS, NotificationService};
pub use signature::{SIGNATURE_HEADER, SignatureVerifier, body_hash};
pub use templates::{RenderedTemplate, TemplateEngine};
