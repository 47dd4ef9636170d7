use std::sync::Arc;

use database::supabase::SupabaseClient;
use domain_programs::{ProgramRepository, ProgramService, SupabaseProgramRepository};
use email::{
    DispatchGateway, InMemoryDeliveryLedger, NotificationService, SignatureVerifier, SmtpProvider,
    TemplateEngine,
};
use tracing::{info, warn};

use crate::config::Config;

pub type Programs = ProgramService<Arc<dyn ProgramRepository>>;

/// Shared application state
///
/// Cheap to clone: every member is reference counted internally.
#[derive(Clone)]
pub struct AppState {
    pub notifications: NotificationService,
    pub programs: Programs,
}

impl AppState {
    pub fn new(notifications: NotificationService, programs: Programs) -> Self {
        Self {
            notifications,
            programs,
        }
    }

    /// Wire the production collaborators from configuration.
    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        let client = SupabaseClient::new(&config.supabase)?;
        let repository: Arc<dyn ProgramRepository> =
            Arc::new(SupabaseProgramRepository::new(client));

        let qstash = &config.qstash;
        let verifier = SignatureVerifier::new(
            qstash.current_signing_key.as_deref(),
            qstash.next_signing_key.as_deref(),
            qstash.callback_url.clone(),
        );
        if !verifier.has_keys() {
            warn!("No QStash signing keys configured; every callback will be rejected");
        }

        let provider = SmtpProvider::new(config.smtp.clone())?;
        let mut gateway = DispatchGateway::new(Arc::new(provider), verifier);
        if let Some(publisher) = qstash.publisher()? {
            gateway = gateway.with_queue(Arc::new(publisher));
        }

        let mut notifications = NotificationService::new(
            gateway,
            TemplateEngine::new(config.branding.clone())?,
            Arc::new(InMemoryDeliveryLedger::default()),
        );
        if let Some(callback_url) = &qstash.callback_url {
            notifications = notifications.with_callback_url(callback_url.as_str());
        }

        info!(
            smtp_host = %config.smtp.host,
            queued = notifications.queued_enabled(),
            "Notification service configured"
        );

        Ok(Self::new(notifications, ProgramService::new(repository)))
    }
}
