//! SMTP email provider using lettre

use super::EmailProvider;
use crate::error::{NotificationError, NotificationResult};
use crate::models::{EmailMessage, SendResult};
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_any, env_flag, env_or_default, env_parse_or};
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use std::fmt;
use std::time::Duration;

/// Port on which SMTP servers expect TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP provider configuration
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_email: String,
    pub from_name: String,
    pub use_tls: bool,
    /// Connect and per-command timeout
    pub timeout: Duration,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("use_tls", &self.use_tls)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FromEnv for SmtpConfig {
    /// Optional variables and defaults:
    /// - `SMTP_HOST` (localhost), `SMTP_PORT` (587), `SMTP_USE_TLS` (true)
    /// - `SMTP_USERNAME` / `EMAIL_USER`, `SMTP_PASSWORD` / `EMAIL_PASS`
    /// - `EMAIL_FROM_ADDRESS` (the username), `EMAIL_FROM_NAME` (Blog)
    /// - `SMTP_TIMEOUT_SECS` (10)
    fn from_env() -> Result<Self, ConfigError> {
        let username = env_any(&["SMTP_USERNAME", "EMAIL_USER"]);
        let password = env_any(&["SMTP_PASSWORD", "EMAIL_PASS"]);
        let from_email = env_any(&["EMAIL_FROM_ADDRESS"])
            .or_else(|| username.clone())
            .unwrap_or_else(|| "noreply@localhost".to_string());

        Ok(Self {
            host: env_or_default("SMTP_HOST", "localhost"),
            port: env_parse_or("SMTP_PORT", 587)?,
            username,
            password,
            from_email,
            from_name: env_or_default("EMAIL_FROM_NAME", "Blog"),
            use_tls: env_flag("SMTP_USE_TLS", true),
            timeout: Duration::from_secs(env_parse_or("SMTP_TIMEOUT_SECS", 10)?),
        })
    }
}

/// SMTP email provider
pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpProvider {
    /// Create a new SMTP provider.
    ///
    /// With TLS on, port 465 uses implicit TLS and any other port STARTTLS.
    /// Without TLS (Mailpit/Mailhog) the session is plaintext.
    pub fn new(config: SmtpConfig) -> NotificationResult<Self> {
        let from_address: Address = config.from_email.parse().map_err(|e| {
            NotificationError::Config(format!("Invalid from address '{}': {}", config.from_email, e))
        })?;
        let from = Mailbox::new(Some(config.from_name.clone()), from_address);

        let builder = if !config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        } else if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| NotificationError::Config(format!("Failed to create SMTP relay: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| NotificationError::Config(format!("Failed to create SMTP relay: {}", e)))?
        };

        let builder = builder.port(config.port).timeout(Some(config.timeout));

        let transport = match (config.username, config.password) {
            (Some(username), password) => builder
                .credentials(Credentials::new(username, password.unwrap_or_default()))
                .build(),
            (None, _) => builder.build(),
        };

        Ok(Self { transport, from })
    }

    fn build_message(&self, message: &EmailMessage) -> NotificationResult<Message> {
        let to: Mailbox = message.to.parse().map_err(|e| {
            NotificationError::Delivery(format!("Invalid recipient '{}': {}", message.to, e))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&message.subject)
            .multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                message.html_body.clone(),
            ))
            .map_err(|e| NotificationError::Delivery(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, message: &EmailMessage) -> NotificationResult<SendResult> {
        let email = self.build_message(message)?;

        let response = self.transport.send(email).await.map_err(|e| {
            tracing::warn!(email_id = %message.id, to = %message.to, error = %e, "SMTP send failed");
            NotificationError::Delivery(e.to_string())
        })?;

        let message_id = response
            .message()
            .next()
            .map(|s| s.to_string())
            .unwrap_or_else(|| message.id.clone());

        tracing::info!(
            email_id = %message.id,
            to = %message.to,
            subject = %message.subject,
            "Email sent successfully"
        );

        Ok(SendResult { message_id })
    }

    async fn health_check(&self) -> NotificationResult<()> {
        let connected = self
            .transport
            .test_connection()
            .await
            .map_err(|e| NotificationError::Delivery(format!("SMTP health check failed: {}", e)))?;

        if connected {
            Ok(())
        } else {
            Err(NotificationError::Delivery(
                "SMTP health check failed: server did not answer NOOP".to_string(),
            ))
        }
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config(port: u16) -> SmtpConfig {
        SmtpConfig {
            host: "127.0.0.1".to_string(),
            port,
            username: None,
            password: None,
            from_email: "news@acme.test".to_string(),
            from_name: "Acme".to_string(),
            use_tls: false,
            timeout: Duration::from_secs(2),
        }
    }

    fn message(to: &str) -> EmailMessage {
        EmailMessage::new(to, "New post: Launch", "<p>Hi</p>", "Launch")
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("SMTP_HOST", None::<&str>),
                ("SMTP_PORT", None),
                ("SMTP_USE_TLS", None),
                ("SMTP_USERNAME", None),
                ("EMAIL_USER", None),
                ("SMTP_PASSWORD", None),
                ("EMAIL_PASS", None),
                ("EMAIL_FROM_ADDRESS", None),
                ("EMAIL_FROM_NAME", None),
                ("SMTP_TIMEOUT_SECS", None),
            ],
            || {
                let config = SmtpConfig::from_env().unwrap();
                assert_eq!(config.host, "localhost");
                assert_eq!(config.port, 587);
                assert!(config.use_tls);
                assert_eq!(config.username, None);
                assert_eq!(config.from_email, "noreply@localhost");
                assert_eq!(config.from_name, "Blog");
                assert_eq!(config.timeout, Duration::from_secs(10));
            },
        );
    }

    #[test]
    fn test_from_env_legacy_aliases_and_from_fallback() {
        temp_env::with_vars(
            [
                ("SMTP_USERNAME", None),
                ("EMAIL_USER", Some("writer@acme.test")),
                ("SMTP_PASSWORD", None),
                ("EMAIL_PASS", Some("app-password")),
                ("EMAIL_FROM_ADDRESS", None),
            ],
            || {
                let config = SmtpConfig::from_env().unwrap();
                assert_eq!(config.username.as_deref(), Some("writer@acme.test"));
                assert_eq!(config.password.as_deref(), Some("app-password"));
                assert_eq!(config.from_email, "writer@acme.test");
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_port() {
        temp_env::with_var("SMTP_PORT", Some("not-a-port"), || {
            assert!(matches!(
                SmtpConfig::from_env(),
                Err(ConfigError::ParseError { .. })
            ));
        });
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = SmtpConfig {
            password: Some("hunter2".to_string()),
            ..local_config(25)
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_invalid_from_address_is_config_error() {
        let config = SmtpConfig {
            from_email: "not an address".to_string(),
            ..local_config(25)
        };
        assert!(matches!(
            SmtpProvider::new(config),
            Err(NotificationError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_recipient_is_delivery_error() {
        let provider = SmtpProvider::new(local_config(25)).unwrap();
        assert!(matches!(
            provider.build_message(&message("not-an-address")),
            Err(NotificationError::Delivery(_))
        ));
    }

    #[test]
    fn test_message_has_both_parts() {
        let provider = SmtpProvider::new(local_config(25)).unwrap();
        let raw = String::from_utf8(provider.build_message(&message("reader@acme.test")).unwrap().formatted())
            .unwrap();

        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("Subject: New post: Launch"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_delivery_error() {
        let provider = SmtpProvider::new(local_config(1)).unwrap();
        let result = provider.send(&message("reader@acme.test")).await;
        assert!(matches!(result, Err(NotificationError::Delivery(_))));
    }

    #[test]
    fn test_tls_builders() {
        let starttls = SmtpConfig {
            use_tls: true,
            port: 587,
            ..local_config(587)
        };
        assert!(SmtpProvider::new(starttls).is_ok());

        let implicit = SmtpConfig {
            use_tls: true,
            ..local_config(IMPLICIT_TLS_PORT)
        };
        assert!(SmtpProvider::new(implicit).is_ok());
    }
}
