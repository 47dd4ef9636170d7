use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::supabase::SupabaseConfig;
use email::{QStashConfig, SiteBranding, SmtpConfig};

pub use core_config::Environment;

/// Application configuration, composed from the libraries' env loaders.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub smtp: SmtpConfig,
    pub qstash: QStashConfig,
    pub branding: SiteBranding,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080
        let supabase = SupabaseConfig::from_env()?; // Required - will fail if not set
        let smtp = SmtpConfig::from_env()?;
        let qstash = QStashConfig::from_env()?;
        let branding = SiteBranding::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            supabase,
            smtp,
            qstash,
            branding,
        })
    }
}
