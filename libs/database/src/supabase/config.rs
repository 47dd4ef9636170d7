use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_any_required, env_parse_or};

/// Hosted-store connection settings
///
/// Built by hand in tests, or from the environment (with `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::supabase::SupabaseConfig;
///
/// let config = SupabaseConfig::new("https://abc.supabase.co", "anon-key");
///
/// // Reads SUPABASE_URL / SUPABASE_ANON_KEY (or their VITE_ aliases)
/// let config = SupabaseConfig::from_env()?;
/// ```
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, without trailing slash
    pub url: String,

    /// Anonymous (public) API key
    pub anon_key: String,

    /// Per-request timeout for REST calls
    pub timeout: Duration,
}

impl SupabaseConfig {
    /// Default per-request timeout
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL of the PostgREST interface.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }
}

// Keep the anon key out of logs.
impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(feature = "config")]
impl FromEnv for SupabaseConfig {
    /// Load the store settings.
    ///
    /// Required (either spelling):
    /// - `SUPABASE_URL` / `VITE_SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY` / `VITE_SUPABASE_ANON_KEY`
    ///
    /// Optional:
    /// - `SUPABASE_TIMEOUT_SECS` (default: 10)
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_any_required(&["SUPABASE_URL", "VITE_SUPABASE_URL"])?;
        let anon_key = env_any_required(&["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"])?;
        let timeout_secs = env_parse_or("SUPABASE_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self::new(url.trim(), anon_key.trim()).with_timeout(Duration::from_secs(timeout_secs)))
    }
}
