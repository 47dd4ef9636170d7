pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment (development = local, production = deployed)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Name and version reported by the health endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Build an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read the first of several keys that is set and non-empty.
///
/// Used for variables that are known under a legacy alias, e.g.
/// `SUPABASE_URL` and `VITE_SUPABASE_URL`.
pub fn env_any(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

/// Like [`env_any`], but missing values are an error naming every alias.
pub fn env_any_required(keys: &[&str]) -> Result<String, ConfigError> {
    env_any(keys).ok_or_else(|| ConfigError::MissingEnvVar(keys.join(" or ")))
}

/// Parse an environment variable, falling back to `default` when unset.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Interpret common truthy spellings ("true", "1", "yes").
pub fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_app_info_macro_uses_crate_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("TEST_VAR", "default"), "test_value");
        });
        temp_env::with_var_unset("MISSING_VAR", || {
            assert_eq!(env_or_default("MISSING_VAR", "default_value"), "default_value");
        });
    }

    #[test]
    fn test_env_any_prefers_first_set_key() {
        temp_env::with_vars(
            [("PRIMARY_KEY", Some("primary")), ("ALIAS_KEY", Some("alias"))],
            || {
                assert_eq!(
                    env_any(&["PRIMARY_KEY", "ALIAS_KEY"]),
                    Some("primary".to_string())
                );
            },
        );
    }

    #[test]
    fn test_env_any_falls_back_to_alias_and_skips_blank() {
        temp_env::with_vars(
            [("PRIMARY_KEY", Some("  ")), ("ALIAS_KEY", Some("alias"))],
            || {
                assert_eq!(
                    env_any(&["PRIMARY_KEY", "ALIAS_KEY"]),
                    Some("alias".to_string())
                );
            },
        );
    }

    #[test]
    fn test_env_any_required_names_all_aliases() {
        temp_env::with_vars_unset(["PRIMARY_KEY", "ALIAS_KEY"], || {
            let err = env_any_required(&["PRIMARY_KEY", "ALIAS_KEY"]).unwrap_err();
            assert!(err.to_string().contains("PRIMARY_KEY or ALIAS_KEY"));
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var("SOME_PORT", Some("2525"), || {
            assert_eq!(env_parse_or::<u16>("SOME_PORT", 587).unwrap(), 2525);
        });
        temp_env::with_var_unset("SOME_PORT", || {
            assert_eq!(env_parse_or::<u16>("SOME_PORT", 587).unwrap(), 587);
        });
        temp_env::with_var("SOME_PORT", Some("nope"), || {
            let err = env_parse_or::<u16>("SOME_PORT", 587).unwrap_err();
            assert!(err.to_string().contains("SOME_PORT"));
        });
    }

    #[test]
    fn test_env_flag() {
        temp_env::with_var("SOME_FLAG", Some("1"), || assert!(env_flag("SOME_FLAG", false)));
        temp_env::with_var("SOME_FLAG", Some("false"), || assert!(!env_flag("SOME_FLAG", true)));
        temp_env::with_var_unset("SOME_FLAG", || assert!(env_flag("SOME_FLAG", true)));
    }
}
