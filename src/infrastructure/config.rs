use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::domain::auth::services::AuthServiceConfig;

fn default_log_filter() -> String {
  "authcore=info".to_string()
}

fn default_mask_emails() -> bool {
  true
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub logging: LoggingConfig,
  #[serde(default)]
  pub security: SecurityConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
  #[serde(default = "default_log_filter")]
  pub filter: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      filter: default_log_filter(),
    }
  }
}

/// Security configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
  /// Log masked email addresses instead of full ones
  #[serde(default = "default_mask_emails")]
  pub mask_emails_in_logs: bool,
}

impl Default for SecurityConfig {
  fn default() -> Self {
    Self {
      mask_emails_in_logs: default_mask_emails(),
    }
  }
}

impl From<&SecurityConfig> for AuthServiceConfig {
  fn from(security: &SecurityConfig) -> Self {
    Self {
      mask_emails_in_logs: security.mask_emails_in_logs,
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml (if exists)
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with AUTHCORE_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the AUTHCORE_ prefix and are separated by double underscores:
  /// - `AUTHCORE_LOGGING__FILTER=authcore=debug`
  /// - `AUTHCORE_SECURITY__MASK_EMAILS_IN_LOGS=false`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if a file contains invalid TOML or a value has the wrong type
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(false))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("AUTHCORE")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }

  pub fn auth_service(&self) -> AuthServiceConfig {
    AuthServiceConfig::from(&self.security)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [logging]
            filter = "authcore=debug"

            [security]
            mask_emails_in_logs = false
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.logging.filter, "authcore=debug");
    assert!(!config.security.mask_emails_in_logs);
    assert!(!config.auth_service().mask_emails_in_logs);
  }

  #[test]
  fn test_config_defaults() {
    let config: Config = toml::from_str("").expect("Failed to parse empty config");

    assert_eq!(config.logging.filter, "authcore=info"); // default
    assert!(config.security.mask_emails_in_logs); // default
  }
}
