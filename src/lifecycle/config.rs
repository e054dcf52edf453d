//! # Configuration
//!
//! Built-in defaults, overridden by `HOT_COFFEE__*` environment variables:
//!
//! | variable | default |
//! |----------|---------|
//! | `HOT_COFFEE__MAILBOX_CAPACITY` | 32 |
//! | `HOT_COFFEE__BATCH_CONCURRENCY` | 8 |
//! | `HOT_COFFEE__LOG_FILTER` | `info` |

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub const ENV_PREFIX: &str = "HOT_COFFEE";
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;
pub const DEFAULT_BATCH_CONCURRENCY: usize = 8;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShopConfig {
    /// Request buffer of each store actor.
    pub mailbox_capacity: usize,
    /// Drafts a batch processes at the same time.
    pub batch_concurrency: usize,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),

    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Reads the configuration from the process environment.
pub fn load_config() -> Result<ShopConfig, ConfigError> {
    load_config_from(Environment::with_prefix(ENV_PREFIX))
}

/// Same as [`load_config`] with an explicit environment source.
pub fn load_config_from(environment: Environment) -> Result<ShopConfig, ConfigError> {
    let config: ShopConfig = Config::builder()
        .set_default("mailbox_capacity", DEFAULT_MAILBOX_CAPACITY as u64)?
        .set_default("batch_concurrency", DEFAULT_BATCH_CONCURRENCY as u64)?
        .set_default("log_filter", DEFAULT_LOG_FILTER)?
        .add_source(environment.separator("__").try_parsing(true))
        .build()?
        .try_deserialize()?;

    if config.mailbox_capacity == 0 {
        return Err(ConfigError::Zero("mailbox_capacity"));
    }
    if config.batch_concurrency == 0 {
        return Err(ConfigError::Zero("batch_concurrency"));
    }
    info!(
        mailbox_capacity = config.mailbox_capacity,
        batch_concurrency = config.batch_concurrency,
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = load_config_from(env(&[])).expect("defaults load");
        assert_eq!(config, ShopConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = load_config_from(env(&[
            ("HOT_COFFEE__MAILBOX_CAPACITY", "128"),
            ("HOT_COFFEE__LOG_FILTER", "hot_coffee=debug"),
        ]))
        .expect("overrides load");
        assert_eq!(config.mailbox_capacity, 128);
        assert_eq!(config.batch_concurrency, DEFAULT_BATCH_CONCURRENCY);
        assert_eq!(config.log_filter, "hot_coffee=debug");
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = load_config_from(env(&[("HOT_COFFEE__BATCH_CONCURRENCY", "0")]))
            .expect_err("zero concurrency");
        assert!(matches!(err, ConfigError::Zero("batch_concurrency")));
    }
}
