//! Runtime configuration loaded from `STOREFRONT_*` environment variables.
//!
//! Unset variables fall back to a logged default. A set but malformed variable is an error.

use actor_framework::RetryPolicy;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Capacity of the product actor's mailbox.
    pub mailbox_capacity: usize,
    /// Send attempts against a full mailbox before giving up.
    pub retry_attempts: u32,
    pub retry_backoff: Duration,
    /// Create the starter products when the catalog is empty.
    pub seed_catalog: bool,
    /// Concurrent synthetic sessions driven by the demo binary.
    pub demo_sessions: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 256,
            retry_attempts: 5,
            retry_backoff: Duration::from_millis(5),
            seed_catalog: true,
            demo_sessions: 4,
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mailbox_capacity = try_load(&lookup, "STOREFRONT_MAILBOX_CAPACITY", "256")?;
        let retry_attempts = try_load(&lookup, "STOREFRONT_RETRY_ATTEMPTS", "5")?;
        let backoff_ms: u64 = try_load(&lookup, "STOREFRONT_RETRY_BACKOFF_MS", "5")?;
        let seed_catalog = try_load(&lookup, "STOREFRONT_SEED_CATALOG", "true")?;
        let demo_sessions = try_load(&lookup, "STOREFRONT_DEMO_SESSIONS", "4")?;

        positive("STOREFRONT_MAILBOX_CAPACITY", mailbox_capacity)?;
        positive("STOREFRONT_RETRY_ATTEMPTS", retry_attempts)?;

        Ok(Self {
            mailbox_capacity,
            retry_attempts,
            retry_backoff: Duration::from_millis(backoff_ms),
            seed_catalog,
            demo_sessions,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, self.retry_backoff)
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}

fn positive<T: PartialEq + Default + Display>(key: &'static str, value: T) -> Result<(), ConfigError> {
    if value == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(())
}
