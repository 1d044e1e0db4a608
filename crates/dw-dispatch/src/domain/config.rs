//! Dispatcher configuration with validation.

use super::correlation::{DEFAULT_TOKEN_LENGTH, MIN_TOKEN_LENGTH};
use super::debounce::DEFAULT_STATUS_DEBOUNCE;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable names read by [`DispatchConfig::from_env`].
pub mod env {
    pub const PACKAGE_NAME: &str = "DW_PACKAGE_NAME";
    pub const TOKEN_LENGTH: &str = "DW_TOKEN_LENGTH";
    pub const STATUS_DEBOUNCE_MS: &str = "DW_STATUS_DEBOUNCE_MS";
    /// `0` disables expiry.
    pub const PENDING_TTL_SECS: &str = "DW_PENDING_TTL_SECS";
}

/// Dispatch engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Host package; scans arrive on `<package_name>.SCAN_EVENT`
    pub package_name: String,
    /// Correlation token length (default: 10)
    pub token_length: usize,
    /// Minimum spacing between accepted notifications
    #[serde(with = "humantime_serde")]
    pub status_debounce: Duration,
    /// Age after which an unanswered command is discarded (None = never)
    #[serde(with = "humantime_serde")]
    pub pending_ttl: Option<Duration>,
    /// How often the expiry sweep runs
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
    /// Token draws before giving up on a collision streak
    pub max_token_attempts: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            package_name: "com.example.scanner".to_string(),
            token_length: DEFAULT_TOKEN_LENGTH,
            status_debounce: DEFAULT_STATUS_DEBOUNCE,
            pending_ttl: Some(Duration::from_secs(600)),
            sweep_interval: Duration::from_secs(60),
            max_token_attempts: 4,
        }
    }
}

impl DispatchConfig {
    /// Default configuration for `package_name`.
    pub fn for_package(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `DW_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`DispatchConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(package_name) = lookup(env::PACKAGE_NAME) {
            config.package_name = package_name;
        }
        if let Some(length) = lookup(env::TOKEN_LENGTH) {
            config.token_length = parse_number(env::TOKEN_LENGTH, &length)? as usize;
        }
        if let Some(millis) = lookup(env::STATUS_DEBOUNCE_MS) {
            config.status_debounce =
                Duration::from_millis(parse_number(env::STATUS_DEBOUNCE_MS, &millis)?);
        }
        if let Some(secs) = lookup(env::PENDING_TTL_SECS) {
            config.pending_ttl = match parse_number(env::PENDING_TTL_SECS, &secs)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package_name.trim().is_empty() {
            return Err(ConfigError::EmptyPackageName);
        }

        if self.token_length < MIN_TOKEN_LENGTH {
            return Err(ConfigError::TokenTooShort {
                length: self.token_length,
                min: MIN_TOKEN_LENGTH,
            });
        }

        if self.pending_ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(ConfigError::InvalidDuration(
                "pending_ttl cannot be 0 (use None to disable expiry)".into(),
            ));
        }

        if self.sweep_interval.is_zero() {
            return Err(ConfigError::InvalidDuration(
                "sweep_interval cannot be 0".into(),
            ));
        }

        if self.max_token_attempts == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_token_attempts cannot be 0".into(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn with_token_length(mut self, length: usize) -> Self {
        self.token_length = length;
        self
    }

    #[must_use]
    pub fn with_status_debounce(mut self, window: Duration) -> Self {
        self.status_debounce = window;
        self
    }

    #[must_use]
    pub fn with_pending_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.pending_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    #[must_use]
    pub fn with_max_token_attempts(mut self, attempts: u32) -> Self {
        self.max_token_attempts = attempts;
        self
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}
