//! Run configuration: defaults, then `PEGSCAN_*` environment, then explicit
//! overrides from the caller.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryConfig;
use crate::throttle::PolitenessDelay;
use crate::ValidationError;

pub const ENV_TIMEOUT_MS: &str = "PEGSCAN_TIMEOUT_MS";
pub const ENV_DELAY_MIN_MS: &str = "PEGSCAN_DELAY_MIN_MS";
pub const ENV_DELAY_MAX_MS: &str = "PEGSCAN_DELAY_MAX_MS";
pub const ENV_MAX_RETRIES: &str = "PEGSCAN_MAX_RETRIES";
pub const ENV_STORE_DIR: &str = "PEGSCAN_STORE_DIR";

const DEFAULT_STORE_DIR: &str = ".pegscan";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub timeout_ms: u64,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    pub max_retries: u32,
    pub store_dir: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            delay_min_ms: 2_000,
            delay_max_ms: 4_000,
            max_retries: 2,
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
        }
    }
}

impl ScanConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`. Blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());

        if let Some(raw) = value(ENV_TIMEOUT_MS) {
            config.timeout_ms = parse_number(ENV_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = value(ENV_DELAY_MIN_MS) {
            config.delay_min_ms = parse_number(ENV_DELAY_MIN_MS, &raw)?;
        }
        if let Some(raw) = value(ENV_DELAY_MAX_MS) {
            config.delay_max_ms = parse_number(ENV_DELAY_MAX_MS, &raw)?;
        }
        if let Some(raw) = value(ENV_MAX_RETRIES) {
            config.max_retries = parse_number(ENV_MAX_RETRIES, &raw)?;
        }
        if let Some(raw) = value(ENV_STORE_DIR) {
            config.store_dir = PathBuf::from(raw.trim());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_delay_range_ms(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.delay_min_ms = min_ms;
        self.delay_max_ms = max_ms;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_store_dir(mut self, store_dir: impl Into<PathBuf>) -> Self {
        self.store_dir = store_dir.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_ms == 0 {
            return Err(ValidationError::InvalidConfig {
                key: ENV_TIMEOUT_MS,
                value: String::from("0"),
            });
        }
        if self.delay_min_ms > self.delay_max_ms {
            return Err(ValidationError::InvalidDelayRange {
                min_ms: self.delay_min_ms,
                max_ms: self.delay_max_ms,
            });
        }
        Ok(())
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig::with_max_retries(self.max_retries)
    }

    pub fn politeness(&self) -> Result<PolitenessDelay, ValidationError> {
        PolitenessDelay::new(
            Duration::from_millis(self.delay_min_ms),
            Duration::from_millis(self.delay_max_ms),
        )
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidConfig {
            key,
            value: raw.to_owned(),
        })
}
