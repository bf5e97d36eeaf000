//! Predictor client configuration.
//!
//! Loaded from a `[predictor]` TOML table or from the environment:
//!
//! | Variable                   | Default                 |
//! |----------------------------|-------------------------|
//! | `MEDPREDICT_API_URL`       | `http://localhost:8000` |
//! | `MEDPREDICT_TIMEOUT_SECS`  | `30`                    |

use std::time::Duration;

use serde::{Deserialize, Serialize};

use medpredict_contracts::error::{MedPredictError, MedPredictResult};

pub const API_URL_ENV: &str = "MEDPREDICT_API_URL";
pub const TIMEOUT_ENV: &str = "MEDPREDICT_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Backend root; requests go to `{base_url}/predict/{condition}`.
    pub base_url: String,
    /// Total per-request timeout.
    pub timeout_secs: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PredictorConfig {
    /// Build from the process environment.
    pub fn from_env() -> MedPredictResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MedPredictResult<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout_secs = raw.trim().parse().map_err(|e| MedPredictError::ConfigError {
                reason: format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}': {e}"),
            })?;
        }
        config.check()?;
        Ok(config)
    }

    /// Reject configurations the client cannot run with.
    pub fn check(&self) -> MedPredictResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(MedPredictError::ConfigError {
                reason: "predictor base_url is empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(MedPredictError::ConfigError {
                reason: "predictor timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{base_url}/{path}` without doubled slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
