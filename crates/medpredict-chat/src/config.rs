//! Chat backend configuration.
//!
//! | Variable                  | Default                                     |
//! |---------------------------|---------------------------------------------|
//! | `MEDPREDICT_CHAT_URL`     | hosted Mistral-7B inference endpoint        |
//! | `MEDPREDICT_CHAT_API_KEY` | unset (requests are sent without a token)   |

use std::time::Duration;

use serde::{Deserialize, Serialize};

use medpredict_contracts::error::{MedPredictError, MedPredictResult};

pub const CHAT_URL_ENV: &str = "MEDPREDICT_CHAT_URL";
pub const CHAT_API_KEY_ENV: &str = "MEDPREDICT_CHAT_API_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-v0.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub endpoint: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> MedPredictResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MedPredictResult<Self> {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(url) = present(CHAT_URL_ENV) {
            config.endpoint = url;
        }
        config.api_key = present(CHAT_API_KEY_ENV);
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> MedPredictResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(MedPredictError::ConfigError {
                reason: "chat endpoint is empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(MedPredictError::ConfigError {
                reason: "chat timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
