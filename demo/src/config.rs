//! Demo configuration file.
//!
//! ```toml
//! [predictor]
//! base_url = "http://localhost:8000"
//! timeout_secs = 30
//!
//! [chat]
//! endpoint = "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-v0.1"
//! api_key = "hf_..."
//! ```
//!
//! Without `--config`, both sections come from the environment.

use std::path::Path;

use serde::Deserialize;

use medpredict_chat::ChatConfig;
use medpredict_contracts::error::{MedPredictError, MedPredictResult};
use medpredict_predictor::PredictorConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub predictor: PredictorConfig,
    pub chat: ChatConfig,
}

impl DemoConfig {
    pub fn load(path: Option<&Path>) -> MedPredictResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self {
                predictor: PredictorConfig::from_env()?,
                chat: ChatConfig::from_env()?,
            }),
        }
    }

    pub fn from_file(path: &Path) -> MedPredictResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MedPredictError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> MedPredictResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| MedPredictError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        config.predictor.check()?;
        config.chat.check()?;
        Ok(config)
    }
}
