//! Text-generation backends.
//!
//! `TextGenerator` is the seam between the assistant and the hosted model.
//! `HostedInference` talks to a text-generation inference endpoint that
//! accepts `{ inputs, parameters }` and answers with `generated_text`, either
//! as an object or as the first element of an array.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use medpredict_contracts::error::{MedPredictError, MedPredictResult};

use crate::config::ChatConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("chat backend returned HTTP {status}")]
    Backend { status: u16 },

    #[error("chat request failed: {reason}")]
    Transport { reason: String },

    /// A 2xx response whose body is not JSON.
    #[error("chat response body is not valid JSON: {reason}")]
    MalformedBody { reason: String },

    #[error("chat response had no generated text")]
    EmptyResponse,
}

/// Produces a completion for a prompt.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, ChatError>;
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub do_sample: bool,
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 100,
            temperature: 0.7,
            top_k: 50,
            top_p: 0.9,
            do_sample: true,
            return_full_text: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: &'a GenerationParameters,
}

/// Pull `generated_text` out of an object or the first array element.
/// Empty text counts as absent.
pub fn extract_generated_text(body: &Value) -> Option<String> {
    let item = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    item.get("generated_text")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

pub struct HostedInference {
    config: ChatConfig,
    parameters: GenerationParameters,
    client: reqwest::blocking::Client,
}

impl HostedInference {
    pub fn new(config: ChatConfig) -> MedPredictResult<Self> {
        config.check()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| MedPredictError::ConfigError {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            config,
            parameters: GenerationParameters::default(),
            client,
        })
    }
}

impl TextGenerator for HostedInference {
    fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        let body = GenerationRequest {
            inputs: prompt,
            parameters: &self.parameters,
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| ChatError::Transport { reason: e.to_string() })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Backend { status: status.as_u16() });
        }

        let json: Value = response
            .json()
            .map_err(|e| ChatError::MalformedBody { reason: e.to_string() })?;
        debug!(endpoint = %self.config.endpoint, "chat completion received");
        extract_generated_text(&json).ok_or(ChatError::EmptyResponse)
    }
}
