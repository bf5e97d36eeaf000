//! Blocking HTTP predictor.
//!
//! `HttpPredictor` implements the `Predictor` trait from `medpredict-core`
//! against the prediction backend:
//!
//! - `POST {base}/predict/{condition}` with the normalized values as a JSON
//!   object in schema order.
//! - 2xx: body checked by `PredictionDecoder`.
//! - non-2xx: `{ "detail": "..." }` is surfaced verbatim when present.
//!
//! Exactly one request per call. The client never retries.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use medpredict_contracts::{
    condition::ConditionId,
    error::{MedPredictError, MedPredictResult},
    prediction::{Prediction, PredictorError},
    validation::NormalizedValues,
};
use medpredict_core::traits::Predictor;
use medpredict_validate::PredictionDecoder;

use crate::config::PredictorConfig;

/// Response of `GET {base}/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub models_loaded: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

pub struct HttpPredictor {
    config: PredictorConfig,
    client: reqwest::blocking::Client,
    decoder: PredictionDecoder,
}

impl HttpPredictor {
    /// Build a client with the configured timeout.
    ///
    /// Returns `ConfigError` if the configuration is unusable or the HTTP
    /// client cannot be constructed.
    pub fn new(config: PredictorConfig) -> MedPredictResult<Self> {
        config.check()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| MedPredictError::ConfigError {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            config,
            client,
            decoder: PredictionDecoder::new(),
        })
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Ask the backend for its status and the models it has loaded.
    pub fn health(&self) -> Result<HealthStatus, PredictorError> {
        let url = self.config.endpoint("health");
        debug!(%url, "probing predictor health");

        let response = self.client.get(&url).send().map_err(send_error)?;
        let status = response.status();
        let body = response.text().map_err(send_error)?;
        if !status.is_success() {
            return Err(backend_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|e| PredictorError::MalformedResponse {
            reason: format!("invalid health body: {e}"),
        })
    }
}

impl std::fmt::Debug for HttpPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPredictor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, condition: &ConditionId, values: &NormalizedValues) -> Result<Prediction, PredictorError> {
        let url = self.config.endpoint(&format!("predict/{condition}"));
        info!(%condition, %url, fields = values.len(), "requesting prediction");

        let response = self
            .client
            .post(&url)
            .json(values)
            .send()
            .map_err(send_error)?;

        let status = response.status();
        let body = response.text().map_err(send_error)?;

        if !status.is_success() {
            let err = backend_error(status.as_u16(), &body);
            warn!(%condition, status = status.as_u16(), error = %err, "predictor returned an error");
            return Err(err);
        }

        let prediction = self.decoder.decode_str(&body).inspect_err(|e| {
            warn!(%condition, error = %e, "predictor response rejected");
        })?;
        debug!(
            %condition,
            class = ?prediction.predicted_class,
            probability = prediction.probability,
            "prediction received"
        );
        Ok(prediction)
    }
}

// ── Error mapping ────────────────────────────────────────────────────────────

fn send_error(e: reqwest::Error) -> PredictorError {
    if e.is_timeout() {
        PredictorError::Timeout
    } else {
        PredictorError::Transport { reason: e.to_string() }
    }
}

/// Build a `Backend` error, keeping a string `detail` if the body has one.
fn backend_error(status: u16, body: &str) -> PredictorError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| match d {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        });
    PredictorError::Backend { status, detail }
}
