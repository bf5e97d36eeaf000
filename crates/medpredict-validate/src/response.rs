//! Structural check of predictor response bodies.
//!
//! A 2xx body is validated against a JSON Schema before it is deserialized
//! into a `Prediction`. Anything that fails either step is a
//! `PredictorError::MalformedResponse`.

use serde_json::{json, Value};
use tracing::warn;

use medpredict_contracts::prediction::{Prediction, PredictorError};

/// JSON Schema for `{ prediction: 0|1, probability: [0,1], message?: string }`.
pub fn prediction_schema() -> Value {
    json!({
        "type": "object",
        "required": ["prediction", "probability"],
        "properties": {
            "prediction": { "type": "integer", "enum": [0, 1] },
            "probability": { "type": "number", "minimum": 0, "maximum": 1 },
            "message": { "type": ["string", "null"] }
        }
    })
}

/// Turns raw response bodies into `Prediction`s.
///
/// The schema is compiled once at construction and reused for every call.
pub struct PredictionDecoder {
    validator: Option<jsonschema::Validator>,
}

impl PredictionDecoder {
    pub fn new() -> Self {
        let validator = match jsonschema::validator_for(&prediction_schema()) {
            Ok(v) => Some(v),
            Err(e) => {
                // Falls back to the serde shape check alone.
                warn!(error = %e, "prediction schema failed to compile");
                None
            }
        };
        Self { validator }
    }

    /// Decode a response body that has already been read as text.
    pub fn decode_str(&self, body: &str) -> Result<Prediction, PredictorError> {
        let value: Value = serde_json::from_str(body).map_err(|e| PredictorError::MalformedResponse {
            reason: format!("response body is not JSON: {e}"),
        })?;
        self.decode(&value)
    }

    /// Decode a parsed response body.
    pub fn decode(&self, body: &Value) -> Result<Prediction, PredictorError> {
        if let Some(validator) = &self.validator {
            let violations: Vec<String> = validator
                .iter_errors(body)
                .map(|error| format!("{} at {}", error, error.instance_path))
                .collect();
            if !violations.is_empty() {
                return Err(PredictorError::MalformedResponse {
                    reason: violations.join("; "),
                });
            }
        }

        serde_json::from_value(body.clone()).map_err(|e| PredictorError::MalformedResponse {
            reason: e.to_string(),
        })
    }
}

impl Default for PredictionDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PredictionDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionDecoder")
            .field("compiled", &self.validator.is_some())
            .finish()
    }
}
