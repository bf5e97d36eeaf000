//! Predictor response and result tier types.
//!
//! The external predictor returns a binary class plus the probability of
//! that class. `ResultTier` is derived from the probability for display only
//! and is never stored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic user-facing message for any predictor failure without a backend
/// `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while making the prediction";

/// The binary class returned by the predictor. Serialized as `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PredictedClass {
    Negative,
    Positive,
}

impl TryFrom<u8> for PredictedClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PredictedClass::Negative),
            1 => Ok(PredictedClass::Positive),
            other => Err(format!("predicted class must be 0 or 1, got {other}")),
        }
    }
}

impl From<PredictedClass> for u8 {
    fn from(class: PredictedClass) -> Self {
        match class {
            PredictedClass::Negative => 0,
            PredictedClass::Positive => 1,
        }
    }
}

/// A successful predictor response.
///
/// Replaced wholesale on every new submission; never merged with a previous
/// prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "prediction")]
    pub predicted_class: PredictedClass,
    /// Probability of `predicted_class`, in `[0, 1]`.
    pub probability: f64,
    /// Optional headline supplied by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Discrete risk band derived from a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTier {
    /// p > 75
    Severe,
    /// 50 < p <= 75
    Elevated,
    /// 25 < p <= 50
    Moderate,
    /// p <= 25
    Low,
}

/// Why a predictor call did not produce a `Prediction`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictorError {
    /// The backend answered with a non-2xx status.
    #[error("predictor returned HTTP {status}{}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Backend { status: u16, detail: Option<String> },

    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("predictor transport error: {reason}")]
    Transport { reason: String },

    /// No response arrived within the configured timeout.
    #[error("predictor call timed out")]
    Timeout,

    /// A 2xx response whose body is not a valid prediction.
    #[error("malformed predictor response: {reason}")]
    MalformedResponse { reason: String },
}

impl PredictorError {
    /// The message shown to the user in the `Failed` phase.
    ///
    /// A backend-supplied `detail` is used verbatim. Everything else,
    /// including a 2xx body that fails to decode, gets the generic
    /// prediction message.
    pub fn user_message(&self) -> String {
        match self {
            PredictorError::Backend {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            PredictorError::Backend { .. }
            | PredictorError::Transport { .. }
            | PredictorError::Timeout
            | PredictorError::MalformedResponse { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
