//! Workspace error types.
//!
//! Fallible operations across the medpredict crates return
//! `MedPredictResult<T>`. Field validation failures are not errors: they are
//! reported as `ValidationResult::Rejected` data.

use thiserror::Error;

use crate::prediction::PredictorError;

#[derive(Debug, Error)]
pub enum MedPredictError {
    /// A schema was requested for a condition the registry does not hold.
    #[error("unknown condition '{condition}'")]
    UnknownCondition { condition: String },

    /// An edit named a field the condition's schema does not declare.
    #[error("condition '{condition}' has no field '{field}'")]
    UnknownField { condition: String, field: String },

    /// A schema document violates a FieldSchema invariant.
    #[error("invalid field schema: {reason}")]
    InvalidSchema { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An operation was attempted in a phase that does not allow it.
    #[error("state machine error: {reason}")]
    StateMachineError { reason: String },

    /// A direct predictor call outside the submission workflow failed.
    #[error("predictor call failed: {0}")]
    PredictorCallFailed(#[from] PredictorError),
}

pub type MedPredictResult<T> = Result<T, MedPredictError>;
