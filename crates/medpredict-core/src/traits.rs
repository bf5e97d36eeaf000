//! Trait definitions at the workflow's two seams.
//!
//! - `Validator` — pure check of raw form input against a field schema
//! - `Predictor` — the only I/O boundary; one call per accepted submission
//!
//! The submission controller wires them together. Neither trait has any
//! knowledge of form phases or of the UI.

use medpredict_contracts::{
    condition::ConditionId,
    field::{FieldNumber, FieldSchema, FieldValue},
    form::RawValues,
    prediction::{Prediction, PredictorError},
    validation::{NormalizedValues, ValidationResult},
};

/// Decides whether raw input satisfies a schema.
///
/// Implementations must be pure: the same schema and input always produce
/// the same result, and nothing outside the return value changes.
pub trait Validator: Send + Sync {
    /// Validate every field of `schema` against `raw`.
    ///
    /// Fields are checked independently and in schema order. The result is
    /// `Accepted` only if every field passes.
    fn validate(&self, schema: &[FieldSchema], raw: &RawValues) -> ValidationResult;

    /// Validate a single field. `raw` is `None` when the field has no value.
    ///
    /// Returns the normalized number or the inline error message.
    fn validate_field(&self, field: &FieldSchema, raw: Option<&FieldValue>) -> Result<FieldNumber, String>;
}

/// The external prediction service.
///
/// Implementations perform exactly one backend request per call and never
/// retry on their own.
pub trait Predictor: Send + Sync {
    /// Request a prediction for `condition` from the accepted `values`.
    fn predict(&self, condition: &ConditionId, values: &NormalizedValues) -> Result<Prediction, PredictorError>;
}
