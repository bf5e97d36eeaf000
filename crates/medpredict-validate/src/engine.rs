//! Schema-driven field validator.
//!
//! `SchemaValidator` implements the `Validator` trait from `medpredict-core`.
//! Each field is checked independently, first applicable rule wins:
//!
//! 1. **Presence**: a missing or blank value fails with "Required".
//! 2. **Parse**: text must parse as a finite number.
//! 3. **Domain**: continuous values must lie in `[min, max]`; discrete values
//!    must also be whole numbers; choice values must equal a declared choice.
//!
//! The same rules back both the per-field check on edit and the whole-form
//! check on submit, so an edit can never pass a value that submit rejects.

use tracing::debug;

use medpredict_contracts::{
    field::{FieldKind, FieldNumber, FieldSchema, FieldValue},
    form::RawValues,
    validation::{FieldError, NormalizedValues, ValidationResult, REQUIRED_MESSAGE},
};
use medpredict_core::traits::Validator;

pub const NOT_A_NUMBER_MESSAGE: &str = "Must be a number";
pub const NOT_WHOLE_MESSAGE: &str = "Must be a whole number";

/// The medpredict field validator. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn parse(raw: &FieldValue) -> Result<f64, String> {
        let n = match raw {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| NOT_A_NUMBER_MESSAGE.to_string())?,
        };
        if n.is_finite() {
            Ok(n)
        } else {
            Err(NOT_A_NUMBER_MESSAGE.to_string())
        }
    }

    fn check_range(field: &FieldSchema, n: f64) -> Result<(), String> {
        if let Some(min) = field.min {
            if n < min {
                return Err(format!("Must be at least {min}"));
            }
        }
        if let Some(max) = field.max {
            if n > max {
                return Err(format!("Must be at most {max}"));
            }
        }
        Ok(())
    }

    fn whole(n: f64) -> FieldNumber {
        FieldNumber::Integer(n as i64)
    }
}

impl Validator for SchemaValidator {
    fn validate(&self, schema: &[FieldSchema], raw: &RawValues) -> ValidationResult {
        let mut accepted = NormalizedValues::new();
        let mut errors = Vec::new();

        for field in schema {
            match self.validate_field(field, raw.get(&field.name)) {
                Ok(n) => accepted.push(field.name.clone(), n),
                Err(message) => errors.push(FieldError::new(field.name.clone(), message)),
            }
        }

        if errors.is_empty() {
            ValidationResult::Accepted(accepted)
        } else {
            debug!(
                failing = errors.len(),
                first = %errors[0].field,
                "validation rejected"
            );
            ValidationResult::Rejected(errors)
        }
    }

    fn validate_field(&self, field: &FieldSchema, raw: Option<&FieldValue>) -> Result<FieldNumber, String> {
        let raw = match raw {
            Some(v) if !v.is_blank() => v,
            _ => return Err(REQUIRED_MESSAGE.to_string()),
        };
        let n = Self::parse(raw)?;

        match field.kind {
            FieldKind::NumericContinuous => {
                Self::check_range(field, n)?;
                Ok(FieldNumber::Real(n))
            }
            FieldKind::NumericDiscrete => {
                if n.fract() != 0.0 {
                    return Err(NOT_WHOLE_MESSAGE.to_string());
                }
                Self::check_range(field, n)?;
                Ok(Self::whole(n))
            }
            FieldKind::EnumeratedChoice => {
                if field.choice_label(n).is_none() {
                    return Err(field
                        .invalid_message
                        .clone()
                        .unwrap_or_else(|| format!("Please select a valid {}", field.label)));
                }
                // Choice codes are sent as integers when they are whole.
                if n.fract() == 0.0 {
                    Ok(Self::whole(n))
                } else {
                    Ok(FieldNumber::Real(n))
                }
            }
        }
    }
}
