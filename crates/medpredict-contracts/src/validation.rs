//! Validation outcome types.
//!
//! A submit attempt is either accepted as a whole, producing normalized
//! values in schema order, or rejected with one message per failing field.
//! There is no partial acceptance.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::field::FieldNumber;

/// Message attached to a missing or blank field.
pub const REQUIRED_MESSAGE: &str = "Required";

/// Accepted values keyed by field name, in schema declaration order.
///
/// Serializes as a JSON object whose key order is the insertion order, which
/// is the request body sent to the predictor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedValues {
    entries: Vec<(String, FieldNumber)>,
}

impl NormalizedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value. Callers insert in schema order.
    pub fn push(&mut self, name: impl Into<String>, value: FieldNumber) {
        self.entries.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<FieldNumber> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldNumber)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl Serialize for NormalizedValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// An inline error for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The outcome of validating one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Every field passed.
    Accepted(NormalizedValues),
    /// One or more fields failed. Errors appear in schema order, one per
    /// failing field.
    Rejected(Vec<FieldError>),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }

    /// The error for `field`, if the result is a rejection that names it.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        match self {
            ValidationResult::Accepted(_) => None,
            ValidationResult::Rejected(errors) => errors
                .iter()
                .find(|e| e.field == field)
                .map(|e| e.message.as_str()),
        }
    }
}
