//! Declarative input field types.
//!
//! A `FieldSchema` describes one input of a condition's form: its numeric
//! domain, default, unit and widget kind. Raw user input arrives as a
//! `FieldValue`; accepted input is normalized to a `FieldNumber`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Widget and domain kind of an input field.
///
/// Expressed in TOML as kebab-case:
/// ```toml
/// kind = "numeric-continuous"
/// kind = "numeric-discrete"
/// kind = "enumerated-choice"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Any real number within `[min, max]`.
    NumericContinuous,
    /// An integer within `[min, max]`.
    NumericDiscrete,
    /// Exactly one of the declared `choices` values.
    EnumeratedChoice,
}

/// One selectable option of an enumerated-choice field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub value: f64,
    pub label: String,
}

/// Description of a single form input.
///
/// Invariant (checked when the registry is built): enumerated-choice fields
/// have a non-empty `choices` list containing `default`; numeric fields have
/// `min <= default <= max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Unique within its condition. Also the key sent to the predictor.
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Input granularity hint for the UI. Not enforced by validation.
    #[serde(default)]
    pub step: Option<f64>,
    pub default: f64,
    #[serde(default)]
    pub unit: Option<String>,
    /// Optional help text shown beside the input.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Message used when an enumerated-choice value is not one of `choices`.
    #[serde(default)]
    pub invalid_message: Option<String>,
}

impl FieldSchema {
    /// The raw value a fresh form starts with.
    pub fn default_value(&self) -> FieldValue {
        FieldValue::Number(self.default)
    }

    /// Label of the choice whose value equals `value`, if any.
    pub fn choice_label(&self, value: f64) -> Option<&str> {
        self.choices
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.label.as_str())
    }
}

/// A raw, unvalidated input value as entered by the user.
///
/// Text comes from free-form inputs, numbers from sliders and selects.
/// An empty or whitespace-only `Text` counts as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// True when the value carries no input at all.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Number(_) => false,
            FieldValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// A validated value coerced to its field's declared numeric type.
///
/// Serializes as a bare JSON number: integers without a fractional part,
/// reals as floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldNumber {
    Integer(i64),
    Real(f64),
}

impl fmt::Display for FieldNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldNumber::Integer(i) => write!(f, "{i}"),
            FieldNumber::Real(r) => write!(f, "{r}"),
        }
    }
}
