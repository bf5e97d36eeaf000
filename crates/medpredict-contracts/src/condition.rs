//! Condition identity and per-condition profile types.
//!
//! A condition is a disease category with its own input schema. Conditions
//! are registered once at startup and shared read-only by every open form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldSchema;
use crate::prediction::PredictedClass;

/// Stable identifier for a registered condition.
///
/// Used in the predictor URL path (`/predict/{condition}`) and as the lookup
/// key of the schema registry.
/// Example: ConditionId("heart")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionId(pub String);

impl ConditionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConditionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Everything the workflow knows about one registered condition.
///
/// Built once by the registry and handed out behind an `Arc`; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionProfile {
    pub id: ConditionId,
    /// Short display name (e.g. "Heart Disease").
    pub title: String,
    /// One-sentence summary shown on the condition picker.
    pub description: String,
    /// Heading of the input form (e.g. "Heart Disease Risk Assessment").
    pub form_title: String,
    /// Default result headline when the predictor omits `message` for class 0.
    pub negative_message: String,
    /// Default result headline when the predictor omits `message` for class 1.
    pub positive_message: String,
    /// Input fields in declaration order. This is also the predictor's
    /// feature order.
    pub fields: Vec<FieldSchema>,
}

impl ConditionProfile {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The default headline for a predicted class.
    pub fn default_message(&self, class: PredictedClass) -> &str {
        match class {
            PredictedClass::Negative => &self.negative_message,
            PredictedClass::Positive => &self.positive_message,
        }
    }
}
