//! Per-form workflow state.
//!
//! One `FormState` exists per open form dialog. It is created with every
//! field at its declared default, mutated by edits and submit attempts, and
//! discarded on close. The submission controller is its only writer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::ConditionId;
use crate::field::{FieldSchema, FieldValue};
use crate::prediction::Prediction;
use crate::validation::FieldError;

/// Current raw values of a form, keyed by field name.
pub type RawValues = BTreeMap<String, FieldValue>;

/// Unique identifier for one open form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(pub uuid::Uuid);

impl FormId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle phase of a form's submission workflow.
///
/// `Idle → Validating → (Idle | Submitting) → (Result | Failed)`.
/// `Result` and `Failed` stay put until reset or close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Result,
    Failed,
}

impl SubmissionPhase {
    /// True while a submit attempt is being processed.
    pub fn is_busy(self) -> bool {
        matches!(self, SubmissionPhase::Validating | SubmissionPhase::Submitting)
    }
}

/// One recorded phase change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: SubmissionPhase,
    pub to: SubmissionPhase,
    pub at: DateTime<Utc>,
}

/// The complete state of one open form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormState {
    pub form_id: FormId,
    pub condition: ConditionId,
    pub values: RawValues,
    /// Names of fields the user has edited since the form was opened or reset.
    pub touched: BTreeSet<String>,
    pub phase: SubmissionPhase,
    /// Inline errors from the latest edit or rejected submit, in schema order.
    pub field_errors: Vec<FieldError>,
    /// Present only in the `Result` phase.
    pub prediction: Option<Prediction>,
    /// User-facing failure message. Present only in the `Failed` phase.
    pub failure: Option<String>,
    /// Every phase change since open or the latest reset.
    pub transitions: Vec<PhaseTransition>,
    pub opened_at: DateTime<Utc>,
}

impl FormState {
    /// A fresh form with every field at its default value.
    pub fn new(condition: ConditionId, fields: &[FieldSchema]) -> Self {
        Self {
            form_id: FormId::new(),
            condition,
            values: default_values(fields),
            touched: BTreeSet::new(),
            phase: SubmissionPhase::Idle,
            field_errors: Vec::new(),
            prediction: None,
            failure: None,
            transitions: Vec::new(),
            opened_at: Utc::now(),
        }
    }

    /// The inline error currently attached to `field`.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Raw values for a fresh form: each field at its declared default.
pub fn default_values(fields: &[FieldSchema]) -> RawValues {
    fields
        .iter()
        .map(|f| (f.name.clone(), f.default_value()))
        .collect()
}
