//! On-disk registry document and its structural checks.
//!
//! Expected TOML format:
//!
//! ```toml
//! [[conditions]]
//! id = "heart"
//! title = "Heart Disease"
//! description = "..."
//! form_title = "Heart Disease Risk Assessment"
//! negative_message = "Low risk of heart disease"
//! positive_message = "Elevated risk of heart disease"
//!
//! [[conditions.fields]]
//! name = "age"
//! label = "Age"
//! kind = "numeric-discrete"
//! min = 29
//! max = 77
//! default = 45
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use medpredict_contracts::{
    condition::ConditionProfile,
    field::{FieldKind, FieldSchema},
};

/// Top-level shape of a registry TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryDocument {
    /// Conditions in declaration order.
    #[serde(default)]
    pub conditions: Vec<ConditionProfile>,
}

impl RegistryDocument {
    /// Check every structural invariant of the document.
    ///
    /// Returns the first violation found, as a human-readable reason.
    pub fn check(&self) -> Result<(), String> {
        if self.conditions.is_empty() {
            return Err("registry declares no conditions".to_string());
        }

        let mut seen = HashSet::new();
        for profile in &self.conditions {
            if profile.id.as_str().trim().is_empty() {
                return Err("condition with an empty id".to_string());
            }
            if !seen.insert(profile.id.as_str()) {
                return Err(format!("condition '{}' is declared twice", profile.id));
            }
            check_profile(profile)?;
        }
        Ok(())
    }
}

fn check_profile(profile: &ConditionProfile) -> Result<(), String> {
    if profile.fields.is_empty() {
        return Err(format!("condition '{}' declares no fields", profile.id));
    }

    let mut names = HashSet::new();
    for field in &profile.fields {
        if field.name.trim().is_empty() {
            return Err(format!("condition '{}' has a field with an empty name", profile.id));
        }
        if !names.insert(field.name.as_str()) {
            return Err(format!(
                "condition '{}' declares field '{}' twice",
                profile.id, field.name
            ));
        }
        check_field(field).map_err(|reason| {
            format!("condition '{}', field '{}': {}", profile.id, field.name, reason)
        })?;
    }
    Ok(())
}

/// A field's default must itself be valid input, so a fresh form with no
/// edits always validates.
fn check_field(field: &FieldSchema) -> Result<(), String> {
    if !field.default.is_finite() {
        return Err("default is not a finite number".to_string());
    }

    match field.kind {
        FieldKind::EnumeratedChoice => {
            if field.choices.is_empty() {
                return Err("enumerated-choice field has no choices".to_string());
            }
            let mut values = Vec::with_capacity(field.choices.len());
            for choice in &field.choices {
                if values.contains(&choice.value) {
                    return Err(format!("choice value {} is listed twice", choice.value));
                }
                values.push(choice.value);
            }
            if field.choice_label(field.default).is_none() {
                return Err(format!("default {} is not one of the choices", field.default));
            }
        }
        FieldKind::NumericContinuous | FieldKind::NumericDiscrete => {
            let (Some(min), Some(max)) = (field.min, field.max) else {
                return Err("numeric field needs both min and max".to_string());
            };
            if min > max {
                return Err(format!("min {min} is greater than max {max}"));
            }
            if field.default < min || field.default > max {
                return Err(format!("default {} is outside [{min}, {max}]", field.default));
            }
            if field.kind == FieldKind::NumericDiscrete && field.default.fract() != 0.0 {
                return Err(format!("default {} is not a whole number", field.default));
            }
            if let Some(step) = field.step {
                if step <= 0.0 {
                    return Err(format!("step {step} must be positive"));
                }
            }
        }
    }
    Ok(())
}
