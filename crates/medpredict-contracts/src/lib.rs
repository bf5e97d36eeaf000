//! # medpredict-contracts
//!
//! Shared types, schemas, and error contracts for the medpredict assessment
//! workflow.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod condition;
pub mod error;
pub mod field;
pub mod form;
pub mod prediction;
pub mod validation;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use condition::ConditionId;
    use error::MedPredictError;
    use field::{FieldKind, FieldNumber, FieldSchema, FieldValue};
    use form::{FormId, FormState, SubmissionPhase};
    use prediction::{PredictedClass, Prediction, PredictorError};
    use validation::{FieldError, NormalizedValues, ValidationResult};

    fn numeric(name: &str, default: f64) -> FieldSchema {
        FieldSchema {
            name: name.to_string(),
            label: name.to_string(),
            kind: FieldKind::NumericContinuous,
            min: Some(0.0),
            max: Some(100.0),
            step: None,
            default,
            unit: None,
            description: None,
            choices: vec![],
            invalid_message: None,
        }
    }

    // ── FormState ────────────────────────────────────────────────────────────

    #[test]
    fn new_form_starts_idle_at_defaults() {
        let fields = vec![numeric("a", 1.0), numeric("b", 2.5)];
        let form = FormState::new(ConditionId::from("test"), &fields);

        assert_eq!(form.phase, SubmissionPhase::Idle);
        assert_eq!(form.values.get("a"), Some(&FieldValue::Number(1.0)));
        assert_eq!(form.values.get("b"), Some(&FieldValue::Number(2.5)));
        assert!(form.touched.is_empty());
        assert!(form.prediction.is_none());
        assert!(form.failure.is_none());
    }

    #[test]
    fn form_ids_are_unique() {
        let ids: std::collections::HashSet<FormId> = (0..50).map(|_| FormId::new()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn busy_phases() {
        assert!(SubmissionPhase::Validating.is_busy());
        assert!(SubmissionPhase::Submitting.is_busy());
        assert!(!SubmissionPhase::Idle.is_busy());
        assert!(!SubmissionPhase::Result.is_busy());
        assert!(!SubmissionPhase::Failed.is_busy());
    }

    // ── FieldValue ───────────────────────────────────────────────────────────

    #[test]
    fn blank_text_counts_as_missing() {
        assert!(FieldValue::text("").is_blank());
        assert!(FieldValue::text("   ").is_blank());
        assert!(!FieldValue::text("0").is_blank());
        assert!(!FieldValue::Number(0.0).is_blank());
    }

    #[test]
    fn field_value_deserializes_number_or_text() {
        let n: FieldValue = serde_json::from_value(json!(42.5)).unwrap();
        let s: FieldValue = serde_json::from_value(json!("42.5")).unwrap();
        assert_eq!(n, FieldValue::Number(42.5));
        assert_eq!(s, FieldValue::text("42.5"));
    }

    // ── NormalizedValues ─────────────────────────────────────────────────────

    #[test]
    fn normalized_values_serialize_in_insertion_order() {
        let mut values = NormalizedValues::new();
        values.push("zeta", FieldNumber::Integer(3));
        values.push("alpha", FieldNumber::Real(0.25));
        values.push("mid", FieldNumber::Integer(0));

        let body = serde_json::to_string(&values).unwrap();
        assert_eq!(body, r#"{"zeta":3,"alpha":0.25,"mid":0}"#);
    }

    #[test]
    fn validation_result_error_lookup() {
        let rejected = ValidationResult::Rejected(vec![FieldError::new("age", "Required")]);
        assert_eq!(rejected.error_for("age"), Some("Required"));
        assert_eq!(rejected.error_for("sex"), None);
        assert!(!rejected.is_accepted());
    }

    // ── Prediction wire format ───────────────────────────────────────────────

    #[test]
    fn prediction_decodes_backend_body() {
        let body = json!({ "prediction": 1, "probability": 0.82, "message": "Elevated risk of heart disease" });
        let p: Prediction = serde_json::from_value(body).unwrap();
        assert_eq!(p.predicted_class, PredictedClass::Positive);
        assert_eq!(p.probability, 0.82);
        assert_eq!(p.message.as_deref(), Some("Elevated risk of heart disease"));
    }

    #[test]
    fn prediction_message_is_optional() {
        let p: Prediction = serde_json::from_value(json!({ "prediction": 0, "probability": 0.9 })).unwrap();
        assert_eq!(p.predicted_class, PredictedClass::Negative);
        assert!(p.message.is_none());
    }

    #[test]
    fn prediction_rejects_class_outside_binary() {
        let result: Result<Prediction, _> =
            serde_json::from_value(json!({ "prediction": 2, "probability": 0.5 }));
        assert!(result.is_err());
    }

    // ── PredictorError user messages ─────────────────────────────────────────

    #[test]
    fn backend_detail_is_used_verbatim() {
        let err = PredictorError::Backend {
            status: 500,
            detail: Some("model unavailable".to_string()),
        };
        assert_eq!(err.user_message(), "model unavailable");
    }

    #[test]
    fn missing_detail_falls_back_to_generic_message() {
        let err = PredictorError::Backend { status: 502, detail: None };
        assert_eq!(err.user_message(), prediction::GENERIC_FAILURE_MESSAGE);
        assert_eq!(PredictorError::Timeout.user_message(), prediction::GENERIC_FAILURE_MESSAGE);
        assert_eq!(
            PredictorError::Transport { reason: "refused".to_string() }.user_message(),
            prediction::GENERIC_FAILURE_MESSAGE
        );
    }

    #[test]
    fn malformed_response_uses_generic_message() {
        let err = PredictorError::MalformedResponse { reason: "not json".to_string() };
        assert_eq!(err.user_message(), prediction::GENERIC_FAILURE_MESSAGE);
    }

    // ── MedPredictError display messages ─────────────────────────────────────

    #[test]
    fn error_unknown_condition_display() {
        let err = MedPredictError::UnknownCondition { condition: "lupus".to_string() };
        let msg = err.to_string();
        assert!(msg.contains("unknown condition"));
        assert!(msg.contains("lupus"));
    }

    #[test]
    fn error_predictor_call_failed_wraps_source() {
        let err: MedPredictError = PredictorError::Backend {
            status: 404,
            detail: Some("Model for lupus not found".to_string()),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("HTTP 404"));
        assert!(msg.contains("Model for lupus not found"));
    }
}
