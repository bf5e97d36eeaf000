//! # medpredict-desk
//!
//! The assessment desk wires one schema registry, one validator and one
//! predictor together and opens any number of independent forms against
//! them.
//!
//! Five walkthrough scenarios exercise the full workflow offline with a
//! scripted backend:
//!
//! 1. **Default Assessment**: an untouched diabetes form validates and is
//!    submitted once, in backend feature order.
//! 2. **Out-of-Range Input**: a heart form with `age = 10` is rejected
//!    locally with an error on `age` only.
//! 3. **High-Risk Result**: probability 0.82 renders Severe; a double click
//!    makes one call.
//! 4. **Backend Failure**: HTTP 500 `detail` is shown verbatim.
//! 5. **Stale Response**: a response arriving after close or reset is
//!    discarded.

pub mod desk;
pub mod offline;
pub mod scenarios;

pub use desk::AssessmentDesk;
pub use offline::ScriptedPredictor;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use medpredict_contracts::{
        condition::ConditionId,
        error::MedPredictError,
        form::SubmissionPhase,
    };
    use medpredict_core::SubmitOutcome;
    use medpredict_predictor::PredictorConfig;

    use crate::{AssessmentDesk, ScriptedPredictor};

    #[test]
    fn test_lists_builtin_conditions() {
        let desk = AssessmentDesk::builtin(Arc::new(ScriptedPredictor::low_risk())).unwrap();
        let titles: Vec<&str> = desk.conditions().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Cancer Detection", "Heart Disease", "Parkinson's Disease", "Diabetes Risk"]
        );
    }

    #[test]
    fn test_open_unknown_condition_fails() {
        let desk = AssessmentDesk::builtin(Arc::new(ScriptedPredictor::low_risk())).unwrap();
        let err = desk.open(&ConditionId::from("asthma")).err().unwrap();
        assert!(matches!(err, MedPredictError::UnknownCondition { .. }));
    }

    #[test]
    fn test_open_forms_start_at_defaults() {
        let desk = AssessmentDesk::builtin(Arc::new(ScriptedPredictor::low_risk())).unwrap();
        let form = desk.open(&ConditionId::from("heart")).unwrap();
        let state = form.state().unwrap();

        assert_eq!(state.phase, SubmissionPhase::Idle);
        assert_eq!(state.values.len(), 13);
        assert_eq!(state.values.get("age").map(|v| v.to_string()), Some("45".to_string()));
        assert!(state.touched.is_empty());
    }

    /// Two open forms share nothing mutable.
    #[test]
    fn test_forms_are_independent() {
        let predictor = Arc::new(ScriptedPredictor::low_risk());
        let desk = AssessmentDesk::builtin(predictor.clone()).unwrap();
        let mut heart = desk.open(&ConditionId::from("heart")).unwrap();
        let mut other_heart = desk.open(&ConditionId::from("heart")).unwrap();

        heart.edit("age", 10.0).unwrap();
        assert!(matches!(heart.submit(), SubmitOutcome::Rejected(_)));
        assert!(matches!(other_heart.submit(), SubmitOutcome::Succeeded(_)));

        assert_eq!(heart.phase(), Some(SubmissionPhase::Idle));
        assert_eq!(other_heart.phase(), Some(SubmissionPhase::Result));
        assert_ne!(heart.state().unwrap().form_id, other_heart.state().unwrap().form_id);
        assert_eq!(predictor.call_count(), 1);
    }

    #[test]
    fn test_connect_rejects_bad_config() {
        let err = AssessmentDesk::connect(PredictorConfig {
            base_url: String::new(),
            timeout_secs: 30,
        })
        .err()
        .unwrap();
        assert!(matches!(err, MedPredictError::ConfigError { .. }));
    }

    #[test]
    fn test_connect_builds_http_desk() {
        let desk = AssessmentDesk::connect(PredictorConfig::default()).unwrap();
        assert_eq!(desk.registry().len(), 4);
    }
}
