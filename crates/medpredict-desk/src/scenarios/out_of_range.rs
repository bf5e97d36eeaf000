//! Scenario 2: Out-of-Range Input
//!
//! A heart form with `age = 10`, below the declared minimum of 29. The
//! submission is rejected locally: only `age` carries an error, the form
//! returns to `Idle`, and the predictor is never called. Correcting the
//! value and submitting again succeeds.

use std::sync::Arc;

use medpredict_contracts::{
    condition::ConditionId,
    error::{MedPredictError, MedPredictResult},
};
use medpredict_core::SubmitOutcome;

use crate::desk::AssessmentDesk;
use crate::offline::ScriptedPredictor;

/// Run Scenario 2: reject, correct, resubmit.
pub fn run_scenario() -> MedPredictResult<()> {
    println!("=== Scenario 2: Out-of-Range Input ===");
    println!();

    let predictor = Arc::new(ScriptedPredictor::low_risk());
    let desk = AssessmentDesk::builtin(predictor.clone())?;
    let mut form = desk.open(&ConditionId::from("heart"))?;

    println!("  Edit:                   age = 10 (allowed range 29-77)");
    form.edit("age", 10.0)?;

    match form.submit() {
        SubmitOutcome::Rejected(errors) => {
            println!("  Validation:             REJECTED");
            for error in &errors {
                println!("    {:<22} {}", error.field, error.message);
            }
            println!("  Phase after rejection:  {:?}", form.phase());
            println!("  Predictor calls:        {}", predictor.call_count());
        }
        other => {
            return Err(MedPredictError::StateMachineError {
                reason: format!("out-of-range heart form was not rejected: {other:?}"),
            });
        }
    }

    println!("  Edit:                   age = 52");
    form.edit("age", 52.0)?;
    let outcome = form.submit();
    println!("  Resubmit:               {}", if matches!(outcome, SubmitOutcome::Succeeded(_)) { "ACCEPTED" } else { "FAILED" });
    println!("  Predictor calls:        {}", predictor.call_count());
    println!("  RESULT: rejected without a network call, then accepted (expected)");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use medpredict_contracts::form::SubmissionPhase;

    use super::*;

    #[test]
    fn test_age_below_minimum_rejects_only_age() {
        let predictor = Arc::new(ScriptedPredictor::low_risk());
        let desk = AssessmentDesk::builtin(predictor.clone()).unwrap();
        let mut form = desk.open(&ConditionId::from("heart")).unwrap();

        form.edit("age", 10.0).unwrap();
        let SubmitOutcome::Rejected(errors) = form.submit() else {
            panic!("expected rejection");
        };

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "age");
        assert_eq!(form.phase(), Some(SubmissionPhase::Idle));
        assert_eq!(predictor.call_count(), 0);

        let state = form.state().unwrap();
        assert_eq!(state.error_for("age"), Some("Must be at least 29"));
        assert_eq!(state.error_for("cholesterol"), None);
    }

    #[test]
    fn test_edit_flags_error_before_submit() {
        let desk = AssessmentDesk::builtin(Arc::new(ScriptedPredictor::low_risk())).unwrap();
        let mut form = desk.open(&ConditionId::from("heart")).unwrap();

        form.edit("sex", 5.0).unwrap();
        assert_eq!(form.state().unwrap().error_for("sex"), Some("Please select gender"));

        form.edit("sex", 1.0).unwrap();
        assert_eq!(form.state().unwrap().error_for("sex"), None);
    }

    #[test]
    fn test_corrected_form_submits() {
        let predictor = Arc::new(ScriptedPredictor::low_risk());
        let desk = AssessmentDesk::builtin(predictor.clone()).unwrap();
        let mut form = desk.open(&ConditionId::from("heart")).unwrap();

        form.edit("age", 10.0).unwrap();
        form.submit();
        form.edit("age", 52.0).unwrap();

        assert!(matches!(form.submit(), SubmitOutcome::Succeeded(_)));
        assert_eq!(predictor.call_count(), 1);
    }

    #[test]
    fn test_run_scenario_succeeds() {
        run_scenario().unwrap();
    }
}
