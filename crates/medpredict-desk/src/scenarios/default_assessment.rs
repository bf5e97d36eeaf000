//! Scenario 1: Default Assessment
//!
//! A diabetes form submitted untouched. Every field starts at its declared
//! default, so the form validates and exactly one prediction is requested
//! with all eight features in backend order.

use std::sync::Arc;

use medpredict_contracts::{
    condition::ConditionId,
    error::{MedPredictError, MedPredictResult},
    prediction::{PredictedClass, Prediction},
};
use medpredict_core::SubmitOutcome;

use crate::desk::AssessmentDesk;
use crate::offline::ScriptedPredictor;

fn backend() -> ScriptedPredictor {
    ScriptedPredictor::low_risk().respond(
        "diabetes",
        Ok(Prediction {
            predicted_class: PredictedClass::Negative,
            probability: 0.18,
            message: Some("Low risk of diabetes".to_string()),
        }),
    )
}

/// Run Scenario 1: submit a diabetes form at its defaults.
pub fn run_scenario() -> MedPredictResult<()> {
    println!("=== Scenario 1: Default Assessment ===");
    println!();

    let predictor = Arc::new(backend());
    let desk = AssessmentDesk::builtin(predictor.clone())?;
    let mut form = desk.open(&ConditionId::from("diabetes"))?;

    println!("  Condition:              {}", form.profile().form_title);
    if let Some(state) = form.state() {
        for field in &form.profile().fields {
            if let Some(value) = state.values.get(&field.name) {
                println!("    {:<22} {}", field.label, value);
            }
        }
    }

    match form.submit() {
        SubmitOutcome::Succeeded(_) => {
            let call = predictor.calls().into_iter().next();
            let sent: Vec<String> = call
                .map(|c| c.values.names().map(str::to_string).collect())
                .unwrap_or_default();
            println!("  Validation:             ACCEPTED");
            println!("  Predictor calls:        {}", predictor.call_count());
            println!("  Feature order sent:     {}", sent.join(", "));
        }
        other => {
            return Err(MedPredictError::StateMachineError {
                reason: format!("default diabetes form did not succeed: {other:?}"),
            });
        }
    }

    if let Some(view) = form.result_view() {
        println!("  Headline:               {}", view.headline);
        println!("  Confidence:             {}%", view.confidence);
        println!("  Tier:                   {:?} ({})", view.tier, view.text_class);
        println!("  Recommendation:         {}", view.recommendation);
    }
    println!("  RESULT: Result phase reached (expected)");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use medpredict_contracts::{field::FieldNumber, form::SubmissionPhase, prediction::ResultTier};

    use super::*;

    #[test]
    fn test_defaults_submit_once_in_backend_order() {
        let predictor = Arc::new(backend());
        let desk = AssessmentDesk::builtin(predictor.clone()).unwrap();
        let mut form = desk.open(&ConditionId::from("diabetes")).unwrap();

        let outcome = form.submit();
        assert!(matches!(outcome, SubmitOutcome::Succeeded(_)), "{outcome:?}");
        assert_eq!(form.phase(), Some(SubmissionPhase::Result));
        assert_eq!(predictor.call_count(), 1);

        let call = &predictor.calls()[0];
        assert_eq!(call.condition.as_str(), "diabetes");
        let names: Vec<&str> = call.values.names().collect();
        assert_eq!(
            names,
            vec![
                "pregnancies",
                "glucose",
                "bloodPressure",
                "skinThickness",
                "insulin",
                "bmi",
                "diabetesPedigree",
                "age",
            ]
        );
        assert_eq!(call.values.get("age"), Some(FieldNumber::Integer(30)));
    }

    #[test]
    fn test_result_view_uses_backend_message() {
        let desk = AssessmentDesk::builtin(Arc::new(backend())).unwrap();
        let mut form = desk.open(&ConditionId::from("diabetes")).unwrap();
        form.submit();

        let view = form.result_view().unwrap();
        assert_eq!(view.headline, "Low risk of diabetes");
        assert_eq!(view.confidence, "18.0");
        assert_eq!(view.tier, ResultTier::Low);
    }

    #[test]
    fn test_run_scenario_succeeds() {
        run_scenario().unwrap();
    }
}
