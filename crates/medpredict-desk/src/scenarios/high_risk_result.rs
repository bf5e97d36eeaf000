//! Scenario 3: High-Risk Result
//!
//! The backend answers a heart form with `{prediction: 1, probability: 0.82}`.
//! The result renders in the Severe tier with the "consult a healthcare
//! professional" recommendation. A second click while the first call is
//! still in flight is swallowed, so the backend sees exactly one request.

use std::sync::Arc;

use medpredict_contracts::{
    condition::ConditionId,
    error::{MedPredictError, MedPredictResult},
    prediction::PredictedClass,
};
use medpredict_core::{Delivery, SubmitAttempt};

use crate::desk::AssessmentDesk;
use crate::offline::{prediction, ScriptedPredictor};

fn backend() -> ScriptedPredictor {
    ScriptedPredictor::low_risk().respond("heart", Ok(prediction(PredictedClass::Positive, 0.82)))
}

/// Run Scenario 3: double click, one call, Severe result.
pub fn run_scenario() -> MedPredictResult<()> {
    println!("=== Scenario 3: High-Risk Result ===");
    println!();

    let predictor = Arc::new(backend());
    let desk = AssessmentDesk::builtin(predictor.clone())?;
    let mut form = desk.open(&ConditionId::from("heart"))?;
    form.edit("age", 63.0)?;
    form.edit("chestPainType", 3.0)?;

    let SubmitAttempt::Dispatched(pending) = form.begin_submit() else {
        return Err(MedPredictError::StateMachineError {
            reason: "heart form was not dispatched".to_string(),
        });
    };
    println!("  First click:            dispatched (phase {:?})", form.phase());

    let second = form.begin_submit();
    println!(
        "  Second click:           {}",
        if matches!(second, SubmitAttempt::Ignored) { "ignored" } else { "DISPATCHED" }
    );

    let delivery = form.complete(pending.run());
    println!("  Delivery:               {:?}", delivery);
    println!("  Predictor calls:        {}", predictor.call_count());

    if let Some(view) = form.result_view() {
        println!("  Headline:               {}", view.headline);
        println!("  Confidence:             {}%", view.confidence);
        println!("  Tier:                   {:?} ({}, {})", view.tier, view.text_class, view.background_class);
        println!("  Recommendation:         {}", view.recommendation);
        println!("  {}", view.disclaimer);
    }
    println!("  RESULT: one call, Severe tier (expected)");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
