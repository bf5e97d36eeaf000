//! Scenario 4: Backend Failure
//!
//! The backend answers HTTP 500 with `{"detail": "model unavailable"}`. The
//! form moves to `Failed` and shows the backend's detail verbatim. Failures
//! without a detail fall back to the generic message. Nothing is retried.

use std::sync::Arc;

use medpredict_contracts::{
    condition::ConditionId,
    error::{MedPredictError, MedPredictResult},
    prediction::PredictorError,
};
use medpredict_core::SubmitOutcome;

use crate::desk::AssessmentDesk;
use crate::offline::ScriptedPredictor;

fn backend() -> ScriptedPredictor {
    ScriptedPredictor::low_risk()
        .respond(
            "parkinsons",
            Err(PredictorError::Backend {
                status: 500,
                detail: Some("model unavailable".to_string()),
            }),
        )
        .respond("cancer", Err(PredictorError::Timeout))
}

/// Run Scenario 4: two failing conditions, one with a detail and one without.
pub fn run_scenario() -> MedPredictResult<()> {
    println!("=== Scenario 4: Backend Failure ===");
    println!();

    let predictor = Arc::new(backend());
    let desk = AssessmentDesk::builtin(predictor.clone())?;

    for (condition, note) in [
        ("parkinsons", "HTTP 500 with detail"),
        ("cancer", "request timed out"),
    ] {
        let mut form = desk.open(&ConditionId::from(condition))?;
        println!("  Condition:              {} ({})", form.profile().title, note);

        match form.submit() {
            SubmitOutcome::Failed(message) => {
                println!("  Phase:                  {:?}", form.phase());
                println!("  User-facing message:    {}", message);
            }
            other => {
                return Err(MedPredictError::StateMachineError {
                    reason: format!("{condition} form did not fail: {other:?}"),
                });
            }
        }
    }

    println!("  Predictor calls:        {} (no retries)", predictor.call_count());
    println!("  RESULT: Failed with user-facing messages (expected)");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
