//! Scenario 5: Stale Response
//!
//! The user submits, then closes (or resets) the form before the backend
//! answers. When the answer arrives it is discarded: no form state changes
//! and nothing is rendered.

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
    ScriptedPredictor::new(Ok(prediction(PredictedClass::Positive, 0.91)))
}

/// Run Scenario 5: close while submitting, then deliver.
pub fn run_scenario() -> MedPredictResult<()> {
    println!("=== Scenario 5: Stale Response ===");
    println!();

    let desk = AssessmentDesk::builtin(Arc::new(backend()))?;

    // ── Close before the response ─────────────────────────────────────────────

    {
        let mut form = desk.open(&ConditionId::from("cancer"))?;
        let SubmitAttempt::Dispatched(pending) = form.begin_submit() else {
            return Err(MedPredictError::StateMachineError {
                reason: "cancer form was not dispatched".to_string(),
            });
        };
        println!("  Submitted:              ticket {:?}", pending.ticket());
        println!(
            "  Payload:                {} with {} values",
            pending.condition(),
            pending.values().len()
        );

        form.close();
        println!("  Closed before response: form open = {}", form.is_open());

        let delivery = form.complete(pending.run());
        println!("  Late response:          {:?}", delivery);
        println!("  Rendered:               {}", form.result_view().is_some());
    }

    // ── Reset before the response ─────────────────────────────────────────────

    {
        let mut form = desk.open(&ConditionId::from("cancer"))?;
        let SubmitAttempt::Dispatched(pending) = form.begin_submit() else {
            return Err(MedPredictError::StateMachineError {
                reason: "cancer form was not dispatched".to_string(),
            });
        };
        form.reset()?;

        let delivery = form.complete(pending.run());
        println!("  Reset, then response:   {:?} (phase {:?})", delivery, form.phase());
    }

    println!("  RESULT: stale responses discarded (expected)");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
