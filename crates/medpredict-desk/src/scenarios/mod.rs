//! Walkthrough scenarios.
//!
//! Each scenario wires the real registry and validator to a
//! `ScriptedPredictor` and drives one form through a distinct path of the
//! submission workflow, printing what happens at each step.

pub mod backend_failure;
pub mod default_assessment;
pub mod high_risk_result;
pub mod out_of_range;
pub mod stale_response;
