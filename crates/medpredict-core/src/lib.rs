//! # medpredict-core
//!
//! The per-form submission workflow for medpredict assessments.
//!
//! This crate provides:
//! - The two seam traits (`Validator`, `Predictor`)
//! - The `SubmissionController` state machine that wires them together
//! - The result renderer (`classify`, `render_result`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medpredict_core::{SubmissionController, SubmitOutcome};
//!
//! let mut form = SubmissionController::new(profile, validator, predictor);
//! form.edit("age", 52.0)?;
//! if let SubmitOutcome::Succeeded(_) = form.submit() {
//!     let view = form.result_view();
//! }
//! ```

pub mod controller;
pub mod render;
pub mod traits;

pub use controller::{
    CompletedCall, Delivery, PendingSubmission, SubmissionController, SubmissionTicket, SubmitAttempt,
    SubmitOutcome,
};
pub use render::{classify, render_result, ResultView};
