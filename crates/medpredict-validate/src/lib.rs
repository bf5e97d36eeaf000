//! # medpredict-validate
//!
//! Input validation and response checking for medpredict.
//!
//! - [`SchemaValidator`] implements the
//!   [`Validator`](medpredict_core::traits::Validator) trait: raw form input
//!   in, normalized numbers or inline field errors out.
//! - [`PredictionDecoder`] checks a predictor response body against a JSON
//!   Schema before turning it into a `Prediction`.

pub mod engine;
pub mod response;

pub use engine::SchemaValidator;
pub use response::{prediction_schema, PredictionDecoder};

// ── Tests ─────────────────────────────────────────────────────────────────────
