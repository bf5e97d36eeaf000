//! # medpredict-predictor
//!
//! The HTTP client for the external prediction backend.
//!
//! [`HttpPredictor`] implements the
//! [`Predictor`](medpredict_core::traits::Predictor) trait with a blocking
//! `reqwest` client and a bounded per-request timeout. Configuration comes
//! from [`PredictorConfig`], built from TOML or the environment.
//!
//! ```rust,ignore
//! use medpredict_predictor::{HttpPredictor, PredictorConfig};
//!
//! let predictor = HttpPredictor::new(PredictorConfig::from_env()?)?;
//! let health = predictor.health()?;
//! ```

pub mod client;
pub mod config;

pub use client::{HealthStatus, HttpPredictor};
pub use config::PredictorConfig;

// ── Tests ─────────────────────────────────────────────────────────────────────
