//! # medpredict-registry
//!
//! A TOML-declared, read-only registry of condition schemas.
//!
//! ## Overview
//!
//! This crate provides [`SchemaRegistry`], which maps a
//! [`ConditionId`](medpredict_contracts::condition::ConditionId) to its
//! profile and ordered field schema. Conditions are declared in a TOML
//! document; the built-in one ships cancer, heart, parkinsons and diabetes.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use medpredict_registry::SchemaRegistry;
//!
//! let registry = SchemaRegistry::builtin()?;
//! for profile in registry.conditions() {
//!     println!("{}: {} fields", profile.title, profile.fields.len());
//! }
//! ```
//!
//! Every schema is checked when the registry is built: field names are
//! unique, numeric ranges are ordered, and every default is valid input.

pub mod document;
pub mod registry;

pub use document::RegistryDocument;
pub use registry::SchemaRegistry;

// ── Tests ─────────────────────────────────────────────────────────────────────
