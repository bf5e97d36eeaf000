//! The read-only schema registry.
//!
//! `SchemaRegistry` is built once from a TOML document, checked, and then
//! shared behind an `Arc` by every open form. Lookups never mutate it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use medpredict_contracts::{
    condition::{ConditionId, ConditionProfile},
    error::{MedPredictError, MedPredictResult},
    field::FieldSchema,
};

use crate::document::RegistryDocument;

/// The condition schemas shipped with the crate.
const BUILTIN_CONDITIONS: &str = include_str!("../schemas/conditions.toml");

/// Mapping from condition id to its profile and field schema.
///
/// ```rust,ignore
/// use medpredict_registry::SchemaRegistry;
///
/// let registry = SchemaRegistry::builtin()?;
/// let fields = registry.get_schema(&"heart".into())?;
/// ```
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    /// Declaration order, used for listing.
    order: Vec<ConditionId>,
    profiles: HashMap<ConditionId, Arc<ConditionProfile>>,
}

impl SchemaRegistry {
    /// The four built-in conditions: cancer, heart, parkinsons, diabetes.
    pub fn builtin() -> MedPredictResult<Self> {
        Self::from_toml_str(BUILTIN_CONDITIONS)
    }

    /// Parse `s` as a registry TOML document.
    ///
    /// Returns `ConfigError` if the TOML is malformed and `InvalidSchema` if
    /// it parses but breaks a schema invariant.
    pub fn from_toml_str(s: &str) -> MedPredictResult<Self> {
        let document: RegistryDocument = toml::from_str(s).map_err(|e| MedPredictError::ConfigError {
            reason: format!("failed to parse registry TOML: {}", e),
        })?;
        Self::from_document(document)
    }

    /// Read the file at `path` and parse it as a registry document.
    pub fn from_file(path: &Path) -> MedPredictResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MedPredictError::ConfigError {
            reason: format!("failed to read registry file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Build from an already-parsed document.
    pub fn from_document(document: RegistryDocument) -> MedPredictResult<Self> {
        document
            .check()
            .map_err(|reason| MedPredictError::InvalidSchema { reason })?;

        let mut order = Vec::with_capacity(document.conditions.len());
        let mut profiles = HashMap::with_capacity(document.conditions.len());
        for profile in document.conditions {
            debug!(condition = %profile.id, fields = profile.fields.len(), "registered condition");
            order.push(profile.id.clone());
            profiles.insert(profile.id.clone(), Arc::new(profile));
        }

        info!(conditions = order.len(), "schema registry loaded");
        Ok(Self { order, profiles })
    }

    /// The ordered field schema of `condition`.
    pub fn get_schema(&self, condition: &ConditionId) -> MedPredictResult<&[FieldSchema]> {
        self.lookup(condition).map(|p| p.fields.as_slice())
    }

    /// The shared profile of `condition`.
    pub fn profile(&self, condition: &ConditionId) -> MedPredictResult<Arc<ConditionProfile>> {
        self.lookup(condition).map(Arc::clone)
    }

    /// Registered condition ids in declaration order.
    pub fn condition_ids(&self) -> &[ConditionId] {
        &self.order
    }

    /// Registered profiles in declaration order.
    pub fn conditions(&self) -> impl Iterator<Item = &ConditionProfile> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.profiles.get(id).map(|p| p.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn lookup(&self, condition: &ConditionId) -> MedPredictResult<&Arc<ConditionProfile>> {
        self.profiles
            .get(condition)
            .ok_or_else(|| MedPredictError::UnknownCondition {
                condition: condition.to_string(),
            })
    }
}
