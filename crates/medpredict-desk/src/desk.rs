//! The assessment desk: one registry, one validator, one predictor, shared
//! by any number of independently open forms.

use std::sync::Arc;

use tracing::info;

use medpredict_contracts::{
    condition::{ConditionId, ConditionProfile},
    error::MedPredictResult,
};
use medpredict_core::{
    traits::{Predictor, Validator},
    SubmissionController,
};
use medpredict_predictor::{HttpPredictor, PredictorConfig};
use medpredict_registry::SchemaRegistry;
use medpredict_validate::SchemaValidator;

#[derive(Clone)]
pub struct AssessmentDesk {
    registry: Arc<SchemaRegistry>,
    validator: Arc<dyn Validator>,
    predictor: Arc<dyn Predictor>,
}

impl AssessmentDesk {
    pub fn new(registry: Arc<SchemaRegistry>, validator: Arc<dyn Validator>, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            registry,
            validator,
            predictor,
        }
    }

    /// Built-in conditions and the schema validator, with `predictor` as
    /// the backend.
    pub fn builtin(predictor: Arc<dyn Predictor>) -> MedPredictResult<Self> {
        let registry = SchemaRegistry::builtin()?;
        Ok(Self::new(Arc::new(registry), Arc::new(SchemaValidator::new()), predictor))
    }

    /// Built-in conditions against the HTTP backend described by `config`.
    pub fn connect(config: PredictorConfig) -> MedPredictResult<Self> {
        info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "connecting assessment desk");
        let predictor = HttpPredictor::new(config)?;
        Self::builtin(Arc::new(predictor))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Registered conditions in declaration order.
    pub fn conditions(&self) -> impl Iterator<Item = &ConditionProfile> + '_ {
        self.registry.conditions()
    }

    /// Open a fresh form for `condition`, initialized to its defaults.
    ///
    /// Returns `UnknownCondition` if the condition is not registered.
    pub fn open(&self, condition: &ConditionId) -> MedPredictResult<SubmissionController> {
        let profile = self.registry.profile(condition)?;
        Ok(SubmissionController::new(
            profile,
            Arc::clone(&self.validator),
            Arc::clone(&self.predictor),
        ))
    }
}

impl std::fmt::Debug for AssessmentDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentDesk")
            .field("conditions", &self.registry.condition_ids())
            .finish_non_exhaustive()
    }
}
