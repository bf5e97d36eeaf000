//! An in-process stand-in for the prediction backend.
//!
//! `ScriptedPredictor` answers from a fixed table instead of the network,
//! so the walkthrough scenarios and tests run without a live service. It
//! records every call it receives.

use std::collections::HashMap;
use std::sync::Mutex;

use medpredict_contracts::{
    condition::ConditionId,
    prediction::{PredictedClass, Prediction, PredictorError},
    validation::NormalizedValues,
};
use medpredict_core::traits::Predictor;

type Scripted = Result<Prediction, PredictorError>;

/// One recorded `predict` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub condition: ConditionId,
    pub values: NormalizedValues,
}

pub struct ScriptedPredictor {
    responses: HashMap<ConditionId, Scripted>,
    fallback: Scripted,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedPredictor {
    /// Every condition gets `fallback` unless scripted otherwise.
    pub fn new(fallback: Scripted) -> Self {
        Self {
            responses: HashMap::new(),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A backend that answers "negative, 12% probability" to everything.
    pub fn low_risk() -> Self {
        Self::new(Ok(prediction(PredictedClass::Negative, 0.12)))
    }

    /// Script the answer for one condition.
    pub fn respond(mut self, condition: impl Into<ConditionId>, answer: Scripted) -> Self {
        self.responses.insert(condition.into(), answer);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Predictor for ScriptedPredictor {
    fn predict(&self, condition: &ConditionId, values: &NormalizedValues) -> Result<Prediction, PredictorError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                condition: condition.clone(),
                values: values.clone(),
            });
        }
        self.responses.get(condition).unwrap_or(&self.fallback).clone()
    }
}

/// A prediction without a backend message.
pub fn prediction(class: PredictedClass, probability: f64) -> Prediction {
    Prediction {
        predicted_class: class,
        probability,
        message: None,
    }
}
