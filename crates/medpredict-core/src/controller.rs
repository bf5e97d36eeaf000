//! The submission controller: the per-form workflow state machine.
//!
//! The controller enforces the submission model:
//!
//!   Idle → Validating → (Rejected → Idle) | (Accepted → Submitting) → Result | Failed
//!
//! Two guarantees are structural. A predictor call is only reachable from
//! `Submitting`, and `begin_submit` refuses to leave `Idle` while a call is
//! outstanding, so each form has at most one call in flight. Every dispatched
//! call carries a ticket, and `complete` applies the response only if that
//! ticket still names the live form; a response arriving after reset or
//! close is dropped without touching any state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use medpredict_contracts::{
    condition::{ConditionId, ConditionProfile},
    error::{MedPredictError, MedPredictResult},
    field::FieldValue,
    form::{FormId, FormState, PhaseTransition, SubmissionPhase},
    prediction::{Prediction, PredictorError},
    validation::{FieldError, NormalizedValues, ValidationResult},
};

use crate::render::{render_result, ResultView};
use crate::traits::{Predictor, Validator};

/// Identifies one dispatched predictor call.
///
/// A ticket is only honoured while its form is live and no reset, close or
/// newer dispatch has happened since it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    form_id: FormId,
    generation: u64,
}

impl SubmissionTicket {
    pub fn form_id(&self) -> FormId {
        self.form_id
    }
}

/// An accepted submission whose predictor call has not run yet.
///
/// The host may run it on any thread and hand the `CompletedCall` back to
/// the controller later.
pub struct PendingSubmission {
    ticket: SubmissionTicket,
    condition: ConditionId,
    values: NormalizedValues,
    predictor: Arc<dyn Predictor>,
}

impl PendingSubmission {
    pub fn ticket(&self) -> SubmissionTicket {
        self.ticket
    }

    pub fn condition(&self) -> &ConditionId {
        &self.condition
    }

    pub fn values(&self) -> &NormalizedValues {
        &self.values
    }

    /// Perform the predictor call. Consumes the submission, so each accepted
    /// submit produces exactly one call.
    pub fn run(self) -> CompletedCall {
        let outcome = self.predictor.predict(&self.condition, &self.values);
        CompletedCall {
            ticket: self.ticket,
            outcome,
        }
    }
}

impl std::fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSubmission")
            .field("ticket", &self.ticket)
            .field("condition", &self.condition)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// The result of a predictor call, ready to be delivered to its controller.
#[derive(Debug)]
pub struct CompletedCall {
    pub ticket: SubmissionTicket,
    pub outcome: Result<Prediction, PredictorError>,
}

/// What `begin_submit` did with a submit action.
#[derive(Debug)]
pub enum SubmitAttempt {
    /// The form is closed or not `Idle`; nothing changed.
    Ignored,
    /// Validation failed. The form is back in `Idle` with these errors attached.
    Rejected(Vec<FieldError>),
    /// Validation passed. The form is `Submitting` and the call must be run.
    Dispatched(PendingSubmission),
}

/// What the blocking `submit` ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Ignored,
    Rejected(Vec<FieldError>),
    Succeeded(Prediction),
    /// The predictor call failed; carries the user-facing message.
    Failed(String),
}

/// Whether a completed call was applied to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The form moved to this phase (`Result` or `Failed`).
    Applied(SubmissionPhase),
    /// The ticket no longer names the live form. Nothing changed.
    StaleDiscarded,
}

/// Drives one open form from first edit to result.
///
/// Construct one controller per open form. Controllers share the immutable
/// condition profile and the validator/predictor behind `Arc`s and hold no
/// other shared state, so any number can be open at once.
pub struct SubmissionController {
    profile: Arc<ConditionProfile>,
    validator: Arc<dyn Validator>,
    predictor: Arc<dyn Predictor>,
    state: Option<FormState>,
    generation: u64,
}

impl SubmissionController {
    /// Open a fresh form for `profile`'s condition.
    pub fn new(
        profile: Arc<ConditionProfile>,
        validator: Arc<dyn Validator>,
        predictor: Arc<dyn Predictor>,
    ) -> Self {
        let state = FormState::new(profile.id.clone(), &profile.fields);
        debug!(
            form_id = %state.form_id,
            condition = %profile.id,
            fields = profile.fields.len(),
            "form opened"
        );
        Self {
            profile,
            validator,
            predictor,
            state: Some(state),
            generation: 0,
        }
    }

    pub fn profile(&self) -> &ConditionProfile {
        &self.profile
    }

    /// The live form state, or `None` once closed.
    pub fn state(&self) -> Option<&FormState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> Option<SubmissionPhase> {
        self.state.as_ref().map(|s| s.phase)
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Set `field` to `value`, mark it touched, and re-check that field.
    ///
    /// Only allowed in `Idle`. The field's inline error is replaced by the
    /// outcome of the single-field check.
    pub fn edit(&mut self, field: &str, value: impl Into<FieldValue>) -> MedPredictResult<()> {
        let state = self.state.as_mut().ok_or_else(|| MedPredictError::StateMachineError {
            reason: "cannot edit a closed form".to_string(),
        })?;

        if state.phase != SubmissionPhase::Idle {
            return Err(MedPredictError::StateMachineError {
                reason: format!("cannot edit while form is {:?}", state.phase),
            });
        }

        let schema = self
            .profile
            .field(field)
            .ok_or_else(|| MedPredictError::UnknownField {
                condition: self.profile.id.to_string(),
                field: field.to_string(),
            })?;

        let value = value.into();
        let check = self.validator.validate_field(schema, Some(&value));
        state.values.insert(field.to_string(), value);
        state.touched.insert(field.to_string());

        state.field_errors.retain(|e| e.field != field);
        if let Err(message) = check {
            state.field_errors.push(FieldError::new(field, message));
            let order = |name: &str| self.profile.fields.iter().position(|f| f.name == name);
            state.field_errors.sort_by_key(|e| order(&e.field));
        }

        debug!(form_id = %state.form_id, field, "field edited");
        Ok(())
    }

    /// Handle one submit action without running the predictor call.
    ///
    /// Returns `Ignored` when the form is closed, busy with an earlier
    /// submission, or showing a result or failure. The busy check is what
    /// swallows double-clicks while a call is in flight.
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        let Some(state) = self.state.as_mut() else {
            debug!(condition = %self.profile.id, "submit on closed form ignored");
            return SubmitAttempt::Ignored;
        };

        if state.phase.is_busy() {
            debug!(
                form_id = %state.form_id,
                phase = ?state.phase,
                "submit ignored while a call is in flight"
            );
            return SubmitAttempt::Ignored;
        }
        if state.phase != SubmissionPhase::Idle {
            debug!(
                form_id = %state.form_id,
                phase = ?state.phase,
                "submit ignored until the form is reset"
            );
            return SubmitAttempt::Ignored;
        }

        advance(state, SubmissionPhase::Validating);

        match self.validator.validate(&self.profile.fields, &state.values) {
            ValidationResult::Rejected(errors) => {
                debug!(
                    form_id = %state.form_id,
                    failing_fields = errors.len(),
                    "submission rejected by validation"
                );
                state.field_errors = errors.clone();
                advance(state, SubmissionPhase::Idle);
                SubmitAttempt::Rejected(errors)
            }

            ValidationResult::Accepted(values) => {
                state.field_errors.clear();
                advance(state, SubmissionPhase::Submitting);
                self.generation += 1;

                let ticket = SubmissionTicket {
                    form_id: state.form_id,
                    generation: self.generation,
                };
                info!(
                    form_id = %state.form_id,
                    condition = %state.condition,
                    generation = self.generation,
                    "submission dispatched to predictor"
                );

                SubmitAttempt::Dispatched(PendingSubmission {
                    ticket,
                    condition: state.condition.clone(),
                    values,
                    predictor: Arc::clone(&self.predictor),
                })
            }
        }
    }

    /// Deliver a completed predictor call.
    ///
    /// Applied only if the ticket names the live form, matches the latest
    /// dispatch, and the form is still `Submitting`.
    pub fn complete(&mut self, call: CompletedCall) -> Delivery {
        let generation = self.generation;
        let Some(state) = self.state.as_mut() else {
            debug!(form_id = %call.ticket.form_id, "response for closed form discarded");
            return Delivery::StaleDiscarded;
        };

        if call.ticket.form_id != state.form_id
            || call.ticket.generation != generation
            || state.phase != SubmissionPhase::Submitting
        {
            debug!(
                form_id = %call.ticket.form_id,
                live_form_id = %state.form_id,
                "stale response discarded"
            );
            return Delivery::StaleDiscarded;
        }

        match call.outcome {
            Ok(prediction) => {
                info!(
                    form_id = %state.form_id,
                    condition = %state.condition,
                    probability = prediction.probability,
                    "prediction received"
                );
                state.prediction = Some(prediction);
                advance(state, SubmissionPhase::Result);
                Delivery::Applied(SubmissionPhase::Result)
            }

            Err(error) => {
                warn!(
                    form_id = %state.form_id,
                    condition = %state.condition,
                    error = %error,
                    "predictor call failed"
                );
                state.failure = Some(error.user_message());
                advance(state, SubmissionPhase::Failed);
                Delivery::Applied(SubmissionPhase::Failed)
            }
        }
    }

    /// Submit and wait for the predictor in one step.
    pub fn submit(&mut self) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            SubmitAttempt::Ignored => return SubmitOutcome::Ignored,
            SubmitAttempt::Rejected(errors) => return SubmitOutcome::Rejected(errors),
            SubmitAttempt::Dispatched(pending) => pending,
        };

        if self.complete(pending.run()) == Delivery::StaleDiscarded {
            return SubmitOutcome::Ignored;
        }

        match self.state.as_ref() {
            Some(FormState {
                prediction: Some(prediction),
                ..
            }) => SubmitOutcome::Succeeded(prediction.clone()),
            Some(FormState {
                failure: Some(message),
                ..
            }) => SubmitOutcome::Failed(message.clone()),
            _ => SubmitOutcome::Ignored,
        }
    }

    /// Discard the current form and start over at defaults.
    ///
    /// Any call still in flight becomes stale.
    pub fn reset(&mut self) -> MedPredictResult<()> {
        let old = self.state.as_ref().ok_or_else(|| MedPredictError::StateMachineError {
            reason: "cannot reset a closed form".to_string(),
        })?;
        let old_id = old.form_id;

        self.generation += 1;
        let fresh = FormState::new(self.profile.id.clone(), &self.profile.fields);
        debug!(old_form_id = %old_id, form_id = %fresh.form_id, "form reset");
        self.state = Some(fresh);
        Ok(())
    }

    /// Close the form. The state is dropped and any call in flight becomes
    /// stale. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(state) = self.state.take() {
            self.generation += 1;
            debug!(form_id = %state.form_id, phase = ?state.phase, "form closed");
        }
    }

    /// The result panel for the current prediction, if in `Result`.
    pub fn result_view(&self) -> Option<ResultView> {
        self.state
            .as_ref()
            .and_then(|s| s.prediction.as_ref())
            .map(|p| render_result(&self.profile, p))
    }
}

fn advance(state: &mut FormState, to: SubmissionPhase) {
    debug!(form_id = %state.form_id, from = ?state.phase, to = ?to, "phase transition");
    state.transitions.push(PhaseTransition {
        from: state.phase,
        to,
        at: Utc::now(),
    });
    state.phase = to;
}

// ── Tests ────────────────────────────────────────────────────────────────────
