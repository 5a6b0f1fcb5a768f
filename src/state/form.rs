use crate::model::{ApiError, ApiRequest};
use futures::future::BoxFuture;

/// One named form input: its current value and its current validation
/// error, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    value: String,
    error: Option<String>,
}

impl FormField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the value. Any previously reported error (client rule or
    /// server verdict) is discarded so the user retries from a clean slate.
    pub fn set_value(&mut self, next: impl Into<String>) {
        self.value = next.into();
        self.error = None;
    }

    /// Used by the controller after an API response, and by the
    /// password-agreement rule. Never called from the presentation layer.
    pub fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }
}

/// Resting states of the submission gate. Success and failure are not
/// resting states; both release the gate back to `Idle` and differ only in
/// the side effects applied while settling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
}

/// Mutual-exclusion state for submissions. At most one claim per form at
/// any time; the flag is checked and set synchronously in the same handler
/// invocation that dispatches the call.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    state: SubmissionState,
}

impl SubmissionGate {
    pub fn is_in_flight(&self) -> bool {
        self.state == SubmissionState::InFlight
    }

    /// Claim the gate. Returns false when a submission is already in
    /// flight, in which case the caller must not dispatch.
    fn try_claim(&mut self) -> bool {
        if self.is_in_flight() {
            return false;
        }
        self.state = SubmissionState::InFlight;
        true
    }

    fn release(&mut self) {
        self.state = SubmissionState::Idle;
    }
}

/// Field layout and rules for one concrete form: field access by key,
/// per-change validation, the submit-eligibility predicate, and request
/// serialization.
pub trait FormModel: Default {
    /// Field identifier, one variant per input.
    type Field: Copy + Eq + std::fmt::Debug;

    /// Whether a failure without field errors surfaces its message as a
    /// form-level banner. Only the login form opts in.
    const SURFACES_FORM_ERROR: bool = false;

    fn field(&self, field: Self::Field) -> &FormField;

    fn field_mut(&mut self, field: Self::Field) -> &mut FormField;

    /// Apply one edit. Forms with cross-field rules run them here; the
    /// default just replaces the value (clearing the field's error).
    fn apply_change(&mut self, field: Self::Field, value: String) {
        self.field_mut(field).set_value(value);
    }

    /// Synchronous predicate over the current values that must hold before
    /// a submission may dispatch.
    fn submit_eligible(&self) -> bool;

    /// Serialize the current values into the request the API expects.
    fn request(&self) -> ApiRequest;

    /// Map an API-side field name to a local field key. Unknown names are
    /// dropped by the controller.
    fn field_for_name(name: &str) -> Option<Self::Field>;
}

pub type SubmitFuture = BoxFuture<'static, Result<(), ApiError>>;

/// The injected API call. One per controller; invoked at most once per
/// gate claim.
pub trait SubmitAction: Send {
    fn call(&mut self, request: ApiRequest) -> SubmitFuture;
}

impl<F> SubmitAction for F
where
    F: FnMut(ApiRequest) -> SubmitFuture + Send,
{
    fn call(&mut self, request: ApiRequest) -> SubmitFuture {
        (self)(request)
    }
}

/// Stub used when no transport is wired in; resolves immediately with an
/// empty success so controllers stay testable offline.
pub struct NullAction;

impl SubmitAction for NullAction {
    fn call(&mut self, _request: ApiRequest) -> SubmitFuture {
        Box::pin(futures::future::ready(Ok(())))
    }
}

/// Generic form controller: owns the field record, the submission gate,
/// the form-level error line, and the injected collaborators.
///
/// `submit` hands the dispatched future back to the caller; the caller
/// drives it and feeds the outcome through `settle`. Between the two the
/// gate stays claimed, so a second `submit` is a no-op.
pub struct FormController<M: FormModel> {
    model: M,
    gate: SubmissionGate,
    form_error: Option<String>,
    action: Box<dyn SubmitAction>,
    on_success: Box<dyn FnMut() + Send>,
}

impl<M: FormModel> FormController<M> {
    pub fn new(
        action: impl SubmitAction + 'static,
        on_success: impl FnMut() + Send + 'static,
    ) -> Self {
        Self {
            model: M::default(),
            gate: SubmissionGate::default(),
            form_error: None,
            action: Box::new(action),
            on_success: Box::new(on_success),
        }
    }

    /// Controller with the stub action and a no-op success callback.
    pub fn detached() -> Self {
        Self::new(NullAction, || {})
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn value(&self, field: M::Field) -> &str {
        self.model.field(field).value()
    }

    pub fn error(&self, field: M::Field) -> Option<&str> {
        self.model.field(field).error()
    }

    /// The form-level banner (login's "alert" line). Never set for forms
    /// that do not opt in via `SURFACES_FORM_ERROR`.
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.gate.is_in_flight()
    }

    /// Advisory for the UI (button dimming). The authoritative check is
    /// re-run inside `submit`, so a stale rendered affordance cannot race
    /// the gate.
    pub fn can_submit(&self) -> bool {
        !self.gate.is_in_flight() && self.model.submit_eligible()
    }

    /// Apply one edit to a field. Any form-level banner is cleared the
    /// instant anything changes.
    pub fn set_field(&mut self, field: M::Field, value: impl Into<String>) {
        self.form_error = None;
        self.model.apply_change(field, value.into());
    }

    /// Dispatch a submission unless one is already in flight or the
    /// current values are ineligible, in which case this is a pure no-op
    /// and the action is not invoked.
    ///
    /// The returned future must be driven to completion and its outcome
    /// fed back through [`Self::settle`]. There is no cancellation: an
    /// abandoned future leaves the gate claimed.
    #[must_use]
    pub fn submit(&mut self) -> Option<SubmitFuture> {
        if !self.model.submit_eligible() || !self.gate.try_claim() {
            return None;
        }
        tracing::debug!("form submission dispatched");
        Some(self.action.call(self.model.request()))
    }

    /// Feed the outcome of a dispatched submission back into the form.
    /// Releases the gate, then either fires the success callback or maps
    /// the failure payload into field / form errors. A failure with no
    /// interpretable payload changes nothing visible.
    pub fn settle(&mut self, outcome: Result<(), ApiError>) {
        self.gate.release();
        match outcome {
            Ok(()) => {
                tracing::debug!("form submission succeeded");
                self.form_error = None;
                (self.on_success)();
            }
            Err(failure) => {
                tracing::debug!(
                    has_message = failure.message.is_some(),
                    has_field_errors = failure.validation_errors.is_some(),
                    "form submission failed"
                );
                if let Some(errors) = failure.validation_errors {
                    for (name, message) in errors {
                        if let Some(field) = M::field_for_name(&name) {
                            self.model.field_mut(field).set_error(Some(message));
                        }
                    }
                }
                if M::SURFACES_FORM_ERROR {
                    self.form_error = failure.message;
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Action that counts invocations and resolves with a scripted
    /// outcome, recording the last request it saw.
    pub(crate) struct ScriptedAction {
        pub calls: Arc<AtomicUsize>,
        pub last_request: Arc<std::sync::Mutex<Option<ApiRequest>>>,
        outcome: Result<(), ApiError>,
    }

    impl ScriptedAction {
        pub fn with(outcome: Result<(), ApiError>) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                last_request: Arc::new(std::sync::Mutex::new(None)),
                outcome,
            }
        }

        pub fn ok() -> Self {
            Self::with(Ok(()))
        }
    }

    impl SubmitAction for ScriptedAction {
        fn call(&mut self, request: ApiRequest) -> SubmitFuture {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            Box::pin(futures::future::ready(self.outcome.clone()))
        }
    }
}
