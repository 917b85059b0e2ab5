//! Two-page configuration wizard
//!
//! Page 1 holds the numeric DE parameters, page 2 the option sets. Fields
//! are validated lazily: edits only clear stale errors, validation runs on
//! page transitions and before submission. The gateway is never called
//! with a request that failed validation.

use std::sync::Arc;

use deboard_gateway::{CreatedSimulation, RemoteGateway};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::classify::{SubmissionFailure, classify};
use crate::confirmation::ConfirmationView;
use crate::context::SimulationContext;
use crate::draft::{NumericField, SimulationDraft};
use crate::error::WizardError;
use crate::options::SetField;
use crate::validation::{ValidationErrors, build_request, check_page1, check_page2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    Parameters,
    Options,
}

impl Page {
    pub fn number(self) -> u8 {
        match self {
            Page::Parameters => 1,
            Page::Options => 2,
        }
    }
}

/// `Idle -> Submitting -> {Succeeded, Failed}`, `Failed -> Submitting` on
/// retry; `Succeeded` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Result of [`ConfigWizard::confirm_and_submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Succeeded(CreatedSimulation),
    /// The queue-full modal is open
    QueueFull,
    /// The inline banner shows `message`
    Failed { message: String },
    /// The wizard was closed while the request was in flight
    Cancelled,
}

pub struct ConfigWizard<G> {
    gateway: Arc<G>,
    context: SimulationContext,
    page: Page,
    draft: SimulationDraft,
    errors: ValidationErrors,
    phase: SubmissionPhase,
    submit_error: Option<String>,
    queue_full_open: bool,
    confirmation: Option<ConfirmationView>,
    created: Option<CreatedSimulation>,
    cancel: CancellationToken,
}

impl<G: RemoteGateway> ConfigWizard<G> {
    /// Wizard with an empty draft
    pub fn new(gateway: Arc<G>, context: SimulationContext) -> Self {
        Self::with_draft(gateway, context, SimulationDraft::new())
    }

    /// Wizard with the numeric fields prefilled (15, 0.5, 0.9, 30, 1000)
    pub fn with_defaults(gateway: Arc<G>, context: SimulationContext) -> Self {
        Self::with_draft(gateway, context, SimulationDraft::with_defaults())
    }

    pub fn with_draft(gateway: Arc<G>, context: SimulationContext, draft: SimulationDraft) -> Self {
        Self {
            gateway,
            context,
            page: Page::Parameters,
            draft,
            errors: ValidationErrors::new(),
            phase: SubmissionPhase::Idle,
            submit_error: None,
            queue_full_open: false,
            confirmation: None,
            created: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn draft(&self) -> &SimulationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    /// Simulation created by a successful submission
    pub fn created(&self) -> Option<&CreatedSimulation> {
        self.created.as_ref()
    }

    /// Update a numeric field; clears its error and the submission error
    pub fn set_field(&mut self, field: NumericField, value: impl Into<String>) {
        self.draft.set_text(field, value);
        self.errors.remove(field);
        self.submit_error = None;
    }

    /// Replace a whole option set; every value must be in the field's
    /// catalog
    pub fn set_members<I, S>(&mut self, field: SetField, values: I) -> Result<(), WizardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if let Some(bad) = values.iter().find(|v| !field.accepts(v)) {
            return Err(WizardError::UnknownOption {
                field,
                value: bad.clone(),
            });
        }
        self.draft.set_members(field, values);
        self.errors.remove(field);
        self.submit_error = None;
        Ok(())
    }

    /// Add `value` to a set if absent, remove it otherwise. Returns whether
    /// it is now selected.
    pub fn toggle_set_member(&mut self, field: SetField, value: &str) -> Result<bool, WizardError> {
        if !field.accepts(value) {
            return Err(WizardError::UnknownOption {
                field,
                value: value.to_string(),
            });
        }
        let selected = self.draft.toggle(field, value);
        self.errors.remove(field);
        self.submit_error = None;
        Ok(selected)
    }

    /// Check the numeric fields; the error set is replaced by the result
    pub fn validate_page1(&mut self) -> bool {
        self.errors = check_page1(&self.draft);
        self.errors.is_empty()
    }

    /// Check that every option set is non-empty; the error set is replaced
    /// by the result
    pub fn validate_page2(&mut self) -> bool {
        self.errors = check_page2(&self.draft);
        self.errors.is_empty()
    }

    /// Go to page 2 if page 1 validates
    pub fn advance(&mut self) -> bool {
        if self.validate_page1() {
            self.page = Page::Options;
            true
        } else {
            log::debug!("advance blocked: {} field(s) failing", self.errors.len());
            false
        }
    }

    /// Back to page 1; data and errors are kept
    pub fn retreat(&mut self) {
        self.page = Page::Parameters;
    }

    /// Open the confirmation step if page 2 validates
    pub fn request_confirmation(&mut self) -> Result<bool, WizardError> {
        self.ensure_can_submit()?;
        if self.page != Page::Options {
            return Err(WizardError::WrongPage {
                expected: Page::Options.number(),
            });
        }
        if !self.validate_page2() {
            return Ok(false);
        }
        self.submit_error = None;
        self.confirmation = Some(ConfirmationView::new(&self.draft));
        Ok(true)
    }

    pub fn confirmation(&self) -> Option<&ConfirmationView> {
        self.confirmation.as_ref()
    }

    pub fn confirmation_mut(&mut self) -> Option<&mut ConfirmationView> {
        self.confirmation.as_mut()
    }

    /// Dismiss the confirmation step without submitting
    pub fn close_confirmation(&mut self) {
        self.confirmation = None;
    }

    fn ensure_can_submit(&self) -> Result<(), WizardError> {
        if self.cancel.is_cancelled() {
            return Err(WizardError::Closed);
        }
        match self.phase {
            SubmissionPhase::Succeeded => Err(WizardError::AlreadySubmitted),
            SubmissionPhase::Submitting => Err(WizardError::SubmissionInProgress),
            SubmissionPhase::Idle | SubmissionPhase::Failed => Ok(()),
        }
    }

    /// Submit the draft.
    ///
    /// Needs the confirmation step open, or a previous failed attempt to
    /// retry. Both pages are validated again before the gateway is called.
    /// Returns early with [`SubmissionOutcome::Cancelled`] when the wizard's
    /// cancellation token fires.
    pub async fn confirm_and_submit(&mut self) -> Result<SubmissionOutcome, WizardError> {
        self.ensure_can_submit()?;
        if self.confirmation.is_none() && self.phase != SubmissionPhase::Failed {
            return Err(WizardError::ConfirmationNotOpen);
        }

        self.confirmation = None;
        self.submit_error = None;
        self.queue_full_open = false;

        let request = match build_request(&self.draft) {
            Ok(request) => request,
            Err(WizardError::InvalidDraft(errors)) => {
                self.errors = errors.clone();
                return Err(WizardError::InvalidDraft(errors));
            }
            Err(e) => return Err(e),
        };

        self.phase = SubmissionPhase::Submitting;
        log::info!(
            "submitting simulation: {} benchmark(s), {} scheme(s)",
            request.benchmarks.len(),
            request.mutation_schemes.len()
        );

        let gateway = Arc::clone(&self.gateway);
        let token = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = gateway.submit(&request) => Some(result),
        };

        let outcome = match result {
            None => {
                log::info!("submission cancelled");
                self.phase = SubmissionPhase::Idle;
                self.context.clear();
                SubmissionOutcome::Cancelled
            }
            Some(Ok(created)) => {
                log::info!("simulation {} started", created.id);
                self.phase = SubmissionPhase::Succeeded;
                self.context.start(created.clone());
                self.created = Some(created.clone());
                SubmissionOutcome::Succeeded(created)
            }
            Some(Err(error)) => {
                let failure = classify(&error);
                log::warn!("submission failed ({failure:?}): {error}");
                self.phase = SubmissionPhase::Failed;
                self.context.clear();
                match failure {
                    SubmissionFailure::QueueFull => {
                        self.queue_full_open = true;
                        SubmissionOutcome::QueueFull
                    }
                    other => {
                        let message = other
                            .banner_message()
                            .unwrap_or_default()
                            .to_string();
                        self.submit_error = Some(message.clone());
                        SubmissionOutcome::Failed { message }
                    }
                }
            }
        };
        Ok(outcome)
    }

    /// Inline submission error, visible only while no dialog is open
    pub fn banner(&self) -> Option<&str> {
        if self.confirmation.is_some() || self.queue_full_open {
            return None;
        }
        self.submit_error.as_deref()
    }

    pub fn queue_full_visible(&self) -> bool {
        self.queue_full_open
    }

    /// Close the queue-full modal
    pub fn acknowledge_queue_full(&mut self) {
        self.queue_full_open = false;
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.ensure_can_submit().is_ok()
    }

    /// Token that aborts an in-flight submission when cancelled. Cancelling
    /// closes the wizard for good.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl<G> Drop for ConfigWizard<G> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<G> std::fmt::Debug for ConfigWizard<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWizard")
            .field("page", &self.page)
            .field("phase", &self.phase)
            .field("errors", &self.errors)
            .field("submit_error", &self.submit_error)
            .field("queue_full_open", &self.queue_full_open)
            .finish_non_exhaustive()
    }
}
