//! Submission controller.
//!
//! Owns the wizard state for one attendee: the current step, raw identity
//! fields, the captured image and the consent flag. Every action checks
//! the current step first; an action taken from the wrong step is an
//! error and leaves the state untouched.

use super::{WizardAction, WizardStep};
use crate::api::{ApiError, AttendeeApi, AttendeeSubmission};
use crate::capture::{CapturedImage, MediaCapture};
use crate::encoding::{to_upload_payload, EncodeError};
use crate::intake::{IntakeForm, ValidationError};
use thiserror::Error;

/// Shown after a successful submission.
pub const SUCCESS_NOTICE: &str = "Attendee created successfully!";

/// Default file name for uploaded snapshots.
pub const DEFAULT_IMAGE_FILENAME: &str = "profile-image.jpg";

/// Errors surfaced to the attendee. Display strings are user-facing.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Identity failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Submit without a photo.
    #[error("Please capture a photo.")]
    PhotoRequired,

    /// Submit without accepted terms.
    #[error("You must accept the terms and conditions.")]
    ConsentRequired,

    /// A submission is already outstanding.
    #[error("A submission is already in progress.")]
    SubmissionInFlight,

    /// The action is not allowed in the current step.
    #[error("Cannot {action} during the {step} step.")]
    InvalidAction {
        step: WizardStep,
        action: WizardAction,
    },

    /// The photo could not be turned into an upload payload.
    #[error("Failed to create attendee. Please try again.")]
    Encode(#[source] EncodeError),

    /// The API rejected the submission.
    #[error("Failed to create attendee. Please try again.")]
    SubmissionFailed(#[source] ApiError),
}

/// Drives the attendee through intro, identity entry, capture and submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionController {
    step: WizardStep,
    form: IntakeForm,
    image: Option<CapturedImage>,
    consent: bool,
    image_filename: String,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_FILENAME)
    }
}

impl SubmissionController {
    /// A wizard at Intro that uploads photos as `image_filename`.
    pub fn new(image_filename: impl Into<String>) -> Self {
        Self {
            step: WizardStep::Intro,
            form: IntakeForm::new(),
            image: None,
            consent: false,
            image_filename: image_filename.into(),
        }
    }

    /// Current step.
    #[inline]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Name as entered.
    pub fn name(&self) -> &str {
        &self.form.name
    }

    /// Email as entered.
    pub fn email(&self) -> &str {
        &self.form.email
    }

    /// Phone digits as entered.
    pub fn phone(&self) -> &str {
        self.form.phone.value()
    }

    /// Captured photo, if any.
    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_ref()
    }

    /// Whether the terms were accepted.
    pub fn consent(&self) -> bool {
        self.consent
    }

    /// True while a submission is in flight; the submit control is disabled.
    pub fn is_submitting(&self) -> bool {
        self.step == WizardStep::Submitting
    }

    fn require(&self, action: WizardAction) -> Result<(), WizardError> {
        if self.step.permits(action) {
            Ok(())
        } else {
            Err(WizardError::InvalidAction {
                step: self.step,
                action,
            })
        }
    }

    /// Intro → IdentityEntry.
    pub fn get_started(&mut self) -> Result<(), WizardError> {
        self.require(WizardAction::GetStarted)?;
        self.transition(WizardStep::IdentityEntry);
        Ok(())
    }

    /// Sets the name. Identity entry only.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), WizardError> {
        self.require(WizardAction::EditIdentity)?;
        self.form.name = name.into();
        Ok(())
    }

    /// Sets the email. Identity entry only.
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), WizardError> {
        self.require(WizardAction::EditIdentity)?;
        self.form.email = email.into();
        Ok(())
    }

    /// Offers a phone value; returns whether the input mask accepted it.
    pub fn set_phone(&mut self, phone: &str) -> Result<bool, WizardError> {
        self.require(WizardAction::EditIdentity)?;
        Ok(self.form.phone.input(phone))
    }

    /// IdentityEntry → Capture, if the identity validates.
    pub fn proceed_to_capture(&mut self) -> Result<(), WizardError> {
        self.require(WizardAction::ProceedToCapture)?;
        if let Err(e) = self.form.validate() {
            tracing::debug!(error = %e, "Identity rejected");
            return Err(e.into());
        }
        self.transition(WizardStep::Capture);
        Ok(())
    }

    /// Takes a snapshot from `camera`.
    ///
    /// Returns whether an image is now held. An absent snapshot is not an
    /// error; the attendee simply tries again.
    pub fn capture<C>(&mut self, camera: &mut C) -> Result<bool, WizardError>
    where
        C: MediaCapture + ?Sized,
    {
        self.require(WizardAction::Capture)?;
        if self.image.is_some() {
            return Err(WizardError::InvalidAction {
                step: self.step,
                action: WizardAction::Capture,
            });
        }

        self.image = camera.acquire_snapshot();
        Ok(self.image.is_some())
    }

    /// Discards the held image so another can be captured.
    pub fn retake(&mut self) -> Result<(), WizardError> {
        self.require(WizardAction::Retake)?;
        self.image = None;
        Ok(())
    }

    /// Sets consent. Capture only.
    pub fn set_consent(&mut self, consent: bool) -> Result<(), WizardError> {
        self.require(WizardAction::SetConsent)?;
        self.consent = consent;
        Ok(())
    }

    /// Flips consent and returns the new value. Capture only.
    pub fn toggle_consent(&mut self) -> Result<bool, WizardError> {
        self.require(WizardAction::SetConsent)?;
        self.consent = !self.consent;
        Ok(self.consent)
    }

    /// Capture → Submitting.
    ///
    /// Checks the photo, then consent, encodes the upload and hands back
    /// the submission to send. While a submission is in flight every
    /// further call fails with [`WizardError::SubmissionInFlight`].
    pub fn begin_submit(&mut self) -> Result<AttendeeSubmission, WizardError> {
        if self.step == WizardStep::Submitting {
            tracing::debug!("Submit ignored, request already in flight");
            return Err(WizardError::SubmissionInFlight);
        }
        self.require(WizardAction::Submit)?;

        let image = self.image.as_ref().ok_or(WizardError::PhotoRequired)?;
        if !self.consent {
            return Err(WizardError::ConsentRequired);
        }

        let identity = self.form.validate()?;
        let payload = to_upload_payload(image, &self.image_filename).map_err(|e| {
            tracing::error!(error = %e, "Failed to prepare snapshot for upload");
            WizardError::Encode(e)
        })?;

        self.transition(WizardStep::Submitting);
        Ok(AttendeeSubmission {
            identity,
            image: payload,
        })
    }

    /// Applies the outcome of the request started by [`begin_submit`].
    ///
    /// Success resets the wizard to its pristine state. Failure returns to
    /// Capture with everything the attendee entered kept.
    ///
    /// [`begin_submit`]: SubmissionController::begin_submit
    pub fn complete_submit(&mut self, outcome: Result<(), ApiError>) -> Result<(), WizardError> {
        self.require(WizardAction::CompleteSubmit)?;

        match outcome {
            Ok(()) => {
                tracing::info!("Attendee submission accepted");
                self.reset();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to submit attendee");
                self.transition(WizardStep::Capture);
                Err(WizardError::SubmissionFailed(e))
            }
        }
    }

    /// Runs a whole submission against `api`.
    pub async fn submit<A: AttendeeApi>(&mut self, api: &A) -> Result<(), WizardError> {
        let submission = self.begin_submit()?;
        let outcome = api.create_attendee(submission).await;
        self.complete_submit(outcome)
    }

    /// Clears every field and returns to Intro.
    pub fn reset(&mut self) {
        let filename = std::mem::take(&mut self.image_filename);
        *self = Self::new(filename);
        tracing::debug!("Wizard reset");
    }

    fn transition(&mut self, next: WizardStep) {
        tracing::debug!(from = %self.step, to = %next, "Wizard step");
        self.step = next;
    }
}
