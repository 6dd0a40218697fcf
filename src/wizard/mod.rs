//! Attendee submission wizard.
//!
//! A closed state machine over [`WizardStep`]. The controller validates
//! identity through [`crate::intake`], captures through
//! [`crate::capture`], encodes through [`crate::encoding`] and submits
//! through any [`crate::api::AttendeeApi`].

mod controller;
mod step;

pub use controller::{SubmissionController, WizardError, DEFAULT_IMAGE_FILENAME, SUCCESS_NOTICE};
pub use step::{WizardAction, WizardStep};
