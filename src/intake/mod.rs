//! Attendee identity intake.
//!
//! Collects the attendee's name and at least one way to reach them
//! (email and/or phone) before a photo is taken.

mod form;
mod validation;

pub use form::{IntakeForm, PhoneInput};
pub use validation::{validate_identity, AttendeeIdentity, ValidationError, PHONE_DIGITS};
