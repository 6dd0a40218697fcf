//! Form field state with keystroke-level masking.

use super::validation::{validate_identity, AttendeeIdentity, ValidationError, PHONE_DIGITS};

/// Phone number field that only ever holds up to ten ASCII digits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneInput {
    value: String,
}

impl PhoneInput {
    /// An empty phone field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a new field value.
    ///
    /// Input longer than the field is cut to its first ten characters; a
    /// value containing anything but digits is rejected and the previous
    /// value kept. Returns whether the value was accepted.
    pub fn input(&mut self, candidate: &str) -> bool {
        let truncated: String = candidate.chars().take(PHONE_DIGITS).collect();
        if !truncated.chars().all(|c| c.is_ascii_digit()) {
            tracing::trace!("Rejected non-digit phone input");
            return false;
        }
        self.value = truncated;
        true
    }

    /// Current digits.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Raw identity fields as the attendee types them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    /// Raw name as typed.
    pub name: String,
    /// Raw email as typed.
    pub email: String,
    /// Masked phone field.
    pub phone: PhoneInput,
}

impl IntakeForm {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs [`validate_identity`] over the current field values.
    pub fn validate(&self) -> Result<AttendeeIdentity, ValidationError> {
        validate_identity(&self.name, &self.email, self.phone.value())
    }

    /// Resets every field.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
    }
}
