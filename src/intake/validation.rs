//! Identity validation rules.

use serde::Serialize;
use thiserror::Error;

/// Required length of a phone number used as the only contact.
pub const PHONE_DIGITS: usize = 10;

/// Validation failures, worded as shown to the attendee.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty after trimming.
    #[error("Name is required.")]
    NameRequired,
    /// Neither a usable email nor a ten-digit phone was given.
    #[error("Please provide a valid email or a 10-digit phone number.")]
    ContactRequired,
}

/// A validated attendee identity.
///
/// Holds at least one contact field. Values are kept as entered; only
/// emptiness decides whether an optional field is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeIdentity {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Trimmed email, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Ten-digit phone number, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Validates raw form fields.
///
/// Rules are checked in order: a non-blank name, then either an email or
/// a phone number of exactly [`PHONE_DIGITS`] characters. The email format
/// is not checked.
pub fn validate_identity(
    name: &str,
    email: &str,
    phone: &str,
) -> Result<AttendeeIdentity, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }

    let phone_usable = !phone.trim().is_empty() && phone.chars().count() == PHONE_DIGITS;
    if email.trim().is_empty() && !phone_usable {
        return Err(ValidationError::ContactRequired);
    }

    Ok(AttendeeIdentity {
        name: name.to_string(),
        email: non_empty(email),
        phone_number: non_empty(phone),
    })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_all_empty_requires_name() {
        assert_eq!(
            validate_identity("", "", ""),
            Err(ValidationError::NameRequired)
        );
    }

    #[test]
    fn test_blank_name_requires_name() {
        assert_eq!(
            validate_identity("   ", "jane@x.com", ""),
            Err(ValidationError::NameRequired)
        );
    }

    #[test]
    fn test_short_phone_without_email() {
        assert_eq!(
            validate_identity("Jane Doe", "", "12345"),
            Err(ValidationError::ContactRequired)
        );
    }

    #[test]
    fn test_ten_digit_phone_accepted() {
        let identity = validate_identity("Jane Doe", "", "5551234567").unwrap();
        assert_eq!(identity.name, "Jane Doe");
        assert_eq!(identity.email, None);
        assert_eq!(identity.phone_number.as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_email_only_accepted() {
        let identity = validate_identity("Jane Doe", "jane@x.com", "").unwrap();
        assert_eq!(identity.email.as_deref(), Some("jane@x.com"));
        assert_eq!(identity.phone_number, None);
    }

    #[test]
    fn test_email_excuses_short_phone() {
        let identity = validate_identity("Jane Doe", "jane@x.com", "123").unwrap();
        assert_eq!(identity.phone_number.as_deref(), Some("123"));
    }

    #[test]
    fn test_whitespace_email_is_not_a_contact() {
        assert_eq!(
            validate_identity("Jane Doe", "   ", ""),
            Err(ValidationError::ContactRequired)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::NameRequired.to_string(), "Name is required.");
        assert_eq!(
            ValidationError::ContactRequired.to_string(),
            "Please provide a valid email or a 10-digit phone number."
        );
    }

    #[test]
    fn test_identity_serializes_camel_case() {
        let identity = validate_identity("Sam", "", "5551234567").unwrap();
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["phoneNumber"], "5551234567");
        assert!(json.get("email").is_none());
    }

    proptest! {
        #[test]
        fn prop_email_always_suffices(name in "[A-Za-z]{1,12}", email in "[a-z]{1,8}@[a-z]{1,8}\\.com", phone in "[0-9]{0,12}") {
            prop_assert!(validate_identity(&name, &email, &phone).is_ok());
        }

        #[test]
        fn prop_phone_only_needs_ten(name in "[A-Za-z]{1,12}", phone in "[0-9]{0,12}") {
            let result = validate_identity(&name, "", &phone);
            prop_assert_eq!(result.is_ok(), phone.len() == PHONE_DIGITS);
        }
    }
}
