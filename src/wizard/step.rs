//! Wizard steps and the actions that move between them.

use std::fmt;

/// Where the attendee is in the submission flow.
///
/// ```text
/// Intro → IdentityEntry → Capture → Submitting ─┬─ success → Intro
///                            ↑                  └─ failure ─┐
///                            └──────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// Landing screen.
    #[default]
    Intro,
    /// Name and contact entry.
    IdentityEntry,
    /// Photo and consent.
    Capture,
    /// Request in flight.
    Submitting,
}

impl WizardStep {
    /// Whether `action` may be taken while in this step.
    pub fn permits(self, action: WizardAction) -> bool {
        use WizardAction::*;
        match self {
            WizardStep::Intro => matches!(action, GetStarted),
            WizardStep::IdentityEntry => matches!(action, EditIdentity | ProceedToCapture),
            WizardStep::Capture => matches!(action, Capture | Retake | SetConsent | Submit),
            WizardStep::Submitting => matches!(action, CompleteSubmit),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Intro => "intro",
            WizardStep::IdentityEntry => "identity entry",
            WizardStep::Capture => "capture",
            WizardStep::Submitting => "submitting",
        };
        f.write_str(name)
    }
}

/// User or system actions driving the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    /// Leave the intro screen.
    GetStarted,
    /// Change name, email or phone.
    EditIdentity,
    /// Validate identity and move to capture.
    ProceedToCapture,
    /// Take a photo.
    Capture,
    /// Drop the photo.
    Retake,
    /// Accept or decline the terms.
    SetConsent,
    /// Send the attendee.
    Submit,
    /// Apply the submission result.
    CompleteSubmit,
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardAction::GetStarted => "get started",
            WizardAction::EditIdentity => "edit identity",
            WizardAction::ProceedToCapture => "proceed to capture",
            WizardAction::Capture => "capture a photo",
            WizardAction::Retake => "retake the photo",
            WizardAction::SetConsent => "change consent",
            WizardAction::Submit => "submit",
            WizardAction::CompleteSubmit => "complete a submission",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_step_permits_going_back_to_identity() {
        for step in [WizardStep::Capture, WizardStep::Submitting] {
            assert!(!step.permits(WizardAction::EditIdentity));
            assert!(!step.permits(WizardAction::ProceedToCapture));
        }
    }

    #[test]
    fn test_submitting_only_completes() {
        let step = WizardStep::Submitting;
        assert!(step.permits(WizardAction::CompleteSubmit));
        assert!(!step.permits(WizardAction::Submit));
        assert!(!step.permits(WizardAction::Retake));
    }

    #[test]
    fn test_default_is_intro() {
        assert_eq!(WizardStep::default(), WizardStep::Intro);
    }
}
