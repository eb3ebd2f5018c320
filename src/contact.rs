use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";
pub const BUSY_LABEL: &str = "Sending...";
pub const IDLE_LABEL: &str = "Send Message";

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<(), SubmissionError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|value| value.is_empty()) {
            return Err(SubmissionError::MissingFields);
        }

        if !email_pattern().is_match(&self.email) {
            return Err(SubmissionError::InvalidEmail);
        }

        Ok(())
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageTone {
    Success,
    Error,
}

impl MessageTone {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "form-message success",
            Self::Error => "form-message error",
        }
    }
}

/// Lifecycle of the simulated contact form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Rejected(SubmissionError),
    Submitting,
    Delivered,
}

impl FormStatus {
    /// Validates `submission` and moves to `Rejected` or `Submitting`. A submission
    /// already in flight is left alone.
    pub fn submit(self, submission: &ContactSubmission) -> Self {
        if self == Self::Submitting {
            return self;
        }

        match submission.validate() {
            Ok(()) => Self::Submitting,
            Err(error) => Self::Rejected(error),
        }
    }

    /// Simulated delivery finished.
    pub fn complete(self) -> Self {
        match self {
            Self::Submitting => Self::Delivered,
            other => other,
        }
    }

    /// Success message auto-hide.
    pub fn dismiss(self) -> Self {
        match self {
            Self::Delivered => Self::Idle,
            other => other,
        }
    }

    pub fn is_busy(self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn button_label(self) -> &'static str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    pub fn message(self) -> Option<(MessageTone, String)> {
        match self {
            Self::Rejected(error) => Some((MessageTone::Error, error.to_string())),
            Self::Delivered => Some((MessageTone::Success, SUCCESS_MESSAGE.to_string())),
            Self::Idle | Self::Submitting => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    /// The `name` attribute of the matching form control.
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn value(self, submission: &ContactSubmission) -> &str {
        match self {
            Self::Name => &submission.name,
            Self::Email => &submission.email,
            Self::Subject => &submission.subject,
            Self::Message => &submission.message,
        }
    }

    fn assign(self, submission: &mut ContactSubmission, value: String) {
        match self {
            Self::Name => submission.name = value,
            Self::Email => submission.email = value,
            Self::Subject => submission.subject = value,
            Self::Message => submission.message = value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactAction {
    Edit(ContactField, String),
    Submit,
    Complete,
    Dismiss,
}

/// Field values plus submission status, updated only through `apply`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub submission: ContactSubmission,
    pub status: FormStatus,
}

impl ContactForm {
    /// Whether `Submit` would start a simulated delivery right now.
    pub fn accepts_submit(&self) -> bool {
        !self.status.is_busy() && self.submission.validate().is_ok()
    }

    pub fn apply(&mut self, action: ContactAction) {
        match action {
            ContactAction::Edit(field, value) => field.assign(&mut self.submission, value),
            ContactAction::Submit => self.status = self.status.submit(&self.submission),
            ContactAction::Complete => {
                if self.status.is_busy() {
                    self.status = self.status.complete();
                    self.submission = ContactSubmission::default();
                }
            }
            ContactAction::Dismiss => self.status = self.status.dismiss(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactSubmission {
        ContactSubmission {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            subject: "S".to_string(),
            message: "M".to_string(),
        }
    }

    #[test]
    fn any_empty_field_asks_for_all_fields() {
        let mut missing_subject = filled();
        missing_subject.subject.clear();

        let status = FormStatus::Idle.submit(&missing_subject);
        assert_eq!(status, FormStatus::Rejected(SubmissionError::MissingFields));
        assert_eq!(
            status.message(),
            Some((MessageTone::Error, "Please fill in all fields.".to_string()))
        );
        assert_eq!(status.complete(), status);
    }

    #[test]
    fn empty_fields_are_reported_before_a_bad_email() {
        let submission = ContactSubmission {
            email: "nope".to_string(),
            ..ContactSubmission::default()
        };
        assert_eq!(submission.validate(), Err(SubmissionError::MissingFields));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["a@b", "a b@c.com", "@b.com", "a@@b.com", "a@b."] {
            let submission = ContactSubmission {
                email: email.to_string(),
                ..filled()
            };
            assert_eq!(
                submission.validate(),
                Err(SubmissionError::InvalidEmail),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn valid_submission_succeeds_then_returns_to_idle() {
        let submitting = FormStatus::Idle.submit(&filled());
        assert_eq!(submitting, FormStatus::Submitting);
        assert!(submitting.is_busy());
        assert_eq!(submitting.button_label(), BUSY_LABEL);
        assert_eq!(submitting.message(), None);

        let delivered = submitting.complete();
        assert_eq!(
            delivered.message(),
            Some((MessageTone::Success, SUCCESS_MESSAGE.to_string()))
        );
        assert!(!delivered.is_busy());
        assert_eq!(delivered.button_label(), IDLE_LABEL);

        assert_eq!(delivered.dismiss(), FormStatus::Idle);
    }

    #[test]
    fn resubmitting_while_in_flight_is_ignored() {
        let empty = ContactSubmission::default();
        assert_eq!(FormStatus::Submitting.submit(&empty), FormStatus::Submitting);
    }

    #[test]
    fn a_new_rejection_replaces_an_old_success() {
        let status = FormStatus::Delivered.submit(&ContactSubmission::default());
        assert_eq!(status, FormStatus::Rejected(SubmissionError::MissingFields));
        assert_eq!(status.dismiss(), status);
    }

    #[test]
    fn form_submission_ends_with_an_empty_enabled_form() {
        let mut form = ContactForm::default();
        let fields = [
            ContactField::Name,
            ContactField::Email,
            ContactField::Subject,
            ContactField::Message,
        ];
        for (field, value) in fields.into_iter().zip(["A", "a@b.com", "S", "M"]) {
            form.apply(ContactAction::Edit(field, value.to_string()));
        }
        assert_eq!(ContactField::Email.value(&form.submission), "a@b.com");
        assert!(form.accepts_submit());

        form.apply(ContactAction::Submit);
        assert!(form.status.is_busy());
        assert!(!form.accepts_submit());

        form.apply(ContactAction::Complete);
        assert_eq!(form.submission, ContactSubmission::default());
        assert!(!form.status.is_busy());
        assert_eq!(
            form.status.message().map(|(tone, _)| tone),
            Some(MessageTone::Success)
        );

        form.apply(ContactAction::Dismiss);
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn rejected_form_keeps_its_values() {
        let mut form = ContactForm::default();
        form.apply(ContactAction::Edit(ContactField::Name, "A".to_string()));
        form.apply(ContactAction::Submit);
        form.apply(ContactAction::Complete);

        assert_eq!(form.submission.name, "A");
        assert_eq!(form.status, FormStatus::Rejected(SubmissionError::MissingFields));
    }
}
