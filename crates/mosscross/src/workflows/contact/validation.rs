use std::sync::OnceLock;

use regex::Regex;

use super::domain::{ContactField, ContactSubmission, ValidationErrors};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_REQUIRED: &str = "Message is required";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // something@something.something with no whitespace inside each part
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

pub fn is_plausible_email(raw: &str) -> bool {
    email_pattern().is_match(raw)
}

/// Check the required contact fields; `notes` is never validated.
pub fn validate_submission(submission: &ContactSubmission) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if submission.name.trim().is_empty() {
        errors.insert(ContactField::Name, NAME_REQUIRED);
    }

    if submission.email.trim().is_empty() {
        errors.insert(ContactField::Email, EMAIL_REQUIRED);
    } else if !is_plausible_email(&submission.email) {
        errors.insert(ContactField::Email, EMAIL_INVALID);
    }

    if submission.message.trim().is_empty() {
        errors.insert(ContactField::Message, MESSAGE_REQUIRED);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
