use serde::{Deserialize, Serialize};

use super::domain::{ContactField, ContactSubmission, ValidationErrors};
use super::gateway::SubmissionError;
use super::validation::validate_submission;

const ABANDONED_REASON: &str = "submission was abandoned before delivery was confirmed";

/// Lifecycle of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Submitted,
    /// Delivery failed; the visitor may edit and resubmit.
    Failed { reason: String },
}

impl FormPhase {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Failed { .. } => "failed",
        }
    }

    fn accepts_input(&self) -> bool {
        matches!(self, Self::Editing | Self::Failed { .. })
    }
}

/// Transitions the form refuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactFormError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("a submission is already in progress")]
    SubmissionInProgress,
    #[error("the form was already submitted; reset it to send another message")]
    AlreadySubmitted,
    #[error("no submission is in progress")]
    NotSubmitting,
}

/// Contact form state machine: `Editing -> Submitting -> Submitted`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    fields: ContactSubmission,
    errors: ValidationErrors,
    phase: FormPhase,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start in `Editing` with every field pre-filled.
    pub fn prefilled(fields: ContactSubmission) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn fields(&self) -> &ContactSubmission {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn can_submit(&self) -> bool {
        self.phase.accepts_input()
    }

    /// Edit one field, clearing any error previously shown for it.
    pub fn update_field(
        &mut self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<(), ContactFormError> {
        self.ensure_accepts_input()?;
        self.fields.set(field, value.into());
        self.errors.clear(field);
        if matches!(self.phase, FormPhase::Failed { .. }) {
            self.phase = FormPhase::Editing;
        }
        Ok(())
    }

    /// Validate and move to `Submitting`, returning the snapshot to deliver.
    ///
    /// Validation failures are recorded on the form and it stays in `Editing`.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, ContactFormError> {
        self.ensure_accepts_input()?;

        if let Err(errors) = validate_submission(&self.fields) {
            self.errors = errors.clone();
            self.phase = FormPhase::Editing;
            return Err(ContactFormError::Validation(errors));
        }

        self.errors = ValidationErrors::default();
        self.phase = FormPhase::Submitting;
        Ok(self.fields.clone())
    }

    /// Record the delivery outcome for the in-flight submission.
    pub fn complete_submit(
        &mut self,
        outcome: Result<(), SubmissionError>,
    ) -> Result<(), ContactFormError> {
        if self.phase != FormPhase::Submitting {
            return Err(ContactFormError::NotSubmitting);
        }

        match outcome {
            Ok(()) => {
                self.fields = ContactSubmission::default();
                self.phase = FormPhase::Submitted;
            }
            Err(error) => {
                self.phase = FormPhase::Failed {
                    reason: error.to_string(),
                };
            }
        }
        Ok(())
    }

    /// Give up on an in-flight submission whose future was dropped before it
    /// settled (a timeout or a cancelled task). The form lands in `Failed`
    /// with its fields kept, so it can be retried or reset.
    pub fn abandon_submit(&mut self) -> Result<(), ContactFormError> {
        if self.phase != FormPhase::Submitting {
            return Err(ContactFormError::NotSubmitting);
        }
        self.phase = FormPhase::Failed {
            reason: ABANDONED_REASON.to_string(),
        };
        Ok(())
    }

    /// Return to a blank `Editing` form ("Send Another Message").
    ///
    /// Refused while `Submitting`; call [`Self::abandon_submit`] first when
    /// the submission will never complete.
    pub fn reset(&mut self) -> Result<(), ContactFormError> {
        if self.phase == FormPhase::Submitting {
            return Err(ContactFormError::SubmissionInProgress);
        }
        *self = Self::default();
        Ok(())
    }

    fn ensure_accepts_input(&self) -> Result<(), ContactFormError> {
        match self.phase {
            FormPhase::Submitting => Err(ContactFormError::SubmissionInProgress),
            FormPhase::Submitted => Err(ContactFormError::AlreadySubmitted),
            FormPhase::Editing | FormPhase::Failed { .. } => Ok(()),
        }
    }
}
