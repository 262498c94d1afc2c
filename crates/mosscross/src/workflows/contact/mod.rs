//! Lead intake: contact form validation, the submission state machine, and
//! delivery through a pluggable gateway.

pub mod domain;
pub mod form;
pub mod gateway;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{ContactField, ContactSubmission, LeadId, LeadSubmission, ValidationErrors};
pub use form::{ContactForm, ContactFormError, FormPhase};
pub use gateway::{LeadGateway, LoggingLeadGateway, SubmissionError};
pub use router::contact_router;
pub use service::{ContactService, ContactServiceError, DEFAULT_SUBMIT_DELAY};
pub use validation::{is_plausible_email, validate_submission};
