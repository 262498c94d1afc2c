use async_trait::async_trait;
use tracing::info;

use super::domain::LeadSubmission;

/// Outbound hook receiving validated leads (e-mail, CRM, or messaging adapters).
///
/// The service awaits `deliver` while the form sits in `Submitting`.
#[async_trait]
pub trait LeadGateway: Send + Sync {
    async fn deliver(&self, lead: &LeadSubmission) -> Result<(), SubmissionError>;
}

/// Lead delivery error; always retryable from the visitor's point of view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("lead transport unavailable: {0}")]
    Transport(String),
    #[error("lead rejected: {0}")]
    Rejected(String),
}

/// Gateway that records the lead in the service log and transmits nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLeadGateway;

#[async_trait]
impl LeadGateway for LoggingLeadGateway {
    async fn deliver(&self, lead: &LeadSubmission) -> Result<(), SubmissionError> {
        info!(
            lead_id = %lead.lead_id.0,
            email = %lead.email,
            has_notes = lead.notes.is_some(),
            "contact form submitted"
        );
        Ok(())
    }
}
