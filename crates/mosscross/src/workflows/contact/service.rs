use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{LeadId, LeadSubmission};
use super::form::{ContactForm, ContactFormError};
use super::gateway::{LeadGateway, SubmissionError};

/// Artificial latency applied before a lead is handed to the gateway.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

/// Drives a contact form through submission against a lead gateway.
pub struct ContactService<G> {
    gateway: Arc<G>,
    submit_delay: Duration,
}

impl<G> ContactService<G>
where
    G: LeadGateway + 'static,
{
    pub fn new(gateway: Arc<G>, submit_delay: Duration) -> Self {
        Self {
            gateway,
            submit_delay,
        }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay
    }

    /// Validate, wait out the submit delay, deliver, and settle the form.
    ///
    /// On success the form ends `Submitted` with its fields cleared; on a
    /// gateway failure it ends `Failed` with the fields kept for a retry.
    pub async fn submit(
        &self,
        form: &mut ContactForm,
    ) -> Result<LeadSubmission, ContactServiceError> {
        let snapshot = form.begin_submit()?;
        let lead = LeadSubmission::from_submission(next_lead_id(), snapshot, Utc::now());
        info!(lead_id = %lead.lead_id.0, "contact submission started");

        tokio::time::sleep(self.submit_delay).await;

        match self.gateway.deliver(&lead).await {
            Ok(()) => {
                form.complete_submit(Ok(()))?;
                Ok(lead)
            }
            Err(error) => {
                warn!(lead_id = %lead.lead_id.0, %error, "contact submission failed");
                form.complete_submit(Err(error.clone()))?;
                Err(ContactServiceError::Submission(error))
            }
        }
    }
}

/// Error raised by the contact service.
#[derive(Debug, thiserror::Error)]
pub enum ContactServiceError {
    #[error(transparent)]
    Form(#[from] ContactFormError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
