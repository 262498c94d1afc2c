use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use mosscross::workflows::contact::{LeadGateway, LeadSubmission, SubmissionError};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Lead gateway that keeps delivered leads in memory and logs each one.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadOutbox {
    leads: Arc<Mutex<Vec<LeadSubmission>>>,
}

#[async_trait]
impl LeadGateway for InMemoryLeadOutbox {
    async fn deliver(&self, lead: &LeadSubmission) -> Result<(), SubmissionError> {
        let mut guard = self
            .leads
            .lock()
            .map_err(|_| SubmissionError::Transport("lead outbox poisoned".to_string()))?;
        info!(
            lead_id = %lead.lead_id.0,
            queued = guard.len() + 1,
            "lead stored in outbox"
        );
        guard.push(lead.clone());
        Ok(())
    }
}

impl InMemoryLeadOutbox {
    pub(crate) fn leads(&self) -> Vec<LeadSubmission> {
        self.leads.lock().expect("lead outbox mutex poisoned").clone()
    }
}
