use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::contact::domain::{ContactSubmission, LeadSubmission};
use crate::workflows::contact::gateway::{LeadGateway, SubmissionError};
use crate::workflows::contact::service::ContactService;

pub(super) const TEST_DELAY: Duration = Duration::from_millis(1500);

#[derive(Default)]
pub(super) struct RecordingGateway {
    leads: Mutex<Vec<LeadSubmission>>,
}

impl RecordingGateway {
    pub(super) fn leads(&self) -> Vec<LeadSubmission> {
        self.leads.lock().expect("lead mutex poisoned").clone()
    }
}

#[async_trait]
impl LeadGateway for RecordingGateway {
    async fn deliver(&self, lead: &LeadSubmission) -> Result<(), SubmissionError> {
        self.leads
            .lock()
            .expect("lead mutex poisoned")
            .push(lead.clone());
        Ok(())
    }
}

pub(super) struct OfflineGateway;

#[async_trait]
impl LeadGateway for OfflineGateway {
    async fn deliver(&self, _lead: &LeadSubmission) -> Result<(), SubmissionError> {
        Err(SubmissionError::Transport("mail relay offline".to_string()))
    }
}

/// Acknowledges each lead only after its own network round trip.
pub(super) struct SlowGateway {
    pub(super) latency: Duration,
    pub(super) inner: RecordingGateway,
}

#[async_trait]
impl LeadGateway for SlowGateway {
    async fn deliver(&self, lead: &LeadSubmission) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.latency).await;
        self.inner.deliver(lead).await
    }
}

pub(super) fn valid_submission() -> ContactSubmission {
    ContactSubmission {
        name: "Jordan Alder".to_string(),
        email: "jordan@example.com".to_string(),
        message: "Need the north face cleaned before winter".to_string(),
        notes: "Side gate is locked; call ahead".to_string(),
    }
}

pub(super) fn recording_service() -> (ContactService<RecordingGateway>, Arc<RecordingGateway>) {
    let gateway = Arc::new(RecordingGateway::default());
    let service = ContactService::new(gateway.clone(), TEST_DELAY);
    (service, gateway)
}

pub(super) fn offline_service() -> ContactService<OfflineGateway> {
    ContactService::new(Arc::new(OfflineGateway), TEST_DELAY)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
