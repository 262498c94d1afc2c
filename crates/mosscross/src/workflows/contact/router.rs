use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use crate::error::AppError;

use super::domain::ContactSubmission;
use super::form::{ContactForm, ContactFormError};
use super::gateway::LeadGateway;
use super::service::{ContactService, ContactServiceError};

/// Router builder exposing the lead intake endpoint.
pub fn contact_router<G>(service: Arc<ContactService<G>>) -> Router
where
    G: LeadGateway + 'static,
{
    Router::new()
        .route("/api/v1/contact", post(submit_handler::<G>))
        .with_state(service)
}

pub(crate) async fn submit_handler<G>(
    State(service): State<Arc<ContactService<G>>>,
    axum::Json(submission): axum::Json<ContactSubmission>,
) -> Response
where
    G: LeadGateway + 'static,
{
    let mut form = ContactForm::prefilled(submission);
    match service.submit(&mut form).await {
        Ok(lead) => {
            let payload = json!({
                "status": form.phase().label(),
                "lead_id": lead.lead_id.0,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(ContactServiceError::Form(ContactFormError::Validation(errors))) => {
            let payload = json!({
                "status": form.phase().label(),
                "errors": errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ContactServiceError::Submission(error)) => {
            let payload = json!({
                "status": form.phase().label(),
                "retryable": true,
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => AppError::from(other).into_response(),
    }
}
