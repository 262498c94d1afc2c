use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::contact::{ContactFormError, ContactServiceError};
use crate::workflows::roof::{PricingTableError, RoofFieldError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Pricing(PricingTableError),
    RoofField(RoofFieldError),
    Contact(ContactServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Pricing(err) => write!(f, "pricing error: {}", err),
            AppError::RoofField(err) => write!(f, "roof configuration error: {}", err),
            AppError::Contact(err) => write!(f, "contact error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Pricing(err) => Some(err),
            AppError::RoofField(err) => Some(err),
            AppError::Contact(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::RoofField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Contact(ContactServiceError::Form(ContactFormError::Validation(_))) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Contact(ContactServiceError::Form(_)) => StatusCode::CONFLICT,
            AppError::Contact(ContactServiceError::Submission(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Pricing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<PricingTableError> for AppError {
    fn from(value: PricingTableError) -> Self {
        Self::Pricing(value)
    }
}

impl From<RoofFieldError> for AppError {
    fn from(value: RoofFieldError) -> Self {
        Self::RoofField(value)
    }
}

impl From<ContactServiceError> for AppError {
    fn from(value: ContactServiceError) -> Self {
        Self::Contact(value)
    }
}

impl From<ContactFormError> for AppError {
    fn from(value: ContactFormError) -> Self {
        Self::Contact(ContactServiceError::Form(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::contact::SubmissionError;

    #[test]
    fn field_errors_map_to_unprocessable_entity() {
        let response = AppError::from(RoofFieldError::LevelsOutOfRange(4)).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn phase_conflicts_map_to_conflict() {
        let response =
            AppError::from(ContactFormError::SubmissionInProgress).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn delivery_failures_map_to_service_unavailable() {
        let error = ContactServiceError::Submission(SubmissionError::Transport(
            "relay down".to_string(),
        ));
        let response = AppError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
