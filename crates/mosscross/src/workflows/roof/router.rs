use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::configurator::{QuoteSnapshot, RoofConfigurator};
use super::diagram::{render_svg, DiagramLayout};
use super::domain::{
    Accessibility, MossCoverage, RoofConfiguration, RoofLevels, RoofMaterial, RoofSize, Steepness,
};
use super::pricing::Estimator;

/// Shared, read-only pricing and layout tables for the quote endpoints.
#[derive(Debug, Clone, Default)]
pub struct RoofQuoteState {
    pub estimator: Estimator,
    pub layout: DiagramLayout,
}

impl RoofQuoteState {
    pub fn new(estimator: Estimator, layout: DiagramLayout) -> Self {
        Self { estimator, layout }
    }

    fn configurator(&self, configuration: RoofConfiguration) -> RoofConfigurator {
        RoofConfigurator::with_configuration(
            configuration,
            self.estimator.clone(),
            self.layout.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
}

/// Control domains a client needs to render the configurator.
#[derive(Debug, Clone, Serialize)]
pub struct RoofOptions {
    pub levels: Vec<OptionEntry>,
    pub total_size: Vec<OptionEntry>,
    pub steepness: Vec<OptionEntry>,
    pub moss_coverage: Vec<OptionEntry>,
    pub material: Vec<OptionEntry>,
    pub accessibility: Vec<OptionEntry>,
    pub defaults: RoofConfiguration,
}

impl RoofOptions {
    pub fn standard() -> Self {
        fn entries<T: Copy>(
            values: impl IntoIterator<Item = T>,
            key: fn(T) -> &'static str,
            label: fn(T) -> &'static str,
        ) -> Vec<OptionEntry> {
            values
                .into_iter()
                .map(|value| OptionEntry {
                    value: key(value).to_string(),
                    label: label(value).to_string(),
                })
                .collect()
        }

        Self {
            levels: RoofLevels::ordered()
                .into_iter()
                .map(|levels| OptionEntry {
                    value: levels.to_string(),
                    label: levels.label(),
                })
                .collect(),
            total_size: entries(RoofSize::ordered(), RoofSize::as_str, RoofSize::label),
            steepness: entries(Steepness::ordered(), Steepness::as_str, Steepness::label),
            moss_coverage: entries(
                MossCoverage::ordered(),
                MossCoverage::as_str,
                MossCoverage::label,
            ),
            material: entries(
                RoofMaterial::ordered(),
                RoofMaterial::as_str,
                RoofMaterial::label,
            ),
            accessibility: entries(
                Accessibility::ordered(),
                Accessibility::as_str,
                Accessibility::label,
            ),
            defaults: RoofConfiguration::default(),
        }
    }
}

/// Single field edit applied on top of a submitted configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldUpdateRequest {
    #[serde(default)]
    pub configuration: RoofConfiguration,
    pub field: String,
    pub value: String,
}

/// Router builder exposing the estimate and diagram endpoints.
pub fn roof_router(state: Arc<RoofQuoteState>) -> Router {
    Router::new()
        .route("/api/v1/roof/options", get(options_handler))
        .route("/api/v1/roof/estimate", post(estimate_handler))
        .route("/api/v1/roof/estimate/field", post(field_update_handler))
        .route("/api/v1/roof/diagram.svg", post(diagram_handler))
        .with_state(state)
}

pub(crate) async fn options_handler() -> Json<RoofOptions> {
    Json(RoofOptions::standard())
}

pub(crate) async fn estimate_handler(
    State(state): State<Arc<RoofQuoteState>>,
    Json(configuration): Json<RoofConfiguration>,
) -> Json<QuoteSnapshot> {
    Json(state.configurator(configuration).snapshot())
}

pub(crate) async fn field_update_handler(
    State(state): State<Arc<RoofQuoteState>>,
    Json(request): Json<FieldUpdateRequest>,
) -> Result<Json<QuoteSnapshot>, AppError> {
    let mut configurator = state.configurator(request.configuration);
    let snapshot = configurator.set_field_by_name(&request.field, &request.value)?;
    Ok(Json(snapshot))
}

pub(crate) async fn diagram_handler(
    State(state): State<Arc<RoofQuoteState>>,
    Json(configuration): Json<RoofConfiguration>,
) -> Response {
    let levels = state.layout.compute_levels(&configuration);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        render_svg(&levels),
    )
        .into_response()
}
