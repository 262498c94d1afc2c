use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use mosscross::workflows::contact::{contact_router, ContactService, LeadGateway};
use mosscross::workflows::roof::{roof_router, RoofQuoteState};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes<G>(
    quotes: Arc<RoofQuoteState>,
    contact: Arc<ContactService<G>>,
) -> axum::Router
where
    G: LeadGateway + 'static,
{
    roof_router(quotes)
        .merge(contact_router(contact))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryLeadOutbox;
    use axum::body::Body;
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;

    fn router(outbox: Arc<InMemoryLeadOutbox>) -> axum::Router {
        with_service_routes(
            Arc::new(RoofQuoteState::default()),
            Arc::new(ContactService::new(outbox, Duration::from_millis(1500))),
        )
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn estimate_and_options_are_mounted() {
        let app = router(Arc::new(InMemoryLeadOutbox::default()));

        let options = app
            .clone()
            .oneshot(
                Request::get("/api/v1/roof/options")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(options.status(), StatusCode::OK);
        let body = json_body(options).await;
        assert_eq!(body["defaults"]["levels"], json!(1));

        let estimate = app
            .oneshot(
                Request::post("/api/v1/roof/estimate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"levels":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(estimate.status(), StatusCode::OK);
        let body = json_body(estimate).await;
        assert_eq!(body["estimate"]["amount"], json!(330));
    }

    #[tokio::test(start_paused = true)]
    async fn contact_submissions_land_in_the_outbox() {
        let outbox = Arc::new(InMemoryLeadOutbox::default());
        let app = router(outbox.clone());

        let response = app
            .oneshot(
                Request::post("/api/v1/contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "name": "Sam Birch",
                            "email": "sam@example.org",
                            "message": "Metal roof, light moss"
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let leads = outbox.leads();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Sam Birch");
    }
}
