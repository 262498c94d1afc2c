use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadOutbox};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mosscross::config::AppConfig;
use mosscross::error::AppError;
use mosscross::telemetry;
use mosscross::workflows::contact::ContactService;
use mosscross::workflows::roof::{DiagramLayout, Estimator, RoofQuoteState};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let pricing = config.quote.pricing_table()?;
    info!(
        version = pricing.version,
        base_price = pricing.base_price,
        custom = config.quote.pricing_table_path.is_some(),
        "pricing table loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let quotes = Arc::new(RoofQuoteState::new(
        Estimator::new(pricing),
        DiagramLayout::canonical(),
    ));
    let contact = Arc::new(ContactService::new(
        Arc::new(InMemoryLeadOutbox::default()),
        config.contact.submit_delay,
    ));

    let app = with_service_routes(quotes, contact)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mosscross estimator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
