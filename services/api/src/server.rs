use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_extraction_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use zefix_leads::config::AppConfig;
use zefix_leads::error::AppError;
use zefix_leads::telemetry;
use zefix_leads::workflows::extraction::ExtractionService;
use zefix_leads::workflows::registry::ZefixHttpClient;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let client = ZefixHttpClient::new(&config.registry)?;
    let service = Arc::new(ExtractionService::new(
        client,
        config.extraction.clone(),
    ));

    let app = with_extraction_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        registry = %config.registry.search_url,
        "zefix extraction service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
