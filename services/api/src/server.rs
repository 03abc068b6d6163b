use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_impact_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use impact_vectors::config::AppConfig;
use impact_vectors::dataset::CsvProjectSource;
use impact_vectors::error::AppError;
use impact_vectors::impact::{ImpactPipeline, ImpactService};
use impact_vectors::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    if !config.impact.data_path.exists() {
        warn!(
            path = %config.impact.data_path.display(),
            "project export not found; impact requests will fail until it exists"
        );
    }

    let source = Arc::new(CsvProjectSource::new(config.impact.data_path.clone()));
    let impact_service = Arc::new(ImpactService::new(
        source,
        ImpactPipeline::new(config.impact.total_budget),
    ));

    let app = with_impact_routes(impact_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        budget = config.impact.total_budget,
        "impact vector service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
