use crate::cli::ServeArgs;
use crate::infra::{snapshot_source, AppState};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ing_plan::config::AppConfig;
use ing_plan::error::AppError;
use ing_plan::telemetry;
use ing_plan::workflows::dashboard::DashboardService;
use ing_plan::workflows::snapshot::{InMemorySnapshotSource, SnapshotSource};
use std::sync::atomic::{AtomicBool, Ordering};
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = snapshot_source(None, &config);
    let data_source = source.describe();
    // Read once at startup; handlers serve the in-memory copy.
    let snapshot = InMemorySnapshotSource::preload(&source)?;
    let loaded = snapshot.load()?;
    info!(
        %data_source,
        projects = loaded.projects.len(),
        offers = loaded.offers.len(),
        "dashboard snapshot loaded"
    );

    let service = Arc::new(DashboardService::new(Arc::new(snapshot)));
    let app = with_dashboard_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        "offer screening service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
