use chrono::{DateTime, Utc};
use ing_plan::config::AppConfig;
use ing_plan::workflows::calendar::parse_evaluation_timestamp;
use ing_plan::workflows::snapshot::ConfiguredSnapshotSource;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// A `--snapshot` flag wins over `APP_SNAPSHOT_PATH`.
pub(crate) fn snapshot_source(
    override_path: Option<PathBuf>,
    config: &AppConfig,
) -> ConfiguredSnapshotSource {
    ConfiguredSnapshotSource::from_path(override_path.or_else(|| config.snapshot.path.clone()))
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_evaluation_timestamp(raw).ok_or_else(|| {
        format!("failed to parse '{raw}' as an RFC 3339 timestamp or YYYY-MM-DD date")
    })
}
