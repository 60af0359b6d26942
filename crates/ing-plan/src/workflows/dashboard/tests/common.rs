use std::path::PathBuf;
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::workflows::dashboard::{dashboard_router, DashboardService};
use crate::workflows::snapshot::{
    DashboardSnapshot, InMemorySnapshotSource, SnapshotError, SnapshotSource,
};

pub(super) const EVALUATED_AT: &str = "2026-02-05T09:00:00Z";

pub(super) fn evaluated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 5, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_service() -> DashboardService<InMemorySnapshotSource> {
    DashboardService::new(Arc::new(InMemorySnapshotSource::sample()))
}

pub(super) fn sample_router() -> axum::Router {
    dashboard_router(Arc::new(build_service()))
}

/// Source whose export file has gone missing.
pub(super) struct MissingExportSource;

impl SnapshotSource for MissingExportSource {
    fn load(&self) -> Result<DashboardSnapshot, SnapshotError> {
        Err(SnapshotError::Io {
            path: PathBuf::from("/srv/ing-plan/export.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        })
    }
}

pub(super) fn screening_payload() -> Value {
    json!({
        "offer": {
            "id": "b9",
            "client": "Ten Brinke",
            "title": "Hafenstraße",
            "owner": "Arne",
            "phase": "Anfrage",
            "dueDate": "2026-03-01",
            "effortDays": 25,
            "notes": "Straßenbau und Entwässerung"
        },
        "projects": [{
            "id": "p2",
            "projectNumber": "IC22526.1",
            "title": "Ten Brinke – Roederallee",
            "discipline": "Straße",
            "projectManager": "Arne",
            "status": "In Bearbeitung",
            "deadline": "2026-12-10",
            "progress": 55,
            "projectVolume": 320000,
            "invoicedAmount": 160000
        }],
        "offers": [],
        "evaluatedAt": EVALUATED_AT
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
