use std::sync::Arc;

use serde_json::json;

use super::common::*;
use crate::error::AppError;
use crate::workflows::dashboard::{DashboardService, DashboardServiceError, ScreeningRequest};
use crate::workflows::portfolio::{PortfolioFilter, ProjectQuery, ProjectSort};
use crate::workflows::screening::{AmpelColor, OfferId, ScreeningCategoryId, ScreeningError};
use crate::workflows::snapshot::{DashboardSnapshot, InMemorySnapshotSource};

#[test]
fn screens_snapshot_offer_by_id() {
    let service = build_service();

    let result = service
        .screen_offer(&OfferId("b1".to_string()), evaluated_at())
        .expect("b1 screens");

    // strategic 90, capacity 55, profitability 85, deadline 55, expertise 90, relationship 80
    assert_eq!(result.overall_score, 74);
    assert_eq!(result.overall_color, AmpelColor::Green);
    assert_eq!(result.category(ScreeningCategoryId::Capacity).score, 55);
    assert_eq!(
        result.category(ScreeningCategoryId::Capacity).explanation,
        "Arne has 3 active project(s) and 1 offer(s) in the pipeline (18 PT)."
    );
    assert_eq!(result.category(ScreeningCategoryId::Relationship).score, 80);
}

#[test]
fn unknown_offer_is_reported_as_not_found() {
    let service = build_service();

    let error = service
        .screen_offer(&OfferId("b404".to_string()), evaluated_at())
        .expect_err("unknown offer");

    assert!(matches!(
        error,
        DashboardServiceError::OfferNotFound(OfferId(ref id)) if id == "b404"
    ));
    assert!(!error.is_invalid_input());
}

#[test]
fn batch_screening_covers_sample_requests() {
    let service = build_service();

    let results = service.screen_requests(evaluated_at()).expect("batch screens");

    let ids: Vec<&str> = results.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["b1"]);
}

#[test]
fn payload_screening_uses_supplied_collections() {
    let service = build_service();
    let request: ScreeningRequest =
        serde_json::from_value(screening_payload()).expect("payload parses");

    // the default timestamp is ignored because the payload names one
    let result = service
        .screen_payload(request, evaluated_at() + chrono::Duration::days(90))
        .expect("payload screens");

    assert_eq!(result.offer_id, OfferId("b9".to_string()));
    assert_eq!(result.overall_score, 75);
    assert_eq!(
        result.summary,
        "Overall: Empfohlen. Strength: Strategic Fit (90). Needs attention: Expertise (55)."
    );
}

#[test]
fn payload_with_invalid_records_is_rejected() {
    let service = build_service();

    let mut payload = screening_payload();
    payload["offer"]["dueDate"] = json!("März 2026");
    let request: ScreeningRequest = serde_json::from_value(payload).expect("payload parses");
    let error = service
        .screen_payload(request, evaluated_at())
        .expect_err("bad due date");
    assert!(matches!(
        error,
        DashboardServiceError::Screening(ScreeningError::InvalidDate { field: "dueDate", .. })
    ));
    assert!(error.is_invalid_input());

    let mut payload = screening_payload();
    payload["evaluatedAt"] = json!("yesterday");
    let request: ScreeningRequest = serde_json::from_value(payload).expect("payload parses");
    let error = service
        .screen_payload(request, evaluated_at())
        .expect_err("bad timestamp");
    assert!(matches!(
        error,
        DashboardServiceError::Screening(ScreeningError::InvalidTimestamp(ref raw))
            if raw == "yesterday"
    ));

    let mut payload = screening_payload();
    payload["offer"]["effortDays"] = json!(0);
    let request: ScreeningRequest = serde_json::from_value(payload).expect("payload parses");
    assert!(matches!(
        service.screen_payload(request, evaluated_at()),
        Err(DashboardServiceError::Screening(ScreeningError::InvalidEffort { .. }))
    ));
}

#[test]
fn portfolio_reads_the_current_snapshot() {
    let service = build_service();

    let summary = service
        .portfolio(&PortfolioFilter::Critical, evaluated_at())
        .expect("portfolio builds");

    assert_eq!(summary.filter, "critical");
    assert_eq!(summary.kpis.total_offers, 5);
    assert_eq!(summary.critical_offers.len(), 2);
}

#[test]
fn project_list_reads_the_current_snapshot() {
    let service = build_service();
    let query = ProjectQuery {
        search: Some("Arne".to_string()),
        sort: ProjectSort::VolumeDesc,
        ..ProjectQuery::default()
    };

    let list = service
        .projects(&query, evaluated_at())
        .expect("project list builds");

    let ids: Vec<&str> = list.projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p10", "p3", "p2", "p1"]);
    assert_eq!(list.sort, "volume-desc");
    assert_eq!(list.summary.total_count, 12);
}

#[test]
fn snapshot_failures_propagate() {
    let service = DashboardService::new(Arc::new(MissingExportSource));

    let error = service
        .portfolio(&PortfolioFilter::All, evaluated_at())
        .expect_err("source unavailable");

    assert!(matches!(error, DashboardServiceError::Snapshot(_)));
    assert!(error.to_string().contains("/srv/ing-plan/export.json"));
}

#[test]
fn unscreenable_snapshot_offer_is_a_source_fault() {
    let mut snapshot = DashboardSnapshot::sample();
    let broken = snapshot
        .offers
        .iter_mut()
        .find(|offer| offer.id.as_str() == "b1")
        .expect("b1 present");
    broken.effort_days = 0;
    let service = DashboardService::new(Arc::new(InMemorySnapshotSource::new(snapshot)));

    let error = service
        .screen_requests(evaluated_at())
        .expect_err("broken snapshot rejected");

    assert!(matches!(error, DashboardServiceError::Snapshot(_)));
    assert!(!error.is_invalid_input());
    assert_eq!(
        AppError::from(error).status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}
