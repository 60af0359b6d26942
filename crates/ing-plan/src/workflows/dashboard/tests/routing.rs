use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::dashboard::router::{
    portfolio_handler, projects_handler, screen_offer_handler, EvaluationQuery, PortfolioQuery,
    ProjectListQuery,
};
use crate::workflows::dashboard::{dashboard_router, DashboardService, ScreeningRequest};
use crate::workflows::snapshot::InMemorySnapshotSource;

#[tokio::test]
async fn screen_offer_handler_returns_screening_result() {
    let service = Arc::new(build_service());

    let response = screen_offer_handler::<InMemorySnapshotSource>(
        State(service),
        Path("b1".to_string()),
        Query(EvaluationQuery {
            at: Some(EVALUATED_AT.to_string()),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["offerId"], json!("b1"));
    assert_eq!(payload["overallScore"], json!(74));
    assert_eq!(payload["overallColor"], json!("green"));
    assert_eq!(payload["overallLabel"], json!("Empfohlen"));
    assert_eq!(payload["categories"][0]["id"], json!("strategic"));
    assert_eq!(payload["categories"][0]["name"], json!("Strategic Fit"));
}

#[tokio::test]
async fn screen_offer_handler_returns_not_found_for_unknown_offer() {
    let service = Arc::new(build_service());

    let response = screen_offer_handler::<InMemorySnapshotSource>(
        State(service),
        Path("b404".to_string()),
        Query(EvaluationQuery::default()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("offer b404 not found"));
}

#[tokio::test]
async fn invalid_timestamp_is_a_bad_request() {
    let service = Arc::new(build_service());

    let response = screen_offer_handler::<InMemorySnapshotSource>(
        State(service),
        Path("b1".to_string()),
        Query(EvaluationQuery {
            at: Some("next tuesday".to_string()),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn portfolio_handler_rejects_unknown_filter() {
    let service = Arc::new(build_service());

    let response = portfolio_handler::<InMemorySnapshotSource>(
        State(service),
        Query(PortfolioQuery {
            filter: Some("favourites".to_string()),
            ..PortfolioQuery::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("favourites"));
}

#[tokio::test]
async fn portfolio_handler_reports_snapshot_failures_as_internal_errors() {
    let service = Arc::new(DashboardService::new(Arc::new(MissingExportSource)));

    let response = portfolio_handler::<MissingExportSource>(
        State(service),
        Query(PortfolioQuery::default()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn screening_route_accepts_payloads() {
    let router = sample_router();

    let response = router
        .oneshot(
            Request::post("/api/v1/screening")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&screening_payload()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["offerId"], json!("b9"));
    assert_eq!(payload["overallScore"], json!(75));
}

#[tokio::test]
async fn screening_route_rejects_invalid_dates() {
    let router = sample_router();
    let mut request: ScreeningRequest =
        serde_json::from_value(screening_payload()).expect("payload parses");
    request.projects[0].deadline = "31.12.2026".to_string();

    let response = router
        .oneshot(
            Request::post("/api/v1/screening")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("deadline '31.12.2026'"));
}

#[tokio::test]
async fn batch_and_portfolio_routes_respond() {
    let router = dashboard_router(Arc::new(build_service()));

    let response = router
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/offers/screenings?at={EVALUATED_AT}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["b1"]["overallScore"], json!(74));

    let response = router
        .oneshot(
            Request::get("/api/v1/portfolio?filter=manager&manager=Max&at=2026-02-05")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["filter"], json!("manager:Max"));
    assert_eq!(payload["upcomingDeadlines"][0]["id"], json!("p8"));
    assert_eq!(payload["kpis"]["totalOffers"], json!(5));
}

#[tokio::test]
async fn projects_route_searches_and_sorts() {
    let router = sample_router();

    let response = router
        .oneshot(
            Request::get(format!(
                "/api/v1/projects?search=ten%20brinke&sort=deadline-asc&at={EVALUATED_AT}"
            ))
            .body(axum::body::Body::empty())
            .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["sort"], json!("deadline-asc"));
    assert_eq!(payload["projects"][0]["id"], json!("p12"));
    assert_eq!(payload["projects"][1]["id"], json!("p2"));
    assert_eq!(payload["projects"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["summary"]["totalCount"], json!(12));
    assert_eq!(payload["summary"]["overdueCount"], json!(4));
}

#[tokio::test]
async fn projects_handler_rejects_unknown_sort() {
    let service = Arc::new(build_service());

    let response = projects_handler::<InMemorySnapshotSource>(
        State(service),
        Query(ProjectListQuery {
            sort: Some("name-asc".to_string()),
            ..ProjectListQuery::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("name-asc"));
}

#[tokio::test]
async fn projects_handler_filters_by_discipline_and_status() {
    let service = Arc::new(build_service());

    let response = projects_handler::<InMemorySnapshotSource>(
        State(service),
        Query(ProjectListQuery {
            discipline: Some("Wasser".to_string()),
            status: Some("In Bearbeitung".to_string()),
            at: Some(EVALUATED_AT.to_string()),
            ..ProjectListQuery::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["discipline"], json!("Wasser"));
    assert_eq!(payload["status"], json!("In Bearbeitung"));
    assert_eq!(payload["projects"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["projects"][0]["id"], json!("p11"));
}
