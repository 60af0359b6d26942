use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::service::{DashboardService, DashboardServiceError, ScreeningRequest};
use crate::error::AppError;
use crate::workflows::calendar::parse_evaluation_timestamp;
use crate::workflows::portfolio::{PortfolioFilter, PortfolioSummary, ProjectList, ProjectQuery};
use crate::workflows::screening::{OfferId, ScreeningError, ScreeningResult};
use crate::workflows::snapshot::SnapshotSource;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluationQuery {
    pub at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PortfolioQuery {
    pub filter: Option<String>,
    pub manager: Option<String>,
    pub at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectListQuery {
    pub search: Option<String>,
    pub discipline: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub at: Option<String>,
}

/// Router builder exposing screening and portfolio endpoints.
pub fn dashboard_router<S>(service: Arc<DashboardService<S>>) -> Router
where
    S: SnapshotSource + 'static,
{
    Router::new()
        .route("/api/v1/screening", post(screen_payload_handler::<S>))
        .route("/api/v1/offers/screenings", get(screen_requests_handler::<S>))
        .route(
            "/api/v1/offers/:offer_id/screening",
            get(screen_offer_handler::<S>),
        )
        .route("/api/v1/portfolio", get(portfolio_handler::<S>))
        .route("/api/v1/projects", get(projects_handler::<S>))
        .with_state(service)
}

pub(crate) async fn screen_payload_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Json(request): Json<ScreeningRequest>,
) -> Result<Json<ScreeningResult>, AppError>
where
    S: SnapshotSource + 'static,
{
    let result = service.screen_payload(request, Utc::now())?;
    Ok(Json(result))
}

pub(crate) async fn screen_offer_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Path(offer_id): Path<String>,
    Query(query): Query<EvaluationQuery>,
) -> Result<Json<ScreeningResult>, AppError>
where
    S: SnapshotSource + 'static,
{
    let evaluated_at = evaluation_time(query.at.as_deref())?;
    let result = service.screen_offer(&OfferId(offer_id), evaluated_at)?;
    Ok(Json(result))
}

pub(crate) async fn screen_requests_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Query(query): Query<EvaluationQuery>,
) -> Result<Json<BTreeMap<OfferId, ScreeningResult>>, AppError>
where
    S: SnapshotSource + 'static,
{
    let evaluated_at = evaluation_time(query.at.as_deref())?;
    let results = service.screen_requests(evaluated_at)?;
    Ok(Json(results))
}

pub(crate) async fn portfolio_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Json<PortfolioSummary>, AppError>
where
    S: SnapshotSource + 'static,
{
    let evaluated_at = evaluation_time(query.at.as_deref())?;
    let filter = PortfolioFilter::parse(query.filter.as_deref(), query.manager.as_deref())
        .map_err(DashboardServiceError::from)?;
    let summary = service.portfolio(&filter, evaluated_at)?;
    Ok(Json(summary))
}

pub(crate) async fn projects_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ProjectList>, AppError>
where
    S: SnapshotSource + 'static,
{
    let evaluated_at = evaluation_time(query.at.as_deref())?;
    let project_query = ProjectQuery::parse(
        query.search.as_deref(),
        query.discipline.as_deref(),
        query.status.as_deref(),
        query.sort.as_deref(),
    )
    .map_err(DashboardServiceError::from)?;
    let list = service.projects(&project_query, evaluated_at)?;
    Ok(Json(list))
}

/// Requests without `at` are evaluated at the current wall-clock time.
fn evaluation_time(raw: Option<&str>) -> Result<DateTime<Utc>, ScreeningError> {
    match raw {
        Some(raw) => parse_evaluation_timestamp(raw)
            .ok_or_else(|| ScreeningError::InvalidTimestamp(raw.to_string())),
        None => Ok(Utc::now()),
    }
}
