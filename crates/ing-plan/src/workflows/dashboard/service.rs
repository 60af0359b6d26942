use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::calendar::parse_evaluation_timestamp;
use crate::workflows::portfolio::{
    PortfolioError, PortfolioFilter, PortfolioReport, PortfolioSummary, ProjectList, ProjectQuery,
};
use crate::workflows::screening::{
    Offer, OfferId, OfferRecord, Project, ProjectRecord, ScreeningEngine, ScreeningError,
    ScreeningResult,
};
use crate::workflows::snapshot::{DashboardSnapshot, SnapshotError, SnapshotSource};

/// Ad-hoc screening payload. Records arrive unvalidated so that bad dates or
/// effort values surface as screening errors instead of body rejections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningRequest {
    pub offer: OfferRecord,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub offers: Vec<OfferRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<String>,
}

/// Screening and portfolio queries over the configured snapshot source.
pub struct DashboardService<S> {
    source: Arc<S>,
    engine: ScreeningEngine,
}

impl<S> DashboardService<S>
where
    S: SnapshotSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            engine: ScreeningEngine::new(),
        }
    }

    pub fn snapshot(&self) -> Result<DashboardSnapshot, DashboardServiceError> {
        Ok(self.source.load()?)
    }

    /// Screen one offer of the current snapshot.
    pub fn screen_offer(
        &self,
        offer_id: &OfferId,
        evaluated_at: DateTime<Utc>,
    ) -> Result<ScreeningResult, DashboardServiceError> {
        let snapshot = self.snapshot()?;
        let offer = snapshot
            .offer(offer_id)
            .ok_or_else(|| DashboardServiceError::OfferNotFound(offer_id.clone()))?;

        let result = self
            .engine
            .screen(offer, &snapshot.projects, &snapshot.offers, evaluated_at)?;
        Ok(result)
    }

    /// Screen every offer of the current snapshot that is still in the request phase.
    pub fn screen_requests(
        &self,
        evaluated_at: DateTime<Utc>,
    ) -> Result<BTreeMap<OfferId, ScreeningResult>, DashboardServiceError> {
        let snapshot = self.snapshot()?;
        let results = self
            .engine
            .screen_requests(&snapshot.projects, &snapshot.offers, evaluated_at)?;
        Ok(results)
    }

    /// Screen an offer against collections supplied by the caller.
    ///
    /// `default_evaluated_at` applies when the request carries no timestamp.
    pub fn screen_payload(
        &self,
        request: ScreeningRequest,
        default_evaluated_at: DateTime<Utc>,
    ) -> Result<ScreeningResult, DashboardServiceError> {
        let evaluated_at = match request.evaluated_at {
            Some(raw) => parse_evaluation_timestamp(&raw)
                .ok_or(ScreeningError::InvalidTimestamp(raw))?,
            None => default_evaluated_at,
        };

        let offer = Offer::try_from(request.offer)?;
        let projects = request
            .projects
            .into_iter()
            .map(Project::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let offers = request
            .offers
            .into_iter()
            .map(Offer::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let result = self
            .engine
            .screen(&offer, &projects, &offers, evaluated_at)?;
        Ok(result)
    }

    pub fn portfolio(
        &self,
        filter: &PortfolioFilter,
        evaluated_at: DateTime<Utc>,
    ) -> Result<PortfolioSummary, DashboardServiceError> {
        let snapshot = self.snapshot()?;
        let report = PortfolioReport::new(&snapshot.projects, &snapshot.offers, evaluated_at);
        Ok(report.summary(filter))
    }

    /// The searchable, sortable project table.
    pub fn projects(
        &self,
        query: &ProjectQuery,
        evaluated_at: DateTime<Utc>,
    ) -> Result<ProjectList, DashboardServiceError> {
        let snapshot = self.snapshot()?;
        let report = PortfolioReport::new(&snapshot.projects, &snapshot.offers, evaluated_at);
        Ok(report.projects(query))
    }
}

/// Error raised by the dashboard service.
#[derive(Debug, thiserror::Error)]
pub enum DashboardServiceError {
    #[error("offer {} not found", .0.as_str())]
    OfferNotFound(OfferId),
    #[error(transparent)]
    Screening(#[from] ScreeningError),
    #[error(transparent)]
    Filter(#[from] PortfolioError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl DashboardServiceError {
    /// Errors caused by the caller's input rather than the snapshot source.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Screening(_) | Self::Filter(_))
    }
}
