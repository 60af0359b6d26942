//! Rule-based screening of incoming offer requests.
//!
//! An offer is scored in six fixed categories against the current project and offer
//! snapshots, the scores are aggregated with fixed weights, and the result is classified
//! into a traffic light (`Ampel`). The engine performs no I/O and reads no clock: the
//! caller supplies the snapshots and the evaluation timestamp.

pub mod domain;
mod keywords;
mod policy;
mod relationships;
mod rules;
mod summary;

#[cfg(test)]
mod tests;

pub use domain::{
    AmpelColor, Discipline, Offer, OfferId, OfferPhase, OfferRecord, Project, ProjectId,
    ProjectRecord, ProjectStatus, ScreeningCategory, ScreeningCategoryId, ScreeningResult,
};
pub use keywords::{infer_discipline, infer_discipline_from_text, DISCIPLINE_KEYWORDS};
pub use policy::{clamp_score, overall_score};
pub use relationships::{client_projects, owner_pipeline_offers, owner_projects, Relationships};

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use rules::{score_categories, ScreeningContext};
use summary::generate_summary;

/// Input validation failures. Once inputs are valid, screening cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreeningError {
    #[error("{record} {id}: {field} '{value}' is not a calendar date (expected YYYY-MM-DD)")]
    InvalidDate {
        record: &'static str,
        id: String,
        field: &'static str,
        value: String,
    },
    #[error("offer {offer_id}: effort must be a positive number of person-days (got {value})")]
    InvalidEffort { offer_id: String, value: String },
    #[error("offer {offer_id}: {field} must not be blank")]
    BlankField {
        offer_id: String,
        field: &'static str,
    },
    #[error("project {project_id}: progress {value} is outside 0-100")]
    InvalidProgress { project_id: String, value: i64 },
    #[error("evaluation timestamp '{0}' is neither RFC 3339 nor YYYY-MM-DD")]
    InvalidTimestamp(String),
}

/// Stateless screening engine. Cheap to copy and safe to share between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreeningEngine;

impl ScreeningEngine {
    pub fn new() -> Self {
        Self
    }

    /// Screens `offer` against the full project and offer collections.
    ///
    /// `offers` may contain `offer` itself; it is excluded from the owner's pipeline by id.
    pub fn screen(
        &self,
        offer: &Offer,
        projects: &[Project],
        offers: &[Offer],
        evaluated_at: DateTime<Utc>,
    ) -> Result<ScreeningResult, ScreeningError> {
        offer.validate()?;

        let context = ScreeningContext {
            offer,
            discipline: infer_discipline(offer),
            relationships: Relationships::resolve(offer, projects, offers),
            evaluated_at,
        };

        let categories = score_categories(&context);
        let overall_score = overall_score(&categories);
        let overall_color = AmpelColor::from_score(overall_score);
        let overall_label = overall_color.label();
        let summary = generate_summary(&categories, overall_label);

        debug!(
            offer_id = %offer.id.as_str(),
            overall_score,
            discipline = ?context.discipline,
            "offer screened"
        );

        Ok(ScreeningResult {
            offer_id: offer.id.clone(),
            overall_score,
            overall_color,
            overall_label: overall_label.to_string(),
            summary,
            categories,
        })
    }

    /// Screens every offer that is still in the request phase, keyed by offer id.
    pub fn screen_requests(
        &self,
        projects: &[Project],
        offers: &[Offer],
        evaluated_at: DateTime<Utc>,
    ) -> Result<BTreeMap<OfferId, ScreeningResult>, ScreeningError> {
        offers
            .iter()
            .filter(|offer| offer.phase == OfferPhase::Request)
            .map(|offer| {
                self.screen(offer, projects, offers, evaluated_at)
                    .map(|result| (offer.id.clone(), result))
            })
            .collect()
    }
}
