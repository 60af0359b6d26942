use chrono::{DateTime, Utc};
use tracing::debug;

use super::views::{
    DisciplineEntry, OfferDeadlineView, PhaseEntry, PipelineKpis, PortfolioKpis,
    PortfolioSummary, ProjectDeadlineView,
};
use super::{billing_progress, DeadlineStatus, PortfolioFilter, DEADLINE_LIST_LIMIT};
use crate::workflows::calendar::days_until;
use crate::workflows::screening::{Discipline, Offer, OfferPhase, Project, ProjectStatus};

/// Offers due within this many days count towards the critical-deadline KPI.
const OFFER_CRITICAL_DAYS: i64 = 14;
/// Offers due within this many days appear in the critical offer list.
const OFFER_WATCH_DAYS: i64 = 30;

/// Borrowed view over one snapshot, evaluated at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct PortfolioReport<'a> {
    pub(super) projects: &'a [Project],
    pub(super) offers: &'a [Offer],
    pub(super) now: DateTime<Utc>,
}

impl<'a> PortfolioReport<'a> {
    pub fn new(projects: &'a [Project], offers: &'a [Offer], now: DateTime<Utc>) -> Self {
        Self {
            projects,
            offers,
            now,
        }
    }

    pub fn kpis(&self) -> PortfolioKpis {
        let total_volume: f64 = self.projects.iter().map(|p| p.project_volume).sum();
        let total_invoiced: f64 = self.projects.iter().map(|p| p.invoiced_amount).sum();
        let invoiced_percent = if total_volume > 0.0 {
            total_invoiced / total_volume * 100.0
        } else {
            0.0
        };

        let critical_projects = self
            .projects
            .iter()
            .filter(|project| self.project_status(project).is_critical())
            .count();
        let critical_offers = self
            .offers
            .iter()
            .filter(|offer| self.offer_days(offer) <= OFFER_CRITICAL_DAYS)
            .count();

        PortfolioKpis {
            total_volume,
            total_invoiced,
            invoiced_percent,
            active_projects: self
                .projects
                .iter()
                .filter(|project| project.status != ProjectStatus::Completed)
                .count(),
            total_offers: self.offers.len(),
            critical_deadlines: critical_projects + critical_offers,
            average_progress: average_progress(self.projects),
        }
    }

    pub fn pipeline(&self) -> PipelineKpis {
        let in_phase = |phase: OfferPhase| {
            self.offers
                .iter()
                .filter(|offer| offer.phase == phase)
                .count()
        };

        PipelineKpis {
            total_offers: self.offers.len(),
            in_analysis: in_phase(OfferPhase::Analysis),
            in_preparation: in_phase(OfferPhase::Preparation),
            urgent_offers: self
                .offers
                .iter()
                .filter(|offer| (0..=OFFER_CRITICAL_DAYS).contains(&self.offer_days(offer)))
                .count(),
            total_effort_days: self
                .offers
                .iter()
                .map(|offer| u64::from(offer.effort_days))
                .sum(),
        }
    }

    pub fn summary(&self, filter: &PortfolioFilter) -> PortfolioSummary {
        let projects = self.filtered_projects(filter);
        let offers = self.filtered_offers(filter);

        let projects_by_discipline = Discipline::ordered()
            .into_iter()
            .map(|discipline| {
                let (count, volume) = projects
                    .iter()
                    .filter(|project| project.discipline == discipline)
                    .fold((0, 0.0), |(count, volume), project| {
                        (count + 1, volume + project.project_volume)
                    });
                DisciplineEntry {
                    discipline,
                    discipline_label: discipline.label(),
                    count,
                    volume,
                }
            })
            .collect();

        let offers_by_phase = OfferPhase::ordered()
            .into_iter()
            .map(|phase| {
                let in_phase = offers.iter().filter(|offer| offer.phase == phase);
                PhaseEntry {
                    phase,
                    phase_label: phase.label(),
                    count: in_phase.clone().count(),
                    effort_days: in_phase.map(|offer| u64::from(offer.effort_days)).sum(),
                }
            })
            .collect();

        let mut upcoming: Vec<&Project> = projects
            .iter()
            .copied()
            .filter(|project| project.status != ProjectStatus::Completed)
            .collect();
        upcoming.sort_by_key(|project| project.deadline);
        let upcoming_deadlines = upcoming
            .into_iter()
            .take(DEADLINE_LIST_LIMIT)
            .map(|project| self.project_view(project))
            .collect();

        let mut critical: Vec<&Offer> = offers
            .iter()
            .copied()
            .filter(|offer| {
                offer.phase != OfferPhase::Submission
                    && self.offer_days(offer) <= OFFER_WATCH_DAYS
            })
            .collect();
        critical.sort_by_key(|offer| offer.due_date);
        let critical_offers = critical
            .into_iter()
            .take(DEADLINE_LIST_LIMIT)
            .map(|offer| self.offer_view(offer))
            .collect();

        debug!(
            filter = %filter.describe(),
            projects = projects.len(),
            offers = offers.len(),
            "built portfolio summary"
        );

        PortfolioSummary {
            filter: filter.describe(),
            kpis: self.kpis(),
            pipeline: self.pipeline(),
            projects_by_discipline,
            offers_by_phase,
            upcoming_deadlines,
            critical_offers,
        }
    }

    fn filtered_projects(&self, filter: &PortfolioFilter) -> Vec<&'a Project> {
        self.projects
            .iter()
            .filter(|project| match filter {
                PortfolioFilter::All => true,
                PortfolioFilter::Critical => {
                    self.project_status(project) != DeadlineStatus::Ok
                }
                PortfolioFilter::Manager(name) => project.project_manager == *name,
            })
            .collect()
    }

    fn filtered_offers(&self, filter: &PortfolioFilter) -> Vec<&'a Offer> {
        self.offers
            .iter()
            .filter(|offer| match filter {
                PortfolioFilter::Critical => self.offer_days(offer) <= OFFER_WATCH_DAYS,
                PortfolioFilter::All | PortfolioFilter::Manager(_) => true,
            })
            .collect()
    }

    fn project_status(&self, project: &Project) -> DeadlineStatus {
        DeadlineStatus::from_days(days_until(project.deadline, self.now))
    }

    fn offer_days(&self, offer: &Offer) -> i64 {
        days_until(offer.due_date, self.now)
    }

    fn project_view(&self, project: &Project) -> ProjectDeadlineView {
        let days_left = days_until(project.deadline, self.now);
        let status = DeadlineStatus::from_days(days_left);
        ProjectDeadlineView {
            id: project.id.clone(),
            project_number: project.project_number.clone(),
            title: project.title.clone(),
            project_manager: project.project_manager.clone(),
            status: project.status,
            deadline: project.deadline,
            days_left,
            deadline_status: status,
            deadline_label: status.label(),
            billing_progress: billing_progress(project),
        }
    }

    fn offer_view(&self, offer: &Offer) -> OfferDeadlineView {
        let days_left = self.offer_days(offer);
        let status = DeadlineStatus::from_days(days_left);
        OfferDeadlineView {
            id: offer.id.clone(),
            client: offer.client.clone(),
            title: offer.title.clone(),
            owner: offer.owner.clone(),
            phase: offer.phase,
            due_date: offer.due_date,
            days_left,
            deadline_status: status,
            deadline_label: status.label(),
            effort_days: offer.effort_days,
        }
    }
}

/// Mean progress rounded half up, 0 for an empty list.
fn average_progress(projects: &[Project]) -> u8 {
    if projects.is_empty() {
        return 0;
    }
    let count = projects.len() as u64;
    let total: u64 = projects.iter().map(|p| u64::from(p.progress)).sum();
    // progress is capped at 100, so the mean fits in u8
    u8::try_from((2 * total + count) / (2 * count)).unwrap_or(100)
}
