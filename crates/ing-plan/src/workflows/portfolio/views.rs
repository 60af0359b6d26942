use chrono::NaiveDate;
use serde::Serialize;

use super::DeadlineStatus;
use crate::workflows::screening::{Discipline, OfferId, OfferPhase, ProjectId, ProjectStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioKpis {
    pub total_volume: f64,
    pub total_invoiced: f64,
    pub invoiced_percent: f64,
    pub active_projects: usize,
    pub total_offers: usize,
    pub critical_deadlines: usize,
    pub average_progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineKpis {
    pub total_offers: usize,
    pub in_analysis: usize,
    pub in_preparation: usize,
    pub urgent_offers: usize,
    pub total_effort_days: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineEntry {
    pub discipline: Discipline,
    pub discipline_label: &'static str,
    pub count: usize,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEntry {
    pub phase: OfferPhase,
    pub phase_label: &'static str,
    pub count: usize,
    pub effort_days: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeadlineView {
    pub id: ProjectId,
    pub project_number: String,
    pub title: String,
    pub project_manager: String,
    pub status: ProjectStatus,
    pub deadline: NaiveDate,
    pub days_left: i64,
    pub deadline_status: DeadlineStatus,
    pub deadline_label: &'static str,
    pub billing_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDeadlineView {
    pub id: OfferId,
    pub client: String,
    pub title: String,
    pub owner: String,
    pub phase: OfferPhase,
    pub due_date: NaiveDate,
    pub days_left: i64,
    pub deadline_status: DeadlineStatus,
    pub deadline_label: &'static str,
    pub effort_days: u32,
}

/// Everything the dashboard landing page renders for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub filter: String,
    pub kpis: PortfolioKpis,
    pub pipeline: PipelineKpis,
    pub projects_by_discipline: Vec<DisciplineEntry>,
    pub offers_by_phase: Vec<PhaseEntry>,
    pub upcoming_deadlines: Vec<ProjectDeadlineView>,
    pub critical_offers: Vec<OfferDeadlineView>,
}

/// One row of the project table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListEntry {
    pub id: ProjectId,
    pub project_number: String,
    pub title: String,
    pub discipline: Discipline,
    pub discipline_label: &'static str,
    pub project_manager: String,
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub deadline: NaiveDate,
    pub days_left: i64,
    pub deadline_status: DeadlineStatus,
    pub deadline_label: &'static str,
    pub progress: u8,
    pub project_volume: f64,
    pub invoiced_amount: f64,
    pub billing_progress: f64,
}

/// Totals over every project, independent of search and filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListSummary {
    pub total_count: usize,
    pub total_volume: f64,
    pub total_invoiced: f64,
    pub average_billing: f64,
    pub overdue_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectList {
    pub search: Option<String>,
    pub discipline: Option<Discipline>,
    pub status: Option<ProjectStatus>,
    pub sort: &'static str,
    pub summary: ProjectListSummary,
    pub projects: Vec<ProjectListEntry>,
}
