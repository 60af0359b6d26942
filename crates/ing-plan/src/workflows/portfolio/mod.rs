//! Portfolio overview: KPIs, breakdowns, and deadline lists over the project
//! list and the offer pipeline, plus the searchable project list, computed
//! against an explicit evaluation time.

mod projects;
mod summary;
pub mod views;

pub use projects::{ProjectQuery, ProjectSort};
pub use summary::PortfolioReport;
pub use views::{PortfolioSummary, ProjectList};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::calendar::days_until;
use crate::workflows::screening::Project;

/// Number of entries shown in the deadline lists.
pub const DEADLINE_LIST_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortfolioError {
    #[error("unknown portfolio filter '{0}', expected all, critical or manager")]
    UnknownFilter(String),
    #[error("the manager filter needs a manager name")]
    MissingManager,
    #[error(
        "unknown project sort '{0}', expected deadline-asc, deadline-desc, volume-desc, billing-desc or progress-desc"
    )]
    UnknownSort(String),
    #[error("unknown discipline '{0}', expected Straße, Wasser, RA or Vermessung")]
    UnknownDiscipline(String),
    #[error("unknown project status '{0}'")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    Overdue,
    Urgent,
    Soon,
    Ok,
}

impl DeadlineStatus {
    pub const fn from_days(days: i64) -> Self {
        if days < 0 {
            Self::Overdue
        } else if days <= 7 {
            Self::Urgent
        } else if days <= 30 {
            Self::Soon
        } else {
            Self::Ok
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Überfällig",
            Self::Urgent => "Dringend",
            Self::Soon => "Bald fällig",
            Self::Ok => "Im Plan",
        }
    }

    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Overdue | Self::Urgent)
    }
}

pub fn deadline_status(date: NaiveDate, now: DateTime<Utc>) -> DeadlineStatus {
    DeadlineStatus::from_days(days_until(date, now))
}

/// Invoiced share of the project volume in percent. Zero-volume projects report 0.
pub fn billing_progress(project: &Project) -> f64 {
    if project.project_volume == 0.0 {
        0.0
    } else {
        project.invoiced_amount / project.project_volume * 100.0
    }
}

/// Dashboard quick filter. KPIs always cover the full snapshot; the filter
/// narrows breakdowns and deadline lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PortfolioFilter {
    #[default]
    All,
    /// Projects due within 30 days or overdue, offers due within 30 days.
    Critical,
    Manager(String),
}

impl PortfolioFilter {
    pub fn parse(filter: Option<&str>, manager: Option<&str>) -> Result<Self, PortfolioError> {
        let manager = manager.map(str::trim).filter(|name| !name.is_empty());
        match filter.map(str::trim) {
            None | Some("") => Ok(manager
                .map(|name| Self::Manager(name.to_string()))
                .unwrap_or_default()),
            Some(value) if value.eq_ignore_ascii_case("all") => Ok(Self::All),
            Some(value) if value.eq_ignore_ascii_case("critical") => Ok(Self::Critical),
            Some(value) if value.eq_ignore_ascii_case("manager") => manager
                .map(|name| Self::Manager(name.to_string()))
                .ok_or(PortfolioError::MissingManager),
            Some(other) => Err(PortfolioError::UnknownFilter(other.to_string())),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Critical => "critical".to_string(),
            Self::Manager(name) => format!("manager:{name}"),
        }
    }
}
