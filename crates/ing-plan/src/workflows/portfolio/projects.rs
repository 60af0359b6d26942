use std::cmp::Ordering;

use tracing::debug;

use super::summary::PortfolioReport;
use super::views::{ProjectList, ProjectListEntry, ProjectListSummary};
use super::{billing_progress, DeadlineStatus, PortfolioError};
use crate::workflows::calendar::days_until;
use crate::workflows::screening::{Discipline, Project, ProjectStatus};

/// Sort order of the project table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectSort {
    #[default]
    DeadlineAsc,
    DeadlineDesc,
    VolumeDesc,
    BillingDesc,
    ProgressDesc,
}

impl ProjectSort {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::DeadlineAsc,
            Self::DeadlineDesc,
            Self::VolumeDesc,
            Self::BillingDesc,
            Self::ProgressDesc,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::DeadlineAsc => "deadline-asc",
            Self::DeadlineDesc => "deadline-desc",
            Self::VolumeDesc => "volume-desc",
            Self::BillingDesc => "billing-desc",
            Self::ProgressDesc => "progress-desc",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, PortfolioError> {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|sort| sort.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PortfolioError::UnknownSort(trimmed.to_string()))
    }

    fn compare(self, left: &Project, right: &Project) -> Ordering {
        match self {
            Self::DeadlineAsc => left.deadline.cmp(&right.deadline),
            Self::DeadlineDesc => right.deadline.cmp(&left.deadline),
            Self::VolumeDesc => right.project_volume.total_cmp(&left.project_volume),
            Self::BillingDesc => billing_progress(right).total_cmp(&billing_progress(left)),
            Self::ProgressDesc => right.progress.cmp(&left.progress),
        }
    }
}

/// Search, filters and sort order of the project table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    pub search: Option<String>,
    pub discipline: Option<Discipline>,
    pub status: Option<ProjectStatus>,
    pub sort: ProjectSort,
}

impl ProjectQuery {
    /// Builds a query from raw request values. Blank values and `all`/`Alle` leave
    /// the corresponding filter off.
    pub fn parse(
        search: Option<&str>,
        discipline: Option<&str>,
        status: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, PortfolioError> {
        let discipline = match selection(discipline) {
            Some(raw) => Some(
                Discipline::ordered()
                    .into_iter()
                    .find(|discipline| {
                        matches_name(raw, discipline.code())
                            || matches_name(raw, discipline.label())
                    })
                    .ok_or_else(|| PortfolioError::UnknownDiscipline(raw.to_string()))?,
            ),
            None => None,
        };

        let status = match selection(status) {
            Some(raw) => Some(
                ProjectStatus::ordered()
                    .into_iter()
                    .find(|status| {
                        matches_name(raw, status.code()) || matches_name(raw, status.label())
                    })
                    .ok_or_else(|| PortfolioError::UnknownStatus(raw.to_string()))?,
            ),
            None => None,
        };

        let sort = match sort.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => ProjectSort::parse(raw)?,
            None => ProjectSort::default(),
        };

        Ok(Self {
            search: search
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(str::to_string),
            discipline,
            status,
            sort,
        })
    }

    /// Case-insensitive substring match over number, title, manager, discipline and status.
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let haystacks = [
                project.project_number.as_str(),
                project.title.as_str(),
                project.project_manager.as_str(),
                project.discipline.code(),
                project.status.code(),
            ];
            if !haystacks
                .iter()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        self.discipline
            .map_or(true, |discipline| project.discipline == discipline)
            && self.status.map_or(true, |status| project.status == status)
    }
}

impl<'a> PortfolioReport<'a> {
    /// The project table: matching projects in the requested order, with totals
    /// over the whole project list.
    pub fn projects(&self, query: &ProjectQuery) -> ProjectList {
        let mut matching: Vec<&Project> = self
            .projects
            .iter()
            .filter(|project| query.matches(project))
            .collect();
        matching.sort_by(|left, right| query.sort.compare(left, right));

        debug!(
            search = ?query.search,
            sort = query.sort.key(),
            matching = matching.len(),
            "built project list"
        );

        ProjectList {
            search: query.search.clone(),
            discipline: query.discipline,
            status: query.status,
            sort: query.sort.key(),
            summary: self.project_totals(),
            projects: matching
                .into_iter()
                .map(|project| self.project_entry(project))
                .collect(),
        }
    }

    /// A project counts as overdue when it is flagged so or its deadline has passed.
    pub fn project_totals(&self) -> ProjectListSummary {
        let total_volume: f64 = self.projects.iter().map(|p| p.project_volume).sum();
        let total_invoiced: f64 = self.projects.iter().map(|p| p.invoiced_amount).sum();

        ProjectListSummary {
            total_count: self.projects.len(),
            total_volume,
            total_invoiced,
            average_billing: if total_volume > 0.0 {
                total_invoiced / total_volume * 100.0
            } else {
                0.0
            },
            overdue_count: self
                .projects
                .iter()
                .filter(|project| {
                    project.status == ProjectStatus::Overdue
                        || DeadlineStatus::from_days(days_until(project.deadline, self.now))
                            == DeadlineStatus::Overdue
                })
                .count(),
        }
    }

    fn project_entry(&self, project: &Project) -> ProjectListEntry {
        let days_left = days_until(project.deadline, self.now);
        let deadline_status = DeadlineStatus::from_days(days_left);
        ProjectListEntry {
            id: project.id.clone(),
            project_number: project.project_number.clone(),
            title: project.title.clone(),
            discipline: project.discipline,
            discipline_label: project.discipline.label(),
            project_manager: project.project_manager.clone(),
            status: project.status,
            status_label: project.status.label(),
            deadline: project.deadline,
            days_left,
            deadline_status,
            deadline_label: deadline_status.label(),
            progress: project.progress,
            project_volume: project.project_volume,
            invoiced_amount: project.invoiced_amount,
            billing_progress: billing_progress(project),
        }
    }
}

fn selection(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|raw| {
        !raw.is_empty() && !raw.eq_ignore_ascii_case("all") && !raw.eq_ignore_ascii_case("alle")
    })
}

fn matches_name(raw: &str, name: &str) -> bool {
    raw.to_lowercase() == name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_round_trip() {
        for sort in ProjectSort::ordered() {
            assert_eq!(ProjectSort::parse(sort.key()), Ok(sort));
        }
        assert_eq!(ProjectSort::parse(" Volume-Desc "), Ok(ProjectSort::VolumeDesc));
        assert_eq!(
            ProjectSort::parse("name-asc"),
            Err(PortfolioError::UnknownSort("name-asc".to_string()))
        );
    }

    #[test]
    fn query_accepts_dashboard_codes_and_labels() {
        let query = ProjectQuery::parse(Some("  "), Some("straße"), Some("Überfällig"), None)
            .expect("query parses");
        assert_eq!(query.search, None);
        assert_eq!(query.discipline, Some(Discipline::Road));
        assert_eq!(query.status, Some(ProjectStatus::Overdue));
        assert_eq!(query.sort, ProjectSort::DeadlineAsc);

        let query = ProjectQuery::parse(
            None,
            Some("Alle"),
            Some("in progress"),
            Some("billing-desc"),
        )
        .expect("query parses");
        assert_eq!(query.discipline, None);
        assert_eq!(query.status, Some(ProjectStatus::InProgress));
        assert_eq!(query.sort, ProjectSort::BillingDesc);

        assert_eq!(
            ProjectQuery::parse(None, Some("Hochbau"), None, None),
            Err(PortfolioError::UnknownDiscipline("Hochbau".to_string()))
        );
        assert_eq!(
            ProjectQuery::parse(None, None, Some("pausiert"), None),
            Err(PortfolioError::UnknownStatus("pausiert".to_string()))
        );
    }
}
