use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ScreeningError;
use crate::workflows::calendar::{parse_calendar_date, DATE_FORMAT};

/// Identifier wrapper for offers in the bid pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferId(pub String);

impl OfferId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier wrapper for delivered or running projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Engineering specialty of a project. Wire values match the dashboard export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Discipline {
    #[serde(rename = "Straße")]
    Road,
    #[serde(rename = "Wasser")]
    Water,
    #[serde(rename = "RA")]
    Remediation,
    #[serde(rename = "Vermessung")]
    Surveying,
}

impl Discipline {
    pub const fn ordered() -> [Self; 4] {
        [Self::Road, Self::Water, Self::Remediation, Self::Surveying]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Road => "Road",
            Self::Water => "Water",
            Self::Remediation => "Remediation",
            Self::Surveying => "Surveying",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Road => "Straße",
            Self::Water => "Wasser",
            Self::Remediation => "RA",
            Self::Surveying => "Vermessung",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "In Bearbeitung")]
    InProgress,
    #[serde(rename = "Warten")]
    Waiting,
    #[serde(rename = "Überfällig")]
    Overdue,
    #[serde(rename = "Nicht begonnen")]
    NotStarted,
    #[serde(rename = "Abgeschlossen")]
    Completed,
}

impl ProjectStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::InProgress,
            Self::Waiting,
            Self::NotStarted,
            Self::Completed,
            Self::Overdue,
        ]
    }

    /// Status as the dashboard stores and displays it.
    pub const fn code(self) -> &'static str {
        match self {
            Self::InProgress => "In Bearbeitung",
            Self::Waiting => "Warten",
            Self::Overdue => "Überfällig",
            Self::NotStarted => "Nicht begonnen",
            Self::Completed => "Abgeschlossen",
        }
    }

    /// Statuses that still bind the project manager's time.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::InProgress | Self::Waiting | Self::NotStarted)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Waiting => "Waiting",
            Self::Overdue => "Overdue",
            Self::NotStarted => "Not Started",
            Self::Completed => "Completed",
        }
    }
}

/// Pipeline stage of an offer, ordered from first contact to submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OfferPhase {
    #[serde(rename = "Anfrage")]
    Request,
    #[serde(rename = "Analyse")]
    Analysis,
    #[serde(rename = "Vorbereitung")]
    Preparation,
    #[serde(rename = "Abgabe")]
    Submission,
}

impl OfferPhase {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Request,
            Self::Analysis,
            Self::Preparation,
            Self::Submission,
        ]
    }

    /// Phases in which an offer still consumes preparation capacity.
    pub const fn is_pipeline(self) -> bool {
        !matches!(self, Self::Submission)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Analysis => "Analysis",
            Self::Preparation => "Preparation",
            Self::Submission => "Submission",
        }
    }
}

/// Validated offer. Construct it from an [`OfferRecord`] so dates, effort and names are checked once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OfferRecord", into = "OfferRecord")]
pub struct Offer {
    pub id: OfferId,
    pub client: String,
    pub title: String,
    pub owner: String,
    pub phase: OfferPhase,
    pub due_date: NaiveDate,
    pub effort_days: u32,
    pub notes: Option<String>,
}

/// Validated project snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProjectRecord", into = "ProjectRecord")]
pub struct Project {
    pub id: ProjectId,
    pub project_number: String,
    pub title: String,
    pub discipline: Discipline,
    pub project_manager: String,
    pub status: ProjectStatus,
    pub deadline: NaiveDate,
    pub progress: u8,
    pub project_volume: f64,
    pub invoiced_amount: f64,
    pub notes: Option<String>,
}

/// Offer exactly as the dashboard stores it, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRecord {
    pub id: String,
    pub client: String,
    pub title: String,
    pub owner: String,
    pub phase: OfferPhase,
    pub due_date: String,
    #[serde(default)]
    pub effort_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Project exactly as the dashboard stores it, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub project_number: String,
    pub title: String,
    pub discipline: Discipline,
    pub project_manager: String,
    pub status: ProjectStatus,
    pub deadline: String,
    pub progress: i64,
    pub project_volume: f64,
    pub invoiced_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TryFrom<OfferRecord> for Offer {
    type Error = ScreeningError;

    fn try_from(record: OfferRecord) -> Result<Self, Self::Error> {
        let due_date =
            parse_calendar_date(&record.due_date).ok_or_else(|| ScreeningError::InvalidDate {
                record: "offer",
                id: record.id.clone(),
                field: "dueDate",
                value: record.due_date.clone(),
            })?;

        let effort_days = match record.effort_days {
            Some(days) => u32::try_from(days).map_err(|_| ScreeningError::InvalidEffort {
                offer_id: record.id.clone(),
                value: days.to_string(),
            })?,
            None => {
                return Err(ScreeningError::InvalidEffort {
                    offer_id: record.id,
                    value: "missing".to_string(),
                })
            }
        };

        let offer = Self {
            id: OfferId(record.id),
            client: record.client,
            title: record.title,
            owner: record.owner,
            phase: record.phase,
            due_date,
            effort_days,
            notes: record.notes,
        };
        offer.validate()?;
        Ok(offer)
    }
}

impl Offer {
    /// Checks the invariants that a date-checked offer still has to meet: named
    /// client, title and owner, and a positive effort estimate.
    pub fn validate(&self) -> Result<(), ScreeningError> {
        for (field, value) in [
            ("client", &self.client),
            ("title", &self.title),
            ("owner", &self.owner),
        ] {
            if value.trim().is_empty() {
                return Err(ScreeningError::BlankField {
                    offer_id: self.id.0.clone(),
                    field,
                });
            }
        }

        if self.effort_days == 0 {
            return Err(ScreeningError::InvalidEffort {
                offer_id: self.id.0.clone(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

impl From<Offer> for OfferRecord {
    fn from(offer: Offer) -> Self {
        Self {
            id: offer.id.0,
            client: offer.client,
            title: offer.title,
            owner: offer.owner,
            phase: offer.phase,
            due_date: offer.due_date.format(DATE_FORMAT).to_string(),
            effort_days: Some(i64::from(offer.effort_days)),
            notes: offer.notes,
        }
    }
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ScreeningError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let deadline =
            parse_calendar_date(&record.deadline).ok_or_else(|| ScreeningError::InvalidDate {
                record: "project",
                id: record.id.clone(),
                field: "deadline",
                value: record.deadline.clone(),
            })?;

        let progress = u8::try_from(record.progress)
            .ok()
            .filter(|progress| *progress <= 100)
            .ok_or_else(|| ScreeningError::InvalidProgress {
                project_id: record.id.clone(),
                value: record.progress,
            })?;

        Ok(Self {
            id: ProjectId(record.id),
            project_number: record.project_number,
            title: record.title,
            discipline: record.discipline,
            project_manager: record.project_manager,
            status: record.status,
            deadline,
            progress,
            project_volume: record.project_volume,
            invoiced_amount: record.invoiced_amount,
            notes: record.notes,
        })
    }
}

impl From<Project> for ProjectRecord {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.0,
            project_number: project.project_number,
            title: project.title,
            discipline: project.discipline,
            project_manager: project.project_manager,
            status: project.status,
            deadline: project.deadline.format(DATE_FORMAT).to_string(),
            progress: i64::from(project.progress),
            project_volume: project.project_volume,
            invoiced_amount: project.invoiced_amount,
            notes: project.notes,
        }
    }
}

/// Fixed set of screening categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningCategoryId {
    Strategic,
    Capacity,
    Profitability,
    Deadline,
    Expertise,
    Relationship,
}

impl ScreeningCategoryId {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Strategic,
            Self::Capacity,
            Self::Profitability,
            Self::Deadline,
            Self::Expertise,
            Self::Relationship,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Strategic => "Strategic Fit",
            Self::Capacity => "Capacity",
            Self::Profitability => "Profitability",
            Self::Deadline => "Deadline Risk",
            Self::Expertise => "Expertise",
            Self::Relationship => "Client Relationship",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Strategic => "strategic",
            Self::Capacity => "capacity",
            Self::Profitability => "profitability",
            Self::Deadline => "deadline",
            Self::Expertise => "expertise",
            Self::Relationship => "relationship",
        }
    }
}

/// Traffic-light classification shared by category and overall scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmpelColor {
    Green,
    Yellow,
    Red,
}

impl AmpelColor {
    pub const fn from_score(score: u8) -> Self {
        if score >= 70 {
            Self::Green
        } else if score >= 40 {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Empfohlen",
            Self::Yellow => "Prüfung empfohlen",
            Self::Red => "Kritisch",
        }
    }
}

/// One scored category with its reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningCategory {
    pub id: ScreeningCategoryId,
    pub name: String,
    pub score: u8,
    pub color: AmpelColor,
    pub explanation: String,
}

/// Screening output for one offer. Derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningResult {
    pub offer_id: OfferId,
    pub overall_score: u8,
    pub overall_color: AmpelColor,
    pub overall_label: String,
    pub summary: String,
    pub categories: [ScreeningCategory; 6],
}

impl ScreeningResult {
    pub fn category(&self, id: ScreeningCategoryId) -> &ScreeningCategory {
        &self.categories[id as usize]
    }
}
