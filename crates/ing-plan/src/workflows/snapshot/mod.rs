//! Project and offer collections as exported by the dashboard.

mod sample;
mod source;

pub use source::{
    ConfiguredSnapshotSource, InMemorySnapshotSource, JsonFileSnapshotSource, SnapshotSource,
};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::workflows::screening::{Offer, OfferId, Project, ProjectId, ScreeningError};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate offer id {}", .0.as_str())]
    DuplicateOffer(OfferId),
    #[error("duplicate project id {}", .0.as_str())]
    DuplicateProject(ProjectId),
    #[error("invalid snapshot record: {0}")]
    InvalidRecord(#[from] ScreeningError),
}

/// Current state of the project list and the offer pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl DashboardSnapshot {
    pub fn new(projects: Vec<Project>, offers: Vec<Offer>) -> Result<Self, SnapshotError> {
        let snapshot = Self { projects, offers };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Seed data shipped with the dashboard.
    pub fn sample() -> Self {
        Self {
            projects: sample::projects(),
            offers: sample::offers(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Rejects snapshots in which two records share an id or an offer cannot be screened.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut offer_ids = HashSet::new();
        for offer in &self.offers {
            offer.validate()?;
            if !offer_ids.insert(&offer.id) {
                return Err(SnapshotError::DuplicateOffer(offer.id.clone()));
            }
        }

        let mut project_ids = HashSet::new();
        for project in &self.projects {
            if !project_ids.insert(&project.id) {
                return Err(SnapshotError::DuplicateProject(project.id.clone()));
            }
        }

        Ok(())
    }

    pub fn offer(&self, id: &OfferId) -> Option<&Offer> {
        self.offers.iter().find(|offer| &offer.id == id)
    }
}
