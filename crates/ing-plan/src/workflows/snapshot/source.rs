use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DashboardSnapshot, SnapshotError};

/// Supplies the project and offer collections to screen against.
pub trait SnapshotSource: Send + Sync {
    fn load(&self) -> Result<DashboardSnapshot, SnapshotError>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotSource {
    snapshot: DashboardSnapshot,
}

impl InMemorySnapshotSource {
    pub fn new(snapshot: DashboardSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn sample() -> Self {
        Self::new(DashboardSnapshot::sample())
    }

    /// Reads `source` once and serves that snapshot from memory afterwards, so request
    /// handlers never touch the filesystem.
    pub fn preload<S>(source: &S) -> Result<Self, SnapshotError>
    where
        S: SnapshotSource + ?Sized,
    {
        source.load().map(Self::new)
    }
}

impl SnapshotSource for InMemorySnapshotSource {
    fn load(&self) -> Result<DashboardSnapshot, SnapshotError> {
        self.snapshot.validate()?;
        Ok(self.snapshot.clone())
    }
}

/// Reads the dashboard's JSON export from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotSource {
    path: PathBuf,
}

impl JsonFileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSnapshotSource {
    fn load(&self) -> Result<DashboardSnapshot, SnapshotError> {
        let snapshot = DashboardSnapshot::from_path(&self.path)?;
        debug!(
            path = %self.path.display(),
            projects = snapshot.projects.len(),
            offers = snapshot.offers.len(),
            "loaded dashboard snapshot"
        );
        Ok(snapshot)
    }
}

/// Source chosen from configuration: a JSON export when a path is set, seed data otherwise.
#[derive(Debug, Clone)]
pub enum ConfiguredSnapshotSource {
    Sample(InMemorySnapshotSource),
    File(JsonFileSnapshotSource),
}

impl ConfiguredSnapshotSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::File(JsonFileSnapshotSource::new(path)),
            None => Self::Sample(InMemorySnapshotSource::sample()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Sample(_) => "built-in sample data".to_string(),
            Self::File(source) => format!("JSON export {}", source.path().display()),
        }
    }
}

impl SnapshotSource for ConfiguredSnapshotSource {
    fn load(&self) -> Result<DashboardSnapshot, SnapshotError> {
        match self {
            Self::Sample(source) => source.load(),
            Self::File(source) => source.load(),
        }
    }
}
