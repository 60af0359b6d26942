use super::domain::{Discipline, Offer, Project, ProjectStatus};

/// Records in the snapshot that relate to the offer under evaluation.
#[derive(Debug, Clone)]
pub struct Relationships<'a> {
    pub client_projects: Vec<&'a Project>,
    pub owner_projects: Vec<&'a Project>,
    pub pipeline_offers: Vec<&'a Offer>,
}

impl<'a> Relationships<'a> {
    pub fn resolve(offer: &Offer, projects: &'a [Project], offers: &'a [Offer]) -> Self {
        Self {
            client_projects: client_projects(&offer.client, projects),
            owner_projects: owner_projects(&offer.owner, projects),
            pipeline_offers: owner_pipeline_offers(offer, offers),
        }
    }

    pub fn active_owner_projects(&self) -> usize {
        self.owner_projects
            .iter()
            .filter(|project| project.status.is_active())
            .count()
    }

    pub fn owner_projects_in(&self, discipline: Discipline) -> usize {
        self.owner_projects
            .iter()
            .filter(|project| project.discipline == discipline)
            .count()
    }

    pub fn pipeline_effort_days(&self) -> u64 {
        self.pipeline_offers
            .iter()
            .map(|offer| u64::from(offer.effort_days))
            .sum()
    }

    pub fn client_projects_with(&self, status: ProjectStatus) -> usize {
        self.client_projects
            .iter()
            .filter(|project| project.status == status)
            .count()
    }
}

/// Projects whose title mentions the client, ignoring case. A blank client matches nothing.
pub fn client_projects<'a>(client: &str, projects: &'a [Project]) -> Vec<&'a Project> {
    let client = client.trim().to_lowercase();
    if client.is_empty() {
        return Vec::new();
    }
    projects
        .iter()
        .filter(|project| project.title.to_lowercase().contains(&client))
        .collect()
}

pub fn owner_projects<'a>(owner: &str, projects: &'a [Project]) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| project.project_manager == owner)
        .collect()
}

/// Other offers of the same owner that are still being prepared.
pub fn owner_pipeline_offers<'a>(offer: &Offer, offers: &'a [Offer]) -> Vec<&'a Offer> {
    offers
        .iter()
        .filter(|candidate| {
            candidate.owner == offer.owner
                && candidate.id != offer.id
                && candidate.phase.is_pipeline()
        })
        .collect()
}
