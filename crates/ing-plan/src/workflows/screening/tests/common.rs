use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::workflows::screening::domain::{
    Discipline, Offer, OfferId, OfferPhase, Project, ProjectId, ProjectStatus,
};
use crate::workflows::screening::ScreeningEngine;

pub(super) fn evaluated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0)
        .single()
        .expect("valid evaluation timestamp")
}

/// Due date that lies exactly `days` whole days after [`evaluated_at`].
pub(super) fn due_in(days: i64) -> NaiveDate {
    evaluated_at().date_naive() + Duration::days(days)
}

pub(super) fn engine() -> ScreeningEngine {
    ScreeningEngine::new()
}

pub(super) fn offer(id: &str) -> Offer {
    Offer {
        id: OfferId(id.to_string()),
        client: "Ten Brinke".to_string(),
        title: "Eitelstraße".to_string(),
        owner: "Arne".to_string(),
        phase: OfferPhase::Request,
        due_date: due_in(20),
        effort_days: 25,
        notes: Some("Freianlagen und Entwässerung".to_string()),
    }
}

pub(super) fn pipeline_offer(id: &str, owner: &str, phase: OfferPhase, effort_days: u32) -> Offer {
    Offer {
        id: OfferId(id.to_string()),
        client: "Knappmann".to_string(),
        title: format!("Angebot {id}"),
        owner: owner.to_string(),
        phase,
        due_date: due_in(40),
        effort_days,
        notes: None,
    }
}

pub(super) fn project(
    id: &str,
    title: &str,
    discipline: Discipline,
    manager: &str,
    status: ProjectStatus,
) -> Project {
    Project {
        id: ProjectId(id.to_string()),
        project_number: format!("IC{id}"),
        title: title.to_string(),
        discipline,
        project_manager: manager.to_string(),
        status,
        deadline: due_in(120),
        progress: 40,
        project_volume: 200_000.0,
        invoiced_amount: 80_000.0,
        notes: None,
    }
}

pub(super) fn ten_brinke_history() -> Vec<Project> {
    vec![project(
        "p2",
        "Ten Brinke – Roederallee",
        Discipline::Road,
        "Arne",
        ProjectStatus::InProgress,
    )]
}

pub(super) fn busy_owner_projects(owner: &str, active: usize) -> Vec<Project> {
    (0..active)
        .map(|index| {
            project(
                &format!("busy-{index}"),
                &format!("Stadt Musterstadt – Los {index}"),
                Discipline::Water,
                owner,
                ProjectStatus::InProgress,
            )
        })
        .collect()
}
