use chrono::{DateTime, Utc};

use super::domain::{Discipline, Offer, ProjectStatus, ScreeningCategory, ScreeningCategoryId};
use super::policy::category;
use super::relationships::Relationships;
use crate::workflows::calendar::days_until;

/// Everything the category rules read for one offer.
pub(crate) struct ScreeningContext<'a> {
    pub offer: &'a Offer,
    pub discipline: Option<Discipline>,
    pub relationships: Relationships<'a>,
    pub evaluated_at: DateTime<Utc>,
}

const PIPELINE_EFFORT_LIMIT: u64 = 60;

pub(crate) fn score_categories(context: &ScreeningContext<'_>) -> [ScreeningCategory; 6] {
    [
        strategic_fit(context),
        capacity(context),
        profitability(context.offer),
        deadline_risk(context.offer, context.evaluated_at),
        expertise(context),
        client_relationship(context),
    ]
}

pub(crate) fn strategic_fit(context: &ScreeningContext<'_>) -> ScreeningCategory {
    let offer = context.offer;
    let mut score = 50;
    let mut reasons = Vec::new();

    let client_count = context.relationships.client_projects.len();
    if client_count > 0 {
        score += 25;
        reasons.push(format!("Existing client with {client_count} project(s)"));
    } else {
        score -= 10;
        reasons.push("New client without existing projects".to_string());
    }

    if let Some(discipline) = context.discipline {
        if context.relationships.owner_projects_in(discipline) > 0 {
            score += 15;
            reasons.push(format!(
                "{} has experience in {}",
                offer.owner,
                discipline.label()
            ));
        }
    }

    category(
        ScreeningCategoryId::Strategic,
        score,
        format!("{}.", reasons.join(". ")),
    )
}

pub(crate) fn capacity(context: &ScreeningContext<'_>) -> ScreeningCategory {
    let relationships = &context.relationships;
    let active = relationships.active_owner_projects();
    let pipeline = relationships.pipeline_offers.len();
    let pipeline_effort = relationships.pipeline_effort_days();

    let mut score = match active + pipeline {
        0..=2 => 90,
        3 => 75,
        4 => 55,
        5 => 40,
        _ => 25,
    };
    if pipeline_effort > PIPELINE_EFFORT_LIMIT {
        score -= 15;
    }

    category(
        ScreeningCategoryId::Capacity,
        score,
        format!(
            "{} has {active} active project(s) and {pipeline} offer(s) in the pipeline ({pipeline_effort} PT).",
            context.offer.owner
        ),
    )
}

pub(crate) fn profitability(offer: &Offer) -> ScreeningCategory {
    let pt = offer.effort_days;
    let (score, explanation) = match pt {
        15..=40 => (
            85,
            format!("{pt} PT is within the optimal effort range (15-40 PT)."),
        ),
        0..=4 => (
            35,
            format!("{pt} PT is very low, high relative overhead."),
        ),
        5..=14 => (
            55,
            format!("{pt} PT is below the optimum, still acceptable."),
        ),
        41..=60 => (
            75,
            format!("{pt} PT is slightly above the sweet spot, still viable."),
        ),
        _ => (
            65,
            format!("{pt} PT is a large project, higher estimation risk."),
        ),
    };

    category(ScreeningCategoryId::Profitability, score, explanation)
}

pub(crate) fn deadline_risk(offer: &Offer, evaluated_at: DateTime<Utc>) -> ScreeningCategory {
    let days = days_until(offer.due_date, evaluated_at);
    let effort = offer.effort_days;
    let ratio = if effort > 0 {
        days as f64 / f64::from(effort)
    } else {
        0.0
    };

    let (score, explanation) = if days < 0 {
        (
            10,
            format!(
                "Submission deadline already overdue by {} days.",
                days.unsigned_abs()
            ),
        )
    } else if days <= 7 {
        (
            25,
            format!("Only {days} days until submission, very tight timeframe."),
        )
    } else if days <= 14 {
        (
            45,
            format!("{days} days until submission, timeframe is tight."),
        )
    } else if days <= 30 {
        if ratio < 1.5 {
            (
                55,
                format!("{days} days for {effort} PT of effort, tight ratio ({ratio:.1})."),
            )
        } else {
            (
                70,
                format!("{days} days for {effort} PT of effort, enough time (ratio {ratio:.1})."),
            )
        }
    } else {
        (
            90,
            format!("{days} days until submission, comfortable timeframe."),
        )
    };

    category(ScreeningCategoryId::Deadline, score, explanation)
}

pub(crate) fn expertise(context: &ScreeningContext<'_>) -> ScreeningCategory {
    let Some(discipline) = context.discipline else {
        return category(
            ScreeningCategoryId::Expertise,
            50,
            "Discipline could not be determined. Manual review recommended.".to_string(),
        );
    };

    let owner = &context.offer.owner;
    let matching = context.relationships.owner_projects_in(discipline);
    let score = match matching {
        0 => 30,
        1 => 55,
        2 => 75,
        _ => 90,
    };

    let explanation = if matching > 0 {
        format!(
            "{owner} has {matching} project(s) in {}.",
            discipline.label()
        )
    } else {
        format!(
            "{owner} has no projects in {}. Onboarding required.",
            discipline.label()
        )
    };

    category(ScreeningCategoryId::Expertise, score, explanation)
}

pub(crate) fn client_relationship(context: &ScreeningContext<'_>) -> ScreeningCategory {
    let relationships = &context.relationships;
    let count = relationships.client_projects.len();
    if count == 0 {
        return category(
            ScreeningCategoryId::Relationship,
            40,
            "New client, no project history.".to_string(),
        );
    }

    let overdue = relationships.client_projects_with(ProjectStatus::Overdue);
    let completed = relationships.client_projects_with(ProjectStatus::Completed);

    let mut score = 60 + 10 * saturating_i32(count) - 10 * saturating_i32(overdue);
    if completed > 0 {
        score += 5;
    }

    let overdue_note = if overdue > 0 {
        format!(", {overdue} of them overdue")
    } else {
        String::new()
    };

    category(
        ScreeningCategoryId::Relationship,
        score,
        format!(
            "{count} existing project(s) with {}{overdue_note}.",
            context.offer.client
        ),
    )
}

fn saturating_i32(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX / 20)
}
