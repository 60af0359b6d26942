use crate::infra::{parse_timestamp, snapshot_source};
use chrono::{DateTime, Utc};
use clap::Args;
use ing_plan::config::AppConfig;
use ing_plan::error::AppError;
use ing_plan::workflows::dashboard::DashboardServiceError;
use ing_plan::workflows::portfolio::{
    PortfolioFilter, PortfolioReport, PortfolioSummary, ProjectList, ProjectQuery,
};
use ing_plan::workflows::screening::{Offer, OfferId, ScreeningEngine, ScreeningResult};
use ing_plan::workflows::snapshot::{DashboardSnapshot, SnapshotSource};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScreenArgs {
    /// Id of the offer to screen
    #[arg(long, required_unless_present = "all_requests", conflicts_with = "all_requests")]
    pub(crate) offer: Option<String>,
    /// Screen every offer that is still in the request phase
    #[arg(long)]
    pub(crate) all_requests: bool,
    /// Dashboard JSON export to read instead of APP_SNAPSHOT_PATH or the sample data
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Evaluation time (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) at: Option<DateTime<Utc>>,
    /// Print the screening result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PortfolioArgs {
    /// Dashboard JSON export to read instead of APP_SNAPSHOT_PATH or the sample data
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Evaluation time (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) at: Option<DateTime<Utc>>,
    /// Quick filter: all, critical or manager
    #[arg(long)]
    pub(crate) filter: Option<String>,
    /// Project manager for the manager filter
    #[arg(long)]
    pub(crate) manager: Option<String>,
    /// Print the portfolio summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProjectsArgs {
    /// Dashboard JSON export to read instead of APP_SNAPSHOT_PATH or the sample data
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Evaluation time (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) at: Option<DateTime<Utc>>,
    /// Text matched against project number, title, manager, discipline and status
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Discipline filter (Straße, Wasser, RA, Vermessung or all)
    #[arg(long)]
    pub(crate) discipline: Option<String>,
    /// Status filter (e.g. "In Bearbeitung" or all)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// deadline-asc, deadline-desc, volume-desc, billing-desc or progress-desc
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Print the project list as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        offer,
        all_requests,
        snapshot,
        at,
        json,
    } = args;

    let config = AppConfig::load()?;
    let source = snapshot_source(snapshot, &config);
    let snapshot = source.load()?;
    let evaluated_at = at.unwrap_or_else(Utc::now);

    let results = screen_snapshot(&snapshot, offer, all_requests, evaluated_at)?;

    if json {
        let payload = if all_requests {
            let keyed: BTreeMap<&str, &ScreeningResult> = results
                .iter()
                .map(|result| (result.offer_id.as_str(), result))
                .collect();
            serde_json::to_string_pretty(&keyed)
        } else {
            serde_json::to_string_pretty(&results.first())
        };
        match payload {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Screening payload unavailable: {err}"),
        }
        return Ok(());
    }

    println!("Offer screening");
    println!(
        "Evaluated {} | data source: {}",
        evaluated_at.format("%Y-%m-%d %H:%M UTC"),
        source.describe()
    );
    if results.is_empty() {
        println!("\nNo offers in the request phase.");
    }
    for result in &results {
        render_screening(result, snapshot.offer(&result.offer_id));
    }

    Ok(())
}

pub(crate) fn run_portfolio(args: PortfolioArgs) -> Result<(), AppError> {
    let PortfolioArgs {
        snapshot,
        at,
        filter,
        manager,
        json,
    } = args;

    let filter = PortfolioFilter::parse(filter.as_deref(), manager.as_deref())
        .map_err(DashboardServiceError::from)?;
    let config = AppConfig::load()?;
    let source = snapshot_source(snapshot, &config);
    let snapshot = source.load()?;
    let evaluated_at = at.unwrap_or_else(Utc::now);

    let summary =
        PortfolioReport::new(&snapshot.projects, &snapshot.offers, evaluated_at).summary(&filter);

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Portfolio payload unavailable: {err}"),
        }
        return Ok(());
    }

    println!(
        "Portfolio overview (filter {}, evaluated {})",
        summary.filter,
        evaluated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("Data source: {}", source.describe());
    render_portfolio(&summary);
    Ok(())
}

pub(crate) fn run_projects(args: ProjectsArgs) -> Result<(), AppError> {
    let ProjectsArgs {
        snapshot,
        at,
        search,
        discipline,
        status,
        sort,
        json,
    } = args;

    let query = ProjectQuery::parse(
        search.as_deref(),
        discipline.as_deref(),
        status.as_deref(),
        sort.as_deref(),
    )
    .map_err(DashboardServiceError::from)?;
    let config = AppConfig::load()?;
    let source = snapshot_source(snapshot, &config);
    let snapshot = source.load()?;
    let evaluated_at = at.unwrap_or_else(Utc::now);

    let list =
        PortfolioReport::new(&snapshot.projects, &snapshot.offers, evaluated_at).projects(&query);

    if json {
        match serde_json::to_string_pretty(&list) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Project list payload unavailable: {err}"),
        }
        return Ok(());
    }

    println!(
        "Projects (sort {}, evaluated {})",
        list.sort,
        evaluated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("Data source: {}", source.describe());
    render_projects(&list);
    Ok(())
}

/// Screens the requested offer, or every request-phase offer in id order.
pub(crate) fn screen_snapshot(
    snapshot: &DashboardSnapshot,
    offer: Option<String>,
    all_requests: bool,
    evaluated_at: DateTime<Utc>,
) -> Result<Vec<ScreeningResult>, AppError> {
    let engine = ScreeningEngine::new();

    if all_requests {
        let results = engine.screen_requests(&snapshot.projects, &snapshot.offers, evaluated_at)?;
        return Ok(results.into_values().collect());
    }

    let offer_id = OfferId(offer.unwrap_or_default());
    let offer = snapshot
        .offer(&offer_id)
        .ok_or_else(|| DashboardServiceError::OfferNotFound(offer_id.clone()))?;
    let result = engine.screen(offer, &snapshot.projects, &snapshot.offers, evaluated_at)?;
    Ok(vec![result])
}

fn render_screening(result: &ScreeningResult, offer: Option<&Offer>) {
    match offer {
        Some(offer) => println!(
            "\n{} | {} – {} ({}, {} PT, due {}, phase {})",
            offer.id.as_str(),
            offer.client,
            offer.title,
            offer.owner,
            offer.effort_days,
            offer.due_date,
            offer.phase.label()
        ),
        None => println!("\n{}", result.offer_id.as_str()),
    }

    println!(
        "Overall score: {}/100 ({})",
        result.overall_score, result.overall_label
    );
    for category in &result.categories {
        println!(
            "- {} [{}%]: {} ({}) {}",
            category.name,
            category.id.weight_percent(),
            category.score,
            category.color.label(),
            category.explanation
        );
    }
    println!("{}", result.summary);
}

fn render_portfolio(summary: &PortfolioSummary) {
    let kpis = &summary.kpis;
    println!("\nKey figures");
    println!(
        "- Project volume {:.0} EUR | invoiced {:.0} EUR ({:.1}%)",
        kpis.total_volume, kpis.total_invoiced, kpis.invoiced_percent
    );
    println!(
        "- {} active projects | average progress {}%",
        kpis.active_projects, kpis.average_progress
    );
    println!(
        "- {} offers | {} critical deadlines",
        kpis.total_offers, kpis.critical_deadlines
    );

    let pipeline = &summary.pipeline;
    println!(
        "- Pipeline: {} in analysis, {} in preparation, {} urgent, {} PT total",
        pipeline.in_analysis,
        pipeline.in_preparation,
        pipeline.urgent_offers,
        pipeline.total_effort_days
    );

    println!("\nProjects by discipline");
    for entry in &summary.projects_by_discipline {
        println!(
            "- {}: {} project(s), {:.0} EUR",
            entry.discipline_label, entry.count, entry.volume
        );
    }

    println!("\nOffers by phase");
    for entry in &summary.offers_by_phase {
        println!(
            "- {}: {} offer(s), {} PT",
            entry.phase_label, entry.count, entry.effort_days
        );
    }

    if summary.upcoming_deadlines.is_empty() {
        println!("\nUpcoming project deadlines: none");
    } else {
        println!("\nUpcoming project deadlines");
        for project in &summary.upcoming_deadlines {
            println!(
                "- {} {} ({}), due {} [{}], billed {:.0}%",
                project.project_number,
                project.title,
                project.project_manager,
                project.deadline,
                project.deadline_label,
                project.billing_progress
            );
        }
    }

    if summary.critical_offers.is_empty() {
        println!("\nCritical offers: none");
    } else {
        println!("\nCritical offers");
        for offer in &summary.critical_offers {
            println!(
                "- {} – {} ({}), due {} [{}], {} PT",
                offer.client,
                offer.title,
                offer.owner,
                offer.due_date,
                offer.deadline_label,
                offer.effort_days
            );
        }
    }
}

fn render_projects(list: &ProjectList) {
    let summary = &list.summary;
    println!(
        "{} project(s) | volume {:.0} EUR | invoiced {:.0} EUR ({:.1}%) | {} overdue",
        summary.total_count,
        summary.total_volume,
        summary.total_invoiced,
        summary.average_billing,
        summary.overdue_count
    );

    if list.projects.is_empty() {
        println!("\nNo projects match.");
        return;
    }
    println!();
    for project in &list.projects {
        println!(
            "- {} {} | {} | {} | {} | due {} [{}] | progress {}% | billed {:.0}%",
            project.project_number,
            project.title,
            project.discipline_label,
            project.project_manager,
            project.status_label,
            project.deadline,
            project.deadline_label,
            project.progress,
            project.billing_progress
        );
    }
}
