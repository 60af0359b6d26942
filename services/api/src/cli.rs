use crate::report::{
    run_portfolio, run_projects, run_screen, PortfolioArgs, ProjectsArgs, ScreenArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ing_plan::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ing-plan-api",
    about = "Screen incoming offers and report on the project portfolio",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the screening report for one offer or for all open requests
    Screen(ScreenArgs),
    /// Print the portfolio KPIs and deadline lists
    Portfolio(PortfolioArgs),
    /// Print the searchable, sortable project table
    Projects(ProjectsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Screen(args) => run_screen(args),
        Command::Portfolio(args) => run_portfolio(args),
        Command::Projects(args) => run_projects(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["ing-plan-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn screen_requires_offer_or_all_requests() {
        assert!(Cli::try_parse_from(["ing-plan-api", "screen"]).is_err());
        assert!(Cli::try_parse_from(["ing-plan-api", "screen", "--all-requests"]).is_ok());

        let cli = Cli::try_parse_from([
            "ing-plan-api",
            "screen",
            "--offer",
            "b1",
            "--at",
            "2026-02-05",
            "--json",
        ])
        .expect("parses");
        let Some(Command::Screen(args)) = cli.command else {
            panic!("expected screen command");
        };
        assert_eq!(args.offer.as_deref(), Some("b1"));
        assert!(args.json);
        assert!(args.at.is_some());
    }

    #[test]
    fn portfolio_rejects_unparseable_timestamp() {
        assert!(Cli::try_parse_from(["ing-plan-api", "portfolio", "--at", "tomorrow"]).is_err());
    }

    #[test]
    fn projects_takes_search_filters_and_sort() {
        let cli = Cli::try_parse_from([
            "ing-plan-api",
            "projects",
            "--search",
            "ten brinke",
            "--discipline",
            "RA",
            "--sort",
            "volume-desc",
        ])
        .expect("parses");
        let Some(Command::Projects(args)) = cli.command else {
            panic!("expected projects command");
        };
        assert_eq!(args.search.as_deref(), Some("ten brinke"));
        assert_eq!(args.discipline.as_deref(), Some("RA"));
        assert_eq!(args.sort.as_deref(), Some("volume-desc"));
        assert!(args.status.is_none());
        assert!(!args.json);
    }
}
