use crate::demo::{run_demo, run_stats_report, DemoArgs, StatsReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruiter_analytics::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Recruiter Analytics",
    about = "Serve and inspect recruiter hiring performance snapshots",
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
    /// Compute recruiter stats from a job export
    Stats {
        #[command(subcommand)]
        command: StatsCommand,
    },
    /// Print a snapshot computed over generated demo data
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum StatsCommand {
    /// Render a performance snapshot for the jobs in a CSV export
    Report(StatsReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV job export to preload for `--recruiter`
    #[arg(long, requires = "recruiter")]
    pub(crate) jobs: Option<PathBuf>,
    /// Recruiter id owning the preloaded jobs
    #[arg(long)]
    pub(crate) recruiter: Option<String>,
    /// Seed the in-memory store with demo data for recruiter `demo`
    #[arg(long)]
    pub(crate) seed_demo: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Stats {
            command: StatsCommand::Report(args),
        } => run_stats_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stats_report_arguments() {
        let cli = Cli::try_parse_from([
            "recruiter-analytics-api",
            "stats",
            "report",
            "--jobs",
            "export.csv",
            "--time-range",
            "14",
            "--as-of",
            "2026-10-19",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Stats {
                command: StatsCommand::Report(args),
            }) => {
                assert_eq!(args.jobs, PathBuf::from("export.csv"));
                assert_eq!(args.time_range, Some(14));
                assert!(args.as_of.is_some());
                assert!(args.json);
            }
            other => panic!("expected stats report command, got {other:?}"),
        }
    }

    #[test]
    fn jobs_flag_requires_recruiter() {
        let result = Cli::try_parse_from(["recruiter-analytics-api", "serve", "--jobs", "x.csv"]);
        assert!(result.is_err());
    }
}
