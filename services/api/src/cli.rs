use crate::commands::{run_report, run_score, ReportArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use yggdrasil_green::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Yggdrasil Green Score",
    about = "Serve and inspect lifecycle green scores for Yggdrasil products",
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
    /// Score a single product record against a weight table
    Score(ScoreArgs),
    /// Recompute every product in the data directory and export a CSV report
    Report(ReportArgs),
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
        Command::Score(args) => run_score(args),
        Command::Report(args) => run_report(args),
    }
}
