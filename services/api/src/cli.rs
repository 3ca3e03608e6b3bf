use crate::demo::{run_demo, run_rank, DemoArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use placement_spk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Placement SPK",
    about = "Rank internship candidates against weighted job posting criteria",
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
    /// Rank candidates from local files without starting the server
    Rank(RankArgs),
    /// Score a bundled sample posting and print the ranking
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON file holding an array of job postings to serve
    #[arg(long)]
    pub(crate) postings: Option<PathBuf>,
    /// Candidate CSV export to serve
    #[arg(long)]
    pub(crate) candidates: Option<PathBuf>,
    /// Seed the bundled sample posting and candidates
    #[arg(long)]
    pub(crate) demo_data: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}
