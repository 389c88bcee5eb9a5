use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod clean;
mod enrich;
mod filter;
mod listing;
mod merge;
mod output;
mod parse;
mod scrape;
mod stats;
mod telemetry;
mod util;

#[derive(Parser)]
#[command(name = "jobs", about = "Job board harvesting pipeline")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search job boards and write matching listings to CSV
    Scrape(scrape::ScrapeCmd),
    /// Concatenate scrape outputs, tidy fields and drop duplicates
    Clean(clean::CleanCmd),
    /// Attach HR contacts by company name
    Merge(merge::MergeCmd),
    /// Add role, job type, seniority and skill columns
    Enrich(enrich::EnrichCmd),
    /// Summarize any stage's CSV
    Stats(stats::StatsCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // stderr only; RUST_LOG and JOBS_LOG_FORMAT apply
    telemetry::config::init_tracing();

    match cli.command {
        Commands::Scrape(args) => scrape::run(args).await?,
        Commands::Clean(args) => clean::run(args).await?,
        Commands::Merge(args) => merge::run(args).await?,
        Commands::Enrich(args) => enrich::run(args).await?,
        Commands::Stats(args) => stats::run(args).await?,
    }

    Ok(())
}
