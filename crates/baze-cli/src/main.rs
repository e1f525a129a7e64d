mod review;

use std::path::PathBuf;

use baze_core::Verdict;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "baze-cli")]
#[command(about = "Recruiter review command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List recruiters and their sourcing-stage processes
    Processes,
    /// Show the ranked candidate list
    Candidates {
        /// Recruiter record id or display name
        #[arg(long)]
        recruiter: Option<String>,
        /// Process display id or record id (`all` for every process)
        #[arg(long)]
        process: Option<String>,
        /// Print each candidate's source sections instead of the raw payload
        #[arg(long)]
        sources: bool,
    },
    /// Record a pass/no-pass verdict on one profile
    Decide {
        record_id: String,
        /// `pass` or `no-pass`
        verdict: Verdict,
    },
    /// List every process a worker has been selected for
    Selections {
        worker_id: String,
        /// Worker-id column to filter on
        #[arg(long)]
        field: Option<String>,
    },
    /// Push candidates from a JSON file into the Candidates table
    Sync {
        /// File holding a JSON array of candidates
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = baze_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = review::Context::from_config(&config)?;

    match cli.command {
        Commands::Processes => review::run_processes(&ctx).await,
        Commands::Candidates {
            recruiter,
            process,
            sources,
        } => {
            review::run_candidates(&ctx, recruiter.as_deref(), process.as_deref(), sources).await
        }
        Commands::Decide { record_id, verdict } => {
            review::run_decide(&ctx, &record_id, verdict).await
        }
        Commands::Selections { worker_id, field } => {
            review::run_selections(&ctx, &worker_id, field.as_deref()).await
        }
        Commands::Sync { path } => review::run_sync(&ctx, &path).await,
    }
}

#[cfg(test)]
mod tests;
