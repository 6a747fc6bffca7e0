mod jobs;
mod profile;

use clap::{Parser, Subcommand};
use obliqo_client::ObliqoClient;
use obliqo_core::Decision;
use tracing_subscriber::EnvFilter;

use crate::jobs::JobsCommands;
use crate::profile::ProfileCommands;

#[derive(Debug, Parser)]
#[command(name = "obliqo")]
#[command(about = "Obliqo job matching command line interface")]
struct Cli {
    /// API base URL; overrides OBLIQO_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the API is reachable
    Health,
    /// View and edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Browse scored job matches
    Jobs {
        #[command(subcommand)]
        command: JobsCommands,
    },
    /// Show how many jobs fall under each decision
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = obliqo_core::load_app_config()?;
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, api_url = %config.api_url, "configuration loaded");
    let client = ObliqoClient::new(&config)?;

    match cli.command {
        Commands::Health => run_health(&client).await,
        Commands::Profile { command } => profile::run(client, command).await,
        Commands::Jobs { command } => jobs::run(&client, &config, command).await,
        Commands::Stats => run_stats(&client).await,
    }
}

async fn run_health(client: &ObliqoClient) -> anyhow::Result<()> {
    let health = client.health().await?;
    println!("{}", health.message);
    if let Some(version) = health.version {
        println!("version:     {version}");
    }
    if let Some(jobs_loaded) = health.jobs_loaded {
        println!("jobs loaded: {jobs_loaded}");
    }
    Ok(())
}

async fn run_stats(client: &ObliqoClient) -> anyhow::Result<()> {
    let stats = client.get_stats().await?;

    println!("Total jobs: {}", stats.total_jobs);
    println!();
    println!("{:<8}{:>7}  MEANING", "DECISION", "JOBS");
    for decision in Decision::ALL {
        println!(
            "{:<8}{:>7}  {}",
            decision.as_str(),
            stats.decisions.get(decision),
            decision.describe()
        );
    }
    if !stats.recommendation.is_empty() {
        println!();
        println!("{}", stats.recommendation);
    }
    Ok(())
}

#[cfg(test)]
mod tests;
