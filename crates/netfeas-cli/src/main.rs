mod classifier;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use netfeas_classifier::ClassifierService;
use netfeas_core::LocalitiesFile;
use netfeas_engine::FeasibilityOrchestrator;

use crate::classifier::ClassifierCommands;

#[derive(Debug, Parser)]
#[command(name = "netfeas-cli")]
#[command(about = "Network connection feasibility command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Assess whether a customer address can be connected
    Assess {
        /// Free-text address, comma separated (province, commune, quarter, way)
        address: String,

        /// Train a local classifier on this table before assessing
        #[arg(long)]
        training_file: Option<PathBuf>,
    },
    /// Train or query the address classifier
    Classifier {
        #[command(subcommand)]
        command: ClassifierCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_log_level()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Assess {
            address,
            training_file,
        } => run_assess(&address, training_file.as_deref()).await,
        Commands::Classifier { command } => classifier::run(command).await,
    }
}

/// `NETFEAS_LOG_LEVEL`, or `warn` when unset.
fn default_log_level() -> String {
    std::env::var("NETFEAS_LOG_LEVEL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

async fn run_assess(address: &str, training_file: Option<&Path>) -> anyhow::Result<()> {
    if address.trim().is_empty() {
        anyhow::bail!("address must not be empty");
    }

    let config = netfeas_core::load_app_config()?;
    let localities = match &config.localities_path {
        Some(path) => netfeas_core::load_localities(path)?,
        None => LocalitiesFile::builtin(),
    };

    let service = Arc::new(ClassifierService::new());
    if let Some(path) = training_file {
        let summary = classifier::train_local(&service, path)?;
        tracing::info!(rows = summary.row_count, "local classifier trained");
    }

    let mut orchestrator =
        FeasibilityOrchestrator::from_config(&config, &localities, Arc::clone(&service))?;
    if training_file.is_some() {
        // A freshly trained local model takes precedence over a remote one.
        orchestrator = orchestrator.with_classifier(service);
    }
    let result = orchestrator.assess(address.trim()).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
