//! `classifier` command handlers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Subcommand;

use netfeas_classifier::{ClassifierService, TrainingSummary};
use netfeas_client::ClassifierClient;
use netfeas_core::{AddressInput, CapacityValue, FeasibilityClass};

/// Remote training parses and fits the whole table before answering.
const REMOTE_TRAIN_TIMEOUT: Duration = Duration::from_secs(120);
const REMOTE_PREDICT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sub-commands available under `classifier`.
#[derive(Debug, Subcommand)]
pub enum ClassifierCommands {
    /// Fit the classifier on a delimited training table
    Train {
        /// Path to the training table (CSV, semicolon or tab separated)
        path: PathBuf,

        /// Upload to this classifier service instead of fitting locally
        #[arg(long, env = "NETFEAS_CLASSIFIER_URL")]
        classifier_url: Option<String>,
    },
    /// Predict the feasibility class of one structured address
    Predict {
        #[arg(long)]
        province: String,

        #[arg(long)]
        commune: String,

        #[arg(long)]
        quarter: String,

        #[arg(long)]
        way: String,

        #[arg(long)]
        zone: Option<String>,

        /// Installed capacity, number or free text
        #[arg(long)]
        capacity: Option<String>,

        /// Fit a local model on this table and predict with it
        #[arg(long)]
        training_file: Option<PathBuf>,

        /// Ask this classifier service when no training file is given
        #[arg(long, env = "NETFEAS_CLASSIFIER_URL")]
        classifier_url: Option<String>,
    },
}

pub(crate) async fn run(command: ClassifierCommands) -> anyhow::Result<()> {
    match command {
        ClassifierCommands::Train {
            path,
            classifier_url,
        } => run_train(&path, classifier_url.as_deref()).await,
        ClassifierCommands::Predict {
            province,
            commune,
            quarter,
            way,
            zone,
            capacity,
            training_file,
            classifier_url,
        } => {
            let input = AddressInput {
                province,
                commune,
                quarter,
                way,
                zone,
                capacity: capacity.map(CapacityValue::Text),
            };
            run_predict(&input, training_file.as_deref(), classifier_url.as_deref()).await
        }
    }
}

/// Read `path` and fit `service` on it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the table is unusable.
pub(crate) fn train_local(
    service: &ClassifierService,
    path: &Path,
) -> anyhow::Result<TrainingSummary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read training table {}", path.display()))?;
    let summary = service
        .train(&content)
        .with_context(|| format!("failed to train on {}", path.display()))?;
    Ok(summary)
}

async fn run_train(path: &Path, classifier_url: Option<&str>) -> anyhow::Result<()> {
    let output = if let Some(url) = classifier_url {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read training table {}", path.display()))?;
        let client = ClassifierClient::new(url, REMOTE_TRAIN_TIMEOUT)?;
        let response = client.train(&content).await?;
        tracing::info!(url, rows = response.row_count, "remote classifier trained");
        serde_json::to_value(response)?
    } else {
        let service = ClassifierService::new();
        let summary = train_local(&service, path)?;
        summary_json(&summary)
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_predict(
    input: &AddressInput,
    training_file: Option<&Path>,
    classifier_url: Option<&str>,
) -> anyhow::Result<()> {
    let prediction = match (training_file, classifier_url) {
        (Some(path), _) => {
            let service = ClassifierService::new();
            train_local(&service, path)?;
            service.predict(input)?
        }
        (None, Some(url)) => {
            ClassifierClient::new(url, REMOTE_PREDICT_TIMEOUT)?
                .predict(input)
                .await?
        }
        (None, None) => anyhow::bail!(
            "no classifier available: pass --training-file or set NETFEAS_CLASSIFIER_URL"
        ),
    };

    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

fn summary_json(summary: &TrainingSummary) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "rowCount": summary.row_count,
        "skippedRows": summary.skipped_rows,
        "classCounts": {
            "feasible": summary.count_of(FeasibilityClass::Feasible),
            "notFeasible": summary.count_of(FeasibilityClass::NotFeasible),
            "requiresStudy": summary.count_of(FeasibilityClass::RequiresStudy),
        },
    })
}
