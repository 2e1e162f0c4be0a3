mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use netfeas_classifier::ClassifierService;
use netfeas_core::{AppConfig, Environment, LocalitiesFile};
use netfeas_engine::FeasibilityOrchestrator;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = netfeas_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let localities = match &config.localities_path {
        Some(path) => netfeas_core::load_localities(path)?,
        None => LocalitiesFile::builtin(),
    };

    let classifier = Arc::new(ClassifierService::new());
    train_at_startup(&config, &classifier).await;
    if serves_without_classifier(&config, classifier.is_trained()) {
        tracing::warn!(
            env = %config.env,
            "no classifier model loaded, every assessment will use network analysis"
        );
    }

    let orchestrator =
        FeasibilityOrchestrator::from_config(&config, &localities, Arc::clone(&classifier))?;
    let app = build_app(AppState {
        orchestrator: Arc::new(orchestrator),
        classifier,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "netfeas server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Best effort: a missing or unusable table leaves the server untrained.
async fn train_at_startup(config: &AppConfig, classifier: &Arc<ClassifierService>) {
    let Some(path) = config.training_data_path.clone() else {
        return;
    };

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read training table");
            return;
        }
    };

    let service = Arc::clone(classifier);
    match tokio::task::spawn_blocking(move || service.train(&content)).await {
        Ok(Ok(summary)) => {
            tracing::info!(
                path = %path.display(),
                rows = summary.row_count,
                "startup training complete"
            );
        }
        Ok(Err(e)) => {
            tracing::warn!(path = %path.display(), error = %e, "startup training failed");
        }
        Err(e) => tracing::warn!(error = %e, "startup training task failed"),
    }
}

/// True in production when neither a remote classifier nor a local model
/// is available.
fn serves_without_classifier(config: &AppConfig, locally_trained: bool) -> bool {
    config.env == Environment::Production && config.classifier_url.is_none() && !locally_trained
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
