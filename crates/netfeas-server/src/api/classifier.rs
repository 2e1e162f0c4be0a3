use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use netfeas_classifier::ClassifierError;
use netfeas_core::{AddressInput, BatchPredictItem, PredictResponse, TrainRequest, TrainResponse};

use super::AppState;

pub(super) async fn predict(
    State(state): State<AppState>,
    Json(input): Json<AddressInput>,
) -> impl IntoResponse {
    match state.classifier.predict(&input) {
        Ok(prediction) => (StatusCode::OK, Json(PredictResponse::ok(prediction))),
        Err(e) => {
            tracing::debug!(error = %e, "prediction refused");
            (
                status_for(&e),
                Json(PredictResponse::failure(e.to_string())),
            )
        }
    }
}

/// Every element carries its own outcome, so the batch itself always succeeds.
pub(super) async fn predict_batch(
    State(state): State<AppState>,
    Json(inputs): Json<Vec<AddressInput>>,
) -> Json<Vec<BatchPredictItem>> {
    match state.classifier.predict_batch(inputs.clone()) {
        Ok(items) => Json(items),
        Err(e) => {
            let message = e.to_string();
            Json(
                inputs
                    .into_iter()
                    .map(|input| BatchPredictItem {
                        input,
                        prediction: None,
                        error: Some(message.clone()),
                    })
                    .collect(),
            )
        }
    }
}

/// Fits on the blocking pool.
pub(super) async fn train(
    State(state): State<AppState>,
    Json(body): Json<TrainRequest>,
) -> impl IntoResponse {
    let classifier = state.classifier.clone();
    let outcome = tokio::task::spawn_blocking(move || classifier.train(&body.content)).await;

    match outcome {
        Ok(Ok(summary)) => (
            StatusCode::OK,
            Json(TrainResponse {
                success: true,
                message: format!(
                    "model trained on {} rows ({} skipped)",
                    summary.row_count, summary.skipped_rows
                ),
                row_count: summary.row_count,
            }),
        ),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "training table rejected");
            (
                status_for(&e),
                Json(TrainResponse {
                    success: false,
                    message: e.to_string(),
                    row_count: 0,
                }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "training task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TrainResponse {
                    success: false,
                    message: "training task failed".to_string(),
                    row_count: 0,
                }),
            )
        }
    }
}

fn status_for(error: &ClassifierError) -> StatusCode {
    match error {
        ClassifierError::NotTrained => StatusCode::SERVICE_UNAVAILABLE,
        ClassifierError::Csv(_)
        | ClassifierError::MissingColumn(_)
        | ClassifierError::EmptyTrainingSet { .. } => StatusCode::BAD_REQUEST,
    }
}
