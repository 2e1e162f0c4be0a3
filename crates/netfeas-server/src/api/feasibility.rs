use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use netfeas_core::FeasibilityResult;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct AssessRequest {
    #[serde(default)]
    address: String,
}

/// Runs one assessment. A completed "not feasible" verdict is still a 200;
/// only an inventory failure on the network path is an error.
pub(super) async fn assess_address(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AssessRequest>,
) -> Result<Json<ApiResponse<FeasibilityResult>>, ApiError> {
    let address = body.address.trim();
    if address.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "address must not be empty",
        ));
    }

    let outcome = state.orchestrator.assess(address).await;
    let result = outcome.map_err(|e| {
        tracing::error!(error = %e, "feasibility assessment failed");
        ApiError::new(req_id.0.clone(), "upstream_unavailable", e.to_string())
    })?;

    tracing::info!(
        source = ?result.source,
        feasible = result.is_feasible,
        score = result.analysis.score,
        "assessment completed"
    );

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}
