//! HTTP handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use selfie_verify_core::VerificationEngine;
use tracing::debug;

use crate::types::{HealthResponse, ModelInfoResponse, VerifyRequest, VerifyResponse};
use crate::AppState;

/// `POST /api/v1/verify`
pub async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, (StatusCode, String)> {
    Ok(Json(run_verify(&state, request).await?))
}

/// `POST /api/v1/verify/batch`
///
/// Applies the same per-message handling as `verify` to a sequence of
/// requests over one connection, preserving order.
pub async fn verify_batch(
    State(state): State<AppState>,
    Json(requests): Json<Vec<VerifyRequest>>,
) -> Result<Json<Vec<VerifyResponse>>, (StatusCode, String)> {
    let mut responses = Vec::with_capacity(requests.len());
    for request in requests {
        responses.push(run_verify(&state, request).await?);
    }
    Ok(Json(responses))
}

async fn run_verify(
    state: &AppState,
    request: VerifyRequest,
) -> Result<VerifyResponse, (StatusCode, String)> {
    let VerifyRequest {
        request_id,
        image_data,
    } = request;

    let image_bytes = BASE64
        .decode(image_data.as_bytes())
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid image_data: {e}")))?;

    if !state.engine.is_ready() {
        return Ok(VerifyResponse::failure(request_id, "engine not ready"));
    }

    debug!(request_id = %request_id, bytes = image_bytes.len(), "verification request");

    // verify() blocks on model inference; keep it off the async workers.
    let engine = Arc::clone(&state.engine);
    let result = tokio::task::spawn_blocking(move || engine.verify(&image_bytes))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("verification task failed: {e}"),
            )
        })?;

    Ok(VerifyResponse::from_result(request_id, result))
}

/// `GET /api/v1/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.engine.stats();
    Json(HealthResponse {
        healthy: state.engine.is_ready(),
        version: VerificationEngine::version().to_string(),
        uptime_seconds: stats.uptime.as_secs(),
        requests_processed: stats.total_requests,
    })
}

/// `GET /api/v1/model/info`
pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        model_name: state.model.name.clone(),
        model_version: state.model.version.clone(),
        num_classes: state.engine.labels().len(),
        input_width: state.model.input_width,
        input_height: state.model.input_height,
        class_labels: state.engine.labels().to_vec(),
    })
}
