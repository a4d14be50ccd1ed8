//! Selfie Verify Server - HTTP surface for the verification engine.
//!
//! Thin glue only: request decoding, response mapping, health and model
//! metadata. All decision logic lives in `selfie-verify-core`.

pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use selfie_verify_core::VerificationEngine;
use tower_http::trace::TraceLayer;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// The verification engine, shared across request tasks.
    pub engine: Arc<VerificationEngine>,
    /// Static model metadata reported by the model-info endpoint.
    pub model: ModelMetadata,
}

/// Static metadata about the loaded scene model.
#[derive(Debug, Clone)]
pub struct ModelMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Model version string.
    pub version: String,
    /// Model input width in pixels.
    pub input_width: u32,
    /// Model input height in pixels.
    pub input_height: u32,
}

/// Builds the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/verify", post(handlers::verify))
        .route("/api/v1/verify/batch", post(handlers::verify_batch))
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/model/info", get(handlers::model_info))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
