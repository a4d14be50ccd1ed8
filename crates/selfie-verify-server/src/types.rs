//! Wire types for the HTTP API.

use selfie_verify_core::{FaceDetection, ScenePrediction, VerificationResult};
use serde::{Deserialize, Serialize};

/// Verification request: an image plus a caller-chosen correlation id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// Echoed back verbatim in the response.
    #[serde(default)]
    pub request_id: String,
    /// Base64-encoded JPEG/PNG bytes.
    pub image_data: String,
}

/// Full verification outcome for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Correlation id from the request.
    pub request_id: String,
    /// Aggregate outdoor verdict.
    pub is_outdoor: bool,
    /// Whether any face was reported.
    pub face_detected: bool,
    /// Final pass/fail decision.
    pub verification_passed: bool,
    /// Aggregate outdoor score.
    pub outdoor_confidence: f32,
    /// Confidence of the highest-priority face, 0 if none.
    pub face_confidence: f32,
    /// Top-K scene predictions, descending confidence.
    pub scene_labels: Vec<ScenePrediction>,
    /// All reported face detections.
    pub faces: Vec<FaceDetection>,
    /// End-to-end pipeline duration in milliseconds.
    pub inference_time_ms: u64,
    /// Decode/preprocess duration in milliseconds.
    pub preprocessing_time_ms: u64,
    /// Whether the pipeline ran to completion.
    pub success: bool,
    /// Failure description; empty when `success` is true.
    pub error_message: String,
}

impl VerifyResponse {
    /// Maps an engine result onto the wire, echoing the request id.
    #[must_use]
    pub fn from_result(request_id: String, result: VerificationResult) -> Self {
        Self {
            request_id,
            is_outdoor: result.is_outdoor,
            face_detected: result.face_detected,
            verification_passed: result.verification_passed,
            outdoor_confidence: result.outdoor_confidence,
            face_confidence: result.face_confidence,
            scene_labels: result.scene_labels,
            faces: result.faces,
            inference_time_ms: result.inference_time_ms,
            preprocessing_time_ms: result.preprocessing_time_ms,
            success: result.success,
            error_message: result.error_message,
        }
    }

    /// A failure response produced without running the pipeline.
    #[must_use]
    pub fn failure(request_id: String, message: &str) -> Self {
        Self::from_result(
            request_id,
            VerificationResult {
                error_message: message.to_string(),
                ..VerificationResult::default()
            },
        )
    }
}

/// Health endpoint payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether the engine is ready to serve.
    pub healthy: bool,
    /// Engine version.
    pub version: String,
    /// Seconds since engine construction.
    pub uptime_seconds: u64,
    /// Total requests observed, including failures.
    pub requests_processed: u64,
}

/// Model metadata payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    /// Model name/identifier.
    pub model_name: String,
    /// Model version string.
    pub model_version: String,
    /// Number of scene classes.
    pub num_classes: usize,
    /// Model input width in pixels.
    pub input_width: u32,
    /// Model input height in pixels.
    pub input_height: u32,
    /// All class labels in class-index order.
    pub class_labels: Vec<String>,
}
