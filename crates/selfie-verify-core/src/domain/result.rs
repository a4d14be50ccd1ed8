//! Classification and verification result types.

use serde::{Deserialize, Serialize};

/// A single ranked scene prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePrediction {
    /// Class label.
    pub label: String,
    /// Model confidence for this class.
    pub confidence: f32,
    /// Whether the class belongs to the outdoor set.
    pub is_outdoor: bool,
}

/// Result of scene classification over one tensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Top-K predictions in descending confidence order.
    pub predictions: Vec<ScenePrediction>,
    /// Sum of confidences over all outdoor classes, computed over the
    /// full distribution independently of K.
    pub outdoor_score: f32,
    /// Whether `outdoor_score` met the aggregate threshold (inclusive).
    pub is_outdoor: bool,
}

impl ClassificationResult {
    /// Neutral zero-confidence result, returned instead of an error when
    /// the classifier is invoked while not ready.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            predictions: Vec::new(),
            outdoor_score: 0.0,
            is_outdoor: false,
        }
    }
}

/// A detected face box with confidence, in the coordinate convention of
/// the providing detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    /// Box origin, horizontal.
    pub x: f32,
    /// Box origin, vertical.
    pub y: f32,
    /// Box width.
    pub width: f32,
    /// Box height.
    pub height: f32,
    /// Detection confidence.
    pub confidence: f32,
}

/// Complete outcome of one verification request.
///
/// Constructed fresh per request and returned to the caller; the engine
/// retains nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Aggregate outdoor verdict from scene classification.
    pub is_outdoor: bool,
    /// Whether the face provider reported at least one face.
    pub face_detected: bool,
    /// Final conjunctive pass/fail decision.
    pub verification_passed: bool,
    /// Aggregate outdoor score.
    pub outdoor_confidence: f32,
    /// Confidence of the highest-priority face, 0 if none.
    pub face_confidence: f32,
    /// Top-K scene predictions, descending confidence.
    pub scene_labels: Vec<ScenePrediction>,
    /// All reported face detections.
    pub faces: Vec<FaceDetection>,
    /// End-to-end pipeline duration.
    pub inference_time_ms: u64,
    /// Duration of the decode/preprocess step.
    pub preprocessing_time_ms: u64,
    /// Whether the pipeline ran to completion.
    pub success: bool,
    /// Human-readable failure description; empty when `success` is true.
    pub error_message: String,
}
