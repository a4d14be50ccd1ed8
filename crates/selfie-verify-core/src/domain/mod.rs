//! Core domain types for selfie verification.

mod labels;
mod result;
mod stats;
mod tensor;

pub use labels::{LabelTaxonomy, INDOOR_LABELS, OUTDOOR_LABELS};
pub use result::{ClassificationResult, FaceDetection, ScenePrediction, VerificationResult};
pub use stats::EngineStats;
pub use tensor::Tensor;
