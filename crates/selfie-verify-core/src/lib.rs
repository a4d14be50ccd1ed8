//! Selfie Verify Core - Decision pipeline for outdoor selfie verification.
//!
//! This crate contains the domain types, the collaborator ports, and the
//! actual decision logic: scene score ranking, the three-gate verification
//! fusion, thread-safe request statistics, and the engine facade invoked
//! concurrently by the RPC layer.

pub mod classifier;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fusion;
pub mod ports;
pub mod stats;

pub use classifier::{ClassifierConfig, SceneClassifier};
pub use domain::{
    ClassificationResult, EngineStats, FaceDetection, LabelTaxonomy, ScenePrediction, Tensor,
    VerificationResult, INDOOR_LABELS, OUTDOOR_LABELS,
};
pub use engine::{EngineConfig, VerificationEngine};
pub use error::EngineError;
pub use fusion::{fuse, FusionConfig, Verdict};
pub use ports::{DisabledFaceDetector, FaceDetector, ImagePreprocessor, InferenceBackend};
pub use stats::StatsRecorder;
