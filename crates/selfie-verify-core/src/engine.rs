//! Engine facade: end-to-end verification orchestration.

use std::time::Instant;

use tracing::{info, warn};

use crate::classifier::{ClassifierConfig, SceneClassifier};
use crate::domain::{EngineStats, LabelTaxonomy, VerificationResult};
use crate::error::EngineError;
use crate::fusion::{fuse, FusionConfig};
use crate::ports::{FaceDetector, ImagePreprocessor, InferenceBackend};
use crate::stats::StatsRecorder;

/// Engine-wide configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Aggregate outdoor-score threshold, compared inclusively.
    pub outdoor_threshold: f32,
    /// Per-label confidence gate in fusion.
    pub label_threshold: f32,
    /// Number of ranked predictions to report.
    pub top_k: usize,
    /// Minimum corroborating outdoor labels in the top-K.
    pub min_outdoor_labels: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            outdoor_threshold: 0.6,
            label_threshold: 0.6,
            top_k: 5,
            min_outdoor_labels: 2,
        }
    }
}

/// Owns the pipeline collaborators and exposes the single `verify` entry
/// point invoked concurrently by the RPC layer.
///
/// Construction is fallible and terminal on failure: an engine either
/// assembles completely or never exists. After a successful construction
/// the only shared mutable state is the stats recorder, which is safe
/// under concurrent calls.
pub struct VerificationEngine {
    preprocessor: Box<dyn ImagePreprocessor>,
    classifier: SceneClassifier,
    face_detector: Box<dyn FaceDetector>,
    fusion: FusionConfig,
    stats: StatsRecorder,
}

impl VerificationEngine {
    /// Assembles the engine from its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ModelLoad`] if the preprocessor's output
    /// length disagrees with the backend's input length, or if the
    /// backend's class count disagrees with the taxonomy.
    pub fn new(
        config: EngineConfig,
        preprocessor: Box<dyn ImagePreprocessor>,
        backend: Box<dyn InferenceBackend>,
        face_detector: Box<dyn FaceDetector>,
        taxonomy: LabelTaxonomy,
    ) -> Result<Self, EngineError> {
        if preprocessor.output_len() != backend.input_len() {
            return Err(EngineError::ModelLoad(format!(
                "preprocessor yields {} values, model expects {}",
                preprocessor.output_len(),
                backend.input_len()
            )));
        }

        let classifier = SceneClassifier::new(
            backend,
            taxonomy,
            ClassifierConfig {
                outdoor_threshold: config.outdoor_threshold,
                top_k: config.top_k,
            },
        )?;

        info!(version = Self::version(), "verification engine ready");
        Ok(Self {
            preprocessor,
            classifier,
            face_detector,
            fusion: FusionConfig {
                label_threshold: config.label_threshold,
                min_outdoor_labels: config.min_outdoor_labels,
            },
            stats: StatsRecorder::new(),
        })
    }

    /// Runs the full verification pipeline over raw image bytes.
    ///
    /// Total: every per-request failure is converted into a result with
    /// `success = false` and a readable `error_message`; nothing
    /// propagates to the caller and nothing panics. Stats are recorded
    /// for every call, successful or not.
    pub fn verify(&self, image_bytes: &[u8]) -> VerificationResult {
        let total_start = Instant::now();
        let mut result = VerificationResult::default();

        match self.run_pipeline(image_bytes, &mut result) {
            Ok(()) => result.success = true,
            Err(e) => {
                warn!(error = %e, "verification request failed");
                result.success = false;
                result.error_message = e.to_string();
            }
        }

        result.inference_time_ms = elapsed_ms(total_start);
        self.stats.record(result.success, result.inference_time_ms);
        result
    }

    // Single catch boundary: every per-request failure funnels through
    // the `?`s here and is converted by `verify`.
    fn run_pipeline(
        &self,
        image_bytes: &[u8],
        out: &mut VerificationResult,
    ) -> Result<(), EngineError> {
        if !self.is_ready() {
            return Err(EngineError::NotReady);
        }

        let preprocess_start = Instant::now();
        let tensor = self.preprocessor.decode_and_process(image_bytes)?;
        out.preprocessing_time_ms = elapsed_ms(preprocess_start);

        let classification = self.classifier.classify(&tensor)?;
        let faces = self.face_detector.detect_faces(&tensor)?;

        let verdict = fuse(&classification, &faces, &self.fusion);
        out.is_outdoor = verdict.is_outdoor;
        out.face_detected = verdict.face_detected;
        out.verification_passed = verdict.verification_passed;
        out.outdoor_confidence = verdict.outdoor_confidence;
        out.face_confidence = verdict.face_confidence;
        out.scene_labels = classification.predictions;
        out.faces = faces;
        Ok(())
    }

    /// True iff the scene classifier reports ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.classifier.is_ready()
    }

    /// Snapshot of running statistics.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        self.stats.snapshot()
    }

    /// Class labels the engine scores against, in class-index order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        self.classifier.taxonomy().labels()
    }

    /// Engine version string.
    #[must_use]
    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
