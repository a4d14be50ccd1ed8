//! Scene decision engine.
//!
//! Converts raw per-class scores into ranked predictions and an
//! outdoor/indoor verdict. The displayed top-K and the decision score are
//! computed from different slices of the same distribution: the top-K is
//! what callers see, the full-distribution outdoor sum is what decides.

use std::cmp::Ordering;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::domain::{ClassificationResult, LabelTaxonomy, ScenePrediction, Tensor};
use crate::error::EngineError;
use crate::ports::InferenceBackend;

/// Configuration for the scene classifier.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Aggregate outdoor-score threshold, compared inclusively.
    pub outdoor_threshold: f32,
    /// Number of ranked predictions to emit.
    pub top_k: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            outdoor_threshold: 0.6,
            top_k: 5,
        }
    }
}

/// Ranks class scores and decides whether the scene is outdoor.
pub struct SceneClassifier {
    // Invocations are serialized; the backend is not assumed re-entrant.
    backend: Mutex<Box<dyn InferenceBackend>>,
    taxonomy: LabelTaxonomy,
    config: ClassifierConfig,
    ready: bool,
}

impl SceneClassifier {
    /// Builds a classifier over a backend and label taxonomy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ModelLoad`] if the backend's class count
    /// disagrees with the taxonomy.
    pub fn new(
        backend: Box<dyn InferenceBackend>,
        taxonomy: LabelTaxonomy,
        config: ClassifierConfig,
    ) -> Result<Self, EngineError> {
        let num_classes = backend.num_classes();
        if num_classes != taxonomy.len() {
            return Err(EngineError::ModelLoad(format!(
                "model scores {num_classes} classes, label list has {}",
                taxonomy.len()
            )));
        }
        Ok(Self {
            backend: Mutex::new(backend),
            taxonomy,
            config,
            ready: true,
        })
    }

    /// Whether the classifier finished construction successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The class-label taxonomy this classifier scores against.
    #[must_use]
    pub fn taxonomy(&self) -> &LabelTaxonomy {
        &self.taxonomy
    }

    /// Classifies a preprocessed tensor.
    ///
    /// Returns a neutral zero-confidence result instead of an error when
    /// the classifier is not ready, keeping downstream fusion total.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShapeMismatch`] if the tensor length
    /// disagrees with the backend's input length, or
    /// [`EngineError::Inference`] if the backend invocation fails.
    pub fn classify(&self, input: &Tensor) -> Result<ClassificationResult, EngineError> {
        if !self.ready {
            return Ok(ClassificationResult::neutral());
        }

        let scores = {
            let backend = self.backend.lock().unwrap_or_else(PoisonError::into_inner);
            if input.len() != backend.input_len() {
                return Err(EngineError::ShapeMismatch {
                    expected: backend.input_len(),
                    actual: input.len(),
                });
            }
            backend.invoke(input)?
        };

        // (score, class index) pairs; the stable sort keeps index order
        // on ties, so identical inputs rank identically.
        let mut ranked: Vec<(f32, usize)> = scores
            .iter()
            .enumerate()
            .map(|(index, &score)| (score, index))
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        // The decision score sums the full distribution, not the top-K
        // window.
        let outdoor_score: f32 = scores
            .iter()
            .enumerate()
            .filter(|(index, _)| self.taxonomy.is_outdoor(*index))
            .map(|(_, &score)| score)
            .sum();

        let predictions: Vec<ScenePrediction> = ranked
            .iter()
            .take(self.config.top_k)
            .map(|&(confidence, index)| ScenePrediction {
                label: self.taxonomy.label(index).to_string(),
                confidence,
                is_outdoor: self.taxonomy.is_outdoor(index),
            })
            .collect();

        let is_outdoor = outdoor_score >= self.config.outdoor_threshold;
        debug!(outdoor_score, is_outdoor, "scene classification complete");

        Ok(ClassificationResult {
            predictions,
            outdoor_score,
            is_outdoor,
        })
    }
}
