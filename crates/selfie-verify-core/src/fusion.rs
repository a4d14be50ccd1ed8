//! Verification fusion: the three-gate pass/fail policy.
//!
//! A conjunctive policy with no partial credit:
//! 1. aggregate evidence: the classification's outdoor verdict;
//! 2. face presence: at least one detection;
//! 3. label corroboration: enough individually-confident outdoor
//!    predictions inside the top-K window.

use crate::domain::{ClassificationResult, FaceDetection};

/// Thresholds for the fusion gates.
#[derive(Debug, Clone)]
pub struct FusionConfig {
    /// Per-label confidence gate used when counting corroborating
    /// outdoor predictions. Defaults to the same value as the aggregate
    /// outdoor threshold but is configured independently.
    pub label_threshold: f32,
    /// Minimum number of top-K outdoor predictions at or above
    /// `label_threshold`.
    pub min_outdoor_labels: usize,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            label_threshold: 0.6,
            min_outdoor_labels: 2,
        }
    }
}

/// Combined verdict produced by [`fuse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// Aggregate outdoor verdict, passed through from classification.
    pub is_outdoor: bool,
    /// Whether any face was reported.
    pub face_detected: bool,
    /// Final decision: all three gates held.
    pub verification_passed: bool,
    /// Aggregate outdoor score.
    pub outdoor_confidence: f32,
    /// Confidence of the highest-priority face, 0 if none.
    pub face_confidence: f32,
}

/// Combines scene and face evidence into the final decision.
#[must_use]
pub fn fuse(
    classification: &ClassificationResult,
    faces: &[FaceDetection],
    config: &FusionConfig,
) -> Verdict {
    let face_detected = !faces.is_empty();
    let face_confidence = faces.first().map_or(0.0, |face| face.confidence);

    let outdoor_label_count = classification
        .predictions
        .iter()
        .filter(|p| p.is_outdoor && p.confidence >= config.label_threshold)
        .count();

    let verification_passed = classification.is_outdoor
        && face_detected
        && outdoor_label_count >= config.min_outdoor_labels;

    Verdict {
        is_outdoor: classification.is_outdoor,
        face_detected,
        verification_passed,
        outdoor_confidence: classification.outdoor_score,
        face_confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScenePrediction;

    fn prediction(label: &str, confidence: f32, is_outdoor: bool) -> ScenePrediction {
        ScenePrediction {
            label: label.to_string(),
            confidence,
            is_outdoor,
        }
    }

    fn face(confidence: f32) -> FaceDetection {
        FaceDetection {
            x: 0.1,
            y: 0.1,
            width: 0.5,
            height: 0.5,
            confidence,
        }
    }

    fn outdoor_classification(predictions: Vec<ScenePrediction>) -> ClassificationResult {
        ClassificationResult {
            predictions,
            outdoor_score: 0.7,
            is_outdoor: true,
        }
    }

    #[test]
    fn test_all_gates_pass() {
        let classification = outdoor_classification(vec![
            prediction("beach", 0.65, true),
            prediction("sky", 0.62, true),
            prediction("office", 0.1, false),
        ]);

        let verdict = fuse(&classification, &[face(0.9)], &FusionConfig::default());
        assert!(verdict.verification_passed);
        assert!(verdict.is_outdoor);
        assert!(verdict.face_detected);
        assert_eq!(verdict.face_confidence, 0.9);
        assert_eq!(verdict.outdoor_confidence, 0.7);
    }

    #[test]
    fn test_label_count_gate_fails_alone() {
        // Aggregate and face gates pass, but only one top-K prediction is
        // an outdoor label above the per-label threshold.
        let classification = outdoor_classification(vec![
            prediction("beach", 0.65, true),
            prediction("sky", 0.3, true),
            prediction("office", 0.05, false),
        ]);

        let verdict = fuse(&classification, &[face(0.9)], &FusionConfig::default());
        assert!(!verdict.verification_passed);
        assert!(verdict.is_outdoor);
        assert!(verdict.face_detected);
    }

    #[test]
    fn test_no_faces_fails_regardless_of_scene() {
        let classification = outdoor_classification(vec![
            prediction("beach", 0.65, true),
            prediction("sky", 0.62, true),
        ]);

        let verdict = fuse(&classification, &[], &FusionConfig::default());
        assert!(!verdict.verification_passed);
        assert!(!verdict.face_detected);
        assert_eq!(verdict.face_confidence, 0.0);
    }

    #[test]
    fn test_indoor_scene_fails_aggregate_gate() {
        let classification = ClassificationResult {
            predictions: vec![
                prediction("beach", 0.65, true),
                prediction("sky", 0.62, true),
            ],
            outdoor_score: 0.4,
            is_outdoor: false,
        };

        let verdict = fuse(&classification, &[face(0.9)], &FusionConfig::default());
        assert!(!verdict.verification_passed);
    }

    #[test]
    fn test_first_face_speaks_for_the_image() {
        let classification = outdoor_classification(vec![]);
        let verdict = fuse(
            &classification,
            &[face(0.55), face(0.95)],
            &FusionConfig::default(),
        );
        assert_eq!(verdict.face_confidence, 0.55);
    }

    #[test]
    fn test_indoor_predictions_never_corroborate() {
        // Confident indoor predictions must not count toward the label gate.
        let classification = outdoor_classification(vec![
            prediction("kitchen", 0.9, false),
            prediction("office", 0.8, false),
            prediction("beach", 0.65, true),
        ]);

        let verdict = fuse(&classification, &[face(0.9)], &FusionConfig::default());
        assert!(!verdict.verification_passed);
    }

    #[test]
    fn test_label_gate_threshold_is_inclusive_and_independent() {
        let classification = outdoor_classification(vec![
            prediction("beach", 0.5, true),
            prediction("sky", 0.5, true),
        ]);

        // At the default 0.6 per-label gate neither prediction counts.
        let strict = fuse(&classification, &[face(0.9)], &FusionConfig::default());
        assert!(!strict.verification_passed);

        // Lowering only the label threshold flips the decision.
        let relaxed = fuse(
            &classification,
            &[face(0.9)],
            &FusionConfig {
                label_threshold: 0.5,
                min_outdoor_labels: 2,
            },
        );
        assert!(relaxed.verification_passed);
    }
}
