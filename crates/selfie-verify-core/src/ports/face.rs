//! Face evidence port.

use crate::domain::{FaceDetection, Tensor};
use crate::error::EngineError;

/// Port for face detection over a preprocessed tensor.
///
/// Detections are ordered by provider priority; the first entry speaks
/// for the image. An empty list is a legitimate outcome, not an error.
pub trait FaceDetector: Send + Sync {
    /// Detects faces in the preprocessed image.
    ///
    /// # Errors
    ///
    /// Returns an error only if the detector itself fails; finding no
    /// faces yields `Ok(vec![])`.
    fn detect_faces(&self, input: &Tensor) -> Result<Vec<FaceDetection>, EngineError>;
}

/// Face provider that never reports a face.
///
/// This is the shipped default until a real face model lands: with it,
/// every verification fails the face-presence gate while the rest of the
/// pipeline behaves normally.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledFaceDetector;

impl FaceDetector for DisabledFaceDetector {
    fn detect_faces(&self, _input: &Tensor) -> Result<Vec<FaceDetection>, EngineError> {
        Ok(Vec::new())
    }
}
