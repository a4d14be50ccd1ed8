//! Image preprocessor port.

use crate::domain::Tensor;
use crate::error::EngineError;

/// Port for turning raw image bytes into a model-ready tensor.
pub trait ImagePreprocessor: Send + Sync {
    /// Decodes and preprocesses raw image bytes (JPEG/PNG) into the
    /// fixed-shape float tensor the backend expects.
    ///
    /// Must be deterministic: identical bytes yield identical tensors.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Decode`] on malformed or unreadable input.
    fn decode_and_process(&self, bytes: &[u8]) -> Result<Tensor, EngineError>;

    /// Length of the tensors this preprocessor produces.
    ///
    /// Checked against the backend's declared input length when the
    /// engine is assembled.
    fn output_len(&self) -> usize;
}
