//! Inference backend port.

use crate::domain::Tensor;
use crate::error::EngineError;

/// Port for the scene-classification model runtime.
///
/// Implementations are not assumed re-entrant; the classifier serializes
/// invocations behind a mutex.
pub trait InferenceBackend: Send {
    /// Number of classes the model scores, aligned 1:1 with the label
    /// list in class-index order.
    fn num_classes(&self) -> usize;

    /// Expected input tensor length (width × height × channels).
    fn input_len(&self) -> usize;

    /// Runs the model over the tensor, yielding one confidence score per
    /// class.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShapeMismatch`] if the tensor length
    /// disagrees with [`input_len`](Self::input_len), or
    /// [`EngineError::Inference`] if the invocation itself fails.
    fn invoke(&self, input: &Tensor) -> Result<Vec<f32>, EngineError>;
}
