//! Error taxonomy for the verification pipeline.

use thiserror::Error;

/// Errors produced by the verification pipeline and its collaborators.
///
/// Per-request variants (`Decode`, `ShapeMismatch`, `Inference`,
/// `NotReady`) are caught at the engine facade and converted into failed
/// results. `ModelLoad` is a construction-time failure and aborts engine
/// startup.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// Tensor length disagrees with the backend's expected input length.
    #[error("input tensor has {actual} values, model expects {expected}")]
    ShapeMismatch {
        /// Input length declared by the backend.
        expected: usize,
        /// Length of the tensor that was submitted.
        actual: usize,
    },

    /// The inference backend failed to produce scores.
    #[error("inference failed: {0}")]
    Inference(String),

    /// The engine was invoked before successful construction.
    #[error("engine is not ready")]
    NotReady,

    /// A model could not be loaded during construction.
    #[error("failed to load model: {0}")]
    ModelLoad(String),
}
