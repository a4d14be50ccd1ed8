//! Port definitions for the pipeline collaborators.
//!
//! These traits separate the decision logic from image decoding and
//! model execution, and let the test suite drive the pipeline with
//! synthetic implementations instead of real model artifacts.

mod backend;
mod face;
mod preprocessor;

pub use backend::InferenceBackend;
pub use face::{DisabledFaceDetector, FaceDetector};
pub use preprocessor::ImagePreprocessor;
