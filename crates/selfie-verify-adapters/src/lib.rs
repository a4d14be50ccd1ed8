//! Selfie Verify Adapters - Production collaborators.
//!
//! Implements the core ports with real machinery:
//! - ImageNet-style preprocessing over the `image` crate
//! - a candle scene-classification backend loaded from safetensors
//! - scene model file resolution and download

pub mod device;
pub mod loader;
pub mod models;
pub mod preprocess;
pub mod scene_model;

pub use device::get_device;
pub use preprocess::{ImageNetPreprocessor, PreprocessConfig};
pub use scene_model::{CandleSceneBackend, SceneBackendConfig, INPUT_SIZE};
