//! Test support utilities for selfie-verify.
//!
//! Provides fake port implementations and builders for driving the
//! verification pipeline without model artifacts.
//!
//! # Example
//!
//! ```
//! use selfie_verify_core::LabelTaxonomy;
//! use selfie_verify_test_support::{FakeBackend, ScoreVectorBuilder};
//!
//! let taxonomy = LabelTaxonomy::default();
//! let scores = ScoreVectorBuilder::new(&taxonomy)
//!     .with("beach", 0.65)
//!     .with("sky", 0.62)
//!     .build();
//! let backend = FakeBackend::new(16, scores);
//! ```

mod builders;
mod mocks;

pub use builders::{EncodedImageBuilder, ScoreVectorBuilder};
pub use mocks::{FakeBackend, FakeFaceDetector, FakePreprocessor};
