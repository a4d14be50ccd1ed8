//! Fake implementations of the core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use selfie_verify_core::{
    EngineError, FaceDetection, FaceDetector, ImagePreprocessor, InferenceBackend, Tensor,
};

/// Fake [`ImagePreprocessor`] yielding a fixed-size zero tensor.
///
/// Tracks call counts for assertions and can be switched into a failing
/// mode that reports a decode error on every call.
pub struct FakePreprocessor {
    output_len: usize,
    fail_with: Option<String>,
    calls: Arc<Mutex<usize>>,
}

impl FakePreprocessor {
    /// Creates a preprocessor producing zero tensors of `output_len`.
    #[must_use]
    pub fn new(output_len: usize) -> Self {
        Self {
            output_len,
            fail_with: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates a preprocessor that fails every call with a decode error.
    #[must_use]
    pub fn failing(output_len: usize, message: &str) -> Self {
        Self {
            output_len,
            fail_with: Some(message.to_string()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of times `decode_and_process` was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImagePreprocessor for FakePreprocessor {
    fn decode_and_process(&self, _bytes: &[u8]) -> Result<Tensor, EngineError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls += 1;
        }
        match &self.fail_with {
            Some(message) => Err(EngineError::Decode(message.clone())),
            None => Ok(Tensor::new(vec![0.0; self.output_len])),
        }
    }

    fn output_len(&self) -> usize {
        self.output_len
    }
}

/// Fake [`InferenceBackend`] replaying a fixed score vector.
pub struct FakeBackend {
    scores: Vec<f32>,
    input_len: usize,
    fail_with: Option<String>,
    invocations: Arc<Mutex<usize>>,
}

impl FakeBackend {
    /// Creates a backend with the given input length and score vector.
    #[must_use]
    pub fn new(input_len: usize, scores: Vec<f32>) -> Self {
        Self {
            scores,
            input_len,
            fail_with: None,
            invocations: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates a backend that fails every invocation.
    #[must_use]
    pub fn failing(input_len: usize, num_classes: usize, message: &str) -> Self {
        Self {
            scores: vec![0.0; num_classes],
            input_len,
            fail_with: Some(message.to_string()),
            invocations: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of times `invoke` was called.
    #[must_use]
    pub fn invocations(&self) -> usize {
        *self
            .invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl InferenceBackend for FakeBackend {
    fn num_classes(&self) -> usize {
        self.scores.len()
    }

    fn input_len(&self) -> usize {
        self.input_len
    }

    fn invoke(&self, input: &Tensor) -> Result<Vec<f32>, EngineError> {
        if let Ok(mut invocations) = self.invocations.lock() {
            *invocations += 1;
        }
        if input.len() != self.input_len {
            return Err(EngineError::ShapeMismatch {
                expected: self.input_len,
                actual: input.len(),
            });
        }
        match &self.fail_with {
            Some(message) => Err(EngineError::Inference(message.clone())),
            None => Ok(self.scores.clone()),
        }
    }
}

/// Fake [`FaceDetector`] replaying preset detections.
pub struct FakeFaceDetector {
    faces: Vec<FaceDetection>,
}

impl FakeFaceDetector {
    /// Creates a detector that reports the given faces on every call.
    #[must_use]
    pub fn new(faces: Vec<FaceDetection>) -> Self {
        Self { faces }
    }

    /// Creates a detector that never reports a face.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Convenience: a single centered face at the given confidence.
    #[must_use]
    pub fn single(confidence: f32) -> Self {
        Self::new(vec![FaceDetection {
            x: 0.25,
            y: 0.25,
            width: 0.5,
            height: 0.5,
            confidence,
        }])
    }
}

impl FaceDetector for FakeFaceDetector {
    fn detect_faces(&self, _input: &Tensor) -> Result<Vec<FaceDetection>, EngineError> {
        Ok(self.faces.clone())
    }
}
