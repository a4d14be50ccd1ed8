//! Preprocessed image tensor exchanged between collaborators.

/// A preprocessed image as a flat float sequence.
///
/// Logically NHWC with N=1: `width * height * channels` values in
/// row-major pixel order. The length must equal the inference backend's
/// declared input length; the classifier rejects mismatches before
/// invoking the backend. Tensors are owned by the call stack and never
/// cached or shared between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
}

impl Tensor {
    /// Wraps a flat float buffer.
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Number of values in the tensor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the tensor holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying values.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl From<Vec<f32>> for Tensor {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}
