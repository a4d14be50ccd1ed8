//! ImageNet-style image preprocessing.
//!
//! Decodes JPEG/PNG bytes, resizes to the model input size, converts to
//! RGB and normalizes with ImageNet statistics, yielding the flat NHWC
//! tensor the scene backend consumes.

use image::imageops::FilterType;
use selfie_verify_core::{EngineError, ImagePreprocessor, Tensor};

/// ImageNet channel means.
const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// ImageNet channel standard deviations.
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Preprocessing parameters.
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Model input width.
    pub target_width: u32,
    /// Model input height.
    pub target_height: u32,
    /// Apply mean/std normalization after scaling to `[0, 1]`.
    pub normalize: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            target_width: 224,
            target_height: 224,
            normalize: true,
        }
    }
}

/// Production [`ImagePreprocessor`] over the `image` crate.
///
/// Deterministic: decoding and resampling carry no randomness, so
/// identical bytes always yield identical tensors.
#[derive(Debug, Clone, Default)]
pub struct ImageNetPreprocessor {
    config: PreprocessConfig,
}

impl ImageNetPreprocessor {
    /// Creates a preprocessor with the given parameters.
    #[must_use]
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Model input width.
    #[must_use]
    pub const fn target_width(&self) -> u32 {
        self.config.target_width
    }

    /// Model input height.
    #[must_use]
    pub const fn target_height(&self) -> u32 {
        self.config.target_height
    }
}

impl ImagePreprocessor for ImageNetPreprocessor {
    fn decode_and_process(&self, bytes: &[u8]) -> Result<Tensor, EngineError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| EngineError::Decode(e.to_string()))?;

        let resized = decoded.resize_exact(
            self.config.target_width,
            self.config.target_height,
            FilterType::Triangle,
        );
        let rgb = resized.to_rgb8();

        // Row-major pixel walk keeps the NHWC layout.
        let mut data = Vec::with_capacity(self.output_len());
        for pixel in rgb.pixels() {
            for (channel, &value) in pixel.0.iter().enumerate() {
                let scaled = f32::from(value) / 255.0;
                data.push(if self.config.normalize {
                    (scaled - IMAGENET_MEAN[channel]) / IMAGENET_STD[channel]
                } else {
                    scaled
                });
            }
        }

        Ok(Tensor::new(data))
    }

    fn output_len(&self) -> usize {
        self.config.target_width as usize * self.config.target_height as usize * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_len_matches_config() {
        let preprocessor = ImageNetPreprocessor::default();
        assert_eq!(preprocessor.output_len(), 224 * 224 * 3);

        let small = ImageNetPreprocessor::new(PreprocessConfig {
            target_width: 32,
            target_height: 16,
            normalize: true,
        });
        assert_eq!(small.output_len(), 32 * 16 * 3);
    }

    #[test]
    fn test_garbage_bytes_are_a_decode_error() {
        let preprocessor = ImageNetPreprocessor::default();
        let err = preprocessor
            .decode_and_process(&[0xAB; 64])
            .expect_err("garbage must not decode");
        assert!(matches!(err, EngineError::Decode(_)));
    }
}
