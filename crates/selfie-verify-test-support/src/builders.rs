//! Builders for score distributions and encoded test images.

use image::{DynamicImage, Rgb, RgbImage};
use selfie_verify_core::LabelTaxonomy;

/// Builds full-length per-class score vectors by label name.
///
/// Unnamed classes score zero, which keeps tests focused on the labels
/// that matter for the decision under test.
pub struct ScoreVectorBuilder {
    labels: Vec<String>,
    scores: Vec<f32>,
}

impl ScoreVectorBuilder {
    /// Starts a zeroed score vector over the taxonomy's classes.
    #[must_use]
    pub fn new(taxonomy: &LabelTaxonomy) -> Self {
        Self {
            labels: taxonomy.labels().to_vec(),
            scores: vec![0.0; taxonomy.len()],
        }
    }

    /// Assigns a score to a label.
    ///
    /// # Panics
    ///
    /// Panics if the label is not in the taxonomy; a typo here is a test
    /// bug worth failing loudly on.
    #[must_use]
    #[allow(clippy::panic)]
    pub fn with(mut self, label: &str, score: f32) -> Self {
        let index = self
            .labels
            .iter()
            .position(|l| l == label)
            .unwrap_or_else(|| panic!("label '{label}' is not in the taxonomy"));
        self.scores[index] = score;
        self
    }

    /// Finishes the vector.
    #[must_use]
    pub fn build(self) -> Vec<f32> {
        self.scores
    }
}

/// Encodes synthetic images to bytes for decoder-facing tests.
pub struct EncodedImageBuilder;

impl EncodedImageBuilder {
    /// A solid-color RGB image encoded as PNG.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn png_rgb(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(rgb));
        encode_png(&DynamicImage::ImageRgb8(img))
    }

    /// A horizontal two-tone RGB image encoded as PNG, for tests that
    /// need spatial variation to survive resizing.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn png_split(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb(left)
            } else {
                Rgb(right)
            }
        });
        encode_png(&DynamicImage::ImageRgb8(img))
    }

    /// A valid PNG cut short, for decode-failure tests.
    #[must_use]
    pub fn truncated_png() -> Vec<u8> {
        let mut bytes = Self::png_rgb(32, 32, [10, 20, 30]);
        bytes.truncate(16);
        bytes
    }

    /// Bytes that are not an image at all.
    #[must_use]
    pub fn garbage(len: usize) -> Vec<u8> {
        vec![0xAB; len]
    }
}

#[allow(clippy::expect_used)]
fn encode_png(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .expect("in-memory PNG encoding cannot fail");
    bytes
}
