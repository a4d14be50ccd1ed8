//! Candle scene-classification backend.
//!
//! A compact depthwise-separable CNN over 224×224 RGB input with a
//! softmax head, loaded from safetensors weights.

use std::path::Path;

use candle_core::{Device, Module, Tensor as CandleTensor, D};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, VarBuilder};
use selfie_verify_core::{EngineError, InferenceBackend, Tensor};
use tracing::info;

use crate::loader::load_safetensors;

/// Model input width and height.
pub const INPUT_SIZE: usize = 224;

/// Channel width of the final feature map.
const HEAD_FEATURES: usize = 128;

/// Backend construction parameters.
#[derive(Debug, Clone)]
pub struct SceneBackendConfig {
    /// Number of scene classes the head scores; must match the label
    /// list the classifier is built with.
    pub num_classes: usize,
}

/// Depthwise separable convolution block with ReLU activations.
struct SepConvBlock {
    depthwise: Conv2d,
    pointwise: Conv2d,
}

impl SepConvBlock {
    fn new(
        in_channels: usize,
        out_channels: usize,
        stride: usize,
        vb: &VarBuilder,
    ) -> Result<Self, EngineError> {
        let depthwise = conv2d(
            in_channels,
            in_channels,
            3,
            Conv2dConfig {
                stride,
                padding: 1,
                groups: in_channels,
                ..Conv2dConfig::default()
            },
            vb.pp("depthwise"),
        )
        .map_err(model_err)?;

        let pointwise = conv2d(
            in_channels,
            out_channels,
            1,
            Conv2dConfig::default(),
            vb.pp("pointwise"),
        )
        .map_err(model_err)?;

        Ok(Self {
            depthwise,
            pointwise,
        })
    }
}

impl Module for SepConvBlock {
    fn forward(&self, x: &CandleTensor) -> candle_core::Result<CandleTensor> {
        let h = self.depthwise.forward(x)?.relu()?;
        self.pointwise.forward(&h)?.relu()
    }
}

/// Scene classification network.
pub struct SceneNet {
    stem: Conv2d,
    blocks: Vec<SepConvBlock>,
    head: Linear,
}

impl SceneNet {
    /// Builds the network from weights.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ModelLoad`] if any layer cannot be built
    /// from the provided weights.
    pub fn new(num_classes: usize, vb: &VarBuilder) -> Result<Self, EngineError> {
        let stem = conv2d(
            3,
            16,
            3,
            Conv2dConfig {
                stride: 2,
                padding: 1,
                ..Conv2dConfig::default()
            },
            vb.pp("stem"),
        )
        .map_err(model_err)?;

        let block_config = [
            (16, 32, 2),
            (32, 64, 2),
            (64, HEAD_FEATURES, 2),
            (HEAD_FEATURES, HEAD_FEATURES, 1),
        ];
        let mut blocks = Vec::with_capacity(block_config.len());
        for (i, (in_channels, out_channels, stride)) in block_config.iter().enumerate() {
            blocks.push(SepConvBlock::new(
                *in_channels,
                *out_channels,
                *stride,
                &vb.pp(format!("blocks.{i}")),
            )?);
        }

        let head = linear(HEAD_FEATURES, num_classes, vb.pp("head")).map_err(model_err)?;

        Ok(Self { stem, blocks, head })
    }

    /// Forward pass from NCHW input to per-class probabilities.
    fn forward(&self, x: &CandleTensor) -> candle_core::Result<CandleTensor> {
        let mut h = self.stem.forward(x)?.relu()?;
        for block in &self.blocks {
            h = block.forward(&h)?;
        }
        // Global average pool over the spatial dims.
        let pooled = h.mean(D::Minus1)?.mean(D::Minus1)?;
        let logits = self.head.forward(&pooled)?;
        candle_nn::ops::softmax(&logits, D::Minus1)
    }
}

/// Production [`InferenceBackend`] over a candle [`SceneNet`].
pub struct CandleSceneBackend {
    net: SceneNet,
    device: Device,
    num_classes: usize,
}

impl CandleSceneBackend {
    /// Loads the scene model from a safetensors file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ModelLoad`] if the weights cannot be read
    /// or the network cannot be built from them.
    pub fn from_file(
        path: impl AsRef<Path>,
        config: &SceneBackendConfig,
        device: Device,
    ) -> Result<Self, EngineError> {
        let vb = load_safetensors(path.as_ref(), &device)?;
        let backend = Self::from_var_builder(&vb, config, device)?;
        info!(
            path = %path.as_ref().display(),
            classes = config.num_classes,
            "scene model loaded"
        );
        Ok(backend)
    }

    /// Builds a backend from an existing `VarBuilder`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ModelLoad`] if the network cannot be built.
    pub fn from_var_builder(
        vb: &VarBuilder,
        config: &SceneBackendConfig,
        device: Device,
    ) -> Result<Self, EngineError> {
        let net = SceneNet::new(config.num_classes, vb)?;
        Ok(Self {
            net,
            device,
            num_classes: config.num_classes,
        })
    }
}

impl InferenceBackend for CandleSceneBackend {
    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn input_len(&self) -> usize {
        INPUT_SIZE * INPUT_SIZE * 3
    }

    fn invoke(&self, input: &Tensor) -> Result<Vec<f32>, EngineError> {
        if input.len() != self.input_len() {
            return Err(EngineError::ShapeMismatch {
                expected: self.input_len(),
                actual: input.len(),
            });
        }

        // NHWC on the wire, NCHW for the convolution stack.
        let nhwc = CandleTensor::from_slice(
            input.as_slice(),
            (1, INPUT_SIZE, INPUT_SIZE, 3),
            &self.device,
        )
        .map_err(infer_err)?;
        let nchw = nhwc.permute((0, 3, 1, 2)).map_err(infer_err)?;

        let probs = self.net.forward(&nchw).map_err(infer_err)?;
        probs
            .squeeze(0)
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(infer_err)
    }
}

fn model_err(e: candle_core::Error) -> EngineError {
    EngineError::ModelLoad(e.to_string())
}

fn infer_err(e: candle_core::Error) -> EngineError {
    EngineError::Inference(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::DType;

    const NUM_CLASSES: usize = 51;

    fn zeroed_backend() -> CandleSceneBackend {
        let device = Device::Cpu;
        let vb = VarBuilder::zeros(DType::F32, &device);
        CandleSceneBackend::from_var_builder(
            &vb,
            &SceneBackendConfig {
                num_classes: NUM_CLASSES,
            },
            device,
        )
        .expect("zero-weight network builds")
    }

    #[test]
    fn test_invoke_yields_a_probability_per_class() {
        let backend = zeroed_backend();
        let input = Tensor::new(vec![0.0; backend.input_len()]);

        let scores = backend.invoke(&input).expect("invoke");
        assert_eq!(scores.len(), NUM_CLASSES);

        // The head is softmaxed, so scores form a distribution.
        let sum: f32 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4, "softmax sums to 1, got {sum}");
    }

    #[test]
    fn test_wrong_input_length_is_shape_mismatch() {
        let backend = zeroed_backend();
        let err = backend
            .invoke(&Tensor::new(vec![0.0; 100]))
            .expect_err("wrong length must fail");
        assert!(matches!(err, EngineError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_missing_weights_file_fails_loudly() {
        let err = CandleSceneBackend::from_file(
            "/nonexistent/scene_classifier.safetensors",
            &SceneBackendConfig { num_classes: 51 },
            Device::Cpu,
        )
        .err()
        .expect("missing file must fail");
        assert!(matches!(err, EngineError::ModelLoad(_)));
    }
}
