//! Safetensors weight loading for candle models.

use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use safetensors::SafeTensors;
use selfie_verify_core::EngineError;
use tracing::debug;

/// Loads a safetensors file into a `VarBuilder`.
///
/// # Errors
///
/// Returns [`EngineError::ModelLoad`] if the file cannot be read, the
/// safetensors payload is invalid, or a tensor uses an unsupported dtype.
pub fn load_safetensors(
    path: impl AsRef<Path>,
    device: &Device,
) -> Result<VarBuilder<'static>, EngineError> {
    let path = path.as_ref();
    debug!("loading safetensors from {}", path.display());

    let data = std::fs::read(path)
        .map_err(|e| EngineError::ModelLoad(format!("read {}: {e}", path.display())))?;

    let tensors = SafeTensors::deserialize(&data)
        .map_err(|e| EngineError::ModelLoad(format!("parse {}: {e}", path.display())))?;

    let mut tensor_map: HashMap<String, Tensor> = HashMap::new();
    for name in tensors.names() {
        let view = tensors
            .tensor(name)
            .map_err(|e| EngineError::ModelLoad(format!("tensor '{name}': {e}")))?;

        let dtype = convert_dtype(view.dtype())?;
        let shape: Vec<usize> = view.shape().to_vec();

        let tensor = Tensor::from_raw_buffer(view.data(), dtype, &shape, device)
            .map_err(|e| EngineError::ModelLoad(format!("tensor '{name}': {e}")))?;
        tensor_map.insert(name.to_string(), tensor);
    }

    Ok(VarBuilder::from_tensors(tensor_map, DType::F32, device))
}

fn convert_dtype(dtype: safetensors::Dtype) -> Result<DType, EngineError> {
    use safetensors::Dtype as S;
    match dtype {
        S::F32 => Ok(DType::F32),
        S::F64 => Ok(DType::F64),
        S::F16 => Ok(DType::F16),
        S::BF16 => Ok(DType::BF16),
        S::I64 => Ok(DType::I64),
        S::U8 => Ok(DType::U8),
        S::U32 => Ok(DType::U32),
        other => Err(EngineError::ModelLoad(format!(
            "unsupported dtype {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[allow(clippy::expect_used)]
    fn write_test_safetensors() -> NamedTempFile {
        use safetensors::serialize;
        use safetensors::tensor::TensorView;

        let data: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0];
        let bytes: &[u8] = bytemuck::cast_slice(&data);
        let view = TensorView::new(safetensors::Dtype::F32, vec![2, 2], bytes)
            .expect("valid tensor view");

        let tensors = HashMap::from([("weights".to_string(), view)]);
        let serialized = serialize(&tensors, &None).expect("serialize");

        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&serialized).expect("write");
        file
    }

    #[test]
    fn test_load_valid_safetensors() {
        let file = write_test_safetensors();
        assert!(load_safetensors(file.path(), &Device::Cpu).is_ok());
    }

    #[test]
    fn test_missing_file_is_model_load_error() {
        let err = load_safetensors("/nonexistent/scene.safetensors", &Device::Cpu)
            .err()
            .expect("missing file must fail");
        assert!(matches!(err, EngineError::ModelLoad(_)));
    }

    #[test]
    fn test_corrupt_payload_is_model_load_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"not a safetensors payload").expect("write");
        let err = load_safetensors(file.path(), &Device::Cpu)
            .err()
            .expect("corrupt payload must fail");
        assert!(matches!(err, EngineError::ModelLoad(_)));
    }
}
