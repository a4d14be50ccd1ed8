//! Device selection for inference.

use candle_core::Device;
use tracing::info;

/// Returns the best available inference device.
///
/// Prefers an accelerator when the corresponding feature is enabled
/// (Metal on macOS, CUDA elsewhere), falling back to CPU.
#[must_use]
pub fn get_device() -> Device {
    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            info!("using Metal device for inference");
            return device;
        }
    }

    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            info!("using CUDA device for inference");
            return device;
        }
    }

    info!("using CPU for inference");
    Device::Cpu
}
