//! Scene model file resolution and download.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Placeholder checksum indicating verification should be skipped.
const PLACEHOLDER_CHECKSUM: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Downloadable model metadata.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name/identifier.
    pub name: &'static str,
    /// Download URL (GitHub releases).
    pub url: &'static str,
    /// Expected SHA256 hash. All zeros skips verification during development.
    pub sha256: &'static str,
    /// Filename in the models directory.
    pub filename: &'static str,
}

/// The scene classification model.
pub const SCENE_MODEL: ModelInfo = ModelInfo {
    name: "scene-classifier",
    url: "https://github.com/ventus-cv/selfie-verify/releases/download/models-v1/scene_classifier.safetensors",
    sha256: "0000000000000000000000000000000000000000000000000000000000000000",
    filename: "scene_classifier.safetensors",
};

/// Returns the models directory path.
///
/// Uses `XDG_DATA_HOME/selfie-verify/models` or the platform equivalent.
#[must_use]
pub fn models_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("selfie-verify")
        .join("models")
}

/// Returns the expected path of the scene model file.
#[must_use]
pub fn scene_model_path() -> PathBuf {
    models_dir().join(SCENE_MODEL.filename)
}

/// Ensures the scene model is present locally, downloading it if
/// missing, and returns its path.
///
/// # Errors
///
/// Returns an error if the models directory cannot be created, the
/// download fails, or the checksum doesn't match.
pub fn ensure_scene_model() -> Result<PathBuf> {
    let dir = models_dir();
    fs::create_dir_all(&dir).context("failed to create models directory")?;

    let path = dir.join(SCENE_MODEL.filename);
    if path.exists() {
        debug!("model {} already present", SCENE_MODEL.name);
    } else {
        download_model(&SCENE_MODEL, &path)?;
    }

    Ok(path)
}

fn download_model(model: &ModelInfo, path: &Path) -> Result<()> {
    info!("downloading model: {}", model.name);

    let response = reqwest::blocking::get(model.url)
        .with_context(|| format!("failed to download {}", model.name))?;

    if !response.status().is_success() {
        anyhow::bail!("download of {} failed with status {}", model.name, response.status());
    }

    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read response for {}", model.name))?;

    if model.sha256 == PLACEHOLDER_CHECKSUM {
        debug!("skipping checksum verification for {} (placeholder)", model.name);
    } else {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());

        if hash != model.sha256 {
            anyhow::bail!(
                "checksum mismatch for {}: expected {}, got {}. \
                 Delete {} and re-run to fetch a fresh copy.",
                model.name,
                model.sha256,
                hash,
                path.display()
            );
        }
    }

    fs::write(path, &bytes).with_context(|| format!("failed to write {}", model.name))?;

    info!("downloaded {} ({} bytes)", model.name, bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_dir_layout() {
        let dir = models_dir();
        assert!(dir.ends_with("selfie-verify/models"));
    }

    #[test]
    fn test_scene_model_path_filename() {
        let path = scene_model_path();
        assert!(path.ends_with("scene_classifier.safetensors"));
    }
}
