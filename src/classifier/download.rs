// Model download helper for ONNX sentiment models.
//
// Fetches each model's config, tokenizer, and quantized ONNX graph from
// HuggingFace into a platform-appropriate directory
// (~/.local/share/undertone/models/ on Linux) so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Files every model needs, as (remote path, local name, show progress).
/// The ONNX graph lives under onnx/ in the Xenova-style repos.
const MODEL_FILES: [(&str, &str, bool); 3] = [
    ("config.json", "config.json", false),
    ("tokenizer.json", "tokenizer.json", false),
    ("onnx/model_quantized.onnx", "model_quantized.onnx", true),
];

/// Returns the default directory for storing model files.
/// Uses the platform data directory: ~/.local/share/undertone/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("undertone")
        .join("models")
}

/// Per-model subdirectory within the base model dir. HuggingFace ids
/// contain a slash, so it becomes "--" on disk.
pub fn model_dir_for(base: &Path, model_id: &str) -> PathBuf {
    base.join(model_id.replace('/', "--"))
}

/// Check whether every file a model needs exists in its directory.
pub fn model_files_present(base: &Path, model_id: &str) -> bool {
    let dir = model_dir_for(base, model_id);
    MODEL_FILES.iter().all(|(_, local, _)| dir.join(local).exists())
}

/// Download one model's files into its subdirectory.
///
/// Shows a progress bar for the ONNX graph. Skips files that already
/// exist. Creates directories as needed.
pub async fn download_model(base: &Path, model_id: &str) -> Result<()> {
    let dir = model_dir_for(base, model_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    println!("\n{model_id}:");

    for (remote, local, show_progress) in MODEL_FILES {
        let dest = dir.join(local);
        if dest.exists() {
            info!(model = model_id, file = local, "Model file already exists, skipping");
            println!("  {local} (already exists)");
            continue;
        }
        println!("  Downloading {local}...");
        let url = format!("https://huggingface.co/{model_id}/resolve/main/{remote}");
        download_file(&url, &dest, show_progress).await?;
    }

    Ok(())
}

/// Download a single file from a URL to a local path.
/// If `show_progress` is true, display a progress bar.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let total_size = response.content_length();

    let pb = if show_progress {
        let pb = if let Some(size) = total_size {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        };
        Some(pb)
    } else {
        None
    };

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    if let Some(ref pb) = pb {
        pb.set_position(bytes.len() as u64);
    }

    std::fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_dir_is_under_undertone() {
        let dir = default_model_dir();
        let path_str = dir.to_string_lossy();
        assert!(
            path_str.contains("undertone") && path_str.contains("models"),
            "Expected path containing undertone/models, got: {path_str}"
        );
    }

    #[test]
    fn test_model_dir_replaces_slash() {
        let base = PathBuf::from("/tmp/test-models");
        let dir = model_dir_for(&base, "Xenova/twitter-roberta-base-sentiment-latest");
        assert_eq!(
            dir,
            base.join("Xenova--twitter-roberta-base-sentiment-latest")
        );
    }

    #[test]
    fn test_model_files_present_false_when_empty() {
        let base = std::env::temp_dir().join("undertone-test-nonexistent");
        assert!(!model_files_present(&base, "someone/some-model"));
    }

    #[test]
    fn test_model_files_present_true_when_files_exist() {
        let base = std::env::temp_dir().join("undertone-download-test");
        let dir = model_dir_for(&base, "someone/tiny-model");
        std::fs::create_dir_all(&dir).unwrap();
        for (_, local, _) in MODEL_FILES {
            std::fs::write(dir.join(local), b"fake").unwrap();
        }

        assert!(model_files_present(&base, "someone/tiny-model"));

        // Cleanup
        std::fs::remove_dir_all(&base).unwrap();
    }
}
