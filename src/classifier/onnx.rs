// Local ONNX sentiment classifier.
//
// Runs entirely on the local CPU: no API calls, no rate limits, no
// network dependency after download. Class labels come from the model's
// own config.json (id2label), so one backend serves both the 3-class
// social-media model and the binary SST-2 fallback.
//
// Output: softmax probabilities over every class the model supports.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use serde::Deserialize;
use tracing::debug;

use super::download;
use super::traits::{ClassifierProvider, TextClassifier};

/// Input budget in characters. Matches the transformer token limit
/// closely enough for truncation purposes.
const MAX_INPUT_CHARS: usize = 512;

/// The slice of a HuggingFace config.json this backend needs.
#[derive(Deserialize)]
struct ModelConfig {
    id2label: HashMap<String, String>,
}

/// Local ONNX-based sentiment classifier. Holds the model session and
/// tokenizer behind Arc<Mutex> so inference can be offloaded to
/// spawn_blocking without blocking the async runtime.
pub struct OnnxClassifier {
    // Arc+Mutex because:
    // 1. ort::Session::run takes &mut self, so we need interior mutability
    // 2. spawn_blocking requires 'static, so we need Arc for shared ownership
    // 3. We need Send+Sync for the TextClassifier trait
    // Inference is CPU-bound and serialized through spawn_blocking, so
    // contention is minimal.
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<tokenizers::Tokenizer>,
    labels: Arc<Vec<String>>,
    model_id: String,
}

impl OnnxClassifier {
    /// Load the ONNX model, tokenizer, and label metadata from a directory.
    ///
    /// Expects `model_quantized.onnx`, `tokenizer.json`, and `config.json`
    /// to exist in `model_dir`. Run `undertone download-model` first if
    /// they don't.
    pub fn load(model_id: &str, model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model_quantized.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");
        let config_path = model_dir.join("config.json");

        for path in [&model_path, &tokenizer_path, &config_path] {
            if !path.exists() {
                anyhow::bail!(
                    "Model file not found: {}\nRun `undertone download-model` to download it.",
                    path.display()
                );
            }
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        let labels = load_labels(&config_path)?;

        debug!(
            model = model_id,
            classes = labels.len(),
            "Loaded ONNX sentiment model from {}",
            model_dir.display()
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            labels: Arc::new(labels),
            model_id: model_id.to_string(),
        })
    }
}

#[async_trait]
impl TextClassifier for OnnxClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn max_input_chars(&self) -> usize {
        MAX_INPUT_CHARS
    }

    /// Tokenize, run one forward pass, and softmax the logits into a
    /// probability per class.
    ///
    /// The CPU-bound tokenization and inference are offloaded to
    /// spawn_blocking so they don't block the tokio async runtime.
    async fn classify(&self, text: &str) -> Result<Vec<(String, f64)>> {
        // Clone Arc handles for the spawn_blocking closure ('static requirement)
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let labels = Arc::clone(&self.labels);
        let model_id = self.model_id.clone();
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let encoding = tokenizer
                .encode(text.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

            let seq_len = encoding.get_ids().len();
            let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let attention_mask: Vec<i64> = encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect();

            let shape = [1_i64, seq_len as i64];

            let input_ids_tensor =
                Tensor::from_array((shape, input_ids)).context("Failed to create input_ids tensor")?;
            let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
                .context("Failed to create attention_mask tensor")?;

            let logits = {
                let mut session = session
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

                let outputs = session
                    .run(ort::inputs! {
                        "input_ids" => input_ids_tensor,
                        "attention_mask" => attention_mask_tensor
                    })
                    .context("ONNX inference failed")?;

                // Output shape: [1, num_classes] — raw logits (pre-softmax)
                let (_out_shape, data) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .context("Failed to extract output tensor")?;

                data.to_vec()
            };

            if logits.len() != labels.len() {
                anyhow::bail!(
                    "Model returned {} logits for {} labels",
                    logits.len(),
                    labels.len()
                );
            }

            let probabilities = softmax(&logits);
            let classes: Vec<(String, f64)> = labels
                .iter()
                .cloned()
                .zip(probabilities)
                .collect();

            debug!(
                model = %model_id,
                text_preview = %crate::output::truncate_chars(&text, 50),
                "Classified text"
            );

            Ok(classes)
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

/// Read the ordered class labels out of a model's config.json.
fn load_labels(config_path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: ModelConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    let mut indexed: Vec<(usize, String)> = config
        .id2label
        .into_iter()
        .map(|(index, label)| {
            index
                .parse::<usize>()
                .map(|i| (i, label))
                .map_err(|e| anyhow::anyhow!("Bad id2label index '{}': {}", index, e))
        })
        .collect::<Result<_>>()?;
    indexed.sort_by_key(|(i, _)| *i);

    if indexed.is_empty() {
        anyhow::bail!("No id2label entries in {}", config_path.display());
    }

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

/// Softmax with max subtraction for numeric stability.
fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f64> = logits.iter().map(|&l| f64::from(l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Provider that loads models from the local model directory.
pub struct OnnxProvider {
    base_dir: PathBuf,
}

impl OnnxProvider {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

#[async_trait]
impl ClassifierProvider for OnnxProvider {
    async fn provide(&self, model_id: &str) -> Result<Box<dyn TextClassifier>> {
        let dir = download::model_dir_for(&self.base_dir, model_id);
        let model_id = model_id.to_string();
        // Session construction reads and prepares the whole graph, so it
        // goes through spawn_blocking too.
        let classifier =
            tokio::task::spawn_blocking(move || OnnxClassifier::load(&model_id, &dir))
                .await
                .context("spawn_blocking panicked")??;
        Ok(Box::new(classifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let probabilities = softmax(&[1.0, 2.0, 3.0]);
        let sum: f64 = probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-10, "Softmax should sum to 1.0");
    }

    #[test]
    fn test_softmax_equal_logits_uniform() {
        let probabilities = softmax(&[0.5, 0.5, 0.5]);
        for p in &probabilities {
            assert!((p - 1.0 / 3.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_softmax_preserves_order() {
        let probabilities = softmax(&[-1.0, 0.0, 2.0]);
        assert!(probabilities[0] < probabilities[1]);
        assert!(probabilities[1] < probabilities[2]);
    }

    #[test]
    fn test_softmax_stable_for_large_logits() {
        let probabilities = softmax(&[1000.0, 1001.0]);
        assert!(probabilities.iter().all(|p| p.is_finite()));
        assert!(probabilities[1] > probabilities[0]);
    }

    #[test]
    fn test_load_labels_orders_by_index() {
        let dir = std::env::temp_dir().join("undertone-labels-test");
        std::fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("config.json");
        std::fs::write(
            &config_path,
            r#"{"id2label": {"2": "positive", "0": "negative", "1": "neutral"}}"#,
        )
        .unwrap();

        let labels = load_labels(&config_path).unwrap();
        assert_eq!(labels, vec!["negative", "neutral", "positive"]);

        // Cleanup
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_labels_rejects_missing_mapping() {
        let dir = std::env::temp_dir().join("undertone-labels-empty-test");
        std::fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("config.json");
        std::fs::write(&config_path, r#"{"model_type": "roberta"}"#).unwrap();

        assert!(load_labels(&config_path).is_err());

        // Cleanup
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_fails_without_files() {
        let dir = std::env::temp_dir().join("undertone-no-model-here");
        let result = OnnxClassifier::load("someone/some-model", &dir);
        assert!(result.is_err());
    }
}
