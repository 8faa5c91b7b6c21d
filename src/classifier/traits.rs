// Classifier traits — a provider turns a model id into a loaded
// classifier, and a classifier turns text into class probabilities.
//
// Providing can fail (missing files, incompatible model); the
// transformer method handles that through its degradation chain.
// Tests substitute both traits to force load and inference failures.

use anyhow::Result;
use async_trait::async_trait;

/// A loaded text classifier.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Model identifier this classifier serves. Downstream label mapping
    /// keys off it.
    fn model_id(&self) -> &str;

    /// Input budget in characters. Callers truncate longer texts before
    /// classification.
    fn max_input_chars(&self) -> usize;

    /// Classify one text, returning a probability for every class the
    /// model supports, not just the top one.
    async fn classify(&self, text: &str) -> Result<Vec<(String, f64)>>;
}

/// Source of classifiers by model id.
#[async_trait]
pub trait ClassifierProvider: Send + Sync {
    async fn provide(&self, model_id: &str) -> Result<Box<dyn TextClassifier>>;
}
