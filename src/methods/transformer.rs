// Transformer method — neural classification with a degradation chain.
//
// Model loading is lazy and single-initialization-guarded: the first
// call tries the primary model, then the smaller fallback model, then
// gives up and lets the word-list heuristic serve every later call.
// An error during a single inference call degrades only that call;
// the loaded model stays in service.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::classifier::traits::{ClassifierProvider, TextClassifier};

use super::heuristic;
use super::traits::{MethodResult, SentimentScorer};

/// Neural sentiment scorer over a lazily loaded classifier.
pub struct TransformerScorer {
    provider: Box<dyn ClassifierProvider>,
    primary_model: String,
    fallback_model: String,
    classifier: OnceCell<Option<Box<dyn TextClassifier>>>,
}

impl TransformerScorer {
    pub fn new(
        provider: Box<dyn ClassifierProvider>,
        primary_model: impl Into<String>,
        fallback_model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            primary_model: primary_model.into(),
            fallback_model: fallback_model.into(),
            classifier: OnceCell::new(),
        }
    }

    /// Load the classifier now instead of on first use. Returns whether a
    /// model is available afterwards.
    pub async fn preload(&self) -> bool {
        self.classifier().await.is_some()
    }

    /// Whether a neural model (primary or fallback) is serving this method.
    pub async fn model_available(&self) -> bool {
        self.classifier().await.is_some()
    }

    /// Lazy, guarded model load. Concurrent first callers share one load
    /// attempt. `None` means both models failed to load; that outcome is
    /// permanent for the process.
    async fn classifier(&self) -> &Option<Box<dyn TextClassifier>> {
        self.classifier
            .get_or_init(|| async {
                match self.provider.provide(&self.primary_model).await {
                    Ok(classifier) => {
                        info!(model = %self.primary_model, "Loaded primary sentiment model");
                        Some(classifier)
                    }
                    Err(err) => {
                        warn!(
                            model = %self.primary_model,
                            error = %err,
                            "Primary model unavailable, trying fallback model"
                        );
                        match self.provider.provide(&self.fallback_model).await {
                            Ok(classifier) => {
                                info!(model = %self.fallback_model, "Loaded fallback sentiment model");
                                Some(classifier)
                            }
                            Err(err) => {
                                warn!(
                                    model = %self.fallback_model,
                                    error = %err,
                                    "No sentiment model available, word-list heuristic will serve"
                                );
                                None
                            }
                        }
                    }
                }
            })
            .await
    }
}

#[async_trait]
impl SentimentScorer for TransformerScorer {
    /// Never fails: with no model loaded, or on an inference error, the
    /// call degrades to the word-list heuristic.
    async fn score_text(&self, text: &str) -> Result<MethodResult> {
        let Some(classifier) = self.classifier().await else {
            return Ok(word_list_result(text));
        };

        let clipped = clip_chars(text, classifier.max_input_chars());
        match classifier.classify(clipped).await {
            Ok(classes) => Ok(MethodResult::RawClasses {
                model_id: classifier.model_id().to_string(),
                classes,
            }),
            Err(err) => {
                warn!(
                    model = %classifier.model_id(),
                    error = %err,
                    "Inference failed, degrading this call to the word-list heuristic"
                );
                Ok(word_list_result(text))
            }
        }
    }
}

fn word_list_result(text: &str) -> MethodResult {
    MethodResult::Canonical {
        scores: heuristic::word_list_scores(text),
        fallback: true,
    }
}

/// Char-boundary-safe prefix of at most `max_chars` characters.
fn clip_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::SentimentLabel;

    #[test]
    fn clip_keeps_short_text() {
        assert_eq!(clip_chars("hello", 10), "hello");
        assert_eq!(clip_chars("hello", 5), "hello");
    }

    #[test]
    fn clip_cuts_long_text() {
        assert_eq!(clip_chars("hello world", 5), "hello");
    }

    #[test]
    fn clip_respects_char_boundaries() {
        assert_eq!(clip_chars("ab🦀cd", 3), "ab🦀");
        assert_eq!(clip_chars("héllo", 2), "hé");
    }

    #[test]
    fn clip_handles_empty() {
        assert_eq!(clip_chars("", 5), "");
        assert_eq!(clip_chars("abc", 0), "");
    }

    #[test]
    fn word_list_result_is_canonical_fallback() {
        match word_list_result("I love this") {
            MethodResult::Canonical { scores, fallback } => {
                assert!(fallback);
                assert_eq!(scores.dominant(), SentimentLabel::Positive);
            }
            other => panic!("Expected Canonical, got {other:?}"),
        }
    }
}
