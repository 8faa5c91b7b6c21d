// Sentiment scorer trait — the swap-ready abstraction.
//
// Each scoring method implements this trait. The ensemble treats methods
// uniformly through it, and tests substitute fixed-output or failing
// scorers without touching the rest of the engine.

use anyhow::Result;
use async_trait::async_trait;

use crate::verdict::Scores;

/// The raw output of a single method, before label normalization.
///
/// Each variant is one method's native shape. The normalizer in
/// `scoring::normalize` maps every shape into the canonical three-class
/// distribution.
#[derive(Debug, Clone)]
pub enum MethodResult {
    /// A bounded polarity in [-1.0, 1.0] (lexicon method).
    Polarity(f64),
    /// Polarity in [-1.0, 1.0] plus subjectivity in [0.0, 1.0]
    /// (statistical method).
    Graded { polarity: f64, subjectivity: f64 },
    /// Model-native (label, probability) pairs over every class the model
    /// supports (transformer method). The model id selects the label
    /// mapping table.
    RawClasses {
        model_id: String,
        classes: Vec<(String, f64)>,
    },
    /// An already-canonical distribution (the word-list fallback path).
    Canonical { scores: Scores, fallback: bool },
}

/// Trait for scoring text sentiment. Implementations are async because the
/// transformer method offloads inference to a blocking task.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Score a single text, returning the method's raw output.
    async fn score_text(&self, text: &str) -> Result<MethodResult>;
}
