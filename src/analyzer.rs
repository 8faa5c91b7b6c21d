// Sentiment facade — single and batch analysis over the three methods.
//
// `analyze` is total: every failure inside a method resolves to a
// fallback contribution or a skipped one, and zero contributions still
// produce a neutral fallback verdict. Callers never see an error from
// scoring, only from the string boundary (method parsing, CLI args).

use tracing::warn;

use crate::classifier::onnx::OnnxProvider;
use crate::classifier::traits::ClassifierProvider;
use crate::config::Config;
use crate::methods::lexicon::LexiconScorer;
use crate::methods::statistical::StatisticalScorer;
use crate::methods::traits::SentimentScorer;
use crate::methods::transformer::TransformerScorer;
use crate::preprocess::{self, PreprocessOptions};
use crate::scoring::ensemble::{self, Contribution, EnsembleWeights};
use crate::scoring::normalize::{self, NeutralInjection};
use crate::verdict::{Method, SentimentLabel, Stats, Verdict, LABEL_PRECEDENCE};

/// The ensemble verdict together with each contributing method's own
/// verdict, for display surfaces that show the breakdown.
pub struct DetailedAnalysis {
    pub verdict: Verdict,
    pub breakdown: Vec<Verdict>,
}

/// Multi-method sentiment engine.
pub struct SentimentAnalyzer {
    lexicon: LexiconScorer,
    statistical: StatisticalScorer,
    transformer: TransformerScorer,
    weights: EnsembleWeights,
    neutral_injection: NeutralInjection,
    preprocess: bool,
    preprocess_options: PreprocessOptions,
}

impl SentimentAnalyzer {
    /// Build the engine with the default local ONNX classifier provider.
    pub fn new(config: &Config) -> Self {
        let provider = Box::new(OnnxProvider::new(config.model_dir.clone()));
        Self::with_provider(config, provider)
    }

    /// Build the engine around a specific classifier provider.
    pub fn with_provider(config: &Config, provider: Box<dyn ClassifierProvider>) -> Self {
        Self {
            lexicon: LexiconScorer,
            statistical: StatisticalScorer,
            transformer: TransformerScorer::new(
                provider,
                config.primary_model.clone(),
                config.fallback_model.clone(),
            ),
            weights: config.weights,
            neutral_injection: config.neutral_injection,
            preprocess: config.preprocess,
            preprocess_options: PreprocessOptions::default(),
        }
    }

    /// Load the neural classifier now instead of on the first call.
    /// Returns whether a model is available afterwards.
    pub async fn preload(&self) -> bool {
        self.transformer.preload().await
    }

    /// Whether a neural model (primary or fallback) is serving the
    /// transformer method.
    pub async fn model_available(&self) -> bool {
        self.transformer.model_available().await
    }

    /// Analyze one text with the selected method.
    pub async fn analyze(&self, text: &str, method: Method) -> Verdict {
        let text = self.prepared(text);
        match method {
            Method::Ensemble => {
                let contributions = self.ensemble_contributions(&text).await;
                ensemble::combine(&contributions, Method::Ensemble)
            }
            single => {
                let contributions: Vec<Contribution> = self
                    .contribution_for(single, &text, 1.0)
                    .await
                    .into_iter()
                    .collect();
                ensemble::combine(&contributions, single)
            }
        }
    }

    /// Ensemble analysis that also returns each method's own verdict.
    pub async fn analyze_detailed(&self, text: &str) -> DetailedAnalysis {
        let text = self.prepared(text);
        let contributions = self.ensemble_contributions(&text).await;
        let breakdown = contributions
            .iter()
            .map(|c| Verdict::from_scores(c.scores, c.fallback, Some(c.method)))
            .collect();
        let verdict = ensemble::combine(&contributions, Method::Ensemble);
        DetailedAnalysis { verdict, breakdown }
    }

    /// Analyze many texts with one method. Output order matches input
    /// order. Sequential; the CLI layers bounded concurrency on top.
    pub async fn analyze_batch(&self, texts: &[String], method: Method) -> Vec<Verdict> {
        let mut verdicts = Vec::with_capacity(texts.len());
        for text in texts {
            verdicts.push(self.analyze(text, method).await);
        }
        verdicts
    }

    /// Summarize a set of verdicts. Pure aggregation: inputs are read,
    /// never mutated. Modal ties resolve positive > negative > neutral;
    /// an empty set reports neutral.
    pub fn statistics(verdicts: &[Verdict]) -> Stats {
        let total = verdicts.len();
        let mut positive = 0;
        let mut negative = 0;
        let mut neutral = 0;
        let mut fallback_count = 0;
        let mut confidence_sum = 0.0;

        for verdict in verdicts {
            match verdict.sentiment {
                SentimentLabel::Positive => positive += 1,
                SentimentLabel::Negative => negative += 1,
                SentimentLabel::Neutral => neutral += 1,
            }
            if verdict.fallback {
                fallback_count += 1;
            }
            confidence_sum += verdict.confidence;
        }

        let avg_confidence = if total == 0 {
            0.0
        } else {
            confidence_sum / total as f64
        };

        let modal_label = if total == 0 {
            SentimentLabel::Neutral
        } else {
            let count_of = |label: SentimentLabel| match label {
                SentimentLabel::Positive => positive,
                SentimentLabel::Negative => negative,
                SentimentLabel::Neutral => neutral,
            };
            let mut modal = LABEL_PRECEDENCE[0];
            for label in LABEL_PRECEDENCE {
                if count_of(label) > count_of(modal) {
                    modal = label;
                }
            }
            modal
        };

        Stats {
            total,
            positive,
            negative,
            neutral,
            avg_confidence,
            modal_label,
            fallback_count,
        }
    }

    fn prepared(&self, text: &str) -> String {
        if self.preprocess {
            preprocess::clean_for_analysis(text, &self.preprocess_options)
        } else {
            text.to_string()
        }
    }

    /// Run every weighted method for the ensemble. Zero-weight methods
    /// are never called.
    async fn ensemble_contributions(&self, text: &str) -> Vec<Contribution> {
        let mut contributions = Vec::with_capacity(3);
        for method in [Method::Lexicon, Method::Statistical, Method::Transformer] {
            let weight = self.weights.weight_for(method);
            if weight <= 0.0 {
                continue;
            }
            if let Some(contribution) = self.contribution_for(method, text, weight).await {
                contributions.push(contribution);
            }
        }
        contributions
    }

    /// Run one method and normalize its output. An erring method is
    /// skipped with a warning; the caller renormalizes over the rest.
    async fn contribution_for(
        &self,
        method: Method,
        text: &str,
        weight: f64,
    ) -> Option<Contribution> {
        let result = match method {
            Method::Lexicon => self.lexicon.score_text(text).await,
            Method::Statistical => self.statistical.score_text(text).await,
            Method::Transformer => self.transformer.score_text(text).await,
            Method::Ensemble => return None,
        };

        match result {
            Ok(raw) => {
                let (scores, fallback) = normalize::normalize(&raw, &self.neutral_injection);
                Some(Contribution {
                    method,
                    scores,
                    weight,
                    fallback,
                })
            }
            Err(err) => {
                warn!(
                    method = %method,
                    error = %err,
                    "Scoring method failed, skipping its contribution"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(sentiment: SentimentLabel, confidence: f64, fallback: bool) -> Verdict {
        let scores = match sentiment {
            SentimentLabel::Positive => crate::verdict::Scores {
                positive: confidence,
                negative: (1.0 - confidence) / 2.0,
                neutral: (1.0 - confidence) / 2.0,
            },
            SentimentLabel::Negative => crate::verdict::Scores {
                positive: (1.0 - confidence) / 2.0,
                negative: confidence,
                neutral: (1.0 - confidence) / 2.0,
            },
            SentimentLabel::Neutral => crate::verdict::Scores {
                positive: (1.0 - confidence) / 2.0,
                negative: (1.0 - confidence) / 2.0,
                neutral: confidence,
            },
        };
        Verdict::from_scores(scores, fallback, None)
    }

    #[test]
    fn statistics_counts_labels() {
        let verdicts = vec![
            verdict(SentimentLabel::Positive, 0.9, false),
            verdict(SentimentLabel::Positive, 0.7, false),
            verdict(SentimentLabel::Negative, 0.8, true),
        ];
        let stats = SentimentAnalyzer::statistics(&verdicts);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.positive, 2);
        assert_eq!(stats.negative, 1);
        assert_eq!(stats.neutral, 0);
        assert_eq!(stats.fallback_count, 1);
        assert_eq!(stats.modal_label, SentimentLabel::Positive);
        assert!((stats.avg_confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn statistics_modal_tie_prefers_positive() {
        let verdicts = vec![
            verdict(SentimentLabel::Negative, 0.8, false),
            verdict(SentimentLabel::Positive, 0.8, false),
        ];
        let stats = SentimentAnalyzer::statistics(&verdicts);
        assert_eq!(stats.modal_label, SentimentLabel::Positive);
    }

    #[test]
    fn statistics_modal_tie_prefers_negative_over_neutral() {
        let verdicts = vec![
            verdict(SentimentLabel::Neutral, 0.7, false),
            verdict(SentimentLabel::Negative, 0.8, false),
        ];
        let stats = SentimentAnalyzer::statistics(&verdicts);
        assert_eq!(stats.modal_label, SentimentLabel::Negative);
    }

    #[test]
    fn statistics_empty_input() {
        let stats = SentimentAnalyzer::statistics(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_confidence, 0.0);
        assert_eq!(stats.modal_label, SentimentLabel::Neutral);
        assert_eq!(stats.fallback_count, 0);
    }

    #[test]
    fn statistics_does_not_mutate_inputs() {
        let verdicts = vec![verdict(SentimentLabel::Positive, 0.9, false)];
        let before = serde_json::to_string(&verdicts).unwrap();
        let _ = SentimentAnalyzer::statistics(&verdicts);
        let after = serde_json::to_string(&verdicts).unwrap();
        assert_eq!(before, after);
    }
}
