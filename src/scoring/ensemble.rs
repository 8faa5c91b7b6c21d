// Ensemble aggregator — weighted mean over normalized contributions.

use tracing::debug;

use crate::verdict::{Method, Scores, Verdict};

/// Per-method ensemble weights.
///
/// Defaults are equal. Deployments with accuracy data for a model can
/// bias the transformer up through configuration.
#[derive(Debug, Clone, Copy)]
pub struct EnsembleWeights {
    pub lexicon: f64,
    pub statistical: f64,
    pub transformer: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            lexicon: 1.0,
            statistical: 1.0,
            transformer: 1.0,
        }
    }
}

impl EnsembleWeights {
    /// Weight applied to one method's contribution. `Ensemble` is the
    /// combined output, not a contributor, so it carries no weight.
    pub fn weight_for(&self, method: Method) -> f64 {
        match method {
            Method::Lexicon => self.lexicon,
            Method::Statistical => self.statistical,
            Method::Transformer => self.transformer,
            Method::Ensemble => 0.0,
        }
    }
}

/// One normalized method output, ready to combine.
#[derive(Debug, Clone)]
pub struct Contribution {
    pub method: Method,
    pub scores: Scores,
    pub weight: f64,
    pub fallback: bool,
}

/// Weighted arithmetic mean of the contributions, renormalized.
///
/// With a single contribution this is a pass-through. Zero usable
/// contributions (nothing to combine, or all weights zero) yields the
/// neutral fallback verdict. The result is marked fallback only when
/// every contribution came from a fallback path.
pub fn combine(contributions: &[Contribution], method: Method) -> Verdict {
    let total_weight: f64 = contributions.iter().map(|c| c.weight).sum();
    if contributions.is_empty() || total_weight <= 0.0 {
        return Verdict::neutral_fallback(Some(method));
    }

    let mut positive = 0.0;
    let mut negative = 0.0;
    let mut neutral = 0.0;
    for contribution in contributions {
        debug!(
            method = %contribution.method,
            weight = contribution.weight,
            fallback = contribution.fallback,
            "Combining contribution"
        );
        positive += contribution.scores.positive * contribution.weight;
        negative += contribution.scores.negative * contribution.weight;
        neutral += contribution.scores.neutral * contribution.weight;
    }

    let scores = Scores {
        positive: positive / total_weight,
        negative: negative / total_weight,
        neutral: neutral / total_weight,
    };
    let fallback = contributions.iter().all(|c| c.fallback);
    Verdict::from_scores(scores, fallback, Some(method))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::SentimentLabel;

    fn contribution(method: Method, positive: f64, negative: f64, neutral: f64) -> Contribution {
        Contribution {
            method,
            scores: Scores {
                positive,
                negative,
                neutral,
            },
            weight: 1.0,
            fallback: false,
        }
    }

    #[test]
    fn default_weights_are_equal() {
        let weights = EnsembleWeights::default();
        assert_eq!(weights.weight_for(Method::Lexicon), 1.0);
        assert_eq!(weights.weight_for(Method::Statistical), 1.0);
        assert_eq!(weights.weight_for(Method::Transformer), 1.0);
        assert_eq!(weights.weight_for(Method::Ensemble), 0.0);
    }

    #[test]
    fn equal_weights_average() {
        let verdict = combine(
            &[
                contribution(Method::Lexicon, 0.9, 0.05, 0.05),
                contribution(Method::Statistical, 0.6, 0.2, 0.2),
                contribution(Method::Transformer, 0.9, 0.05, 0.05),
            ],
            Method::Ensemble,
        );
        assert_eq!(verdict.sentiment, SentimentLabel::Positive);
        assert!((verdict.scores.positive - 0.8).abs() < 1e-9);
        assert!((verdict.confidence - 0.8).abs() < 1e-9);
        assert!(!verdict.fallback);
        assert_eq!(verdict.method, Some(Method::Ensemble));
    }

    #[test]
    fn weights_bias_the_mean() {
        let mut heavy = contribution(Method::Transformer, 0.0, 1.0, 0.0);
        heavy.weight = 3.0;
        let verdict = combine(
            &[contribution(Method::Lexicon, 1.0, 0.0, 0.0), heavy],
            Method::Ensemble,
        );
        // (1*1 + 3*0)/4 = 0.25 positive, (0 + 3)/4 = 0.75 negative
        assert_eq!(verdict.sentiment, SentimentLabel::Negative);
        assert!((verdict.scores.negative - 0.75).abs() < 1e-9);
    }

    #[test]
    fn single_contribution_passes_through() {
        let verdict = combine(
            &[contribution(Method::Lexicon, 0.1, 0.7, 0.2)],
            Method::Lexicon,
        );
        assert_eq!(verdict.sentiment, SentimentLabel::Negative);
        assert!((verdict.scores.negative - 0.7).abs() < 1e-9);
        assert_eq!(verdict.confidence, verdict.scores.negative);
    }

    #[test]
    fn no_contributions_is_neutral_fallback() {
        let verdict = combine(&[], Method::Ensemble);
        assert_eq!(verdict.sentiment, SentimentLabel::Neutral);
        assert!(verdict.fallback);
        assert_eq!(verdict.method, Some(Method::Ensemble));
    }

    #[test]
    fn zero_total_weight_is_neutral_fallback() {
        let mut weightless = contribution(Method::Lexicon, 1.0, 0.0, 0.0);
        weightless.weight = 0.0;
        let verdict = combine(&[weightless], Method::Ensemble);
        assert_eq!(verdict.sentiment, SentimentLabel::Neutral);
        assert!(verdict.fallback);
    }

    #[test]
    fn fallback_only_when_all_contributions_fell_back() {
        let mut fell = contribution(Method::Transformer, 0.8, 0.1, 0.1);
        fell.fallback = true;
        let verdict = combine(
            &[contribution(Method::Lexicon, 0.8, 0.1, 0.1), fell.clone()],
            Method::Ensemble,
        );
        assert!(!verdict.fallback);

        let verdict = combine(&[fell], Method::Transformer);
        assert!(verdict.fallback);
    }

    #[test]
    fn positive_wins_ties_over_negative() {
        let verdict = combine(
            &[contribution(Method::Lexicon, 0.45, 0.45, 0.1)],
            Method::Lexicon,
        );
        assert_eq!(verdict.sentiment, SentimentLabel::Positive);
    }

    #[test]
    fn combined_scores_sum_to_one() {
        let verdict = combine(
            &[
                contribution(Method::Lexicon, 0.9, 0.05, 0.05),
                contribution(Method::Statistical, 0.18, 0.12, 0.7),
            ],
            Method::Ensemble,
        );
        assert!((verdict.scores.sum() - 1.0).abs() < 1e-9);
    }
}
