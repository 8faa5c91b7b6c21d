// Core result types — the canonical output space of the engine.
//
// Every scoring method is normalized into these types. They're separate
// from the method adapters so callers can use them without depending on
// any particular scoring backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The canonical sentiment labels every method is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Tie-break precedence when class masses are exactly equal.
pub const LABEL_PRECEDENCE: [SentimentLabel; 3] = [
    SentimentLabel::Positive,
    SentimentLabel::Negative,
    SentimentLabel::Neutral,
];

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which scoring method to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Weighted combination of all three methods (the default)
    Ensemble,
    /// Rule/dictionary polarity with negation and emphasis handling
    Lexicon,
    /// Averaged word assessments with intensity modifiers
    Statistical,
    /// Pretrained neural classifier with graceful degradation
    Transformer,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Ensemble => "ensemble",
            Method::Lexicon => "lexicon",
            Method::Statistical => "statistical",
            Method::Transformer => "transformer",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = anyhow::Error;

    /// Parse a method selector. This is the one place an unknown method
    /// surfaces as an error — past this boundary the engine is total.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ensemble" => Ok(Method::Ensemble),
            "lexicon" => Ok(Method::Lexicon),
            "statistical" => Ok(Method::Statistical),
            "transformer" => Ok(Method::Transformer),
            other => anyhow::bail!(
                "Unknown method '{other}'. Valid methods: ensemble, lexicon, statistical, transformer"
            ),
        }
    }
}

/// Probability mass for each canonical label. Sums to ~1.0 once normalized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl Scores {
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    /// Total probability mass across the three classes.
    pub fn sum(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    /// Scale the masses to sum to 1.0. A zero-mass distribution becomes
    /// all-neutral rather than dividing by zero.
    pub fn normalized(&self) -> Scores {
        let sum = self.sum();
        if sum <= f64::EPSILON {
            return Scores {
                positive: 0.0,
                negative: 0.0,
                neutral: 1.0,
            };
        }
        Scores {
            positive: self.positive / sum,
            negative: self.negative / sum,
            neutral: self.neutral / sum,
        }
    }

    /// The winning label. Ties break by positive > negative > neutral.
    pub fn dominant(&self) -> SentimentLabel {
        let mut best = LABEL_PRECEDENCE[0];
        for &label in &LABEL_PRECEDENCE[1..] {
            if self.get(label) > self.get(best) {
                best = label;
            }
        }
        best
    }
}

/// The final sentiment result returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub sentiment: SentimentLabel,
    /// Probability mass of the winning label (always equals `scores[sentiment]`).
    pub confidence: f64,
    pub scores: Scores,
    /// True when a degraded path produced this verdict (no model loaded,
    /// inference error, or an empty ensemble).
    pub fallback: bool,
    /// The method that produced this verdict, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
}

impl Verdict {
    /// Build a verdict from a distribution, normalizing it first so the
    /// label/confidence invariants hold by construction.
    pub fn from_scores(scores: Scores, fallback: bool, method: Option<Method>) -> Self {
        let scores = scores.normalized();
        let sentiment = scores.dominant();
        Verdict {
            sentiment,
            confidence: scores.get(sentiment),
            scores,
            fallback,
            method,
        }
    }

    /// The degraded verdict returned when no scoring path produced a signal.
    pub fn neutral_fallback(method: Option<Method>) -> Self {
        Verdict::from_scores(
            Scores {
                positive: 0.15,
                negative: 0.15,
                neutral: 0.7,
            },
            true,
            method,
        )
    }
}

/// Summary statistics over a set of verdicts. Computed on demand — the
/// engine itself persists nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub avg_confidence: f64,
    /// Most common label, ties broken by positive > negative > neutral.
    pub modal_label: SentimentLabel,
    /// How many verdicts came from a degraded path.
    pub fallback_count: usize,
}
