// Label normalizer — maps method-native output into the canonical
// three-class distribution.
//
// Scalar polarities become a dominant-share split around a neutral
// band. Model-native class probabilities go through per-model label
// tables (generic prefix matching for unknown models), with a neutral
// injection step for binary models that lack a neutral class.

use crate::methods::traits::MethodResult;
use crate::verdict::{Scores, SentimentLabel};

/// Polarity magnitudes at or below this are neutral.
pub const NEUTRAL_BAND: f64 = 0.05;

/// Neutral mass injection for binary (positive/negative only) models.
///
/// When the two classes land within `margin` of each other the model is
/// effectively undecided, so `mass` is reassigned to neutral and the two
/// classes are rescaled to make room.
#[derive(Debug, Clone, Copy)]
pub struct NeutralInjection {
    pub margin: f64,
    pub mass: f64,
}

impl Default for NeutralInjection {
    fn default() -> Self {
        Self {
            margin: 0.2,
            mass: 0.3,
        }
    }
}

/// Label tables for the models this crate downloads by default.
/// Both tables accept the positional LABEL_k form and the named form,
/// since HuggingFace config metadata varies. Sorted for binary search.
const ROBERTA_SENTIMENT_LABELS: &[(&str, SentimentLabel)] = &[
    ("LABEL_0", SentimentLabel::Negative),
    ("LABEL_1", SentimentLabel::Neutral),
    ("LABEL_2", SentimentLabel::Positive),
    ("negative", SentimentLabel::Negative),
    ("neutral", SentimentLabel::Neutral),
    ("positive", SentimentLabel::Positive),
];

const SST2_LABELS: &[(&str, SentimentLabel)] = &[
    ("LABEL_0", SentimentLabel::Negative),
    ("LABEL_1", SentimentLabel::Positive),
    ("NEGATIVE", SentimentLabel::Negative),
    ("POSITIVE", SentimentLabel::Positive),
];

/// Per-model label tables keyed by model id. Sorted by id.
const MODEL_LABEL_TABLES: &[(&str, &[(&str, SentimentLabel)])] = &[
    (
        "Xenova/distilbert-base-uncased-finetuned-sst-2-english",
        SST2_LABELS,
    ),
    (
        "Xenova/twitter-roberta-base-sentiment-latest",
        ROBERTA_SENTIMENT_LABELS,
    ),
];

/// Convert any method result into (canonical scores, fallback flag).
pub fn normalize(result: &MethodResult, injection: &NeutralInjection) -> (Scores, bool) {
    match result {
        MethodResult::Polarity(v) => (scalar_to_scores(*v), false),
        MethodResult::Graded { polarity, .. } => (scalar_to_scores(*polarity), false),
        MethodResult::RawClasses { model_id, classes } => {
            (classes_to_scores(model_id, classes, injection), false)
        }
        MethodResult::Canonical { scores, fallback } => (scores.normalized(), *fallback),
    }
}

/// Spread a bounded polarity scalar over the three classes.
///
/// Outside the neutral band the matching class takes a share that grows
/// linearly with |v| from 0.5 to 1.0; the remaining mass splits 60/40
/// between neutral and the opposing class. Inside the band neutral takes
/// 0.7 and the rest leans toward the scalar's sign.
pub fn scalar_to_scores(v: f64) -> Scores {
    if v > NEUTRAL_BAND {
        let dominant = 0.5 + 0.5 * v.abs().min(1.0);
        let remainder = 1.0 - dominant;
        Scores {
            positive: dominant,
            negative: remainder * 0.4,
            neutral: remainder * 0.6,
        }
    } else if v < -NEUTRAL_BAND {
        let dominant = 0.5 + 0.5 * v.abs().min(1.0);
        let remainder = 1.0 - dominant;
        Scores {
            positive: remainder * 0.4,
            negative: dominant,
            neutral: remainder * 0.6,
        }
    } else if v >= 0.0 {
        Scores {
            positive: 0.18,
            negative: 0.12,
            neutral: 0.7,
        }
    } else {
        Scores {
            positive: 0.12,
            negative: 0.18,
            neutral: 0.7,
        }
    }
}

/// Map model-native (label, probability) pairs onto the canonical classes.
///
/// Probabilities landing on the same canonical label are summed; labels
/// that map to nothing are dropped and the remainder renormalized. When no
/// label maps at all the read is fully neutral. Models without a neutral
/// class get the neutral injection treatment when their two classes are
/// close.
pub fn classes_to_scores(
    model_id: &str,
    classes: &[(String, f64)],
    injection: &NeutralInjection,
) -> Scores {
    let mut scores = Scores {
        positive: 0.0,
        negative: 0.0,
        neutral: 0.0,
    };
    let mut has_neutral_class = false;

    for (raw, probability) in classes {
        let Some(label) = canonical_label(model_id, raw) else {
            continue;
        };
        if label == SentimentLabel::Neutral {
            has_neutral_class = true;
        }
        match label {
            SentimentLabel::Positive => scores.positive += probability,
            SentimentLabel::Negative => scores.negative += probability,
            SentimentLabel::Neutral => scores.neutral += probability,
        }
    }

    if scores.sum() <= f64::EPSILON {
        return Scores {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        };
    }

    let mut scores = scores.normalized();

    if !has_neutral_class {
        let diff = (scores.positive - scores.negative).abs();
        if diff < injection.margin {
            let rescale = 1.0 - injection.mass;
            scores.positive *= rescale;
            scores.negative *= rescale;
            scores.neutral = injection.mass;
        }
    }

    scores
}

/// Resolve a raw model label. Known models use their exact table; unknown
/// models fall back to prefix matching on the lowercased label.
fn canonical_label(model_id: &str, raw: &str) -> Option<SentimentLabel> {
    if let Ok(i) = MODEL_LABEL_TABLES.binary_search_by(|(id, _)| id.cmp(&model_id)) {
        let table = MODEL_LABEL_TABLES[i].1;
        return table
            .binary_search_by(|(label, _)| label.cmp(&raw))
            .ok()
            .map(|j| table[j].1);
    }

    let lowered = raw.to_lowercase();
    if lowered.starts_with("pos") {
        Some(SentimentLabel::Positive)
    } else if lowered.starts_with("neg") {
        Some(SentimentLabel::Negative)
    } else if lowered.starts_with("neu") {
        Some(SentimentLabel::Neutral)
    } else {
        None
    }
}
