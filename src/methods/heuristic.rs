// Word-list heuristic — last rung of the neural degradation chain.
//
// When no classifier can serve (both model loads failed, or inference
// errored), this counts hits against two tiny embedded word lists and
// produces a canonical distribution directly. Verdicts built from it
// are always marked as fallback output.

use crate::verdict::Scores;

const POSITIVE_WORDS: [&str; 10] = [
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "love",
    "like",
    "best",
    "awesome",
];

const NEGATIVE_WORDS: [&str; 10] = [
    "bad",
    "terrible",
    "awful",
    "horrible",
    "hate",
    "worst",
    "poor",
    "disappointing",
    "sad",
    "angry",
];

/// Confidence ceiling. Heuristic output never claims more than this.
const MAX_CONFIDENCE: f64 = 0.9;

/// Distribution when neither side wins, including empty text.
const TIE_SCORES: Scores = Scores {
    positive: 0.15,
    negative: 0.15,
    neutral: 0.7,
};

/// Score a text by counting positive and negative word-list hits.
///
/// The winning side gets confidence 0.5 + hits/tokens (capped), the
/// remaining mass splits 60/40 between neutral and the opposing label.
/// Ties and texts with no hits come out mostly neutral.
pub fn word_list_scores(text: &str) -> Scores {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect();

    let positive_hits = tokens
        .iter()
        .filter(|t| POSITIVE_WORDS.contains(t))
        .count();
    let negative_hits = tokens
        .iter()
        .filter(|t| NEGATIVE_WORDS.contains(t))
        .count();

    if positive_hits == negative_hits {
        return TIE_SCORES;
    }

    let total = tokens.len().max(1) as f64;
    let hits = positive_hits.max(negative_hits) as f64;
    let confidence = (0.5 + hits / total).min(MAX_CONFIDENCE);
    let remainder = 1.0 - confidence;

    if positive_hits > negative_hits {
        Scores {
            positive: confidence,
            negative: remainder * 0.4,
            neutral: remainder * 0.6,
        }
    } else {
        Scores {
            positive: remainder * 0.4,
            negative: confidence,
            neutral: remainder * 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::SentimentLabel;

    #[test]
    fn positive_hits_win() {
        let scores = word_list_scores("I love this");
        // 1 hit over 3 tokens: 0.5 + 1/3
        assert!((scores.positive - 0.8333).abs() < 1e-3);
        assert!((scores.neutral - 0.1).abs() < 1e-3);
        assert!((scores.negative - 0.0667).abs() < 1e-3);
        assert_eq!(scores.dominant(), SentimentLabel::Positive);
    }

    #[test]
    fn negative_hits_win() {
        let scores = word_list_scores("what a terrible thing");
        assert_eq!(scores.dominant(), SentimentLabel::Negative);
        assert!(scores.negative > 0.5);
    }

    #[test]
    fn confidence_caps_at_ceiling() {
        let scores = word_list_scores("hate hate hate");
        assert!((scores.negative - MAX_CONFIDENCE).abs() < 1e-12);
    }

    #[test]
    fn no_hits_is_mostly_neutral() {
        let scores = word_list_scores("the sky is blue today");
        assert_eq!(scores.positive, 0.15);
        assert_eq!(scores.negative, 0.15);
        assert_eq!(scores.neutral, 0.7);
    }

    #[test]
    fn tied_hits_are_neutral() {
        let scores = word_list_scores("good but bad");
        assert_eq!(scores.dominant(), SentimentLabel::Neutral);
        assert_eq!(scores.neutral, 0.7);
    }

    #[test]
    fn empty_text_is_neutral() {
        let scores = word_list_scores("");
        assert_eq!(scores.neutral, 0.7);
    }

    #[test]
    fn case_and_punctuation_ignored() {
        let scores = word_list_scores("LOVE it, GREAT stuff!");
        assert_eq!(scores.dominant(), SentimentLabel::Positive);
    }

    #[test]
    fn output_sums_to_one() {
        for text in ["I love this", "hate hate hate", "plain words here", ""] {
            let scores = word_list_scores(text);
            assert!(
                (scores.sum() - 1.0).abs() < 1e-9,
                "Scores for '{text}' should sum to 1.0, got {}",
                scores.sum()
            );
        }
    }
}
