// Unit tests for the three scoring methods.
//
// Exercises each method through its public surface: LexiconScorer
// compound bounds and adjustments, StatisticalScorer averaging, and the
// word-list fallback distribution. No models, no network, no filesystem.

use undertone::methods::heuristic::word_list_scores;
use undertone::methods::lexicon::LexiconScorer;
use undertone::methods::statistical::StatisticalScorer;
use undertone::methods::traits::{MethodResult, SentimentScorer};
use undertone::verdict::SentimentLabel;

// ============================================================
// LexiconScorer — compound polarity behavior
// ============================================================

#[test]
fn lexicon_compound_always_in_bounds() {
    let scorer = LexiconScorer;
    let inputs = [
        "",
        "!",
        "love love love love love love love love love love",
        "hate hate hate hate hate hate hate hate hate hate",
        "NOT GOOD not bad very terrible extremely wonderful",
        "1234 5678 @@@@ ....",
    ];
    for text in inputs {
        let compound = scorer.compound(text);
        assert!(
            (-1.0..=1.0).contains(&compound),
            "Compound for '{text}' out of bounds: {compound}"
        );
    }
}

#[test]
fn lexicon_known_negative_value() {
    let scorer = LexiconScorer;
    let compound = scorer.compound("This is terrible and awful");
    assert!(
        (compound - -0.727).abs() < 0.01,
        "Expected ~-0.727, got {compound}"
    );
}

#[test]
fn lexicon_mixed_text_nets_out() {
    let scorer = LexiconScorer;
    // love (3.2) vs hate (-2.7) leaves a small positive residue
    let compound = scorer.compound("love and hate");
    assert!(compound.abs() < 0.2, "Expected near-zero, got {compound}");
}

#[test]
fn lexicon_negation_window_reaches_three_tokens() {
    let scorer = LexiconScorer;
    let flipped = scorer.compound("not at all good");
    assert!(flipped < 0.0, "Negation three back should flip, got {flipped}");
    let out_of_range = scorer.compound("not going there but good");
    assert!(
        out_of_range > 0.0,
        "Negation four back should not reach, got {out_of_range}"
    );
}

#[test]
fn lexicon_unicode_text_is_safe() {
    let scorer = LexiconScorer;
    // Must not panic on multi-byte input; no lexicon hits means zero
    assert_eq!(scorer.compound("日本語のテキスト 🦀"), 0.0);
}

#[tokio::test]
async fn lexicon_scores_through_trait() {
    let scorer = LexiconScorer;
    let result = scorer.score_text("What a wonderful day").await.unwrap();
    match result {
        MethodResult::Polarity(v) => assert!(v > 0.05, "Expected positive, got {v}"),
        other => panic!("Expected Polarity, got {other:?}"),
    }
}

// ============================================================
// StatisticalScorer — assessment averaging
// ============================================================

#[test]
fn statistical_outputs_stay_in_range() {
    let scorer = StatisticalScorer;
    let inputs = [
        "extremely awesome and truly wonderful",
        "completely horrible and utterly dreadful",
        "good bad good bad",
        "nothing matching here at all",
    ];
    for text in inputs {
        let (polarity, subjectivity) = scorer.assess(text);
        assert!(
            (-1.0..=1.0).contains(&polarity),
            "Polarity for '{text}' out of range: {polarity}"
        );
        assert!(
            (0.0..=1.0).contains(&subjectivity),
            "Subjectivity for '{text}' out of range: {subjectivity}"
        );
    }
}

#[test]
fn statistical_opposing_words_cancel() {
    let scorer = StatisticalScorer;
    let (polarity, subjectivity) = scorer.assess("awesome awful");
    assert!(
        polarity.abs() < 1e-12,
        "1.0 and -1.0 should average to zero, got {polarity}"
    );
    assert!((subjectivity - 1.0).abs() < 1e-12);
}

#[test]
fn statistical_negation_only_affects_next_assessment() {
    let scorer = StatisticalScorer;
    // "not" is adjacent to "bad" but three tokens from "good"
    let (polarity, _) = scorer.assess("not bad but good");
    // not bad: -0.7 * -0.5 = 0.35; good: 0.7; mean 0.525
    assert!(
        (polarity - 0.525).abs() < 1e-9,
        "Expected 0.525, got {polarity}"
    );
}

#[tokio::test]
async fn statistical_scores_through_trait() {
    let scorer = StatisticalScorer;
    let result = scorer.score_text("this is wonderful").await.unwrap();
    match result {
        MethodResult::Graded {
            polarity,
            subjectivity,
        } => {
            assert!((polarity - 1.0).abs() < 1e-9);
            assert!((subjectivity - 1.0).abs() < 1e-9);
        }
        other => panic!("Expected Graded, got {other:?}"),
    }
}

// ============================================================
// Word-list fallback — distribution shape
// ============================================================

#[test]
fn word_list_confidence_grows_with_hit_density() {
    let sparse = word_list_scores("love this thing here");
    let dense = word_list_scores("love love this thing");
    assert!(
        dense.positive > sparse.positive,
        "More hits should mean more confidence: {} vs {}",
        dense.positive,
        sparse.positive
    );
}

#[test]
fn word_list_exact_confidence_for_single_hit() {
    let scores = word_list_scores("I love this");
    // 0.5 + 1/3
    assert!(
        (scores.positive - (0.5 + 1.0 / 3.0)).abs() < 1e-9,
        "Got {}",
        scores.positive
    );
}

#[test]
fn word_list_remainder_splits_sixty_forty() {
    let scores = word_list_scores("I love this");
    let remainder = 1.0 - scores.positive;
    assert!((scores.neutral - remainder * 0.6).abs() < 1e-9);
    assert!((scores.negative - remainder * 0.4).abs() < 1e-9);
}

#[test]
fn word_list_always_sums_to_one() {
    for text in [
        "",
        "love",
        "hate",
        "good bad",
        "the quick brown fox",
        "terrible awful horrible worst",
    ] {
        let scores = word_list_scores(text);
        assert!(
            (scores.sum() - 1.0).abs() < 1e-9,
            "Scores for '{text}' sum to {}",
            scores.sum()
        );
    }
}

#[test]
fn word_list_negative_side_mirrors_positive() {
    let positive = word_list_scores("I love this");
    let negative = word_list_scores("I hate this");
    assert!((positive.positive - negative.negative).abs() < 1e-9);
    assert!((positive.negative - negative.positive).abs() < 1e-9);
    assert!((positive.neutral - negative.neutral).abs() < 1e-9);
    assert_eq!(negative.dominant(), SentimentLabel::Negative);
}
