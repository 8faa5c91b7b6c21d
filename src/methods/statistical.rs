// Statistical method — heuristic polarity/subjectivity averaging.
//
// Each matched word carries a (polarity, subjectivity) assessment.
// An intensifier directly before a matched word scales its polarity,
// and a negation before the word (or before its intensifier) flips it
// at half strength. The text's score is the arithmetic mean over all
// matched assessments. No matches means (0.0, 0.0).

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{MethodResult, SentimentScorer};

/// Negation halves and flips a word's polarity.
const NEGATION_MULTIPLIER: f64 = -0.5;

/// Word assessments as (word, polarity, subjectivity). Polarity in
/// [-1.0, 1.0], subjectivity in [0.0, 1.0]. Sorted by word.
const ASSESSMENTS: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.7),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("boring", -1.0, 1.0),
    ("brilliant", 0.9, 0.9),
    ("broken", -0.4, 0.4),
    ("cheap", -0.4, 0.7),
    ("clean", 0.4, 0.6),
    ("comfortable", 0.5, 0.7),
    ("cool", 0.35, 0.65),
    ("decent", 0.3, 0.6),
    ("delicious", 1.0, 1.0),
    ("difficult", -0.5, 1.0),
    ("disappointing", -0.6, 0.7),
    ("dreadful", -1.0, 1.0),
    ("easy", 0.45, 0.85),
    ("excellent", 1.0, 1.0),
    ("exciting", 0.7, 0.9),
    ("fantastic", 0.9, 0.9),
    ("fast", 0.2, 0.3),
    ("fine", 0.4, 0.7),
    ("fun", 0.3, 0.2),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("hate", -0.8, 0.9),
    ("helpful", 0.6, 0.5),
    ("horrible", -1.0, 1.0),
    ("interesting", 0.5, 0.5),
    ("lazy", -0.4, 0.8),
    ("like", 0.4, 0.6),
    ("love", 0.5, 0.6),
    ("lovely", 0.8, 0.9),
    ("mediocre", -0.3, 0.6),
    ("nasty", -0.8, 0.9),
    ("new", 0.1, 0.4),
    ("nice", 0.6, 1.0),
    ("old", -0.1, 0.2),
    ("outstanding", 0.9, 0.9),
    ("pathetic", -0.8, 0.9),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.7, 0.8),
    ("poor", -0.6, 0.7),
    ("pretty", 0.5, 0.9),
    ("reliable", 0.6, 0.5),
    ("rude", -0.7, 0.9),
    ("sad", -0.5, 1.0),
    ("simple", 0.2, 0.45),
    ("slow", -0.3, 0.4),
    ("smooth", 0.4, 0.6),
    ("solid", 0.5, 0.5),
    ("strange", -0.2, 0.75),
    ("strong", 0.4, 0.5),
    ("stunning", 0.85, 1.0),
    ("stupid", -0.8, 0.9),
    ("terrible", -1.0, 1.0),
    ("tired", -0.3, 0.6),
    ("ugly", -0.7, 0.9),
    ("unreliable", -0.6, 0.5),
    ("useful", 0.5, 0.4),
    ("useless", -0.7, 0.6),
    ("weak", -0.4, 0.5),
    ("wonderful", 1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.6),
];

/// Multiplicative polarity factors for a directly preceding modifier.
/// Factors above 1.0 intensify, below 1.0 dampen. Sorted by word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.4),
    ("completely", 1.4),
    ("extremely", 1.5),
    ("fairly", 0.8),
    ("highly", 1.4),
    ("incredibly", 1.5),
    ("kinda", 0.7),
    ("quite", 1.1),
    ("rather", 0.9),
    ("really", 1.2),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("totally", 1.3),
    ("truly", 1.3),
    ("very", 1.3),
];

const NEGATIONS: [&str; 7] = ["cannot", "neither", "never", "no", "nor", "not", "nothing"];

/// Heuristic statistics scorer over embedded word assessments.
pub struct StatisticalScorer;

impl StatisticalScorer {
    /// Mean (polarity, subjectivity) over every matched word.
    pub fn assess(&self, text: &str) -> (f64, f64) {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|t| !t.is_empty())
            .collect();

        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some((polarity, subjectivity)) = assessment_of(token) else {
                continue;
            };
            let mut polarity = polarity;

            if let Some(prev) = i.checked_sub(1).map(|p| tokens[p]) {
                if let Some(factor) = intensifier_of(prev) {
                    polarity *= factor;
                    // negation behind the intensifier: "not very good"
                    if i >= 2 && is_negation(tokens[i - 2]) {
                        polarity *= NEGATION_MULTIPLIER;
                    }
                } else if is_negation(prev) {
                    polarity *= NEGATION_MULTIPLIER;
                }
            }

            polarities.push(polarity.clamp(-1.0, 1.0));
            subjectivities.push(subjectivity);
        }

        if polarities.is_empty() {
            return (0.0, 0.0);
        }

        let count = polarities.len() as f64;
        let polarity = polarities.iter().sum::<f64>() / count;
        let subjectivity = subjectivities.iter().sum::<f64>() / count;
        (polarity, subjectivity)
    }
}

#[async_trait]
impl SentimentScorer for StatisticalScorer {
    async fn score_text(&self, text: &str) -> Result<MethodResult> {
        let (polarity, subjectivity) = self.assess(text);
        Ok(MethodResult::Graded {
            polarity,
            subjectivity,
        })
    }
}

fn assessment_of(word: &str) -> Option<(f64, f64)> {
    ASSESSMENTS
        .binary_search_by(|(w, _, _)| w.cmp(&word))
        .ok()
        .map(|i| (ASSESSMENTS[i].1, ASSESSMENTS[i].2))
}

fn intensifier_of(word: &str) -> Option<f64> {
    INTENSIFIERS
        .binary_search_by(|(w, _)| w.cmp(&word))
        .ok()
        .map(|i| INTENSIFIERS[i].1)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}
