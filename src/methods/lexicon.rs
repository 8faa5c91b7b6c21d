// Lexicon method — rule/dictionary polarity scoring.
//
// A fixed valence lexicon drives the score, adjusted per token for
// negation, booster words, and ALL-CAPS emphasis, plus exclamation
// emphasis over the whole text. The adjusted valences are summed and
// squashed into a compound polarity in [-1, 1].
//
// Pure function of the input text: same text, same score, no state.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{MethodResult, SentimentScorer};

/// Booster word increment magnitude.
const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;

/// ALL-CAPS emphasis added to a sentiment word's valence, sign-aligned.
/// Only applies when the text mixes cased and all-caps tokens.
const C_INCR: f64 = 0.733;

/// Negation within three tokens flips and damps a valence.
const N_SCALAR: f64 = -0.74;

/// Each '!' adds this much emphasis to the sentiment sum, up to four.
const EXCL_EMPHASIS: f64 = 0.292;
const MAX_EXCL: usize = 4;

/// Denominator constant for the compound squash: x / sqrt(x^2 + alpha).
const NORM_ALPHA: f64 = 15.0;

/// Word valences in [-4.0, 4.0]. Sorted by word for binary search.
const LEXICON: &[(&str, f64)] = &[
    ("abandon", -1.9),
    ("abuse", -3.2),
    ("adore", 2.9),
    ("afraid", -2.2),
    ("amazing", 2.8),
    ("angry", -2.3),
    ("annoying", -1.8),
    ("anxious", -1.9),
    ("appreciate", 1.9),
    ("awesome", 3.1),
    ("awful", -2.0),
    ("bad", -2.5),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("betray", -2.8),
    ("bitter", -1.8),
    ("bless", 1.8),
    ("boring", -1.3),
    ("brilliant", 2.8),
    ("broken", -1.6),
    ("calm", 1.3),
    ("careless", -1.5),
    ("charming", 2.2),
    ("cheerful", 2.5),
    ("comfort", 1.5),
    ("confident", 2.2),
    ("cool", 1.3),
    ("crap", -2.4),
    ("creative", 1.9),
    ("cruel", -2.6),
    ("cry", -2.0),
    ("damn", -1.7),
    ("danger", -2.4),
    ("dead", -3.3),
    ("defeat", -1.9),
    ("delight", 2.9),
    ("depressed", -2.7),
    ("despair", -2.9),
    ("destroy", -2.6),
    ("dirty", -1.7),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("disgust", -2.9),
    ("dishonest", -2.4),
    ("dislike", -1.6),
    ("dread", -2.4),
    ("dumb", -2.3),
    ("eager", 1.6),
    ("ecstatic", 3.0),
    ("elegant", 2.1),
    ("embarrassing", -1.9),
    ("empty", -1.2),
    ("encourage", 2.0),
    ("enjoy", 2.2),
    ("enthusiastic", 2.6),
    ("evil", -3.4),
    ("excellent", 2.7),
    ("excited", 2.4),
    ("exhausted", -1.6),
    ("fabulous", 2.7),
    ("fail", -2.5),
    ("fake", -2.1),
    ("fantastic", 2.6),
    ("fear", -2.2),
    ("fine", 0.8),
    ("flawless", 2.7),
    ("fool", -1.9),
    ("forgive", 1.5),
    ("fraud", -2.9),
    ("free", 1.7),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("frustrating", -2.1),
    ("fun", 2.3),
    ("furious", -2.9),
    ("generous", 2.3),
    ("gentle", 1.9),
    ("glad", 2.0),
    ("gloomy", -1.9),
    ("good", 1.9),
    ("gorgeous", 2.7),
    ("grateful", 2.4),
    ("great", 3.1),
    ("greed", -2.2),
    ("grief", -2.5),
    ("gross", -2.1),
    ("happy", 2.7),
    ("harm", -2.4),
    ("hate", -2.7),
    ("heartbroken", -3.0),
    ("helpful", 1.8),
    ("honest", 2.1),
    ("hope", 1.9),
    ("hopeless", -2.6),
    ("horrible", -2.5),
    ("hostile", -2.3),
    ("hurt", -2.4),
    ("ignorant", -1.9),
    ("impressive", 2.3),
    ("incredible", 2.8),
    ("inferior", -1.7),
    ("innovative", 2.1),
    ("insult", -2.2),
    ("intelligent", 2.3),
    ("interesting", 1.7),
    ("jealous", -2.0),
    ("joy", 2.8),
    ("kind", 2.4),
    ("lame", -1.8),
    ("laugh", 2.2),
    ("lazy", -1.6),
    ("liar", -2.8),
    ("like", 1.5),
    ("lonely", -2.2),
    ("lose", -1.9),
    ("loser", -2.5),
    ("lost", -1.3),
    ("love", 3.2),
    ("lovely", 2.8),
    ("loyal", 2.3),
    ("lucky", 2.4),
    ("mad", -2.2),
    ("magnificent", 2.9),
    ("miserable", -2.8),
    ("mistake", -1.6),
    ("murder", -3.7),
    ("nasty", -2.6),
    ("nice", 1.8),
    ("noble", 2.0),
    ("offensive", -2.2),
    ("outstanding", 3.0),
    ("pain", -2.3),
    ("panic", -2.6),
    ("pathetic", -2.5),
    ("peaceful", 2.2),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("pleased", 2.1),
    ("poor", -1.9),
    ("praise", 2.4),
    ("pretty", 2.0),
    ("problem", -1.7),
    ("proud", 2.4),
    ("rage", -2.9),
    ("reject", -1.9),
    ("relief", 2.0),
    ("remarkable", 2.6),
    ("ridiculous", -1.8),
    ("rude", -2.2),
    ("ruin", -2.4),
    ("sad", -2.1),
    ("safe", 1.8),
    ("satisfied", 2.0),
    ("scam", -2.7),
    ("scared", -2.2),
    ("selfish", -2.4),
    ("shame", -2.1),
    ("sick", -2.1),
    ("smart", 2.1),
    ("smile", 2.3),
    ("sorrow", -2.4),
    ("stink", -2.0),
    ("stupid", -2.4),
    ("succeed", 2.4),
    ("success", 2.7),
    ("suck", -2.4),
    ("super", 2.9),
    ("superb", 3.0),
    ("sweet", 2.1),
    ("terrible", -2.1),
    ("terrific", 3.0),
    ("thank", 1.9),
    ("threat", -2.4),
    ("thrilled", 2.9),
    ("tragedy", -3.2),
    ("trash", -2.0),
    ("triumph", 2.7),
    ("trust", 2.3),
    ("ugly", -2.3),
    ("unhappy", -2.2),
    ("upset", -2.0),
    ("useless", -1.9),
    ("victory", 2.7),
    ("vile", -3.1),
    ("violent", -2.9),
    ("warm", 1.7),
    ("waste", -1.8),
    ("weak", -1.6),
    ("welcome", 2.0),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worry", -1.9),
    ("worst", -3.1),
    ("worthless", -2.4),
    ("wow", 2.6),
    ("wrong", -2.1),
];

/// Booster words and their scalar adjustment. Positive entries intensify,
/// negative entries dampen. Sorted by word for binary search.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("completely", B_INCR),
    ("considerably", B_INCR),
    ("decidedly", B_INCR),
    ("deeply", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("fully", B_INCR),
    ("greatly", B_INCR),
    ("hardly", B_DECR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("kinda", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("majorly", B_INCR),
    ("marginally", B_DECR),
    ("more", B_INCR),
    ("most", B_INCR),
    ("occasionally", B_DECR),
    ("particularly", B_INCR),
    ("partly", B_DECR),
    ("purely", B_INCR),
    ("quite", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("so", B_INCR),
    ("somewhat", B_DECR),
    ("sorta", B_DECR),
    ("substantially", B_INCR),
    ("thoroughly", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("unbelievably", B_INCR),
    ("unusually", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
];

/// Negation words. Contracted forms are caught by the "n't" suffix check.
const NEGATIONS: [&str; 10] = [
    "cannot", "neither", "never", "no", "none", "nor", "not", "nothing", "nowhere", "without",
];

/// How far back boosters and negations reach, with distance decay.
const WINDOW: [(usize, f64); 3] = [(1, 1.0), (2, 0.95), (3, 0.9)];

/// Rule/dictionary sentiment scorer over the embedded lexicon.
pub struct LexiconScorer;

impl LexiconScorer {
    /// Compute the compound polarity in [-1.0, 1.0] for a text.
    ///
    /// Empty text (or text with no lexicon hits and no emphasis) scores 0.0.
    pub fn compound(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let cap_diff = has_cap_differential(&tokens);
        let mut sum = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let lower = token.to_lowercase();
            let Some(mut valence) = valence_of(&lower) else {
                continue;
            };

            if cap_diff && is_all_caps(token) {
                valence += C_INCR * valence.signum();
            }

            // Boosters up to three tokens back, decaying with distance.
            // A preceding word that carries its own valence doesn't boost.
            for (dist, decay) in WINDOW {
                if dist > i {
                    break;
                }
                let prev = tokens[i - dist].to_lowercase();
                if valence_of(&prev).is_some() {
                    continue;
                }
                if let Some(boost) = booster_of(&prev) {
                    valence += boost * decay * valence.signum();
                }
            }

            // Negation in the same window flips and damps, once.
            for (dist, _) in WINDOW {
                if dist > i {
                    break;
                }
                if is_negation(&tokens[i - dist].to_lowercase()) {
                    valence *= N_SCALAR;
                    break;
                }
            }

            sum += valence;
        }

        let emphasis = exclamation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        normalize_score(sum)
    }
}

#[async_trait]
impl SentimentScorer for LexiconScorer {
    async fn score_text(&self, text: &str) -> Result<MethodResult> {
        Ok(MethodResult::Polarity(self.compound(text)))
    }
}

/// Split on whitespace and trim edge punctuation, keeping case and inner
/// apostrophes ("don't", "it's").
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn valence_of(word: &str) -> Option<f64> {
    LEXICON
        .binary_search_by(|(w, _)| w.cmp(&word))
        .ok()
        .map(|i| LEXICON[i].1)
}

fn booster_of(word: &str) -> Option<f64> {
    BOOSTERS
        .binary_search_by(|(w, _)| w.cmp(&word))
        .ok()
        .map(|i| BOOSTERS[i].1)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

/// A token counts as all-caps when every alphabetic character is uppercase.
fn is_all_caps(token: &str) -> bool {
    let mut has_alpha = false;
    for c in token.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if !c.is_uppercase() {
                return false;
            }
        }
    }
    has_alpha
}

/// Caps emphasis only means something when the text mixes cased and
/// all-caps tokens. A fully shouted text gets no differential.
fn has_cap_differential(tokens: &[String]) -> bool {
    let alpha: Vec<&String> = tokens
        .iter()
        .filter(|t| t.chars().any(|c| c.is_alphabetic()))
        .collect();
    let caps = alpha.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < alpha.len()
}

fn exclamation_emphasis(text: &str) -> f64 {
    let count = text.chars().filter(|&c| c == '!').count().min(MAX_EXCL);
    count as f64 * EXCL_EMPHASIS
}

/// Squash an unbounded valence sum into [-1.0, 1.0].
fn normalize_score(sum: f64) -> f64 {
    (sum / (sum * sum + NORM_ALPHA).sqrt()).clamp(-1.0, 1.0)
}
