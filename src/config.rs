use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::scoring::ensemble::EnsembleWeights;
use crate::scoring::normalize::NeutralInjection;

/// Central configuration loaded from environment variables.
///
/// Everything has a default; the engine runs with no configuration at
/// all. The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Model id of the primary sentiment classifier (3-class).
    pub primary_model: String,
    /// Model id of the smaller fallback classifier, tried when the
    /// primary fails to load.
    pub fallback_model: String,
    /// Directory containing the ONNX model files
    pub model_dir: PathBuf,
    /// Whether texts get cleaned before scoring (UNDERTONE_PREPROCESS)
    pub preprocess: bool,
    /// Per-method ensemble weights (UNDERTONE_WEIGHT_*)
    pub weights: EnsembleWeights,
    /// Neutral injection tuning for binary models (UNDERTONE_NEUTRAL_*)
    pub neutral_injection: NeutralInjection,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let preprocess = !matches!(
            env::var("UNDERTONE_PREPROCESS").as_deref(),
            Ok("false") | Ok("0") | Ok("off")
        );

        let model_dir = env::var("UNDERTONE_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::classifier::download::default_model_dir());

        let defaults = EnsembleWeights::default();
        let weights = EnsembleWeights {
            lexicon: env_f64("UNDERTONE_WEIGHT_LEXICON", defaults.lexicon),
            statistical: env_f64("UNDERTONE_WEIGHT_STATISTICAL", defaults.statistical),
            transformer: env_f64("UNDERTONE_WEIGHT_TRANSFORMER", defaults.transformer),
        };

        let injection_defaults = NeutralInjection::default();
        let neutral_injection = NeutralInjection {
            margin: env_f64("UNDERTONE_NEUTRAL_MARGIN", injection_defaults.margin),
            mass: env_f64("UNDERTONE_NEUTRAL_MASS", injection_defaults.mass),
        };

        Ok(Self {
            primary_model: env::var("UNDERTONE_PRIMARY_MODEL")
                .unwrap_or_else(|_| "Xenova/twitter-roberta-base-sentiment-latest".to_string()),
            fallback_model: env::var("UNDERTONE_FALLBACK_MODEL").unwrap_or_else(|_| {
                "Xenova/distilbert-base-uncased-finetuned-sst-2-english".to_string()
            }),
            model_dir,
            preprocess,
            weights,
            neutral_injection,
        })
    }

    /// Whether model files exist locally for either configured model.
    /// The engine still answers without them (word-list heuristic), so
    /// this is a preflight hint, not a requirement.
    pub fn models_present(&self) -> bool {
        crate::classifier::download::model_files_present(&self.model_dir, &self.primary_model)
            || crate::classifier::download::model_files_present(
                &self.model_dir,
                &self.fallback_model,
            )
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
