use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use futures::stream::{self, StreamExt};

use undertone::analyzer::SentimentAnalyzer;
use undertone::classifier::download;
use undertone::config::Config;
use undertone::output::terminal;
use undertone::verdict::{Method, Verdict};

/// Undertone: multi-method sentiment analysis.
///
/// Scores text with a rule lexicon, a statistical heuristic, and a
/// pretrained transformer, then combines them into one verdict with a
/// class-probability breakdown.
#[derive(Parser)]
#[command(name = "undertone", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single text
    Analyze {
        /// The text to analyze
        text: String,

        /// Scoring method: ensemble, lexicon, statistical, or transformer
        #[arg(long, default_value = "ensemble")]
        method: String,

        /// Print the verdict as JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Analyze a file of texts, one per line
    Batch {
        /// Path to the input file (one text per line)
        file: PathBuf,

        /// Scoring method: ensemble, lexicon, statistical, or transformer
        #[arg(long, default_value = "ensemble")]
        method: String,

        /// Number of texts to score in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: u32,

        /// Write the verdicts as JSON to this path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Recompute statistics over a JSON verdicts file
    Stats {
        /// Path to a JSON verdicts file (as written by `batch --out`)
        file: PathBuf,
    },

    /// Download the ONNX sentiment models
    DownloadModel,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("undertone=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { text, method, json } => {
            let method: Method = method.parse()?;
            let config = Config::load()?;
            hint_missing_models(&config, method);
            let analyzer = SentimentAnalyzer::new(&config);

            if method == Method::Ensemble && !json {
                let detail = analyzer.analyze_detailed(&text).await;
                terminal::display_verdict(&text, &detail.verdict);
                terminal::display_breakdown(&detail);
            } else {
                let verdict = analyzer.analyze(&text, method).await;
                if json {
                    println!("{}", serde_json::to_string_pretty(&verdict)?);
                } else {
                    terminal::display_verdict(&text, &verdict);
                }
            }
        }

        Commands::Batch {
            file,
            method,
            concurrency,
            out,
        } => {
            let method: Method = method.parse()?;
            let config = Config::load()?;
            hint_missing_models(&config, method);
            let analyzer = SentimentAnalyzer::new(&config);

            let texts = read_lines(&file)?;
            if texts.is_empty() {
                println!("No texts found in {}", file.display());
                return Ok(());
            }

            println!(
                "Analyzing {} texts ({} concurrent)...",
                texts.len(),
                concurrency
            );

            // Load the model once up front so parallel first calls don't
            // pile onto the cold path.
            if matches!(method, Method::Ensemble | Method::Transformer) {
                analyzer.preload().await;
            }

            // buffered (not buffer_unordered): output order must match
            // input order.
            let analyzer_ref = &analyzer;
            let verdicts: Vec<Verdict> = stream::iter(&texts)
                .map(|text| analyzer_ref.analyze(text, method))
                .buffered(concurrency as usize)
                .collect()
                .await;

            terminal::display_batch(&texts, &verdicts);
            let stats = SentimentAnalyzer::statistics(&verdicts);
            terminal::display_stats(&stats);

            if let Some(path) = out {
                let json = serde_json::to_string_pretty(&verdicts)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("\nVerdicts written to {}", path.display());
            }
        }

        Commands::Stats { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let verdicts: Vec<Verdict> = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse verdicts from {}", file.display()))?;
            let stats = SentimentAnalyzer::statistics(&verdicts);
            terminal::display_stats(&stats);
        }

        Commands::DownloadModel => {
            let config = Config::load()?;

            println!("Downloading ONNX sentiment models...");
            println!("  Destination: {}", config.model_dir.display());

            download::download_model(&config.model_dir, &config.primary_model).await?;
            download::download_model(&config.model_dir, &config.fallback_model).await?;

            println!("\n{}", "Models downloaded successfully.".bold());
            println!("You can now run `undertone analyze \"some text\"`.");
        }
    }

    Ok(())
}

/// Read non-empty lines from a text file.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Point at download-model when a neural method is requested but no
/// model files exist locally. Analysis still proceeds; the transformer
/// method serves from its word-list fallback.
fn hint_missing_models(config: &Config, method: Method) {
    if matches!(method, Method::Ensemble | Method::Transformer) && !config.models_present() {
        println!(
            "{}",
            "No model files found; the transformer method will use its word-list fallback.\n\
             Run `undertone download-model` to enable neural scoring."
                .dimmed()
        );
    }
}
