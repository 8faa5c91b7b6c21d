// Colored terminal output for verdicts, breakdowns, and summaries.
//
// This module handles all terminal-specific formatting: colors, score
// bars, summary blocks. The main.rs display functions delegate here.

use colored::Colorize;

use crate::analyzer::DetailedAnalysis;
use crate::verdict::{Scores, SentimentLabel, Stats, Verdict, LABEL_PRECEDENCE};

/// Display one verdict in full, with the score distribution.
pub fn display_verdict(text: &str, verdict: &Verdict) {
    println!("\n{}", "=== Sentiment ===".bold());
    println!("  Text: \"{}\"", super::truncate_chars(text, 120).dimmed());
    if let Some(method) = verdict.method {
        println!("  Method: {method}");
    }
    println!(
        "  Verdict: {}  (confidence {:.2})",
        colorize_label(verdict.sentiment),
        verdict.confidence
    );
    println!();
    display_scores(&verdict.scores);
    if verdict.fallback {
        println!("\n  {} served by a fallback path", "~".yellow());
    }
}

/// Display the per-method breakdown of an ensemble analysis.
pub fn display_breakdown(detail: &DetailedAnalysis) {
    if detail.breakdown.is_empty() {
        return;
    }

    println!("\n{}", "=== Method Breakdown ===".bold());
    println!();
    println!(
        "  {:<13} {:<10} {:>10}  {:>8}",
        "Method".dimmed(),
        "Verdict".dimmed(),
        "Confidence".dimmed(),
        "Fallback".dimmed(),
    );
    println!("  {}", "-".repeat(48).dimmed());

    for verdict in &detail.breakdown {
        let method = verdict.method.map(|m| m.as_str()).unwrap_or("?");
        let fallback_str = if verdict.fallback {
            "yes".yellow().to_string()
        } else {
            "no".normal().to_string()
        };
        println!(
            "  {:<13} {:<10} {:>10.2}  {:>8}",
            method,
            colorize_label(verdict.sentiment),
            verdict.confidence,
            fallback_str,
        );
    }
}

/// Display one line per batch item, in input order.
pub fn display_batch(texts: &[String], verdicts: &[Verdict]) {
    println!();
    for (i, (text, verdict)) in texts.iter().zip(verdicts).enumerate() {
        println!(
            "  {:>4}. {:<10} {:.2}  {}",
            i + 1,
            colorize_label(verdict.sentiment),
            verdict.confidence,
            super::truncate_chars(text, 60).dimmed()
        );
    }
}

/// Display a statistics summary block.
pub fn display_stats(stats: &Stats) {
    println!(
        "\n{}",
        format!("=== Summary ({} texts) ===", stats.total).bold()
    );
    println!();
    println!(
        "  {} positive / {} negative / {} neutral",
        stats.positive.to_string().green(),
        stats.negative.to_string().red(),
        stats.neutral.to_string().yellow(),
    );
    println!("  Modal sentiment: {}", colorize_label(stats.modal_label));
    println!("  Average confidence: {:.2}", stats.avg_confidence);
    if stats.fallback_count > 0 {
        println!(
            "  {} {} results served by a fallback path",
            "~".yellow(),
            stats.fallback_count
        );
    }
}

fn display_scores(scores: &Scores) {
    for label in LABEL_PRECEDENCE {
        let value = scores.get(label);
        println!(
            "  {:<10} {:>5.1}%  {}",
            label.as_str(),
            value * 100.0,
            score_bar(value).dimmed()
        );
    }
}

/// Fixed-width proportional bar for a probability in [0, 1].
fn score_bar(value: f64) -> String {
    const WIDTH: usize = 24;
    let filled = (value.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
    format!("{}{}", "=".repeat(filled), "-".repeat(WIDTH - filled))
}

/// Colorize a sentiment label.
fn colorize_label(label: SentimentLabel) -> colored::ColoredString {
    match label {
        SentimentLabel::Positive => label.as_str().green().bold(),
        SentimentLabel::Negative => label.as_str().red().bold(),
        SentimentLabel::Neutral => label.as_str().yellow(),
    }
}
