// Minimal text cleaning ahead of sentiment scoring.
//
// Strips markup and addresses that carry no sentiment (HTML tags, URLs,
// emails) and normalizes whitespace, while preserving case, emoticons,
// and punctuation because the lexicon method reads emphasis out of them.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Which cleanup passes to apply. All on by default.
#[derive(Debug, Clone, Copy)]
pub struct PreprocessOptions {
    pub strip_html: bool,
    pub strip_urls: bool,
    pub strip_emails: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            strip_html: true,
            strip_urls: true,
            strip_emails: true,
        }
    }
}

fn html_tags() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"))
}

fn urls() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("valid regex"))
}

fn emails() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
    })
}

fn spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+").expect("valid regex"))
}

fn blank_lines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid regex"))
}

/// Clean a text for analysis.
///
/// Runs of spaces and tabs collapse to one space; runs of blank lines
/// collapse to one blank line; the result is trimmed. Everything else
/// the options don't remove passes through untouched.
pub fn clean_for_analysis(text: &str, options: &PreprocessOptions) -> String {
    let mut cleaned = text.to_string();

    if options.strip_html {
        cleaned = html_tags().replace_all(&cleaned, "").into_owned();
    }
    if options.strip_urls {
        cleaned = urls().replace_all(&cleaned, "").into_owned();
    }
    if options.strip_emails {
        cleaned = emails().replace_all(&cleaned, "").into_owned();
    }

    let cleaned = spaces().replace_all(&cleaned, " ");
    let cleaned = blank_lines().replace_all(&cleaned, "\n\n");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_html_tags() {
        let cleaned = clean_for_analysis(
            "<p>I <b>love</b> this product</p>",
            &PreprocessOptions::default(),
        );
        assert_eq!(cleaned, "I love this product");
    }

    #[test]
    fn strips_urls() {
        let cleaned = clean_for_analysis(
            "Check https://example.com/review?id=1 for details",
            &PreprocessOptions::default(),
        );
        assert_eq!(cleaned, "Check for details");
    }

    #[test]
    fn strips_emails() {
        let cleaned = clean_for_analysis(
            "Contact support@example.com about this",
            &PreprocessOptions::default(),
        );
        assert_eq!(cleaned, "Contact about this");
    }

    #[test]
    fn preserves_sentiment_bearing_punctuation_and_case() {
        let text = "I LOVE this!!! Absolutely amazing :)";
        assert_eq!(
            clean_for_analysis(text, &PreprocessOptions::default()),
            text
        );
    }

    #[test]
    fn collapses_spaces_and_tabs() {
        let cleaned = clean_for_analysis("too  \t many   spaces", &PreprocessOptions::default());
        assert_eq!(cleaned, "too many spaces");
    }

    #[test]
    fn collapses_blank_lines_but_keeps_breaks() {
        let cleaned =
            clean_for_analysis("first part\n\n\n\nsecond part", &PreprocessOptions::default());
        assert_eq!(cleaned, "first part\n\nsecond part");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_for_analysis("", &PreprocessOptions::default()), "");
        assert_eq!(clean_for_analysis("   ", &PreprocessOptions::default()), "");
    }

    #[test]
    fn toggles_disable_passes() {
        let keep_urls = PreprocessOptions {
            strip_urls: false,
            ..PreprocessOptions::default()
        };
        let cleaned = clean_for_analysis("see https://example.com now", &keep_urls);
        assert_eq!(cleaned, "see https://example.com now");
    }
}
