//! Text helpers shared by every analyzer.
//!
//! All matching is done on lowercased text. Tokens are maximal runs of
//! Unicode letters, so accented Portuguese words survive intact.

use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}+").unwrap());
static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Lowercased letter runs, in order of appearance.
pub fn tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokens with at least `min_len` characters (not bytes).
pub fn content_words(text: &str, min_len: usize) -> Vec<String> {
    tokens(text)
        .into_iter()
        .filter(|t| t.chars().count() >= min_len)
        .collect()
}

/// Split on runs of `.`, `!` and `?`; trimmed, empty pieces dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Like [`split_sentences`], but each sentence keeps its terminating marks.
pub fn sentences_with_marks(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BOUNDARY.find_iter(text) {
        push_sentence(&mut out, &text[start..m.end()]);
        start = m.end();
    }
    push_sentence(&mut out, &text[start..]);
    out
}

fn push_sentence(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    // a bare run of marks belongs to no sentence
    if !SENTENCE_BOUNDARY.replace_all(piece, "").trim().is_empty() {
        out.push(piece.to_string());
    }
}

/// Non-overlapping substring count. An empty needle never matches.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Population mean and standard deviation.
pub fn mean_stddev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Shorten to at most `max_chars` characters, appending an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
