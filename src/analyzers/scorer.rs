use rand::Rng;

use crate::config::models::{Lexicon, ScoringConfig};
use crate::text::{count_occurrences, round_to};

/// Exclamation marks beyond this many add nothing.
const MAX_EXCLAMATIONS: usize = 3;
/// Tokens longer than this count toward cognitive load.
const LONG_WORD_CHARS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentScore {
    pub sentiment: f64,
    pub cognitive_load: f64,
    pub hesitations: usize,
    pub word_count: usize,
}

/// Lexicon-based scores for one segment.
///
/// Lexicon terms match as substrings of the lowercased text, so stems such as
/// `preocup` cover every inflection.
pub fn score<R: Rng>(
    segment_text: &str,
    lexicon: &Lexicon,
    scoring: &ScoringConfig,
    rng: &mut R,
) -> SegmentScore {
    let lower = segment_text.to_lowercase();
    let words: Vec<&str> = segment_text.split_whitespace().collect();

    let positive = lexicon_hits(&lower, &lexicon.positive);
    let negative = lexicon_hits(&lower, &lexicon.negative);

    let mut sentiment = scoring.increment * (positive as f64 - negative as f64);
    if positive > 0 {
        let exclamations = lower.matches('!').count().min(MAX_EXCLAMATIONS);
        sentiment += scoring.exclamation_bonus * exclamations as f64;
    }
    if negative > 0 && lower.contains('?') {
        sentiment -= scoring.question_negative_penalty;
    }
    if scoring.jitter > 0.0 {
        sentiment += rng.gen_range(-scoring.jitter..=scoring.jitter);
    }

    let long_words = words
        .iter()
        .filter(|w| w.chars().count() > LONG_WORD_CHARS)
        .count();
    let cognitive_load = if words.is_empty() {
        0.0
    } else {
        long_words as f64 / words.len() as f64
    };

    SegmentScore {
        sentiment: round_to(sentiment.clamp(-1.0, 1.0), 3),
        cognitive_load: round_to(cognitive_load, 3),
        hesitations: count_hesitations(segment_text, &lexicon.hesitation_markers),
        word_count: words.len(),
    }
}

/// Number of lexicon terms present at least once.
pub fn lexicon_hits(lower_text: &str, terms: &[String]) -> usize {
    terms
        .iter()
        .filter(|t| !t.is_empty() && lower_text.contains(t.as_str()))
        .count()
}

/// Canonical hesitation count: substring occurrences of every marker.
/// Segment, global and pattern-level totals all go through here.
pub fn count_hesitations(text: &str, markers: &[String]) -> usize {
    hesitations_by_marker(text, markers)
        .iter()
        .map(|(_, count)| count)
        .sum()
}

/// Per-marker occurrence counts, in marker order, zero counts included.
pub fn hesitations_by_marker(text: &str, markers: &[String]) -> Vec<(String, usize)> {
    let lower = text.to_lowercase();
    markers
        .iter()
        .map(|m| (m.clone(), count_occurrences(&lower, &m.to_lowercase())))
        .collect()
}
