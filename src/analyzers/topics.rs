use super::{AnalysisContext, Analyzer, AnalyzerKind};
use crate::config::models::TopicCategory;
use crate::error::AnalysisError;
use crate::text::{count_occurrences, round_to};
use crate::types::{Topic, TranscriptAnalysis, WordCount};

/// Label used when no configured category matches.
pub const FALLBACK_LABEL: &str = "Geral";
const WORDS_PER_TOPIC: usize = 8;

/// Keyword-category topics and their normalised distribution.
///
/// A category scores the total substring count of its keywords; zero-score
/// categories are skipped. Topics keep configured category order.
pub fn match_topics(
    text: &str,
    word_freq: &[WordCount],
    categories: &[TopicCategory],
) -> (Vec<Topic>, Vec<f64>) {
    let lower = text.to_lowercase();

    let mut scored: Vec<(&str, &[String], usize)> = categories
        .iter()
        .map(|c| {
            let score = c
                .keywords
                .iter()
                .map(|k| count_occurrences(&lower, &k.to_lowercase()))
                .sum();
            (c.label.as_str(), c.keywords.as_slice(), score)
        })
        .filter(|(_, _, score)| *score > 0)
        .collect();

    if scored.is_empty() {
        let no_keywords: &[String] = &[];
        scored.push((FALLBACK_LABEL, no_keywords, text.split_whitespace().count()));
    }

    let total: usize = scored.iter().map(|(_, _, s)| s).sum();
    let distribution: Vec<f64> = scored
        .iter()
        .map(|(_, _, s)| {
            if total == 0 {
                0.0
            } else {
                round_to(*s as f64 / total as f64, 4)
            }
        })
        .collect();

    let topics = scored
        .iter()
        .zip(&distribution)
        .enumerate()
        .map(|(i, ((label, keywords, _), weight))| Topic {
            id: format!("topic_{i}"),
            label: label.to_string(),
            words: topic_words(word_freq, keywords, i),
            weight: *weight,
        })
        .collect();

    (topics, distribution)
}

/// Frequent words containing one of the keywords, else the i-th slice of the table.
fn topic_words(word_freq: &[WordCount], keywords: &[String], i: usize) -> Vec<String> {
    let related: Vec<String> = word_freq
        .iter()
        .filter(|w| keywords.iter().any(|k| w.word.contains(k.as_str())))
        .take(WORDS_PER_TOPIC)
        .map(|w| w.word.clone())
        .collect();
    if !related.is_empty() {
        return related;
    }

    let start = (i * WORDS_PER_TOPIC).min(word_freq.len());
    let end = ((i + 1) * WORDS_PER_TOPIC).min(word_freq.len());
    word_freq[start..end].iter().map(|w| w.word.clone()).collect()
}

pub struct TopicAnalyzer;

impl Analyzer for TopicAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::TopicModeling
    }

    fn analyze(&self, ctx: &mut AnalysisContext<'_>) -> Result<(), AnalysisError> {
        let (topics, distribution) =
            match_topics(ctx.text, &ctx.result.word_frequencies, &ctx.options.topics);
        ctx.result.topics = topics;
        ctx.result.topic_distribution = distribution;
        Ok(())
    }

    fn insights(&self, result: &TranscriptAnalysis) -> Vec<String> {
        let dominant = result
            .topics
            .iter()
            .fold(None::<&Topic>, |best, t| match best {
                Some(b) if b.weight >= t.weight => Some(b),
                _ => Some(t),
            });
        match dominant {
            Some(t) => vec![format!(
                "Dominant theme: {} ({:.0}% of keyword hits)",
                t.label,
                t.weight * 100.0
            )],
            None => Vec::new(),
        }
    }
}
