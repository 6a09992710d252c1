use std::collections::HashMap;

use super::{AnalysisContext, Analyzer, AnalyzerKind, StopwordSet};
use crate::error::AnalysisError;
use crate::text::tokens;
use crate::types::{TranscriptAnalysis, WordCount};

/// Shortest token that counts as a word.
const MIN_WORD_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct WordFrequencyTable {
    /// Descending by count; ties keep first-occurrence order.
    pub words: Vec<WordCount>,
    /// Words of at least three letters, stopwords included.
    pub total_words: usize,
    /// Distinct non-stopword words before truncation.
    pub unique_words: usize,
}

pub fn word_frequencies(
    text: &str,
    stopwords: &StopwordSet,
    top_n: usize,
    min_frequency: usize,
) -> WordFrequencyTable {
    let words: Vec<String> = tokens(text)
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_WORD_CHARS)
        .collect();
    let total_words = words.len();

    // Vec keeps first-occurrence order, the map indexes into it
    let mut counts: Vec<WordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for word in words {
        if stopwords.contains(&word) {
            continue;
        }
        match index.get(&word) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push(WordCount { word, count: 1 });
            }
        }
    }
    let unique_words = counts.len();

    counts.retain(|w| w.count >= min_frequency);
    // stable: equal counts stay in discovery order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);

    WordFrequencyTable {
        words: counts,
        total_words,
        unique_words,
    }
}

pub struct WordFrequencyAnalyzer;

impl Analyzer for WordFrequencyAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::WordFrequency
    }

    fn analyze(&self, ctx: &mut AnalysisContext<'_>) -> Result<(), AnalysisError> {
        let cfg = &ctx.options.analysis.word_frequency;
        let table = word_frequencies(
            ctx.text,
            &ctx.options.stopwords,
            cfg.top_n,
            cfg.min_frequency,
        );
        ctx.result.word_frequencies = table.words;
        ctx.result.total_words = table.total_words;
        ctx.result.unique_words = table.unique_words;
        Ok(())
    }

    fn insights(&self, result: &TranscriptAnalysis) -> Vec<String> {
        match result.word_frequencies.first() {
            Some(top) => vec![format!(
                "Most frequent word: \"{}\" ({} occurrences, {} distinct words)",
                top.word, top.count, result.unique_words
            )],
            None => Vec::new(),
        }
    }
}
