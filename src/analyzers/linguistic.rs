use super::scorer::hesitations_by_marker;
use super::{AnalysisContext, Analyzer, AnalyzerKind};
use crate::config::models::Lexicon;
use crate::error::AnalysisError;
use crate::text::{mean_stddev, round_to, split_sentences};
use crate::types::{HesitationCount, LinguisticPatterns, TranscriptAnalysis};

const MAX_EXAMPLES: usize = 5;

/// Marker statistics over the raw text, independent of segmentation.
pub fn detect_patterns(text: &str, lexicon: &Lexicon) -> LinguisticPatterns {
    let sentences: Vec<String> = split_sentences(text)
        .into_iter()
        .map(|s| s.to_lowercase())
        .collect();
    let sentence_count = sentences.len();

    let (certainty_count, certainty_examples) =
        sentences_with_phrases(&sentences, &lexicon.certainty);
    let (uncertainty_count, uncertainty_examples) =
        sentences_with_phrases(&sentences, &lexicon.uncertainty);

    let word_count = text.split_whitespace().count();
    let by_marker: Vec<HesitationCount> = hesitations_by_marker(text, &lexicon.hesitation_markers)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(marker, count)| HesitationCount {
            marker,
            count,
            percentage: percent(count, word_count),
        })
        .collect();
    let total_hesitations = by_marker.iter().map(|h| h.count).sum();

    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    let (avg, stddev) = mean_stddev(&lengths);

    LinguisticPatterns {
        certainty_count,
        certainty_percentage: percent(certainty_count, sentence_count),
        certainty_examples,
        uncertainty_count,
        uncertainty_percentage: percent(uncertainty_count, sentence_count),
        uncertainty_examples,
        hesitations_by_marker: by_marker,
        total_hesitations,
        sentence_count,
        avg_sentence_length: round_to(avg, 2),
        sentence_length_stddev: if lengths.len() < 2 { 0.0 } else { round_to(stddev, 2) },
    }
}

/// Sentences containing at least one phrase, plus the distinct phrases seen (up to five).
fn sentences_with_phrases(sentences: &[String], phrases: &[String]) -> (usize, Vec<String>) {
    let mut count = 0;
    let mut examples: Vec<String> = Vec::new();

    for sentence in sentences {
        let found: Vec<&String> = phrases
            .iter()
            .filter(|p| !p.is_empty() && sentence.contains(p.as_str()))
            .collect();
        if found.is_empty() {
            continue;
        }
        count += 1;
        for phrase in found {
            if examples.len() < MAX_EXAMPLES && !examples.contains(phrase) {
                examples.push(phrase.clone());
            }
        }
    }
    (count, examples)
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, 2)
}

pub struct LinguisticPatternsAnalyzer;

impl Analyzer for LinguisticPatternsAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::LinguisticPatterns
    }

    fn analyze(&self, ctx: &mut AnalysisContext<'_>) -> Result<(), AnalysisError> {
        ctx.result.linguistic_patterns = detect_patterns(ctx.text, &ctx.options.lexicon);
        Ok(())
    }

    fn insights(&self, result: &TranscriptAnalysis) -> Vec<String> {
        let p = &result.linguistic_patterns;
        let mut out = Vec::new();

        if p.certainty_count > 0 || p.uncertainty_count > 0 {
            let stance = if p.certainty_count >= p.uncertainty_count {
                "assertive"
            } else {
                "tentative"
            };
            out.push(format!(
                "Speech is mostly {stance}: {} certainty vs {} uncertainty sentences",
                p.certainty_count, p.uncertainty_count
            ));
        }

        if let Some(top) = p.hesitations_by_marker.iter().max_by_key(|h| h.count) {
            out.push(format!(
                "{} hesitation(s), most often \"{}\" ({}x)",
                p.total_hesitations, top.marker, top.count
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> LinguisticPatterns {
        detect_patterns(text, &Lexicon::default())
    }

    #[test]
    fn counts_sentences_not_phrases() {
        let p = detect("Com certeza, obviamente. Talvez sim. Acho que não sei.");
        assert_eq!(p.sentence_count, 3);
        assert_eq!(p.certainty_count, 1);
        assert_eq!(p.uncertainty_count, 2);
        assert_eq!(p.certainty_examples, vec!["com certeza", "obviamente"]);
        assert_eq!(p.certainty_percentage, 33.33);
    }

    #[test]
    fn plain_text_has_no_markers() {
        let p = detect("Eu gosto muito disso. Mas não gosto daquilo.");
        assert_eq!(p.certainty_count, 0);
        assert_eq!(p.uncertainty_count, 0);
        assert_eq!(p.total_hesitations, 0);
        assert!(p.hesitations_by_marker.is_empty());
    }

    #[test]
    fn hesitation_percentages_use_word_count() {
        let p = detect("tipo isso tipo aquilo");
        assert_eq!(p.total_hesitations, 2);
        assert_eq!(p.hesitations_by_marker[0].marker, "tipo");
        assert_eq!(p.hesitations_by_marker[0].percentage, 50.0);
    }

    #[test]
    fn sentence_length_statistics() {
        let p = detect("Uma duas. Uma duas três quatro.");
        assert_eq!(p.avg_sentence_length, 3.0);
        assert_eq!(p.sentence_length_stddev, 1.0);

        let single = detect("Apenas uma frase aqui");
        assert_eq!(single.sentence_length_stddev, 0.0);
    }
}
