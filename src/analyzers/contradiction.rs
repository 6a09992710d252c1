//! Contradiction detection.
//!
//! Three independent rules feed one ranked list:
//! - pattern: a configured regex matches two nearby sentences read together
//! - negated vocabulary: nearby sentences share vocabulary but only one is negated
//! - sentiment shift: adjacent segments swing by more than a threshold

use regex::{Regex, RegexBuilder};

use super::{AnalysisContext, Analyzer, AnalyzerKind};
use crate::config::models::{ContradictionConfig, Lexicon};
use crate::error::AnalysisError;
use crate::text::{content_words, preview, round_to, split_sentences, tokens};
use crate::types::{Contradiction, ContradictionKind, Segment, TranscriptAnalysis};

/// Minimum length of a word counted as shared vocabulary.
const SHARED_WORD_CHARS: usize = 4;
const MAX_TOPICS: usize = 5;
const PREVIEW_CHARS: usize = 80;

/// Ranked contradictions (at most `max_results`) and how many were found in total.
///
/// Fails only when a configured pattern is not a valid regex.
pub fn detect_contradictions(
    text: &str,
    segments: &[Segment],
    lexicon: &Lexicon,
    config: &ContradictionConfig,
) -> Result<(Vec<Contradiction>, usize), AnalysisError> {
    let patterns = compile_patterns(config)?;
    let sentences = split_sentences(text);
    let window = config.window.max(1);

    let mut found = Vec::new();
    for i in 0..sentences.len() {
        let last = (i + window).min(sentences.len().saturating_sub(1));
        for j in (i + 1)..=last {
            let (first, second) = (&sentences[i], &sentences[j]);
            if let Some(c) = pattern_rule(first, second, &patterns) {
                found.push(c);
            }
            if let Some(c) = vocabulary_rule(first, second, lexicon, config) {
                found.push(c);
            }
        }
    }
    found.extend(sentiment_shifts(segments, config.sentiment_jump_threshold));

    let total = found.len();
    // stable: equal scores keep discovery order
    found.sort_by(|a, b| b.score.total_cmp(&a.score));
    found.truncate(config.max_results);
    Ok((found, total))
}

struct CompiledPattern {
    regex: Regex,
    label: String,
    base_score: f64,
}

fn compile_patterns(config: &ContradictionConfig) -> Result<Vec<CompiledPattern>, AnalysisError> {
    config
        .patterns
        .iter()
        .map(|p| -> Result<CompiledPattern, AnalysisError> {
            let regex = RegexBuilder::new(&p.pattern)
                .dot_matches_new_line(true)
                .build()
                .map_err(|e| {
                    AnalysisError::component(
                        AnalyzerKind::ContradictionDetection.name(),
                        format!("invalid pattern {:?}: {e}", p.pattern),
                    )
                })?;
            Ok(CompiledPattern {
                regex,
                label: p.label.clone(),
                base_score: p.base_score,
            })
        })
        .collect()
}

/// First matching pattern wins; longer pairs score slightly higher.
fn pattern_rule(first: &str, second: &str, patterns: &[CompiledPattern]) -> Option<Contradiction> {
    let combined = format!("{} {}", first.to_lowercase(), second.to_lowercase());
    let pattern = patterns.iter().find(|p| p.regex.is_match(&combined))?;

    let words = combined.split_whitespace().count();
    let score = (pattern.base_score + 0.01 * words as f64).min(1.0);

    let mut topics: Vec<String> = Vec::new();
    for word in content_words(&combined, SHARED_WORD_CHARS + 1) {
        if topics.len() == MAX_TOPICS {
            break;
        }
        if !topics.contains(&word) {
            topics.push(word);
        }
    }

    Some(Contradiction {
        text1: first.to_string(),
        text2: second.to_string(),
        score: round_to(score.clamp(0.0, 1.0), 2),
        kind: ContradictionKind::Pattern,
        description: pattern.label.clone(),
        topics,
    })
}

/// Fires when exactly one sentence is negated and they share enough vocabulary,
/// or the negated sentence negates a shared word directly ("não gosto").
fn vocabulary_rule(
    first: &str,
    second: &str,
    lexicon: &Lexicon,
    config: &ContradictionConfig,
) -> Option<Contradiction> {
    let tokens1 = tokens(first);
    let tokens2 = tokens(second);
    let negated1 = has_negation(&tokens1, &lexicon.negation);
    let negated2 = has_negation(&tokens2, &lexicon.negation);
    if negated1 == negated2 {
        return None;
    }

    let words2 = content_words(second, SHARED_WORD_CHARS);
    let mut shared: Vec<String> = Vec::new();
    for word in content_words(first, SHARED_WORD_CHARS) {
        if words2.contains(&word) && !shared.contains(&word) {
            shared.push(word);
        }
    }
    if shared.is_empty() {
        return None;
    }

    let negated_tokens = if negated1 { &tokens1 } else { &tokens2 };
    let direct = directly_negated(negated_tokens, &shared, &lexicon.negation);
    if shared.len() < config.min_shared_words && !direct {
        return None;
    }

    let score = (0.6 + 0.1 * shared.len() as f64).min(config.max_vocabulary_score);
    let description = format!("negated statement about: {}", shared.join(", "));
    shared.truncate(MAX_TOPICS);

    Some(Contradiction {
        text1: first.to_string(),
        text2: second.to_string(),
        score: round_to(score.clamp(0.0, 1.0), 2),
        kind: ContradictionKind::NegatedVocabulary,
        description,
        topics: shared,
    })
}

fn has_negation(tokens: &[String], negation: &[String]) -> bool {
    tokens.iter().any(|t| negation.contains(t))
}

fn directly_negated(tokens: &[String], shared: &[String], negation: &[String]) -> bool {
    tokens
        .windows(2)
        .any(|pair| negation.contains(&pair[0]) && shared.contains(&pair[1]))
}

fn sentiment_shifts(segments: &[Segment], threshold: f64) -> Vec<Contradiction> {
    segments
        .windows(2)
        .filter_map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            let diff = (a.sentiment - b.sentiment).abs();
            if diff <= threshold {
                return None;
            }

            let words_b = content_words(&b.text, SHARED_WORD_CHARS);
            let mut topics: Vec<String> = Vec::new();
            for word in content_words(&a.text, SHARED_WORD_CHARS) {
                if topics.len() == MAX_TOPICS {
                    break;
                }
                if words_b.contains(&word) && !topics.contains(&word) {
                    topics.push(word);
                }
            }

            Some(Contradiction {
                text1: preview(&a.text, PREVIEW_CHARS),
                text2: preview(&b.text, PREVIEW_CHARS),
                score: round_to((0.4 + diff).min(1.0), 2),
                kind: ContradictionKind::SentimentShift,
                description: format!(
                    "emotional swing of {diff:.2} between segments {} and {}",
                    a.index + 1,
                    b.index + 1
                ),
                topics,
            })
        })
        .collect()
}

pub struct ContradictionAnalyzer;

impl Analyzer for ContradictionAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::ContradictionDetection
    }

    fn analyze(&self, ctx: &mut AnalysisContext<'_>) -> Result<(), AnalysisError> {
        let (contradictions, total) = detect_contradictions(
            ctx.text,
            &ctx.result.temporal_analysis,
            &ctx.options.lexicon,
            &ctx.options.analysis.contradictions,
        )?;
        ctx.result.contradictions = contradictions;
        ctx.result.total_contradictions_found = total;
        Ok(())
    }

    fn insights(&self, result: &TranscriptAnalysis) -> Vec<String> {
        match result.contradictions.first() {
            Some(top) => vec![format!(
                "{} possible contradiction(s); strongest ({:.2}): {}",
                result.total_contradictions_found, top.score, top.description
            )],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::ContradictionPattern;

    fn detect(text: &str) -> (Vec<Contradiction>, usize) {
        detect_contradictions(text, &[], &Lexicon::default(), &ContradictionConfig::default())
            .unwrap()
    }

    fn seg(index: usize, text: &str, sentiment: f64) -> Segment {
        Segment {
            index,
            text: text.into(),
            sentiment,
            cognitive_load: 0.0,
            hesitations: 0,
            word_count: text.split_whitespace().count(),
        }
    }

    #[test]
    fn direct_negation_of_shared_word() {
        let (found, total) = detect("Eu gosto muito disso. Mas não gosto daquilo.");
        assert_eq!(total, 1);
        assert_eq!(found[0].kind, ContradictionKind::NegatedVocabulary);
        assert_eq!(found[0].topics, vec!["gosto"]);
        assert_eq!(found[0].score, 0.7);
    }

    #[test]
    fn one_indirect_shared_word_is_not_enough() {
        let (found, _) = detect("A escola era boa. Nunca mais voltei para a escola.");
        assert!(found.is_empty());
    }

    #[test]
    fn two_shared_words_fire_without_direct_negation() {
        let (found, _) = detect("A escola pública ajudou. A escola pública nunca ajudou ninguém.");
        let vocab: Vec<&Contradiction> = found
            .iter()
            .filter(|c| c.kind == ContradictionKind::NegatedVocabulary)
            .collect();
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab[0].score, 0.85);
    }

    #[test]
    fn pattern_across_sentences() {
        let (found, _) = detect("Eu nunca estudei. Hoje estudo sempre.");
        let c = found
            .iter()
            .find(|c| c.kind == ContradictionKind::Pattern)
            .unwrap();
        assert_eq!(c.description, "contradição temporal");
        assert_eq!(c.score, 0.86);
    }

    #[test]
    fn pairs_beyond_window_are_ignored() {
        let text = "Nunca gostei. Um. Dois. Três. Quatro. Agora sempre.";
        let (found, _) = detect(text);
        assert!(found.iter().all(|c| c.kind != ContradictionKind::Pattern));
    }

    #[test]
    fn sentiment_shift_between_segments() {
        let segments = vec![seg(0, "tudo ótimo na escola", 0.6), seg(1, "escola péssima", -0.3)];
        let (found, _) = detect_contradictions(
            "x",
            &segments,
            &Lexicon::default(),
            &ContradictionConfig::default(),
        )
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ContradictionKind::SentimentShift);
        assert_eq!(found[0].score, 1.0);
        assert_eq!(found[0].topics, vec!["escola"]);
    }

    #[test]
    fn results_are_capped_and_ranked() {
        let text = vec!["Nunca fui e sempre vou"; 10].join(". ");
        let (found, total) = detect(&text);
        assert!(total > 5);
        assert_eq!(found.len(), 5);
        assert!(found.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn equal_scores_keep_sentence_order() {
        let text = "Eu gosto muito disso. Mas não gosto daquilo. \
                    Adoro a cidade grande. Porém não adoro o trânsito. \
                    Prefiro o trem. Jamais prefiro o avião. \
                    Nunca estudei. Hoje estudo sempre.";
        let (found, total) = detect(text);
        assert_eq!(total, 4);

        let pairs: Vec<(&str, &str, f64)> = found
            .iter()
            .map(|c| (c.text1.as_str(), c.text2.as_str(), c.score))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Nunca estudei", "Hoje estudo sempre", 0.85),
                ("Eu gosto muito disso", "Mas não gosto daquilo", 0.7),
                ("Adoro a cidade grande", "Porém não adoro o trânsito", 0.7),
                ("Prefiro o trem", "Jamais prefiro o avião", 0.7),
            ]
        );
    }

    #[test]
    fn patterns_match_across_wrapped_lines() {
        let (found, _) = detect("Eu nunca\nestudei. Hoje\nestudo sempre.");
        assert!(found.iter().any(|c| c.kind == ContradictionKind::Pattern));
    }

    #[test]
    fn invalid_pattern_is_component_error() {
        let config = ContradictionConfig {
            patterns: vec![ContradictionPattern {
                pattern: "(unclosed".into(),
                label: "broken".into(),
                base_score: 0.5,
            }],
            ..Default::default()
        };
        let err = detect_contradictions("a. b.", &[], &Lexicon::default(), &config).unwrap_err();
        assert!(matches!(err, AnalysisError::Component { .. }));
    }

    #[test]
    fn nothing_found_is_empty_not_error() {
        let (found, total) = detect("O dia estava claro. Fomos ao parque.");
        assert!(found.is_empty());
        assert_eq!(total, 0);
    }
}
