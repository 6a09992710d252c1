use std::collections::HashSet;

use super::scorer::count_hesitations;
use super::{AnalysisContext, Analyzer, AnalyzerKind};
use crate::config::models::{GlobalMetricsConfig, Lexicon};
use crate::error::AnalysisError;
use crate::text::{mean_stddev, round_to, tokens};
use crate::types::{GlobalMetrics, Segment, TranscriptAnalysis};

/// Document-level metrics from the scored segments and the raw text.
pub fn aggregate(
    segments: &[Segment],
    text: &str,
    lexicon: &Lexicon,
    config: &GlobalMetricsConfig,
) -> GlobalMetrics {
    let sentiments: Vec<f64> = segments.iter().map(|s| s.sentiment).collect();
    let (mean, stddev) = mean_stddev(&sentiments);
    let openness = if sentiments.len() < 2 {
        config.single_segment_openness
    } else {
        stddev * stddev
    };

    let words = tokens(text);
    let coherence = if words.is_empty() {
        0.5
    } else {
        let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
        1.0 - unique.len() as f64 / words.len() as f64
    };

    GlobalMetrics {
        global_sentiment: round_to(mean.clamp(-1.0, 1.0), 3),
        thematic_coherence: round_to(coherence.clamp(0.0, 1.0), 3),
        emotional_openness: round_to(openness.max(0.0), 3),
        total_hesitations: count_hesitations(text, &lexicon.hesitation_markers),
    }
}

pub fn sentiment_label(value: f64) -> &'static str {
    if value > 0.3 {
        "positive"
    } else if value < -0.3 {
        "negative"
    } else {
        "neutral"
    }
}

pub fn coherence_label(value: f64) -> &'static str {
    if value > 0.7 {
        "high"
    } else if value > 0.4 {
        "moderate"
    } else {
        "low"
    }
}

pub fn openness_label(value: f64) -> &'static str {
    if value > 0.2 {
        "high"
    } else if value > 0.05 {
        "moderate"
    } else {
        "low"
    }
}

pub struct GlobalMetricsAnalyzer;

impl Analyzer for GlobalMetricsAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::GlobalMetrics
    }

    fn analyze(&self, ctx: &mut AnalysisContext<'_>) -> Result<(), AnalysisError> {
        ctx.result.global_metrics = aggregate(
            &ctx.result.temporal_analysis,
            ctx.text,
            &ctx.options.lexicon,
            &ctx.options.analysis.global_metrics,
        );
        Ok(())
    }

    fn insights(&self, result: &TranscriptAnalysis) -> Vec<String> {
        let m = &result.global_metrics;
        vec![
            format!(
                "Overall sentiment is {} ({:.2})",
                sentiment_label(m.global_sentiment),
                m.global_sentiment
            ),
            format!(
                "Thematic coherence is {} ({:.2})",
                coherence_label(m.thematic_coherence),
                m.thematic_coherence
            ),
            format!(
                "Emotional openness is {} ({:.3})",
                openness_label(m.emotional_openness),
                m.emotional_openness
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(index: usize, sentiment: f64) -> Segment {
        Segment {
            index,
            text: String::new(),
            sentiment,
            cognitive_load: 0.0,
            hesitations: 0,
            word_count: 0,
        }
    }

    fn run(segments: &[Segment], text: &str) -> GlobalMetrics {
        aggregate(segments, text, &Lexicon::default(), &GlobalMetricsConfig::default())
    }

    #[test]
    fn mean_and_population_variance() {
        let m = run(&[seg(0, 0.5), seg(1, -0.5)], "texto qualquer");
        assert_eq!(m.global_sentiment, 0.0);
        assert_eq!(m.emotional_openness, 0.25);
    }

    #[test]
    fn single_segment_uses_openness_floor() {
        let m = run(&[seg(0, 0.4)], "texto");
        assert_eq!(m.global_sentiment, 0.4);
        assert_eq!(m.emotional_openness, 0.1);
    }

    #[test]
    fn no_segments_means_zero_sentiment() {
        let m = run(&[], "");
        assert_eq!(m.global_sentiment, 0.0);
        assert_eq!(m.thematic_coherence, 0.5);
    }

    #[test]
    fn repetition_raises_coherence() {
        let text = vec!["escola boa"; 10].join(" ");
        let m = run(&[], &text);
        assert_eq!(m.thematic_coherence, 0.9);
        assert_eq!(run(&[], "alfa beta gama").thematic_coherence, 0.0);
    }

    #[test]
    fn hesitations_are_recounted_on_full_text() {
        let m = run(&[], "Tipo, né, hmm.");
        assert_eq!(m.total_hesitations, 3);
    }

    #[test]
    fn interpretation_thresholds() {
        assert_eq!(sentiment_label(0.31), "positive");
        assert_eq!(sentiment_label(-0.3), "neutral");
        assert_eq!(coherence_label(0.5), "moderate");
        assert_eq!(openness_label(0.01), "low");
    }
}
