use super::scorer::score;
use super::segmenter::segment;
use super::{AnalysisContext, Analyzer, AnalyzerKind};
use crate::error::AnalysisError;
use crate::types::{Segment, TranscriptAnalysis};

/// Segments the transcript and scores every segment.
pub struct TemporalAnalyzer;

impl Analyzer for TemporalAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::TemporalAnalysis
    }

    fn analyze(&self, ctx: &mut AnalysisContext<'_>) -> Result<(), AnalysisError> {
        let options = ctx.options;
        let temporal = &options.analysis.temporal;
        let max_segments = temporal.resolve_max_segments(ctx.text.chars().count());
        let rng = &mut ctx.rng;

        let segments: Vec<Segment> = segment(ctx.text, max_segments, temporal)
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let s = score(&text, &options.lexicon, &options.analysis.scoring, rng);
                Segment {
                    index,
                    text,
                    sentiment: s.sentiment,
                    cognitive_load: s.cognitive_load,
                    hesitations: s.hesitations,
                    word_count: s.word_count,
                }
            })
            .collect();

        ctx.result.temporal_analysis = segments;
        Ok(())
    }

    fn insights(&self, result: &TranscriptAnalysis) -> Vec<String> {
        let segments = &result.temporal_analysis;
        if segments.is_empty() {
            return Vec::new();
        }

        let mut out = vec![format!("Transcript split into {} segment(s)", segments.len())];
        if segments.len() > 1 {
            // first maximum / first minimum win ties
            let peak = segments
                .iter()
                .fold(&segments[0], |best, s| if s.sentiment > best.sentiment { s } else { best });
            let valley = segments
                .iter()
                .fold(&segments[0], |worst, s| if s.sentiment < worst.sentiment { s } else { worst });
            out.push(format!(
                "Sentiment peaks in segment {} ({:.2}) and dips in segment {} ({:.2})",
                peak.index + 1,
                peak.sentiment,
                valley.index + 1,
                valley.sentiment
            ));
        }
        out
    }
}
