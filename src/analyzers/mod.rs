//! Analysis steps and their static registry.
//!
//! Every step implements [`Analyzer`] and writes its output into the shared
//! [`AnalysisContext`]. Steps run in registry order, so later steps can read
//! what earlier ones produced (segments, word frequencies).

pub mod concept_network;
pub mod contradiction;
pub mod global_metrics;
pub mod linguistic;
pub mod scorer;
pub mod segmenter;
pub mod stopwords;
pub mod temporal;
pub mod topics;
pub mod word_frequency;

use rand::rngs::StdRng;

use crate::error::AnalysisError;
use crate::pipeline::AnalysisOptions;
use crate::types::TranscriptAnalysis;

pub use concept_network::{build_network, ConceptNetworkAnalyzer};
pub use contradiction::{detect_contradictions, ContradictionAnalyzer};
pub use global_metrics::{aggregate, GlobalMetricsAnalyzer};
pub use linguistic::{detect_patterns, LinguisticPatternsAnalyzer};
pub use scorer::{count_hesitations, score, SegmentScore};
pub use segmenter::segment;
pub use stopwords::StopwordSet;
pub use temporal::TemporalAnalyzer;
pub use topics::{match_topics, TopicAnalyzer};
pub use word_frequency::{word_frequencies, WordFrequencyAnalyzer, WordFrequencyTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyzerKind {
    WordFrequency,
    TemporalAnalysis,
    GlobalMetrics,
    LinguisticPatterns,
    TopicModeling,
    ConceptNetwork,
    ContradictionDetection,
}

#[derive(Debug)]
pub struct AnalyzerDescriptor {
    pub kind: AnalyzerKind,
    pub name: &'static str,
    pub description: &'static str,
}

/// All analysis steps, in execution order.
pub static REGISTRY: &[AnalyzerDescriptor] = &[
    AnalyzerDescriptor {
        kind: AnalyzerKind::WordFrequency,
        name: "word_frequency",
        description: "Most frequent content words, stopwords removed",
    },
    AnalyzerDescriptor {
        kind: AnalyzerKind::TemporalAnalysis,
        name: "temporal_analysis",
        description: "Segments the transcript and scores sentiment, cognitive load and hesitations",
    },
    AnalyzerDescriptor {
        kind: AnalyzerKind::GlobalMetrics,
        name: "global_metrics",
        description: "Mean sentiment, emotional openness, thematic coherence, hesitation total",
    },
    AnalyzerDescriptor {
        kind: AnalyzerKind::LinguisticPatterns,
        name: "linguistic_patterns",
        description: "Certainty and uncertainty markers, hesitations by marker, sentence lengths",
    },
    AnalyzerDescriptor {
        kind: AnalyzerKind::TopicModeling,
        name: "topic_modeling",
        description: "Keyword-category topic matching and distribution",
    },
    AnalyzerDescriptor {
        kind: AnalyzerKind::ConceptNetwork,
        name: "concept_network",
        description: "Sentence-level co-occurrence graph of frequent words",
    },
    AnalyzerDescriptor {
        kind: AnalyzerKind::ContradictionDetection,
        name: "contradiction_detection",
        description: "Pattern, negated-vocabulary and sentiment-shift contradictions",
    },
];

impl AnalyzerKind {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyzerKind::WordFrequency => "word_frequency",
            AnalyzerKind::TemporalAnalysis => "temporal_analysis",
            AnalyzerKind::GlobalMetrics => "global_metrics",
            AnalyzerKind::LinguisticPatterns => "linguistic_patterns",
            AnalyzerKind::TopicModeling => "topic_modeling",
            AnalyzerKind::ConceptNetwork => "concept_network",
            AnalyzerKind::ContradictionDetection => "contradiction_detection",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        REGISTRY.iter().find(|d| d.name == name).map(|d| d.kind)
    }

    /// The step implementing this kind.
    pub fn build(&self) -> Box<dyn Analyzer> {
        match self {
            AnalyzerKind::WordFrequency => Box::new(WordFrequencyAnalyzer),
            AnalyzerKind::TemporalAnalysis => Box::new(TemporalAnalyzer),
            AnalyzerKind::GlobalMetrics => Box::new(GlobalMetricsAnalyzer),
            AnalyzerKind::LinguisticPatterns => Box::new(LinguisticPatternsAnalyzer),
            AnalyzerKind::TopicModeling => Box::new(TopicAnalyzer),
            AnalyzerKind::ConceptNetwork => Box::new(ConceptNetworkAnalyzer),
            AnalyzerKind::ContradictionDetection => Box::new(ContradictionAnalyzer),
        }
    }
}

impl std::fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-run state threaded through every analyzer.
pub struct AnalysisContext<'a> {
    pub text: &'a str,
    pub options: &'a AnalysisOptions,
    /// Jitter source for sentiment scoring.
    pub rng: StdRng,
    pub result: TranscriptAnalysis,
}

pub trait Analyzer {
    fn kind(&self) -> AnalyzerKind;

    /// Compute and store this step's fields in `ctx.result`.
    /// On error nothing must have been written.
    fn analyze(&self, ctx: &mut AnalysisContext<'_>) -> Result<(), AnalysisError>;

    /// Human-readable observations about the finished result.
    fn insights(&self, _result: &TranscriptAnalysis) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_round_trip() {
        for d in REGISTRY {
            assert_eq!(d.kind.name(), d.name);
            assert_eq!(AnalyzerKind::from_name(d.name), Some(d.kind));
            assert_eq!(d.kind.build().kind(), d.kind);
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(AnalyzerKind::from_name("wordcloud"), None);
    }

    #[test]
    fn frequency_and_segments_run_before_their_consumers() {
        let pos = |k: AnalyzerKind| REGISTRY.iter().position(|d| d.kind == k).unwrap();
        assert!(pos(AnalyzerKind::WordFrequency) < pos(AnalyzerKind::ConceptNetwork));
        assert!(pos(AnalyzerKind::WordFrequency) < pos(AnalyzerKind::TopicModeling));
        assert!(pos(AnalyzerKind::TemporalAnalysis) < pos(AnalyzerKind::GlobalMetrics));
        assert!(pos(AnalyzerKind::TemporalAnalysis) < pos(AnalyzerKind::ContradictionDetection));
    }
}
