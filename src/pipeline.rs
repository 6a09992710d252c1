//! Single-document analysis: runs every enabled analyzer in registry order.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::analyzers::{AnalysisContext, AnalyzerKind, StopwordSet, REGISTRY};
use crate::config::models::{AnalysisConfig, Lexicon, ProjectConfig, TopicCategory, TopicsConfig};
use crate::config::resolve_relative;
use crate::error::AnalysisError;
use crate::types::TranscriptAnalysis;

/// Everything `analyze` needs besides the text, resolved once per run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub analysis: AnalysisConfig,
    pub lexicon: Lexicon,
    pub topics: Vec<TopicCategory>,
    pub stopwords: StopwordSet,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            lexicon: Lexicon::default(),
            topics: TopicsConfig::default().categories,
            stopwords: StopwordSet::builtin(),
        }
    }
}

impl AnalysisOptions {
    /// Resolve a loaded config; relative stopword paths are taken from `base_dir`.
    pub fn from_config(config: &ProjectConfig, base_dir: &Path) -> Result<Self, AnalysisError> {
        let wf = &config.analysis.word_frequency;
        let stopwords_file = wf
            .stopwords_file
            .as_deref()
            .map(|p| resolve_relative(p, base_dir));
        let stopwords = StopwordSet::load(stopwords_file.as_deref(), &wf.extra_stopwords)?;

        Ok(Self {
            analysis: config.analysis.clone(),
            lexicon: config.lexicon.clone().lowercased(),
            topics: config.topics.categories.clone(),
            stopwords,
        })
    }

    pub fn without_jitter(mut self) -> Self {
        self.analysis.scoring.jitter = 0.0;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.analysis.scoring.seed = Some(seed);
        self
    }

    pub fn is_enabled(&self, kind: AnalyzerKind) -> bool {
        !self
            .analysis
            .disabled_analyzers
            .iter()
            .any(|name| name == kind.name())
    }
}

/// Analyse one transcript.
///
/// Empty or whitespace-only text is an `Input` error. A failing analyzer leaves
/// its fields at their defaults and adds a warning; nothing else aborts.
pub fn analyze(
    filename: &str,
    text: &str,
    options: &AnalysisOptions,
) -> Result<TranscriptAnalysis, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::Input(format!("{filename} is empty")));
    }

    let rng = match options.analysis.scoring.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut ctx = AnalysisContext {
        text,
        options,
        rng,
        result: TranscriptAnalysis::empty(filename),
    };

    let enabled: Vec<_> = REGISTRY
        .iter()
        .filter(|d| options.is_enabled(d.kind))
        .map(|d| d.kind.build())
        .collect();

    for analyzer in &enabled {
        debug!(analyzer = %analyzer.kind(), file = filename, "running analyzer");
        match analyzer.analyze(&mut ctx) {
            Ok(()) => {}
            Err(e @ AnalysisError::Component { .. }) => {
                warn!(file = filename, "{e}");
                ctx.result.warnings.push(e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    let insights: Vec<String> = enabled
        .iter()
        .flat_map(|a| a.insights(&ctx.result))
        .collect();
    ctx.result.insights = insights;

    Ok(ctx.result)
}

/// Read a transcript file; unreadable or non-UTF-8 files are `Input` errors.
pub fn read_transcript(path: &Path) -> Result<String, AnalysisError> {
    std::fs::read_to_string(path)
        .map_err(|e| AnalysisError::Input(format!("cannot read {}: {e}", path.display())))
}
