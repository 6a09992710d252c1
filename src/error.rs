//! Error taxonomy for the analysis core.
//!
//! The command layer wraps these in `anyhow` for reporting; the pipeline
//! matches on the variant to decide whether a failure is terminal.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Empty or unreadable transcript. Terminal for that document only.
    #[error("input error: {0}")]
    Input(String),

    /// A single analyzer failed. The pipeline substitutes an empty result.
    #[error("{analyzer} failed: {message}")]
    Component { analyzer: String, message: String },

    /// Malformed or missing configuration. Terminal for the whole run.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub fn component(analyzer: &str, message: impl Into<String>) -> Self {
        AnalysisError::Component {
            analyzer: analyzer.to_string(),
            message: message.into(),
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, AnalysisError::Config(_))
    }
}
