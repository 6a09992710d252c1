//! Subcommand implementations. Each returns what `main` prints or the exit decision.

pub mod analyze;
pub mod analyze_file;
pub mod analyzers;
pub mod compare;
pub mod create;
pub mod list;

use std::str::FromStr;

/// `--format` values shared by the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!(
                "invalid format '{s}': expected text, json or markdown"
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Scoring overrides from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringOverrides {
    pub seed: Option<u64>,
    pub no_jitter: bool,
}

impl ScoringOverrides {
    pub fn apply(&self, mut options: crate::AnalysisOptions) -> crate::AnalysisOptions {
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        if self.no_jitter {
            options = options.without_jitter();
        }
        options
    }
}
