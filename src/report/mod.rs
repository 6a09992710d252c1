//! Human-readable renderings of a `TranscriptAnalysis`.

pub mod charts;
pub mod markdown;

pub use charts::render_charts;
pub use markdown::render_markdown;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::models::OutputConfig;
use crate::error::AnalysisError;
use crate::types::TranscriptAnalysis;

pub const ANALYSIS_FILE: &str = "analysis.json";
pub const REPORT_FILE: &str = "report.md";
pub const CHARTS_FILE: &str = "charts.txt";

/// Write the enabled artifacts into `dir`, returning the paths written.
pub fn write_outputs(
    dir: &Path,
    result: &TranscriptAnalysis,
    output: &OutputConfig,
) -> Result<Vec<PathBuf>, AnalysisError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    if output.generate_json {
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| AnalysisError::Io(std::io::Error::other(e)))?;
        written.push(write(dir.join(ANALYSIS_FILE), &json)?);
    }
    if output.generate_markdown {
        written.push(write(dir.join(REPORT_FILE), &render_markdown(result))?);
    }
    if output.generate_visuals {
        written.push(write(dir.join(CHARTS_FILE), &render_charts(result))?);
    }
    Ok(written)
}

fn write(path: PathBuf, content: &str) -> Result<PathBuf, AnalysisError> {
    std::fs::write(&path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "artifact written");
    Ok(path)
}
