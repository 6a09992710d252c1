use std::path::Path;

use anyhow::{Context, Result};

use super::{OutputFormat, ScoringOverrides};
use crate::config::loader;
use crate::config::Env;
use crate::pipeline::{analyze, read_transcript, AnalysisOptions};
use crate::report::render_markdown;

/// `analyze-file <path>`: one transcript outside any project.
///
/// Without `--config` the built-in defaults (plus the global YAML) apply.
pub fn run(
    env: &dyn Env,
    path: &Path,
    config_path: Option<&Path>,
    format: OutputFormat,
    overrides: ScoringOverrides,
) -> Result<String> {
    let (config, base_dir) = match config_path {
        Some(cfg) => {
            let base = cfg.parent().unwrap_or(Path::new(".")).to_path_buf();
            (loader::load_file(env, cfg)?, base)
        }
        None => (loader::load_defaults(env)?, std::env::current_dir()?),
    };
    let options = overrides.apply(AnalysisOptions::from_config(&config, &base_dir)?);

    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let text = read_transcript(path)?;
    let result = analyze(&filename, &text, &options)
        .with_context(|| format!("failed to analyse {}", path.display()))?;

    Ok(match format {
        OutputFormat::Markdown => render_markdown(&result),
        OutputFormat::Json | OutputFormat::Text => {
            let mut json = serde_json::to_string_pretty(&result)?;
            json.push('\n');
            json
        }
    })
}
