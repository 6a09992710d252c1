use std::path::{Path, PathBuf};

use tracing::debug;

use super::models::ProjectConfig;
use super::Env;
use crate::analyzers::AnalyzerKind;
use crate::error::AnalysisError;

pub const PROJECT_FILENAME: &str = "project.json";
const GLOBAL_FILENAME: &str = ".transcript-analyzer.yaml";

/// Global YAML + `<project_dir>/project.json`, deep-merged, then validated.
/// The project file is required.
pub fn load_project(env: &dyn Env, project_dir: &Path) -> Result<ProjectConfig, AnalysisError> {
    let path = project_dir.join(PROJECT_FILENAME);
    if !path.exists() {
        return Err(AnalysisError::Config(format!(
            "{} not found in {}",
            PROJECT_FILENAME,
            project_dir.display()
        )));
    }
    load_file(env, &path)
}

/// Same merge as `load_project`, for an explicit config file path.
pub fn load_file(env: &dyn Env, path: &Path) -> Result<ProjectConfig, AnalysisError> {
    let global = load_raw_global(env)?;
    let project = load_raw(path)?;

    let merged = match global {
        Some(mut merged) => {
            overlay(&mut merged, project);
            merged
        }
        None => project,
    };

    finish(merged)
}

/// Built-in defaults with the global YAML applied, for ad-hoc single-file runs.
pub fn load_defaults(env: &dyn Env) -> Result<ProjectConfig, AnalysisError> {
    let mut merged = serde_json::to_value(ProjectConfig {
        project_name: "adhoc".into(),
        ..Default::default()
    })
    .map_err(|e| AnalysisError::Config(e.to_string()))?;

    if let Some(global) = load_raw_global(env)? {
        overlay(&mut merged, global);
    }
    finish(merged)
}

fn finish(merged: serde_json::Value) -> Result<ProjectConfig, AnalysisError> {
    let config: ProjectConfig = serde_json::from_value(merged)
        .map_err(|e| AnalysisError::Config(format!("invalid configuration: {e}")))?;
    validate(&config)?;
    Ok(config)
}

/// Global config file path (`$HOME/.transcript-analyzer.yaml`)
pub fn global_config_path(env: &dyn Env) -> Option<PathBuf> {
    let home = env.var("HOME").ok()?;
    Some(Path::new(&home).join(GLOBAL_FILENAME))
}

/// Global YAML as a raw value. Absent file is fine; a malformed one is not.
fn load_raw_global(env: &dyn Env) -> Result<Option<serde_json::Value>, AnalysisError> {
    let Some(path) = global_config_path(env) else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    debug!("loading global config from {}", path.display());
    let content = std::fs::read_to_string(&path)?;
    let value: serde_json::Value = serde_yaml::from_str(&content).map_err(|e| {
        AnalysisError::Config(format!("malformed global config {}: {e}", path.display()))
    })?;
    // An empty YAML document parses to null
    Ok(if value.is_null() { None } else { Some(value) })
}

/// Config file → raw value (not a struct), so unspecified keys stay absent during merge.
fn load_raw(path: &Path) -> Result<serde_json::Value, AnalysisError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AnalysisError::Config(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content)
        .map_err(|e| AnalysisError::Config(format!("malformed {}: {e}", path.display())))
}

/// Lay `over` on top of `base` in place. Objects merge key by key, so a
/// project file that sets one lexicon list keeps every other default. Arrays
/// (word lists, topic categories, patterns) replace wholesale; `null` is "unset".
fn overlay(base: &mut serde_json::Value, over: serde_json::Value) {
    use serde_json::Value;

    match (base, over) {
        (_, Value::Null) => {}
        (Value::Object(b), Value::Object(o)) => {
            for (key, over_val) in o {
                overlay(b.entry(key).or_insert(Value::Null), over_val);
            }
        }
        (slot, over) => *slot = over,
    }
}

/// Range and reference checks that serde cannot express.
pub fn validate(config: &ProjectConfig) -> Result<(), AnalysisError> {
    let fail = |msg: String| Err(AnalysisError::Config(msg));
    let analysis = &config.analysis;

    if config.project_name.trim().is_empty() {
        return fail("project_name must not be empty".into());
    }
    if analysis.temporal.max_segments == Some(0) {
        return fail("analysis.temporal.max_segments must be at least 1".into());
    }
    if analysis.word_frequency.top_n == 0 {
        return fail("analysis.word_frequency.top_n must be at least 1".into());
    }
    let network = &analysis.concept_network;
    if network.top_n == 0 || network.max_edges == 0 || network.min_weight == 0 {
        return fail("analysis.concept_network values must be at least 1".into());
    }
    if analysis.contradictions.window == 0 {
        return fail("analysis.contradictions.window must be at least 1".into());
    }
    let jitter = analysis.scoring.jitter;
    if !(0.0..=1.0).contains(&jitter) {
        return fail(format!("analysis.scoring.jitter must be within [0, 1], got {jitter}"));
    }
    for name in &analysis.disabled_analyzers {
        if AnalyzerKind::from_name(name).is_none() {
            return fail(format!("unknown analyzer in disabled_analyzers: {name}"));
        }
    }
    for p in &analysis.contradictions.patterns {
        if p.pattern.trim().is_empty() {
            return fail(format!("contradiction pattern '{}' is empty", p.label));
        }
    }
    Ok(())
}

/// Write a config as pretty JSON.
pub fn save(path: &Path, config: &ProjectConfig) -> Result<(), AnalysisError> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| AnalysisError::Config(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
