//! On-disk project layout:
//!
//! ```text
//! <projects>/<name>/project.json
//! <projects>/<name>/transcripts/*.txt
//! <projects>/<name>/output/<stem>/{analysis.json, report.md, charts.txt}
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::config::loader::{self, PROJECT_FILENAME};
use crate::config::models::ProjectConfig;
use crate::config::Env;
use crate::error::AnalysisError;

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

pub const TRANSCRIPTS_DIR: &str = "transcripts";
pub const OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub name: String,
    pub path: PathBuf,
    pub description: Option<String>,
    pub transcripts: usize,
    /// Transcripts with an `output/<stem>/` directory.
    pub analysed: usize,
}

pub struct ProjectManager {
    root: PathBuf,
}

impl ProjectManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create the directory layout and a `project.json` holding the full defaults.
    pub fn create(&self, name: &str, description: Option<&str>) -> Result<PathBuf, AnalysisError> {
        if !PROJECT_NAME.is_match(name) {
            return Err(AnalysisError::Config(format!(
                "invalid project name '{name}': use letters, digits, '-' or '_'"
            )));
        }
        let dir = self.project_dir(name);
        if dir.exists() {
            return Err(AnalysisError::Config(format!(
                "project already exists: {name}"
            )));
        }

        std::fs::create_dir_all(dir.join(TRANSCRIPTS_DIR))?;
        std::fs::create_dir_all(dir.join(OUTPUT_DIR))?;

        let config = ProjectConfig {
            project_name: name.to_string(),
            description: description.map(str::to_string),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };
        loader::save(&dir.join(PROJECT_FILENAME), &config)?;
        info!(project = name, path = %dir.display(), "project created");
        Ok(dir)
    }

    /// Sub-directories containing `project.json`, sorted by name.
    pub fn list(&self) -> Result<Vec<ProjectInfo>, AnalysisError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = std::fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join(PROJECT_FILENAME).is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();

        names.iter().map(|name| self.info(name)).collect()
    }

    pub fn info(&self, name: &str) -> Result<ProjectInfo, AnalysisError> {
        let dir = self.project_dir(name);
        let transcripts = self.transcripts(name)?;
        let analysed = transcripts
            .iter()
            .filter(|t| {
                stem(t)
                    .map(|s| self.output_dir(name, &s).is_dir())
                    .unwrap_or(false)
            })
            .count();

        // description is informational; a broken file should not hide the project
        let description = std::fs::read_to_string(dir.join(PROJECT_FILENAME))
            .ok()
            .and_then(|raw| serde_json::from_str::<ProjectConfig>(&raw).ok())
            .and_then(|c| c.description);

        Ok(ProjectInfo {
            name: name.to_string(),
            path: dir,
            description,
            transcripts: transcripts.len(),
            analysed,
        })
    }

    /// Load the merged, validated configuration of a project.
    pub fn config(&self, env: &dyn Env, name: &str) -> Result<ProjectConfig, AnalysisError> {
        let dir = self.project_dir(name);
        if !dir.is_dir() {
            return Err(AnalysisError::Config(format!("project not found: {name}")));
        }
        loader::load_project(env, &dir)
    }

    /// `transcripts/*.txt`, in file-name order.
    pub fn transcripts(&self, name: &str) -> Result<Vec<PathBuf>, AnalysisError> {
        let dir = self.project_dir(name).join(TRANSCRIPTS_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        files.sort();
        Ok(files)
    }

    pub fn output_dir(&self, name: &str, stem: &str) -> PathBuf {
        self.project_dir(name).join(OUTPUT_DIR).join(stem)
    }
}

/// File name without extension.
pub fn stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}
