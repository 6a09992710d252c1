#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment: `$HOME` and the projects root both live in the temp dir,
/// so no real `~/.transcript-analyzer.yaml` leaks into a test.
pub struct Sandbox {
    pub tmp: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    pub fn home(&self) -> &Path {
        self.tmp.path()
    }

    pub fn projects(&self) -> PathBuf {
        self.tmp.path().join("projects")
    }

    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.projects().join(name)
    }

    /// CLI command with HOME and TRANSCRIPT_ANALYZER_HOME pointed into the sandbox.
    #[allow(deprecated)]
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("transcript-analyzer").unwrap();
        cmd.env("HOME", self.home());
        cmd.env("TRANSCRIPT_ANALYZER_HOME", self.projects());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Create a project through the CLI and copy the given fixtures into it.
    pub fn project_with(&self, name: &str, fixtures: &[&str]) -> PathBuf {
        self.cli().args(["create", name]).assert().success();
        let transcripts = self.project_dir(name).join("transcripts");
        for fixture in fixtures {
            std::fs::copy(fixture_path(fixture), transcripts.join(fixture)).unwrap();
        }
        self.project_dir(name)
    }

    pub fn write_transcript(&self, project: &str, file: &str, content: &str) {
        let path = self.project_dir(project).join("transcripts").join(file);
        std::fs::write(path, content).unwrap();
    }
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}
