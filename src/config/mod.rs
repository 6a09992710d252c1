pub mod loader;
pub mod models;

use std::path::PathBuf;

/// Environment variable access, injectable for tests
pub trait Env {
    fn var(&self, key: &str) -> Result<String, std::env::VarError>;
}

/// Reads the real process environment
pub struct RealEnv;

impl Env for RealEnv {
    fn var(&self, key: &str) -> Result<String, std::env::VarError> {
        std::env::var(key)
    }
}

/// Directory holding all projects.
///
/// Precedence: explicit override, `$TRANSCRIPT_ANALYZER_HOME`, `./projects`.
pub fn projects_home(env: &dyn Env, override_dir: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir {
        return PathBuf::from(dir);
    }
    env.var("TRANSCRIPT_ANALYZER_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("projects"))
}

/// Resolve a path from the config file: absolute stays, relative is joined to `base`.
pub fn resolve_relative(path: &str, base: &std::path::Path) -> PathBuf {
    let p = std::path::Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
