use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::error::AnalysisError;

/// Built-in Portuguese function words (fallback when no stopword file is configured).
/// Words shorter than three letters never reach the frequency table, so they are omitted.
const BUILTIN_STOPWORDS: &[&str] = &[
    "que", "para", "com", "uma", "uns", "umas", "por", "mas", "das", "dos", "como", "isso",
    "isto", "então", "muito", "mais", "também", "ele", "ela", "eles", "elas", "você", "vocês",
    "seu", "sua", "seus", "suas", "nos", "nas", "num", "numa", "pra", "pro", "pela", "pelo",
    "pelas", "pelos", "aos", "este", "esta", "esse", "essa", "aquele", "aquela", "aquilo",
    "quando", "onde", "porque", "pois", "sem", "sobre", "entre", "até", "depois", "antes",
    "ainda", "foi", "ser", "são", "era", "está", "estava", "estou", "tem", "ter", "tinha",
    "vai", "vou", "mesmo", "aqui", "the", "and",
];

/// Stopword file in JSON form. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
struct StopwordsFile {
    words: Vec<String>,
}

/// Resolved stopwords: built-in defaults, the configured file and extra words merged.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build from defaults + optional file + extra words.
    /// A configured file that cannot be read or parsed is a configuration error.
    pub fn load(file: Option<&Path>, extra_words: &[String]) -> Result<Self, AnalysisError> {
        let mut set = Self::builtin();

        if let Some(path) = file {
            for word in read_stopwords_file(path)? {
                set.insert(&word);
            }
        }

        for word in extra_words {
            set.insert(word);
        }

        debug!(words = set.len(), file = ?file, "stopwords resolved");
        Ok(set)
    }

    fn insert(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if !word.is_empty() {
            self.words.insert(word);
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub(crate) fn len(&self) -> usize {
        self.words.len()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `.json` files use `{"words": [...]}`; anything else is one word per line, `#` comments allowed.
fn read_stopwords_file(path: &Path) -> Result<Vec<String>, AnalysisError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AnalysisError::Config(format!("cannot read stopword file {}: {e}", path.display()))
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let parsed: StopwordsFile = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::Config(format!("malformed stopword file {}: {e}", path.display()))
        })?;
        return Ok(parsed.words);
    }

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.to_string())
        .collect())
}
