use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// One temporal slice of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub text: String,
    pub sentiment: f64,
    pub cognitive_load: f64,
    pub hesitations: usize,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetrics {
    pub global_sentiment: f64,
    pub thematic_coherence: f64,
    pub emotional_openness: f64,
    pub total_hesitations: usize,
}

impl Default for GlobalMetrics {
    fn default() -> Self {
        Self {
            global_sentiment: 0.0,
            thematic_coherence: 0.5,
            emotional_openness: 0.0,
            total_hesitations: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HesitationCount {
    pub marker: String,
    pub count: usize,
    /// Percent of the total word count.
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinguisticPatterns {
    /// Sentences containing at least one certainty phrase.
    pub certainty_count: usize,
    pub certainty_percentage: f64,
    pub certainty_examples: Vec<String>,
    pub uncertainty_count: usize,
    pub uncertainty_percentage: f64,
    pub uncertainty_examples: Vec<String>,
    pub hesitations_by_marker: Vec<HesitationCount>,
    pub total_hesitations: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub sentence_length_stddev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub label: String,
    pub words: Vec<String>,
    pub weight: f64,
}

/// Undirected edge; `word1 < word2` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptEdge {
    pub word1: String,
    pub word2: String,
    pub weight: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionKind {
    Pattern,
    NegatedVocabulary,
    SentimentShift,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contradiction {
    pub text1: String,
    pub text2: String,
    pub score: f64,
    pub kind: ContradictionKind,
    pub description: String,
    pub topics: Vec<String>,
}

/// Everything one `analyze` call produces for a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptAnalysis {
    pub filename: String,
    pub global_metrics: GlobalMetrics,
    pub word_frequencies: Vec<WordCount>,
    pub total_words: usize,
    pub unique_words: usize,
    pub temporal_analysis: Vec<Segment>,
    pub linguistic_patterns: LinguisticPatterns,
    pub topics: Vec<Topic>,
    pub topic_distribution: Vec<f64>,
    pub concept_network: Vec<ConceptEdge>,
    pub contradictions: Vec<Contradiction>,
    pub total_contradictions_found: usize,
    pub insights: Vec<String>,
    pub warnings: Vec<String>,
}

impl TranscriptAnalysis {
    pub fn empty(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            global_metrics: GlobalMetrics::default(),
            word_frequencies: Vec::new(),
            total_words: 0,
            unique_words: 0,
            temporal_analysis: Vec::new(),
            linguistic_patterns: LinguisticPatterns::default(),
            topics: Vec::new(),
            topic_distribution: Vec::new(),
            concept_network: Vec::new(),
            contradictions: Vec::new(),
            total_contradictions_found: 0,
            insights: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn top_words(&self, n: usize) -> Vec<&str> {
        self.word_frequencies
            .iter()
            .take(n)
            .map(|w| w.word.as_str())
            .collect()
    }
}

// --- Cross-project comparison ---

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub files: usize,
    pub failed_files: usize,
    pub avg_sentiment: f64,
    pub avg_coherence: f64,
    pub avg_openness: f64,
    pub total_hesitations: usize,
    pub top_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub projects_compared: usize,
    pub total_files: usize,
    pub avg_sentiment: f64,
    pub avg_coherence: f64,
    pub common_themes: Vec<String>,
    pub projects: Vec<ProjectSummary>,
    /// Transcripts left out of the averages because their analysis failed.
    pub failures: Vec<FileFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub project: String,
    pub file: String,
    pub reason: String,
}
