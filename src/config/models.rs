use serde::{Deserialize, Serialize};

/// Full schema of `project.json`.
/// Global (`~/.transcript-analyzer.yaml`) and project documents are deep-merged
/// before deserialization; `serde(default)` fills anything left unspecified.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub analysis: AnalysisConfig,
    pub lexicon: Lexicon,
    pub topics: TopicsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub word_frequency: WordFrequencyConfig,
    pub temporal: TemporalConfig,
    pub scoring: ScoringConfig,
    pub global_metrics: GlobalMetricsConfig,
    pub concept_network: ConceptNetworkConfig,
    pub contradictions: ContradictionConfig,
    /// Registry names of analyzers to skip.
    pub disabled_analyzers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordFrequencyConfig {
    pub top_n: usize,
    pub min_frequency: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords_file: Option<String>,
    pub extra_stopwords: Vec<String>,
}

impl Default for WordFrequencyConfig {
    fn default() -> Self {
        Self {
            top_n: 50,
            min_frequency: 1,
            stopwords_file: None,
            extra_stopwords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// `None` calibrates from text length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_segments: Option<usize>,
    pub long_paragraph_chars: usize,
    pub block_chars: usize,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            max_segments: None,
            long_paragraph_chars: 1000,
            block_chars: 800,
        }
    }
}

impl TemporalConfig {
    /// Configured maximum, or the length-calibrated one.
    pub fn resolve_max_segments(&self, text_len: usize) -> usize {
        match self.max_segments {
            Some(n) => n.max(1),
            None if text_len < 1000 => 5,
            None if text_len > 10_000 => 20,
            None => 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub increment: f64,
    pub exclamation_bonus: f64,
    pub question_negative_penalty: f64,
    /// Amplitude of uniform noise added to each segment sentiment. 0 disables it.
    pub jitter: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            increment: 0.15,
            exclamation_bonus: 0.05,
            question_negative_penalty: 0.05,
            jitter: 0.1,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalMetricsConfig {
    /// Openness reported when fewer than two segments exist.
    pub single_segment_openness: f64,
}

impl Default for GlobalMetricsConfig {
    fn default() -> Self {
        Self {
            single_segment_openness: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptNetworkConfig {
    pub top_n: usize,
    pub max_edges: usize,
    pub min_weight: usize,
}

impl Default for ConceptNetworkConfig {
    fn default() -> Self {
        Self {
            top_n: 30,
            max_edges: 20,
            min_weight: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContradictionConfig {
    /// How many sentences ahead of each sentence are compared with it.
    pub window: usize,
    pub max_results: usize,
    pub min_shared_words: usize,
    pub max_vocabulary_score: f64,
    pub sentiment_jump_threshold: f64,
    pub patterns: Vec<ContradictionPattern>,
}

impl Default for ContradictionConfig {
    fn default() -> Self {
        Self {
            window: 3,
            max_results: 5,
            min_shared_words: 2,
            max_vocabulary_score: 0.85,
            sentiment_jump_threshold: 0.5,
            patterns: default_patterns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionPattern {
    pub pattern: String,
    pub label: String,
    pub base_score: f64,
}

fn default_patterns() -> Vec<ContradictionPattern> {
    [
        (r"\bnão\b.*\bmas\b.*\bsim\b", "negação seguida de afirmação", 0.8),
        (r"\bnunca\b.*\bsempre\b", "contradição temporal", 0.8),
        (r"\bsempre\b.*\bnunca\b", "contradição temporal", 0.8),
        (r"\bimpossível\b.*\bpossível\b", "contradição de possibilidade", 0.75),
        (
            r"\b(sempre|todos|todo mundo|ninguém)\b.*\b(exceto|menos quando|às vezes não)\b",
            "generalização seguida de exceção",
            0.7,
        ),
        (r"\bcerteza\b.*\bdúvida\b", "contradição de certeza", 0.7),
        (r"\bbom\b.*\bruim\b", "contradição de qualidade", 0.65),
        (r"\bfácil\b.*\bdifícil\b", "contradição de dificuldade", 0.65),
    ]
    .into_iter()
    .map(|(pattern, label, base_score)| ContradictionPattern {
        pattern: pattern.into(),
        label: label.into(),
        base_score,
    })
    .collect()
}

/// Word lists driving the lexicon-based heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub hesitation_markers: Vec<String>,
    pub certainty: Vec<String>,
    pub uncertainty: Vec<String>,
    pub negation: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: owned(&[
                "bom", "ótimo", "excelente", "feliz", "satisfeito", "gosto", "adoro",
                "maravilh", "incrível", "positiv", "melhor", "sucesso", "consegui",
                "aprendi", "entendi", "legal", "bacana", "top",
            ]),
            negative: owned(&[
                "ruim", "péssimo", "triste", "difícil", "problema", "erro", "não", "nunca",
                "medo", "preocup", "frustr", "chato", "cansado", "complicado", "confuso",
                "dúvida",
            ]),
            hesitation_markers: owned(&["né", "tipo", "assim", "então", "hmm", "ahn", "uhm"]),
            certainty: owned(&[
                "com certeza", "obviamente", "claramente", "sem dúvida", "definitivamente",
                "certamente", "claro que", "evidente", "tenho certeza", "absolutamente",
                "seguramente",
            ]),
            uncertainty: owned(&[
                "talvez", "acho que", "não sei", "pode ser", "provavelmente", "me parece",
                "acredito que", "suponho", "imagino que", "não tenho certeza",
                "possivelmente", "quem sabe",
            ]),
            negation: owned(&["não", "nunca", "jamais"]),
        }
    }
}

impl Lexicon {
    /// Every list lowercased, since all matching runs on lowercased text.
    pub fn lowercased(mut self) -> Self {
        for list in [
            &mut self.positive,
            &mut self.negative,
            &mut self.hesitation_markers,
            &mut self.certainty,
            &mut self.uncertainty,
            &mut self.negation,
        ] {
            for term in list.iter_mut() {
                *term = term.trim().to_lowercase();
            }
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicsConfig {
    pub categories: Vec<TopicCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCategory {
    pub label: String,
    pub keywords: Vec<String>,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        let category = |label: &str, keywords: &[&str]| TopicCategory {
            label: label.into(),
            keywords: owned(keywords),
        };
        Self {
            categories: vec![
                category(
                    "Tecnologia",
                    &["sistema", "software", "código", "programa", "computador", "dados",
                      "tecnologia", "digital", "internet", "aplicativo"],
                ),
                category(
                    "Educação",
                    &["curso", "aula", "professor", "aluno", "escola", "ensino",
                      "aprendizagem", "estudo", "educação", "conhecimento"],
                ),
                category(
                    "Trabalho",
                    &["trabalho", "empresa", "projeto", "equipe", "cliente", "processo",
                      "resultado", "meta", "objetivo", "prazo"],
                ),
                category(
                    "Pessoal",
                    &["vida", "família", "casa", "tempo", "dia", "pessoa", "gente", "amigo",
                      "momento", "experiência"],
                ),
                category(
                    "Análise",
                    &["problema", "solução", "questão", "situação", "caso", "exemplo",
                      "forma", "maneira", "aspecto", "ponto"],
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub generate_json: bool,
    pub generate_markdown: bool,
    pub generate_visuals: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            generate_json: true,
            generate_markdown: true,
            generate_visuals: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibrated_segments_follow_text_length() {
        let cfg = TemporalConfig::default();
        assert_eq!(cfg.resolve_max_segments(500), 5);
        assert_eq!(cfg.resolve_max_segments(5_000), 10);
        assert_eq!(cfg.resolve_max_segments(20_000), 20);
    }

    #[test]
    fn explicit_segments_override_calibration() {
        let cfg = TemporalConfig {
            max_segments: Some(3),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_max_segments(50_000), 3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ProjectConfig = serde_json::from_str(
            r#"{"project_name": "p", "analysis": {"contradictions": {"window": 5}}}"#,
        )
        .unwrap();
        assert_eq!(cfg.analysis.contradictions.window, 5);
        assert_eq!(cfg.analysis.contradictions.max_results, 5);
        assert_eq!(cfg.analysis.scoring.increment, 0.15);
        assert!(!cfg.analysis.contradictions.patterns.is_empty());
        assert_eq!(cfg.topics.categories.len(), 5);
    }
}
