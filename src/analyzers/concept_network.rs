use std::collections::{HashMap, HashSet};

use super::{AnalysisContext, Analyzer, AnalyzerKind};
use crate::error::AnalysisError;
use crate::text::{split_sentences, tokens};
use crate::types::{ConceptEdge, TranscriptAnalysis, WordCount};

/// Sentence-level co-occurrence graph over the `top_n` most frequent words.
///
/// Each sentence contributes at most one count per unordered pair. Edges are
/// keyed by the sorted pair, so `(a, b)` and `(b, a)` collapse into one.
pub fn build_network(
    text: &str,
    word_freq: &[WordCount],
    top_n: usize,
    max_edges: usize,
    min_weight: usize,
) -> Vec<ConceptEdge> {
    let candidates: HashSet<&str> = word_freq
        .iter()
        .take(top_n)
        .map(|w| w.word.as_str())
        .collect();

    let mut edges: Vec<ConceptEdge> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for sentence in split_sentences(text) {
        let mut present: Vec<String> = Vec::new();
        for token in tokens(&sentence) {
            if candidates.contains(token.as_str()) && !present.contains(&token) {
                present.push(token);
            }
        }

        for i in 0..present.len() {
            for j in (i + 1)..present.len() {
                let key = if present[i] < present[j] {
                    (present[i].clone(), present[j].clone())
                } else {
                    (present[j].clone(), present[i].clone())
                };
                match index.get(&key) {
                    Some(&at) => edges[at].weight += 1,
                    None => {
                        index.insert(key.clone(), edges.len());
                        edges.push(ConceptEdge {
                            word1: key.0,
                            word2: key.1,
                            weight: 1,
                        });
                    }
                }
            }
        }
    }

    edges.retain(|e| e.weight >= min_weight.max(1));
    // stable: ties stay in discovery order
    edges.sort_by(|a, b| b.weight.cmp(&a.weight));
    edges.truncate(max_edges);
    edges
}

pub struct ConceptNetworkAnalyzer;

impl Analyzer for ConceptNetworkAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::ConceptNetwork
    }

    fn analyze(&self, ctx: &mut AnalysisContext<'_>) -> Result<(), AnalysisError> {
        let cfg = &ctx.options.analysis.concept_network;
        ctx.result.concept_network = build_network(
            ctx.text,
            &ctx.result.word_frequencies,
            cfg.top_n,
            cfg.max_edges,
            cfg.min_weight,
        );
        Ok(())
    }

    fn insights(&self, result: &TranscriptAnalysis) -> Vec<String> {
        let edges = &result.concept_network;
        let Some(strongest) = edges.first() else {
            return Vec::new();
        };

        let mut degree: Vec<(&str, usize)> = Vec::new();
        for edge in edges {
            for word in [edge.word1.as_str(), edge.word2.as_str()] {
                match degree.iter_mut().find(|(w, _)| *w == word) {
                    Some((_, d)) => *d += 1,
                    None => degree.push((word, 1)),
                }
            }
        }
        let hub = degree
            .iter()
            .fold(degree[0], |best, &cur| if cur.1 > best.1 { cur } else { best });

        vec![
            format!(
                "Strongest association: \"{}\" and \"{}\" ({} sentences)",
                strongest.word1, strongest.word2, strongest.weight
            ),
            format!("Most connected concept: \"{}\" ({} links)", hub.0, hub.1),
        ]
    }
}
