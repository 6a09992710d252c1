use std::collections::HashMap;

use anyhow::Result;
use tracing::{error, info};

use super::{OutputFormat, ScoringOverrides};
use crate::config::Env;
use crate::pipeline::{analyze, read_transcript, AnalysisOptions};
use crate::project::{stem, ProjectManager};
use crate::report::write_outputs;
use crate::text::round_to;
use crate::types::{ProjectSummary, TranscriptAnalysis, WordCount};

const SUMMARY_TOP_WORDS: usize = 10;

/// Results of analysing every transcript of one project.
#[derive(Debug)]
pub struct ProjectRun {
    pub results: Vec<TranscriptAnalysis>,
    /// `(file name, reason)` for every transcript that failed.
    pub failures: Vec<(String, String)>,
    pub summary: ProjectSummary,
}

impl ProjectRun {
    pub fn all_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Analyse every transcript of `name` in file-name order.
///
/// Configuration problems abort the run. A failing transcript is logged,
/// recorded in `failures` and the loop moves on. With `write_artifacts` the
/// enabled outputs land in `output/<stem>/`.
pub fn analyze_project(
    env: &dyn Env,
    pm: &ProjectManager,
    name: &str,
    overrides: ScoringOverrides,
    write_artifacts: bool,
) -> Result<ProjectRun> {
    let config = pm.config(env, name)?;
    let options = overrides.apply(AnalysisOptions::from_config(&config, &pm.project_dir(name))?);
    let files = pm.transcripts(name)?;
    info!(project = name, files = files.len(), "analysing project");

    let mut results = Vec::new();
    let mut failures = Vec::new();

    for path in &files {
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();

        let outcome = read_transcript(path).and_then(|text| analyze(&filename, &text, &options));
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                error!(file = %filename, "analysis failed: {e}");
                failures.push((filename, e.to_string()));
                continue;
            }
        };

        if write_artifacts {
            let dir = pm.output_dir(name, &stem(path).unwrap_or_else(|| filename.clone()));
            if let Err(e) = write_outputs(&dir, &result, &config.output) {
                error!(file = %filename, "writing outputs failed: {e}");
                failures.push((filename, e.to_string()));
                continue;
            }
            info!(file = %filename, output = %dir.display(), "analysis written");
        }
        results.push(result);
    }

    let summary = summarize(name, &results, failures.len());
    Ok(ProjectRun {
        results,
        failures,
        summary,
    })
}

/// Per-project averages and the most frequent words across all its transcripts.
pub fn summarize(name: &str, results: &[TranscriptAnalysis], failed_files: usize) -> ProjectSummary {
    let n = results.len();
    let mean = |f: fn(&TranscriptAnalysis) -> f64| {
        if n == 0 {
            0.0
        } else {
            round_to(results.iter().map(f).sum::<f64>() / n as f64, 3)
        }
    };

    // merged counts, first-seen order for ties
    let mut merged: Vec<WordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for r in results {
        for w in &r.word_frequencies {
            match index.get(&w.word) {
                Some(&i) => merged[i].count += w.count,
                None => {
                    index.insert(w.word.clone(), merged.len());
                    merged.push(w.clone());
                }
            }
        }
    }
    merged.sort_by(|a, b| b.count.cmp(&a.count));

    ProjectSummary {
        name: name.to_string(),
        files: n,
        failed_files,
        avg_sentiment: mean(|r| r.global_metrics.global_sentiment),
        avg_coherence: mean(|r| r.global_metrics.thematic_coherence),
        avg_openness: mean(|r| r.global_metrics.emotional_openness),
        total_hesitations: results.iter().map(|r| r.global_metrics.total_hesitations).sum(),
        top_words: merged
            .into_iter()
            .take(SUMMARY_TOP_WORDS)
            .map(|w| w.word)
            .collect(),
    }
}

/// `analyze <name>`: returns whether every transcript succeeded.
pub fn run(
    env: &dyn Env,
    pm: &ProjectManager,
    name: &str,
    format: OutputFormat,
    overrides: ScoringOverrides,
) -> Result<bool> {
    let run = analyze_project(env, pm, name, overrides, true)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&run.results)?),
        OutputFormat::Text | OutputFormat::Markdown => print!("{}", render_summary(&run)),
    }
    Ok(run.all_ok())
}

fn render_summary(run: &ProjectRun) -> String {
    let s = &run.summary;
    let mut out = String::new();

    if s.files == 0 && run.failures.is_empty() {
        out.push_str(&format!("{}: no transcripts found\n", s.name));
        return out;
    }
    for r in &run.results {
        out.push_str(&format!(
            "ok    {}  sentiment {:+.2}  coherence {:.2}  contradictions {}\n",
            r.filename,
            r.global_metrics.global_sentiment,
            r.global_metrics.thematic_coherence,
            r.total_contradictions_found
        ));
    }
    for (file, reason) in &run.failures {
        out.push_str(&format!("FAIL  {file}  {reason}\n"));
    }
    out.push_str(&format!(
        "\n{}: {} file(s) processed, {} failed\n  mean sentiment {:+.3}\n  mean coherence {:.3}\n",
        s.name, s.files, s.failed_files, s.avg_sentiment, s.avg_coherence
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GlobalMetrics;

    fn result(sentiment: f64, words: &[(&str, usize)]) -> TranscriptAnalysis {
        let mut r = TranscriptAnalysis::empty("f.txt");
        r.global_metrics = GlobalMetrics {
            global_sentiment: sentiment,
            thematic_coherence: 0.5,
            emotional_openness: 0.1,
            total_hesitations: 2,
        };
        r.word_frequencies = words
            .iter()
            .map(|(w, c)| WordCount {
                word: w.to_string(),
                count: *c,
            })
            .collect();
        r
    }

    #[test]
    fn summary_averages_and_merges_words() {
        let results = vec![
            result(0.2, &[("escola", 3), ("aluno", 1)]),
            result(-0.4, &[("aluno", 5)]),
        ];
        let s = summarize("p", &results, 1);
        assert_eq!(s.files, 2);
        assert_eq!(s.failed_files, 1);
        assert_eq!(s.avg_sentiment, -0.1);
        assert_eq!(s.total_hesitations, 4);
        assert_eq!(s.top_words, vec!["aluno", "escola"]);
    }

    #[test]
    fn empty_summary_is_zeroed() {
        let s = summarize("p", &[], 0);
        assert_eq!(s.avg_coherence, 0.0);
        assert!(s.top_words.is_empty());
    }
}
