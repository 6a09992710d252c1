use std::collections::HashSet;

use anyhow::{bail, Result};

use super::analyze::analyze_project;
use super::{OutputFormat, ScoringOverrides};
use crate::config::Env;
use crate::project::ProjectManager;
use crate::text::round_to;
use crate::types::{ComparisonReport, FileFailure, ProjectSummary};

/// Analyse each project (without writing artifacts) and compare their summaries.
pub fn compare(
    env: &dyn Env,
    pm: &ProjectManager,
    names: &[String],
    overrides: ScoringOverrides,
) -> Result<ComparisonReport> {
    if names.len() < 2 {
        bail!("compare needs at least two projects, got {}", names.len());
    }

    let mut projects = Vec::new();
    let mut failures = Vec::new();
    for name in names {
        let run = analyze_project(env, pm, name, overrides, false)?;
        failures.extend(run.failures.into_iter().map(|(file, reason)| FileFailure {
            project: name.clone(),
            file,
            reason,
        }));
        projects.push(run.summary);
    }
    Ok(build_report(projects, failures))
}

/// Overall averages weight every file equally; common themes are words in
/// every project's top words, in the first project's order.
pub fn build_report(projects: Vec<ProjectSummary>, failures: Vec<FileFailure>) -> ComparisonReport {
    let total_files: usize = projects.iter().map(|p| p.files).sum();
    let weighted = |f: fn(&ProjectSummary) -> f64| {
        if total_files == 0 {
            0.0
        } else {
            let sum: f64 = projects.iter().map(|p| f(p) * p.files as f64).sum();
            round_to(sum / total_files as f64, 3)
        }
    };
    let avg_sentiment = weighted(|p| p.avg_sentiment);
    let avg_coherence = weighted(|p| p.avg_coherence);

    let common_themes = match projects.split_first() {
        Some((first, rest)) => {
            let others: Vec<HashSet<&str>> = rest
                .iter()
                .map(|p| p.top_words.iter().map(String::as_str).collect())
                .collect();
            first
                .top_words
                .iter()
                .filter(|w| others.iter().all(|set| set.contains(w.as_str())))
                .cloned()
                .collect()
        }
        None => Vec::new(),
    };

    ComparisonReport {
        projects_compared: projects.len(),
        total_files,
        avg_sentiment,
        avg_coherence,
        common_themes,
        projects,
        failures,
    }
}

/// `compare <names>...`: returns whether every transcript of every project succeeded.
pub fn run(
    env: &dyn Env,
    pm: &ProjectManager,
    names: &[String],
    format: OutputFormat,
    overrides: ScoringOverrides,
) -> Result<bool> {
    let report = compare(env, pm, names, overrides)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text | OutputFormat::Markdown => print!("{}", render(&report)),
    }
    Ok(report.failures.is_empty())
}

fn render(report: &ComparisonReport) -> String {
    let mut out = format!(
        "Compared {} projects, {} file(s)\n\n",
        report.projects_compared, report.total_files
    );
    out.push_str(&format!(
        "{:<20} {:>5} {:>6} {:>10} {:>10} {:>9} {:>11}\n",
        "project", "files", "failed", "sentiment", "coherence", "openness", "hesitations"
    ));
    out.push_str(&format!("{}\n", "-".repeat(77)));
    for p in &report.projects {
        out.push_str(&format!(
            "{:<20} {:>5} {:>6} {:>+10.3} {:>10.3} {:>9.3} {:>11}\n",
            p.name,
            p.files,
            p.failed_files,
            p.avg_sentiment,
            p.avg_coherence,
            p.avg_openness,
            p.total_hesitations
        ));
    }
    out.push_str(&format!(
        "\nOverall: sentiment {:+.3}, coherence {:.3}\n",
        report.avg_sentiment, report.avg_coherence
    ));

    if report.common_themes.is_empty() {
        out.push_str("Common themes: none\n");
    } else {
        out.push_str(&format!("Common themes: {}\n", report.common_themes.join(", ")));
    }
    for p in &report.projects {
        out.push_str(&format!("  {}: {}\n", p.name, p.top_words.join(", ")));
    }

    if !report.failures.is_empty() {
        out.push_str(&format!("\n{} file(s) failed:\n", report.failures.len()));
        for f in &report.failures {
            out.push_str(&format!("FAIL  {}/{}  {}\n", f.project, f.file, f.reason));
        }
    }
    out
}
