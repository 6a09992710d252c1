use std::fmt::Write;

use crate::types::TranscriptAnalysis;

const BAR_WIDTH: usize = 40;
const TOP_WORDS: usize = 15;

/// Horizontal text bar charts for frequencies, sentiment timeline, topics and contradictions.
pub fn render_charts(result: &TranscriptAnalysis) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_charts(&mut out, result);
    out
}

fn write_charts(out: &mut String, r: &TranscriptAnalysis) -> std::fmt::Result {
    writeln!(out, "{}\n", r.filename)?;

    writeln!(out, "Word frequencies")?;
    writeln!(out, "{}", "-".repeat(60))?;
    let words: Vec<_> = r.word_frequencies.iter().take(TOP_WORDS).collect();
    let max = words.iter().map(|w| w.count).max().unwrap_or(0) as f64;
    let label_width = words.iter().map(|w| w.word.chars().count()).max().unwrap_or(0);
    for w in &words {
        writeln!(
            out,
            "{:<label_width$} {} {}",
            w.word,
            bar(w.count as f64, max),
            w.count
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Sentiment timeline (-1 .. +1)")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for s in &r.temporal_analysis {
        writeln!(
            out,
            "seg {:>2} {} {:+.2}",
            s.index + 1,
            diverging_bar(s.sentiment),
            s.sentiment
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Topic distribution")?;
    writeln!(out, "{}", "-".repeat(60))?;
    let label_width = r.topics.iter().map(|t| t.label.chars().count()).max().unwrap_or(0);
    for t in &r.topics {
        writeln!(
            out,
            "{:<label_width$} {} {:.1}%",
            t.label,
            bar(t.weight, 1.0),
            t.weight * 100.0
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Contradiction scores")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (i, c) in r.contradictions.iter().enumerate() {
        writeln!(out, "#{:<2} {} {:.2}", i + 1, bar(c.score, 1.0), c.score)?;
    }
    Ok(())
}

/// `value / max` of the full bar width, at least one cell for non-zero values.
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(cells.clamp(1, BAR_WIDTH))
}

/// Centred bar: negative values grow left of `|`, positive values right.
fn diverging_bar(value: f64) -> String {
    let half = BAR_WIDTH / 2;
    let cells = ((value.abs().min(1.0)) * half as f64).round() as usize;
    if value < 0.0 {
        format!("{}{}|{}", " ".repeat(half - cells), "█".repeat(cells), " ".repeat(half))
    } else {
        format!("{}|{}{}", " ".repeat(half), "█".repeat(cells), " ".repeat(half - cells))
    }
}
