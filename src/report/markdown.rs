use std::fmt::Write;

use crate::analyzers::global_metrics::{coherence_label, openness_label, sentiment_label};
use crate::text::mean_stddev;
use crate::types::TranscriptAnalysis;

const TOP_EDGES: usize = 10;
const TOP_WORDS: usize = 15;

/// Full Markdown report for one transcript.
pub fn render_markdown(result: &TranscriptAnalysis) -> String {
    let mut md = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut md, result);
    md
}

fn write_report(md: &mut String, r: &TranscriptAnalysis) -> std::fmt::Result {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M");
    writeln!(md, "# Transcript analysis: {}\n", r.filename)?;
    writeln!(md, "_Generated {generated}_\n")?;

    writeln!(md, "## Executive summary\n")?;
    if r.insights.is_empty() {
        writeln!(md, "No insights were produced.")?;
    }
    for insight in &r.insights {
        writeln!(md, "- {insight}")?;
    }
    writeln!(md)?;

    let m = &r.global_metrics;
    writeln!(md, "## Global metrics\n")?;
    writeln!(md, "| Metric | Value | Interpretation |")?;
    writeln!(md, "|---|---|---|")?;
    writeln!(
        md,
        "| Sentiment | {:.3} | {} |",
        m.global_sentiment,
        sentiment_label(m.global_sentiment)
    )?;
    writeln!(
        md,
        "| Thematic coherence | {:.3} | {} |",
        m.thematic_coherence,
        coherence_label(m.thematic_coherence)
    )?;
    writeln!(
        md,
        "| Emotional openness | {:.3} | {} |",
        m.emotional_openness,
        openness_label(m.emotional_openness)
    )?;
    writeln!(md, "| Hesitations | {} | |", m.total_hesitations)?;
    writeln!(md)?;

    write_temporal(md, r)?;
    write_topics(md, r)?;
    write_network(md, r)?;
    write_patterns(md, r)?;
    write_contradictions(md, r)?;

    writeln!(md, "## Most frequent words\n")?;
    for (i, w) in r.word_frequencies.iter().take(TOP_WORDS).enumerate() {
        writeln!(md, "{}. **{}** ({})", i + 1, w.word, w.count)?;
    }
    writeln!(
        md,
        "\n{} words analysed, {} distinct.\n",
        r.total_words, r.unique_words
    )?;

    if !r.warnings.is_empty() {
        writeln!(md, "## Warnings\n")?;
        for w in &r.warnings {
            writeln!(md, "- {w}")?;
        }
        writeln!(md)?;
    }

    writeln!(md, "---")?;
    writeln!(
        md,
        "_Heuristic lexicon-based analysis; read scores as indicators, not measurements._"
    )
}

fn write_temporal(md: &mut String, r: &TranscriptAnalysis) -> std::fmt::Result {
    let segments = &r.temporal_analysis;
    if segments.is_empty() {
        return Ok(());
    }
    writeln!(md, "## Temporal evolution\n")?;

    let sentiments: Vec<f64> = segments.iter().map(|s| s.sentiment).collect();
    let (mean, _) = mean_stddev(&sentiments);
    let peak = segments
        .iter()
        .fold(&segments[0], |a, s| if s.sentiment > a.sentiment { s } else { a });
    let valley = segments
        .iter()
        .fold(&segments[0], |a, s| if s.sentiment < a.sentiment { s } else { a });

    writeln!(md, "- Segments: {}", segments.len())?;
    writeln!(md, "- Mean sentiment: {mean:.3}")?;
    writeln!(md, "- Peak: segment {} ({:.3})", peak.index + 1, peak.sentiment)?;
    writeln!(md, "- Valley: segment {} ({:.3})\n", valley.index + 1, valley.sentiment)?;

    writeln!(md, "| Segment | Sentiment | Cognitive load | Hesitations | Words |")?;
    writeln!(md, "|---|---|---|---|---|")?;
    for s in segments {
        writeln!(
            md,
            "| {} | {:.3} | {:.3} | {} | {} |",
            s.index + 1,
            s.sentiment,
            s.cognitive_load,
            s.hesitations,
            s.word_count
        )?;
    }
    writeln!(md)
}

fn write_topics(md: &mut String, r: &TranscriptAnalysis) -> std::fmt::Result {
    if r.topics.is_empty() {
        return Ok(());
    }
    writeln!(md, "## Topics\n")?;
    for t in &r.topics {
        writeln!(md, "- **{}** ({:.1}%): {}", t.label, t.weight * 100.0, t.words.join(", "))?;
    }
    writeln!(md)
}

fn write_network(md: &mut String, r: &TranscriptAnalysis) -> std::fmt::Result {
    if r.concept_network.is_empty() {
        return Ok(());
    }
    writeln!(md, "## Concept network\n")?;
    for e in r.concept_network.iter().take(TOP_EDGES) {
        writeln!(md, "- {} ↔ {} ({})", e.word1, e.word2, e.weight)?;
    }
    writeln!(md)
}

fn write_patterns(md: &mut String, r: &TranscriptAnalysis) -> std::fmt::Result {
    let p = &r.linguistic_patterns;
    writeln!(md, "## Linguistic patterns\n")?;
    writeln!(
        md,
        "- Certainty: {} sentences ({:.1}%)",
        p.certainty_count, p.certainty_percentage
    )?;
    writeln!(
        md,
        "- Uncertainty: {} sentences ({:.1}%)",
        p.uncertainty_count, p.uncertainty_percentage
    )?;

    let stance = p.certainty_count + p.uncertainty_count;
    if stance > 0 {
        let index = p.certainty_count as f64 / stance as f64;
        writeln!(md, "- Certainty index: {index:.2}")?;
    }
    writeln!(
        md,
        "- Sentences: {} (avg {:.1} words, σ {:.1})",
        p.sentence_count, p.avg_sentence_length, p.sentence_length_stddev
    )?;

    if !p.hesitations_by_marker.is_empty() {
        writeln!(md, "\n| Hesitation | Count | % of words |")?;
        writeln!(md, "|---|---|---|")?;
        for h in &p.hesitations_by_marker {
            writeln!(md, "| {} | {} | {:.2} |", h.marker, h.count, h.percentage)?;
        }
    }
    writeln!(md)
}

fn write_contradictions(md: &mut String, r: &TranscriptAnalysis) -> std::fmt::Result {
    writeln!(md, "## Contradictions\n")?;
    if r.contradictions.is_empty() {
        return writeln!(md, "None detected.\n");
    }
    writeln!(
        md,
        "Showing {} of {} found.\n",
        r.contradictions.len(),
        r.total_contradictions_found
    )?;
    for (i, c) in r.contradictions.iter().enumerate() {
        writeln!(md, "{}. **{:.2}** {}", i + 1, c.score, c.description)?;
        writeln!(md, "   > {}", c.text1)?;
        writeln!(md, "   > {}", c.text2)?;
    }
    writeln!(md)
}
