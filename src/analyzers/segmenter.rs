use crate::config::models::TemporalConfig;
use crate::text::sentences_with_marks;

/// Split a transcript into at most `max_segments` ordered chunks.
///
/// Paragraphs (blank-line separated) are the primary unit. A single paragraph
/// longer than `long_paragraph_chars` is regrouped into sentence blocks of about
/// `block_chars`. When there are too many segments, contiguous runs are merged;
/// nothing is dropped.
pub fn segment(text: &str, max_segments: usize, config: &TemporalConfig) -> Vec<String> {
    let mut segments = paragraphs(text);

    if segments.len() == 1 && segments[0].chars().count() > config.long_paragraph_chars {
        segments = group_sentences(&segments[0], config.block_chars);
    }

    downsample(segments, max_segments.max(1))
}

/// Blank-line separated blocks; lines inside a block are joined with a space.
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                out.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out
}

fn group_sentences(paragraph: &str, block_chars: usize) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for sentence in sentences_with_marks(paragraph) {
        let too_long = current.chars().count() + sentence.chars().count() > block_chars;
        if too_long && !current.is_empty() {
            blocks.push(current.trim().to_string());
            current.clear();
        }
        current.push_str(&sentence);
        current.push(' ');
    }

    if !current.trim().is_empty() {
        blocks.push(current.trim().to_string());
    }
    blocks
}

/// Merge contiguous groups of `ceil(len / max)` segments.
fn downsample(segments: Vec<String>, max_segments: usize) -> Vec<String> {
    if segments.len() <= max_segments {
        return segments;
    }
    let step = segments.len().div_ceil(max_segments);
    segments.chunks(step).map(|group| group.join(" ")).collect()
}
