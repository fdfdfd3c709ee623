use crate::subtitle_processor::SubtitleEntry;
use crate::text_utils;

// @module: Proportional character-budget alignment

/// Sentence-terminal characters a cut prefers to land after
const SENTENCE_TERMINALS: [char; 3] = ['.', '!', '?'];

/// Distribute the reference text across the cues by character share.
///
/// Paragraphs (blank-line separated) are the unit of correct text; when
/// there are more paragraphs than cues the tail paragraphs merge into the
/// last slot. The merged text is then cut into one span per cue at
/// roughly `total_chars / cue_count` intervals, with each cut snapped to
/// the nearest sentence end within `boundary_window` characters, falling
/// back to the next word boundary, falling back to an exact cut. The
/// final cue absorbs whatever remains.
///
/// Returns one text per cue. Zero cues yield an empty result; an empty
/// reference yields all-empty spans.
pub fn align(entries: &[SubtitleEntry], reference: &str, boundary_window: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let mut paragraphs = text_utils::split_paragraphs(reference);
    if paragraphs.is_empty() {
        return vec![String::new(); entries.len()];
    }

    let cue_count = entries.len();
    if paragraphs.len() > cue_count {
        let tail = paragraphs.split_off(cue_count - 1);
        paragraphs.push(tail.join(" "));
    }

    let text = paragraphs.join(" ");
    let chars: Vec<char> = text.chars().collect();
    let boundaries = text_utils::char_boundaries(&text);
    let total_chars = chars.len();
    let chars_per_cue = total_chars as f64 / cue_count as f64;

    let mut result = Vec::with_capacity(cue_count);
    let mut cursor = 0usize;

    for i in 0..cue_count {
        let is_last = i == cue_count - 1;

        if is_last {
            let segment = text_utils::slice_by_chars(&text, &boundaries, cursor, total_chars);
            result.push(segment.trim().to_string());
            break;
        }

        let candidate = ((cursor as f64) + chars_per_cue) as usize;
        let mut end = candidate.min(total_chars);

        if end < total_chars {
            end = snap_to_boundary(&chars, cursor, candidate, boundary_window).clamp(cursor, total_chars);
        }

        let segment = text_utils::slice_by_chars(&text, &boundaries, cursor, end);
        result.push(segment.trim().to_string());
        cursor = end;
    }

    result
}

/// Pick the cut offset for a candidate position: the earliest sentence
/// terminal within `window` characters of the candidate (cutting just
/// after it), else the first space at or after the candidate within
/// `window` characters, else the candidate itself.
///
/// The search never reaches back before `cursor`, so a sentence end that
/// already belongs to an earlier cue cannot be chosen twice.
fn snap_to_boundary(chars: &[char], cursor: usize, candidate: usize, window: usize) -> usize {
    let lo = candidate.saturating_sub(window).max(cursor);
    let hi = (candidate + window).min(chars.len());

    let sentence_end = (lo..hi)
        .find(|&pos| pos > 0 && SENTENCE_TERMINALS.contains(&chars[pos]))
        .map(|pos| pos + 1);

    if let Some(end) = sentence_end {
        return end;
    }

    let space = (candidate..chars.len().min(candidate + window))
        .find(|&pos| chars[pos] == ' ');

    space.unwrap_or(candidate)
}
