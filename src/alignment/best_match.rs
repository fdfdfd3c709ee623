use crate::alignment::matcher::{Match, SequenceMatcher};
use crate::subtitle_processor::SubtitleEntry;
use crate::text_utils;

// @module: Matching-block alignment with interpolation fallback

/// Per-run counters for how the alignment behaved.
///
/// Interpolation and proportional rescue are fallbacks, not errors; the
/// counts are surfaced so correction quality can be audited.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestMatchStats {
    /// Cues where an endpoint had no direct mapping and was interpolated
    pub interpolated: usize,
    /// Cues whose extracted span came out empty and were re-estimated
    /// from the cumulative character share
    pub rescued: usize,
}

/// Partial map from offsets in the concatenated original cue text to
/// offsets in the reference text, derived from matched blocks.
///
/// Kept as the ordered block list itself and consulted by binary search,
/// so memory stays proportional to the block count rather than the total
/// matched length.
struct PositionMap {
    blocks: Vec<Match>,
}

impl PositionMap {
    fn new(blocks: Vec<Match>) -> Self {
        PositionMap { blocks }
    }

    /// Reference offset for an original-text offset, if that offset falls
    /// inside a matched block.
    fn lookup(&self, offset: usize) -> Option<usize> {
        let idx = self.blocks.partition_point(|m| m.a + m.size <= offset);
        let block = self.blocks.get(idx)?;
        if block.a <= offset && offset < block.a + block.size {
            Some(block.b + (offset - block.a))
        } else {
            None
        }
    }
}

/// Map each cue onto the span of the reference text that best matches
/// its original (error-prone) content.
///
/// The flat cue texts are concatenated with single-space separators and
/// matched against the reference; each cue's span endpoints are then
/// translated through the matched blocks. Endpoints with no direct
/// mapping interpolate linearly between the document lengths, and spans
/// that collapse to empty are re-estimated from the cue's cumulative
/// character share. All endpoints snap outward to word boundaries.
///
/// Returns one text per cue plus the fallback counters.
pub fn align(entries: &[SubtitleEntry], reference: &str) -> (Vec<String>, BestMatchStats) {
    let mut stats = BestMatchStats::default();

    if entries.is_empty() {
        return (Vec::new(), stats);
    }

    let reference = reference.trim();
    if reference.is_empty() {
        return (vec![String::new(); entries.len()], stats);
    }

    // Concatenate flat cue texts, recording each cue's char-offset span
    let flat_texts: Vec<String> = entries.iter().map(|e| e.flat_text()).collect();
    let mut original = String::new();
    let mut spans: Vec<(usize, usize)> = Vec::with_capacity(entries.len());
    let mut cursor = 0usize;
    for (i, flat) in flat_texts.iter().enumerate() {
        if i > 0 {
            original.push(' ');
            cursor += 1;
        }
        let len = flat.chars().count();
        spans.push((cursor, cursor + len));
        original.push_str(flat);
        cursor += len;
    }

    let original_chars: Vec<char> = original.chars().collect();
    let reference_chars: Vec<char> = reference.chars().collect();
    let reference_boundaries = text_utils::char_boundaries(reference);

    let total_original = original_chars.len();
    let total_reference = reference_chars.len();

    if total_original == 0 {
        return (vec![String::new(); entries.len()], stats);
    }

    let map = PositionMap::new(
        SequenceMatcher::new(&original_chars, &reference_chars).matching_blocks(),
    );

    // Cumulative flat lengths, for the proportional rescue
    let mut prefix_sums = Vec::with_capacity(flat_texts.len() + 1);
    let mut running = 0usize;
    prefix_sums.push(0usize);
    for flat in &flat_texts {
        running += flat.chars().count();
        prefix_sums.push(running);
    }
    let total_flat = running.max(1);

    let interpolate = |offset: usize| -> usize {
        let estimate = (offset as f64 / total_original as f64) * total_reference as f64;
        (estimate.round() as usize).min(total_reference)
    };

    let mut result = Vec::with_capacity(entries.len());

    for (i, &(span_start, span_end)) in spans.iter().enumerate() {
        if flat_texts[i].is_empty() {
            result.push(String::new());
            continue;
        }

        let mut fell_back = false;

        let mut correct_start = match map.lookup(span_start) {
            Some(mapped) => mapped,
            None => {
                fell_back = true;
                interpolate(span_start)
            }
        };

        // Scan backward for the last original offset in this span that
        // the matcher could place in the reference
        let mapped_end = (span_start..span_end)
            .rev()
            .find_map(|offset| map.lookup(offset).map(|m| m + 1));
        let mut correct_end = match mapped_end {
            Some(mapped) => mapped,
            None => {
                fell_back = true;
                interpolate(span_end)
            }
        };

        if fell_back {
            stats.interpolated += 1;
        }

        correct_start = correct_start.min(total_reference);
        correct_end = correct_end.clamp(correct_start, total_reference);

        let (snapped_start, snapped_end) =
            snap_to_words(&reference_chars, correct_start, correct_end);

        let mut text = text_utils::slice_by_chars(
            reference,
            &reference_boundaries,
            snapped_start,
            snapped_end,
        )
        .trim()
        .to_string();

        // Empty extraction from a non-empty cue: re-estimate the span
        // from the cue's share of total cue characters
        if text.is_empty() {
            stats.rescued += 1;
            let start_estimate =
                ((prefix_sums[i] as f64 / total_flat as f64) * total_reference as f64).round() as usize;
            let end_estimate =
                ((prefix_sums[i + 1] as f64 / total_flat as f64) * total_reference as f64).round() as usize;

            let start_estimate = start_estimate.min(total_reference);
            let end_estimate = end_estimate.clamp(start_estimate, total_reference);

            let (snapped_start, snapped_end) =
                snap_to_words(&reference_chars, start_estimate, end_estimate);

            text = text_utils::slice_by_chars(
                reference,
                &reference_boundaries,
                snapped_start,
                snapped_end,
            )
            .trim()
            .to_string();
        }

        result.push(text);
    }

    (result, stats)
}

/// Widen a span so it starts just after a space and ends on one.
///
/// The start moves back to the previous space + 1 (or the beginning);
/// the exclusive end moves forward to the next space (or the end), so a
/// cut never lands mid-word.
fn snap_to_words(chars: &[char], start: usize, end: usize) -> (usize, usize) {
    let mut start = start.min(chars.len());
    let mut end = end.min(chars.len());

    while start > 0 && chars[start - 1] != ' ' {
        start -= 1;
    }
    while end < chars.len() && chars[end] != ' ' {
        end += 1;
    }

    (start, end.max(start))
}
