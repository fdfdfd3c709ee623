use crate::alignment::matcher::SequenceMatcher;
use crate::text_utils;

// @module: Line-structure transfer between text variants

/// Re-impose the line structure of `broken` onto the unbroken `flat`
/// text.
///
/// For each non-empty line of `broken`, the longest run of characters
/// that line shares with the not-yet-consumed part of `flat` is located;
/// `flat` is cut just after that run and the piece becomes one output
/// line. Useful for restructuring a flat corrected transcript into the
/// line layout of a generated one.
pub fn transfer_line_breaks(broken: &str, flat: &str) -> String {
    let flat_chars: Vec<char> = flat.chars().collect();
    let boundaries = text_utils::char_boundaries(flat);

    let mut output: Vec<String> = Vec::new();
    let mut cursor = 0usize;

    for line in broken.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if cursor >= flat_chars.len() {
            break;
        }

        let line_chars: Vec<char> = line.chars().collect();
        let remainder = &flat_chars[cursor..];
        let matcher = SequenceMatcher::new(remainder, &line_chars);
        let m = matcher.find_longest_match(0, remainder.len(), 0, line_chars.len());

        if m.size == 0 {
            // Nothing of this line occurs in the remainder; leave the
            // cursor in place so later lines can still match
            continue;
        }

        let end = cursor + m.a + m.size;
        let piece = text_utils::slice_by_chars(flat, &boundaries, cursor, end).trim();
        if !piece.is_empty() {
            output.push(piece.to_string());
        }
        cursor = end;
    }

    output.join("\n")
}
