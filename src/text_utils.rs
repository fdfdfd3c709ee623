use once_cell::sync::Lazy;
use regex::Regex;

// @module: Text normalization utilities

// @const: Blank-line paragraph separator
static PARAGRAPH_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t\r]*\n").unwrap()
});

/// Split text into paragraphs on blank-line boundaries.
/// Paragraphs are trimmed and empty results are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_SEPARATOR
        .split(text)
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

/// Collapse all whitespace runs (including newlines) into single spaces
/// and trim both ends. Produces the flat comparison form of a
/// paragraph-structured document.
pub fn flatten_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offsets of every character boundary in `s`, with one trailing
/// entry for the end of the string. Character-offset spans can then
/// slice the original string without re-walking it per span.
pub fn char_boundaries(s: &str) -> Vec<usize> {
    let mut offsets: Vec<usize> = s.char_indices().map(|(i, _)| i).collect();
    offsets.push(s.len());
    offsets
}

/// Slice `s` by character offsets using a precomputed boundary table.
pub fn slice_by_chars<'a>(s: &'a str, boundaries: &[usize], start: usize, end: usize) -> &'a str {
    &s[boundaries[start]..boundaries[end]]
}
