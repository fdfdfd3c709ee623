/*!
 * Tests for text normalization utilities
 */

use subalign::text_utils::{char_boundaries, flatten_whitespace, slice_by_chars, split_paragraphs};

/// Test paragraph splitting on blank lines
#[test]
fn test_split_paragraphs_withBlankLineSeparators_shouldSplitAndTrim() {
    let text = "First paragraph.\n\nSecond paragraph\nstill second.\n\n\nThird.";
    let paragraphs = split_paragraphs(text);

    assert_eq!(paragraphs.len(), 3);
    assert_eq!(paragraphs[0], "First paragraph.");
    assert_eq!(paragraphs[1], "Second paragraph\nstill second.");
    assert_eq!(paragraphs[2], "Third.");
}

/// Test that whitespace-only paragraphs are dropped
#[test]
fn test_split_paragraphs_withWhitespaceOnlyBlocks_shouldDropThem() {
    let text = "One.\n\n   \n\nTwo.";
    let paragraphs = split_paragraphs(text);
    assert_eq!(paragraphs, vec!["One.", "Two."]);
}

/// Test paragraph splitting of empty input
#[test]
fn test_split_paragraphs_withEmptyInput_shouldReturnNothing() {
    assert!(split_paragraphs("").is_empty());
    assert!(split_paragraphs("   \n\n  \n").is_empty());
}

/// Test whitespace flattening
#[test]
fn test_flatten_whitespace_withMixedWhitespace_shouldCollapseToSingleSpaces() {
    let text = "  Multiple   spaces\nand\r\nnewlines\t\ttabs  ";
    assert_eq!(flatten_whitespace(text), "Multiple spaces and newlines tabs");
}

/// Test flattening of empty input
#[test]
fn test_flatten_whitespace_withEmptyInput_shouldReturnEmpty() {
    assert_eq!(flatten_whitespace(""), "");
    assert_eq!(flatten_whitespace("   \n  "), "");
}

/// Test character boundary table with multi-byte characters
#[test]
fn test_char_boundaries_withMultibyteText_shouldSliceOnCharOffsets() {
    let text = "žluťoučký kůň";
    let boundaries = char_boundaries(text);

    let char_count = text.chars().count();
    assert_eq!(boundaries.len(), char_count + 1);
    assert_eq!(*boundaries.last().unwrap(), text.len());

    assert_eq!(slice_by_chars(text, &boundaries, 0, 9), "žluťoučký");
    assert_eq!(slice_by_chars(text, &boundaries, 10, char_count), "kůň");
}
