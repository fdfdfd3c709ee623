/*!
 * Tests for line-structure transfer
 */

use subalign::alignment::linebreaks::transfer_line_breaks;

/// Test that line structure carries over to an unbroken text
#[test]
fn test_transfer_withMatchingContent_shouldRestoreLineStructure() {
    let broken = "hello world\nthis is a test\nof line transfer";
    let flat = "hello world this is a test of line transfer";

    let restructured = transfer_line_breaks(broken, flat);

    let lines: Vec<&str> = restructured.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "hello world");
    assert_eq!(lines[1], "this is a test");
    assert_eq!(lines[2], "of line transfer");
}

/// Test that blank lines in the broken text are ignored
#[test]
fn test_transfer_withBlankLines_shouldSkipThem() {
    let broken = "first part\n\n\nsecond part";
    let flat = "first part second part";

    let restructured = transfer_line_breaks(broken, flat);
    assert_eq!(restructured, "first part\nsecond part");
}

/// Test transfer when the flat text has small corrections
#[test]
fn test_transfer_withCorrectedText_shouldStillCutNearLineEnds() {
    let broken = "the quick brwn fox\njumps ovr the dog";
    let flat = "the quick brown fox jumps over the dog";

    let restructured = transfer_line_breaks(broken, flat);

    let lines: Vec<&str> = restructured.lines().collect();
    assert_eq!(lines.len(), 2);

    // Everything of the flat text is consumed, nothing duplicated; cuts
    // may move spaces around but never characters
    let rejoined: String = lines.concat().split_whitespace().collect();
    let flattened: String = flat.split_whitespace().collect();
    assert_eq!(rejoined, flattened);
}

/// Test degenerate inputs
#[test]
fn test_transfer_withEmptyInputs_shouldReturnEmpty() {
    assert_eq!(transfer_line_breaks("", "anything"), "");
    assert_eq!(transfer_line_breaks("anything", ""), "");
}
