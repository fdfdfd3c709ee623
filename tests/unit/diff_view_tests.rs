/*!
 * Tests for unified diff rendering
 */

use subalign::diff_view::unified_diff;

/// Test that identical inputs produce no diff
#[test]
fn test_unified_diff_withIdenticalInputs_shouldBeEmpty() {
    let text = "line one\nline two\nline three\n";
    let diff = unified_diff(text, text, "a.txt", "b.txt", 3);
    assert!(diff.is_empty());
}

/// Test a single-line replacement
#[test]
fn test_unified_diff_withChangedLine_shouldShowMinusAndPlus() {
    let a = "unchanged\nold line\nalso unchanged\n";
    let b = "unchanged\nnew line\nalso unchanged\n";

    let diff = unified_diff(a, b, "before.txt", "after.txt", 3);

    assert!(diff.starts_with("--- before.txt\n+++ after.txt\n"));
    assert!(diff.contains("-old line\n"));
    assert!(diff.contains("+new line\n"));
    assert!(diff.contains(" unchanged\n"));
}

/// Test hunk headers for single-line files
#[test]
fn test_unified_diff_withSingleLineFiles_shouldFormatHunkHeader() {
    let diff = unified_diff("alpha\n", "beta\n", "a", "b", 3);

    assert!(diff.contains("@@ -1 +1 @@"));
    assert!(diff.contains("-alpha\n"));
    assert!(diff.contains("+beta\n"));
}

/// Test that distant changes produce separate hunks
#[test]
fn test_unified_diff_withDistantChanges_shouldSplitHunks() {
    let a_lines: Vec<String> = (0..30).map(|i| format!("line {}", i)).collect();
    let mut b_lines = a_lines.clone();
    b_lines[2] = "changed near top".to_string();
    b_lines[27] = "changed near bottom".to_string();

    let a = a_lines.join("\n");
    let b = b_lines.join("\n");

    let diff = unified_diff(&a, &b, "a", "b", 3);

    let hunk_count = diff.matches("@@ -").count();
    assert_eq!(hunk_count, 2);
    assert!(diff.contains("+changed near top\n"));
    assert!(diff.contains("+changed near bottom\n"));
}

/// Test that context lines are limited around a change
#[test]
fn test_unified_diff_withLongEqualRuns_shouldLimitContext() {
    let a_lines: Vec<String> = (0..50).map(|i| format!("line {}", i)).collect();
    let mut b_lines = a_lines.clone();
    b_lines[25] = "the change".to_string();

    let a = a_lines.join("\n");
    let b = b_lines.join("\n");

    let diff = unified_diff(&a, &b, "a", "b", 3);

    // 3 context above + 3 below + one minus + one plus + 3 header lines
    let line_count = diff.lines().count();
    assert_eq!(line_count, 11);
    assert!(!diff.contains("line 0\n"));
    assert!(!diff.contains("line 49\n"));
}
