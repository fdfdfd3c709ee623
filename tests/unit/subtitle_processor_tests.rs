/*!
 * Tests for subtitle parsing and serialization
 */

use std::fmt::Write;
use anyhow::Result;
use subalign::subtitle_processor::{SubtitleEntry, SubtitleCollection};

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = SubtitleEntry::parse_timestamp(ts).unwrap();
    assert_eq!(ms, 5025678);

    let formatted = SubtitleEntry::format_timestamp(ms);
    assert_eq!(formatted, ts);
}

/// Test timestamp validation of out-of-range components
#[test]
fn test_timestamp_parsing_withInvalidComponents_shouldFail() {
    assert!(SubtitleEntry::parse_timestamp("00:61:00,000").is_err());
    assert!(SubtitleEntry::parse_timestamp("00:00:61,000").is_err());
    assert!(SubtitleEntry::parse_timestamp("not a timestamp").is_err());
}

/// Test subtitle entry display formatting
#[test]
fn test_subtitle_entry_display_withValidEntry_shouldFormatCorrectly() {
    let entry = SubtitleEntry::new(1, 5000, 10000, "Test subtitle".to_string());
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert!(output.contains("1"));
    assert!(output.contains("00:00:05,000 --> 00:00:10,000"));
    assert!(output.contains("Test subtitle"));
}

/// Test that multi-line cue text flattens to a single line
#[test]
fn test_flat_text_withMultilineEntry_shouldJoinWithSpaces() {
    let entry = SubtitleEntry::new(1, 0, 1000, "Hello\nWorld".to_string());
    assert_eq!(entry.flat_text(), "Hello World");
}

/// Test basic SRT parsing
#[test]
fn test_parse_srt_string_withValidContent_shouldExtractAllCues() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:04,000\nFirst cue\n\n2\n00:00:05,000 --> 00:00:09,000\nSecond cue\nwith two lines\n\n3\n00:00:10,000 --> 00:00:14,000\nThird cue\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].text, "First cue");
    assert_eq!(entries[1].text, "Second cue\nwith two lines");
    assert_eq!(entries[1].start_time_ms, 5000);
    assert_eq!(entries[2].end_time_ms, 14000);

    Ok(())
}

/// Test that a trailing block without a final blank line is still captured
#[test]
fn test_parse_srt_string_withNoTrailingBlankLine_shouldCaptureLastCue() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nFirst\n\n2\n00:00:03,000 --> 00:00:04,000\nLast without newline";

    let entries = SubtitleCollection::parse_srt_string(content)?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].text, "Last without newline");

    Ok(())
}

/// Test that original sequence numbers survive parsing
#[test]
fn test_parse_srt_string_withNonSequentialIndices_shouldPreserveIndices() -> Result<()> {
    let content = "10\n00:00:01,000 --> 00:00:02,000\nTen\n\n20\n00:00:03,000 --> 00:00:04,000\nTwenty\n\n30\n00:00:05,000 --> 00:00:06,000\nThirty\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;
    let seq_nums: Vec<usize> = entries.iter().map(|e| e.seq_num).collect();
    assert_eq!(seq_nums, vec![10, 20, 30]);

    Ok(())
}

/// Test that entries come back sorted by start time
#[test]
fn test_parse_srt_string_withOutOfOrderCues_shouldSortByStartTime() -> Result<()> {
    let content = "2\n00:00:05,000 --> 00:00:06,000\nSecond\n\n1\n00:00:01,000 --> 00:00:02,000\nFirst\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;
    assert_eq!(entries[0].text, "First");
    assert_eq!(entries[1].text, "Second");
    // Indices are untouched by the sort
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[1].seq_num, 2);

    Ok(())
}

/// Test that prose without cue blocks is rejected
#[test]
fn test_parse_srt_string_withPlainProse_shouldFail() {
    let content = "This is just some prose.\nIt has no timestamps at all.\nNothing to see here.";
    assert!(SubtitleCollection::parse_srt_string(content).is_err());
}

/// Test that empty content is rejected
#[test]
fn test_parse_srt_string_withEmptyContent_shouldFail() {
    assert!(SubtitleCollection::parse_srt_string("").is_err());
}

/// Test format idempotence: parse(format(cues)) keeps count and timestamps
#[test]
fn test_srt_roundtrip_withValidCues_shouldPreserveCountAndTimestamps() -> Result<()> {
    let mut collection = SubtitleCollection::new("test.srt".into());
    collection.entries.push(SubtitleEntry::new(1, 1000, 4000, "First cue".to_string()));
    collection.entries.push(SubtitleEntry::new(2, 5500, 9250, "Second cue".to_string()));
    collection.entries.push(SubtitleEntry::new(3, 10000, 14875, "Third cue".to_string()));

    let serialized = collection.to_srt_string();
    let reparsed = SubtitleCollection::parse_srt_string(&serialized)?;

    assert_eq!(reparsed.len(), collection.entries.len());
    for (original, parsed) in collection.entries.iter().zip(reparsed.iter()) {
        assert_eq!(original.seq_num, parsed.seq_num);
        assert_eq!(original.start_time_ms, parsed.start_time_ms);
        assert_eq!(original.end_time_ms, parsed.end_time_ms);
    }

    Ok(())
}

/// Test that serialization omits cues with empty text
#[test]
fn test_to_srt_string_withEmptyCues_shouldOmitThem() {
    let mut collection = SubtitleCollection::new("test.srt".into());
    collection.entries.push(SubtitleEntry::new(1, 1000, 2000, "Kept".to_string()));
    collection.entries.push(SubtitleEntry::new(2, 3000, 4000, String::new()));
    collection.entries.push(SubtitleEntry::new(3, 5000, 6000, "Also kept".to_string()));

    let serialized = collection.to_srt_string();
    assert!(serialized.contains("Kept"));
    assert!(serialized.contains("Also kept"));
    // The empty cue's index should not appear as a block
    assert!(!serialized.contains("\n2\n"));

    let reparsed = SubtitleCollection::parse_srt_string(&serialized).unwrap();
    assert_eq!(reparsed.len(), 2);
    assert_eq!(reparsed[0].seq_num, 1);
    assert_eq!(reparsed[1].seq_num, 3);
}

/// Test plain-text extraction drops numbering and timestamps
#[test]
fn test_to_plain_text_withMultilineCues_shouldDropTimingLines() {
    let mut collection = SubtitleCollection::new("test.srt".into());
    collection.entries.push(SubtitleEntry::new(1, 1000, 2000, "First line\nof first cue".to_string()));
    collection.entries.push(SubtitleEntry::new(2, 3000, 4000, "Second cue".to_string()));

    let plain = collection.to_plain_text();
    assert_eq!(plain, "First line of first cue\nSecond cue");
    assert!(!plain.contains("00:00"));
}
