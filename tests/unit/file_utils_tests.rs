/*!
 * Tests for file system utilities
 */

use anyhow::Result;
use std::path::PathBuf;
use subalign::file_utils::FileManager;
use crate::common;

/// Test file and directory existence checks
#[test]
fn test_existence_checks_withTempDir_shouldDistinguishFilesAndDirs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();

    let file_path = common::create_test_file(&dir_path, "file.txt", "content")?;

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(&dir_path));
    assert!(FileManager::dir_exists(&dir_path));
    assert!(!FileManager::dir_exists(&file_path));
    assert!(!FileManager::file_exists(dir_path.join("missing.txt")));

    Ok(())
}

/// Test read and write round trip
#[test]
fn test_read_write_withNestedPath_shouldCreateParentDirs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("file.txt");

    FileManager::write_to_file(&nested, "nested content")?;
    let content = FileManager::read_to_string(&nested)?;
    assert_eq!(content, "nested content");

    Ok(())
}

/// Test output path generation
#[test]
fn test_generate_output_path_withSubtitleInput_shouldAddSuffixAndExtension() {
    let output = FileManager::generate_output_path(
        PathBuf::from("/videos/episode1.srt"),
        "corrected",
        "srt",
    );
    assert_eq!(output, PathBuf::from("/videos/episode1.corrected.srt"));
}

/// Test finding files by extension
#[test]
fn test_find_files_withMixedExtensions_shouldFilterByExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();

    common::create_test_file(&dir_path, "one.srt", "1")?;
    common::create_test_file(&dir_path, "two.srt", "2")?;
    common::create_test_file(&dir_path, "notes.txt", "3")?;

    let srt_files = FileManager::find_files(&dir_path, "srt")?;
    assert_eq!(srt_files.len(), 2);

    let txt_files = FileManager::find_files(&dir_path, ".txt")?;
    assert_eq!(txt_files.len(), 1);

    Ok(())
}
