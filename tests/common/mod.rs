/*!
 * Common test utilities for the podpost test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample marker table for testing
pub fn create_test_markers(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "Name\tStart\tDuration\tTime Format\tType\n\
        Intro\t0:00\t0:10\tdecimal\tCue\n\
        Topic\t0:10\t0:05\tdecimal\tCue\n\
        おわりに\t0:15\t1:00:00\tdecimal\tCue\n";
    create_test_file(dir, filename, content)
}

/// Creates a minimal episode record for testing
pub fn create_test_episode_json(dir: &PathBuf, filename: &str, number: &str) -> Result<PathBuf> {
    let content = format!(
        r#"{{
    "Number": "{}",
    "Title": "Test Episode",
    "Starr": {{"Gota": null, "Ken": null}},
    "Topics": ["⚽ サッカーの話", "🎮 ゲームの話"],
    "References": {{"Some article": "https://example.com/a"}},
    "Genre": "concast",
    "Edited": false
}}"#,
        number
    );
    create_test_file(dir, filename, &content)
}
