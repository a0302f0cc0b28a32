//! Clipboard and file export of search results.

use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::types::SearchResult;

/// File name used by the download action
pub const DOWNLOAD_FILE_NAME: &str = "search-results.json";

/// Results as indented JSON text, the format both export actions share
pub fn results_to_json(results: &[SearchResult]) -> Result<String> {
  serde_json::to_string_pretty(results).map_err(|e| eyre!("Failed to serialize results: {}", e))
}

/// Put the results on the system clipboard.
pub fn copy_to_clipboard(results: &[SearchResult]) -> Result<()> {
  use arboard::Clipboard;
  let text = results_to_json(results)?;
  let mut clipboard = Clipboard::new().map_err(|e| eyre!("Clipboard init failed: {}", e))?;
  clipboard
    .set_text(text)
    .map_err(|e| eyre!("Failed to write clipboard: {}", e))?;
  Ok(())
}

/// Read UTF-8 text from the system clipboard.
pub fn read_clipboard() -> Result<String> {
  use arboard::Clipboard;
  let mut clipboard = Clipboard::new().map_err(|e| eyre!("Clipboard init failed: {}", e))?;
  clipboard
    .get_text()
    .map_err(|e| eyre!("Failed reading clipboard text: {}", e))
}

/// Write the results to `search-results.json` inside `dir`, replacing any
/// earlier download. Returns the written path.
pub fn download(results: &[SearchResult], dir: &Path) -> Result<PathBuf> {
  std::fs::create_dir_all(dir)
    .map_err(|e| eyre!("Failed to create download directory {}: {}", dir.display(), e))?;

  let path = dir.join(DOWNLOAD_FILE_NAME);
  let text = results_to_json(results)?;
  std::fs::write(&path, text).map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;

  info!(path = %path.display(), count = results.len(), "Downloaded search results");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn sample() -> Vec<SearchResult> {
    vec![
      SearchResult::new("user.id", json!(5)),
      SearchResult::new("user.meta.id", json!("x")),
    ]
  }

  #[test]
  fn test_results_to_json_is_indented() {
    let text = results_to_json(&sample()).unwrap();
    assert!(text.starts_with("[\n  {\n    \"path\": \"user.id\""));
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
      parsed,
      json!([
        { "path": "user.id", "value": 5 },
        { "path": "user.meta.id", "value": "x" }
      ])
    );
  }

  #[test]
  fn test_download_writes_fixed_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("downloads");

    let path = download(&sample(), &target).unwrap();
    assert_eq!(path, target.join(DOWNLOAD_FILE_NAME));

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, results_to_json(&sample()).unwrap());
  }

  #[test]
  fn test_download_overwrites_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    download(&sample(), dir.path()).unwrap();
    let path = download(&sample()[..1], dir.path()).unwrap();

    let parsed: Vec<SearchResult> =
      serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(parsed.len(), 1);
  }
}
