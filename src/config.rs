use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::finder::SearchOptions;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory for the history database and logs (default: $XDG_DATA_HOME/jkf)
  pub data_dir: Option<PathBuf>,
  /// Directory that receives search-results.json (default: the user's download dir)
  pub download_dir: Option<PathBuf>,
  /// Custom title for header
  pub title: Option<String>,
  pub fetch: FetchConfig,
  pub search: SearchConfig,
  pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
  /// Request timeout for URL fetches
  pub timeout_secs: u64,
}

impl Default for FetchConfig {
  fn default() -> Self {
    Self { timeout_secs: 30 }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Containers nested deeper than this are not searched
  pub max_depth: usize,
  /// Include array positions in result paths (`items.0.id`)
  pub index_array_paths: bool,
}

impl Default for SearchConfig {
  fn default() -> Self {
    let options = SearchOptions::default();
    Self {
      max_depth: options.max_depth,
      index_array_paths: options.index_array_paths,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
  /// How many UI ticks (250ms each) a notification stays visible
  pub ttl_ticks: u32,
}

impl Default for NotificationConfig {
  fn default() -> Self {
    Self { ttl_ticks: 12 }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided (must exist)
  /// 2. ./jkf.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/jkf/config.yaml
  ///
  /// Without any config file the defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("jkf.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("jkf").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
    // An empty file deserializes to null; treat it as all defaults
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(contents)
  }

  /// Resolved data directory.
  pub fn data_dir(&self) -> Result<PathBuf> {
    match &self.data_dir {
      Some(dir) => Ok(dir.clone()),
      None => default_data_dir(),
    }
  }

  /// Resolved download directory, falling back to the working directory.
  pub fn download_dir(&self) -> PathBuf {
    self
      .download_dir
      .clone()
      .or_else(dirs::download_dir)
      .unwrap_or_else(|| PathBuf::from("."))
  }

  pub fn fetch_timeout(&self) -> Duration {
    Duration::from_secs(self.fetch.timeout_secs)
  }

  pub fn search_options(&self) -> SearchOptions {
    SearchOptions {
      max_depth: self.search.max_depth.max(1),
      index_array_paths: self.search.index_array_paths,
    }
  }
}

/// `$XDG_DATA_HOME/jkf`, or `~/.local/share/jkf` when the platform has no data dir.
pub fn default_data_dir() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("jkf"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.fetch.timeout_secs, 30);
    assert_eq!(config.search.max_depth, 512);
    assert!(!config.search.index_array_paths);
    assert_eq!(config.notifications.ttl_ticks, 12);
    assert_eq!(config.search_options(), SearchOptions::default());
  }

  #[test]
  fn test_partial_yaml_keeps_defaults() {
    let config = Config::from_yaml(
      "title: My JSON\nsearch:\n  index_array_paths: true\n",
    )
    .unwrap();
    assert_eq!(config.title.as_deref(), Some("My JSON"));
    assert!(config.search.index_array_paths);
    assert_eq!(config.search.max_depth, 512);
    assert_eq!(config.fetch.timeout_secs, 30);
  }

  #[test]
  fn test_empty_yaml_is_default() {
    let config = Config::from_yaml("\n").unwrap();
    assert!(config.data_dir.is_none());
    assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
  }

  #[test]
  fn test_invalid_yaml_is_error() {
    assert!(Config::from_yaml("fetch: [1, 2").is_err());
    assert!(Config::from_yaml("fetch:\n  timeout_secs: soon\n").is_err());
  }

  #[test]
  fn test_zero_depth_is_clamped() {
    let config = Config::from_yaml("search:\n  max_depth: 0\n").unwrap();
    assert_eq!(config.search_options().max_depth, 1);
  }

  #[test]
  fn test_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jkf.yaml");
    std::fs::write(
      &path,
      "data_dir: /tmp/jkf-data\ndownload_dir: /tmp/jkf-downloads\n",
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/jkf-data"));
    assert_eq!(config.download_dir(), PathBuf::from("/tmp/jkf-downloads"));
  }

  #[test]
  fn test_missing_explicit_path_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::load(Some(&dir.path().join("missing.yaml"))).is_err());
  }
}
