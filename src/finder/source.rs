//! Loading documents from pasted text, files and URLs.

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Why a document could not be produced
#[derive(Debug, Error)]
pub enum DocumentError {
  #[error("Invalid JSON: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("Failed to read {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("{0} is not valid UTF-8 text")]
  NotUtf8(String),

  #[error("Invalid URL: {0}")]
  InvalidUrl(String),

  #[error("Failed to fetch data from URL: {0}")]
  Request(String),

  #[error("Failed to fetch data from URL (HTTP {0})")]
  Status(u16),

  #[error("URL does not return JSON data")]
  NotJson,
}

/// A successfully parsed document together with the text shown in the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  /// Where the document came from, for the header
  pub origin: String,
  pub text: String,
  pub value: Value,
}

/// Parse JSON text as typed or pasted by the user.
pub fn parse_text(text: &str) -> Result<Value, DocumentError> {
  Ok(serde_json::from_str(text)?)
}

impl Document {
  /// Build a document from raw text, keeping the text as given.
  pub fn from_text(origin: impl Into<String>, text: String) -> Result<Self, DocumentError> {
    let value = parse_text(&text)?;
    Ok(Self {
      origin: origin.into(),
      text,
      value,
    })
  }
}

/// Read a local file that must hold UTF-8 JSON text.
pub fn read_file(path: &Path) -> Result<Document, DocumentError> {
  let display = path.display().to_string();
  let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
    path: display.clone(),
    source,
  })?;
  let text = String::from_utf8(bytes).map_err(|_| DocumentError::NotUtf8(display.clone()))?;

  let document = Document::from_text(display, text)?;
  info!(path = %document.origin, bytes = document.text.len(), "Loaded JSON file");
  Ok(document)
}

/// Validate a user-supplied URL; only http and https are fetched.
pub fn parse_url(raw: &str) -> Result<Url, DocumentError> {
  let url = Url::parse(raw.trim())
    .map_err(|e| DocumentError::InvalidUrl(format!("{}: {}", raw, e)))?;
  match url.scheme() {
    "http" | "https" => Ok(url),
    other => Err(DocumentError::InvalidUrl(format!(
      "unsupported scheme '{}'",
      other
    ))),
  }
}

/// HTTP client used for remote documents
#[derive(Clone)]
pub struct Fetcher {
  client: reqwest::Client,
}

impl Fetcher {
  pub fn new(timeout: Duration) -> color_eyre::Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .user_agent(concat!("jkf/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| color_eyre::eyre::eyre!("Failed to create HTTP client: {}", e))?;
    Ok(Self { client })
  }

  /// Fetch a remote document.
  ///
  /// The response must be 2xx, declare a JSON content type and parse as JSON.
  /// The stored text is the document re-serialized with indentation.
  pub async fn fetch(&self, raw_url: &str) -> Result<Document, DocumentError> {
    let url = parse_url(raw_url)?;
    debug!(%url, "Fetching JSON document");

    let response = self
      .client
      .get(url.clone())
      .send()
      .await
      .map_err(|e| DocumentError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(DocumentError::Status(status.as_u16()));
    }

    let content_type = response
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .unwrap_or_default();
    if !is_json_content_type(content_type) {
      return Err(DocumentError::NotJson);
    }

    let body = response
      .text()
      .await
      .map_err(|e| DocumentError::Request(e.to_string()))?;
    let value: Value = serde_json::from_str(&body).map_err(|_| DocumentError::NotJson)?;
    let text = serde_json::to_string_pretty(&value)?;

    info!(%url, bytes = body.len(), "Fetched JSON document");
    Ok(Document {
      origin: url.to_string(),
      text,
      value,
    })
  }
}

fn is_json_content_type(content_type: &str) -> bool {
  content_type.to_ascii_lowercase().contains("application/json")
}
