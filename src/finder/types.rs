use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, Write};

/// A single key match inside a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
  /// Dot-joined key names from the document root to the matching key
  pub path: String,
  /// The matched entry's value, copied verbatim
  pub value: Value,
}

impl SearchResult {
  pub fn new(path: impl Into<String>, value: Value) -> Self {
    Self {
      path: path.into(),
      value,
    }
  }

  /// Compact single-line rendering of the value, at most `max_chars` long.
  ///
  /// Serialization stops once enough text is produced, so large subtrees are
  /// not encoded in full just to be cut.
  pub fn value_preview(&self, max_chars: usize) -> String {
    let mut out = Bounded {
      buf: Vec::new(),
      // A char is at most 4 bytes; one spare char shows whether we were cut
      limit: max_chars.saturating_add(1).saturating_mul(4),
    };
    let complete = serde_json::to_writer(&mut out, &self.value).is_ok();
    let text = String::from_utf8_lossy(&out.buf);

    if complete && text.chars().count() <= max_chars {
      return text.into_owned();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Writer that accepts bytes up to `limit`, then fails
struct Bounded {
  buf: Vec<u8>,
  limit: usize,
}

impl Write for Bounded {
  fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
    let room = self.limit.saturating_sub(self.buf.len());
    if room == 0 && !bytes.is_empty() {
      return Err(io::Error::new(io::ErrorKind::WriteZero, "preview limit reached"));
    }
    let n = bytes.len().min(room);
    self.buf.extend_from_slice(&bytes[..n]);
    Ok(n)
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

/// A past search invocation kept in the recent-search history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
  pub id: String,
  pub key: String,
  /// Epoch milliseconds
  pub timestamp: i64,
  pub results: Vec<SearchResult>,
}
