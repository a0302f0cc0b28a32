//! Key search over a parsed JSON document.
//!
//! The walk is depth-first pre-order over objects and arrays. Every object
//! entry whose key equals the target key produces a [`SearchResult`], and the
//! walk keeps descending into composite values whether or not they matched, so
//! a match always precedes the matches nested inside it.
//!
//! Descent uses an explicit stack of iterator frames rather than recursion, so
//! pathological nesting is bounded by [`SearchOptions::max_depth`] instead of
//! the thread's stack size.

use serde_json::{map, Value};
use std::iter::Enumerate;
use std::slice;
use tracing::{debug, warn};

use super::types::SearchResult;

/// Default nesting limit. serde_json refuses to parse deeper than 128 levels,
/// so this only matters for documents built in code.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Tuning knobs for [`search_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
  /// Containers nested deeper than this are not descended into
  pub max_depth: usize,
  /// Extend paths with array positions (`items.0.id`) instead of skipping them
  pub index_array_paths: bool,
}

impl Default for SearchOptions {
  fn default() -> Self {
    Self {
      max_depth: DEFAULT_MAX_DEPTH,
      index_array_paths: false,
    }
  }
}

/// Find every object entry named `target_key`, in traversal order.
pub fn search(document: &Value, target_key: &str) -> Vec<SearchResult> {
  search_with(document, target_key, &SearchOptions::default())
}

/// Pending children of one container on the work-list
enum Frame<'a> {
  Object {
    entries: map::Iter<'a>,
    path: String,
  },
  Array {
    items: Enumerate<slice::Iter<'a, Value>>,
    path: String,
  },
}

impl<'a> Frame<'a> {
  /// Frame for a composite value, `None` for scalars
  fn open(value: &'a Value, path: String) -> Option<Self> {
    match value {
      Value::Object(map) => Some(Frame::Object {
        entries: map.iter(),
        path,
      }),
      Value::Array(items) => Some(Frame::Array {
        items: items.iter().enumerate(),
        path,
      }),
      _ => None,
    }
  }
}

/// Find every object entry named `target_key`, honouring `options`.
pub fn search_with(
  document: &Value,
  target_key: &str,
  options: &SearchOptions,
) -> Vec<SearchResult> {
  let mut results = Vec::new();
  let mut stack: Vec<Frame<'_>> = Frame::open(document, String::new()).into_iter().collect();
  let mut depth_cut = false;

  while let Some(frame) = stack.last_mut() {
    let (child_path, child) = match frame {
      Frame::Object { entries, path } => match entries.next() {
        Some((key, value)) => {
          let child_path = join_path(path, key);
          if key == target_key {
            results.push(SearchResult::new(child_path.clone(), value.clone()));
          }
          (child_path, value)
        }
        None => {
          stack.pop();
          continue;
        }
      },
      Frame::Array { items, path } => match items.next() {
        Some((index, value)) => {
          let child_path = if options.index_array_paths {
            join_path(path, &index.to_string())
          } else {
            path.clone()
          };
          (child_path, value)
        }
        None => {
          stack.pop();
          continue;
        }
      },
    };

    if !matches!(child, Value::Object(_) | Value::Array(_)) {
      continue;
    }
    if stack.len() >= options.max_depth {
      depth_cut = true;
      continue;
    }
    if let Some(next) = Frame::open(child, child_path) {
      stack.push(next);
    }
  }

  if depth_cut {
    warn!(
      max_depth = options.max_depth,
      "Search stopped descending past the depth limit"
    );
  }
  debug!(key = target_key, matches = results.len(), "Key search finished");

  results
}

/// Join a parent path and a key with `.`; the root path is empty.
pub fn join_path(parent: &str, key: &str) -> String {
  if parent.is_empty() {
    key.to_string()
  } else {
    format!("{}.{}", parent, key)
  }
}
