use chrono::{DateTime, Local, TimeZone};
use ratatui::prelude::Color;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Format a millisecond timestamp like "Mar 4, 2025 09:15" in local time
pub fn format_timestamp(millis: i64) -> String {
  format_timestamp_in(millis, &Local)
}

pub fn format_timestamp_in<Tz>(millis: i64, tz: &Tz) -> String
where
  Tz: TimeZone,
  Tz::Offset: std::fmt::Display,
{
  match DateTime::from_timestamp_millis(millis) {
    Some(utc) => utc.with_timezone(tz).format("%b %-d, %Y %H:%M").to_string(),
    None => "unknown time".to_string(),
  }
}

/// "1 result" / "4 results"
pub fn result_count_label(count: usize) -> String {
  format!("{} result{}", count, if count == 1 { "" } else { "s" })
}

/// Border color for a pane, brighter when it has focus
pub fn border_color(focused: bool) -> Color {
  if focused {
    Color::Cyan
  } else {
    Color::Blue
  }
}
