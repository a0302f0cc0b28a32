//! Transient status-line notifications.

/// How a notification is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Info,
  Success,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub level: Level,
  pub message: String,
  ticks_left: u32,
}

/// Holds the one notification currently shown. A newer one replaces it.
#[derive(Debug, Clone)]
pub struct Notifier {
  current: Option<Notice>,
  ttl_ticks: u32,
}

impl Notifier {
  pub fn new(ttl_ticks: u32) -> Self {
    Self {
      current: None,
      ttl_ticks: ttl_ticks.max(1),
    }
  }

  pub fn current(&self) -> Option<&Notice> {
    self.current.as_ref()
  }

  pub fn info(&mut self, message: impl Into<String>) {
    self.push(Level::Info, message.into());
  }

  pub fn success(&mut self, message: impl Into<String>) {
    self.push(Level::Success, message.into());
  }

  pub fn error(&mut self, message: impl Into<String>) {
    self.push(Level::Error, message.into());
  }

  fn push(&mut self, level: Level, message: String) {
    self.current = Some(Notice {
      level,
      message,
      ticks_left: self.ttl_ticks,
    });
  }

  /// Age the current notification by one tick, dropping it once expired
  pub fn tick(&mut self) {
    if let Some(notice) = &mut self.current {
      notice.ticks_left = notice.ticks_left.saturating_sub(1);
      if notice.ticks_left == 0 {
        self.current = None;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_expires_after_ttl() {
    let mut notifier = Notifier::new(2);
    notifier.success("Copied to clipboard");
    notifier.tick();
    assert_eq!(notifier.current().map(|n| n.level), Some(Level::Success));
    notifier.tick();
    assert!(notifier.current().is_none());
  }

  #[test]
  fn test_newer_replaces_older() {
    let mut notifier = Notifier::new(5);
    notifier.info("No matches found");
    notifier.error("Invalid JSON format");
    let notice = notifier.current().unwrap();
    assert_eq!(notice.level, Level::Error);
    assert_eq!(notice.message, "Invalid JSON format");
  }

  #[test]
  fn test_zero_ttl_still_shows_once() {
    let mut notifier = Notifier::new(0);
    notifier.info("hello");
    assert!(notifier.current().is_some());
    notifier.tick();
    assert!(notifier.current().is_none());
  }
}
