use super::input::{InputResult, TextInput};
use super::{overlay_width, KeyResult};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Events emitted by the key prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPromptEvent {
  /// Search for this key
  Submitted(String),
  /// Prompt closed without searching
  Cancelled,
}

/// Prompt for the key name to search, opened with `/`.
///
/// The last searched key stays in the buffer so it can be refined.
#[derive(Debug, Clone, Default)]
pub struct KeyInput {
  input: TextInput,
  active: bool,
}

impl KeyInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Current key text
  pub fn value(&self) -> &str {
    self.input.value()
  }

  /// Replace the key text, e.g. when a recent search is reopened
  pub fn set_value(&mut self, value: &str) {
    self.input.set_value(value);
  }

  pub fn activate(&mut self) {
    self.active = true;
  }

  pub fn paste(&mut self, text: &str) {
    if self.active {
      self.input.insert_str(text);
    }
  }

  /// Handle a key event
  /// Call this regardless of active state - it handles activation too
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<KeyPromptEvent> {
    if !self.active {
      if key.code == KeyCode::Char('/') {
        self.activate();
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    match self.input.handle_key(key) {
      InputResult::Submitted(value) => {
        self.active = false;
        KeyResult::Event(KeyPromptEvent::Submitted(value))
      }
      InputResult::Cancelled => {
        self.active = false;
        KeyResult::Event(KeyPromptEvent::Cancelled)
      }
      InputResult::Consumed => KeyResult::Handled,
      InputResult::NotHandled => KeyResult::NotHandled,
    }
  }

  /// Render the prompt overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let width = overlay_width(area.width, 60, 60);
    let overlay_area = Rect::new(area.x + 1, area.y + 1, width, 3).intersection(area);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Search key ");

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let (before, after) = self.input.split_at_cursor();
    let input_line = Line::from(vec![
      Span::styled("/", Style::default().fg(Color::Yellow)),
      Span::raw(before),
      Span::styled("_", Style::default().fg(Color::Yellow)), // Cursor
      Span::raw(after),
    ]);
    frame.render_widget(Paragraph::new(input_line), inner);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn test_submit_key() {
    let mut prompt = KeyInput::new();
    assert_eq!(prompt.handle_key(key(KeyCode::Char('/'))), KeyResult::Handled);
    prompt.handle_key(key(KeyCode::Char('i')));
    prompt.handle_key(key(KeyCode::Char('d')));

    assert_eq!(
      prompt.handle_key(key(KeyCode::Enter)),
      KeyResult::Event(KeyPromptEvent::Submitted("id".to_string()))
    );
    assert!(!prompt.is_active());
  }

  #[test]
  fn test_value_survives_reopen() {
    let mut prompt = KeyInput::new();
    prompt.set_value("user");
    prompt.activate();
    prompt.handle_key(key(KeyCode::Char('s')));
    assert_eq!(
      prompt.handle_key(key(KeyCode::Enter)),
      KeyResult::Event(KeyPromptEvent::Submitted("users".to_string()))
    );
    assert_eq!(prompt.value(), "users");
  }

  #[test]
  fn test_inactive_ignores_keys() {
    let mut prompt = KeyInput::new();
    assert_eq!(prompt.handle_key(key(KeyCode::Char('i'))), KeyResult::NotHandled);
    assert!(prompt.value().is_empty());
  }

  #[test]
  fn test_cancel_keeps_value() {
    let mut prompt = KeyInput::new();
    prompt.set_value("id");
    prompt.activate();
    assert_eq!(
      prompt.handle_key(key(KeyCode::Esc)),
      KeyResult::Event(KeyPromptEvent::Cancelled)
    );
    assert_eq!(prompt.value(), "id");
  }
}
