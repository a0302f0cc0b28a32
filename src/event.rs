use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

/// Application events
#[derive(Debug)]
pub enum Event {
  /// Terminal key press
  Key(KeyEvent),
  /// Bracketed paste of text into the terminal
  Paste(String),
  /// Periodic tick for UI refresh, fetch polling and notification expiry
  Tick,
}

/// Event handler that produces events from terminal input and a tick timer
pub struct EventHandler {
  rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
  /// Create a new event handler with the given tick rate
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();

    // Spawn terminal event reader
    tokio::spawn(async move {
      loop {
        let next = if event::poll(tick_rate).unwrap_or(false) {
          match event::read() {
            // Windows reports releases too; act on presses only
            Ok(CrosstermEvent::Key(key)) if key.kind != KeyEventKind::Release => {
              Some(Event::Key(key))
            }
            Ok(CrosstermEvent::Paste(text)) => Some(Event::Paste(text)),
            _ => None,
          }
        } else {
          Some(Event::Tick)
        };

        if let Some(evt) = next {
          if tx.send(evt).is_err() {
            break;
          }
        }
      }
    });

    Self { rx }
  }

  /// Receive the next event
  pub async fn next(&mut self) -> Option<Event> {
    self.rx.recv().await
  }
}
