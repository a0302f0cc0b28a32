pub mod components;
mod renderfns;
mod views;

use crate::app::{App, Focus};
use ratatui::prelude::*;
use ratatui::widgets::ListState;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  renderfns::draw_header(
    frame,
    chunks[0],
    app.title(),
    app.document_origin(),
    app.is_loading(),
  );

  let body = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(chunks[1]);

  views::document::draw_document(
    frame,
    body[0],
    app.document_text(),
    app.document_scroll(),
    app.focus() == Focus::Document,
  );

  let results_area = if app.show_history() {
    let right = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
      .split(body[1]);
    views::history::draw_history(
      frame,
      right[1],
      app.recent_searches(),
      app.history_state(),
      app.focus() == Focus::History,
    );
    right[0]
  } else {
    body[1]
  };

  views::results::draw_results(
    frame,
    results_area,
    app.results(),
    app.search_key(),
    app.results_state(),
    app.focus() == Focus::Results,
  );

  renderfns::draw_status(frame, chunks[2], app.notifier().current());

  // Overlays last so they sit on top
  app.key_input().render_overlay(frame, chunks[1]);
  app.command_input().render_overlay(frame, chunks[1]);
}

/// Keep a list selection inside `0..len`
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
  } else {
    let selected = state.selected().unwrap_or(0).min(len - 1);
    state.select(Some(selected));
  }
}
