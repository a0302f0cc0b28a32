use crate::notice::{Level, Notice};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const HINT: &str = " Tab:pane  j/k:nav  c:copy  d:download  Enter:open search  x:clear history";

/// Draw the status line: the current notification, or key hints when idle
pub fn draw_status(frame: &mut Frame, area: Rect, notice: Option<&Notice>) {
  let line = match notice {
    Some(notice) => Line::from(Span::styled(
      format!(" {}", notice.message),
      level_style(notice.level),
    )),
    None => Line::from(Span::styled(HINT, Style::default().fg(Color::DarkGray))),
  };

  let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);
}

fn level_style(level: Level) -> Style {
  match level {
    Level::Info => Style::default().fg(Color::White),
    Level::Success => Style::default().fg(Color::Green),
    Level::Error => Style::default().fg(Color::Red).bold(),
  }
}
