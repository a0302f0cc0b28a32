use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with title, document origin, and shortcuts
pub fn draw_header(
  frame: &mut Frame,
  area: Rect,
  title: &str,
  origin: Option<&str>,
  loading: bool,
) {
  let origin = origin_label(origin, loading);

  let header = Line::from(vec![
    Span::styled(format!(" {} ", title), Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", origin), Style::default().fg(Color::White)),
    Span::raw("  "),
    // Shortcuts - keys and brackets highlighted, descriptions dimmed
    Span::styled("<:>", Style::default().fg(Color::Cyan)),
    Span::styled(" command", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("</>", Style::default().fg(Color::Cyan)),
    Span::styled(" search", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("<h>", Style::default().fg(Color::Cyan)),
    Span::styled(" history", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("<q>", Style::default().fg(Color::Cyan)),
    Span::styled(" quit", Style::default().fg(Color::DarkGray)),
  ]);

  let paragraph = Paragraph::new(header).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

fn origin_label(origin: Option<&str>, loading: bool) -> String {
  match (origin, loading) {
    (_, true) => "fetching...".to_string(),
    (Some(origin), false) => origin.to_string(),
    (None, false) => "no document".to_string(),
  }
}
