use crate::ui::renderfns::border_color;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Draw the document pane: the raw JSON text, scrolled to `scroll`
pub fn draw_document(frame: &mut Frame, area: Rect, text: &str, scroll: u16, focused: bool) {
  let block = Block::default()
    .title(" Document ")
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border_color(focused)));

  if text.is_empty() {
    let paragraph = Paragraph::new(vec![
      Line::raw("No JSON loaded."),
      Line::raw(""),
      Line::raw("Paste JSON into the terminal, or use"),
      Line::raw("  :open <path>   :fetch <url>   :paste"),
    ])
    .block(block)
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let paragraph = Paragraph::new(text).block(block).scroll((scroll, 0));
  frame.render_widget(paragraph, area);
}
