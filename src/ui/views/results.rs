use crate::finder::SearchResult;
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{border_color, truncate};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Draw the results list, one "Path" and "Value" pair per match
pub fn draw_results(
  frame: &mut Frame,
  area: Rect,
  results: &[SearchResult],
  key: &str,
  state: &ListState,
  focused: bool,
) {
  let title = if key.is_empty() {
    " Results ".to_string()
  } else {
    format!(" Results for \"{}\" ({}) ", truncate(key, 30), results.len())
  };

  let block = Block::default()
    .title(title)
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border_color(focused)));

  if results.is_empty() {
    let paragraph = Paragraph::new("No results. Press / to search for a key.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let value_width = (area.width as usize).saturating_sub(12).max(10);
  let items: Vec<ListItem> = results
    .iter()
    .map(|result| {
      ListItem::new(vec![
        Line::from(vec![
          Span::styled("Path: ", Style::default().fg(Color::DarkGray)),
          Span::styled(result.path.clone(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
          Span::styled("Value: ", Style::default().fg(Color::DarkGray)),
          Span::raw(result.value_preview(value_width)),
        ]),
      ])
    })
    .collect();

  let list = List::new(items)
    .block(block)
    .highlight_style(
      Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

  let mut state = state.clone();
  ensure_valid_selection(&mut state, results.len());
  frame.render_stateful_widget(list, area, &mut state);
}
