use crate::finder::RecentSearch;
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{border_color, format_timestamp, result_count_label, truncate};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Draw the recent-search list, newest first
pub fn draw_history(
  frame: &mut Frame,
  area: Rect,
  entries: &[RecentSearch],
  state: &ListState,
  focused: bool,
) {
  let block = Block::default()
    .title(format!(" Recent Searches ({}) ", entries.len()))
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border_color(focused)));

  if entries.is_empty() {
    let paragraph = Paragraph::new("No recent searches")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let items: Vec<ListItem> = entries
    .iter()
    .map(|entry| {
      let line = Line::from(vec![
        Span::styled(
          format!("{:<24}", truncate(&entry.key, 24)),
          Style::default().fg(Color::Yellow),
        ),
        Span::raw(" "),
        Span::styled(
          format!("{:<20}", format_timestamp(entry.timestamp)),
          Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
        Span::raw(result_count_label(entry.results.len())),
      ]);
      ListItem::new(line)
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
  ensure_valid_selection(&mut state, entries.len());
  frame.render_stateful_widget(list, area, &mut state);
}
