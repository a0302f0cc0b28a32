use crate::commands::Invocation;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::finder::{source, Document, DocumentError, Fetcher};
use crate::finder::{export, search_with, RecentSearch, SearchOptions, SearchResult};
use crate::history::{KeyValueStore, RecentSearches};
use crate::notice::Notifier;
use crate::query::Query;
use crate::ui;
use crate::ui::components::{CommandEvent, CommandInput, KeyInput, KeyPromptEvent, KeyResult};
use color_eyre::Result;
use crossterm::event::{
  DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// History backed by whichever store main picked
pub type History = RecentSearches<Arc<dyn KeyValueStore>>;

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Document,
  Results,
  History,
}

/// Main application state
pub struct App {
  config: Config,
  search_options: SearchOptions,
  download_dir: PathBuf,

  /// Raw document text as loaded or pasted; parsed on every search
  document_text: String,
  /// Where the current document came from
  document_origin: Option<String>,
  /// First visible line of the document pane
  document_scroll: u16,

  results: Vec<SearchResult>,
  results_state: ListState,

  history: History,
  history_state: ListState,
  show_history: bool,

  fetcher: Fetcher,
  /// In-flight URL fetch, if any
  fetch: Option<Query<Document>>,
  /// Run a search as soon as the pending fetch lands
  search_after_fetch: bool,

  command: CommandInput,
  key_prompt: KeyInput,
  focus: Focus,
  notifier: Notifier,

  should_quit: bool,
}

impl App {
  pub fn new(config: Config, history: History, fetcher: Fetcher) -> Self {
    let search_options = config.search_options();
    let download_dir = config.download_dir();
    let notifier = Notifier::new(config.notifications.ttl_ticks);

    Self {
      config,
      search_options,
      download_dir,
      document_text: String::new(),
      document_origin: None,
      document_scroll: 0,
      results: Vec::new(),
      results_state: ListState::default(),
      history,
      history_state: ListState::default(),
      show_history: false,
      fetcher,
      fetch: None,
      search_after_fetch: false,
      command: CommandInput::new(),
      key_prompt: KeyInput::new(),
      focus: Focus::Document,
      notifier,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(250));

    let outcome = self.event_loop(&mut terminal, &mut events).await;

    // Cleanup terminal
    stdout().execute(DisableBracketedPaste)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    outcome
  }

  async fn event_loop<B: Backend>(
    &mut self,
    terminal: &mut Terminal<B>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }
    Ok(())
  }

  pub fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Paste(text) => self.handle_paste(text),
      Event::Tick => self.tick(),
    }
  }

  fn tick(&mut self) {
    self.notifier.tick();
    self.poll_fetch();
  }

  // ===========================================================================
  // Input handling
  // ===========================================================================

  pub fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // Overlays get the key first; they also handle their activation keys
    if !self.key_prompt.is_active() {
      match self.command.handle_key(key) {
        KeyResult::Event(CommandEvent::Submitted(invocation)) => {
          self.execute_command(invocation);
          return;
        }
        KeyResult::Event(CommandEvent::Cancelled) | KeyResult::Handled => return,
        KeyResult::NotHandled => {}
      }
    }
    if !self.command.is_active() {
      match self.key_prompt.handle_key(key) {
        KeyResult::Event(KeyPromptEvent::Submitted(target)) => {
          self.run_search(&target);
          return;
        }
        KeyResult::Event(KeyPromptEvent::Cancelled) | KeyResult::Handled => return,
        KeyResult::NotHandled => {}
      }
    }
    if self.command.is_active() || self.key_prompt.is_active() {
      return;
    }

    self.handle_normal_key(key);
  }

  fn handle_normal_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => {
        if self.show_history {
          self.toggle_history();
        } else if key.code == KeyCode::Char('q') {
          self.should_quit = true;
        }
      }
      KeyCode::Tab => self.cycle_focus(),
      KeyCode::Char('h') => self.toggle_history(),
      KeyCode::Char('c') => self.copy_results(),
      KeyCode::Char('d') => self.download_results(),
      KeyCode::Char('x') if self.focus == Focus::History => self.clear_history(),
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
      KeyCode::PageUp => self.scroll_document(-20),
      KeyCode::PageDown => self.scroll_document(20),
      KeyCode::Enter if self.focus == Focus::History => self.open_selected_recent(),
      _ => {}
    }
  }

  /// Pasted text goes to whichever prompt is open, otherwise it becomes the
  /// document text, exactly as typed; validity is checked when searching.
  pub fn handle_paste(&mut self, text: String) {
    if self.command.is_active() {
      self.command.paste(&text);
      return;
    }
    if self.key_prompt.is_active() {
      self.key_prompt.paste(&text);
      return;
    }

    if source::parse_text(&text).is_err() {
      self.notifier.info("Invalid JSON");
    }
    self.set_document_text(text, Some("pasted text".to_string()));
  }

  fn execute_command(&mut self, invocation: Invocation) {
    match invocation.name.as_str() {
      "open" => {
        if invocation.arg.is_empty() {
          self.notifier.error("Usage: open <path>");
        } else {
          self.open_file(Path::new(&invocation.arg));
        }
      }
      "fetch" => {
        if invocation.arg.is_empty() {
          self.notifier.error("Usage: fetch <url>");
        } else {
          self.start_fetch(invocation.arg);
        }
      }
      "paste" => self.paste_from_clipboard(),
      "history" => self.toggle_history(),
      "clear-history" => self.clear_history(),
      "copy" => self.copy_results(),
      "download" => self.download_results(),
      "quit" => self.should_quit = true,
      other => self.notifier.error(format!("Unknown command: {}", other)),
    }
  }

  // ===========================================================================
  // Documents
  // ===========================================================================

  fn set_document_text(&mut self, text: String, origin: Option<String>) {
    self.document_text = text;
    self.document_origin = origin;
    self.document_scroll = 0;
  }

  /// Load a document from a local file; a bad file leaves the current one in place.
  pub fn open_file(&mut self, path: &Path) {
    match source::read_file(path) {
      Ok(document) => {
        self.set_document_text(document.text, Some(document.origin));
        self.notifier.success("JSON file loaded successfully");
      }
      Err(DocumentError::Parse(e)) => {
        warn!(path = %path.display(), error = %e, "Rejected invalid JSON file");
        self.notifier.error("Invalid JSON file");
      }
      Err(e) => {
        warn!(path = %path.display(), error = %e, "Failed to load file");
        self.notifier.error(e.to_string());
      }
    }
  }

  fn paste_from_clipboard(&mut self) {
    let text = match export::read_clipboard() {
      Ok(text) => text,
      Err(e) => {
        self.notifier.error(e.to_string());
        return;
      }
    };
    match Document::from_text("clipboard", text) {
      Ok(document) => {
        self.set_document_text(document.text, Some(document.origin));
        self.notifier.success("JSON loaded from clipboard");
      }
      Err(_) => self.notifier.error("Invalid JSON"),
    }
  }

  /// Start fetching a remote document. Only one fetch runs at a time.
  pub fn start_fetch(&mut self, url: String) {
    if self.is_loading() {
      self.notifier.info("A fetch is already in progress");
      return;
    }
    info!(%url, "Starting fetch");

    let fetcher = self.fetcher.clone();
    let mut query = Query::new(move || {
      let fetcher = fetcher.clone();
      let url = url.clone();
      async move { fetcher.fetch(&url).await.map_err(|e| e.to_string()) }
    });
    query.fetch();
    self.fetch = Some(query);
  }

  fn poll_fetch(&mut self) {
    let Some(query) = &mut self.fetch else {
      return;
    };
    if !query.poll() {
      return;
    }
    let outcome = query.take_outcome();
    self.fetch = None;

    match outcome {
      Some(Ok(document)) => {
        self.set_document_text(document.text, Some(document.origin));
        self.notifier.success("JSON data fetched successfully");
        if std::mem::take(&mut self.search_after_fetch) {
          let target = self.key_prompt.value().to_string();
          self.run_search(&target);
        }
      }
      Some(Err(message)) => {
        warn!(error = %message, "Fetch failed");
        self.search_after_fetch = false;
        self.set_document_text(String::new(), None);
        self.notifier.error(message);
      }
      None => {}
    }
  }

  pub fn is_loading(&self) -> bool {
    self.fetch.as_ref().is_some_and(|q| q.is_loading())
  }

  // ===========================================================================
  // Search and history
  // ===========================================================================

  /// Parse the current document text and search it for `target`.
  ///
  /// Malformed text leaves the previous results untouched. A search with
  /// matches is recorded in the history.
  pub fn run_search(&mut self, target: &str) {
    self.key_prompt.set_value(target);

    let document = match source::parse_text(&self.document_text) {
      Ok(value) => value,
      Err(e) => {
        warn!(error = %e, "Search on invalid JSON");
        self.notifier.error("Invalid JSON format");
        return;
      }
    };

    self.results = search_with(&document, target, &self.search_options);
    self.results_state = ListState::default();
    if !self.results.is_empty() {
      self.results_state.select(Some(0));
    }

    if self.results.is_empty() {
      self.notifier.info("No matches found");
      return;
    }

    self.notifier.success(match_summary(self.results.len()));
    if let Err(e) = self.history.record(target, self.results.clone()) {
      warn!(error = %e, "Failed to save search history");
      self.notifier.error(format!("Failed to save search history: {}", e));
    }
    self.history_state.select(Some(0));
  }

  /// Show a past search again: its key and its stored results.
  pub fn load_recent(&mut self, entry: &RecentSearch) {
    self.key_prompt.set_value(&entry.key);
    self.results = entry.results.clone();
    self.results_state = ListState::default();
    if !self.results.is_empty() {
      self.results_state.select(Some(0));
    }
  }

  fn open_selected_recent(&mut self) {
    let selected = self
      .history_state
      .selected()
      .and_then(|i| self.history.entries().get(i))
      .cloned();
    if let Some(entry) = selected {
      self.load_recent(&entry);
      self.focus = Focus::Results;
    }
  }

  pub fn clear_history(&mut self) {
    match self.history.clear() {
      Ok(()) => self.notifier.info("Search history cleared"),
      Err(e) => {
        warn!(error = %e, "Failed to clear search history");
        self.notifier.error(format!("Failed to clear search history: {}", e));
      }
    }
    self.history_state = ListState::default();
  }

  fn toggle_history(&mut self) {
    self.show_history = !self.show_history;
    if self.show_history {
      self.focus = Focus::History;
      if self.history_state.selected().is_none() && !self.history.is_empty() {
        self.history_state.select(Some(0));
      }
    } else if self.focus == Focus::History {
      self.focus = Focus::Results;
    }
  }

  // ===========================================================================
  // Output actions
  // ===========================================================================

  fn copy_results(&mut self) {
    if self.results.is_empty() {
      self.notifier.info("No results");
      return;
    }
    match export::copy_to_clipboard(&self.results) {
      Ok(()) => self.notifier.success("Copied to clipboard"),
      Err(e) => self.notifier.error(e.to_string()),
    }
  }

  fn download_results(&mut self) {
    if self.results.is_empty() {
      self.notifier.info("No results");
      return;
    }
    match export::download(&self.results, &self.download_dir) {
      Ok(path) => self
        .notifier
        .success(format!("Results downloaded to {}", path.display())),
      Err(e) => self.notifier.error(e.to_string()),
    }
  }

  // ===========================================================================
  // Navigation
  // ===========================================================================

  fn cycle_focus(&mut self) {
    self.focus = match self.focus {
      Focus::Document => Focus::Results,
      Focus::Results if self.show_history => Focus::History,
      Focus::Results | Focus::History => Focus::Document,
    };
  }

  fn move_selection(&mut self, delta: i32) {
    match self.focus {
      Focus::Document => self.scroll_document(delta),
      Focus::Results => step(&mut self.results_state, self.results.len(), delta),
      Focus::History => step(&mut self.history_state, self.history.len(), delta),
    }
  }

  fn scroll_document(&mut self, delta: i32) {
    // Paragraph scroll offsets are u16
    let last_line = self.document_text.lines().count().saturating_sub(1);
    let max = last_line.min(usize::from(u16::MAX)) as i32;
    let next = (i32::from(self.document_scroll) + delta).clamp(0, max);
    self.document_scroll = next as u16;
  }

  /// Prepare startup state from command-line arguments.
  pub fn startup(&mut self, file: Option<&Path>, url: Option<String>, key: Option<String>) {
    if let Some(key) = &key {
      self.key_prompt.set_value(key);
    }
    if let Some(path) = file {
      self.open_file(path);
      if let Some(key) = key {
        if !self.document_text.is_empty() {
          self.run_search(&key);
        }
      }
    } else if let Some(url) = url {
      self.search_after_fetch = key.is_some();
      self.start_fetch(url);
    }
  }

  // Accessors for UI rendering

  pub fn title(&self) -> &str {
    self.config.title.as_deref().unwrap_or("JSON Key Finder")
  }

  pub fn document_text(&self) -> &str {
    &self.document_text
  }

  pub fn document_origin(&self) -> Option<&str> {
    self.document_origin.as_deref()
  }

  pub fn document_scroll(&self) -> u16 {
    self.document_scroll
  }

  pub fn results(&self) -> &[SearchResult] {
    &self.results
  }

  pub fn results_state(&self) -> &ListState {
    &self.results_state
  }

  pub fn recent_searches(&self) -> &[RecentSearch] {
    self.history.entries()
  }

  pub fn history_state(&self) -> &ListState {
    &self.history_state
  }

  pub fn show_history(&self) -> bool {
    self.show_history
  }

  pub fn search_key(&self) -> &str {
    self.key_prompt.value()
  }

  pub fn focus(&self) -> Focus {
    self.focus
  }

  pub fn notifier(&self) -> &Notifier {
    &self.notifier
  }

  pub fn command_input(&self) -> &CommandInput {
    &self.command
  }

  pub fn key_input(&self) -> &KeyInput {
    &self.key_prompt
  }

  pub fn should_quit(&self) -> bool {
    self.should_quit
  }
}

/// Move a list selection by `delta`, wrapping around
fn step(state: &mut ListState, len: usize, delta: i32) {
  if len == 0 {
    state.select(None);
    return;
  }
  let current = state.selected().unwrap_or(0).min(len - 1) as i32;
  let next = (current + delta).rem_euclid(len as i32) as usize;
  state.select(Some(next));
}

/// "Found 1 match" / "Found 3 matches"
pub fn match_summary(count: usize) -> String {
  format!("Found {} match{}", count, if count == 1 { "" } else { "es" })
}
