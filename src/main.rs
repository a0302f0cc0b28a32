use clap::Parser;
use color_eyre::Result;
use jkf::history::{KeyValueStore, MemoryStore, RecentSearches, SqliteStore};
use jkf::{app, config, finder, logging};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "jkf")]
#[command(about = "Find every occurrence of a key in a JSON document")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/jkf/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// JSON file to open on startup
  #[arg(short, long, conflicts_with = "url")]
  file: Option<PathBuf>,

  /// URL to fetch JSON from on startup
  #[arg(short, long)]
  url: Option<String>,

  /// Key to search for once the document is loaded
  #[arg(short, long)]
  key: Option<String>,

  /// Keep search history in memory only for this session
  #[arg(long)]
  no_history: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;
  let data_dir = config.data_dir()?;

  let _log_guard = logging::init(&data_dir)?;
  info!(data_dir = %data_dir.display(), "Starting jkf");

  let store: Arc<dyn KeyValueStore> = if args.no_history {
    Arc::new(MemoryStore::new())
  } else {
    match SqliteStore::open(Some(&data_dir)) {
      Ok(store) => Arc::new(store),
      Err(e) => {
        warn!(error = %e, "History database unavailable, keeping history in memory");
        Arc::new(MemoryStore::new())
      }
    }
  };
  let history = RecentSearches::load(store);

  let fetcher = finder::Fetcher::new(config.fetch_timeout())?;

  // Initialize and run the app
  let mut app = app::App::new(config, history, fetcher);
  app.startup(args.file.as_deref(), args.url, args.key);
  app.run().await?;

  info!("Exiting");
  Ok(())
}
