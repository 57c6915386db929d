mod cmd;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pokecat_lib::config::Config;

use crate::output::{OutputFormat, print_error};

/// pokecat - Browse the creature catalog and keep local favorites
#[derive(Parser)]
#[command(name = "pokecat")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Upstream API root (overrides POKECAT_BASE_URL)
  #[arg(long, global = true)]
  base_url: Option<String>,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List identifiers known to the upstream catalog
  List {
    /// Maximum number of identifiers
    #[arg(short, long)]
    limit: Option<u32>,
  },

  /// Render the detail page for an item
  Show {
    /// Item name (case-insensitive)
    name: String,
  },

  /// Pre-render every page known at generation time
  Generate {
    /// Maximum number of pages
    #[arg(short, long)]
    limit: Option<u32>,
  },

  /// Toggle an item id in the favorites
  Favorite {
    /// Numeric item id
    id: u32,
  },

  /// List favorite item ids
  Favorites {
    /// Remove every favorite
    #[arg(long)]
    clear: bool,
  },

  /// Show the effective configuration
  Info,
}

fn main() {
  if let Err(e) = run() {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let mut config = Config::from_env().context("Failed to load configuration")?;
  if let Some(base_url) = cli.base_url {
    config = config.with_base_url(base_url);
  }
  debug!(base_url = %config.base_url, data_dir = %config.data_dir.display(), "loaded configuration");

  match cli.command {
    Commands::List { limit } => cmd::cmd_list(&with_limit(config, limit), cli.output),
    Commands::Show { name } => cmd::cmd_show(&config, &name, cli.output),
    Commands::Generate { limit } => cmd::cmd_generate(&with_limit(config, limit), cli.output),
    Commands::Favorite { id } => cmd::cmd_favorite(&config, id, cli.output),
    Commands::Favorites { clear } => cmd::cmd_favorites(&config, clear, cli.output),
    Commands::Info => cmd::cmd_info(&config, cli.output),
  }
}

fn with_limit(config: Config, limit: Option<u32>) -> Config {
  match limit {
    Some(limit) => config.with_limit(limit),
    None => config,
  }
}
