//! Command line front-end for the Diluted Stories article core.
//!
//! `stories` drives the same store, preview modal and navigation controller the site pages use,
//! from a terminal:
//! - Listing the article cards
//! - Opening an article by id or by deep link
//! - Dropping the saved article snapshot
//! - Switching the remembered theme and text size
//! - Sending the contact form to the configured relay
//!
//! # Usage
//!
//! ```bash
//! # Show every article card
//! stories list
//!
//! # Open an article preview from a deep link
//! stories open "https://dilutedstories.com/blog.html#quiet-rooms"
//!
//! # Remember the dark theme and a larger text size
//! stories theme dark
//! stories text bigger
//!
//! # Send a message, with a PDF attached
//! stories contact --name Ana --email ana@example.com --message "Hello" --attach essay.pdf
//!
//! # Forget the saved article snapshot
//! stories clean
//! ```
//!
//! Add `-v` flags for more logging (`-vvv` for debug output); `RUST_LOG` overrides them.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Parser, Subcommand};
use console::style;
use stories::{prelude::*, Config};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;
#[cfg(feature = "tui")] pub mod tui;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Browse, preview and contact Diluted Stories from a terminal")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. Defaults to `~/.stories/config.toml`.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Dataset document URL, overriding the configured one
  #[arg(long, global = true)]
  dataset: Option<String>,

  /// Directory for the article snapshot, overriding the configured one
  #[arg(long, global = true)]
  cache_dir: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Option<Commands>,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// Loads the configuration file and applies command line overrides.
  fn load_config(&self) -> Result<Config> {
    let path = match &self.config {
      Some(path) => path.clone(),
      None => Config::default_path()?,
    };
    debug!("Using configuration file {}", path.display());

    let mut config = Config::load(&path)?;
    if let Some(dataset) = &self.dataset {
      config = config.with_dataset_url(dataset.clone());
    }
    if let Some(cache_dir) = &self.cache_dir {
      config = config.with_cache_dir(cache_dir);
    }
    trace!("Effective configuration: {config:?}");
    Ok(config)
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Entry point for the stories CLI
///
/// A failed command is reported once on stderr and the process exits with status 1. Loading
/// articles never fails; an unreachable dataset falls back to the saved snapshot.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);
  let accept_defaults = cli.accept_defaults;

  if let Err(e) = run(cli).await {
    debug!("Command failed: {e:?}");
    Terminal::new(accept_defaults).reply(ResponseContent::Error(&e.to_string()))?;
    std::process::exit(1);
  }
  Ok(())
}

/// Runs the requested command, or the TUI when none is given and the feature is enabled.
async fn run(cli: Cli) -> Result<()> {
  let Some(command) = cli.command.clone() else {
    #[cfg(feature = "tui")]
    return tui::run(&cli.load_config()?).await;

    #[cfg(not(feature = "tui"))]
    {
      eprintln!(
        "{} Please specify a command. Use --help for usage information.",
        style(ERROR_PREFIX).red()
      );
      std::process::exit(1);
    }
  };

  let config = cli.load_config()?;
  let interaction = Terminal::new(cli.accept_defaults);

  match command {
    Commands::List(options) => list(&interaction, &config, options).await,
    Commands::Open(options) => open(&interaction, &config, options).await,
    Commands::Clean => clean(&interaction, &config),
    Commands::Theme(options) => theme(&interaction, &config, options),
    Commands::Text(options) => text(&interaction, &config, options),
    Commands::Contact(options) => contact(&interaction, &config, options).await,
    #[cfg(feature = "tui")]
    Commands::Tui => tui::run(&config).await,
  }
}
