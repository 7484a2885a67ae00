use std::sync::Arc;

use clap::{Args, ValueEnum};
use stories::{
  controls::{Preferences, Theme},
  snapshot::FileSnapshot,
  source::HttpSource,
  store::ArticleStore,
};

use super::*;

pub mod clean;
pub mod contact;
pub mod list;
pub mod open;
pub mod text;
pub mod theme;

pub use clean::clean;
pub use contact::{contact, ContactOptions};
pub use list::{list, ListOptions};
pub use open::{open, OpenOptions};
pub use text::{text, TextOptions};
pub use theme::{theme, ThemeOptions};

/// Page the CLI pretends to be on when opening articles by id.
pub const BLOG_PAGE: &str = "https://dilutedstories.com/blog.html";

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Launch the Terminal User Interface (default when no command specified)
  #[cfg(feature = "tui")]
  #[clap(hide = true)]
  Tui,

  /// List the article cards
  List(ListOptions),

  /// Open an article preview by id or deep link
  Open(OpenOptions),

  /// Remove the saved article snapshot after confirmation
  Clean,

  /// Show, switch, or set the remembered colour theme
  Theme(ThemeOptions),

  /// Change the remembered text size
  Text(TextOptions),

  /// Send a message through the contact form relay
  Contact(ContactOptions),
}

/// The article store every command reads from.
pub type Store = ArticleStore<HttpSource, FileSnapshot>;

/// Builds the store described by `config`.
pub fn store(config: &Config) -> Result<Arc<Store>> {
  Ok(Arc::new(ArticleStore::new(
    HttpSource::from_config(config)?,
    FileSnapshot::new(&config.cache_dir),
  )))
}
