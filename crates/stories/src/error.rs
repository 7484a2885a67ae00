//! Error types for the stories library.
//!
//! Most of the core is fail-soft: the article store absorbs every failure into its fallback
//! chain, and lookups or missing page regions are plain no-ops. The errors below surface from
//! the edges instead, where a caller can do something about them:
//! - Fetching the dataset from a [`source`](crate::source) directly
//! - Reading or writing configuration and preference files
//! - Validating a contact form attachment
//! - Toggling speech on a backend that cannot speak
//!
//! # Examples
//!
//! ```
//! use stories::{contact::Attachment, error::StoriesError};
//!
//! match Attachment::from_path("notes.txt") {
//!   Err(StoriesError::NotPdf(name)) => println!("{name} is not a PDF"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(_) => println!("Attached"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`stories`](crate) crate.
pub type Result<T> = core::result::Result<T, StoriesError>;

/// Errors that can occur when working with the stories library.
#[derive(Error, Debug)]
pub enum StoriesError {
  /// A network request failed.
  ///
  /// This covers connection failures, TLS errors, and request timeouts.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The server answered with a non-success status code.
  #[error("Unexpected response status: {0}")]
  Status(u16),

  /// A document could not be parsed or serialized as JSON.
  ///
  /// A dataset whose top level is not an object of articles lands here as well.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A configuration or preference file is not valid TOML for its type.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A configuration or preference value could not be written as TOML.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A page or endpoint URL could not be parsed.
  #[error(transparent)]
  Url(#[from] url::ParseError),

  /// An attachment was offered that is not a PDF document.
  ///
  /// The string parameter carries the offending file name.
  #[error("Please drop a PDF file. ({0} is not a PDF)")]
  NotPdf(String),

  /// The speech backend cannot synthesize speech.
  #[error("Text-to-speech is not supported on this system.")]
  SpeechUnsupported,

  /// Configuration is missing or inconsistent.
  #[error("{0}")]
  Config(String),
}
