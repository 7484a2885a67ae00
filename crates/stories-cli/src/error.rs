//! Error types for the stories CLI.

use stories::contact::Submission;
use thiserror::Error;

/// Error type alias used for the stories CLI.
pub type Result<T> = core::result::Result<T, StoriesCliError>;

/// Errors the CLI can exit with.
#[derive(Error, Debug)]
pub enum StoriesCliError {
  /// An error from the stories library.
  #[error(transparent)]
  Stories(#[from] stories::error::StoriesError),

  /// A terminal or file operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An interactive prompt failed.
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),

  /// Output could not be written as JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The contact relay did not take the message.
  #[error("Message not sent ({0}): {msg}", msg = .0.status_message())]
  NotSent(Submission),
}
