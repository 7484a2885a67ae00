//! Client core for the Diluted Stories site.
//!
//! `stories` owns everything the site does with its articles once a page is open:
//!
//! - Loading the article dataset, with a durable snapshot to fall back on
//! - Normalizing hero image references into directly embeddable URLs
//! - Projecting the collection into listing cards
//! - Opening and closing the article preview modal
//! - Keeping the URL fragment and the modal in step (deep links, back/forward, close)
//!
//! Alongside the core it carries the small reading and contact helpers the site pages use:
//! theme and font-scale preferences, text-to-speech, and the word-limited contact form that
//! posts to a third-party relay.
//!
//! # Getting Started
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use stories::{
//!   modal::{MemorySurface, PreviewModal},
//!   navigation::{MemoryHistory, NavEvent, Navigator},
//!   prelude::*,
//!   snapshot::FileSnapshot,
//!   source::HttpSource,
//!   speech::SpeechQueue,
//!   store::ArticleStore,
//!   Config,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::load(Config::default_path()?)?;
//!   let store = Arc::new(ArticleStore::new(
//!     HttpSource::from_config(&config)?,
//!     FileSnapshot::new(&config.cache_dir),
//!   ));
//!
//!   let modal = PreviewModal::new(MemorySurface::page(), SpeechQueue::default());
//!   let history = MemoryHistory::new("https://dilutedstories.com/blog.html#quiet-rooms")?;
//!   let mut navigator = Navigator::new(store, modal, history);
//!
//!   navigator.handle(NavEvent::PageLoad).await;
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`article`]: The article model and the ordered collection
//! - [`image`]: Image URL normalization
//! - [`source`]: Where the dataset comes from (HTTP or inline)
//! - [`snapshot`]: The durable last-known-good cache slot
//! - [`store`]: The article store and its load fallback chain
//! - [`grid`]: Listing card projection
//! - [`modal`]: The preview modal controller and the page surface it writes to
//! - [`navigation`]: URL fragment driven navigation
//! - [`controls`]: Theme and font-scale preferences
//! - [`speech`]: Text-to-speech playback
//! - [`contact`]: The contact form helpers and relay submission

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  borrow::Cow,
  path::{Path, PathBuf},
  sync::Arc,
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod article;
pub mod config;
pub mod contact;
pub mod controls;
pub mod error;
pub mod grid;
pub mod image;
pub mod modal;
pub mod navigation;
pub mod snapshot;
pub mod source;
pub mod speech;
pub mod store;

pub use crate::config::Config;
use crate::{article::*, error::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use stories::prelude::*;
///
/// fn lookup(collection: &stories::article::Collection) -> Result<(), StoriesError> {
///   let _ = collection.get("quiet-rooms");
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    error::StoriesError,
    grid::GridTarget,
    modal::Surface,
    navigation::History,
    snapshot::SnapshotCache,
    source::ArticleSource,
    speech::Speech,
  };
}
