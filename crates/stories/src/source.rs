//! Where the article dataset comes from.
//!
//! The store only needs "give me a collection or tell me it failed", so sources sit behind the
//! [`ArticleSource`] trait:
//!
//! - [`HttpSource`] fetches the dataset document from the origin, bypassing intermediate caches
//! - [`InlineSource`] serves a literal dataset compiled into or handed to the program
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use stories::{prelude::*, source::HttpSource};
//!
//! # async fn example() -> Result<(), StoriesError> {
//! let source = HttpSource::new("https://dilutedstories.com/data/articles.json")?
//!   .with_timeout(Duration::from_secs(5))?;
//! let collection = source.fetch().await?;
//! println!("{} articles", collection.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};

use super::*;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A provider of the article dataset.
#[async_trait]
pub trait ArticleSource: Send + Sync {
  /// Produces the raw (not yet normalized) collection.
  ///
  /// # Errors
  ///
  /// Any failure to reach or parse the dataset. The store treats every error alike and falls
  /// back to its snapshot.
  async fn fetch(&self) -> Result<Collection>;

  /// Short description for logs.
  fn describe(&self) -> String;
}

/// Fetches the dataset document over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
  /// Dataset document location
  url:    Url,
  /// Client carrying the timeout and no-cache headers
  client: reqwest::Client,
}

impl HttpSource {
  /// Creates a source for the given document URL with the default timeout.
  pub fn new(url: &str) -> Result<Self> {
    let url = Url::parse(url)?;
    Ok(Self { client: Self::client(DEFAULT_TIMEOUT)?, url })
  }

  /// Creates a source from the dataset URL and timeout in a [`Config`].
  pub fn from_config(config: &Config) -> Result<Self> {
    Self::new(&config.dataset_url)?.with_timeout(config.request_timeout())
  }

  /// Replaces the request timeout.
  pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
    self.client = Self::client(timeout)?;
    Ok(self)
  }

  /// The dataset document location.
  pub fn url(&self) -> &Url { &self.url }

  /// Builds a client that always asks the origin for fresh data.
  fn client(timeout: Duration) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    Ok(reqwest::Client::builder().default_headers(headers).timeout(timeout).build()?)
  }
}

#[async_trait]
impl ArticleSource for HttpSource {
  async fn fetch(&self) -> Result<Collection> {
    debug!("Fetching article dataset from {}", self.url);
    let response = self.client.get(self.url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
      trace!("Dataset response: {response:?}");
      return Err(StoriesError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    let collection: Collection = serde_json::from_slice(&bytes)?;
    debug!("Fetched {} articles from {}", collection.len(), self.url);
    Ok(collection)
  }

  fn describe(&self) -> String { self.url.to_string() }
}

/// Serves a literal, in-memory dataset.
#[derive(Debug, Clone, Default)]
pub struct InlineSource {
  /// The dataset handed out on every fetch
  collection: Collection,
}

impl InlineSource {
  /// Wraps an already built collection.
  pub fn new(collection: Collection) -> Self { Self { collection } }

  /// Parses a literal dataset document.
  pub fn from_json(json: &str) -> Result<Self> { Ok(Self::new(Collection::from_json(json)?)) }
}

#[async_trait]
impl ArticleSource for InlineSource {
  async fn fetch(&self) -> Result<Collection> { Ok(self.collection.clone()) }

  fn describe(&self) -> String { format!("inline dataset ({} articles)", self.collection.len()) }
}

#[async_trait]
impl<T: ArticleSource + ?Sized> ArticleSource for Arc<T> {
  async fn fetch(&self) -> Result<Collection> { (**self).fetch().await }

  fn describe(&self) -> String { (**self).describe() }
}
