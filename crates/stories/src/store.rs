//! The article store: the single source of truth for the article collection.
//!
//! Loading follows a fixed fallback chain and never fails:
//!
//! 1. A non-empty collection already in memory is returned as is, with no I/O.
//! 2. Otherwise the dataset is fetched fresh from its [`ArticleSource`].
//! 3. A fetched collection has every image normalized, becomes the in-memory collection, and is
//!    persisted to the [`SnapshotCache`].
//! 4. If the fetch fails, the last persisted snapshot is used as is (it was normalized when it
//!    was written).
//! 5. If there is no usable snapshot either, the collection is empty.
//!
//! Concurrent callers share one attempt: whoever arrives while a load is in flight waits for it
//! and receives the very same `Arc<Collection>`.
//!
//! # Examples
//!
//! ```no_run
//! use stories::{snapshot::FileSnapshot, source::HttpSource, store::ArticleStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ArticleStore::new(
//!   HttpSource::new("https://dilutedstories.com/data/articles.json")?,
//!   FileSnapshot::new(FileSnapshot::default_dir()),
//! );
//!
//! assert!(store.get("quiet-rooms").is_none()); // nothing loaded yet, and no panic
//! let collection = store.load().await;
//! if let Some(article) = store.get("quiet-rooms") {
//!   println!("{} ({} of {})", article.title, 1, collection.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::{
  atomic::{AtomicU64, Ordering},
  RwLock,
};

use tokio::sync::Mutex;

use super::*;
use crate::{grid::GridTarget, snapshot::SnapshotCache, source::ArticleSource};

/// How the most recent load attempt produced the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
  /// The dataset was fetched and normalized.
  Fetched {
    /// Number of articles fetched
    count: usize,
  },
  /// The fetch failed and the persisted snapshot was used.
  Recovered {
    /// Number of articles in the snapshot
    count: usize,
  },
  /// Neither the fetch nor the snapshot produced anything.
  Empty,
}

impl LoadOutcome {
  /// Whether the data came from somewhere other than a fresh fetch.
  pub fn is_stale(&self) -> bool { !matches!(self, LoadOutcome::Fetched { .. }) }
}

/// Owns the article collection for a session.
pub struct ArticleStore<S, C> {
  /// Where fresh data comes from
  source:   S,
  /// Last-known-good snapshot slot
  snapshot: C,
  /// Current collection, swapped whole on every completed attempt
  current:  RwLock<Arc<Collection>>,
  /// Outcome of the most recent attempt
  outcome:  RwLock<Option<LoadOutcome>>,
  /// Held for the duration of an attempt
  gate:     Mutex<()>,
  /// Completed attempts, so waiters can tell an attempt finished while they queued
  attempts: AtomicU64,
}

impl<S: ArticleSource, C: SnapshotCache> ArticleStore<S, C> {
  /// Creates a store with an empty collection. Nothing is fetched until [`load`](Self::load).
  pub fn new(source: S, snapshot: C) -> Self {
    Self {
      source,
      snapshot,
      current: RwLock::new(Arc::new(Collection::new())),
      outcome: RwLock::new(None),
      gate: Mutex::new(()),
      attempts: AtomicU64::new(0),
    }
  }

  /// Ensures the collection is loaded and returns it.
  ///
  /// Never fails; see the [module documentation](self) for the fallback chain. Once a non-empty
  /// collection is in memory, later calls return it without any I/O. An empty result leaves the
  /// door open for a later call to try again.
  pub async fn load(&self) -> Arc<Collection> {
    if let Some(collection) = self.loaded() {
      return collection;
    }

    let seen = self.attempts.load(Ordering::Acquire);
    let _attempt = self.gate.lock().await;
    if self.attempts.load(Ordering::Acquire) != seen {
      trace!("Reusing the load attempt that finished while waiting");
      return self.collection();
    }
    if let Some(collection) = self.loaded() {
      return collection;
    }

    let (collection, outcome) = self.attempt().await;
    let collection = Arc::new(collection);
    *write_lock(&self.current) = Arc::clone(&collection);
    *write_lock(&self.outcome) = Some(outcome);
    self.attempts.fetch_add(1, Ordering::Release);
    info!("Article collection ready: {outcome:?}");
    collection
  }

  /// Runs the fallback chain once.
  async fn attempt(&self) -> (Collection, LoadOutcome) {
    match self.source.fetch().await {
      Ok(fetched) => {
        let collection = fetched.normalize_images();
        if let Err(e) = self.snapshot.write(&collection) {
          warn!("Failed to persist article snapshot: {e}");
        }
        let count = collection.len();
        (collection, LoadOutcome::Fetched { count })
      },
      Err(e) => {
        warn!("Failed to fetch articles from {}: {e}", self.source.describe());
        match self.snapshot.read() {
          Ok(Some(collection)) => {
            let count = collection.len();
            (collection, LoadOutcome::Recovered { count })
          },
          Ok(None) => {
            debug!("No article snapshot to fall back on");
            (Collection::new(), LoadOutcome::Empty)
          },
          Err(e) => {
            warn!("Ignoring unreadable article snapshot: {e}");
            (Collection::new(), LoadOutcome::Empty)
          },
        }
      },
    }
  }

  /// Looks up an article in the current collection.
  ///
  /// Safe before any load; returns `None` for unknown ids.
  pub fn get(&self, id: &str) -> Option<Article> { read_lock(&self.current).get(id).cloned() }

  /// The current collection, which is empty until a load completes.
  pub fn collection(&self) -> Arc<Collection> { Arc::clone(&read_lock(&self.current)) }

  /// How the most recent load produced its collection, `None` before the first load.
  pub fn last_outcome(&self) -> Option<LoadOutcome> { *read_lock(&self.outcome) }

  /// Clears `target` and appends one card per article, in collection order.
  pub fn render_grid<T: GridTarget + ?Sized>(&self, target: &mut T) {
    crate::grid::render(&self.collection(), target)
  }

  /// The snapshot slot backing this store.
  pub fn snapshot(&self) -> &C { &self.snapshot }

  /// The current collection when it is non-empty.
  fn loaded(&self) -> Option<Arc<Collection>> {
    let current = read_lock(&self.current);
    (!current.is_empty()).then(|| Arc::clone(&current))
  }
}

/// Read access that survives a poisoned lock; the guarded values are replaced whole.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
  lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write access that survives a poisoned lock.
fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
  lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
