//! The durable last-known-good snapshot of the article collection.
//!
//! There is exactly one slot, keyed by [`CACHE_KEY`]. The store writes it after every successful
//! fetch and reads it only when a fetch fails. Bumping the version in the key orphans snapshots
//! written in an older document shape.

use std::sync::Mutex;

use super::*;

/// Versioned name of the snapshot slot.
pub const CACHE_KEY: &str = "ds-articles-v1";

/// A single-slot store for a serialized [`Collection`].
pub trait SnapshotCache: Send + Sync {
  /// Reads the last persisted collection, `Ok(None)` when nothing was ever written.
  fn read(&self) -> Result<Option<Collection>>;

  /// Replaces the persisted collection.
  fn write(&self, collection: &Collection) -> Result<()>;

  /// Removes the persisted collection. Clearing an empty slot is not an error.
  fn clear(&self) -> Result<()>;
}

/// Snapshot slot kept as a JSON file, `<dir>/ds-articles-v1.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
  /// Location of the snapshot file
  path: PathBuf,
}

impl FileSnapshot {
  /// Creates a slot inside `dir`. The directory is created on first write.
  pub fn new(dir: impl AsRef<Path>) -> Self {
    Self { path: dir.as_ref().join(format!("{CACHE_KEY}.json")) }
  }

  /// Full path of the snapshot file.
  pub fn path(&self) -> &Path { &self.path }

  /// Default snapshot directory.
  ///
  /// - On Unix: `~/.cache/stories`
  /// - On macOS: `~/Library/Caches/stories`
  /// - On Windows: `%LOCALAPPDATA%\stories`
  /// - Fallback: `./stories` in the current directory
  pub fn default_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".")).join("stories")
  }
}

impl SnapshotCache for FileSnapshot {
  fn read(&self) -> Result<Option<Collection>> {
    match std::fs::read_to_string(&self.path) {
      Ok(content) => Ok(Some(Collection::from_json(&content)?)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn write(&self, collection: &Collection) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    debug!("Writing snapshot of {} articles to {}", collection.len(), self.path.display());
    std::fs::write(&self.path, collection.to_json()?)?;
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    match std::fs::remove_file(&self.path) {
      Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
      _ => Ok(()),
    }
  }
}

/// Snapshot slot held in memory as the serialized document.
///
/// Keeping the serialized form rather than the collection mirrors what a durable slot returns:
/// every read is a fresh deserialization.
#[derive(Debug, Default)]
pub struct MemorySnapshot {
  /// Serialized collection, if any
  slot: Mutex<Option<String>>,
}

impl MemorySnapshot {
  /// Creates an empty slot.
  pub fn new() -> Self { Self::default() }

  /// Creates a slot already holding a serialized document, as a prior session would leave it.
  pub fn with_document(document: impl Into<String>) -> Self {
    Self { slot: Mutex::new(Some(document.into())) }
  }

  /// The raw serialized document, if any.
  pub fn document(&self) -> Option<String> { self.lock().clone() }

  /// Locks the slot, recovering from a poisoned lock since the slot holds plain data.
  fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
    self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl SnapshotCache for MemorySnapshot {
  fn read(&self) -> Result<Option<Collection>> {
    self.lock().as_deref().map(Collection::from_json).transpose()
  }

  fn write(&self, collection: &Collection) -> Result<()> {
    *self.lock() = Some(collection.to_json()?);
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    *self.lock() = None;
    Ok(())
  }
}

impl<T: SnapshotCache + ?Sized> SnapshotCache for Arc<T> {
  fn read(&self) -> Result<Option<Collection>> { (**self).read() }

  fn write(&self, collection: &Collection) -> Result<()> { (**self).write(collection) }

  fn clear(&self) -> Result<()> { (**self).clear() }
}
