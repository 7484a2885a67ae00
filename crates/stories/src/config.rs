//! Configuration for a stories session.
//!
//! Configuration lives in `~/.stories/config.toml`. Every field has a default, so a missing file
//! or a partial one is fine:
//!
//! ```toml
//! dataset_url = "https://dilutedstories.com/data/articles.json"
//! cache_dir = "/home/ana/.cache/stories"
//! form_endpoint = "https://formspree.io/f/mblzzlvj"
//! request_timeout_secs = 10
//! preferences_path = "/home/ana/.stories/preferences.toml"
//! ```

use std::time::Duration;

use super::*;
use crate::snapshot::FileSnapshot;

/// Dataset location used when none is configured.
pub const DEFAULT_DATASET_URL: &str = "https://dilutedstories.com/data/articles.json";
/// Relay the site's contact form posts to by default.
pub const DEFAULT_FORM_ENDPOINT: &str = "https://formspree.io/f/mblzzlvj";
/// Request timeout, in seconds, used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Where the article dataset document is fetched from
  pub dataset_url:          String,
  /// Directory holding the article snapshot
  pub cache_dir:            PathBuf,
  /// Contact form relay endpoint, `None` (written as `""`) when the form is switched off
  #[serde(with = "optional_endpoint")]
  pub form_endpoint:        Option<String>,
  /// Timeout for dataset and relay requests
  pub request_timeout_secs: u64,
  /// Where reading preferences are kept
  pub preferences_path:     PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      dataset_url:          DEFAULT_DATASET_URL.to_string(),
      cache_dir:            FileSnapshot::default_dir(),
      form_endpoint:        Some(DEFAULT_FORM_ENDPOINT.to_string()),
      request_timeout_secs: DEFAULT_TIMEOUT_SECS,
      preferences_path:     Self::default_dir().join("preferences.toml"),
    }
  }
}

impl Config {
  /// Directory holding configuration, `~/.stories`, or `./.stories` without a home directory.
  pub fn default_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".stories")
  }

  /// Path of the configuration file.
  ///
  /// # Errors
  ///
  /// [`StoriesError::Config`] when no home directory can be determined.
  pub fn default_path() -> Result<PathBuf> {
    dirs::home_dir()
      .map(|home| home.join(".stories").join("config.toml"))
      .ok_or_else(|| StoriesError::Config("Could not determine home directory".to_string()))
  }

  /// Reads configuration from a TOML file. A missing file yields the defaults.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
      Ok(content) => {
        let config: Self = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        config.validate()
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!("No configuration at {}; using defaults", path.display());
        Ok(Self::default())
      },
      Err(e) => Err(e.into()),
    }
  }

  /// Writes configuration to a TOML file, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Checks values that would otherwise only fail later.
  fn validate(self) -> Result<Self> {
    Url::parse(&self.dataset_url).map_err(|e| {
      StoriesError::Config(format!("Invalid dataset_url `{}`: {e}", self.dataset_url))
    })?;
    if self.request_timeout_secs == 0 {
      return Err(StoriesError::Config("request_timeout_secs must be at least 1".to_string()));
    }
    Ok(self)
  }

  /// Sets the dataset location.
  pub fn with_dataset_url(mut self, url: impl Into<String>) -> Self {
    self.dataset_url = url.into();
    self
  }

  /// Sets the snapshot directory.
  pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
    self.cache_dir = dir.as_ref().to_path_buf();
    self
  }

  /// Sets or clears the contact relay endpoint.
  pub fn with_form_endpoint(mut self, endpoint: Option<String>) -> Self {
    self.form_endpoint = endpoint;
    self
  }

  /// Sets the request timeout in seconds.
  pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
    self.request_timeout_secs = secs;
    self
  }

  /// Sets the preferences file.
  pub fn with_preferences_path(mut self, path: impl AsRef<Path>) -> Self {
    self.preferences_path = path.as_ref().to_path_buf();
    self
  }

  /// The request timeout.
  pub fn request_timeout(&self) -> Duration { Duration::from_secs(self.request_timeout_secs) }
}

/// Keeps a cleared relay endpoint distinguishable from a missing key.
///
/// A missing key takes the default relay; an empty string means no relay.
mod optional_endpoint {
  use serde::{Deserializer, Serializer};

  use super::*;

  /// Writes `None` as an empty string.
  pub fn serialize<S: Serializer>(
    endpoint: &Option<String>,
    serializer: S,
  ) -> core::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(endpoint.as_deref().unwrap_or_default())
  }

  /// Reads a blank string as `None`.
  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> core::result::Result<Option<String>, D::Error> {
    let endpoint = String::deserialize(deserializer)?;
    Ok(Some(endpoint.trim().to_string()).filter(|e| !e.is_empty()))
  }
}
