//! Reading controls: colour theme and font scale.
//!
//! Both are small value types. The theme choice is remembered between sessions under the
//! [`THEME_KEY`] preference; the font scale is clamped so the layout never breaks.
//!
//! ```
//! use stories::controls::{FontScale, Theme};
//!
//! let theme = Theme::Light.toggle();
//! assert_eq!(theme, Theme::Dark);
//! assert_eq!(theme.aria_pressed(), "true");
//!
//! let scale = FontScale::default().bigger().bigger();
//! assert_eq!(scale.to_string(), "1.1");
//! ```

use std::{fmt, str::FromStr};

use super::*;

/// Preference key the theme is stored under.
pub const THEME_KEY: &str = "ds-theme";

/// Colour theme of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  /// Light background, the page default
  #[default]
  Light,
  /// Dark background
  Dark,
}

impl Theme {
  /// The other theme.
  pub fn toggle(self) -> Self {
    match self {
      Theme::Light => Theme::Dark,
      Theme::Dark => Theme::Light,
    }
  }

  /// The theme toggle button is pressed while the dark theme is on.
  pub fn aria_pressed(self) -> &'static str {
    match self {
      Theme::Dark => "true",
      Theme::Light => "false",
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Theme::Light => write!(f, "light"),
      Theme::Dark => write!(f, "dark"),
    }
  }
}

impl FromStr for Theme {
  type Err = StoriesError;

  fn from_str(s: &str) -> Result<Self> {
    match &s.trim().to_lowercase() as &str {
      "light" => Ok(Theme::Light),
      "dark" => Ok(Theme::Dark),
      s => Err(StoriesError::Config(format!("Unknown theme `{s}`, expected `light` or `dark`"))),
    }
  }
}

/// Text size multiplier, kept within [`FontScale::MIN`]..=[`FontScale::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct FontScale(f32);

impl FontScale {
  /// Smallest allowed scale.
  pub const MIN: f32 = 0.9;
  /// Largest allowed scale.
  pub const MAX: f32 = 1.4;
  /// Increment used by the bigger/smaller buttons.
  pub const STEP: f32 = 0.05;
  /// Scale the page starts at.
  pub const DEFAULT: f32 = 1.0;

  /// A scale clamped into range. Non-finite values fall back to the default.
  pub fn new(value: f32) -> Self {
    if !value.is_finite() {
      return Self(Self::DEFAULT);
    }
    // Round to the step grid's precision so repeated steps don't drift.
    let rounded = (value * 100.0).round() / 100.0;
    Self(rounded.clamp(Self::MIN, Self::MAX))
  }

  /// Parses a stored value, falling back to the default when it is missing or malformed.
  pub fn parse_or_default(value: Option<&str>) -> Self {
    value.and_then(|v| v.trim().parse::<f32>().ok()).map(Self::new).unwrap_or_default()
  }

  /// The scale moved by `delta`, clamped.
  pub fn adjust(self, delta: f32) -> Self { Self::new(self.0 + delta) }

  /// One step bigger.
  pub fn bigger(self) -> Self { self.adjust(Self::STEP) }

  /// One step smaller.
  pub fn smaller(self) -> Self { self.adjust(-Self::STEP) }

  /// The multiplier.
  pub fn value(self) -> f32 { self.0 }
}

impl Default for FontScale {
  fn default() -> Self { Self(Self::DEFAULT) }
}

impl From<f32> for FontScale {
  fn from(value: f32) -> Self { Self::new(value) }
}

impl From<FontScale> for f32 {
  fn from(scale: FontScale) -> Self { scale.0 }
}

impl fmt::Display for FontScale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Reading preferences remembered between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
  /// Saved theme, `None` until the reader picks one
  #[serde(rename = "ds-theme", default, skip_serializing_if = "Option::is_none")]
  pub theme:      Option<Theme>,
  /// Page-wide font scale
  #[serde(default)]
  pub font_scale: FontScale,
}

impl Preferences {
  /// Reads preferences from a TOML file; a missing file yields the defaults.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    match std::fs::read_to_string(path.as_ref()) {
      Ok(content) => Ok(toml::from_str(&content)?),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
      Err(e) => Err(e.into()),
    }
  }

  /// Writes preferences to a TOML file, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string(self)?)?;
    debug!("Saved preferences to {}", path.display());
    Ok(())
  }

  /// The theme in effect.
  pub fn theme(&self) -> Theme { self.theme.unwrap_or_default() }

  /// Switches and remembers the theme, returning the new one.
  pub fn toggle_theme(&mut self) -> Theme {
    let next = self.theme().toggle();
    self.theme = Some(next);
    next
  }
}
