//! Colours for the browser, one palette per reading theme.

use ratatui::style::{Color, Modifier, Style};
use stories::controls::Theme;

/// Styles used across the interface.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
  /// Section titles and the article title
  pub title:     Style,
  /// Regular text
  pub normal:    Style,
  /// Bylines, help text, and other secondary text
  pub muted:     Style,
  /// The selected card
  pub highlight: Style,
  /// Keyboard shortcuts
  pub key:       Style,
  /// Panel borders
  pub border:    Style,
  /// Background of the whole screen
  pub base:      Style,
}

/// The palette for a theme.
pub fn palette(theme: Theme) -> Palette {
  match theme {
    Theme::Dark => Palette {
      title:     Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
      normal:    Style::new().fg(Color::Gray),
      muted:     Style::new().fg(Color::DarkGray),
      highlight: Style::new().bg(Color::DarkGray).fg(Color::LightCyan).add_modifier(Modifier::BOLD),
      key:       Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
      border:    Style::new().fg(Color::LightBlue),
      base:      Style::new().bg(Color::Black),
    },
    Theme::Light => Palette {
      title:     Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
      normal:    Style::new().fg(Color::Black),
      muted:     Style::new().fg(Color::DarkGray),
      highlight: Style::new().bg(Color::LightBlue).fg(Color::Black).add_modifier(Modifier::BOLD),
      key:       Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD),
      border:    Style::new().fg(Color::Blue),
      base:      Style::new().bg(Color::White),
    },
  }
}
