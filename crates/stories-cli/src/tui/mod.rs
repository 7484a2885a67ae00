//! Terminal User Interface for browsing articles.
//!
//! The browser shows the article cards and opens previews over them, driven by the same
//! navigator as the site, so history and focus behave the same way.
//!
//! # Navigation
//!
//! - Up/k, Down/j: move through the cards, or scroll an open article
//! - Enter: open the selected article
//! - Esc: close the preview
//! - b / f: history back and forward
//! - + / -: text size inside the preview
//! - s: read the preview aloud
//! - t: switch theme
//! - q: quit
//!
//! The TUI is enabled through the "tui" feature flag. When enabled, it becomes the default
//! interface when no command is specified.

use std::{
  io,
  sync::Arc,
  time::{Duration, Instant},
};

use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use stories::controls::Preferences;

use super::*;

mod state;
mod styles;
mod ui;

use state::Browser;

/// Runs the Terminal User Interface until the user quits.
///
/// The terminal is restored before returning, and changed reading preferences are saved.
pub async fn run(config: &Config) -> Result<()> {
  let preferences = Preferences::load(&config.preferences_path)?;
  let mut browser = Browser::new(commands::store(config)?, preferences, BLOG_PAGE).await?;

  enable_raw_mode()?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;
  let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

  let result = event_loop(&mut terminal, &mut browser).await;

  disable_raw_mode()?;
  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
  terminal.show_cursor()?;

  if browser.preferences != preferences {
    browser.preferences.save(&config.preferences_path)?;
  }
  result
}

/// Draws and reacts to input until the browser stops running.
async fn event_loop<S: ArticleSource, C: SnapshotCache>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  browser: &mut Browser<S, C>,
) -> Result<()> {
  let mut last_tick = Instant::now();
  while browser.running {
    if browser.needs_redraw {
      terminal.draw(|frame| ui::draw(frame, browser))?;
    }

    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => browser.handle_input(key.code).await,
        Event::Resize(..) => browser.needs_redraw = true,
        _ => {},
      }
    }

    if last_tick.elapsed() >= Duration::from_secs(1) {
      last_tick = Instant::now();
      browser.tick();
    }
  }
  Ok(())
}
