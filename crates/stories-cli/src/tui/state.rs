//! State of the article browser.
//!
//! The browser is a page with a card grid and the preview modal. Every key that moves between
//! them goes through the library's [`Navigator`], so deep links, history and focus restoration
//! behave the same as on the site. Each card is a focusable element of the page; when the modal
//! closes and focus returns to a card, the list selection follows it.

use crossterm::event::KeyCode;
use ratatui::widgets::ListState;
use stories::{
  contact::Countdown,
  controls::{Preferences, Theme},
  grid::Card,
  modal::{ElementId, MemorySurface, PreviewModal},
  navigation::{Key, MemoryHistory, NavEvent, Navigator, Transition},
  speech::SpeechQueue,
  store::ArticleStore,
};

use super::*;

/// Browser state over any store.
pub struct Browser<S, C> {
  /// Navigation over the page
  pub navigator:    Navigator<S, C, MemorySurface, SpeechQueue, MemoryHistory>,
  /// Cards in the grid
  pub cards:        Vec<Card>,
  /// Selected card
  pub selected:     ListState,
  /// Reading preferences, saved on exit when changed
  pub preferences:  Preferences,
  /// Session countdown shown in the footer
  pub countdown:    Countdown,
  /// Last status line
  pub status:       Option<String>,
  /// Scroll offset of the open article body
  pub scroll:       u16,
  /// Whether the screen needs drawing
  pub needs_redraw: bool,
  /// Whether the loop should keep going
  pub running:      bool,
}

impl<S: ArticleSource, C: SnapshotCache> Browser<S, C> {
  /// Loads the articles and lays out the grid.
  pub async fn new(
    store: Arc<ArticleStore<S, C>>,
    preferences: Preferences,
    location: &str,
  ) -> Result<Self> {
    let collection = store.load().await;
    let mut cards = Vec::with_capacity(collection.len());
    store.render_grid(&mut cards);

    let surface = cards
      .iter()
      .fold(MemorySurface::page(), |surface, card| surface.with_focusable(card_element(card)));
    let modal = PreviewModal::new(surface, SpeechQueue::default());
    let navigator = Navigator::new(store, modal, MemoryHistory::new(location)?);

    let mut selected = ListState::default();
    if !cards.is_empty() {
      selected.select(Some(0));
    }

    let mut browser = Self {
      navigator,
      cards,
      selected,
      preferences,
      countdown: Countdown::default(),
      status: None,
      scroll: 0,
      needs_redraw: true,
      running: true,
    };
    browser.focus_selected();
    if browser.navigator.store().last_outcome().is_some_and(|outcome| outcome.is_stale()) {
      browser.status = Some("Showing saved articles; the latest could not be fetched".into());
    }
    let opened = browser.navigator.handle(NavEvent::PageLoad).await;
    browser.report(opened);
    Ok(browser)
  }

  /// The card under the cursor.
  pub fn selected_card(&self) -> Option<&Card> {
    self.selected.selected().and_then(|i| self.cards.get(i))
  }

  /// Whether the preview is showing.
  pub fn modal_open(&self) -> bool { self.navigator.modal().is_open() }

  /// The theme in effect.
  pub fn theme(&self) -> Theme { self.preferences.theme() }

  /// Reacts to a key press.
  pub async fn handle_input(&mut self, key: KeyCode) {
    self.needs_redraw = true;
    match key {
      KeyCode::Char('q') => self.running = false,
      KeyCode::Char('t') => {
        let theme = self.preferences.toggle_theme();
        self.status = Some(format!("Theme: {theme}"));
      },
      KeyCode::Char('b') =>
        if self.navigator.history_mut().back() {
          self.follow_fragment().await;
        },
      KeyCode::Char('f') =>
        if self.navigator.history_mut().forward() {
          self.follow_fragment().await;
        },
      KeyCode::Esc => {
        let closed = self.navigator.handle(NavEvent::Key(Key::Escape)).await;
        self.report(closed);
      },
      _ if self.modal_open() => self.handle_modal_input(key),
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
      KeyCode::Enter =>
        if let Some(href) = self.selected_card().map(|card| card.href.clone()) {
          let opened = self.navigator.handle(NavEvent::Activate(href)).await;
          self.report(opened);
        },
      _ => self.needs_redraw = false,
    }
  }

  /// Keys while the preview is showing.
  fn handle_modal_input(&mut self, key: KeyCode) {
    let modal = self.navigator.modal_mut();
    match key {
      KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
      KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
      KeyCode::Char('+') | KeyCode::Char('=') => {
        let scale = modal.bigger_text();
        self.status = Some(format!("Text size: {scale}x"));
      },
      KeyCode::Char('-') => {
        let scale = modal.smaller_text();
        self.status = Some(format!("Text size: {scale}x"));
      },
      KeyCode::Char('s') => match modal.speak() {
        Ok(()) => self.status = Some("Reading aloud".into()),
        Err(e) => self.status = Some(e.to_string()),
      },
      _ => self.needs_redraw = false,
    }
  }

  /// Advances the session countdown by one second.
  pub fn tick(&mut self) {
    if !self.countdown.is_finished() {
      self.countdown.tick();
      self.needs_redraw = true;
    }
  }

  /// Lets the navigator follow the fragment after back or forward.
  async fn follow_fragment(&mut self) {
    let transition = self.navigator.handle(NavEvent::FragmentChanged).await;
    self.report(transition);
  }

  /// Updates the view after a navigation transition.
  fn report(&mut self, transition: Transition) {
    match transition {
      Transition::Opened(id) => {
        self.scroll = 0;
        let scale = self.preferences.font_scale;
        let modal = self.navigator.modal_mut();
        while modal.text_scale() < scale && modal.bigger_text() < scale {}
        while modal.text_scale() > scale && modal.smaller_text() > scale {}
        if let Some(i) = self.cards.iter().position(|card| card.id == id) {
          self.selected.select(Some(i));
        }
      },
      Transition::Closed => {
        let focused = self.navigator.modal().surface().active_element();
        if let Some(i) =
          focused.and_then(|element| self.cards.iter().position(|c| card_element(c) == element))
        {
          self.selected.select(Some(i));
        }
      },
      Transition::Ignored => {
        if let Some(id) = self.navigator.history().fragment() {
          if !self.modal_open() {
            self.status = Some(format!("No article with id {id}"));
          }
        }
      },
    }
  }

  /// Moves the cursor and focus by `delta` cards.
  fn move_selection(&mut self, delta: isize) {
    if self.cards.is_empty() {
      return;
    }
    let current = self.selected.selected().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(self.cards.len() - 1);
    self.selected.select(Some(next));
    self.focus_selected();
  }

  /// Gives page focus to the selected card.
  fn focus_selected(&mut self) {
    if let Some(element) = self.selected_card().map(card_element) {
      self.navigator.modal_mut().surface_mut().focus(&element);
    }
  }
}

/// The page element a card is.
fn card_element(card: &Card) -> ElementId { ElementId::new(format!("card-{}", card.id)) }

#[cfg(test)]
mod tests {
  use stories::{modal::Region, snapshot::MemorySnapshot, source::InlineSource};
  use tracing_test::traced_test;

  use super::*;

  const DATASET: &str = r#"{
    "quiet-rooms": {"title": "Quiet Rooms", "meta": "By Ana", "imgAlt": "", "imgSrc": "", "body": ["<p>One.</p>"]},
    "salt-roads": {"title": "Salt Roads", "meta": "By Teo", "imgAlt": "", "imgSrc": "", "body": ["<p>Two.</p>"]},
    "night-ferry": {"title": "Night Ferry", "meta": "By Lu", "imgAlt": "", "imgSrc": "", "body": ["<p>Three.</p>"]}
  }"#;

  async fn browser_at(location: &str) -> Browser<InlineSource, MemorySnapshot> {
    let store =
      Arc::new(ArticleStore::new(InlineSource::from_json(DATASET).unwrap(), MemorySnapshot::new()));
    Browser::new(store, Preferences::default(), location).await.unwrap()
  }

  #[traced_test]
  #[tokio::test]
  async fn test_open_and_close_keeps_selection() {
    let mut browser = browser_at(BLOG_PAGE).await;
    browser.handle_input(KeyCode::Char('j')).await;
    browser.handle_input(KeyCode::Char('j')).await;
    browser.handle_input(KeyCode::Enter).await;

    assert!(browser.modal_open());
    assert_eq!(browser.navigator.history().fragment().as_deref(), Some("night-ferry"));
    assert_eq!(browser.navigator.modal().surface().text(Region::Title), Some("Night Ferry"));

    // Moving keys scroll the article instead of the grid.
    browser.handle_input(KeyCode::Char('k')).await;
    browser.handle_input(KeyCode::Esc).await;
    assert!(!browser.modal_open());
    assert_eq!(browser.selected_card().unwrap().id, "night-ferry");
    assert_eq!(browser.navigator.history().fragment(), None);
  }

  #[traced_test]
  #[tokio::test]
  async fn test_deep_link_opens_on_start() {
    let browser = browser_at(&format!("{BLOG_PAGE}#salt-roads")).await;
    assert!(browser.modal_open());
    assert_eq!(browser.selected_card().unwrap().id, "salt-roads");

    let missing = browser_at(&format!("{BLOG_PAGE}#gone")).await;
    assert!(!missing.modal_open());
    assert_eq!(missing.status.as_deref(), Some("No article with id gone"));
  }

  #[traced_test]
  #[tokio::test]
  async fn test_back_and_forward() {
    let mut browser = browser_at(BLOG_PAGE).await;
    browser.handle_input(KeyCode::Enter).await;
    browser.handle_input(KeyCode::Char('b')).await;
    assert!(!browser.modal_open());

    browser.handle_input(KeyCode::Char('f')).await;
    assert!(browser.modal_open());
    assert_eq!(browser.navigator.modal().open_article(), Some("quiet-rooms"));
  }

  #[traced_test]
  #[tokio::test]
  async fn test_reading_controls() {
    let mut browser = browser_at(BLOG_PAGE).await;
    browser.handle_input(KeyCode::Char('+')).await;
    assert_eq!(browser.navigator.modal().text_scale().value(), 1.0);

    browser.handle_input(KeyCode::Enter).await;
    browser.handle_input(KeyCode::Char('+')).await;
    assert_eq!(browser.status.as_deref(), Some("Text size: 1.05x"));

    browser.handle_input(KeyCode::Char('s')).await;
    assert!(browser.navigator.modal().speech().current().is_some());

    browser.handle_input(KeyCode::Char('t')).await;
    assert_eq!(browser.theme(), Theme::Dark);

    browser.handle_input(KeyCode::Char('q')).await;
    assert!(!browser.running);
  }

  #[traced_test]
  #[tokio::test]
  async fn test_remembered_text_size_applies_on_open() {
    let store =
      Arc::new(ArticleStore::new(InlineSource::from_json(DATASET).unwrap(), MemorySnapshot::new()));
    let mut preferences = Preferences::default();
    preferences.font_scale = preferences.font_scale.bigger().bigger();
    let mut browser = Browser::new(store, preferences, BLOG_PAGE).await.unwrap();

    browser.handle_input(KeyCode::Enter).await;
    assert_eq!(browser.navigator.modal().text_scale().value(), 1.1);
  }

  #[test]
  fn test_countdown_ticks() {
    let mut countdown = Countdown::default();
    countdown.tick();
    assert_eq!(countdown.label(), "Session timer: 04:59");
  }
}
