//! URL fragment driven navigation between the listing and the preview modal.
//!
//! The fragment is the single source of truth for which article is open: empty means none,
//! anything else names the requested article. [`Navigator`] turns page events into store lookups
//! and modal calls:
//!
//! | Event | Effect |
//! |---|---|
//! | [`NavEvent::PageLoad`] | open the article named by the fragment, if it exists |
//! | [`NavEvent::Activate`] | open the linked article and push its fragment onto history |
//! | [`NavEvent::FragmentChanged`] | follow the fragment: open, or close when it is empty |
//! | [`NavEvent::Close`], [`NavEvent::Backdrop`], [`Key::Escape`] | close and drop the fragment without a new history entry |
//!
//! Unknown ids are ignored everywhere: a stale link leaves the page as it was.

use super::*;
use crate::{
  modal::{PreviewModal, Surface},
  snapshot::SnapshotCache,
  source::ArticleSource,
  speech::Speech,
  store::ArticleStore,
};

/// Session history as far as fragments are concerned.
pub trait History {
  /// The current fragment without the leading `#`, `None` when empty.
  fn fragment(&self) -> Option<String>;

  /// Adds a history entry for the same page with a new fragment.
  fn push_fragment(&mut self, fragment: &str);

  /// Rewrites the current entry's fragment in place; `None` removes it.
  fn replace_fragment(&mut self, fragment: Option<&str>);
}

/// An in-memory session history, with back and forward.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
  /// Visited locations, oldest first
  entries: Vec<Url>,
  /// Position of the current entry
  index:   usize,
}

impl MemoryHistory {
  /// Starts a session at `location`.
  pub fn new(location: &str) -> Result<Self> {
    Ok(Self { entries: vec![Url::parse(location)?], index: 0 })
  }

  /// The current location.
  pub fn location(&self) -> &Url { &self.entries[self.index] }

  /// Number of entries in the session.
  pub fn len(&self) -> usize { self.entries.len() }

  /// Whether the session has no entries. Never true; a session always has its first page.
  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Moves one entry back, returning whether there was one.
  pub fn back(&mut self) -> bool {
    if self.index == 0 {
      return false;
    }
    self.index -= 1;
    true
  }

  /// Moves one entry forward, returning whether there was one.
  pub fn forward(&mut self) -> bool {
    if self.index + 1 >= self.entries.len() {
      return false;
    }
    self.index += 1;
    true
  }

  /// Navigates to a new location, as when the address is edited by hand.
  pub fn navigate(&mut self, location: &str) -> Result<()> {
    let url = self.location().join(location)?;
    self.push(url);
    Ok(())
  }

  /// Pushes an entry, dropping anything forward of the current one.
  fn push(&mut self, url: Url) {
    self.entries.truncate(self.index + 1);
    self.entries.push(url);
    self.index += 1;
  }
}

impl History for MemoryHistory {
  fn fragment(&self) -> Option<String> {
    self.location().fragment().filter(|f| !f.is_empty()).map(str::to_string)
  }

  fn push_fragment(&mut self, fragment: &str) {
    let mut url = self.location().clone();
    url.set_fragment(Some(fragment));
    trace!("Pushing history entry {url}");
    self.push(url);
  }

  fn replace_fragment(&mut self, fragment: Option<&str>) {
    let index = self.index;
    self.entries[index].set_fragment(fragment);
    trace!("Replaced history entry with {}", self.entries[index]);
  }
}

/// Keys the navigator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  /// Dismisses the modal
  Escape,
  /// Anything else
  Other,
}

/// Page events that can move navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
  /// The page finished loading.
  PageLoad,
  /// An in-page link was activated; carries the link's `href`.
  Activate(String),
  /// The fragment changed outside the navigator (back/forward, address bar).
  FragmentChanged,
  /// The modal's dismiss control was activated.
  Close,
  /// The modal's backdrop was activated.
  Backdrop,
  /// A key was pressed.
  Key(Key),
}

/// What an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
  /// The modal now shows this article.
  Opened(String),
  /// The modal was closed.
  Closed,
  /// Nothing changed.
  Ignored,
}

/// Extracts the fragment an in-page link points at, without the `#`.
///
/// Accepts bare fragments (`#quiet-rooms`) and links with a path (`blog.html#quiet-rooms`).
/// Returns `None` for links without a fragment or with an empty one.
pub fn link_fragment(href: &str) -> Option<&str> {
  href.split_once('#').map(|(_, fragment)| fragment).filter(|fragment| !fragment.is_empty())
}

/// Wires navigation events to the store, the modal, and history.
pub struct Navigator<S, C, V, P, H> {
  /// Article data
  store:   Arc<ArticleStore<S, C>>,
  /// Preview modal
  modal:   PreviewModal<V, P>,
  /// Session history
  history: H,
}

impl<S, C, V, P, H> Navigator<S, C, V, P, H>
where
  S: ArticleSource,
  C: SnapshotCache,
  V: Surface,
  P: Speech,
  H: History,
{
  /// Wires a navigator. Nothing happens until the first event.
  pub fn new(store: Arc<ArticleStore<S, C>>, modal: PreviewModal<V, P>, history: H) -> Self {
    Self { store, modal, history }
  }

  /// Handles one page event.
  pub async fn handle(&mut self, event: NavEvent) -> Transition {
    trace!("Navigation event: {event:?}");
    match event {
      NavEvent::PageLoad => match self.history.fragment() {
        Some(id) => self.open(&id).await,
        None => Transition::Ignored,
      },
      NavEvent::Activate(href) => self.activate(&href).await,
      NavEvent::FragmentChanged => match self.history.fragment() {
        Some(id) => self.open(&id).await,
        None =>
          if self.modal.close() {
            Transition::Closed
          } else {
            Transition::Ignored
          },
      },
      NavEvent::Close | NavEvent::Backdrop => self.close(),
      NavEvent::Key(Key::Escape) if self.modal.is_open() => self.close(),
      NavEvent::Key(_) => Transition::Ignored,
    }
  }

  /// Opens the linked article and records it in history.
  ///
  /// The caller must not follow the link itself; this is the replacement for default navigation.
  async fn activate(&mut self, href: &str) -> Transition {
    let Some(id) = link_fragment(href) else {
      return Transition::Ignored;
    };
    let transition = self.open(id).await;
    if transition != Transition::Ignored && self.history.fragment().as_deref() != Some(id) {
      self.history.push_fragment(id);
    }
    transition
  }

  /// Loads the collection and opens `id` if it exists.
  async fn open(&mut self, id: &str) -> Transition {
    self.store.load().await;
    match self.store.get(id) {
      Some(article) => {
        self.modal.open(&article);
        if self.modal.is_open() {
          Transition::Opened(article.id)
        } else {
          Transition::Ignored
        }
      },
      None => {
        debug!("No article with id {id}; ignoring");
        Transition::Ignored
      },
    }
  }

  /// Closes the modal and removes the fragment without adding a history entry.
  fn close(&mut self) -> Transition {
    let closed = self.modal.close();
    if self.history.fragment().is_some() {
      self.history.replace_fragment(None);
    }
    if closed {
      Transition::Closed
    } else {
      Transition::Ignored
    }
  }

  /// The article store.
  pub fn store(&self) -> &Arc<ArticleStore<S, C>> { &self.store }

  /// The preview modal.
  pub fn modal(&self) -> &PreviewModal<V, P> { &self.modal }

  /// Mutable access to the preview modal, for its reading controls.
  pub fn modal_mut(&mut self) -> &mut PreviewModal<V, P> { &mut self.modal }

  /// Session history.
  pub fn history(&self) -> &H { &self.history }

  /// Mutable access to session history, to simulate back/forward or address edits.
  pub fn history_mut(&mut self) -> &mut H { &mut self.history }
}
