//! The article preview modal.
//!
//! [`PreviewModal`] renders one article into a fixed set of page regions and owns the modal's
//! transient state: which article is shown, the text scale, the element focused before opening,
//! and any speech it started. It knows nothing about URLs; the
//! [`navigation`](crate::navigation) controller decides when to open and close it.
//!
//! The page itself sits behind the [`Surface`] trait. A surface that lacks the modal regions makes
//! every modal operation a silent no-op.
//!
//! # Examples
//!
//! ```
//! use stories::{
//!   article::Article,
//!   modal::{ElementId, MemorySurface, PreviewModal, Region, Surface},
//!   speech::SpeechQueue,
//! };
//!
//! let surface = MemorySurface::page().with_focus(ElementId::new("card-quiet-rooms"));
//! let mut modal = PreviewModal::new(surface, SpeechQueue::default());
//!
//! let article = Article {
//!   id: "quiet-rooms".into(),
//!   title: "Quiet Rooms".into(),
//!   body: vec!["<p>One.</p>".into(), "<p>Two.</p>".into()],
//!   ..Default::default()
//! };
//! modal.open(&article);
//! assert_eq!(modal.surface().text(Region::Title), Some("Quiet Rooms"));
//! assert_eq!(modal.surface().markup(Region::Body), Some("<p>One.</p><p>Two.</p>"));
//!
//! modal.close();
//! assert_eq!(modal.surface().active_element(), Some(ElementId::new("card-quiet-rooms")));
//! ```

use std::collections::{HashMap, HashSet};

use super::*;
use crate::{
  controls::FontScale,
  image::normalize_image_url,
  speech::{Speech, Utterance},
};

/// Addressable display regions of the page the modal uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
  /// The modal root, including its backdrop
  Modal,
  /// The focusable dialog panel inside the modal
  Panel,
  /// Article title
  Title,
  /// Byline and read time
  Meta,
  /// Hero image
  HeroImage,
  /// Article body
  Body,
}

impl Region {
  /// The stable element id the page gives this region.
  pub fn element_id(self) -> &'static str {
    match self {
      Region::Modal => "articleModal",
      Region::Panel => "articleModalPanel",
      Region::Title => "articleModalTitle",
      Region::Meta => "articleModalMeta",
      Region::HeroImage => "articleModalImage",
      Region::Body => "articleModalBody",
    }
  }

  /// Every region, root first.
  pub const ALL: [Region; 6] =
    [Region::Modal, Region::Panel, Region::Title, Region::Meta, Region::HeroImage, Region::Body];
}

/// Identifier of a focusable element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
  /// Wraps an element id.
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  /// The id of a region's element.
  pub fn region(region: Region) -> Self { Self::new(region.element_id()) }

  /// The raw id.
  pub fn as_str(&self) -> &str { &self.0 }
}

/// The page the modal renders into.
pub trait Surface {
  /// Whether the region exists on this page.
  fn has_region(&self, region: Region) -> bool;

  /// Replaces a region's text content.
  fn set_text(&mut self, region: Region, text: &str);

  /// Replaces a region's markup content.
  fn set_markup(&mut self, region: Region, markup: &str);

  /// Points an image region at a source with alt text.
  fn set_image(&mut self, region: Region, src: &str, alt: &str);

  /// Shows or hides a region.
  fn set_visible(&mut self, region: Region, visible: bool);

  /// Applies a text size multiplier to a region.
  fn set_text_scale(&mut self, region: Region, scale: f32);

  /// Locks or unlocks scrolling of the page behind the modal.
  fn set_scroll_locked(&mut self, locked: bool);

  /// The element that currently has focus.
  fn active_element(&self) -> Option<ElementId>;

  /// Moves focus to an element, returning `false` if it no longer exists or cannot take focus.
  fn focus(&mut self, element: &ElementId) -> bool;
}

/// Content and state of one region in a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionState {
  /// Text content
  pub text:       Option<String>,
  /// Markup content
  pub markup:     Option<String>,
  /// Image source
  pub src:        Option<String>,
  /// Image alt text
  pub alt:        Option<String>,
  /// Whether the region is shown
  pub visible:    bool,
  /// Text size multiplier
  pub text_scale: f32,
}

/// An in-memory page.
///
/// Regions must be declared to exist; operations on undeclared regions are ignored, like writes
/// to an element a page does not have. Every declared region is focusable, and any other
/// focusable element (cards, buttons) has to be declared with
/// [`with_focusable`](MemorySurface::with_focusable).
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
  /// Declared regions and their state
  regions:       HashMap<Region, RegionState>,
  /// Declared focusable elements outside the modal
  focusable:     HashSet<ElementId>,
  /// Currently focused element
  active:        Option<ElementId>,
  /// Whether background scrolling is locked
  scroll_locked: bool,
}

impl MemorySurface {
  /// A page with no regions at all.
  pub fn new() -> Self { Self::default() }

  /// A well-formed page with every modal region, the modal hidden.
  pub fn page() -> Self { Region::ALL.into_iter().fold(Self::new(), Self::with_region) }

  /// Declares a region.
  pub fn with_region(mut self, region: Region) -> Self {
    self.regions.insert(region, RegionState { text_scale: FontScale::DEFAULT, ..Default::default() });
    self
  }

  /// Declares a focusable element outside the modal.
  pub fn with_focusable(mut self, element: ElementId) -> Self {
    self.focusable.insert(element);
    self
  }

  /// Declares a focusable element and focuses it.
  pub fn with_focus(self, element: ElementId) -> Self {
    let mut surface = self.with_focusable(element.clone());
    surface.active = Some(element);
    surface
  }

  /// Removes a focusable element, as when the page re-renders without it.
  pub fn remove_focusable(&mut self, element: &ElementId) {
    self.focusable.remove(element);
    if self.active.as_ref() == Some(element) {
      self.active = None;
    }
  }

  /// State of a region, if declared.
  pub fn region(&self, region: Region) -> Option<&RegionState> { self.regions.get(&region) }

  /// Text of a region.
  pub fn text(&self, region: Region) -> Option<&str> { self.region(region)?.text.as_deref() }

  /// Markup of a region.
  pub fn markup(&self, region: Region) -> Option<&str> { self.region(region)?.markup.as_deref() }

  /// Whether a region is shown.
  pub fn is_visible(&self, region: Region) -> bool {
    self.region(region).is_some_and(|state| state.visible)
  }

  /// Whether background scrolling is locked.
  pub fn scroll_locked(&self) -> bool { self.scroll_locked }

  /// Applies `f` to a declared region.
  fn update(&mut self, region: Region, f: impl FnOnce(&mut RegionState)) {
    if let Some(state) = self.regions.get_mut(&region) {
      f(state);
    }
  }
}

impl Surface for MemorySurface {
  fn has_region(&self, region: Region) -> bool { self.regions.contains_key(&region) }

  fn set_text(&mut self, region: Region, text: &str) {
    self.update(region, |state| state.text = Some(text.to_string()))
  }

  fn set_markup(&mut self, region: Region, markup: &str) {
    self.update(region, |state| state.markup = Some(markup.to_string()))
  }

  fn set_image(&mut self, region: Region, src: &str, alt: &str) {
    self.update(region, |state| {
      state.src = Some(src.to_string());
      state.alt = Some(alt.to_string());
    })
  }

  fn set_visible(&mut self, region: Region, visible: bool) {
    self.update(region, |state| state.visible = visible)
  }

  fn set_text_scale(&mut self, region: Region, scale: f32) {
    self.update(region, |state| state.text_scale = scale)
  }

  fn set_scroll_locked(&mut self, locked: bool) { self.scroll_locked = locked; }

  fn active_element(&self) -> Option<ElementId> { self.active.clone() }

  fn focus(&mut self, element: &ElementId) -> bool {
    let is_region = Region::ALL
      .iter()
      .any(|region| region.element_id() == element.as_str() && self.has_region(*region));
    if is_region || self.focusable.contains(element) {
      self.active = Some(element.clone());
      true
    } else {
      false
    }
  }
}

/// The preview modal controller.
#[derive(Debug)]
pub struct PreviewModal<V, P> {
  /// Page being rendered into
  surface:       V,
  /// Speech backend for reading the article aloud
  speech:        P,
  /// Id of the article on display
  open:          Option<String>,
  /// Plain text of the article on display
  text:          String,
  /// Element to give focus back to on close
  restore_focus: Option<ElementId>,
  /// Per-article text scale
  text_scale:    FontScale,
}

impl<V: Surface, P: Speech> PreviewModal<V, P> {
  /// Creates a closed modal.
  pub fn new(surface: V, speech: P) -> Self {
    Self {
      surface,
      speech,
      open: None,
      text: String::new(),
      restore_focus: None,
      text_scale: FontScale::default(),
    }
  }

  /// Renders `article` and shows the modal.
  ///
  /// Opening over an already open modal swaps the content but keeps the original focus to
  /// restore. Does nothing on a page without the modal region.
  pub fn open(&mut self, article: &Article) {
    if !self.surface.has_region(Region::Modal) {
      debug!("Page has no modal region; not opening {}", article.id);
      return;
    }

    self.surface.set_text(Region::Title, &article.title);
    self.surface.set_text(Region::Meta, &article.meta);
    self.surface.set_image(Region::HeroImage, &normalize_image_url(&article.img_src), &article.img_alt);
    let body = article.body_markup();
    self.surface.set_markup(Region::Body, &body);

    self.text_scale = FontScale::default();
    self.surface.set_text_scale(Region::Body, self.text_scale.value());
    self.text = format!("{}\n\n{}", article.title, plain_text(&body));

    if self.open.is_none() {
      self.restore_focus = self.surface.active_element();
    }
    self.open = Some(article.id.clone());

    self.surface.set_visible(Region::Modal, true);
    self.surface.set_scroll_locked(true);
    if !self.surface.focus(&ElementId::region(Region::Panel)) {
      self.surface.focus(&ElementId::region(Region::Modal));
    }
    debug!("Opened preview for {}", article.id);
  }

  /// Hides the modal and returns the page to how it was before opening.
  ///
  /// Returns whether the modal was open.
  pub fn close(&mut self) -> bool {
    let Some(id) = self.open.take() else {
      return false;
    };

    self.surface.set_visible(Region::Modal, false);
    self.surface.set_scroll_locked(false);
    if self.speech.speaking() {
      self.speech.cancel();
    }
    if let Some(element) = self.restore_focus.take() {
      if !self.surface.focus(&element) {
        trace!("Element {} is gone; focus not restored", element.as_str());
      }
    }
    self.text.clear();
    debug!("Closed preview for {id}");
    true
  }

  /// Reads the article on display aloud from the beginning.
  ///
  /// # Errors
  ///
  /// [`StoriesError::SpeechUnsupported`] when the backend cannot speak.
  pub fn speak(&mut self) -> Result<()> {
    if !self.speech.supported() {
      return Err(StoriesError::SpeechUnsupported);
    }
    if self.open.is_some() {
      if self.speech.speaking() {
        self.speech.cancel();
      }
      self.speech.speak(Utterance::new(self.text.clone()));
    }
    Ok(())
  }

  /// Makes the article text one step bigger.
  pub fn bigger_text(&mut self) -> FontScale { self.scale_text(FontScale::bigger) }

  /// Makes the article text one step smaller.
  pub fn smaller_text(&mut self) -> FontScale { self.scale_text(FontScale::smaller) }

  /// Applies a scale change to the body region while open.
  fn scale_text(&mut self, step: fn(FontScale) -> FontScale) -> FontScale {
    if self.open.is_some() {
      self.text_scale = step(self.text_scale);
      self.surface.set_text_scale(Region::Body, self.text_scale.value());
    }
    self.text_scale
  }

  /// Whether the modal is showing an article.
  pub fn is_open(&self) -> bool { self.open.is_some() }

  /// Id of the article on display.
  pub fn open_article(&self) -> Option<&str> { self.open.as_deref() }

  /// Current per-article text scale.
  pub fn text_scale(&self) -> FontScale { self.text_scale }

  /// The page.
  pub fn surface(&self) -> &V { &self.surface }

  /// Mutable access to the page, for collaborators that move focus or re-render.
  pub fn surface_mut(&mut self) -> &mut V { &mut self.surface }

  /// The speech backend.
  pub fn speech(&self) -> &P { &self.speech }
}

lazy_static! {
  /// Block-level tags that end a line of text.
  static ref BLOCK_END: Regex =
    Regex::new(r"(?i)</(p|h[1-6]|li|blockquote|figure|figcaption|pre|div)>|<br\s*/?>").unwrap();
  /// Any remaining tag.
  static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
  /// Runs of spaces and tabs.
  static ref SPACES: Regex = Regex::new(r"[ \t]+").unwrap();
}

/// Reduces markup to readable text: block ends become line breaks, tags go, and the common
/// entities are decoded.
pub fn plain_text(markup: &str) -> String {
  let text = BLOCK_END.replace_all(markup, "\n");
  let text = TAG.replace_all(&text, "");
  let text = text
    .replace("&nbsp;", " ")
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&#39;", "'")
    .replace("&amp;", "&");
  let text = SPACES.replace_all(&text, " ");
  text.lines().map(str::trim).filter(|line| !line.is_empty()).collect::<Vec<_>>().join("\n")
}
