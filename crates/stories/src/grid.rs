//! Listing card projection.
//!
//! A listing page shows one card per article. Each card links to the article's fragment, which is
//! what the [`navigation`](crate::navigation) controller turns into an open preview.

use super::*;

/// Everything a listing card displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
  /// Article id
  pub id:      String,
  /// In-page link carrying the article fragment
  pub href:    String,
  /// Article title
  pub title:   String,
  /// Hero image alt text
  pub img_alt: String,
  /// Normalized hero image source
  pub img_src: String,
  /// Short summary
  pub excerpt: String,
  /// Byline
  pub meta:    String,
}

impl From<&Article> for Card {
  fn from(article: &Article) -> Self {
    Self {
      id:      article.id.clone(),
      href:    article.href(),
      title:   article.title.clone(),
      img_alt: article.img_alt.clone(),
      img_src: crate::image::normalize_image_url(&article.img_src).into_owned(),
      excerpt: article.excerpt.clone(),
      meta:    article.meta.clone(),
    }
  }
}

/// A container cards can be rendered into.
pub trait GridTarget {
  /// Removes every card.
  fn clear(&mut self);

  /// Appends a card after the existing ones.
  fn append(&mut self, card: Card);
}

impl GridTarget for Vec<Card> {
  fn clear(&mut self) { Vec::clear(self) }

  fn append(&mut self, card: Card) { self.push(card) }
}

/// Clears `target` and appends one card per article in collection order.
pub fn render<T: GridTarget + ?Sized>(collection: &Collection, target: &mut T) {
  target.clear();
  for article in collection {
    target.append(Card::from(article));
  }
  trace!("Rendered {} cards", collection.len());
}
