//! The article model and the ordered article collection.
//!
//! The dataset document is a JSON object keyed by article id:
//!
//! ```json
//! {
//!   "quiet-rooms": {
//!     "title": "Quiet Rooms",
//!     "meta": "By Ana Lima · 6 min read",
//!     "imgAlt": "An empty reading room at dusk",
//!     "imgSrc": "https://unsplash.com/photos/reading-room-Ab3dE5gH7jK",
//!     "excerpt": "On the rooms we keep for ourselves.",
//!     "body": ["<p>First paragraph.</p>", "<p>Second paragraph.</p>"]
//!   }
//! }
//! ```
//!
//! [`Collection`] keeps the articles in document order, which is the order listings render in,
//! and indexes them by id for lookups.

use std::{collections::HashMap, fmt};

use serde::{
  de::{MapAccess, Visitor},
  ser::SerializeMap,
  Deserializer, Serializer,
};

use super::*;
use crate::image::normalize_image_url;

/// A single piece of site content.
///
/// The `id` is not part of the article object in the dataset; it is the key the object is stored
/// under, and it doubles as the URL fragment that deep-links to the article.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
  /// Unique identifier, also the URL fragment value
  #[serde(skip)]
  pub id:      String,
  /// Display title
  pub title:   String,
  /// Byline and read time
  pub meta:    String,
  /// Accessibility text for the hero image
  pub img_alt: String,
  /// Hero image reference
  pub img_src: String,
  /// Short summary used on listing cards
  #[serde(default)]
  pub excerpt: String,
  /// Rendering-ready markup fragments, in display order
  #[serde(default)]
  pub body:    Vec<String>,
}

impl Article {
  /// Returns the body fragments joined in order, ready to drop into the body region.
  pub fn body_markup(&self) -> String { self.body.concat() }

  /// Returns the fragment that deep-links to this article.
  pub fn href(&self) -> String { format!("#{}", self.id) }
}

/// The full mapping of article id to [`Article`], in source order.
///
/// A collection is built once per load and shared read-only afterwards, so it has no mutating
/// API beyond construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
  /// Articles in document order
  articles: Vec<Article>,
  /// Position of each id in `articles`
  index:    HashMap<String, usize>,
}

impl Collection {
  /// Creates an empty collection.
  pub fn new() -> Self { Self::default() }

  /// Builds a collection from articles in order.
  ///
  /// When two articles share an id, the first one's position is kept and the last one's content
  /// wins, which is how the dataset object behaves when a key is repeated.
  pub fn from_articles(articles: impl IntoIterator<Item = Article>) -> Self {
    let mut collection = Self::new();
    for article in articles {
      collection.insert(article);
    }
    collection
  }

  /// Inserts or replaces an article by id.
  fn insert(&mut self, article: Article) {
    match self.index.get(&article.id) {
      Some(&position) => self.articles[position] = article,
      None => {
        self.index.insert(article.id.clone(), self.articles.len());
        self.articles.push(article);
      },
    }
  }

  /// Looks up an article by id.
  pub fn get(&self, id: &str) -> Option<&Article> {
    self.index.get(id).map(|&position| &self.articles[position])
  }

  /// Whether an article with this id exists.
  pub fn contains(&self, id: &str) -> bool { self.index.contains_key(id) }

  /// Number of articles.
  pub fn len(&self) -> usize { self.articles.len() }

  /// Whether the collection has no articles.
  pub fn is_empty(&self) -> bool { self.articles.is_empty() }

  /// Iterates the articles in source order.
  pub fn iter(&self) -> impl Iterator<Item = &Article> { self.articles.iter() }

  /// Iterates the ids in source order.
  pub fn ids(&self) -> impl Iterator<Item = &str> { self.articles.iter().map(|a| a.id.as_str()) }

  /// Returns the collection with every `img_src` passed through the image normalizer.
  pub fn normalize_images(mut self) -> Self {
    for article in &mut self.articles {
      if let Cow::Owned(normalized) = normalize_image_url(&article.img_src) {
        trace!("Normalized image for {}: {} -> {}", article.id, article.img_src, normalized);
        article.img_src = normalized;
      }
    }
    self
  }

  /// Parses a dataset document.
  ///
  /// # Errors
  ///
  /// Returns [`StoriesError::Json`] when the document is not JSON, when its top level is not an
  /// object, or when an entry is missing a required field.
  pub fn from_json(json: &str) -> Result<Self> { Ok(serde_json::from_str(json)?) }

  /// Serializes the collection back into the dataset document shape.
  pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }
}

impl<'a> IntoIterator for &'a Collection {
  type IntoIter = std::slice::Iter<'a, Article>;
  type Item = &'a Article;

  fn into_iter(self) -> Self::IntoIter { self.articles.iter() }
}

impl Serialize for Collection {
  fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.articles.len()))?;
    for article in &self.articles {
      map.serialize_entry(&article.id, article)?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for Collection {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
    /// Walks the top-level object in document order.
    struct CollectionVisitor;

    impl<'de> Visitor<'de> for CollectionVisitor {
      type Value = Collection;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping article ids to articles")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> core::result::Result<Collection, A::Error> {
        let mut collection = Collection::new();
        while let Some((id, mut article)) = access.next_entry::<String, Article>()? {
          article.id = id;
          collection.insert(article);
        }
        Ok(collection)
      }
    }

    deserializer.deserialize_map(CollectionVisitor)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const DATASET: &str = r#"{
    "zeta": {
      "title": "Zeta",
      "meta": "By Z",
      "imgAlt": "z",
      "imgSrc": "https://unsplash.com/photos/zeta-abcdefghijk",
      "body": ["<p>z1</p>", "<p>z2</p>"]
    },
    "alpha": {
      "title": "Alpha",
      "meta": "By A",
      "imgAlt": "a",
      "imgSrc": "https://images.example.com/a.jpg",
      "excerpt": "first letter",
      "body": []
    }
  }"#;

  #[traced_test]
  #[test]
  fn test_collection_keeps_document_order() {
    let collection = Collection::from_json(DATASET).unwrap();
    assert_eq!(collection.ids().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    assert_eq!(collection.get("alpha").unwrap().excerpt, "first letter");
    assert_eq!(collection.get("zeta").unwrap().excerpt, "");
    assert_eq!(collection.get("zeta").unwrap().body_markup(), "<p>z1</p><p>z2</p>");
    assert!(collection.get("missing").is_none());
  }

  #[traced_test]
  #[test]
  fn test_collection_rejects_non_object_document() {
    assert!(Collection::from_json(r#"["zeta", "alpha"]"#).is_err());
    assert!(Collection::from_json("42").is_err());
    assert!(Collection::from_json(r#"{"zeta": {"title": "only a title"}}"#).is_err());
  }

  #[traced_test]
  #[test]
  fn test_repeated_key_keeps_first_position() {
    let json = r#"{
      "a": {"title": "A1", "meta": "", "imgAlt": "", "imgSrc": "", "body": []},
      "b": {"title": "B", "meta": "", "imgAlt": "", "imgSrc": "", "body": []},
      "a": {"title": "A2", "meta": "", "imgAlt": "", "imgSrc": "", "body": []}
    }"#;
    let collection = Collection::from_json(json).unwrap();
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(collection.get("a").unwrap().title, "A2");
  }

  #[traced_test]
  #[test]
  fn test_snapshot_document_survives_serialization() {
    let collection = Collection::from_json(DATASET).unwrap().normalize_images();
    let restored = Collection::from_json(&collection.to_json().unwrap()).unwrap();
    assert_eq!(restored, collection);
    assert_eq!(restored.get("zeta").unwrap().img_src, "https://source.unsplash.com/abcdefghijk/1600x900");
  }
}
