//! Hero image URL normalization.
//!
//! Articles are authored with whatever image link was at hand, which is often the image
//! service's photo *page* (`https://unsplash.com/photos/reading-room-Ab3dE5gH7jK`) rather than an
//! image. Pages cannot be embedded, so every reference is canonicalized into the service's direct
//! image form before rendering:
//!
//! ```
//! use stories::image::normalize_image_url;
//!
//! assert_eq!(
//!   normalize_image_url("https://unsplash.com/photos/reading-room-Ab3dE5gH7jK"),
//!   "https://source.unsplash.com/Ab3dE5gH7jK/1600x900"
//! );
//! assert_eq!(
//!   normalize_image_url("https://images.example.com/a.jpg"),
//!   "https://images.example.com/a.jpg"
//! );
//! ```

use super::*;

/// Host serving directly embeddable images.
pub const IMAGE_SERVICE_HOST: &str = "source.unsplash.com";
/// Default rendered width in pixels.
pub const DEFAULT_WIDTH: u32 = 1600;
/// Default rendered height in pixels.
pub const DEFAULT_HEIGHT: u32 = 900;

lazy_static! {
  /// A photo slug is either the bare id or `words-joined-by-dashes-<id>`.
  static ref PHOTO_SLUG: Regex = Regex::new(r"^(?:.*-)?([A-Za-z0-9_-]{11})$").unwrap();
}

/// Maps an image reference to a directly embeddable URL.
///
/// Photo-page URLs of the image service become
/// `https://source.unsplash.com/<id>/1600x900`; everything else, including the empty string and
/// URLs that are already direct, is returned unchanged. The function is idempotent.
pub fn normalize_image_url(url: &str) -> Cow<'_, str> {
  if url.is_empty() {
    return Cow::Borrowed(url);
  }

  match extract_photo_id(url) {
    Some(id) => Cow::Owned(direct_image_url(&id, DEFAULT_WIDTH, DEFAULT_HEIGHT)),
    None => Cow::Borrowed(url),
  }
}

/// [`normalize_image_url`] over an optional reference; `None` stays `None`.
pub fn normalize_optional(url: Option<&str>) -> Option<Cow<'_, str>> { url.map(normalize_image_url) }

/// Builds the direct image URL for a photo id at the given size.
pub fn direct_image_url(id: &str, width: u32, height: u32) -> String {
  format!("https://{IMAGE_SERVICE_HOST}/{id}/{width}x{height}")
}

/// Extracts the photo id from a photo-page URL.
///
/// Accepts `unsplash.com` and `www.unsplash.com`, with or without a locale segment
/// (`/fr/photos/...`), and ignores trailing path segments, queries and fragments.
fn extract_photo_id(url: &str) -> Option<String> {
  let url = Url::parse(url).ok()?;
  if !matches!(url.scheme(), "http" | "https") {
    return None;
  }
  if !matches!(url.host_str(), Some("unsplash.com" | "www.unsplash.com")) {
    return None;
  }

  let segments: Vec<&str> = url.path_segments()?.collect();
  let photos = segments.iter().position(|segment| *segment == "photos")?;
  // `/photos/<slug>` or `/<locale>/photos/<slug>`
  if photos > 1 {
    return None;
  }
  let slug = segments.get(photos + 1)?;

  PHOTO_SLUG.captures(slug).and_then(|cap| cap.get(1)).map(|m| m.as_str().to_string())
}
