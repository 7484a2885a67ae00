//! Contact form helpers and submission to the form relay.
//!
//! The site has no backend, so the contact form posts to a third-party relay that forwards the
//! message by email. This module covers everything around that post:
//!
//! - The comments field is limited to [`MAX_WORDS`] words, with a live counter label
//! - One PDF may be attached
//! - A gentle session countdown is shown while the form is open
//! - [`ContactRelay`] sends the form and reports the status line to show
//!
//! # Examples
//!
//! ```no_run
//! use stories::contact::{ContactForm, ContactRelay};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let relay = ContactRelay::new("https://formspree.io/f/mblzzlvj")?;
//! let form = ContactForm::new("Ana", "ana@example.com", "Loved the piece on quiet rooms.");
//! let submission = relay.submit(&form).await;
//! println!("{}", submission.status_message());
//! # Ok(())
//! # }
//! ```

use std::{fmt, time::Duration};

use reqwest::multipart;

use super::*;

/// Maximum number of words in the comments field.
pub const MAX_WORDS: usize = 500;
/// Subject line added to every submission so the inbox can filter on it.
pub const SUBJECT: &str = "Diluted Stories · Contact form";
/// Length of the session countdown.
pub const SESSION_LENGTH: Duration = Duration::from_secs(5 * 60);
/// Media type accepted for attachments.
pub const PDF_MIME: &str = "application/pdf";

lazy_static! {
  /// An endpoint must at least look like an HTTP(S) URL.
  static ref HTTP_ENDPOINT: Regex = Regex::new(r"^https?://").unwrap();
}

/// Counts the whitespace-separated words in `text`.
pub fn count_words(text: &str) -> usize { text.split_whitespace().count() }

/// The comments field after applying the word limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLimit<'a> {
  /// Field content, trimmed to the limit when it was over
  pub text:    Cow<'a, str>,
  /// Words counted before trimming
  pub words:   usize,
  /// The limit applied
  pub max:     usize,
  /// Whether the content had to be cut
  pub trimmed: bool,
}

impl WordLimit<'_> {
  /// Counter label, e.g. `"42 / 500 words"`.
  pub fn label(&self) -> String { format!("{} / {} words", self.words.min(self.max), self.max) }
}

/// Applies a word limit to `text`.
///
/// Text within the limit is returned untouched. Text over it is cut to the first `max` words,
/// joined by single spaces.
pub fn limit_words(text: &str, max: usize) -> WordLimit<'_> {
  let words = count_words(text);
  if words <= max {
    return WordLimit { text: Cow::Borrowed(text), words, max, trimmed: false };
  }
  let trimmed = text.split_whitespace().take(max).collect::<Vec<_>>().join(" ");
  WordLimit { text: Cow::Owned(trimmed), words, max, trimmed: true }
}

/// A PDF attached to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
  /// Where the file lives
  path:      PathBuf,
  /// File name shown to the reader and sent to the relay
  file_name: String,
}

impl Attachment {
  /// Accepts a file as an attachment if it is a PDF.
  ///
  /// # Errors
  ///
  /// [`StoriesError::NotPdf`] when the file type is anything but `application/pdf`.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let file_name =
      path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
    let is_pdf = mime_guess::from_path(path).iter().any(|mime| mime.essence_str() == PDF_MIME);
    if !is_pdf {
      return Err(StoriesError::NotPdf(file_name));
    }
    Ok(Self { path: path.to_path_buf(), file_name })
  }

  /// Status label, e.g. `"Attached: essay.pdf"`.
  pub fn label(&self) -> String { format!("Attached: {}", self.file_name) }

  /// Where the file lives.
  pub fn path(&self) -> &Path { &self.path }

  /// The file's name.
  pub fn file_name(&self) -> &str { &self.file_name }
}

/// The session countdown shown beside the form.
///
/// Purely informational: reaching zero does not block submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
  /// Whole seconds left
  remaining: u64,
}

impl Countdown {
  /// A countdown of the given length.
  pub fn new(length: Duration) -> Self { Self { remaining: length.as_secs() } }

  /// Label for the current time, e.g. `"Session timer: 04:59"`.
  pub fn label(&self) -> String {
    format!("Session timer: {:02}:{:02}", self.remaining / 60, self.remaining % 60)
  }

  /// Returns the current label and moves one second on, stopping at zero.
  pub fn tick(&mut self) -> String {
    let label = self.label();
    self.remaining = self.remaining.saturating_sub(1);
    label
  }

  /// Seconds left.
  pub fn remaining(&self) -> u64 { self.remaining }

  /// Whether time is up.
  pub fn is_finished(&self) -> bool { self.remaining == 0 }
}

impl Default for Countdown {
  fn default() -> Self { Self::new(SESSION_LENGTH) }
}

/// The contact form's fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
  /// Sender name
  pub name:       String,
  /// Reply address
  pub email:      String,
  /// Message, at most [`MAX_WORDS`] words once submitted
  pub comments:   String,
  /// Optional PDF
  pub attachment: Option<Attachment>,
}

impl ContactForm {
  /// A form without attachment. The comments are cut to the word limit.
  pub fn new(name: impl Into<String>, email: impl Into<String>, comments: &str) -> Self {
    Self {
      name:       name.into(),
      email:      email.into(),
      comments:   limit_words(comments, MAX_WORDS).text.into_owned(),
      attachment: None,
    }
  }

  /// Adds an attachment.
  pub fn with_attachment(mut self, attachment: Attachment) -> Self {
    self.attachment = Some(attachment);
    self
  }

  /// Builds the multipart payload, reading the attachment from disk.
  async fn payload(&self) -> Result<multipart::Form> {
    let mut form = multipart::Form::new()
      .text("name", self.name.clone())
      .text("email", self.email.clone())
      .text("comments", self.comments.clone())
      .text("_subject", SUBJECT);
    if let Some(attachment) = &self.attachment {
      let bytes = tokio::fs::read(attachment.path()).await?;
      let part = multipart::Part::bytes(bytes)
        .file_name(attachment.file_name().to_string())
        .mime_str(PDF_MIME)?;
      form = form.part("attachment", part);
    }
    Ok(form)
  }
}

/// Result of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
  /// The relay accepted the message.
  Sent,
  /// The relay answered with a non-success status.
  Rejected(u16),
  /// No usable relay endpoint is configured.
  EndpointMissing,
  /// The relay could not be reached, or the attachment could not be read.
  NetworkError,
}

impl Submission {
  /// Status line to show under the form; empty on success, where a thank-you replaces the form.
  pub fn status_message(&self) -> &'static str {
    match self {
      Submission::Sent => "",
      Submission::Rejected(_) => "Something went wrong. Please try again later.",
      Submission::EndpointMissing =>
        "Form endpoint not configured. Please set form_endpoint in config.toml.",
      Submission::NetworkError => "Network error. Please try again.",
    }
  }

  /// Whether the form should give way to the thank-you message.
  pub fn is_sent(&self) -> bool { matches!(self, Submission::Sent) }
}

impl fmt::Display for Submission {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Submission::Sent => write!(f, "sent"),
      Submission::Rejected(status) => write!(f, "rejected ({status})"),
      Submission::EndpointMissing => write!(f, "endpoint missing"),
      Submission::NetworkError => write!(f, "network error"),
    }
  }
}

/// Status line shown while a submission is in flight.
pub const SENDING: &str = "Sending…";

/// Posts contact forms to a relay endpoint.
#[derive(Debug, Clone)]
pub struct ContactRelay {
  /// Relay URL as configured
  endpoint: String,
  /// HTTP client
  client:   reqwest::Client,
}

impl ContactRelay {
  /// A relay for `endpoint`. The endpoint is validated when submitting, not here, so a blank
  /// configuration still produces a relay that reports itself unconfigured.
  pub fn new(endpoint: impl Into<String>) -> Result<Self> {
    let client = reqwest::Client::builder().timeout(crate::source::DEFAULT_TIMEOUT).build()?;
    Ok(Self { endpoint: endpoint.into(), client })
  }

  /// A relay for the configured endpoint; a missing one is treated as blank.
  pub fn from_config(config: &Config) -> Result<Self> {
    let relay = Self::new(config.form_endpoint.clone().unwrap_or_default())?;
    let client = reqwest::Client::builder().timeout(config.request_timeout()).build()?;
    Ok(Self { client, ..relay })
  }

  /// Whether the endpoint looks like an HTTP(S) URL.
  pub fn is_configured(&self) -> bool { HTTP_ENDPOINT.is_match(&self.endpoint) }

  /// The endpoint.
  pub fn endpoint(&self) -> &str { &self.endpoint }

  /// Sends the form. Never fails; every outcome is a [`Submission`].
  pub async fn submit(&self, form: &ContactForm) -> Submission {
    if !self.is_configured() {
      warn!("Contact form endpoint is not configured: {:?}", self.endpoint);
      return Submission::EndpointMissing;
    }

    let payload = match form.payload().await {
      Ok(payload) => payload,
      Err(e) => {
        warn!("Failed to build contact form payload: {e}");
        return Submission::NetworkError;
      },
    };

    debug!("Submitting contact form to {}", self.endpoint);
    match self.client.post(&self.endpoint).multipart(payload).send().await {
      Ok(response) if response.status().is_success() => {
        info!("Contact form accepted by relay");
        Submission::Sent
      },
      Ok(response) => {
        warn!("Contact form rejected by relay: {}", response.status());
        Submission::Rejected(response.status().as_u16())
      },
      Err(e) => {
        warn!("Contact form submission failed: {e}");
        Submission::NetworkError
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_count_words() {
    assert_eq!(count_words(""), 0);
    assert_eq!(count_words("   \n\t "), 0);
    assert_eq!(count_words("  one two\nthree\tfour  "), 4);
  }

  #[test]
  fn test_limit_words_within_limit_is_untouched() {
    let limited = limit_words("  keep   my spacing ", 5);
    assert!(!limited.trimmed);
    assert_eq!(limited.text, "  keep   my spacing ");
    assert_eq!(limited.label(), "3 / 5 words");
  }

  #[test]
  fn test_limit_words_over_limit_is_cut() {
    let text = (1..=503).map(|n| format!("w{n}")).collect::<Vec<_>>().join("  \n");
    let limited = limit_words(&text, MAX_WORDS);
    assert!(limited.trimmed);
    assert_eq!(limited.words, 503);
    assert_eq!(count_words(&limited.text), MAX_WORDS);
    assert!(limited.text.starts_with("w1 w2 w3"));
    assert!(limited.text.ends_with("w499 w500"));
    assert_eq!(limited.label(), "500 / 500 words");
  }

  #[test]
  fn test_attachment_accepts_only_pdf() {
    let attachment = Attachment::from_path("/tmp/essays/Essay.PDF").unwrap();
    assert_eq!(attachment.label(), "Attached: Essay.PDF");
    assert!(matches!(
      Attachment::from_path("/tmp/notes.txt"),
      Err(StoriesError::NotPdf(name)) if name == "notes.txt"
    ));
    assert!(Attachment::from_path("/tmp/no-extension").is_err());
  }

  #[test]
  fn test_countdown() {
    let mut countdown = Countdown::default();
    assert_eq!(countdown.tick(), "Session timer: 05:00");
    assert_eq!(countdown.tick(), "Session timer: 04:59");

    let mut countdown = Countdown::new(Duration::from_secs(1));
    assert_eq!(countdown.tick(), "Session timer: 00:01");
    assert_eq!(countdown.tick(), "Session timer: 00:00");
    assert_eq!(countdown.tick(), "Session timer: 00:00");
    assert!(countdown.is_finished());
  }

  #[test]
  fn test_form_comments_are_limited() {
    let comments = vec!["word"; 600].join(" ");
    let form = ContactForm::new("Ana", "ana@example.com", &comments);
    assert_eq!(count_words(&form.comments), MAX_WORDS);
  }

  #[traced_test]
  #[tokio::test]
  async fn test_unconfigured_endpoint() {
    for endpoint in ["", "formspree.io/f/abc", "ftp://relay.example.com"] {
      let relay = ContactRelay::new(endpoint).unwrap();
      assert!(!relay.is_configured());
      let submission = relay.submit(&ContactForm::default()).await;
      assert_eq!(submission, Submission::EndpointMissing);
      assert!(submission.status_message().starts_with("Form endpoint not configured"));
    }
  }
}
