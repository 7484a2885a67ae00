//! How commands talk to the person at the terminal.
//!
//! Commands never print directly; they hand a [`ResponseContent`] to a [`UserInteraction`], so
//! confirmations can be skipped with `--accept-defaults` and output stays uniform.

use console::Style;
use dialoguer::{Confirm, Input};
use stories::{grid::Card, modal::plain_text};

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Prefix for all but the last item of a list
pub static ITEM_PREFIX: &str = "├─";
/// Prefix for the last item of a list
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Continuation line under a list item
pub static CONTINUE_PREFIX: &str = "│  ";

/// An opened article as shown by the preview.
#[derive(Debug)]
pub struct Preview<'a> {
  /// Article title
  pub title:   &'a str,
  /// Byline
  pub meta:    &'a str,
  /// Hero image source
  pub image:   Option<&'a str>,
  /// Body markup
  pub body:    &'a str,
  /// Text size multiplier in effect
  pub scale:   f32,
  /// Whether the article came from the saved snapshot
  pub stale:   bool,
}

/// Something to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// An article preview
  Preview(Preview<'a>),
  /// Listing cards
  Cards(&'a [Card]),
  /// Something worked
  Success(&'a str),
  /// Something to know
  Info(&'a str),
  /// Something the user may want to act on
  Warning(&'a str),
  /// Something failed
  Error(&'a str),
}

/// Terminal conversation.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;

  /// Asks for a line of text.
  fn prompt(&self, message: &str) -> Result<String>;

  /// Shows a response.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Interaction on the process's own stdin and stdout.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
  /// Answer every question with its default
  accept_defaults: bool,
}

impl Terminal {
  /// Creates a terminal interaction.
  pub fn new(accept_defaults: bool) -> Self { Self { accept_defaults } }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{} {message}", style(PROMPT_PREFIX).yellow()))
        .default(false)
        .wait_for_newline(true)
        .interact()?,
    )
  }

  fn prompt(&self, message: &str) -> Result<String> {
    Ok(
      Input::<String>::new()
        .with_prompt(format!("{} {message}", style(PROMPT_PREFIX).yellow()))
        .interact_text()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Preview(preview) => print_preview(&preview),
      ResponseContent::Cards(cards) => print_cards(cards),
      ResponseContent::Success(message) => println!("{} {message}", style(SUCCESS_PREFIX).green()),
      ResponseContent::Info(message) => println!("{} {message}", style(INFO_PREFIX).cyan()),
      ResponseContent::Warning(message) => println!("{} {message}", style(WARNING_PREFIX).yellow()),
      ResponseContent::Error(message) => eprintln!("{} {message}", style(ERROR_PREFIX).red()),
    }
    Ok(())
  }
}

/// Prints the listing as a tree.
fn print_cards(cards: &[Card]) {
  if cards.is_empty() {
    println!("{} No articles available", style(INFO_PREFIX).cyan());
    return;
  }

  println!("{} {} articles", style(INFO_PREFIX).cyan(), cards.len());
  for (i, card) in cards.iter().enumerate() {
    let prefix = if i + 1 == cards.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
    println!(
      "{} {} {}",
      style(prefix).dim(),
      style(&card.title).bold(),
      style(format!("({})", card.href)).yellow()
    );
    let continuation = if i + 1 == cards.len() { "   " } else { CONTINUE_PREFIX };
    if !card.meta.is_empty() {
      println!("{}{}", style(continuation).dim(), style(&card.meta).dim());
    }
    if !card.excerpt.is_empty() {
      println!("{}{}", style(continuation).dim(), card.excerpt);
    }
  }
}

/// Prints an opened article.
fn print_preview(preview: &Preview) {
  if preview.stale {
    println!(
      "{} Showing saved articles; the latest could not be fetched",
      style(WARNING_PREFIX).yellow()
    );
  }
  println!("{}", style(preview.title).bold().underlined());
  if !preview.meta.is_empty() {
    println!("{}", style(preview.meta).dim());
  }
  if let Some(image) = preview.image.filter(|src| !src.is_empty()) {
    println!("{} {}", style("Image:").cyan(), image);
  }
  println!();

  let body = if preview.scale > 1.0 { Style::new().bold() } else { Style::new() };
  for paragraph in plain_text(preview.body).lines() {
    println!("{}\n", body.apply_to(paragraph));
  }
}
