//! Module for the "open" command.
//!
//! Opening goes through the same navigator the site uses for deep links, so an unknown id is
//! reported and otherwise ignored, exactly like a stale link on the page.

use stories::{
  modal::{MemorySurface, PreviewModal, Region},
  navigation::{MemoryHistory, NavEvent, Navigator, Transition},
  speech::SpeechQueue,
};

use super::*;

/// Options for [`Commands::Open`].
#[derive(Args, Clone)]
pub struct OpenOptions {
  /// Article id (`quiet-rooms`), fragment (`#quiet-rooms`), or full deep link
  pub target: String,

  /// Text size steps to apply, negative for smaller; defaults to the remembered size
  #[arg(long, allow_hyphen_values = true)]
  pub text_steps: Option<i8>,
}

/// The page location a target stands for.
fn location(target: &str) -> String {
  if target.contains("://") {
    target.to_string()
  } else {
    format!("{BLOG_PAGE}#{}", target.trim_start_matches('#'))
  }
}

/// Function for the [`Commands::Open`] in the CLI.
pub async fn open<I: UserInteraction>(
  interaction: &I,
  config: &Config,
  options: OpenOptions,
) -> Result<()> {
  let store = store(config)?;
  let modal = PreviewModal::new(MemorySurface::page(), SpeechQueue::default());
  let history = MemoryHistory::new(&location(&options.target))?;
  let mut navigator = Navigator::new(Arc::clone(&store), modal, history);

  let Transition::Opened(id) = navigator.handle(NavEvent::PageLoad).await else {
    let message = match navigator.history().fragment() {
      Some(id) => format!("No article with id `{id}`"),
      None => format!("`{}` does not name an article", options.target),
    };
    return interaction.reply(ResponseContent::Warning(&message));
  };
  debug!("Opened {id}");

  let modal = navigator.modal_mut();
  match options.text_steps {
    Some(steps) =>
      for _ in 0..steps.unsigned_abs() {
        if steps > 0 {
          modal.bigger_text();
        } else {
          modal.smaller_text();
        }
      },
    None => {
      let remembered = Preferences::load(&config.preferences_path)?.font_scale;
      while modal.text_scale() < remembered && modal.bigger_text() < remembered {}
      while modal.text_scale() > remembered && modal.smaller_text() > remembered {}
    },
  }

  let modal = navigator.modal();
  let surface = modal.surface();
  interaction.reply(ResponseContent::Preview(Preview {
    title: surface.text(Region::Title).unwrap_or_default(),
    meta:  surface.text(Region::Meta).unwrap_or_default(),
    image: surface.region(Region::HeroImage).and_then(|hero| hero.src.as_deref()),
    body:  surface.markup(Region::Body).unwrap_or_default(),
    scale: modal.text_scale().value(),
    stale: store.last_outcome().is_some_and(|outcome| outcome.is_stale()),
  }))
}
