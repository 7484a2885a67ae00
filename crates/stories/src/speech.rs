//! Text-to-speech playback.
//!
//! The page reads content aloud through whatever synthesizer the platform offers, modelled by the
//! [`Speech`] trait. [`Narrator`] is the on/off toggle behind the header's speech button; the
//! preview modal also holds a backend so closing it silences anything it started.

use super::*;

/// Default speaking rate.
pub const DEFAULT_RATE: f32 = 1.0;

/// Text queued for synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
  /// Text to speak
  pub text: String,
  /// Speaking rate, 1.0 being normal speed
  pub rate: f32,
}

impl Utterance {
  /// An utterance at the default rate.
  pub fn new(text: impl Into<String>) -> Self { Self { text: text.into(), rate: DEFAULT_RATE } }
}

/// A speech synthesizer.
pub trait Speech {
  /// Whether this backend can speak at all.
  fn supported(&self) -> bool { true }

  /// Whether something is being spoken right now.
  fn speaking(&self) -> bool;

  /// Starts speaking an utterance.
  fn speak(&mut self, utterance: Utterance);

  /// Stops speaking immediately.
  fn cancel(&mut self);
}

/// In-memory synthesizer that remembers what it was asked to say.
///
/// Speech is considered in progress from [`speak`](Speech::speak) until it is cancelled or
/// [`finish`](SpeechQueue::finish)ed.
#[derive(Debug, Clone, Default)]
pub struct SpeechQueue {
  /// Utterance in progress
  current: Option<Utterance>,
  /// Every utterance ever started, oldest first
  spoken:  Vec<Utterance>,
  /// Number of cancellations that interrupted speech
  cancels: usize,
}

impl SpeechQueue {
  /// The utterance in progress.
  pub fn current(&self) -> Option<&Utterance> { self.current.as_ref() }

  /// Every utterance started so far.
  pub fn spoken(&self) -> &[Utterance] { &self.spoken }

  /// How many times speech in progress was cancelled.
  pub fn cancels(&self) -> usize { self.cancels }

  /// Marks the utterance in progress as finished.
  pub fn finish(&mut self) { self.current = None; }
}

impl Speech for SpeechQueue {
  fn speaking(&self) -> bool { self.current.is_some() }

  fn speak(&mut self, utterance: Utterance) {
    trace!("Speaking {} characters at rate {}", utterance.text.len(), utterance.rate);
    self.spoken.push(utterance.clone());
    self.current = Some(utterance);
  }

  fn cancel(&mut self) {
    if self.current.take().is_some() {
      self.cancels += 1;
    }
  }
}

/// A backend for platforms without speech synthesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl Speech for NoSpeech {
  fn supported(&self) -> bool { false }

  fn speaking(&self) -> bool { false }

  fn speak(&mut self, _utterance: Utterance) {}

  fn cancel(&mut self) {}
}

/// The speech on/off toggle.
#[derive(Debug, Default)]
pub struct Narrator<P> {
  /// Synthesizer in use
  backend: P,
  /// Whether the toggle is on
  enabled: bool,
}

impl<P: Speech> Narrator<P> {
  /// Creates a narrator that starts switched off.
  pub fn new(backend: P) -> Self { Self { backend, enabled: false } }

  /// Flips the toggle. Switching on reads `text` from the start; switching off stops speech.
  ///
  /// Returns the new state, which is also the toggle button's pressed state.
  ///
  /// # Errors
  ///
  /// [`StoriesError::SpeechUnsupported`] when the backend cannot speak; the toggle stays off.
  pub fn toggle(&mut self, text: &str) -> Result<bool> {
    if !self.backend.supported() {
      return Err(StoriesError::SpeechUnsupported);
    }
    self.enabled = !self.enabled;
    if self.enabled {
      self.start(text);
    } else {
      self.stop();
    }
    Ok(self.enabled)
  }

  /// Speaks `text` from the beginning, interrupting anything in progress.
  pub fn start(&mut self, text: &str) {
    self.stop();
    self.backend.speak(Utterance::new(text));
  }

  /// Stops speech in progress.
  pub fn stop(&mut self) {
    if self.backend.speaking() {
      self.backend.cancel();
    }
  }

  /// Whether the toggle is on.
  pub fn enabled(&self) -> bool { self.enabled }

  /// The pressed state for the toggle button, `"true"` or `"false"`.
  pub fn aria_pressed(&self) -> &'static str { if self.enabled { "true" } else { "false" } }

  /// The synthesizer in use.
  pub fn backend(&self) -> &P { &self.backend }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_toggle_starts_and_stops() {
    let mut narrator = Narrator::new(SpeechQueue::default());
    assert_eq!(narrator.aria_pressed(), "false");

    assert!(narrator.toggle("Hello there").unwrap());
    assert_eq!(narrator.aria_pressed(), "true");
    assert_eq!(narrator.backend().current(), Some(&Utterance::new("Hello there")));

    assert!(!narrator.toggle("Hello there").unwrap());
    assert!(!narrator.backend().speaking());
    assert_eq!(narrator.backend().cancels(), 1);
  }

  #[test]
  fn test_start_interrupts_current_speech() {
    let mut narrator = Narrator::new(SpeechQueue::default());
    narrator.start("first");
    narrator.start("second");
    assert_eq!(narrator.backend().spoken().len(), 2);
    assert_eq!(narrator.backend().cancels(), 1);
    assert_eq!(narrator.backend().current().unwrap().text, "second");
  }

  #[test]
  fn test_unsupported_backend() {
    let mut narrator = Narrator::new(NoSpeech);
    assert!(matches!(narrator.toggle("text"), Err(StoriesError::SpeechUnsupported)));
    assert!(!narrator.enabled());
  }
}
