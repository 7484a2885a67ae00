//! Module for the "text" command.

use stories::controls::FontScale;

use super::*;

/// Text size changes.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAction {
  /// One step bigger
  Bigger,
  /// One step smaller
  Smaller,
  /// Back to the default size
  Reset,
}

/// Options for [`Commands::Text`].
#[derive(Args, Clone)]
pub struct TextOptions {
  /// How to change the size; shows the current size when omitted
  #[arg(value_enum)]
  pub action: Option<TextAction>,
}

/// Function for the [`Commands::Text`] in the CLI.
pub fn text<I: UserInteraction>(interaction: &I, config: &Config, options: TextOptions) -> Result<()> {
  let mut preferences = Preferences::load(&config.preferences_path)?;
  let current = preferences.font_scale;

  let next = match options.action {
    None => return interaction.reply(ResponseContent::Info(&format!("Text size: {current}x"))),
    Some(TextAction::Bigger) => current.bigger(),
    Some(TextAction::Smaller) => current.smaller(),
    Some(TextAction::Reset) => FontScale::default(),
  };

  if next == current && options.action != Some(TextAction::Reset) {
    return interaction
      .reply(ResponseContent::Warning(&format!("Text size is already at its limit ({current}x)")));
  }

  preferences.font_scale = next;
  preferences.save(&config.preferences_path)?;
  interaction.reply(ResponseContent::Success(&format!("Text size set to {next}x")))
}
