//! Module for the "theme" command.

use super::*;

/// Themes accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeChoice {
  /// Light background
  Light,
  /// Dark background
  Dark,
  /// Whichever theme is not in effect
  Toggle,
}

/// Options for [`Commands::Theme`].
#[derive(Args, Clone)]
pub struct ThemeOptions {
  /// Theme to switch to; shows the current one when omitted
  #[arg(value_enum)]
  pub choice: Option<ThemeChoice>,
}

/// Function for the [`Commands::Theme`] in the CLI.
pub fn theme<I: UserInteraction>(
  interaction: &I,
  config: &Config,
  options: ThemeOptions,
) -> Result<()> {
  let mut preferences = Preferences::load(&config.preferences_path)?;

  let theme = match options.choice {
    None => {
      let current = preferences.theme();
      return interaction.reply(ResponseContent::Info(&format!("Theme: {current}")));
    },
    Some(ThemeChoice::Toggle) => preferences.toggle_theme(),
    Some(ThemeChoice::Light) => Theme::Light,
    Some(ThemeChoice::Dark) => Theme::Dark,
  };
  preferences.theme = Some(theme);
  preferences.save(&config.preferences_path)?;

  interaction.reply(ResponseContent::Success(&format!("Theme set to {theme}")))
}
