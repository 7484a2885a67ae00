//! Module for the "clean" command.

use super::*;

/// Function for the [`Commands::Clean`] in the CLI.
pub fn clean<I: UserInteraction>(interaction: &I, config: &Config) -> Result<()> {
  let snapshot = FileSnapshot::new(&config.cache_dir);
  let path = snapshot.path().display().to_string();

  if !snapshot.path().exists() {
    return interaction.reply(ResponseContent::Info(&format!("No saved articles at {path}")));
  }

  interaction.reply(ResponseContent::Warning(&format!("Saved articles found at {path}")))?;
  if !interaction.confirm("Remove the saved articles? Offline reading will show nothing.")? {
    return interaction.reply(ResponseContent::Info("Operation cancelled"));
  }

  snapshot.clear()?;
  interaction.reply(ResponseContent::Success("Saved articles removed"))
}
