//! Module for the "list" command.

use stories::grid::Card;

use super::*;

/// Options for [`Commands::List`].
#[derive(Args, Clone)]
pub struct ListOptions {
  /// Print the cards as JSON instead of a tree
  #[arg(long)]
  pub json: bool,
}

/// Function for the [`Commands::List`] in the CLI.
pub async fn list<I: UserInteraction>(
  interaction: &I,
  config: &Config,
  options: ListOptions,
) -> Result<()> {
  let store = store(config)?;
  store.load().await;

  let mut cards: Vec<Card> = Vec::new();
  store.render_grid(&mut cards);

  if options.json {
    println!("{}", serde_json::to_string_pretty(&cards)?);
    return Ok(());
  }

  if store.last_outcome().is_some_and(|outcome| outcome.is_stale()) && !cards.is_empty() {
    interaction.reply(ResponseContent::Warning(
      "Showing saved articles; the latest could not be fetched",
    ))?;
  }
  interaction.reply(ResponseContent::Cards(&cards))
}
