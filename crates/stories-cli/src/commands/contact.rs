//! Module for the "contact" command.

use stories::contact::{limit_words, Attachment, ContactForm, ContactRelay, MAX_WORDS, SENDING};

use super::*;

/// Options for [`Commands::Contact`].
#[derive(Args, Clone)]
pub struct ContactOptions {
  /// Your name; asked for when omitted
  #[arg(long)]
  pub name: Option<String>,

  /// Your email address; asked for when omitted
  #[arg(long)]
  pub email: Option<String>,

  /// The message
  #[arg(long, conflicts_with = "message_file")]
  pub message: Option<String>,

  /// Read the message from a file
  #[arg(long)]
  pub message_file: Option<PathBuf>,

  /// A PDF to attach
  #[arg(long)]
  pub attach: Option<PathBuf>,
}

/// Function for the [`Commands::Contact`] in the CLI.
pub async fn contact<I: UserInteraction>(
  interaction: &I,
  config: &Config,
  options: ContactOptions,
) -> Result<()> {
  let name = match options.name {
    Some(name) => name,
    None => interaction.prompt("Name")?,
  };
  let email = match options.email {
    Some(email) => email,
    None => interaction.prompt("Email")?,
  };
  let comments = match (options.message, options.message_file) {
    (Some(message), _) => message,
    (None, Some(path)) => std::fs::read_to_string(path)?,
    (None, None) => interaction.prompt("Message")?,
  };

  let limit = limit_words(&comments, MAX_WORDS);
  if limit.trimmed {
    interaction.reply(ResponseContent::Warning(&format!(
      "Message cut to the first {MAX_WORDS} words ({})",
      limit.label()
    )))?;
  } else {
    interaction.reply(ResponseContent::Info(&limit.label()))?;
  }

  let mut form = ContactForm::new(name, email, &comments);
  if let Some(path) = options.attach {
    let attachment = Attachment::from_path(path)?;
    interaction.reply(ResponseContent::Info(&attachment.label()))?;
    form = form.with_attachment(attachment);
  }

  let relay = ContactRelay::from_config(config)?;
  interaction.reply(ResponseContent::Info(SENDING))?;
  let submission = relay.submit(&form).await;

  if !submission.is_sent() {
    return Err(StoriesCliError::NotSent(submission));
  }
  interaction.reply(ResponseContent::Success("Thank you! Your message has been sent."))
}
