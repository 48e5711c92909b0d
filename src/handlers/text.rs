use anyhow::Result;
use teloxide::types::Message;

use super::{advance, respond, sender_of};
use crate::controller::Event;
use crate::types::{AppType, BotType, DialogueWithState};

pub async fn receive_text(
  app: AppType,
  bot: BotType,
  dialogue: DialogueWithState,
  msg: Message,
) -> Result<()> {
  let Some(user) = msg.from.as_ref() else {
    log::debug!("Ignoring message without sender in {:?}", msg.chat.id);
    return Ok(());
  };

  // Stickers, photos and the like get the welcome screen
  let event = match msg.text() {
    Some(text) => Event::Text(text.to_string()),
    None => Event::Unrecognized,
  };

  let reply = advance(&app, &dialogue, &sender_of(user), event).await?;
  respond(&app, &bot, &dialogue, msg.chat.id, None, &reply).await
}
