use anyhow::Result;
use teloxide::{
  macros::BotCommands,
  types::{Me, Message},
  utils::command::BotCommands as _,
};

use super::{advance, respond, sender_of};
use crate::controller::Event;
use crate::types::{AppType, BotType, DialogueWithState};

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase")]
pub enum Command {
  #[command(description = "Start a new trending boost order")]
  Start,

  #[command(description = "Show the main menu")]
  Help,
}

pub async fn receive_command(
  app: AppType,
  bot: BotType,
  me: Me,
  dialogue: DialogueWithState,
  msg: Message,
) -> Result<()> {
  let Some(user) = msg.from.as_ref() else {
    log::debug!("Ignoring command without sender in {:?}", msg.chat.id);
    return Ok(());
  };

  let text = msg.text().unwrap_or_default();
  let event = match Command::parse(text, me.username()) {
    Ok(Command::Start) | Ok(Command::Help) => Event::Start,
    Err(err) => {
      log::debug!("Unknown command {:?}: {}", text, err);
      Event::Unrecognized
    }
  };

  let reply = advance(&app, &dialogue, &sender_of(user), event).await?;
  respond(&app, &bot, &dialogue, msg.chat.id, None, &reply).await
}
