//! Telegram side of the bot: turns updates into controller events and
//! delivers the resulting screens.

mod callback;
mod command;
mod send_message;
mod text;

use teloxide::dispatching::{dialogue::InMemStorage, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{MessageId, User};
use teloxide::{ApiError, RequestError};

pub use command::Command;

use crate::controller::{Delivery, Event, Reply, Sender};
use crate::types::{App, AppType, BotType, ConversationState, DialogueWithState, HandlerResult};
use send_message::ScreenDelivery as _;

pub fn sender_of(user: &User) -> Sender {
  Sender {
    id: user.id,
    display_name: user
      .username
      .clone()
      .unwrap_or_else(|| user.first_name.clone()),
  }
}

/// Runs one event through the controller and stores the next state
async fn advance(
  app: &App,
  dialogue: &DialogueWithState,
  sender: &Sender,
  event: Event,
) -> anyhow::Result<Reply> {
  let state = dialogue.get_or_default().await?;
  let controller = app.controller();
  let transition = controller.handle(sender, state, event).unwrap_or_else(|err| {
    log::error!("Failed to handle update from {:?}: {}", sender.id, err);
    controller.recover()
  });

  log::debug!("User {:?} moves to {:?}", sender.id, transition.next);

  dialogue.update(transition.next).await?;
  Ok(transition.reply)
}

/// Delivers a reply. The dialogue already points at the next state, so if
/// nothing reaches the user they are sent back to the main menu instead.
async fn respond(
  app: &App,
  bot: &BotType,
  dialogue: &DialogueWithState,
  chat_id: ChatId,
  origin: Option<MessageId>,
  reply: &Reply,
) -> HandlerResult {
  let Err(err) = deliver(bot, chat_id, origin, reply).await else {
    return Ok(());
  };

  log::error!("Failed to deliver reply to {:?}: {}", chat_id, err);

  let recovery = app.controller().recover();
  dialogue.update(recovery.next).await?;
  bot.send_screen(chat_id, &recovery.reply.screen).await?;
  Ok(())
}

async fn deliver(
  bot: &BotType,
  chat_id: ChatId,
  origin: Option<MessageId>,
  reply: &Reply,
) -> HandlerResult {
  let message_id = match (reply.delivery, origin) {
    (Delivery::Edit, Some(message_id)) => message_id,
    _ => {
      bot.send_screen(chat_id, &reply.screen).await?;
      return Ok(());
    }
  };

  match bot.edit_screen(chat_id, message_id, &reply.screen).await {
    Ok(_) => Ok(()),
    // Same button pressed twice
    Err(RequestError::Api(ApiError::MessageNotModified)) => {
      log::debug!("Message {:?} in {:?} already up to date", message_id, chat_id);
      Ok(())
    }
    Err(err) => {
      log::warn!(
        "Cannot edit message {:?} in {:?}, sending a new one: {}",
        message_id,
        chat_id,
        err
      );
      bot.send_screen(chat_id, &reply.screen).await?;
      Ok(())
    }
  }
}

pub fn schema(app: AppType) -> UpdateHandler<anyhow::Error> {
  let command_tree = dptree::filter(|msg: Message| {
    msg.text().is_some_and(|text| text.starts_with('/'))
  })
  .endpoint({
    let app = app.clone();
    move |bot, me, dialogue, msg| command::receive_command(app.clone(), bot, me, dialogue, msg)
  });

  let text_tree = dptree::endpoint({
    let app = app.clone();
    move |bot, dialogue, msg| text::receive_text(app.clone(), bot, dialogue, msg)
  });

  let message_tree = Update::filter_message()
    .enter_dialogue::<Message, InMemStorage<ConversationState>, ConversationState>()
    .branch(command_tree)
    .branch(text_tree);

  let callback_tree = Update::filter_callback_query()
    .enter_dialogue::<CallbackQuery, InMemStorage<ConversationState>, ConversationState>()
    .endpoint({
      let app = app.clone();
      move |bot, dialogue, query| callback::receive_button(app.clone(), bot, dialogue, query)
    });

  dptree::entry().branch(message_tree).branch(callback_tree)
}
