use anyhow::Result;
use teloxide::payloads::AnswerCallbackQuerySetters;
use teloxide::prelude::*;

use super::{advance, respond, sender_of};
use crate::controller::{Action, Event};
use crate::types::{AppType, BotType, DialogueWithState};

pub async fn receive_button(
  app: AppType,
  bot: BotType,
  dialogue: DialogueWithState,
  query: CallbackQuery,
) -> Result<()> {
  let sender = sender_of(&query.from);

  let event = match query.data.as_deref().map(|data| (data, Action::parse(data))) {
    Some((_, Some(action))) => Event::Button(action),
    Some((data, None)) => {
      log::debug!("Unknown callback data {:?} from {:?}", data, sender.id);
      Event::Unrecognized
    }
    None => Event::Unrecognized,
  };

  let reply = advance(&app, &dialogue, &sender, event).await?;

  let mut answer = bot.answer_callback_query(query.id.clone());
  if let Some(alert) = &reply.alert {
    answer = answer.text(alert.clone()).show_alert(true);
  }
  // An expired query must not keep the screen from being delivered
  if let Err(err) = answer.await {
    log::warn!("Failed to answer callback query from {:?}: {}", sender.id, err);
  }

  let (chat_id, origin) = match query.message.as_ref() {
    Some(message) => (message.chat().id, Some(message.id())),
    None => (ChatId::from(query.from.id), None),
  };
  respond(&app, &bot, &dialogue, chat_id, origin, &reply).await
}
