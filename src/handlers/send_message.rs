use teloxide::{
  payloads::{EditMessageTextSetters, SendMessageSetters},
  requests::Requester,
  types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, Recipient},
};
use url::Url;

use crate::screens::{Button, ButtonKind, Screen};
use crate::types::BotType;

pub trait ScreenDelivery {
  fn send_screen<C>(&self, chat_id: C, screen: &Screen) -> <BotType as Requester>::SendMessage
  where
    C: Into<Recipient>;

  fn edit_screen(
    &self,
    chat_id: ChatId,
    message_id: MessageId,
    screen: &Screen,
  ) -> <BotType as Requester>::EditMessageText;
}

impl ScreenDelivery for BotType {
  fn send_screen<C>(&self, chat_id: C, screen: &Screen) -> <BotType as Requester>::SendMessage
  where
    C: Into<Recipient>,
  {
    let mut message = self.send_message(chat_id, screen.text.clone());

    if let Some(keyboard) = inline_keyboard(screen) {
      message = message.reply_markup(keyboard);
    }

    message
  }

  fn edit_screen(
    &self,
    chat_id: ChatId,
    message_id: MessageId,
    screen: &Screen,
  ) -> <BotType as Requester>::EditMessageText {
    let mut message = self.edit_message_text(chat_id, message_id, screen.text.clone());

    if let Some(keyboard) = inline_keyboard(screen) {
      message = message.reply_markup(keyboard);
    }

    message
  }
}

fn inline_button(button: &Button) -> Option<InlineKeyboardButton> {
  match &button.kind {
    ButtonKind::Callback(action) => Some(InlineKeyboardButton::callback(
      button.label.clone(),
      action.callback_data(),
    )),
    ButtonKind::Url(url) => match Url::parse(url) {
      Ok(url) => Some(InlineKeyboardButton::url(button.label.clone(), url)),
      Err(err) => {
        log::warn!("Dropping button {:?}, bad url {:?}: {}", button.label, url, err);
        None
      }
    },
  }
}

pub fn inline_keyboard(screen: &Screen) -> Option<InlineKeyboardMarkup> {
  if screen.keyboard.is_empty() {
    return None;
  }

  let rows = screen
    .keyboard
    .iter()
    .map(|row| row.iter().filter_map(inline_button).collect::<Vec<_>>())
    .filter(|row| !row.is_empty())
    .collect::<Vec<_>>();

  Some(InlineKeyboardMarkup::new(rows))
}
