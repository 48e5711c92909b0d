use std::sync::Arc;
use teloxide::{adaptors::DefaultParseMode, dispatching::dialogue::InMemStorage, prelude::Dialogue, Bot};

use crate::config::Config;
use crate::controller::Controller;
use crate::pricing::PriceTable;
use crate::session::SessionStore;
use crate::util::Clock;

pub type HandlerResult = anyhow::Result<()>;
pub type DialogueWithState = Dialogue<ConversationState, InMemStorage<ConversationState>>;

pub type BotType = DefaultParseMode<Bot>;
pub type AppType = Arc<App>;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConversationState {
    #[default]
    MainMenu,
    SelectChain,
    SelectDuration,
    TokenAddress,
    TelegramLink,
    TwitterLink,
}

/// Everything the handlers share, built once in `main`
pub struct App {
    pub config: Arc<Config>,
    pub store: Arc<dyn SessionStore>,
    pub prices: PriceTable,
    pub clock: Arc<dyn Clock>,
}

impl App {
    pub fn controller(&self) -> Controller<'_> {
        Controller {
            store: self.store.as_ref(),
            config: &self.config,
            prices: &self.prices,
            clock: self.clock.as_ref(),
        }
    }
}
