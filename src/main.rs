use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

mod config;
mod controller;
mod errors;
mod handlers;
mod health;
mod pricing;
mod screens;
mod session;
mod types;
mod util;

use config::Config;
use health::HealthState;
use pricing::PriceTable;
use session::{InMemorySessionStore, SessionStore};
use types::*;
use util::{Clock, SystemClock};

const STARTUP_ATTEMPTS: u32 = 5;
const STARTUP_RETRY_DELAY: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    log::info!("Starting trending boost bot");

    let config = Arc::new(Config::from_env()?);
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let health_state = HealthState {
        config: config.clone(),
        store: store.clone(),
        clock: clock.clone(),
    };
    let health = tokio::spawn(async move {
        if let Err(err) = health::serve(health_state).await {
            log::error!("Health check server failed: {:#}", err);
        }
    });

    let token = match config.require_token() {
        Ok(token) => token.to_string(),
        Err(err) => {
            log::error!("{}, the bot will not start. Only the health check is served", err);
            health.await?;
            return Ok(());
        }
    };

    let app = Arc::new(App {
        config,
        store,
        prices: PriceTable::new(),
        clock,
    });

    run_bot(token, app).await
}

async fn run_bot(token: String, app: AppType) -> anyhow::Result<()> {
    let bot = Bot::new(token).parse_mode(teloxide::types::ParseMode::Html);

    for attempt in 1..=STARTUP_ATTEMPTS {
        log::info!("Connecting to Telegram (attempt {}/{})", attempt, STARTUP_ATTEMPTS);

        match bot.get_me().await {
            Ok(me) => {
                log::info!("Logged in as @{}", me.username());

                if let Err(err) = bot.set_my_commands(handlers::Command::bot_commands()).await {
                    log::warn!("Failed to register bot commands: {}", err);
                }

                log::debug!("Starting dispatcher");

                Dispatcher::builder(bot, handlers::schema(app))
                    .dependencies(dptree::deps![InMemStorage::<ConversationState>::new()])
                    .error_handler(LoggingErrorHandler::with_custom_text(
                        "An error has occurred in the dispatcher",
                    ))
                    .enable_ctrlc_handler()
                    .build()
                    .dispatch()
                    .await;

                return Ok(());
            }
            Err(err) => {
                log::error!("Bot failed to start on attempt {}: {}", attempt, err);
                if attempt < STARTUP_ATTEMPTS {
                    log::info!("Retrying in {} seconds", STARTUP_RETRY_DELAY.as_secs());
                    tokio::time::sleep(STARTUP_RETRY_DELAY).await;
                }
            }
        }
    }

    anyhow::bail!("bot failed to start after {} attempts", STARTUP_ATTEMPTS)
}
