use teloxide::types::UserId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
  #[error("no session for user {0}")]
  NotFound(UserId),
}

/// Rejected free-text input. The controller recovers from these by
/// re-prompting in the same state.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
  #[error("token address must be at least {min} characters, got {got}")]
  TokenAddressTooShort { min: usize, got: usize },
  #[error("telegram link must start with https://t.me/ or t.me/")]
  InvalidTelegramLink,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("BOT_TOKEN is not set")]
  MissingToken,
  #[error("PORT must be a valid port number, got {0:?}")]
  InvalidPort(String),
}
