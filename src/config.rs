use std::collections::HashMap;

use crate::errors::ConfigError;
use crate::pricing::ChainId;

const DEFAULT_PORT: u16 = 10000;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupLinks {
  pub community: String,
  pub nft_minting: String,
  pub promotion: String,
  pub verify_trend: String,
  pub lounge: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
  pub address: String,
  pub network: &'static str,
}

/// Everything read from the environment at startup. Built once and shared
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Config {
  pub bot_token: Option<String>,
  pub port: u16,
  pub links: GroupLinks,
  pub support_contact: String,
  pub environment: String,
  wallets: HashMap<ChainId, String>,
}

fn wallet_env_var(chain: ChainId) -> &'static str {
  match chain {
    ChainId::Bsc => "BSC_WALLET",
    ChainId::Eth => "ETH_WALLET",
    ChainId::Sol => "SOL_WALLET",
    ChainId::Base => "BASE_WALLET",
    ChainId::PumpFun => "PUMPFUN_WALLET",
    ChainId::Possum => "POSSUM_WALLET",
    ChainId::FourMeme => "FOURMEME_WALLET",
  }
}

fn default_wallet(chain: ChainId) -> &'static str {
  match chain {
    ChainId::Bsc | ChainId::FourMeme => "0xYourBNBWalletAddress",
    ChainId::Eth => "0xYourETHWalletAddress",
    ChainId::Base => "0xYourBaseWalletAddress",
    ChainId::Sol | ChainId::PumpFun | ChainId::Possum => "YourSolanaWalletAddress",
  }
}

fn payment_network(chain: ChainId) -> &'static str {
  match chain {
    ChainId::Bsc | ChainId::FourMeme => "Binance Smart Chain (BEP20)",
    ChainId::Eth => "Ethereum (ERC20)",
    ChainId::Base => "Base Network",
    ChainId::Sol | ChainId::PumpFun | ChainId::Possum => "Solana",
  }
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Builds the config from any key lookup. Empty values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

    let port = match get("PORT") {
      Some(raw) => raw
        .trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
      None => DEFAULT_PORT,
    };

    let wallets = ChainId::ALL
      .into_iter()
      .map(|chain| (chain, get_or(wallet_env_var(chain), default_wallet(chain))))
      .collect();

    let environment = if get("RENDER").is_some() {
      "production"
    } else {
      "development"
    };

    let config = Config {
      bot_token: get("BOT_TOKEN"),
      port,
      links: GroupLinks {
        community: get_or("COMMUNITY_GROUP_LINK", "https://t.me/YourCommunityGroup"),
        nft_minting: get_or("NFT_MINTING_GROUP_LINK", "https://t.me/YourNFTGroup"),
        promotion: get_or("PROMOTION_GROUP_LINK", "https://t.me/YourPromotionGroup"),
        verify_trend: get_or("VERIFY_TREND_LINK", "https://t.me/skeletontrend"),
        lounge: get_or("LOUNGE_GROUP_LINK", "https://t.me/skeletonlounge"),
      },
      support_contact: get_or("SUPPORT_CONTACT", "@skeletondev"),
      environment: environment.to_string(),
      wallets,
    };

    log::debug!(
      "Loaded config: port {}, environment {}, token set: {}",
      config.port,
      config.environment,
      config.bot_token.is_some()
    );

    Ok(config)
  }

  pub fn require_token(&self) -> Result<&str, ConfigError> {
    self.bot_token.as_deref().ok_or(ConfigError::MissingToken)
  }

  pub fn wallet(&self, chain: ChainId) -> Wallet {
    let address = self
      .wallets
      .get(&chain)
      .cloned()
      .unwrap_or_else(|| default_wallet(chain).to_string());

    Wallet {
      address,
      network: payment_network(chain),
    }
  }

  /// `@handle` turned into a t.me link for URL buttons
  pub fn support_url(&self) -> String {
    format!("https://t.me/{}", self.support_contact.trim_start_matches('@'))
  }
}

#[cfg(test)]
pub fn test_config() -> Config {
  // Defaults everywhere, with a token so the bot path would start
  Config::from_lookup(|key| match key {
    "BOT_TOKEN" => Some("123:test".to_string()),
    _ => None,
  })
  .unwrap()
}
