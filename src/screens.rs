//! Text and button layouts for every screen of the conversation.
//!
//! All functions here are pure: the same inputs give the same screen. The
//! timestamp they take is only printed, never inspected.

use chrono::{DateTime, Local};
use teloxide::utils::html::escape;

use crate::config::Config;
use crate::controller::Action;
use crate::pricing::{format_amount, BoostDuration, ChainId, PriceTable};
use crate::session::CompletedOrder;

const RULE: &str = "<code>────────────────────</code>";
const BOT_HANDLE: &str = "@SkeletonTrendingBot";

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonKind {
  Callback(Action),
  Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
  pub label: String,
  pub kind: ButtonKind,
}

impl Button {
  pub fn callback(label: impl Into<String>, action: Action) -> Self {
    Button {
      label: label.into(),
      kind: ButtonKind::Callback(action),
    }
  }

  pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
    Button {
      label: label.into(),
      kind: ButtonKind::Url(url.into()),
    }
  }
}

/// HTML text plus rows of inline buttons
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
  pub text: String,
  pub keyboard: Vec<Vec<Button>>,
}

impl Screen {
  pub fn text(text: impl Into<String>) -> Self {
    Screen {
      text: text.into(),
      keyboard: vec![],
    }
  }

  pub fn with_buttons(text: impl Into<String>, keyboard: Vec<Vec<Button>>) -> Self {
    Screen {
      text: text.into(),
      keyboard,
    }
  }
}

fn day(now: DateTime<Local>) -> String {
  now.format("%B %d").to_string()
}

fn clock_time(now: DateTime<Local>) -> String {
  now.format("%H:%M").to_string()
}

fn back_to_menu_row() -> Vec<Button> {
  vec![Button::callback("🔙 Back", Action::BackToMenu)]
}

fn truncated(value: &str, max_chars: usize) -> String {
  value.chars().take(max_chars).collect()
}

fn header(config: &Config, now: DateTime<Local>, marker: &str) -> String {
  format!(
    "<b># Skeleton Trending Boost Bot</b>\n\
    \n\
    {BOT_HANDLE}\n\
    Always verify on {} and in {}\n\
    \n\
    {RULE}\n\
    \n\
    <b>{}</b>\n\
    \n\
    /start  {} {marker}\n\
    \n\
    {RULE}\n",
    config.links.verify_trend,
    config.links.lounge,
    day(now),
    clock_time(now),
  )
}

pub fn main_menu() -> Vec<Vec<Button>> {
  vec![
    vec![Button::callback("🚀 Main Trending Boost", Action::MainBoost)],
    vec![Button::callback("👥 Community Trending", Action::CommunityBoost)],
    vec![Button::callback("📊 Check All Promotion Options", Action::AllPromotions)],
    vec![Button::callback("💀 Mint SolidSkull NFT", Action::MintNft)],
  ]
}

pub fn welcome(config: &Config, now: DateTime<Local>) -> Screen {
  let text = format!(
    "{}\n\
    <b>WELCOME TO</b>\n\
    <b>FASTTRACK TRENDING BOOST</b>\n\
    <b>SERVICE</b>\n\
    \n\
    <b>BOOST YOUR TOKEN ON TRENDING IN SECONDS</b>\n\
    \n\
    Welcome to Skeleton Fasttrack Trending listing service!\n\
    This Agent helps you to list your token on {} fast and secure.\n\
    \n\
    <b>FREE MASS DM promotion</b> sending to 112k users + 1 SolidSkull NFT free for 24Hours trending orders!\n\
    To avail contact {}\n\
    \n\
    <i>Let's start and Choose an Option:</i>",
    header(config, now, "✅"),
    config.links.verify_trend,
    config.support_contact,
  );

  Screen::with_buttons(text, main_menu())
}

pub fn chain_selection(config: &Config, now: DateTime<Local>) -> Screen {
  let currencies = ChainId::ALL
    .into_iter()
    .map(|chain| {
      let info = chain.descriptor();
      format!("• {} → {}", info.short_name, info.currency)
    })
    .collect::<Vec<String>>()
    .join("\n");

  let text = format!(
    "{}\n\
    {BOT_HANDLE}\n\
    Select the chain your token is on: {}\n\
    \n\
    <b>Each chain uses its native currency:</b>\n\
    {}",
    header(config, now, "▼"),
    clock_time(now),
    currencies,
  );

  let mut keyboard: Vec<Vec<Button>> = ChainId::ALL
    .into_iter()
    .map(|chain| {
      let info = chain.descriptor();
      vec![Button::callback(
        format!("{} {} ({})", info.icon, info.short_name, info.currency),
        Action::Chain(info.id),
      )]
    })
    .collect();
  keyboard.push(back_to_menu_row());

  Screen::with_buttons(text, keyboard)
}

fn duration_button(prices: &PriceTable, chain: ChainId, duration: BoostDuration, community: bool) -> Button {
  let bonus = match duration {
    BoostDuration::TwentyFourHours => "[+Mass Dm & NFT]",
    _ => "[+ Free NFT]",
  };

  Button::callback(
    format!(
      "⏱️ {} Hours - {} {} {}",
      duration.hours(),
      prices.display_price(duration, chain),
      chain.descriptor().currency,
      bonus
    ),
    Action::Duration {
      duration,
      community,
    },
  )
}

pub fn duration_selection(config: &Config, prices: &PriceTable, chain: ChainId) -> Screen {
  let info = chain.descriptor();
  let text = format!(
    "<b># TRENDING BOOST SERVICE</b>\n\
    \n\
    {RULE}\n\
    \n\
    <b>Chain:</b> {}\n\
    <b>Currency:</b> {}\n\
    <b>Network:</b> {}\n\
    \n\
    {RULE}\n\
    \n\
    <b>Free Mass DM promotion</b> sending to 112k users + 1 SolidSkull NFT free for 24Hours trending orders!\n\
    To avail contact {}\n\
    \n\
    <b>Select duration:</b>",
    info.name, info.currency, info.network, config.support_contact,
  );

  let mut keyboard: Vec<Vec<Button>> = BoostDuration::ALL
    .into_iter()
    .map(|duration| vec![duration_button(prices, chain, duration, false)])
    .collect();
  keyboard.push(vec![Button::callback("🔙 Back", Action::BackToChains)]);

  Screen::with_buttons(text, keyboard)
}

/// Community trending only runs on Solana
pub fn community_duration_selection(prices: &PriceTable) -> Screen {
  let listing = BoostDuration::ALL
    .into_iter()
    .map(|duration| format!("• {} Hours: {} SOL", duration.hours(), duration.base_price()))
    .collect::<Vec<String>>()
    .join("\n");

  let text = format!(
    "<b>👥 COMMUNITY TRENDING</b>\n\
    \n\
    {RULE}\n\
    \n\
    <i>Community Trending only supports Solana tokens</i>\n\
    \n\
    <b>Pricing (in SOL):</b>\n\
    {}\n\
    \n\
    {RULE}\n\
    \n\
    <b>Community benefits:</b>\n\
    • Promotion in community groups\n\
    • Still includes free NFT\n\
    \n\
    {RULE}\n\
    \n\
    <i>Select duration for Solana:</i>",
    listing,
  );

  let mut keyboard: Vec<Vec<Button>> = BoostDuration::ALL
    .into_iter()
    .map(|duration| vec![duration_button(prices, ChainId::Sol, duration, true)])
    .collect();
  keyboard.push(back_to_menu_row());

  Screen::with_buttons(text, keyboard)
}

pub fn token_address_prompt(
  prices: &PriceTable,
  chain: ChainId,
  duration: BoostDuration,
  now: DateTime<Local>,
) -> Screen {
  let info = chain.descriptor();
  Screen::text(format!(
    "<b># Skeleton Trending Boost Bot</b>\n\
    \n\
    {RULE}\n\
    \n\
    <b>Please send your token address:</b> {}\n\
    \n\
    {RULE}\n\
    \n\
    <b>Chain:</b> {}\n\
    <b>Duration:</b> {}\n\
    <b>Payment:</b> {} {}\n\
    \n\
    {RULE}\n\
    \n\
    <i>Send your token contract address:</i>",
    clock_time(now),
    info.name,
    duration.label(),
    prices.display_price(duration, chain),
    info.currency,
  ))
}

pub fn token_address_error() -> Screen {
  Screen::text("❌ Invalid token address. Please send a valid contract address:")
}

pub fn telegram_link_prompt(token_address: &str, now: DateTime<Local>) -> Screen {
  Screen::text(format!(
    "<b># Skeleton Trending Boost Bot</b>\n\
    \n\
    {RULE}\n\
    \n\
    <b>Token address received ✅</b>\n\
    <code>{}...</code>\n\
    \n\
    {RULE}\n\
    \n\
    <b>Please send the Telegram link:</b> {}\n\
    \n\
    <i>Format: https://t.me/yourchannel</i>\n\
    <i>Example: https://t.me/pandagenerate</i>",
    escape(&truncated(token_address, 50)),
    clock_time(now),
  ))
}

pub fn telegram_link_error() -> Screen {
  Screen::text("❌ Invalid Telegram link. Must start with https://t.me/\nPlease send a valid link:")
}

pub fn twitter_link_prompt(telegram_link: &str, now: DateTime<Local>) -> Screen {
  Screen::text(format!(
    "<b># Skeleton Trending Boost Bot</b>\n\
    \n\
    {RULE}\n\
    \n\
    <b>Telegram link received ✅</b>\n\
    {}\n\
    \n\
    {RULE}\n\
    \n\
    <b>Add your token Twitter [X] Link (optional):</b> {}\n\
    \n\
    Tokens with X link get posted on Skeletonecosys X Trending!\n\
    \n\
    <i>Send X link or type \"skip\" to skip:</i>\n\
    <i>Format: @username or full URL</i>",
    escape(telegram_link),
    clock_time(now),
  ))
}

pub fn order_summary(config: &Config, prices: &PriceTable, order: &CompletedOrder<'_>) -> Screen {
  let info = order.chain.descriptor();
  let amount = format_amount(prices.price(order.duration, order.chain), info.currency);
  let wallet = config.wallet(order.chain);
  let support = &config.support_contact;
  let order_id = order.order_id;

  let text = format!(
    "<b>✅ ORDER SUMMARY</b>\n\
    \n\
    {RULE}\n\
    \n\
    <b>📋 Order Details:</b>\n\
    • Order ID: <code>{order_id}</code>\n\
    • Chain: {}\n\
    • Duration: {}\n\
    • Currency: {}\n\
    • Amount: {amount} {}\n\
    \n\
    <b>📝 Token Info:</b>\n\
    • Address: <code>{}...</code>\n\
    • Telegram: {}\n\
    • Twitter: {}\n\
    \n\
    {RULE}\n\
    \n\
    <b>💰 Payment Information:</b>\n\
    • Send: {amount} {}\n\
    • To: <code>{}</code>\n\
    • Network: {}\n\
    • Memo: <code>{order_id}</code>\n\
    \n\
    {RULE}\n\
    \n\
    <b>🎁 Free Bonus:</b>\n\
    • SolidSkull NFT (all orders)\n\
    • Mass DM to 112k users (24h orders)\n\
    \n\
    {RULE}\n\
    \n\
    <b>📞 After Payment:</b>\n\
    1. Send payment screenshot\n\
    2. Contact: {support}\n\
    3. Include Order ID: <code>{order_id}</code>\n\
    4. Go live within 15 minutes!\n\
    \n\
    <b>Support:</b> {support}",
    info.name,
    order.duration.label(),
    info.currency,
    info.currency,
    escape(&truncated(order.token_address, 30)),
    escape(order.telegram_link),
    escape(order.twitter_link.display()),
    info.currency,
    escape(&wallet.address),
    wallet.network,
  );

  let keyboard = vec![
    vec![Button::callback("💳 I've Sent Payment", Action::PaymentSent)],
    vec![Button::url("📞 Contact Support", config.support_url())],
    vec![Button::callback("🔄 New Order", Action::NewOrder)],
  ];

  Screen::with_buttons(text, keyboard)
}

/// Support screen plus the alert text shown on the pressed button
pub fn payment_acknowledgement(config: &Config, order_id: Option<&str>) -> (Screen, String) {
  let order_id = order_id.unwrap_or("N/A");
  let alert = format!(
    "✅ Payment confirmed! Order ID: {}\nContact {} with screenshot.",
    order_id, config.support_contact
  );

  let text = format!(
    "<b>📞 CONTACT SUPPORT</b>\n\
    \n\
    {RULE}\n\
    \n\
    <b>Order ID:</b> <code>{}</code>\n\
    <b>Contact:</b> {}\n\
    \n\
    {RULE}\n\
    \n\
    <i>Send payment screenshot and order ID to go live!</i>",
    order_id, config.support_contact,
  );

  let keyboard = vec![
    vec![Button::url("📱 Message Support", config.support_url())],
    vec![Button::callback("🏠 Main Menu", Action::BackToMenu)],
  ];

  (Screen::with_buttons(text, keyboard), alert)
}

pub fn all_promotions(config: &Config) -> Screen {
  let text = format!(
    "<b>📊 ALL PROMOTION OPTIONS</b>\n\
    \n\
    {RULE}\n\
    \n\
    Join our official promotion group to see:\n\
    • All trending services\n\
    • Community promotions\n\
    • NFT minting info\n\
    • Special offers\n\
    • Live updates\n\
    \n\
    {RULE}\n\
    \n\
    <b>Click below to join:</b>"
  );

  Screen::with_buttons(
    text,
    vec![
      vec![Button::url("🎯 Join Promotion Group", config.links.promotion.clone())],
      back_to_menu_row(),
    ],
  )
}

pub fn mint_nft(config: &Config) -> Screen {
  let text = format!(
    "<b>💀 MINT SOLIDSKULL NFT</b>\n\
    \n\
    {RULE}\n\
    \n\
    <b>SolidSkull NFT Benefits:</b>\n\
    • Exclusive access to premium channels\n\
    • Priority support\n\
    • Voting rights in ecosystem\n\
    • Royalty sharing (5%)\n\
    • Free with all trending orders!\n\
    \n\
    {RULE}\n\
    \n\
    <b>To mint or learn more:</b>\n\
    Join our NFT community group:"
  );

  Screen::with_buttons(
    text,
    vec![
      vec![Button::url("💀 Join NFT Group", config.links.nft_minting.clone())],
      back_to_menu_row(),
    ],
  )
}
