//! The order conversation as a state machine.
//!
//! [`Controller::handle`] takes the user's current [`ConversationState`] and
//! one inbound [`Event`], applies the resulting change to the session store
//! and returns the next state together with the [`Reply`] to deliver. It
//! never talks to Telegram itself.

use chrono::{DateTime, Local};
use teloxide::types::UserId;

use crate::config::Config;
use crate::errors::{InputError, SessionError};
use crate::pricing::{BoostDuration, ChainId, PriceTable};
use crate::screens::{self, Screen};
use crate::session::{OrderStatus, SessionStore, TwitterLink};
use crate::types::ConversationState;
use crate::util::{new_order_id, Clock};

pub const MIN_TOKEN_ADDRESS_LEN: usize = 10;

/// What an inline button asks for. Round-trips through callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  MainBoost,
  CommunityBoost,
  AllPromotions,
  MintNft,
  Chain(ChainId),
  Duration {
    duration: BoostDuration,
    community: bool,
  },
  BackToMenu,
  BackToChains,
  PaymentSent,
  NewOrder,
}

impl Action {
  pub fn callback_data(&self) -> String {
    match self {
      Action::MainBoost => "main_boost".to_string(),
      Action::CommunityBoost => "community_boost".to_string(),
      Action::AllPromotions => "all_promotions".to_string(),
      Action::MintNft => "mint_nft".to_string(),
      Action::Chain(chain) => format!("chain_{}", chain.key()),
      Action::Duration {
        duration,
        community: false,
      } => format!("duration_{}", duration.key()),
      Action::Duration {
        duration,
        community: true,
      } => format!("duration_{}_community", duration.key()),
      Action::BackToMenu => "back_to_menu".to_string(),
      Action::BackToChains => "back_to_chains".to_string(),
      Action::PaymentSent => "payment_sent".to_string(),
      Action::NewOrder => "new_order".to_string(),
    }
  }

  pub fn parse(data: &str) -> Option<Action> {
    let action = match data {
      "main_boost" => Action::MainBoost,
      "community_boost" => Action::CommunityBoost,
      "all_promotions" => Action::AllPromotions,
      "mint_nft" => Action::MintNft,
      "back_to_menu" => Action::BackToMenu,
      "back_to_chains" => Action::BackToChains,
      "payment_sent" => Action::PaymentSent,
      "new_order" => Action::NewOrder,
      _ => {
        if let Some(chain) = data.strip_prefix("chain_") {
          return ChainId::from_key(chain).map(Action::Chain);
        }

        let duration = data.strip_prefix("duration_")?;
        return match duration.strip_suffix("_community") {
          Some(duration) => BoostDuration::from_key(duration).map(|duration| Action::Duration {
            duration,
            community: true,
          }),
          None => BoostDuration::from_key(duration).map(|duration| Action::Duration {
            duration,
            community: false,
          }),
        };
      }
    };

    Some(action)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
  Start,
  Button(Action),
  Text(String),
  /// Unknown commands, unknown callback data, non-text messages
  Unrecognized,
}

/// Who sent the event
#[derive(Debug, Clone)]
pub struct Sender {
  pub id: UserId,
  pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
  /// Post a new message
  Send,
  /// Replace the message carrying the pressed button
  Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
  pub screen: Screen,
  pub delivery: Delivery,
  /// Shown as a popup on the pressed button
  pub alert: Option<String>,
}

impl Reply {
  pub fn send(screen: Screen) -> Self {
    Reply {
      screen,
      delivery: Delivery::Send,
      alert: None,
    }
  }

  pub fn edit(screen: Screen) -> Self {
    Reply {
      screen,
      delivery: Delivery::Edit,
      alert: None,
    }
  }

  fn with_alert(mut self, alert: String) -> Self {
    self.alert = Some(alert);
    self
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
  pub next: ConversationState,
  pub reply: Reply,
}

impl Transition {
  fn to(next: ConversationState, reply: Reply) -> Self {
    Transition { next, reply }
  }
}

pub fn validate_token_address(input: &str) -> Result<String, InputError> {
  let address = input.trim();
  let len = address.chars().count();
  if len < MIN_TOKEN_ADDRESS_LEN {
    return Err(InputError::TokenAddressTooShort {
      min: MIN_TOKEN_ADDRESS_LEN,
      got: len,
    });
  }
  Ok(address.to_string())
}

pub fn validate_telegram_link(input: &str) -> Result<String, InputError> {
  let link = input.trim();
  if link.starts_with("https://t.me/") || link.starts_with("t.me/") {
    Ok(link.to_string())
  } else {
    Err(InputError::InvalidTelegramLink)
  }
}

pub fn parse_twitter_link(input: &str) -> TwitterLink {
  let link = input.trim();
  if link.is_empty() || link.eq_ignore_ascii_case("skip") {
    TwitterLink::NotProvided
  } else {
    TwitterLink::Link(link.to_string())
  }
}

pub struct Controller<'a> {
  pub store: &'a dyn SessionStore,
  pub config: &'a Config,
  pub prices: &'a PriceTable,
  pub clock: &'a dyn Clock,
}

impl Controller<'_> {
  pub fn handle(
    &self,
    sender: &Sender,
    state: ConversationState,
    event: Event,
  ) -> Result<Transition, SessionError> {
    let now = self.clock.now();

    if event == Event::Start {
      return self.start(sender, now);
    }

    if self.store.ensure(sender.id, &sender.display_name, now) {
      log::warn!(
        "No session for user {:?} in state {:?}, created one",
        sender.id,
        state
      );
    }

    log::debug!("User {:?} in {:?} sent {:?}", sender.id, state, event);

    let delivery = match event {
      Event::Button(_) => Delivery::Edit,
      _ => Delivery::Send,
    };

    use ConversationState as S;
    let transition = match (state, event) {
      (S::MainMenu, Event::Button(Action::MainBoost)) => Transition::to(
        S::SelectChain,
        Reply::edit(screens::chain_selection(self.config, now)),
      ),
      (S::MainMenu, Event::Button(Action::CommunityBoost)) => {
        self
          .store
          .mutate_order(sender.id, &mut |order| order.chain = Some(ChainId::Sol))?;
        Transition::to(
          S::SelectDuration,
          Reply::edit(screens::community_duration_selection(self.prices)),
        )
      }
      (S::MainMenu, Event::Button(Action::AllPromotions)) => Transition::to(
        S::MainMenu,
        Reply::edit(screens::all_promotions(self.config)),
      ),
      (S::MainMenu, Event::Button(Action::MintNft)) => {
        Transition::to(S::MainMenu, Reply::edit(screens::mint_nft(self.config)))
      }
      (S::MainMenu, Event::Button(Action::PaymentSent)) => self.payment_sent(sender)?,
      (S::MainMenu, Event::Button(Action::NewOrder)) => {
        self.store.reset_order(sender.id)?;
        Transition::to(
          S::SelectChain,
          Reply::edit(screens::chain_selection(self.config, now)),
        )
      }
      (S::MainMenu | S::SelectChain | S::SelectDuration, Event::Button(Action::BackToMenu)) => {
        Transition::to(S::MainMenu, Reply::edit(screens::welcome(self.config, now)))
      }
      (S::SelectChain, Event::Button(Action::Chain(chain))) => {
        self
          .store
          .mutate_order(sender.id, &mut |order| order.chain = Some(chain))?;
        Transition::to(
          S::SelectDuration,
          Reply::edit(screens::duration_selection(self.config, self.prices, chain)),
        )
      }
      (S::SelectDuration, Event::Button(Action::BackToChains)) => Transition::to(
        S::SelectChain,
        Reply::edit(screens::chain_selection(self.config, now)),
      ),
      (
        S::SelectDuration,
        Event::Button(Action::Duration {
          duration,
          community,
        }),
      ) => self.select_duration(sender, duration, community, now)?,
      (S::TokenAddress, Event::Text(text)) => match validate_token_address(&text) {
        Ok(address) => {
          let screen = screens::telegram_link_prompt(&address, now);
          self
            .store
            .mutate_order(sender.id, &mut |order| order.token_address = Some(address.clone()))?;
          Transition::to(S::TelegramLink, Reply::send(screen))
        }
        Err(err) => {
          log::debug!("Rejected token address from {:?}: {}", sender.id, err);
          Transition::to(S::TokenAddress, Reply::send(screens::token_address_error()))
        }
      },
      (S::TelegramLink, Event::Text(text)) => match validate_telegram_link(&text) {
        Ok(link) => {
          let screen = screens::twitter_link_prompt(&link, now);
          self
            .store
            .mutate_order(sender.id, &mut |order| order.telegram_link = Some(link.clone()))?;
          Transition::to(S::TwitterLink, Reply::send(screen))
        }
        Err(err) => {
          log::debug!("Rejected telegram link from {:?}: {}", sender.id, err);
          Transition::to(S::TelegramLink, Reply::send(screens::telegram_link_error()))
        }
      },
      (S::TwitterLink, Event::Text(text)) => self.complete_order(sender, &text, now)?,
      (S::MainMenu, Event::Text(text)) if text.trim().eq_ignore_ascii_case("start") => {
        self.start(sender, now)?
      }
      (_, _) => self.fallback(delivery, now),
    };

    Ok(transition)
  }

  /// Where a user lands when their reply could not be delivered: a fresh
  /// welcome message and the main menu.
  pub fn recover(&self) -> Transition {
    self.fallback(Delivery::Send, self.clock.now())
  }

  fn start(&self, sender: &Sender, now: DateTime<Local>) -> Result<Transition, SessionError> {
    self.store.ensure(sender.id, &sender.display_name, now);
    self.store.set_display_name(sender.id, &sender.display_name)?;

    let profile = self.store.get_profile(sender.id)?;
    log::info!(
      "User {:?} ({}) started the bot, first seen {}",
      sender.id,
      profile.display_name,
      profile.first_seen.format("%Y-%m-%d %H:%M")
    );

    Ok(Transition::to(
      ConversationState::MainMenu,
      Reply::send(screens::welcome(self.config, now)),
    ))
  }

  fn fallback(&self, delivery: Delivery, now: DateTime<Local>) -> Transition {
    let reply = Reply {
      screen: screens::welcome(self.config, now),
      delivery,
      alert: None,
    };
    Transition::to(ConversationState::MainMenu, reply)
  }

  fn select_duration(
    &self,
    sender: &Sender,
    duration: BoostDuration,
    community: bool,
    now: DateTime<Local>,
  ) -> Result<Transition, SessionError> {
    let chain = if community {
      Some(ChainId::Sol)
    } else {
      self.store.get_order(sender.id)?.chain
    };
    let Some(chain) = chain else {
      log::warn!("User {:?} picked a duration without a chain", sender.id);
      return Ok(self.fallback(Delivery::Edit, now));
    };

    self.store.mutate_order(sender.id, &mut |order| {
      order.chain = Some(chain);
      order.duration = Some(duration);
    })?;

    Ok(Transition::to(
      ConversationState::TokenAddress,
      Reply::edit(screens::token_address_prompt(self.prices, chain, duration, now)),
    ))
  }

  fn complete_order(
    &self,
    sender: &Sender,
    text: &str,
    now: DateTime<Local>,
  ) -> Result<Transition, SessionError> {
    let mut draft = self.store.get_order(sender.id)?;
    draft.twitter_link = Some(parse_twitter_link(text));
    draft.created_at = Some(now);
    draft.order_id = Some(new_order_id());

    // Nothing is written unless the whole order is there
    let Some(completed) = draft.completed() else {
      log::warn!("Order of user {:?} is incomplete: {:?}", sender.id, draft);
      return Ok(self.fallback(Delivery::Send, now));
    };

    self.store.mutate_order(sender.id, &mut |order| {
      order.twitter_link = draft.twitter_link.clone();
      order.created_at = draft.created_at;
      order.order_id = draft.order_id.clone();
    })?;

    log::info!(
      "Order {} created for user {:?}: {} on {} at {:?}",
      completed.order_id,
      sender.id,
      completed.duration.label(),
      completed.chain.descriptor().name,
      draft.created_at
    );

    Ok(Transition::to(
      ConversationState::MainMenu,
      Reply::send(screens::order_summary(self.config, self.prices, &completed)),
    ))
  }

  fn payment_sent(&self, sender: &Sender) -> Result<Transition, SessionError> {
    let mut order_id = None;
    self.store.mutate_order(sender.id, &mut |order| {
      if order.order_id.is_some() && order.status == OrderStatus::Pending {
        log::info!("User {:?} reports payment for {:?}", sender.id, order.order_id);
        order.status = OrderStatus::Confirmed;
      }
      order_id = order.order_id.clone();
    })?;

    let (screen, alert) = screens::payment_acknowledgement(self.config, order_id.as_deref());
    Ok(Transition::to(
      ConversationState::MainMenu,
      Reply::edit(screen).with_alert(alert),
    ))
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::config::test_config;
  use crate::session::{InMemorySessionStore, Order};
  use crate::util::FixedClock;

  struct Harness {
    store: InMemorySessionStore,
    config: Config,
    prices: PriceTable,
    clock: FixedClock,
    state: ConversationState,
    sender: Sender,
  }

  impl Harness {
    fn new() -> Self {
      Harness {
        store: InMemorySessionStore::new(),
        config: test_config(),
        prices: PriceTable::new(),
        clock: FixedClock(Local.with_ymd_and_hms(2026, 10, 16, 14, 5, 0).unwrap()),
        state: ConversationState::default(),
        sender: Sender {
          id: UserId(1001),
          display_name: "tester".to_string(),
        },
      }
    }

    fn send(&mut self, event: Event) -> Reply {
      let controller = Controller {
        store: &self.store,
        config: &self.config,
        prices: &self.prices,
        clock: &self.clock,
      };
      let transition = controller
        .handle(&self.sender, self.state.clone(), event)
        .unwrap();
      self.state = transition.next;
      transition.reply
    }

    fn press(&mut self, data: &str) -> Reply {
      self.send(Event::Button(Action::parse(data).unwrap()))
    }

    fn text(&mut self, text: &str) -> Reply {
      self.send(Event::Text(text.to_string()))
    }

    fn order(&self) -> Order {
      self.store.get_order(self.sender.id).unwrap()
    }
  }

  #[test]
  fn callback_data_round_trips() {
    let mut actions = vec![
      Action::MainBoost,
      Action::CommunityBoost,
      Action::AllPromotions,
      Action::MintNft,
      Action::BackToMenu,
      Action::BackToChains,
      Action::PaymentSent,
      Action::NewOrder,
    ];
    actions.extend(ChainId::ALL.map(Action::Chain));
    for duration in BoostDuration::ALL {
      actions.push(Action::Duration { duration, community: false });
      actions.push(Action::Duration { duration, community: true });
    }

    for action in actions {
      assert_eq!(Action::parse(&action.callback_data()), Some(action));
    }
  }

  #[test]
  fn parses_original_callback_names() {
    assert_eq!(Action::parse("chain_sol"), Some(Action::Chain(ChainId::Sol)));
    assert_eq!(
      Action::parse("duration_24_hours_community"),
      Some(Action::Duration {
        duration: BoostDuration::TwentyFourHours,
        community: true
      })
    );
    assert_eq!(Action::parse("chain_doge"), None);
    assert_eq!(Action::parse("duration_1_hours"), None);
    assert_eq!(Action::parse("something_else"), None);
  }

  #[test]
  fn token_address_validation() {
    assert!(validate_token_address("short").is_err());
    assert!(validate_token_address("123456789").is_err());
    assert_eq!(validate_token_address("1234567890").unwrap(), "1234567890");
    assert_eq!(validate_token_address("  0xabcdef1234  ").unwrap(), "0xabcdef1234");
    assert_eq!(
      validate_token_address("   abc   "),
      Err(InputError::TokenAddressTooShort { min: 10, got: 3 })
    );
  }

  #[test]
  fn telegram_link_validation() {
    assert!(validate_telegram_link("https://t.me/example").is_ok());
    assert!(validate_telegram_link("t.me/example").is_ok());
    assert!(validate_telegram_link("http://t.me/example").is_err());
    assert!(validate_telegram_link("HTTPS://T.ME/example").is_err());
    assert!(validate_telegram_link("https://telegram.me/example").is_err());
    assert!(validate_telegram_link("example").is_err());
  }

  #[test]
  fn twitter_skip_in_any_case() {
    assert_eq!(parse_twitter_link("skip"), TwitterLink::NotProvided);
    assert_eq!(parse_twitter_link("SkIp"), TwitterLink::NotProvided);
    assert_eq!(
      parse_twitter_link("https://x.com/token"),
      TwitterLink::Link("https://x.com/token".to_string())
    );
    assert_eq!(
      parse_twitter_link("@token"),
      TwitterLink::Link("@token".to_string())
    );
  }

  #[test]
  fn main_boost_flow_reaches_summary() {
    let mut h = Harness::new();

    let reply = h.send(Event::Start);
    assert_eq!(reply.delivery, Delivery::Send);
    assert_eq!(h.state, ConversationState::MainMenu);

    h.press("main_boost");
    assert_eq!(h.state, ConversationState::SelectChain);

    h.press("chain_sol");
    assert_eq!(h.state, ConversationState::SelectDuration);
    assert_eq!(h.order().chain, Some(ChainId::Sol));

    let reply = h.press("duration_24_hours");
    assert_eq!(h.state, ConversationState::TokenAddress);
    assert_eq!(reply.delivery, Delivery::Edit);
    assert!(reply.screen.text.contains("<b>Payment:</b> 5.25 SOL"));

    h.text("So11111111111111111111111111111111111111112");
    assert_eq!(h.state, ConversationState::TelegramLink);

    h.text("https://t.me/example");
    assert_eq!(h.state, ConversationState::TwitterLink);

    let summary = h.text("skip");
    assert_eq!(h.state, ConversationState::MainMenu);

    let text = &summary.screen.text;
    assert!(text.contains("• Chain: Solana"));
    assert!(text.contains("• Duration: 24 hours"));
    assert!(text.contains("• Amount: 5.25 SOL"));
    assert!(text.contains("• Twitter: Not provided"));

    let order = h.order();
    let order_id = order.order_id.clone().unwrap();
    assert!(order_id.starts_with("ORD-"));
    assert_eq!(order_id.len(), 12);
    assert!(order_id[4..]
      .chars()
      .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    assert!(text.contains(&format!("<code>{}</code>", order_id)));
    assert_eq!(order.twitter_link, Some(TwitterLink::NotProvided));
    assert_eq!(order.created_at, Some(h.clock.0));
    assert_eq!(order.status, OrderStatus::Pending);
  }

  #[test]
  fn community_flow_forces_solana() {
    let mut h = Harness::new();
    h.send(Event::Start);

    h.press("community_boost");
    assert_eq!(h.state, ConversationState::SelectDuration);
    assert_eq!(h.order().chain, Some(ChainId::Sol));

    h.press("duration_8_hours_community");
    assert_eq!(h.state, ConversationState::TokenAddress);
    assert_eq!(h.order().duration, Some(BoostDuration::EightHours));

    h.text("So11111111111111111111111111111111111111112");
    h.text("t.me/community");
    let summary = h.text("https://x.com/community");

    assert!(summary.screen.text.contains("• Amount: 2.70 SOL"));
    assert!(summary.screen.text.contains("• Twitter: https://x.com/community"));
    assert_eq!(
      h.order().twitter_link,
      Some(TwitterLink::Link("https://x.com/community".to_string()))
    );
  }

  #[test]
  fn short_token_address_is_rejected_in_place() {
    let mut h = Harness::new();
    h.send(Event::Start);
    h.press("main_boost");
    h.press("chain_sol");
    h.press("duration_24_hours");

    let reply = h.text("short");

    assert_eq!(h.state, ConversationState::TokenAddress);
    assert_eq!(reply.screen, screens::token_address_error());
    assert_eq!(h.order().token_address, None);
    assert_eq!(h.order().chain, Some(ChainId::Sol));

    // No retry limit
    h.text("tiny");
    h.text("x");
    assert_eq!(h.state, ConversationState::TokenAddress);
    h.text("So11111111111111111111111111111111111111112");
    assert_eq!(h.state, ConversationState::TelegramLink);
  }

  #[test]
  fn bad_telegram_link_keeps_token_address() {
    let mut h = Harness::new();
    h.send(Event::Start);
    h.press("main_boost");
    h.press("chain_eth");
    h.press("duration_4_hours");
    h.text("0x1234567890abcdef");

    let reply = h.text("https://twitter.com/nope");

    assert_eq!(h.state, ConversationState::TelegramLink);
    assert_eq!(reply.screen, screens::telegram_link_error());
    assert_eq!(h.order().token_address.as_deref(), Some("0x1234567890abcdef"));
    assert_eq!(h.order().telegram_link, None);
  }

  #[test]
  fn back_buttons_navigate() {
    let mut h = Harness::new();
    h.send(Event::Start);
    h.press("main_boost");
    h.press("back_to_menu");
    assert_eq!(h.state, ConversationState::MainMenu);

    h.press("main_boost");
    h.press("chain_bsc");
    h.press("back_to_chains");
    assert_eq!(h.state, ConversationState::SelectChain);
  }

  #[test]
  fn new_order_resets_and_shows_chains() {
    let mut h = Harness::new();
    h.send(Event::Start);
    h.press("main_boost");
    h.press("chain_base");
    h.press("duration_12_hours");
    h.text("0xbase000000000000");
    h.text("https://t.me/base");
    h.text("skip");
    let profile = h.store.get_profile(h.sender.id).unwrap();

    h.press("new_order");

    assert_eq!(h.state, ConversationState::SelectChain);
    assert_eq!(h.order(), Order::default());
    assert_eq!(h.store.get_profile(h.sender.id).unwrap(), profile);
  }

  #[test]
  fn payment_sent_confirms_and_alerts() {
    let mut h = Harness::new();
    h.send(Event::Start);
    h.press("main_boost");
    h.press("chain_fourmeme");
    h.press("duration_4_hours");
    h.text("0xfourmeme00000000");
    h.text("https://t.me/fourmeme");
    h.text("skip");
    let order_id = h.order().order_id.unwrap();

    let reply = h.press("payment_sent");

    assert_eq!(h.state, ConversationState::MainMenu);
    assert_eq!(h.order().status, OrderStatus::Confirmed);
    let alert = reply.alert.unwrap();
    assert!(alert.contains(&order_id));
    assert!(reply.screen.text.contains(&order_id));
  }

  #[test]
  fn unexpected_events_fall_back_to_welcome() {
    let mut h = Harness::new();
    h.send(Event::Start);
    let welcome = screens::welcome(&h.config, h.clock.0);

    let reply = h.text("hello there");
    assert_eq!(h.state, ConversationState::MainMenu);
    assert_eq!(reply.screen, welcome);
    assert_eq!(reply.delivery, Delivery::Send);

    h.press("main_boost");
    let reply = h.text("typing in chain selection");
    assert_eq!(h.state, ConversationState::MainMenu);
    assert_eq!(reply.screen, welcome);

    h.press("main_boost");
    h.press("chain_sol");
    h.press("duration_4_hours");
    let reply = h.send(Event::Unrecognized);
    assert_eq!(h.state, ConversationState::MainMenu);
    assert_eq!(reply.delivery, Delivery::Send);

    h.press("main_boost");
    let reply = h.press("payment_sent");
    assert_eq!(h.state, ConversationState::MainMenu);
    assert_eq!(reply.screen, welcome);
    assert_eq!(reply.delivery, Delivery::Edit);
  }

  #[test]
  fn start_restarts_from_any_state() {
    let mut h = Harness::new();
    h.send(Event::Start);
    h.press("main_boost");
    h.press("chain_sol");
    h.press("duration_4_hours");

    h.send(Event::Start);
    assert_eq!(h.state, ConversationState::MainMenu);
    // The partially filled order is kept until "new order"
    assert_eq!(h.order().duration, Some(BoostDuration::FourHours));
  }

  #[test]
  fn first_event_without_start_creates_session() {
    let mut h = Harness::new();
    assert_eq!(h.store.session_count(), 0);

    h.press("main_boost");

    assert_eq!(h.store.session_count(), 1);
    assert_eq!(h.state, ConversationState::SelectChain);
    assert_eq!(h.store.get_profile(h.sender.id).unwrap().display_name, "tester");
  }

  #[test]
  fn start_refreshes_display_name() {
    let mut h = Harness::new();
    h.send(Event::Start);
    h.sender.display_name = "renamed".to_string();
    h.send(Event::Start);
    assert_eq!(h.store.get_profile(h.sender.id).unwrap().display_name, "renamed");
  }

  #[test]
  fn incomplete_order_gets_no_id() {
    let mut h = Harness::new();
    // Dialogue and session can drift apart, e.g. "new order" pressed in
    // another chat while this one waits for the Twitter link
    h.state = ConversationState::TwitterLink;

    let reply = h.text("skip");

    assert_eq!(h.state, ConversationState::MainMenu);
    assert_eq!(reply.screen, screens::welcome(&h.config, h.clock.0));
    assert_eq!(h.order(), Order::default());
    assert_eq!(h.store.completed_order_count(), 0);

    let reply = h.press("payment_sent");
    assert_eq!(h.order().status, OrderStatus::Pending);
    assert!(reply.alert.unwrap().contains("N/A"));
  }

  #[test]
  fn duration_without_chain_is_not_stored() {
    let mut h = Harness::new();
    h.send(Event::Start);
    h.state = ConversationState::SelectDuration;

    let reply = h.press("duration_12_hours");

    assert_eq!(h.state, ConversationState::MainMenu);
    assert_eq!(reply.delivery, Delivery::Edit);
    assert_eq!(h.order().duration, None);
    assert_eq!(h.order().chain, None);
  }

  #[test]
  fn recover_sends_a_fresh_welcome() {
    let h = Harness::new();
    let controller = Controller {
      store: &h.store,
      config: &h.config,
      prices: &h.prices,
      clock: &h.clock,
    };

    let transition = controller.recover();

    assert_eq!(transition.next, ConversationState::MainMenu);
    assert_eq!(transition.reply.delivery, Delivery::Send);
    assert_eq!(transition.reply.screen, screens::welcome(&h.config, h.clock.0));
    assert_eq!(transition.reply.alert, None);
  }
}
