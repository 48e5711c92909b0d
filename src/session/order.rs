use chrono::{DateTime, Local};

use crate::pricing::{BoostDuration, ChainId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderStatus {
  #[default]
  Pending,
  /// The user pressed "payment sent". Nothing verifies the payment.
  Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwitterLink {
  NotProvided,
  Link(String),
}

impl TwitterLink {
  pub fn display(&self) -> &str {
    match self {
      TwitterLink::NotProvided => "Not provided",
      TwitterLink::Link(link) => link,
    }
  }
}

/// The order a user is currently filling in. Fields are populated in
/// conversation order and wiped by "new order".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
  pub chain: Option<ChainId>,
  pub duration: Option<BoostDuration>,
  pub token_address: Option<String>,
  pub telegram_link: Option<String>,
  pub twitter_link: Option<TwitterLink>,
  pub created_at: Option<DateTime<Local>>,
  pub status: OrderStatus,
  pub order_id: Option<String>,
}

/// Borrowed view of an order with every field needed for the summary screen.
#[derive(Debug, Clone, Copy)]
pub struct CompletedOrder<'a> {
  pub order_id: &'a str,
  pub chain: ChainId,
  pub duration: BoostDuration,
  pub token_address: &'a str,
  pub telegram_link: &'a str,
  pub twitter_link: &'a TwitterLink,
}

impl Order {
  pub fn completed(&self) -> Option<CompletedOrder<'_>> {
    Some(CompletedOrder {
      order_id: self.order_id.as_deref()?,
      chain: self.chain?,
      duration: self.duration?,
      token_address: self.token_address.as_deref()?,
      telegram_link: self.telegram_link.as_deref()?,
      twitter_link: self.twitter_link.as_ref()?,
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
  pub display_name: String,
  // Never incremented; kept so a persistent store can fill them in later
  #[allow(dead_code)]
  pub order_count: u32,
  #[allow(dead_code)]
  pub total_spent: f64,
  pub first_seen: DateTime<Local>,
}

impl Profile {
  pub fn new(display_name: &str, first_seen: DateTime<Local>) -> Self {
    Profile {
      display_name: display_name.to_string(),
      order_count: 0,
      total_spent: 0.0,
      first_seen,
    }
  }
}
