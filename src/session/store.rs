use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};
use teloxide::types::UserId;

use super::{Order, Profile};
use crate::errors::SessionError;

/// Per-user order and profile records.
///
/// Implementations only need to be consistent per user; the conversation
/// never runs two events for the same user at once.
pub trait SessionStore: Send + Sync {
  /// Creates an empty order and a profile for `user_id` if there is none yet.
  /// Returns `true` when a session was created.
  fn ensure(&self, user_id: UserId, display_name: &str, now: DateTime<Local>) -> bool;

  fn get_order(&self, user_id: UserId) -> Result<Order, SessionError>;

  fn mutate_order(
    &self,
    user_id: UserId,
    mutate: &mut dyn FnMut(&mut Order),
  ) -> Result<(), SessionError>;

  /// Replaces the order with an empty one. The profile is kept.
  fn reset_order(&self, user_id: UserId) -> Result<(), SessionError>;

  fn get_profile(&self, user_id: UserId) -> Result<Profile, SessionError>;

  fn set_display_name(&self, user_id: UserId, display_name: &str) -> Result<(), SessionError>;

  fn session_count(&self) -> usize;

  /// Sessions whose current order has been assigned an order id
  fn completed_order_count(&self) -> usize;
}

#[derive(Debug)]
struct Session {
  order: Order,
  profile: Profile,
}

/// Process-local store. Everything is lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
  sessions: Mutex<HashMap<UserId, Session>>,
}

impl InMemorySessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  // A panic while holding the lock cannot leave a session half-written,
  // every mutation is a single assignment.
  fn sessions(&self) -> MutexGuard<'_, HashMap<UserId, Session>> {
    self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn with_session<R>(
    &self,
    user_id: UserId,
    f: impl FnOnce(&mut Session) -> R,
  ) -> Result<R, SessionError> {
    let mut sessions = self.sessions();
    let session = sessions
      .get_mut(&user_id)
      .ok_or(SessionError::NotFound(user_id))?;
    Ok(f(session))
  }
}

impl SessionStore for InMemorySessionStore {
  fn ensure(&self, user_id: UserId, display_name: &str, now: DateTime<Local>) -> bool {
    let mut sessions = self.sessions();
    if sessions.contains_key(&user_id) {
      return false;
    }

    log::debug!("Creating session for user {:?}", user_id);

    sessions.insert(
      user_id,
      Session {
        order: Order::default(),
        profile: Profile::new(display_name, now),
      },
    );
    true
  }

  fn get_order(&self, user_id: UserId) -> Result<Order, SessionError> {
    self.with_session(user_id, |session| session.order.clone())
  }

  fn mutate_order(
    &self,
    user_id: UserId,
    mutate: &mut dyn FnMut(&mut Order),
  ) -> Result<(), SessionError> {
    self.with_session(user_id, |session| mutate(&mut session.order))
  }

  fn reset_order(&self, user_id: UserId) -> Result<(), SessionError> {
    log::debug!("Resetting order for user {:?}", user_id);
    self.with_session(user_id, |session| session.order = Order::default())
  }

  fn get_profile(&self, user_id: UserId) -> Result<Profile, SessionError> {
    self.with_session(user_id, |session| session.profile.clone())
  }

  fn set_display_name(&self, user_id: UserId, display_name: &str) -> Result<(), SessionError> {
    self.with_session(user_id, |session| {
      session.profile.display_name = display_name.to_string()
    })
  }

  fn session_count(&self) -> usize {
    self.sessions().len()
  }

  fn completed_order_count(&self) -> usize {
    self
      .sessions()
      .values()
      .filter(|session| session.order.order_id.is_some())
      .count()
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::pricing::{BoostDuration, ChainId};

  fn at(hour: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 16, hour, 0, 0).unwrap()
  }

  #[test]
  fn ensure_is_idempotent() {
    let store = InMemorySessionStore::new();
    let user = UserId(7);

    assert!(store.ensure(user, "alice", at(9)));
    store
      .mutate_order(user, &mut |order| order.chain = Some(ChainId::Eth))
      .unwrap();
    let order = store.get_order(user).unwrap();
    let profile = store.get_profile(user).unwrap();

    assert!(!store.ensure(user, "mallory", at(10)));
    assert_eq!(store.get_order(user).unwrap(), order);
    assert_eq!(store.get_profile(user).unwrap(), profile);
    assert_eq!(store.session_count(), 1);
  }

  #[test]
  fn unknown_user_is_not_found() {
    let store = InMemorySessionStore::new();
    assert_eq!(store.get_order(UserId(1)), Err(SessionError::NotFound(UserId(1))));
    assert_eq!(store.reset_order(UserId(1)), Err(SessionError::NotFound(UserId(1))));
  }

  #[test]
  fn reset_clears_order_but_keeps_profile() {
    let store = InMemorySessionStore::new();
    let user = UserId(3);
    store.ensure(user, "bob", at(8));
    store
      .mutate_order(user, &mut |order| {
        order.chain = Some(ChainId::Sol);
        order.duration = Some(BoostDuration::FourHours);
        order.token_address = Some("So11111111111111111111111111111111111111112".to_string());
        order.order_id = Some("ORD-DEADBEEF".to_string());
      })
      .unwrap();
    let profile = store.get_profile(user).unwrap();
    assert_eq!(store.completed_order_count(), 1);

    store.reset_order(user).unwrap();

    assert_eq!(store.get_order(user).unwrap(), Order::default());
    assert_eq!(store.get_profile(user).unwrap(), profile);
    assert_eq!(store.completed_order_count(), 0);
  }

  #[test]
  fn display_name_can_be_refreshed() {
    let store = InMemorySessionStore::new();
    let user = UserId(5);
    store.ensure(user, "old", at(8));
    store.set_display_name(user, "new").unwrap();

    let profile = store.get_profile(user).unwrap();
    assert_eq!(profile.display_name, "new");
    assert_eq!(profile.first_seen, at(8));
    assert_eq!(profile.order_count, 0);
  }
}
