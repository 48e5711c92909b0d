use chrono::{DateTime, Local};
use uuid::Uuid;

/// Source of wall-clock time. Only used for cosmetic timestamps and the
/// order creation stamp, never for control flow.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Local> {
    Local::now()
  }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

#[cfg(test)]
impl Clock for FixedClock {
  fn now(&self) -> DateTime<Local> {
    self.0
  }
}

// e.g. "ORD-3F9A0C1B"
pub fn new_order_id() -> String {
  let hex = Uuid::new_v4().simple().to_string();
  format!("ORD-{}", hex[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn order_ids_are_tagged_uppercase_hex() {
    let id = new_order_id();
    assert_eq!(id.len(), 12);
    assert!(id.starts_with("ORD-"));
    assert!(id[4..]
      .chars()
      .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
  }

  #[test]
  fn order_ids_differ() {
    assert_ne!(new_order_id(), new_order_id());
  }
}
