use std::collections::HashMap;

/// Settlement networks a boost can be ordered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainId {
  Bsc,
  Eth,
  Sol,
  Base,
  PumpFun,
  Possum,
  FourMeme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainDescriptor {
  pub id: ChainId,
  pub name: &'static str,
  pub short_name: &'static str,
  pub currency: &'static str,
  pub network: &'static str,
  pub icon: &'static str,
  /// Multiplier applied to the SOL denominated base price
  pub conversion_rate: f64,
}

static BSC: ChainDescriptor = ChainDescriptor {
  id: ChainId::Bsc,
  name: "Binance Smart Chain",
  short_name: "BSC",
  currency: "BNB",
  network: "BEP20",
  icon: "🔗",
  conversion_rate: 0.45,
};

static ETH: ChainDescriptor = ChainDescriptor {
  id: ChainId::Eth,
  name: "Ethereum",
  short_name: "Ethereum",
  currency: "ETH",
  network: "ERC20",
  icon: "🟦",
  conversion_rate: 0.05,
};

static SOL: ChainDescriptor = ChainDescriptor {
  id: ChainId::Sol,
  name: "Solana",
  short_name: "Solana",
  currency: "SOL",
  network: "Solana",
  icon: "🟪",
  conversion_rate: 1.0,
};

static BASE: ChainDescriptor = ChainDescriptor {
  id: ChainId::Base,
  name: "Base",
  short_name: "Base",
  currency: "ETH",
  network: "Base",
  icon: "⚪",
  conversion_rate: 0.05,
};

static PUMPFUN: ChainDescriptor = ChainDescriptor {
  id: ChainId::PumpFun,
  name: "PumpFun Trending",
  short_name: "PumpFun",
  currency: "SOL",
  network: "Solana",
  icon: "🔥",
  conversion_rate: 1.0,
};

static POSSUM: ChainDescriptor = ChainDescriptor {
  id: ChainId::Possum,
  name: "Possumlabs Trending",
  short_name: "Possumlabs",
  currency: "SOL",
  network: "Solana",
  icon: "🦝",
  conversion_rate: 1.0,
};

static FOURMEME: ChainDescriptor = ChainDescriptor {
  id: ChainId::FourMeme,
  name: "FourMeme Trending",
  short_name: "FourMeme",
  currency: "BNB",
  network: "BEP20",
  icon: "🎭",
  conversion_rate: 0.45,
};

impl ChainId {
  pub const ALL: [ChainId; 7] = [
    ChainId::Bsc,
    ChainId::Eth,
    ChainId::Sol,
    ChainId::Base,
    ChainId::PumpFun,
    ChainId::Possum,
    ChainId::FourMeme,
  ];

  /// Identifier used in callback data and wallet configuration
  pub fn key(self) -> &'static str {
    match self {
      ChainId::Bsc => "bsc",
      ChainId::Eth => "eth",
      ChainId::Sol => "sol",
      ChainId::Base => "base",
      ChainId::PumpFun => "pumpfun",
      ChainId::Possum => "possum",
      ChainId::FourMeme => "fourmeme",
    }
  }

  pub fn from_key(key: &str) -> Option<ChainId> {
    ChainId::ALL.into_iter().find(|chain| chain.key() == key)
  }

  pub fn descriptor(self) -> &'static ChainDescriptor {
    match self {
      ChainId::Bsc => &BSC,
      ChainId::Eth => &ETH,
      ChainId::Sol => &SOL,
      ChainId::Base => &BASE,
      ChainId::PumpFun => &PUMPFUN,
      ChainId::Possum => &POSSUM,
      ChainId::FourMeme => &FOURMEME,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoostDuration {
  FourHours,
  EightHours,
  TwelveHours,
  TwentyFourHours,
}

impl BoostDuration {
  pub const ALL: [BoostDuration; 4] = [
    BoostDuration::FourHours,
    BoostDuration::EightHours,
    BoostDuration::TwelveHours,
    BoostDuration::TwentyFourHours,
  ];

  pub fn key(self) -> &'static str {
    match self {
      BoostDuration::FourHours => "4_hours",
      BoostDuration::EightHours => "8_hours",
      BoostDuration::TwelveHours => "12_hours",
      BoostDuration::TwentyFourHours => "24_hours",
    }
  }

  pub fn from_key(key: &str) -> Option<BoostDuration> {
    BoostDuration::ALL
      .into_iter()
      .find(|duration| duration.key() == key)
  }

  /// e.g. "24 hours"
  pub fn label(self) -> String {
    self.key().replace('_', " ")
  }

  pub fn hours(self) -> u32 {
    match self {
      BoostDuration::FourHours => 4,
      BoostDuration::EightHours => 8,
      BoostDuration::TwelveHours => 12,
      BoostDuration::TwentyFourHours => 24,
    }
  }

  /// Price in SOL before the chain conversion rate is applied
  pub fn base_price(self) -> f64 {
    match self {
      BoostDuration::FourHours => 1.8,
      BoostDuration::EightHours => 2.7,
      BoostDuration::TwelveHours => 3.75,
      BoostDuration::TwentyFourHours => 5.25,
    }
  }
}

fn round3(value: f64) -> f64 {
  (value * 1000.0).round() / 1000.0
}

fn compute_price(duration: BoostDuration, chain: ChainId) -> f64 {
  round3(duration.base_price() * chain.descriptor().conversion_rate)
}

/// Every (duration, chain) price, computed once at startup.
#[derive(Debug, Clone)]
pub struct PriceTable {
  prices: HashMap<(BoostDuration, ChainId), f64>,
}

impl PriceTable {
  pub fn new() -> Self {
    let mut prices = HashMap::new();
    for duration in BoostDuration::ALL {
      for chain in ChainId::ALL {
        prices.insert((duration, chain), compute_price(duration, chain));
      }
    }

    log::debug!("Computed {} prices", prices.len());

    PriceTable { prices }
  }

  pub fn price(&self, duration: BoostDuration, chain: ChainId) -> f64 {
    self
      .prices
      .get(&(duration, chain))
      .copied()
      .unwrap_or_else(|| compute_price(duration, chain))
  }

  /// Price formatted for display in the chain's currency, without the unit
  pub fn display_price(&self, duration: BoostDuration, chain: ChainId) -> String {
    format_amount(self.price(duration, chain), chain.descriptor().currency)
  }
}

impl Default for PriceTable {
  fn default() -> Self {
    Self::new()
  }
}

/// ETH and BNB amounts are small enough to need a third decimal.
pub fn format_amount(amount: f64, currency: &str) -> String {
  match currency {
    "ETH" | "BNB" => format!("{:.3}", amount),
    _ => format!("{:.2}", amount),
  }
}
