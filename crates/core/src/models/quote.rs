use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A live market price for one coin, in USD.
/// Used only for display, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub usd: f64,
}

/// The latest price snapshot: coin id → quote.
///
/// Ephemeral and refreshed on demand. A missing entry values the coin
/// at zero — the valuation view degrades rather than fails when quotes
/// are unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSnapshot(pub HashMap<String, PriceQuote>);

impl PriceSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current USD price for a coin, defaulting to 0 with no quote.
    #[must_use]
    pub fn usd(&self, coin_id: &str) -> f64 {
        self.0.get(coin_id).map(|q| q.usd).unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, coin_id: impl Into<String>, usd: f64) {
        self.0.insert(coin_id.into(), PriceQuote { usd });
    }
}
