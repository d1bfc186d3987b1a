use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a fetched coin catalog stays fresh before a refetch.
pub const CATALOG_TTL_HOURS: i64 = 24;

/// One entry in the reference-data catalog, offered for selection when
/// adding a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinInfo {
    /// Market-data API id (e.g., "bitcoin")
    pub id: String,
    /// Ticker symbol (e.g., "btc")
    pub symbol: String,
    /// Display name (e.g., "Bitcoin")
    pub name: String,
}

/// A time-stamped snapshot of the coin catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinCatalog {
    pub coins: Vec<CoinInfo>,

    /// When this snapshot was fetched from the market-data API.
    pub fetched_at: DateTime<Utc>,
}

impl CoinCatalog {
    pub fn new(coins: Vec<CoinInfo>, fetched_at: DateTime<Utc>) -> Self {
        Self { coins, fetched_at }
    }

    /// A catalog written at time T is fresh for any read at T' < T + 24h.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < Duration::hours(CATALOG_TTL_HOURS)
    }
}
