use serde::{Deserialize, Serialize};

use super::coin::Coin;

/// A user's collection of coin holdings, as returned by the remote API.
///
/// Owned and persisted by the external service; this library holds only
/// a transient in-memory copy fetched on load and discarded on
/// navigation away. Invariant: at most one `Coin` entry per `coin_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Server-assigned opaque id
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// User-chosen alias, when the portfolio was created under one
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Ordered set of coin holdings
    #[serde(default)]
    pub coins: Vec<Coin>,
}

impl Portfolio {
    /// Look up a holding by coin id. First match wins, which together
    /// with the at-most-one-entry invariant makes this unambiguous.
    #[must_use]
    pub fn coin(&self, coin_id: &str) -> Option<&Coin> {
        self.coins.iter().find(|c| c.coin_id == coin_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}
