use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::api::traits::MarketDataApi;
use crate::models::catalog::{CoinCatalog, CoinInfo};
use crate::storage::catalog_store::CatalogStore;

/// Serves the reference-data catalog of known coins with a 24-hour cache.
///
/// A cached catalog younger than the TTL is returned without a network
/// call. On a miss the market-data API is fetched and the store is
/// replaced with a freshly stamped snapshot. Fetch failure degrades to
/// an empty catalog (logged, not fatal) — the selection control simply
/// has no options until the next attempt.
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    /// The catalog for coin selection, cached per the TTL policy.
    pub async fn get_coins(
        &self,
        market: &dyn MarketDataApi,
        store: &dyn CatalogStore,
    ) -> Vec<CoinInfo> {
        self.get_coins_at(market, store, Utc::now()).await
    }

    /// TTL policy with an explicit clock, so tests can pin `now`.
    pub async fn get_coins_at(
        &self,
        market: &dyn MarketDataApi,
        store: &dyn CatalogStore,
        now: DateTime<Utc>,
    ) -> Vec<CoinInfo> {
        match store.load() {
            Ok(Some(cached)) if cached.is_fresh(now) => {
                debug!(
                    "Serving coin catalog from cache ({} coins, fetched {})",
                    cached.coins.len(),
                    cached.fetched_at
                );
                return cached.coins;
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to read cached coin catalog: {e}"),
        }

        match market.list_coins().await {
            Ok(coins) => {
                let catalog = CoinCatalog::new(coins.clone(), now);
                if let Err(e) = store.save(&catalog) {
                    warn!("Failed to cache coin catalog: {e}");
                }
                coins
            }
            Err(e) => {
                warn!("Failed to fetch coin catalog from {}: {e}", market.name());
                Vec::new()
            }
        }
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}
