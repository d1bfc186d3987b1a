use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::catalog::CoinInfo;
use super::traits::MarketDataApi;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";

/// CoinGecko market-data client.
///
/// - **Free**: no API key required for the public endpoints used here.
/// - **Data**: `/api/v3/coins/markets` lists coins by market cap with
///   id, symbol, and name — exactly what the selection catalog needs.
///
/// Only the top 100 coins by market cap are fetched; the response
/// carries many more fields than `CoinInfo`, which serde ignores.
pub struct CoinGeckoApi {
    client: Client,
    base_url: String,
}

impl CoinGeckoApi {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl Default for CoinGeckoApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataApi for CoinGeckoApi {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn list_coins(&self) -> Result<Vec<CoinInfo>, CoreError> {
        let url = format!("{}/api/v3/coins/markets", self.base_url);
        debug!("GET {url}");

        let coins: Vec<CoinInfo> = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", "100"),
                ("page", "1"),
                ("sparkline", "false"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("Failed to parse coin list: {e}"),
            })?;

        Ok(coins)
    }
}
