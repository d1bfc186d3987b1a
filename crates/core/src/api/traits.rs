use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::catalog::CoinInfo;
use crate::models::coin::{NewHolding, NewTransaction};
use crate::models::ident::PortfolioRef;
use crate::models::portfolio::Portfolio;
use crate::models::quote::PriceSnapshot;

/// Trait abstraction over the remote portfolio REST service.
///
/// The rest of the codebase talks only to this trait, so the whole
/// remote surface can be faked in tests and swapped if the service's
/// wire format changes.
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch a portfolio by server id or alias.
    async fn fetch_portfolio(&self, target: &PortfolioRef) -> Result<Portfolio, CoreError>;

    /// Create a new portfolio under a user alias.
    async fn create_portfolio(&self, alias: &str) -> Result<Portfolio, CoreError>;

    /// Fetch live prices for all coins held in a portfolio.
    async fn fetch_prices(&self, target: &PortfolioRef) -> Result<PriceSnapshot, CoreError>;

    /// Record a new buy/sell transaction for a coin within a portfolio.
    async fn add_transaction(
        &self,
        target: &PortfolioRef,
        coin_id: &str,
        tx: &NewTransaction,
    ) -> Result<(), CoreError>;

    /// Delete a transaction by its server-assigned id.
    async fn delete_transaction(
        &self,
        target: &PortfolioRef,
        coin_id: &str,
        tx_id: &str,
    ) -> Result<(), CoreError>;

    /// Create a coin holding directly (quantity + buy price),
    /// independent of the transaction ledger path.
    async fn add_holding(
        &self,
        target: &PortfolioRef,
        holding: &NewHolding,
    ) -> Result<(), CoreError>;
}

/// Trait abstraction over the third-party market-data API that serves
/// the reference-data catalog.
#[async_trait]
pub trait MarketDataApi: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// List known coins (id, symbol, name) for the selection catalog.
    async fn list_coins(&self) -> Result<Vec<CoinInfo>, CoreError>;
}
