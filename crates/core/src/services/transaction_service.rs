use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::traits::PortfolioApi;
use crate::errors::CoreError;
use crate::models::catalog::CoinInfo;
use crate::models::coin::{NewHolding, NewTransaction, TxKind};
use crate::models::ident::PortfolioRef;

/// A buy/sell transaction being collected before submission.
///
/// Mirrors the entry form: a coin must be selected from the catalog,
/// everything else defaults to zero/empty and is accepted as-is.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    /// The selected catalog entry; submission fails without one.
    pub coin: Option<CoinInfo>,
    pub date: NaiveDate,
    pub kind: TxKind,
    pub shares: f64,
    pub cost_per_share: f64,
    pub commission: f64,
    pub note: String,
}

impl TransactionDraft {
    /// Fresh draft dated `today`, defaulting to a Buy with zero amounts.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            coin: None,
            date: today,
            kind: TxKind::Buy,
            shares: 0.0,
            cost_per_share: 0.0,
            commission: 0.0,
            note: String::new(),
        }
    }

    /// Choose the coin this transaction applies to.
    pub fn select_coin(&mut self, coin: CoinInfo) {
        self.coin = Some(coin);
    }

    /// The submission payload, or `Validation` when no coin is selected.
    /// No numeric validation beyond the defaults — the form accepts zeros.
    pub fn to_payload(&self) -> Result<(String, NewTransaction), CoreError> {
        let coin = self
            .coin
            .as_ref()
            .ok_or_else(|| CoreError::Validation("Please select a coin".to_string()))?;

        let tx = NewTransaction {
            date: self.date,
            kind: self.kind,
            shares: self.shares,
            cost_per_share: self.cost_per_share,
            commission: self.commission,
            note: self.note.clone(),
            symbol: coin.symbol.clone(),
            name: coin.name.clone(),
        };
        Ok((coin.id.clone(), tx))
    }
}

/// Submits transaction creations, removals, and direct holdings to the
/// remote API. Failures are logged and surfaced once — no retries; the
/// caller re-triggers manually.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Validate and submit a drafted transaction.
    /// On success the caller should reload the portfolio view.
    pub async fn submit(
        &self,
        api: &dyn PortfolioApi,
        target: &PortfolioRef,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError> {
        let (coin_id, tx) = draft.to_payload()?;
        info!(
            "Submitting {} of {} shares of {coin_id} to portfolio '{target}'",
            tx.kind, tx.shares
        );
        api.add_transaction(target, &coin_id, &tx)
            .await
            .map_err(|e| {
                warn!("Failed to add transaction for {coin_id}: {e}");
                e
            })
    }

    /// Delete one transaction from a coin's ledger.
    /// On success the caller must reload the whole portfolio from the
    /// API rather than patch locally.
    pub async fn remove(
        &self,
        api: &dyn PortfolioApi,
        target: &PortfolioRef,
        coin_id: &str,
        tx_id: &str,
    ) -> Result<(), CoreError> {
        info!("Removing transaction {tx_id} of {coin_id} from portfolio '{target}'");
        api.delete_transaction(target, coin_id, tx_id)
            .await
            .map_err(|e| {
                warn!("Failed to delete transaction {tx_id}: {e}");
                e
            })
    }

    /// Create a coin holding directly from quantity and buy price,
    /// independent of the ledger path. Both must be positive.
    pub async fn add_holding(
        &self,
        api: &dyn PortfolioApi,
        target: &PortfolioRef,
        holding: &NewHolding,
    ) -> Result<(), CoreError> {
        if holding.coin_id.is_empty() || holding.symbol.is_empty() || holding.name.is_empty() {
            return Err(CoreError::Validation(
                "Coin id, symbol, and name are required".to_string(),
            ));
        }
        if holding.quantity <= 0.0 || holding.buy_price <= 0.0 {
            return Err(CoreError::Validation(
                "Quantity and buy price must be greater than zero".to_string(),
            ));
        }

        info!(
            "Adding holding {} ({} @ {}) to portfolio '{target}'",
            holding.coin_id, holding.quantity, holding.buy_price
        );
        api.add_holding(target, holding).await.map_err(|e| {
            warn!("Failed to add holding {}: {e}", holding.coin_id);
            e
        })
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}
