use tracing::warn;

use crate::api::traits::PortfolioApi;
use crate::errors::CoreError;
use crate::models::coin::Transaction;
use crate::models::ident::PortfolioRef;
use crate::models::portfolio::Portfolio;
use crate::models::quote::PriceSnapshot;
use crate::models::valuation::PortfolioValuation;
use crate::services::transaction_service::TransactionService;
use crate::services::valuation_service::ValuationService;

/// Load state of the valuation view.
///
/// `Loading` is the initial state and is re-entered whenever the
/// portfolio identifier changes. Prices are a secondary, independent
/// fetch: their failure never transitions out of `Loaded`.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Loaded(Portfolio),
    Error(String),
}

/// The portfolio valuation view: load state, price snapshot, and the
/// single-coin ledger-expansion toggle.
///
/// Responses overwrite state unconditionally (last-write-wins); there
/// is no request fencing and no retry.
pub struct PortfolioView {
    state: ViewState,
    prices: PriceSnapshot,
    expanded: Option<String>,
    valuation_service: ValuationService,
    transaction_service: TransactionService,
}

impl PortfolioView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            prices: PriceSnapshot::new(),
            expanded: None,
            valuation_service: ValuationService::new(),
            transaction_service: TransactionService::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The loaded portfolio, if in the `Loaded` state.
    pub fn portfolio(&self) -> Option<&Portfolio> {
        match &self.state {
            ViewState::Loaded(portfolio) => Some(portfolio),
            _ => None,
        }
    }

    pub fn prices(&self) -> &PriceSnapshot {
        &self.prices
    }

    /// The coin whose ledger is currently expanded, if any.
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Toggle the ledger expansion for a coin: selecting the expanded
    /// coin collapses it, selecting another switches the target. At
    /// most one coin's ledger is visible at a time.
    pub fn toggle_expanded(&mut self, coin_id: &str) {
        if self.expanded.as_deref() == Some(coin_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(coin_id.to_string());
        }
    }

    /// The expanded coin's ledger, when that coin exists in the loaded
    /// portfolio.
    pub fn expanded_ledger(&self) -> Option<&[Transaction]> {
        let coin_id = self.expanded.as_deref()?;
        let portfolio = self.portfolio()?;
        portfolio
            .coin(coin_id)
            .map(|coin| coin.transactions.as_slice())
    }

    /// (Re)load the portfolio from the remote API, passing through
    /// `Loading`. Load failure lands in `Error` with a user-facing
    /// message; the previous snapshot is discarded either way.
    pub async fn load(&mut self, api: &dyn PortfolioApi, target: &PortfolioRef) {
        self.state = ViewState::Loading;
        match api.fetch_portfolio(target).await {
            Ok(portfolio) => {
                self.state = ViewState::Loaded(portfolio);
            }
            Err(e) => {
                warn!("Failed to load portfolio '{target}': {e}");
                self.state = ViewState::Error("Could not load portfolio.".to_string());
            }
        }
    }

    /// Fetch live prices for the loaded portfolio's coins.
    ///
    /// Skipped when nothing is loaded or there are no holdings. Failure
    /// leaves the previous (possibly empty) snapshot in place and the
    /// view in `Loaded` — affected coins render zero-valued metrics.
    pub async fn refresh_prices(&mut self, api: &dyn PortfolioApi, target: &PortfolioRef) {
        match &self.state {
            ViewState::Loaded(portfolio) if !portfolio.is_empty() => {}
            _ => return,
        }

        match api.fetch_prices(target).await {
            Ok(snapshot) => self.prices = snapshot,
            Err(e) => warn!("Failed to fetch prices for '{target}': {e}"),
        }
    }

    /// Derived metrics for every holding, evaluated from the current
    /// portfolio and price snapshots. `None` unless loaded.
    pub fn valuations(&self) -> Option<PortfolioValuation> {
        let portfolio = self.portfolio()?;
        Some(
            self.valuation_service
                .value_portfolio(portfolio, &self.prices),
        )
    }

    /// Remove a transaction from the expanded ledger, then reload the
    /// entire portfolio from the API so the view never diverges from
    /// server state. On failure the ledger is left unchanged and the
    /// error is surfaced for the caller to display.
    pub async fn remove_transaction(
        &mut self,
        api: &dyn PortfolioApi,
        target: &PortfolioRef,
        coin_id: &str,
        tx_id: &str,
    ) -> Result<(), CoreError> {
        self.transaction_service
            .remove(api, target, coin_id, tx_id)
            .await?;
        self.load(api, target).await;
        Ok(())
    }
}

impl Default for PortfolioView {
    fn default() -> Self {
        Self::new()
    }
}
