pub mod api;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use api::traits::{MarketDataApi, PortfolioApi};
use errors::CoreError;
use models::catalog::CoinInfo;
use models::coin::NewHolding;
use models::ident::PortfolioRef;
use models::valuation::PortfolioValuation;
use services::catalog_service::CatalogService;
use services::identity_service::IdentityService;
use services::portfolio_view::PortfolioView;
use services::transaction_service::{TransactionDraft, TransactionService};
use storage::catalog_store::CatalogStore;
use storage::session::SessionStore;

/// Top-level shell state: either nobody is identified (show the entry
/// form) or a portfolio identifier has been resolved (show the
/// valuation view).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Identified(PortfolioRef),
}

impl Session {
    #[must_use]
    pub fn is_identified(&self) -> bool {
        matches!(self, Session::Identified(_))
    }
}

/// Main entry point for the Coinfolio core library.
///
/// Owns the shell state machine and the valuation view, and wires the
/// injected API clients and stores into the services. A frontend
/// drives this facade and renders from the state it exposes.
#[must_use]
pub struct Coinfolio {
    api: Box<dyn PortfolioApi>,
    market: Box<dyn MarketDataApi>,
    session_store: Box<dyn SessionStore>,
    catalog_store: Box<dyn CatalogStore>,
    identity_service: IdentityService,
    catalog_service: CatalogService,
    transaction_service: TransactionService,
    session: Session,
    view: PortfolioView,
}

impl std::fmt::Debug for Coinfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coinfolio")
            .field("api", &self.api.name())
            .field("market", &self.market.name())
            .field("session", &self.session)
            .finish()
    }
}

impl Coinfolio {
    /// Build the app shell from injected collaborators.
    pub fn new(
        api: Box<dyn PortfolioApi>,
        market: Box<dyn MarketDataApi>,
        session_store: Box<dyn SessionStore>,
        catalog_store: Box<dyn CatalogStore>,
    ) -> Self {
        Self {
            api,
            market,
            session_store,
            catalog_store,
            identity_service: IdentityService::new(),
            catalog_service: CatalogService::new(),
            transaction_service: TransactionService::new(),
            session: Session::Anonymous,
            view: PortfolioView::new(),
        }
    }

    // ── Shell / Router ──────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Startup check: a remembered identifier in the session store
    /// skips straight to `Identified`. Returns the restored reference.
    pub fn startup(&mut self) -> Option<&PortfolioRef> {
        if let Some(target) = self.identity_service.restore(&*self.session_store) {
            self.session = Session::Identified(target);
            self.view = PortfolioView::new();
        }
        match &self.session {
            Session::Identified(target) => Some(target),
            Session::Anonymous => None,
        }
    }

    /// Validate and resolve `raw`, creating the portfolio when absent,
    /// then move to `Identified`. With `remember` set the identifier
    /// survives a restart.
    pub async fn login(&mut self, raw: &str, remember: bool) -> Result<&PortfolioRef, CoreError> {
        let target = self
            .identity_service
            .login(&*self.api, &*self.session_store, raw, remember)
            .await?;
        self.session = Session::Identified(target);
        self.view = PortfolioView::new();
        match &self.session {
            Session::Identified(target) => Ok(target),
            Session::Anonymous => unreachable!("session was just set"),
        }
    }

    /// Return to `Anonymous` and forget the remembered identifier.
    pub fn logout(&mut self) -> Result<(), CoreError> {
        self.session_store.clear()?;
        self.session = Session::Anonymous;
        self.view = PortfolioView::new();
        Ok(())
    }

    /// "Change identifier" is a logout that returns to the entry form.
    pub fn change_identifier(&mut self) -> Result<(), CoreError> {
        self.logout()
    }

    // ── Valuation View ──────────────────────────────────────────────

    pub fn view(&self) -> &PortfolioView {
        &self.view
    }

    /// (Re)load the portfolio for the current identifier. Load errors
    /// land in the view's `Error` state, not in this `Result`, which
    /// only rejects calls while anonymous.
    pub async fn load_portfolio(&mut self) -> Result<(), CoreError> {
        let target = Self::require_identified(&self.session)?;
        self.view.load(&*self.api, target).await;
        Ok(())
    }

    /// Refresh live prices for the loaded portfolio. Failure degrades
    /// gracefully inside the view (logged, zero-valued metrics).
    pub async fn refresh_prices(&mut self) -> Result<(), CoreError> {
        let target = Self::require_identified(&self.session)?;
        self.view.refresh_prices(&*self.api, target).await;
        Ok(())
    }

    /// Derived metrics for the loaded portfolio, `None` while loading
    /// or after a load error.
    #[must_use]
    pub fn valuations(&self) -> Option<PortfolioValuation> {
        self.view.valuations()
    }

    /// Toggle the per-coin transaction ledger in the view.
    pub fn toggle_expanded(&mut self, coin_id: &str) {
        self.view.toggle_expanded(coin_id);
    }

    // ── Transactions & Holdings ─────────────────────────────────────

    /// Submit a drafted transaction, then reload the portfolio so the
    /// new ledger entry is visible.
    pub async fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<(), CoreError> {
        let target = Self::require_identified(&self.session)?;
        self.transaction_service
            .submit(&*self.api, target, draft)
            .await?;
        self.view.load(&*self.api, target).await;
        Ok(())
    }

    /// Remove a ledger transaction and reload the whole portfolio from
    /// the server (never patched locally).
    pub async fn remove_transaction(
        &mut self,
        coin_id: &str,
        tx_id: &str,
    ) -> Result<(), CoreError> {
        let target = Self::require_identified(&self.session)?;
        self.view
            .remove_transaction(&*self.api, target, coin_id, tx_id)
            .await
    }

    /// Add a holding directly (quantity + buy price), then reload.
    pub async fn add_holding(&mut self, holding: &NewHolding) -> Result<(), CoreError> {
        let target = Self::require_identified(&self.session)?;
        self.transaction_service
            .add_holding(&*self.api, target, holding)
            .await?;
        self.view.load(&*self.api, target).await;
        Ok(())
    }

    // ── Reference Data ──────────────────────────────────────────────

    /// The coin catalog for selection, served from the 24h cache when
    /// fresh. Empty on fetch failure, never an error.
    pub async fn coin_catalog(&self) -> Vec<CoinInfo> {
        self.catalog_service
            .get_coins(&*self.market, &*self.catalog_store)
            .await
    }

    // ── Internal ────────────────────────────────────────────────────

    fn require_identified(session: &Session) -> Result<&PortfolioRef, CoreError> {
        match session {
            Session::Identified(target) => Ok(target),
            Session::Anonymous => Err(CoreError::Validation(
                "No portfolio identifier — log in first".to_string(),
            )),
        }
    }
}
