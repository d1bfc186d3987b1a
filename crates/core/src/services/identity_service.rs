use tracing::{info, warn};

use crate::api::traits::PortfolioApi;
use crate::errors::CoreError;
use crate::models::ident::PortfolioRef;
use crate::storage::session::SessionStore;

/// Resolves a raw user-entered identifier to a portfolio.
///
/// Validation happens before any network call; a "not found" lookup is
/// recovered by creating the portfolio under that identifier, so from
/// the user's perspective login with an unknown alias just works.
pub struct IdentityService;

impl IdentityService {
    pub fn new() -> Self {
        Self
    }

    /// Restore a previously remembered identifier from the session store.
    ///
    /// Returns `None` when nothing is saved or the saved value no longer
    /// parses as a valid identifier (stale/corrupt store entries are
    /// treated as absent, not fatal).
    pub fn restore(&self, session: &dyn SessionStore) -> Option<PortfolioRef> {
        let saved = match session.load() {
            Ok(saved) => saved?,
            Err(e) => {
                warn!("Failed to read saved session: {e}");
                return None;
            }
        };
        match PortfolioRef::parse(&saved) {
            Ok(target) => Some(target),
            Err(_) => {
                warn!("Ignoring invalid saved identifier '{saved}'");
                None
            }
        }
    }

    /// Validate `raw`, look the portfolio up, and create it when absent.
    ///
    /// With `remember` set the identifier is persisted on success;
    /// otherwise any previously saved identifier is cleared. Repeated
    /// logins with the same unknown alias could race on creation — the
    /// remote service's idempotency there is its own concern.
    pub async fn login(
        &self,
        api: &dyn PortfolioApi,
        session: &dyn SessionStore,
        raw: &str,
        remember: bool,
    ) -> Result<PortfolioRef, CoreError> {
        let target = PortfolioRef::parse(raw)?;

        match api.fetch_portfolio(&target).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                info!("Portfolio '{target}' not found, creating it");
                api.create_portfolio(target.as_str()).await.map_err(|e| {
                    warn!("Failed to create portfolio '{target}': {e}");
                    e
                })?;
            }
            Err(e) => {
                warn!("Failed to load portfolio '{target}': {e}");
                return Err(e);
            }
        }

        if remember {
            session.save(target.as_str())?;
        } else {
            session.clear()?;
        }

        Ok(target)
    }
}

impl Default for IdentityService {
    fn default() -> Self {
        Self::new()
    }
}
