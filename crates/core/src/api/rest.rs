use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::coin::{NewHolding, NewTransaction};
use crate::models::ident::PortfolioRef;
use crate::models::portfolio::Portfolio;
use crate::models::quote::PriceSnapshot;
use super::traits::PortfolioApi;

const DEFAULT_BASE_URL: &str = "https://antique-icy-finch.glitch.me";

const PROVIDER: &str = "portfolio-api";

/// REST client for the remote portfolio service.
///
/// Endpoints under `/api/portfolio`:
/// - `GET  /{id}` or `/byUserId/{alias}` — fetch
/// - `POST /create` — create under an alias
/// - `GET  …/prices` — live prices for held coins
/// - `POST …/coins/{coinId}/transactions` — record a transaction
/// - `DELETE …/coins/{coinId}/transactions/{txId}` — remove one
/// - `POST …/cryptos` — add a holding directly
pub struct RestPortfolioApi {
    client: Client,
    base_url: String,
}

impl RestPortfolioApi {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different service root (used by tests).
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

    /// `{base}/api/portfolio/{id}` or `{base}/api/portfolio/byUserId/{alias}`.
    fn portfolio_url(&self, target: &PortfolioRef) -> String {
        format!("{}/api/portfolio/{}", self.base_url, target.path_segment())
    }

    /// Map non-success statuses to errors. 404 on lookups is the
    /// recoverable `NotFound` the login flow reacts to.
    async fn check(resp: Response, what: &str) -> Result<Response, CoreError> {
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CoreError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.to_string(),
                message: format!("{what}: HTTP {status}"),
            });
        }
        Ok(resp)
    }
}

impl Default for RestPortfolioApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortfolioApi for RestPortfolioApi {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_portfolio(&self, target: &PortfolioRef) -> Result<Portfolio, CoreError> {
        let url = self.portfolio_url(target);
        debug!("GET {url}");

        let resp = self.client.get(&url).send().await?;
        let resp = Self::check(resp, &format!("portfolio {target}")).await?;
        let portfolio = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.to_string(),
            message: format!("Failed to parse portfolio {target}: {e}"),
        })?;
        Ok(portfolio)
    }

    async fn create_portfolio(&self, alias: &str) -> Result<Portfolio, CoreError> {
        let url = format!("{}/api/portfolio/create", self.base_url);
        debug!("POST {url} (userId={alias})");

        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "userId": alias }))
            .send()
            .await?;
        let resp = Self::check(resp, &format!("create portfolio {alias}")).await?;
        let portfolio = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.to_string(),
            message: format!("Failed to parse created portfolio {alias}: {e}"),
        })?;
        Ok(portfolio)
    }

    async fn fetch_prices(&self, target: &PortfolioRef) -> Result<PriceSnapshot, CoreError> {
        let url = format!("{}/prices", self.portfolio_url(target));
        debug!("GET {url}");

        let resp = self.client.get(&url).send().await?;
        let resp = Self::check(resp, &format!("prices for {target}")).await?;
        let snapshot = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.to_string(),
            message: format!("Failed to parse prices for {target}: {e}"),
        })?;
        Ok(snapshot)
    }

    async fn add_transaction(
        &self,
        target: &PortfolioRef,
        coin_id: &str,
        tx: &NewTransaction,
    ) -> Result<(), CoreError> {
        let url = format!(
            "{}/coins/{coin_id}/transactions",
            self.portfolio_url(target)
        );
        debug!("POST {url} ({} {} shares)", tx.kind, tx.shares);

        let resp = self.client.post(&url).json(tx).send().await?;
        Self::check(resp, &format!("add transaction for {coin_id}")).await?;
        Ok(())
    }

    async fn delete_transaction(
        &self,
        target: &PortfolioRef,
        coin_id: &str,
        tx_id: &str,
    ) -> Result<(), CoreError> {
        let url = format!(
            "{}/coins/{coin_id}/transactions/{tx_id}",
            self.portfolio_url(target)
        );
        debug!("DELETE {url}");

        let resp = self.client.delete(&url).send().await?;
        Self::check(resp, &format!("delete transaction {tx_id}")).await?;
        Ok(())
    }

    async fn add_holding(
        &self,
        target: &PortfolioRef,
        holding: &NewHolding,
    ) -> Result<(), CoreError> {
        let url = format!("{}/cryptos", self.portfolio_url(target));
        debug!("POST {url} ({})", holding.coin_id);

        let resp = self.client.post(&url).json(holding).send().await?;
        Self::check(resp, &format!("add holding {}", holding.coin_id)).await?;
        Ok(())
    }
}
