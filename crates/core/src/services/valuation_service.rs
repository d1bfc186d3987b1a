use crate::models::coin::Coin;
use crate::models::portfolio::Portfolio;
use crate::models::quote::PriceSnapshot;
use crate::models::valuation::{CoinValuation, PortfolioValuation};

/// Derives per-coin and aggregate financial metrics from a portfolio
/// snapshot and the latest price snapshot.
///
/// Pure arithmetic — no I/O, no state. A missing quote values the coin
/// at a price of zero rather than failing, so the view renders
/// zero-valued metrics for coins the price fetch didn't cover.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Value a single coin row.
    ///
    /// - `total_cost = quantity × average_cost`
    /// - `market_value = quantity × current_price`
    /// - `gain_loss = market_value − total_cost`
    /// - `gain_loss_percent = (gain_loss / total_cost) × 100`, 0 when
    ///   total cost is 0 (guard against division by zero)
    #[must_use]
    pub fn value_coin(&self, coin: &Coin, prices: &PriceSnapshot) -> CoinValuation {
        let position = coin.position();
        let current_price = prices.usd(&coin.coin_id);

        let total_cost = position.quantity * position.average_cost;
        let market_value = position.quantity * current_price;
        let gain_loss = market_value - total_cost;
        let gain_loss_percent = if total_cost == 0.0 {
            0.0
        } else {
            gain_loss / total_cost * 100.0
        };

        CoinValuation {
            coin_id: coin.coin_id.clone(),
            symbol: coin.symbol.clone(),
            name: coin.name.clone(),
            quantity: position.quantity,
            average_cost: position.average_cost,
            current_price,
            total_cost,
            market_value,
            gain_loss,
            gain_loss_percent,
        }
    }

    /// Value every holding and aggregate the totals, preserving the
    /// portfolio's coin order.
    #[must_use]
    pub fn value_portfolio(
        &self,
        portfolio: &Portfolio,
        prices: &PriceSnapshot,
    ) -> PortfolioValuation {
        let rows: Vec<CoinValuation> = portfolio
            .coins
            .iter()
            .map(|coin| self.value_coin(coin, prices))
            .collect();

        let total_cost: f64 = rows.iter().map(|r| r.total_cost).sum();
        let total_market_value: f64 = rows.iter().map(|r| r.market_value).sum();
        let total_gain_loss = total_market_value - total_cost;
        let total_gain_loss_percent = if total_cost == 0.0 {
            0.0
        } else {
            total_gain_loss / total_cost * 100.0
        };

        PortfolioValuation {
            rows,
            total_cost,
            total_market_value,
            total_gain_loss,
            total_gain_loss_percent,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
