use serde::{Deserialize, Serialize};

/// Derived financial metrics for one coin row in the valuation view.
///
/// Evaluated at render time from the portfolio snapshot and the latest
/// price snapshot — never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinValuation {
    pub coin_id: String,
    pub symbol: String,
    pub name: String,

    /// Shares held (ledger-replayed when a ledger exists)
    pub quantity: f64,

    /// Average cost per share
    pub average_cost: f64,

    /// Current USD price, 0 when no quote is available
    pub current_price: f64,

    /// quantity × average_cost
    pub total_cost: f64,

    /// quantity × current_price
    pub market_value: f64,

    /// market_value − total_cost
    pub gain_loss: f64,

    /// (gain_loss / total_cost) × 100, or 0 when total_cost is 0
    pub gain_loss_percent: f64,
}

/// Aggregate valuation of the whole portfolio plus per-coin rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    pub rows: Vec<CoinValuation>,
    pub total_cost: f64,
    pub total_market_value: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
}
