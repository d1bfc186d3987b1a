use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Type of recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    /// Buying / acquiring shares of a coin
    Buy,
    /// Selling / disposing of shares
    Sell,
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxKind::Buy => write!(f, "Buy"),
            TxKind::Sell => write!(f, "Sell"),
        }
    }
}

/// A single recorded buy/sell event in a coin's ledger.
///
/// Transactions are created by user submission and removed by explicit
/// user action — never mutated in place. The id is assigned by the
/// server, so it is absent on drafts that haven't round-tripped yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Server-assigned identifier
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Date of the transaction (no time component — daily granularity)
    pub date: NaiveDate,

    /// Buy or Sell
    #[serde(rename = "type")]
    pub kind: TxKind,

    /// Number of shares, always positive
    pub shares: f64,

    /// Price paid/received per share
    #[serde(rename = "costPerShare")]
    pub cost_per_share: f64,

    /// Broker/exchange commission, zero when not recorded
    #[serde(default)]
    pub commission: f64,

    /// Optional free-text note (e.g., exchange, memo)
    #[serde(default)]
    pub note: Option<String>,
}

/// Payload for creating a new transaction on the server.
/// Field names match the remote API's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub shares: f64,
    #[serde(rename = "costPerShare")]
    pub cost_per_share: f64,
    pub commission: f64,
    pub note: String,
    pub symbol: String,
    pub name: String,
}

/// Payload for creating a coin holding directly (quantity + buy price),
/// bypassing the transaction ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHolding {
    #[serde(rename = "coinId")]
    pub coin_id: String,
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    #[serde(rename = "buyPrice")]
    pub buy_price: f64,
}

/// A coin's aggregated position: how many shares are held and at what
/// average cost per share.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub quantity: f64,
    pub average_cost: f64,
}

/// A holding of one cryptocurrency within a portfolio.
///
/// `quantity` and `buy_price` are the server-stored aggregates; the
/// transaction ledger is the display source of truth whenever it is
/// non-empty (see [`Coin::position`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// External reference into the coin catalog (e.g., "bitcoin")
    #[serde(rename = "coinId")]
    pub coin_id: String,

    /// Ticker symbol (e.g., "btc")
    pub symbol: String,

    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,

    /// Stored aggregate quantity
    #[serde(default)]
    pub quantity: f64,

    /// Stored average buy price
    #[serde(rename = "buyPrice", default)]
    pub buy_price: f64,

    /// Ordered ledger of buy/sell transactions
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Coin {
    /// The position used for valuation.
    ///
    /// When the ledger is non-empty it is replayed in order: buys add
    /// shares and cost basis, sells remove shares and reduce the basis
    /// proportionally at the running average. With an empty ledger the
    /// stored aggregates are used as-is.
    #[must_use]
    pub fn position(&self) -> Position {
        if self.transactions.is_empty() {
            return Position {
                quantity: self.quantity,
                average_cost: self.buy_price,
            };
        }
        replay_ledger(&self.transactions)
    }

    /// Look up a transaction by its server-assigned id.
    #[must_use]
    pub fn transaction(&self, tx_id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id.as_deref() == Some(tx_id))
    }
}

/// Replay a transaction ledger into an aggregate position.
///
/// Sells beyond the held quantity zero the position out rather than
/// going negative; the remote service doesn't prevent them, so the
/// view has to tolerate them.
#[must_use]
pub fn replay_ledger(transactions: &[Transaction]) -> Position {
    let mut quantity = 0.0_f64;
    let mut basis = 0.0_f64;

    for tx in transactions {
        match tx.kind {
            TxKind::Buy => {
                quantity += tx.shares;
                basis += tx.shares * tx.cost_per_share;
            }
            TxKind::Sell => {
                if quantity > 0.0 {
                    let sold = tx.shares.min(quantity);
                    basis -= sold * (basis / quantity);
                    quantity -= tx.shares;
                } else {
                    quantity -= tx.shares;
                }
                if quantity <= 0.0 {
                    quantity = 0.0;
                    basis = 0.0;
                }
            }
        }
    }

    let average_cost = if quantity > 0.0 { basis / quantity } else { 0.0 };
    Position {
        quantity,
        average_cost,
    }
}
