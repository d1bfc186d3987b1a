pub mod catalog;
pub mod coin;
pub mod ident;
pub mod portfolio;
pub mod quote;
pub mod valuation;
