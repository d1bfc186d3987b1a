pub mod catalog_service;
pub mod identity_service;
pub mod portfolio_view;
pub mod transaction_service;
pub mod valuation_service;
