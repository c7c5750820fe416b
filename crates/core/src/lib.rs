//! Core library for the finance tracker: cash/stock ledger storage, live
//! market data providers, portfolio aggregation, and pie-chart rendering.
//!
//! The HTTP surface lives in the `finance-tracker-server` crate; everything
//! here is web-framework free and individually testable.

pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod store;

pub use errors::CoreError;
pub use models::cash::{CashEntry, CashTotals, NewCashEntry};
pub use models::dashboard::Dashboard;
pub use models::position::{OpenValuation, Position, Valuation};
pub use models::stock::{NewStockTransaction, StockTransaction};
pub use services::chart_service::{ChartOutcome, ChartService};
pub use services::portfolio_service::PortfolioService;
pub use services::quote_service::QuoteService;
pub use store::Store;
