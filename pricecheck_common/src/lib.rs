//!
//! Price checking core shared by the `pricecheck` binary.
//!
//! This crate aggregates:
//! - `error` — unified error type `CheckerError` used across the workspace.
//! - `result` — handy `Result<T, CheckerError>` alias.
//! - `symbols` — asset symbols, trading pairs, kline intervals and symbol file parsing.
//! - `config` — `Settings` passed explicitly to every component.
//! - `http` — the blocking `HttpClient` seam and its `reqwest` implementation.
//! - `market` — candles, daily change and all-time-high values decoded from the exchange.
//! - `price_client` — the three market-data queries.
//! - `wallet` — locally persisted holdings.
//! - `report` — price, all-time-high and wallet reports.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod symbols;
pub mod config;
pub mod http;
pub mod market;
pub mod price_client;
pub mod wallet;
pub mod report;

pub use error::CheckerError;
pub use result::Result;
pub use config::Settings;
pub use price_client::PriceClient;
pub use wallet::{ClearOutcome, Wallet};
pub use report::ReportBuilder;
