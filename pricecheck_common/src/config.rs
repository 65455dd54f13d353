//! Runtime settings passed explicitly into the price client and reports.

use std::path::PathBuf;
use std::time::Duration;

use crate::symbols::Symbol;

/// Public REST endpoint of the exchange.
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";
/// Quote asset used to build pairs.
pub const DEFAULT_UNIT: &str = "USDT";
/// Wallet document location, relative to the working directory.
pub const DEFAULT_WALLET_FILE: &str = "wallet.json";
/// Symbols shown when none are given on the command line.
pub const DEFAULT_SYMBOLS: [&str; 5] = ["BTC", "ETH", "LINK", "DOT", "ADA"];
/// HTTP timeout applied to every request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Monthly candles requested for the all-time-high scan. 1000 is the kline maximum,
/// which covers more history than any listed pair has.
pub const DEFAULT_ATH_CANDLE_LIMIT: u16 = 1000;

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Symbols for the default price report and the ATH report.
    pub symbols: Vec<Symbol>,
    /// Quote asset appended to each symbol.
    pub unit: String,
    /// Exchange REST base URL, without trailing slash.
    pub base_url: String,
    /// Path of the wallet JSON document.
    pub wallet_path: PathBuf,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Number of monthly candles scanned for the all-time high.
    pub ath_candle_limit: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            unit: DEFAULT_UNIT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            wallet_path: PathBuf::from(DEFAULT_WALLET_FILE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ath_candle_limit: DEFAULT_ATH_CANDLE_LIMIT,
        }
    }
}

/// Parsed form of [`DEFAULT_SYMBOLS`].
pub fn default_symbols() -> Vec<Symbol> {
    DEFAULT_SYMBOLS
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect()
}
