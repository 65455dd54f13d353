//! Command-line arguments for the price checker.
//!
//! This module defines the CLI interface using `clap` and turns it into the `Settings`
//! consumed by the library. See `main` for end-to-end usage.
use clap::{ArgAction, Parser, ValueEnum};
use pricecheck_common::config::{
    DEFAULT_ATH_CANDLE_LIMIT, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_UNIT,
    DEFAULT_WALLET_FILE, default_symbols,
};
use pricecheck_common::symbols::{Symbol, SymbolParser};
use pricecheck_common::{CheckerError, Result, Settings};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

/// Wallet sub-commands selected with `--wallet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WalletAction {
    /// Set the amount held for SYMBOL.
    Update,
    /// Price every held symbol and total the wallet.
    Show,
    /// Remove SYMBOL, or everything when no symbol is given.
    Clear,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Crypto price checker and wallet manager", long_about = None)]
pub struct Args {
    /// Show all-time highs for each symbol.
    #[arg(long)]
    pub ath: bool,

    /// Manage wallet: 'update', 'show', or 'clear'.
    #[arg(long, value_enum)]
    pub wallet: Option<WalletAction>,

    /// Crypto symbol to update or clear (e.g., BTC).
    pub symbol: Option<String>,

    /// Amount of the crypto symbol to update.
    #[arg(allow_negative_numbers = true)]
    pub amount: Option<f64>,

    /// Comma-separated symbols for the price and ATH reports.
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Path to a text file with symbols.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[arg(long, conflicts_with = "symbols")]
    pub symbols_file: Option<String>,

    /// Quote asset each symbol is priced in.
    #[arg(long, default_value = DEFAULT_UNIT)]
    pub unit: String,

    /// Wallet JSON file.
    #[arg(long, default_value = DEFAULT_WALLET_FILE)]
    pub wallet_file: String,

    /// Exchange REST base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP timeout per request, in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Monthly candles scanned for all-time highs.
    #[arg(long, default_value_t = DEFAULT_ATH_CANDLE_LIMIT,
          value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub ath_limit: u16,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Build runtime settings from the parsed flags.
    pub fn settings(&self) -> Result<Settings> {
        let unit = self.unit.trim().to_ascii_uppercase();
        if unit.is_empty() || !unit.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CheckerError::InvalidArgument(format!(
                "Invalid quote unit: '{}'",
                self.unit
            )));
        }

        Ok(Settings {
            symbols: self.resolve_symbols()?,
            unit,
            base_url: self.base_url.trim().to_string(),
            wallet_path: normalize_path(&self.wallet_file),
            timeout: Duration::from_secs(self.timeout_secs),
            ath_candle_limit: self.ath_limit,
        })
    }

    fn resolve_symbols(&self) -> Result<Vec<Symbol>> {
        if let Some(raw) = &self.symbols_file {
            let file = File::open(normalize_path(raw))?;
            let symbols = Symbol::parse_from_file(BufReader::new(file))?;
            if symbols.is_empty() {
                return Err(CheckerError::ParseSymbolsFile(format!(
                    "no symbols found in {}",
                    raw
                )));
            }
            return Ok(symbols);
        }
        if self.symbols.is_empty() {
            return Ok(default_symbols());
        }
        self.symbols.iter().map(|s| s.parse()).collect()
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
