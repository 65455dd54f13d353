//! Execution of a resolved `Mode` against the exchange and the wallet file.
//!
//! Output goes to any `Write` so wallet commands can be exercised without a terminal.
//! The wallet is loaded once per run and only by commands that need it; a corrupt
//! wallet file is fatal.
use log::{debug, info};
use pricecheck_common::http::ReqwestHttpClient;
use pricecheck_common::{ClearOutcome, PriceClient, ReportBuilder, Result, Settings, Wallet};
use std::io::Write;

use crate::mode::Mode;

/// Run `mode`, writing user-facing output to `out`.
pub fn execute<W: Write>(mode: &Mode, settings: &Settings, out: &mut W) -> Result<()> {
    debug!("Executing {:?} with {:?}", mode, settings);
    match mode {
        Mode::AllTimeHighs => {
            let prices = price_client(settings)?;
            let report = ReportBuilder::new(&prices).all_time_highs(&settings.symbols);
            write!(out, "{}", report)?;
        }
        Mode::Prices => {
            let wallet = Wallet::load(&settings.wallet_path)?;
            let prices = price_client(settings)?;
            let report = ReportBuilder::new(&prices).current_prices(&settings.symbols, Some(&wallet));
            write!(out, "{}", report)?;
        }
        Mode::WalletShow => {
            let wallet = Wallet::load(&settings.wallet_path)?;
            if wallet.is_empty() {
                info!("Wallet {} holds no symbols", wallet.path().display());
            }
            let prices = price_client(settings)?;
            let report = ReportBuilder::new(&prices).wallet_prices(&wallet);
            write!(out, "{}", report)?;
        }
        Mode::WalletUpdate { symbol, amount } => {
            let mut wallet = Wallet::load(&settings.wallet_path)?;
            wallet.update(symbol.clone(), *amount)?;
            info!("Wallet {} now holds {} symbols", wallet.path().display(), wallet.len());
            writeln!(out, "Updated wallet: {} = {:?}", symbol, amount)?;
        }
        Mode::WalletClear(symbol) => {
            let mut wallet = Wallet::load(&settings.wallet_path)?;
            match wallet.clear(symbol.clone())? {
                ClearOutcome::Removed(symbol) => writeln!(out, "Cleared {} from wallet.", symbol)?,
                ClearOutcome::NotFound(symbol) => {
                    writeln!(out, "Symbol '{}' not found in wallet.", symbol)?
                }
                ClearOutcome::ClearedAll => writeln!(out, "Cleared entire wallet.")?,
            }
        }
    }
    Ok(())
}

fn price_client(settings: &Settings) -> Result<PriceClient<ReqwestHttpClient>> {
    let http = ReqwestHttpClient::new(&settings.base_url, settings.timeout)?;
    Ok(PriceClient::new(http, settings))
}
