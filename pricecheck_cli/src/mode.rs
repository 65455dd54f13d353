//! Resolution of parsed arguments into exactly one command.
//!
//! Precedence: `--ath` > `--wallet update` > `--wallet show` > `--wallet clear` >
//! default price report.
use pricecheck_common::symbols::Symbol;
use pricecheck_common::{CheckerError, Result};

use crate::args::{Args, WalletAction};

/// The single command a run performs.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// All-time-highs report over the configured symbols.
    AllTimeHighs,
    /// Set `symbol` to `amount` in the wallet.
    WalletUpdate {
        /// Symbol to set.
        symbol: Symbol,
        /// New held amount.
        amount: f64,
    },
    /// Price report restricted to wallet symbols.
    WalletShow,
    /// Remove one symbol, or everything on `None`.
    WalletClear(Option<Symbol>),
    /// Price report over the configured symbols, valued against the wallet.
    Prices,
}

impl Mode {
    /// Pick the command implied by `args`.
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.ath {
            return Ok(Mode::AllTimeHighs);
        }
        match args.wallet {
            Some(WalletAction::Update) => match (&args.symbol, args.amount) {
                (Some(symbol), Some(amount)) => Ok(Mode::WalletUpdate {
                    symbol: symbol.parse()?,
                    amount,
                }),
                _ => Err(CheckerError::InvalidArgument(
                    "Must provide SYMBOL and AMOUNT to update the wallet.".to_string(),
                )),
            },
            Some(WalletAction::Show) => Ok(Mode::WalletShow),
            Some(WalletAction::Clear) => {
                let symbol = args.symbol.as_deref().map(str::parse::<Symbol>).transpose()?;
                Ok(Mode::WalletClear(symbol))
            }
            None => Ok(Mode::Prices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn mode(argv: &[&str]) -> Result<Mode> {
        let args =
            Args::try_parse_from(std::iter::once("pricecheck").chain(argv.iter().copied())).unwrap();
        Mode::from_args(&args)
    }

    fn sym(s: &str) -> Symbol {
        s.parse().unwrap()
    }

    #[test]
    fn default_is_prices() {
        assert_eq!(mode(&[]).unwrap(), Mode::Prices);
    }

    #[test]
    fn ath_wins_over_wallet() {
        assert_eq!(
            mode(&["--ath", "--wallet", "update", "BTC", "1"]).unwrap(),
            Mode::AllTimeHighs
        );
        assert_eq!(mode(&["--wallet", "clear", "--ath"]).unwrap(), Mode::AllTimeHighs);
    }

    #[test]
    fn wallet_update() {
        assert_eq!(
            mode(&["--wallet", "update", "btc", "0.5"]).unwrap(),
            Mode::WalletUpdate {
                symbol: sym("BTC"),
                amount: 0.5
            }
        );
    }

    #[test]
    fn wallet_update_requires_symbol_and_amount() {
        let err = mode(&["--wallet", "update", "BTC"]).unwrap_err();
        assert_eq!(err.to_string(), "Must provide SYMBOL and AMOUNT to update the wallet.");
        assert!(mode(&["--wallet", "update"]).is_err());
    }

    #[test]
    fn wallet_show() {
        assert_eq!(mode(&["--wallet", "show"]).unwrap(), Mode::WalletShow);
    }

    #[test]
    fn wallet_clear_with_and_without_symbol() {
        assert_eq!(
            mode(&["--wallet", "clear", "eth"]).unwrap(),
            Mode::WalletClear(Some(sym("ETH")))
        );
        assert_eq!(mode(&["--wallet", "clear"]).unwrap(), Mode::WalletClear(None));
    }

    #[test]
    fn invalid_symbol_rejected() {
        let err = mode(&["--wallet", "clear", "E$H"]).unwrap_err();
        assert!(matches!(err, CheckerError::InvalidSymbol(_)));
    }
}
