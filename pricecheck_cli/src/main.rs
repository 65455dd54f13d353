//! Crypto price checker — prints spot prices, daily change, all-time highs and wallet
//! value for a list of symbols using the exchange's public REST API, and keeps a small
//! local wallet of held amounts in a JSON file.
//!
//! Usage example (CLI):
//! ```bash
//! pricecheck                              # prices for the default symbols
//! pricecheck --ath                        # all-time highs
//! pricecheck --wallet update BTC 0.5      # set a holding
//! pricecheck --wallet show                # value the wallet
//! pricecheck --wallet clear [SYMBOL]      # drop one holding or all of them
//! ```
//!
//! Symbols are fetched one at a time; a failure for one symbol prints an error line in
//! its place and the report continues.
#![warn(missing_docs)]
mod args;
mod commands;
mod mode;

use crate::args::Args;
use crate::mode::Mode;
use clap::Parser;
use log::{LevelFilter, debug};
use pricecheck_common::Result;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Run failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = args.settings()?;
    let mode = Mode::from_args(args)?;
    let stdout = io::stdout();
    commands::execute(&mode, &settings, &mut stdout.lock())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
