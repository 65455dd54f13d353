//! Error types shared between the price checker library and the CLI.
//!
//! The `CheckerError` enum unifies fetch failures (transport, HTTP status, malformed
//! exchange payloads), wallet storage failures, and user input validation so every
//! layer can propagate a single error type.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type shared by the library and the binary.
#[derive(Error, Debug)]
pub enum CheckerError {
    /// I/O error originating from the wallet file or a symbols file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport-level failure: connection, timeout, TLS, or body decoding.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The exchange answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {message}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Request URL without the query string.
        url: String,
        /// Exchange-provided `msg` field, or the raw body when there is none.
        message: String,
    },

    /// The response parsed as JSON but lacks an expected field or has the wrong shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A kline request returned a different number of candles than required.
    #[error("Expected {expected} candles for {pair}, got {got}")]
    CandleCount {
        /// Pair the candles were requested for.
        pair: String,
        /// Number of candles the computation needs.
        expected: usize,
        /// Number of candles actually returned.
        got: usize,
    },

    /// A kline request returned no candles at all.
    #[error("No candles returned for {0}")]
    EmptyHistory(String),

    /// A change ratio was requested against a zero reference price.
    #[error("Reference price for {0} is zero, cannot compute change")]
    ZeroReferencePrice(String),

    /// Wallet file exists but is not a JSON object of symbol -> number.
    #[error("Wallet file {} is not valid: {source}", .path.display())]
    Storage {
        /// Location of the offending file.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Symbol is empty or contains characters other than ASCII letters and digits.
    #[error("Invalid symbol: '{0}'")]
    InvalidSymbol(String),

    /// Amount cannot be stored as a JSON number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Error while parsing a symbols file into `Symbol` values.
    #[error("Parse symbols file error: {0}")]
    ParseSymbolsFile(String),

    /// Command-line arguments do not form a runnable command.
    #[error("{0}")]
    InvalidArgument(String),
}

impl CheckerError {
    /// Returns `true` for failures that come from talking to the exchange.
    ///
    /// Report loops treat these as per-symbol failures and keep going.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            CheckerError::Http(_)
                | CheckerError::Status { .. }
                | CheckerError::MalformedResponse(_)
                | CheckerError::CandleCount { .. }
                | CheckerError::EmptyHistory(_)
                | CheckerError::ZeroReferencePrice(_)
        )
    }
}
