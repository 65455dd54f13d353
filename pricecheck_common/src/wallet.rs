//! Local record of held quantities per symbol.
//!
//! The wallet is a single JSON object (`{"BTC": 0.5, "ETH": 2.0}`) read in full when
//! loaded and rewritten in full after every mutation, so the file always mirrors the
//! in-memory map once a call returns. There is no locking: one process owns the file
//! at a time.
use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CheckerError;
use crate::result::Result;
use crate::symbols::Symbol;

/// What a call to [`Wallet::clear`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The symbol was held and has been removed.
    Removed(Symbol),
    /// The symbol was not held; nothing changed.
    NotFound(Symbol),
    /// Every entry was removed.
    ClearedAll,
}

/// Symbol -> amount map persisted write-through to a JSON file.
#[derive(Debug)]
pub struct Wallet {
    path: PathBuf,
    holdings: BTreeMap<Symbol, f64>,
}

impl Wallet {
    /// Load the wallet at `path`, starting empty when the file does not exist.
    ///
    /// Keys are normalised like CLI symbols; when two keys collapse onto the same symbol
    /// (`"btc"` and `"BTC"`) the one appearing last in the file wins. Keys that are not
    /// valid symbols make the file a `Storage` error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let holdings = if path.exists() {
            let bytes = fs::read(&path)?;
            serde_json::from_slice(&bytes).map_err(|source| CheckerError::Storage {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };
        debug!("Loaded wallet with {} symbols from {}", holdings.len(), path.display());
        Ok(Self { path, holdings })
    }

    /// File backing this wallet.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Held amount, or zero when the symbol is absent.
    pub fn get(&self, symbol: &Symbol) -> f64 {
        self.holdings.get(symbol).copied().unwrap_or(0.0)
    }

    /// Insert or overwrite the amount for `symbol` and persist.
    pub fn update(&mut self, symbol: Symbol, amount: f64) -> Result<()> {
        if !amount.is_finite() {
            return Err(CheckerError::InvalidAmount(amount));
        }
        self.holdings.insert(symbol, amount);
        self.save()
    }

    /// Remove `symbol`, or everything when `symbol` is `None`, and persist.
    ///
    /// Clearing a symbol that is not held is not an error and leaves the file untouched.
    pub fn clear(&mut self, symbol: Option<Symbol>) -> Result<ClearOutcome> {
        match symbol {
            Some(symbol) => {
                if self.holdings.remove(&symbol).is_none() {
                    return Ok(ClearOutcome::NotFound(symbol));
                }
                self.save()?;
                Ok(ClearOutcome::Removed(symbol))
            }
            None => {
                self.holdings.clear();
                self.save()?;
                Ok(ClearOutcome::ClearedAll)
            }
        }
    }

    /// All held symbols in map order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.holdings.keys().cloned().collect()
    }

    /// Number of held symbols.
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// `true` when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Rewrite the whole document, pretty-printed with 4-space indentation.
    fn save(&self) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.holdings.serialize(&mut serializer)?;
        fs::write(&self.path, buf)?;
        debug!("Saved wallet with {} symbols to {}", self.holdings.len(), self.path.display());
        Ok(())
    }
}
