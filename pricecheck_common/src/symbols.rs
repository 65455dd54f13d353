//! Asset symbols, trading pairs, and kline intervals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

use crate::error::CheckerError;

/// Upper-case asset identifier such as `BTC`.
///
/// Deserialization goes through the same checks as `FromStr`, so wallet keys read from
/// disk are normalised too.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Borrow the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pair this symbol with a quote unit, e.g. `BTC` + `USDT`.
    pub fn pair(&self, unit: &str) -> Pair {
        Pair(format!("{}{}", self.0, unit))
    }
}

impl FromStr for Symbol {
    type Err = CheckerError;

    /// Trims and upper-cases the input. Rejects empty input and anything that is not
    /// ASCII alphanumeric.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CheckerError::InvalidSymbol(s.to_string()));
        }
        Ok(Symbol(trimmed.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for Symbol {
    type Error = CheckerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exchange query key: base symbol and quote unit concatenated with no separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair(String);

impl Pair {
    /// Borrow the pair as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Candle widths requested from the kline endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Interval {
    /// Daily candles.
    #[strum(serialize = "1d")]
    Day,
    /// Monthly candles.
    #[strum(serialize = "1M")]
    Month,
}

/// Trait providing file parsing for symbols.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace, or new lines; blank entries are
    /// skipped. Returns an error if any entry is not a valid symbol.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Symbol>, CheckerError>;
}

impl SymbolParser for Symbol {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, CheckerError> {
        let mut symbols = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(CheckerError::Io)?;
            for entry in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if entry.is_empty() {
                    continue;
                }
                match entry.parse::<Self>() {
                    Ok(symbol) => symbols.push(symbol),
                    Err(e) => return Err(CheckerError::ParseSymbolsFile(e.to_string())),
                }
            }
        }
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn symbol_is_normalised() {
        let symbol: Symbol = " eth ".parse().unwrap();
        assert_eq!(symbol.as_str(), "ETH");
    }

    #[test]
    fn symbol_rejects_garbage() {
        assert!("".parse::<Symbol>().is_err());
        assert!("BTC/USDT".parse::<Symbol>().is_err());
    }

    #[test]
    fn deserialize_normalises_and_validates() {
        let symbol: Symbol = serde_json::from_str(r#"" btc ""#).unwrap();
        assert_eq!(symbol.as_str(), "BTC");
        assert!(serde_json::from_str::<Symbol>(r#""E-TH""#).is_err());
        assert_eq!(serde_json::to_string(&symbol).unwrap(), r#""BTC""#);
    }

    #[test]
    fn pair_concatenates_without_separator() {
        let symbol: Symbol = "BTC".parse().unwrap();
        assert_eq!(symbol.pair("USDT").as_str(), "BTCUSDT");
    }

    #[test]
    fn interval_wire_names() {
        assert_eq!(Interval::Day.to_string(), "1d");
        assert_eq!(Interval::Month.to_string(), "1M");
        assert_eq!("1M".parse::<Interval>().unwrap(), Interval::Month);
    }

    #[test]
    fn parse_file_with_mixed_separators() {
        let input = Cursor::new("btc, eth\n\nLINK DOT\nada\n");
        let symbols = Symbol::parse_from_file(input).unwrap();
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["BTC", "ETH", "LINK", "DOT", "ADA"]);
    }

    #[test]
    fn parse_file_reports_bad_entry() {
        let input = Cursor::new("BTC\nE-TH\n");
        let err = Symbol::parse_from_file(input).unwrap_err();
        assert!(matches!(err, CheckerError::ParseSymbolsFile(_)));
    }
}
