//! Tabular price reports.
//!
//! A report is assembled symbol by symbol. A failed fetch for one symbol becomes an
//! `Error fetching data for X: ...` line in place of its row and the loop moves on, so
//! partial reports are normal. Reports render through `Display` with fixed column
//! widths; values are right-justified, currency as `$X.XX` and percentages as `X.XX%`.
use log::warn;
use std::fmt;

use crate::error::CheckerError;
use crate::http::HttpClient;
use crate::market::{change_ratio, percent_from_ath};
use crate::price_client::PriceClient;
use crate::result::Result;
use crate::symbols::Symbol;
use crate::wallet::Wallet;

const SYMBOL_WIDTH: usize = 8;

const OPEN_WIDTH: usize = 12;
const CURRENT_WIDTH: usize = 15;
const CHANGE_WIDTH: usize = 12;
const WALLET_WIDTH: usize = 15;
const PRICES_LINE: usize = SYMBOL_WIDTH + OPEN_WIDTH + CURRENT_WIDTH + CHANGE_WIDTH + WALLET_WIDTH;

const ATH_WIDTH: usize = 15;
const ATH_CURRENT_WIDTH: usize = 15;
const ATH_CHANGE_WIDTH: usize = 20;
const ATH_LINE: usize = SYMBOL_WIDTH + ATH_WIDTH + ATH_CURRENT_WIDTH + ATH_CHANGE_WIDTH;

/// One symbol's slot in a report: either its data row or the reason it is missing.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine<R> {
    /// Data fetched successfully.
    Row(R),
    /// Fetching failed; the rest of the report is unaffected.
    Failed {
        /// Symbol whose row is missing.
        symbol: Symbol,
        /// Rendered error.
        reason: String,
    },
}

impl<R> ReportLine<R> {
    fn from_result(symbol: &Symbol, result: Result<R>) -> Self {
        match result {
            Ok(row) => ReportLine::Row(row),
            Err(e) => {
                warn!("Error fetching data for {}: {}", symbol, e);
                ReportLine::Failed {
                    symbol: symbol.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn row(&self) -> Option<&R> {
        match self {
            ReportLine::Row(row) => Some(row),
            ReportLine::Failed { .. } => None,
        }
    }
}

impl<R: fmt::Display> fmt::Display for ReportLine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::Row(row) => write!(f, "{}", row),
            ReportLine::Failed { symbol, reason } => {
                write!(f, "Error fetching data for {}: {}", symbol, reason)
            }
        }
    }
}

/// Daily open, current price, change since open and optional holding value.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    /// Row symbol.
    pub symbol: Symbol,
    /// Open of today's daily candle.
    pub open_today: f64,
    /// Latest traded price.
    pub current: f64,
    /// `(current - open_today) / open_today`; scaled to percent only when rendered.
    pub change_ratio: f64,
    /// Held amount times current price, when a wallet is in play.
    pub wallet_value: Option<f64>,
}

impl fmt::Display for PriceRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wallet = match self.wallet_value {
            Some(value) => money(value),
            None => "-".to_string(),
        };
        write!(
            f,
            "{:<sw$}{:>ow$}{:>cw$}{:>chw$}{:>ww$}",
            self.symbol.as_str(),
            money(self.open_today),
            money(self.current),
            percent(self.change_ratio * 100.0),
            wallet,
            sw = SYMBOL_WIDTH,
            ow = OPEN_WIDTH,
            cw = CURRENT_WIDTH,
            chw = CHANGE_WIDTH,
            ww = WALLET_WIDTH,
        )
    }
}

/// All-time high, current price and distance from the high.
#[derive(Debug, Clone, PartialEq)]
pub struct AthRow {
    /// Row symbol.
    pub symbol: Symbol,
    /// Highest monthly candle high.
    pub ath: f64,
    /// Latest traded price.
    pub current: f64,
    /// `((current - ath) / ath) * 100`, already in percent.
    pub change_pct: f64,
}

impl fmt::Display for AthRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<sw$}{:>aw$}{:>cw$}{:>chw$}",
            self.symbol.as_str(),
            money(self.ath),
            money(self.current),
            percent(self.change_pct),
            sw = SYMBOL_WIDTH,
            aw = ATH_WIDTH,
            cw = ATH_CURRENT_WIDTH,
            chw = ATH_CHANGE_WIDTH,
        )
    }
}

/// Current-prices report, optionally valued against a wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceReport {
    /// One entry per requested symbol, in request order.
    pub lines: Vec<ReportLine<PriceRow>>,
    /// Sum of row wallet values; `None` when no wallet was supplied.
    pub total: Option<f64>,
}

impl PriceReport {
    /// Successfully fetched rows.
    pub fn rows(&self) -> impl Iterator<Item = &PriceRow> {
        self.lines.iter().filter_map(ReportLine::row)
    }
}

impl fmt::Display for PriceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Prices ---")?;
        writeln!(
            f,
            "{:<sw$}{:>ow$}{:>cw$}{:>chw$}{:>ww$}",
            "Symbol",
            "Open Price",
            "Current Price",
            "Change (%)",
            "Wallet Value",
            sw = SYMBOL_WIDTH,
            ow = OPEN_WIDTH,
            cw = CURRENT_WIDTH,
            chw = CHANGE_WIDTH,
            ww = WALLET_WIDTH,
        )?;
        writeln!(f, "{}", "-".repeat(PRICES_LINE))?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        if let Some(total) = self.total {
            writeln!(f, "{}", "-".repeat(PRICES_LINE))?;
            writeln!(
                f,
                "{:<lw$}{:>ww$}",
                "Total Wallet Value:",
                money(total),
                lw = PRICES_LINE - WALLET_WIDTH,
                ww = WALLET_WIDTH,
            )?;
        }
        Ok(())
    }
}

/// All-time-highs report.
#[derive(Debug, Clone, PartialEq)]
pub struct AthReport {
    /// One entry per requested symbol, in request order.
    pub lines: Vec<ReportLine<AthRow>>,
}

impl AthReport {
    /// Successfully fetched rows.
    pub fn rows(&self) -> impl Iterator<Item = &AthRow> {
        self.lines.iter().filter_map(ReportLine::row)
    }
}

impl fmt::Display for AthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{:<lw$}", "--- All-Time Highs ---", lw = ATH_LINE)?;
        writeln!(
            f,
            "{:<sw$}{:>aw$}{:>cw$}{:>chw$}",
            "Symbol",
            "ATH",
            "Current Price",
            "Change from ATH (%)",
            sw = SYMBOL_WIDTH,
            aw = ATH_WIDTH,
            cw = ATH_CURRENT_WIDTH,
            chw = ATH_CHANGE_WIDTH,
        )?;
        writeln!(f, "{}", "-".repeat(ATH_LINE))?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn money(value: f64) -> String {
    format!("${:.2}", value)
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Builds reports from a price client, one symbol at a time in the order given.
pub struct ReportBuilder<'a, H> {
    prices: &'a PriceClient<H>,
}

impl<'a, H: HttpClient> ReportBuilder<'a, H> {
    /// Create a builder on top of `prices`.
    pub fn new(prices: &'a PriceClient<H>) -> Self {
        Self { prices }
    }

    /// Open, current price and daily change per symbol. With a wallet, each row is
    /// valued at `amount * current` and a total is kept.
    pub fn current_prices(&self, symbols: &[Symbol], wallet: Option<&Wallet>) -> PriceReport {
        let lines: Vec<_> = symbols
            .iter()
            .map(|symbol| ReportLine::from_result(symbol, self.price_row(symbol, wallet)))
            .collect();
        let total = wallet.map(|_| {
            lines
                .iter()
                .filter_map(ReportLine::row)
                .filter_map(|row| row.wallet_value)
                .sum::<f64>()
        });
        PriceReport { lines, total }
    }

    /// The current-prices report restricted to the symbols held in `wallet`.
    pub fn wallet_prices(&self, wallet: &Wallet) -> PriceReport {
        self.current_prices(&wallet.symbols(), Some(wallet))
    }

    /// All-time high, current price and percent below the high per symbol.
    pub fn all_time_highs(&self, symbols: &[Symbol]) -> AthReport {
        let lines = symbols
            .iter()
            .map(|symbol| ReportLine::from_result(symbol, self.ath_row(symbol)))
            .collect();
        AthReport { lines }
    }

    fn price_row(&self, symbol: &Symbol, wallet: Option<&Wallet>) -> Result<PriceRow> {
        let pair = self.prices.pair(symbol);
        let daily = self.prices.fetch_daily_open_and_change(&pair)?;
        let current = self.prices.fetch_current_price(&pair)?;
        let change = change_ratio(daily.open_today, current)
            .ok_or_else(|| CheckerError::ZeroReferencePrice(pair.to_string()))?;

        Ok(PriceRow {
            symbol: symbol.clone(),
            open_today: daily.open_today,
            current,
            change_ratio: change,
            wallet_value: wallet.map(|w| w.get(symbol) * current),
        })
    }

    fn ath_row(&self, symbol: &Symbol) -> Result<AthRow> {
        let ath = self.prices.fetch_all_time_high(symbol)?;
        let current = self.prices.fetch_current_price(&self.prices.pair(symbol))?;
        let change_pct = percent_from_ath(current, ath.price)
            .ok_or_else(|| CheckerError::ZeroReferencePrice(self.prices.pair(symbol).to_string()))?;

        Ok(AthRow {
            symbol: symbol.clone(),
            ath: ath.price,
            current,
            change_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::http::stub::{StubHttpClient, kline};
    use serde_json::json;
    use temp_dir::TempDir;

    fn sym(s: &str) -> Symbol {
        s.parse().unwrap()
    }

    fn symbols(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|s| sym(s)).collect()
    }

    fn full_stub() -> StubHttpClient {
        StubHttpClient::default()
            .with_daily("BTCUSDT", "40000", "42000")
            .with_price("BTCUSDT", "43050")
            .with_daily("ETHUSDT", "2000", "2200")
            .with_price("ETHUSDT", "2100")
            .with_daily("LINKUSDT", "14", "15")
            .with_price("LINKUSDT", "15.3")
            .with_daily("DOTUSDT", "7", "7.5")
            .with_price("DOTUSDT", "7.2")
            .with_daily("ADAUSDT", "0.5", "0.6")
            .with_price("ADAUSDT", "0.55")
    }

    fn client(stub: StubHttpClient) -> PriceClient<StubHttpClient> {
        PriceClient::new(stub, &Settings::default())
    }

    #[test]
    fn prices_report_with_wallet_has_header_rows_and_total() {
        let dir = TempDir::new().unwrap();
        let mut wallet = Wallet::load(dir.path().join("wallet.json")).unwrap();
        wallet.update(sym("BTC"), 0.5).unwrap();
        wallet.update(sym("ETH"), 2.0).unwrap();

        let prices = client(full_stub());
        let names = symbols(&["BTC", "ETH", "LINK", "DOT", "ADA"]);
        let report = ReportBuilder::new(&prices).current_prices(&names, Some(&wallet));

        assert_eq!(report.rows().count(), 5);
        let total = report.total.unwrap();
        assert!((total - (0.5 * 43050.0 + 2.0 * 2100.0)).abs() < 1e-9);

        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        // blank, title, header, rule, 5 rows, rule, total
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "--- Prices ---");
        assert_eq!(
            lines[2],
            "Symbol    Open Price  Current Price  Change (%)   Wallet Value"
        );
        assert_eq!(lines[3], "-".repeat(62));
        assert_eq!(
            lines[4],
            "BTC        $42000.00      $43050.00       2.50%      $21525.00"
        );
        assert_eq!(
            lines[10],
            "Total Wallet Value:                                  $25725.00"
        );
    }

    #[test]
    fn change_column_is_against_todays_open() {
        let prices = client(full_stub());
        let report = ReportBuilder::new(&prices).current_prices(&symbols(&["ETH"]), None);
        let row = report.rows().next().unwrap();
        assert_eq!(row.open_today, 2200.0);
        assert!((row.change_ratio - (-100.0 / 2200.0)).abs() < 1e-12);
        assert!(row.to_string().contains("-4.55%"));
    }

    #[test]
    fn prices_report_without_wallet_has_no_total() {
        let prices = client(full_stub());
        let report = ReportBuilder::new(&prices).current_prices(&symbols(&["BTC"]), None);
        assert_eq!(report.total, None);
        let text = report.to_string();
        assert!(!text.contains("Total Wallet Value"));
        assert!(text.lines().nth(4).unwrap().ends_with(&format!("{:>15}", "-")));
    }

    #[test]
    fn one_failure_does_not_stop_the_report() {
        let stub = StubHttpClient::default()
            .with_daily("BTCUSDT", "40000", "42000")
            .with_price("BTCUSDT", "43050")
            .with_daily("ETHUSDT", "2000", "2200")
            .with_price("ETHUSDT", "2100")
            .with_daily("DOTUSDT", "7", "7.5")
            .with_price("DOTUSDT", "7.2")
            .with_daily("ADAUSDT", "0.5", "0.6")
            .with_price("ADAUSDT", "0.55");
        let prices = client(stub);
        let names = symbols(&["BTC", "ETH", "LINK", "DOT", "ADA"]);
        let report = ReportBuilder::new(&prices).current_prices(&names, None);

        assert_eq!(report.lines.len(), 5);
        assert_eq!(report.rows().count(), 4);
        let order: Vec<&str> = report.rows().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, vec!["BTC", "ETH", "DOT", "ADA"]);

        let text = report.to_string();
        let errors: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("Error fetching data for"))
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error fetching data for LINK: HTTP 400"));
        assert_eq!(text.lines().nth(6).unwrap(), errors[0]);
    }

    #[test]
    fn symbols_are_fetched_in_order_one_call_per_metric() {
        let prices = client(full_stub());
        ReportBuilder::new(&prices).current_prices(&symbols(&["ETH", "BTC"]), None);
        let calls = prices.http().calls.borrow().clone();
        assert_eq!(
            calls,
            vec![
                "/api/v3/klines ETHUSDT 1d",
                "/api/v3/ticker/price ETHUSDT ",
                "/api/v3/klines BTCUSDT 1d",
                "/api/v3/ticker/price BTCUSDT ",
            ]
        );
    }

    #[test]
    fn wallet_report_uses_wallet_symbols() {
        let dir = TempDir::new().unwrap();
        let mut wallet = Wallet::load(dir.path().join("wallet.json")).unwrap();
        wallet.update(sym("ADA"), 1000.0).unwrap();

        let prices = client(full_stub());
        let report = ReportBuilder::new(&prices).wallet_prices(&wallet);
        assert_eq!(report.rows().count(), 1);
        let row = report.rows().next().unwrap();
        assert_eq!(row.symbol, sym("ADA"));
        assert!((row.wallet_value.unwrap() - 550.0).abs() < 1e-9);
        assert!((report.total.unwrap() - 550.0).abs() < 1e-9);
    }

    #[test]
    fn empty_wallet_report_has_zero_total() {
        let dir = TempDir::new().unwrap();
        let wallet = Wallet::load(dir.path().join("wallet.json")).unwrap();
        let prices = client(full_stub());
        let report = ReportBuilder::new(&prices).wallet_prices(&wallet);
        assert_eq!(report.rows().count(), 0);
        assert!(report.to_string().ends_with("$0.00\n"));
    }

    #[test]
    fn ath_report() {
        let stub = StubHttpClient::default()
            .with_klines(
                "BTCUSDT",
                "1M",
                json!([
                    kline(1_635_724_800_000, "61000", "69000"),
                    kline(1_640_995_200_000, "46000", "48000"),
                ]),
            )
            .with_price("BTCUSDT", "45000");
        let prices = client(stub);
        let report = ReportBuilder::new(&prices).all_time_highs(&symbols(&["BTC", "XRP"]));

        let row = report.rows().next().unwrap();
        assert!((row.change_pct - (-34.7826)).abs() < 1e-3);

        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], format!("{:<58}", "--- All-Time Highs ---"));
        assert_eq!(
            lines[2],
            "Symbol              ATH  Current Price Change from ATH (%)"
        );
        assert_eq!(lines[3], "-".repeat(58));
        assert_eq!(
            lines[4],
            "BTC           $69000.00      $45000.00             -34.78%"
        );
        assert!(lines[5].starts_with("Error fetching data for XRP:"));
    }
}
