//! Queries against the exchange's public market-data endpoints.
//!
//! Every call is one independent round trip: no retries, no caching. Callers issue
//! them serially, one symbol at a time.
use log::debug;

use crate::config::Settings;
use crate::error::CheckerError;
use crate::http::HttpClient;
use crate::market::{AllTimeHigh, Candle, DailyChange, TickerPrice, change_ratio};
use crate::result::Result;
use crate::symbols::{Interval, Pair, Symbol};

const TICKER_PRICE_PATH: &str = "/api/v3/ticker/price";
const KLINES_PATH: &str = "/api/v3/klines";
/// Yesterday's and today's daily candle.
const DAILY_CANDLES: usize = 2;

/// Typed access to spot price and kline data.
#[derive(Debug, Clone)]
pub struct PriceClient<H> {
    http: H,
    unit: String,
    ath_candle_limit: u16,
}

impl<H: HttpClient> PriceClient<H> {
    /// Create a client quoting every symbol against `settings.unit`.
    pub fn new(http: H, settings: &Settings) -> Self {
        Self {
            http,
            unit: settings.unit.clone(),
            ath_candle_limit: settings.ath_candle_limit,
        }
    }

    /// Build the query pair for `symbol` in this client's quote unit.
    pub fn pair(&self, symbol: &Symbol) -> Pair {
        symbol.pair(&self.unit)
    }

    /// Latest traded price for `pair`.
    pub fn fetch_current_price(&self, pair: &Pair) -> Result<f64> {
        let body = self
            .http
            .get_json(TICKER_PRICE_PATH, &[("symbol", pair.to_string())])?;
        let price = TickerPrice::from_value(body)?;
        debug!("{} current price {}", pair, price);
        Ok(price)
    }

    /// Today's open and the change ratio from yesterday's open.
    pub fn fetch_daily_open_and_change(&self, pair: &Pair) -> Result<DailyChange> {
        let candles = self.fetch_klines(pair, Interval::Day, DAILY_CANDLES as u16)?;
        if candles.len() != DAILY_CANDLES {
            return Err(CheckerError::CandleCount {
                pair: pair.to_string(),
                expected: DAILY_CANDLES,
                got: candles.len(),
            });
        }
        let yesterday = candles[0].open;
        let today = candles[1].open;
        let change_ratio =
            change_ratio(yesterday, today).ok_or_else(|| CheckerError::ZeroReferencePrice(pair.to_string()))?;
        debug!("{} open {} (yesterday {}), ratio {}", pair, today, yesterday, change_ratio);

        Ok(DailyChange {
            open_today: today,
            change_ratio,
        })
    }

    /// Maximum monthly high over the last `ath_candle_limit` months.
    pub fn fetch_all_time_high(&self, symbol: &Symbol) -> Result<AllTimeHigh> {
        let pair = self.pair(symbol);
        let candles = self.fetch_klines(&pair, Interval::Month, self.ath_candle_limit)?;
        let best = candles
            .iter()
            .max_by(|a, b| a.high.total_cmp(&b.high))
            .ok_or_else(|| CheckerError::EmptyHistory(pair.to_string()))?;
        debug!(
            "{} all-time high {} in month of {} ({} months scanned)",
            pair,
            best.high,
            best.open_time.format("%Y-%m"),
            candles.len()
        );

        Ok(AllTimeHigh {
            symbol: symbol.clone(),
            price: best.high,
            reached_at: best.open_time,
        })
    }

    #[cfg(test)]
    pub(crate) fn http(&self) -> &H {
        &self.http
    }

    fn fetch_klines(&self, pair: &Pair, interval: Interval, limit: u16) -> Result<Vec<Candle>> {
        let body = self.http.get_json(
            KLINES_PATH,
            &[
                ("symbol", pair.to_string()),
                ("interval", interval.to_string()),
                ("limit", limit.to_string()),
            ],
        )?;
        Candle::list_from_value(&body)
    }
}
