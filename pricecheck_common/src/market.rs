//! Market data returned by the exchange and the arithmetic done on it.
//!
//! Kline rows arrive as positional JSON arrays:
//! `[open_time, open, high, low, close, volume, close_time, ...]`, with prices encoded
//! as decimal strings. Only the first six fields are used.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::CheckerError;
use crate::result::Result;
use crate::symbols::Symbol;

/// One OHLCV candle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    /// Start of the candle period.
    pub open_time: DateTime<Utc>,
    /// First trade price.
    pub open: f64,
    /// Highest trade price.
    pub high: f64,
    /// Lowest trade price.
    pub low: f64,
    /// Last trade price.
    pub close: f64,
    /// Base asset volume.
    pub volume: f64,
}

impl Candle {
    /// Decode a single positional kline row.
    pub fn from_row(row: &Value) -> Result<Self> {
        let fields = row
            .as_array()
            .ok_or_else(|| CheckerError::MalformedResponse(format!("kline is not an array: {}", row)))?;
        if fields.len() < 6 {
            return Err(CheckerError::MalformedResponse(format!(
                "kline has {} fields, expected at least 6",
                fields.len()
            )));
        }
        let millis = fields[0]
            .as_i64()
            .ok_or_else(|| CheckerError::MalformedResponse(format!("bad kline open time: {}", fields[0])))?;
        let open_time = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| CheckerError::MalformedResponse(format!("kline open time out of range: {}", millis)))?;

        Ok(Candle {
            open_time,
            open: decimal_field(&fields[1], "open")?,
            high: decimal_field(&fields[2], "high")?,
            low: decimal_field(&fields[3], "low")?,
            close: decimal_field(&fields[4], "close")?,
            volume: decimal_field(&fields[5], "volume")?,
        })
    }

    /// Decode a kline response body, preserving the exchange's oldest-first order.
    pub fn list_from_value(body: &Value) -> Result<Vec<Self>> {
        body.as_array()
            .ok_or_else(|| CheckerError::MalformedResponse("klines body is not an array".to_string()))?
            .iter()
            .map(Candle::from_row)
            .collect()
    }
}

/// Prices are strings on the wire but plain numbers are accepted too.
fn decimal_field(value: &Value, name: &str) -> Result<f64> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| CheckerError::MalformedResponse(format!("bad {} value: {}", name, value)))
}

/// Body of the ticker price endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TickerPrice {
    pub(crate) price: Value,
}

impl TickerPrice {
    pub(crate) fn from_value(body: Value) -> Result<f64> {
        let ticker: TickerPrice = serde_json::from_value(body)
            .map_err(|e| CheckerError::MalformedResponse(format!("ticker price: {}", e)))?;
        decimal_field(&ticker.price, "price")
    }
}

/// Today's open and its change against yesterday's open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyChange {
    /// Open price of the current daily candle.
    pub open_today: f64,
    /// `(today - yesterday) / yesterday`, not scaled to percent.
    pub change_ratio: f64,
}

/// Highest price seen over the scanned monthly candles.
#[derive(Debug, Clone, PartialEq)]
pub struct AllTimeHigh {
    /// Asset the high belongs to.
    pub symbol: Symbol,
    /// Maximum candle high.
    pub price: f64,
    /// Open time of the month in which the high was printed.
    pub reached_at: DateTime<Utc>,
}

/// `(to - from) / from`, or `None` when `from` is zero.
pub fn change_ratio(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        None
    } else {
        Some((to - from) / from)
    }
}

/// Distance from the all-time high, already scaled to percent.
pub fn percent_from_ath(current: f64, ath: f64) -> Option<f64> {
    change_ratio(ath, current).map(|ratio| ratio * 100.0)
}
