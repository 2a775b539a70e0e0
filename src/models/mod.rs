use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candlestick data
///
/// Only `close` feeds the indicator; the rest rides along so OHLCV exports
/// can be read as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    #[serde(default)]
    pub token: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// Closing prices in chronological order
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
