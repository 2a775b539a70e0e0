//! Calculate Relative Strength Index (RSI)
//!
//! RSI measures the magnitude of recent price changes to evaluate
//! overbought or oversold conditions.
//!
//! Values:
//! - RSI > 70: Overbought
//! - RSI < 30: Oversold
//!
//! Gains and losses are smoothed with Wilder's RMA (see [`super::rma`]).

use serde::{Deserialize, Serialize};

use super::delta::extract_deltas;
use super::policy::{round_half_away, FlatWindow, ZeroFloor};
use super::rma::smooth;
use crate::error::{check_period, Result, RsiError};
use crate::models::{closes, Candle};

pub const DEFAULT_PERIOD: usize = 14;

/// Decimal places kept on every RSI value
pub const RSI_DECIMALS: u32 = 2;

/// Configuration for RSI computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    pub period: usize,
    pub zero_floor: ZeroFloor,   // Floor for the gain/loss split
    pub flat_window: FlatWindow, // RSI when a window has no movement at all
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            zero_floor: ZeroFloor::Exact,
            flat_window: FlatWindow::Neutral,
        }
    }
}

impl RsiConfig {
    pub fn with_period(period: usize) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_period(self.period)
    }

    /// Prices needed before the first RSI value exists
    pub fn min_prices(&self) -> usize {
        self.period + 1
    }
}

/// RSI for one pair of smoothed gain and loss, rounded
///
/// A smoothed value at or below the floor counts as no movement on that
/// side, so the Epsilon floor (or its underflow to 0.0) resolves like 0.0.
pub fn rsi_value(
    avg_gain: f64,
    avg_loss: f64,
    zero_floor: ZeroFloor,
    flat_window: FlatWindow,
) -> f64 {
    let floor = zero_floor.value();
    let rsi = if avg_loss <= floor {
        if avg_gain <= floor {
            flat_window.value()
        } else {
            100.0
        }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    };

    round_half_away(rsi, RSI_DECIMALS)
}

/// Merge smoothed gains and losses into an RSI series
pub fn combine(
    smoothed_gains: &[f64],
    smoothed_losses: &[f64],
    zero_floor: ZeroFloor,
    flat_window: FlatWindow,
) -> Result<Vec<f64>> {
    if smoothed_gains.len() != smoothed_losses.len() {
        return Err(RsiError::LengthMismatch {
            gains: smoothed_gains.len(),
            losses: smoothed_losses.len(),
        });
    }

    Ok(smoothed_gains
        .iter()
        .zip(smoothed_losses)
        .map(|(&gain, &loss)| rsi_value(gain, loss, zero_floor, flat_window))
        .collect())
}

/// RSI series with the default policies
///
/// Returns `prices.len() - period` values; value `j` belongs to
/// `prices[j + period]`.
pub fn compute_rsi(prices: &[f64], period: usize) -> Result<Vec<f64>> {
    compute_rsi_with(prices, &RsiConfig::with_period(period))
}

/// RSI series with explicit policies
pub fn compute_rsi_with(prices: &[f64], config: &RsiConfig) -> Result<Vec<f64>> {
    config.validate()?;
    if prices.len() < config.min_prices() {
        return Err(RsiError::InsufficientData {
            needed: config.min_prices(),
            got: prices.len(),
        });
    }

    let deltas = extract_deltas(prices, config.zero_floor)?;
    let avg_gains = smooth(&deltas.gains, config.period)?;
    let avg_losses = smooth(&deltas.losses, config.period)?;
    let rsi = combine(&avg_gains, &avg_losses, config.zero_floor, config.flat_window)?;

    tracing::debug!(
        "RSI({}) over {} prices -> {} values (floor={:?}, flat={:?})",
        config.period,
        prices.len(),
        rsi.len(),
        config.zero_floor,
        config.flat_window
    );

    Ok(rsi)
}

/// RSI series over candle closes
pub fn rsi_from_candles(candles: &[Candle], config: &RsiConfig) -> Result<Vec<f64>> {
    compute_rsi_with(&closes(candles), config)
}
