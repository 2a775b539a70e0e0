//! Numeric edge-case policy shared by the delta extractor and the combiner

use clap::ValueEnum;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Lower bound applied when splitting a price change into gain and loss
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ZeroFloor {
    /// Floor at 0.0. Flat stretches produce literal zeros.
    #[default]
    Exact,
    /// Floor at the smallest positive subnormal, so no entry is ever zero.
    /// Saturated windows land on a huge-but-finite RS instead of 0/0.
    Epsilon,
}

impl ZeroFloor {
    pub fn value(self) -> f64 {
        match self {
            ZeroFloor::Exact => 0.0,
            ZeroFloor::Epsilon => f64::from_bits(1),
        }
    }

    /// Split a signed change into (gain, loss)
    pub fn split(self, change: f64) -> (f64, f64) {
        let floor = self.value();
        (change.max(floor), (-change).max(floor))
    }
}

/// RSI reported for a window where both smoothed gain and loss are zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FlatWindow {
    /// No movement reads as balanced: 50
    #[default]
    Neutral,
    /// No movement reads as no strength: 0
    Zero,
}

impl FlatWindow {
    pub fn value(self) -> f64 {
        match self {
            FlatWindow::Neutral => 50.0,
            FlatWindow::Zero => 0.0,
        }
    }
}

/// Round to `dp` decimal places, ties away from zero
///
/// Goes through `Decimal` so that 57.345 (stored as 57.34499..) still
/// rounds up like the decimal literal it came from.
pub fn round_half_away(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
