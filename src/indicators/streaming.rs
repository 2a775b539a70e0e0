use chrono::{DateTime, Utc};

use super::rma::Rma;
use super::rsi::{rsi_value, RsiConfig};
use crate::error::Result;
use crate::models::Candle;

#[derive(Debug, Clone)]
enum Smoothing {
    /// Collecting the first `period` gains and losses for the seed average
    Seeding { gains: Vec<f64>, losses: Vec<f64> },
    Ready { gain: Rma, loss: Rma },
}

#[derive(Debug, Clone, Copy)]
struct Bar {
    timestamp: Option<DateTime<Utc>>,
    close: f64,
}

/// Incremental RSI fed one bar at a time
///
/// Produces the same values as the batch calculation over the same closes.
/// A bar pushed with the timestamp of the latest bar replaces that bar's
/// close (a still-forming candle); the smoother is rolled back one step and
/// re-applied, so no history beyond the previous bar is kept.
#[derive(Debug, Clone)]
pub struct StreamingRsi {
    config: RsiConfig,
    last: Option<Bar>,
    prev_close: Option<f64>,
    state: Smoothing,
    before_last: Smoothing,
    latest_ts: Option<DateTime<Utc>>, // Newest timestamp ever pushed
    bars: usize,
}

impl StreamingRsi {
    pub fn new(config: RsiConfig) -> Result<Self> {
        config.validate()?;

        let empty = Smoothing::Seeding {
            gains: Vec::with_capacity(config.period),
            losses: Vec::with_capacity(config.period),
        };

        Ok(Self {
            config,
            last: None,
            prev_close: None,
            state: empty.clone(),
            before_last: empty,
            latest_ts: None,
            bars: 0,
        })
    }

    pub fn with_period(period: usize) -> Result<Self> {
        Self::new(RsiConfig::with_period(period))
    }

    /// Add or revise a bar and return the current RSI
    ///
    /// - newer timestamp: new bar
    /// - same timestamp: replaces the latest bar's close
    /// - older timestamp or non-finite close: ignored, current value returned
    /// - timestamp of a bar already superseded by `push_close`: ignored
    pub fn push(&mut self, timestamp: DateTime<Utc>, close: f64) -> Option<f64> {
        if !close.is_finite() {
            tracing::warn!("Ignoring non-finite close {} at {}", close, timestamp);
            return self.value();
        }

        let last_ts = self.last.and_then(|bar| bar.timestamp);
        match self.latest_ts {
            Some(latest) if timestamp < latest => {
                tracing::warn!(
                    "Ignoring out-of-order bar at {} (latest is {})",
                    timestamp,
                    latest
                );
                self.value()
            }
            // Same timestamp as an earlier bar that push_close has since superseded
            Some(latest) if timestamp == latest && last_ts != Some(timestamp) => {
                tracing::warn!("Ignoring bar at {}: no longer the latest bar", timestamp);
                self.value()
            }
            Some(latest) if timestamp == latest => self.revise(close),
            _ => {
                let value = self.advance(Some(timestamp), close);
                if self.last.and_then(|bar| bar.timestamp) == Some(timestamp) {
                    self.latest_ts = Some(timestamp);
                }
                value
            }
        }
    }

    /// Add a new bar without a timestamp
    pub fn push_close(&mut self, close: f64) -> Option<f64> {
        if !close.is_finite() {
            tracing::warn!("Ignoring non-finite close {}", close);
            return self.value();
        }
        self.advance(None, close)
    }

    pub fn push_candle(&mut self, candle: &Candle) -> Option<f64> {
        self.push(candle.timestamp, candle.close)
    }

    /// Latest RSI, `None` until `period + 1` bars have been seen
    pub fn value(&self) -> Option<f64> {
        match &self.state {
            Smoothing::Ready { gain, loss } => Some(rsi_value(
                gain.value(),
                loss.value(),
                self.config.zero_floor,
                self.config.flat_window,
            )),
            Smoothing::Seeding { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, Smoothing::Ready { .. })
    }

    /// Distinct bars consumed so far
    pub fn bars_seen(&self) -> usize {
        self.bars
    }

    pub fn config(&self) -> &RsiConfig {
        &self.config
    }

    fn advance(&mut self, timestamp: Option<DateTime<Utc>>, close: f64) -> Option<f64> {
        let Some(last) = self.last else {
            self.last = Some(Bar { timestamp, close });
            self.bars = 1;
            return None;
        };

        let change = close - last.close;
        if !change.is_finite() {
            tracing::warn!("Ignoring close {}: change from {} overflows", close, last.close);
            return self.value();
        }

        self.before_last = self.state.clone();
        self.apply(change);
        self.prev_close = Some(last.close);
        self.last = Some(Bar { timestamp, close });
        self.bars += 1;

        self.value()
    }

    fn revise(&mut self, close: f64) -> Option<f64> {
        let Some(prev_close) = self.prev_close else {
            // Only one bar so far; nothing to recompute
            if let Some(bar) = self.last.as_mut() {
                bar.close = close;
            }
            return None;
        };

        let change = close - prev_close;
        if !change.is_finite() {
            tracing::warn!("Ignoring revision {}: change from {} overflows", close, prev_close);
            return self.value();
        }

        self.state = self.before_last.clone();
        self.apply(change);
        if let Some(bar) = self.last.as_mut() {
            bar.close = close;
        }

        self.value()
    }

    fn apply(&mut self, change: f64) {
        let (gain, loss) = self.config.zero_floor.split(change);
        let period = self.config.period;

        let seeded = match &mut self.state {
            Smoothing::Seeding { gains, losses } => {
                gains.push(gain);
                losses.push(loss);
                (gains.len() == period)
                    .then(|| (Rma::seed(gains.as_slice()), Rma::seed(losses.as_slice())))
            }
            Smoothing::Ready {
                gain: avg_gain,
                loss: avg_loss,
            } => {
                avg_gain.step(gain);
                avg_loss.step(loss);
                None
            }
        };

        // Windows are never empty here; the period was validated in new()
        if let Some((Ok(gain), Ok(loss))) = seeded {
            tracing::debug!("RSI({}) seeded after {} bars", period, self.bars + 1);
            self.state = Smoothing::Ready { gain, loss };
        }
    }
}
