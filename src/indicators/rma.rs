//! Wilder's smoothed moving average (RMA)
//!
//! First value is the simple average of the first `period` inputs. Each
//! later value is `alpha * x + (1 - alpha) * prev` with `alpha = 1 / period`.

use crate::error::{check_period, Result, RsiError};

/// One step of Wilder's smoothing
///
/// Holds only the previous smoothed value, so it serves both the batch
/// smoother and the streaming engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rma {
    alpha: f64,
    value: f64,
}

impl Rma {
    /// Seed from the plain mean of a full window
    ///
    /// The window length is the period, so an empty window is a zero period.
    pub fn seed(window: &[f64]) -> Result<Self> {
        check_period(window.len())?;

        let period = window.len() as f64;
        Ok(Self {
            alpha: 1.0 / period,
            value: window.iter().sum::<f64>() / period,
        })
    }

    /// Fold in the next raw value and return the new smoothed value
    pub fn step(&mut self, x: f64) -> f64 {
        self.value = self.alpha * x + (1.0 - self.alpha) * self.value;
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

/// Smooth a whole series
///
/// Returns `input.len() - period + 1` values.
pub fn smooth(input: &[f64], period: usize) -> Result<Vec<f64>> {
    check_period(period)?;
    if input.len() < period {
        return Err(RsiError::InsufficientData {
            needed: period,
            got: input.len(),
        });
    }

    let mut rma = Rma::seed(&input[..period])?;
    let mut out = Vec::with_capacity(input.len() - period + 1);
    out.push(rma.value());

    for &x in &input[period..] {
        out.push(rma.step(x));
    }

    Ok(out)
}
