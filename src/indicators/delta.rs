use super::policy::ZeroFloor;
use crate::error::{Result, RsiError};

/// Gains and losses between consecutive prices
///
/// Both vectors have `prices.len() - 1` entries and every entry is
/// non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaSeries {
    pub gains: Vec<f64>,
    pub losses: Vec<f64>,
}

impl DeltaSeries {
    pub fn len(&self) -> usize {
        self.gains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gains.is_empty()
    }
}

/// Split a price series into gain and loss series
///
/// `gain[i] = max(change, floor)`, `loss[i] = max(-change, floor)` where
/// `change = prices[i + 1] - prices[i]`.
pub fn extract_deltas(prices: &[f64], floor: ZeroFloor) -> Result<DeltaSeries> {
    if prices.len() < 2 {
        return Err(RsiError::InsufficientData {
            needed: 2,
            got: prices.len(),
        });
    }

    if let Some((index, &value)) = prices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(RsiError::NonFinitePrice { index, value });
    }

    let mut gains = Vec::with_capacity(prices.len() - 1);
    let mut losses = Vec::with_capacity(prices.len() - 1);

    for (i, pair) in prices.windows(2).enumerate() {
        let change = pair[1] - pair[0];
        if !change.is_finite() {
            return Err(RsiError::NonFiniteChange { index: i });
        }

        let (gain, loss) = floor.split(change);
        gains.push(gain);
        losses.push(loss);
    }

    Ok(DeltaSeries { gains, losses })
}
