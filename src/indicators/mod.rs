// Technical indicators module
// Implements RSI on Wilder's smoothing: deltas -> RMA -> combiner

pub mod delta;
pub mod policy;
pub mod rma;
pub mod rsi;
pub mod streaming;

pub use delta::{extract_deltas, DeltaSeries};
pub use policy::{round_half_away, FlatWindow, ZeroFloor};
pub use rma::{smooth, Rma};
pub use rsi::{
    combine, compute_rsi, compute_rsi_with, rsi_from_candles, rsi_value, RsiConfig,
    DEFAULT_PERIOD,
};
pub use streaming::StreamingRsi;
