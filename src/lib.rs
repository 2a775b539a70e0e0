// Core modules
pub mod error;
pub mod indicators;
pub mod input;
pub mod models;
pub mod settings;

// Re-export commonly used types
pub use error::{Result, RsiError};
pub use indicators::{
    compute_rsi, compute_rsi_with, rsi_from_candles, FlatWindow, RsiConfig, StreamingRsi,
    ZeroFloor, DEFAULT_PERIOD,
};
pub use models::Candle;
