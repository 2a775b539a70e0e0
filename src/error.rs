use thiserror::Error;

/// Errors surfaced by the RSI engine
///
/// Zero-loss windows are not errors: the combiner resolves them to a
/// boundary value and never reports them here.
#[derive(Error, Debug)]
pub enum RsiError {
    #[error("Insufficient data: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Invalid period: {0} (must be at least 1)")]
    InvalidPeriod(i64),

    #[error("Non-finite price {value} at index {index}")]
    NonFinitePrice { index: usize, value: f64 },

    #[error("Price change overflowed at index {index}")]
    NonFiniteChange { index: usize },

    #[error("Smoothed series length mismatch: {gains} gains vs {losses} losses")]
    LengthMismatch { gains: usize, losses: usize },

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Input error: {0}")]
    Input(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RsiError>;

/// Fail fast on a zero period
pub(crate) fn check_period(period: usize) -> Result<()> {
    if period == 0 {
        return Err(RsiError::InvalidPeriod(0));
    }
    Ok(())
}
