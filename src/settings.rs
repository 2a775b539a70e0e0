use std::path::Path;

use config::{Config, Environment, File};

use crate::error::{Result, RsiError};
use crate::indicators::{RsiConfig, DEFAULT_PERIOD};

/// Environment prefix for settings: RSI_PERIOD, RSI_ZERO_FLOOR, RSI_FLAT_WINDOW
pub const ENV_PREFIX: &str = "RSI";

/// Load RSI settings
///
/// Layers, later wins:
/// 1. Built-in defaults (period 14, exact floor, neutral flat window)
/// 2. Settings file, if given (format from extension: toml, json, yaml, ...)
/// 3. `RSI_*` environment variables
pub fn load(path: Option<&Path>) -> Result<RsiConfig> {
    load_with_prefix(path, ENV_PREFIX)
}

pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<RsiConfig> {
    let mut builder = Config::builder()
        .set_default("period", DEFAULT_PERIOD as i64)?
        .set_default("zero_floor", "exact")?
        .set_default("flat_window", "neutral")?;

    if let Some(path) = path {
        tracing::debug!("Loading RSI settings from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(env_prefix).try_parsing(true));

    let raw = builder.build()?;

    // Read signed first so a negative period is reported as such, not as a
    // failed conversion to usize
    let period = raw.get_int("period")?;
    if period <= 0 {
        return Err(RsiError::InvalidPeriod(period));
    }

    let settings: RsiConfig = raw.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}
