use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, RsiError};
use crate::models::{closes, Candle};

/// Price data read from a file or stdin
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    /// `[44.34, 44.09, ...]`, or whitespace/comma separated plain text
    Closes(Vec<f64>),
    /// OHLCV records; only `close` is used
    Candles(Vec<Candle>),
}

impl PriceInput {
    pub fn closes(&self) -> Vec<f64> {
        match self {
            PriceInput::Closes(prices) => prices.clone(),
            PriceInput::Candles(candles) => closes(candles),
        }
    }

    pub fn candles(&self) -> Option<&[Candle]> {
        match self {
            PriceInput::Candles(candles) => Some(candles),
            PriceInput::Closes(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PriceInput::Closes(prices) => prices.len(),
            PriceInput::Candles(candles) => candles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a JSON array or a plain list of numbers
pub fn parse_prices(text: &str) -> Result<PriceInput> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RsiError::Input("no prices given".to_string()));
    }

    if text.starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }

    let prices = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| RsiError::Input(format!("invalid price '{}'", s)))
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(PriceInput::Closes(prices))
}

/// Read prices from a file, or from stdin when the path is `-`
pub fn read_prices(path: &Path) -> Result<PriceInput> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    let input = parse_prices(&text)?;
    tracing::info!("Loaded {} prices from {}", input.len(), path.display());
    Ok(input)
}
