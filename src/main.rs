use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use wilder_rsi::input::{read_prices, PriceInput};
use wilder_rsi::{compute_rsi_with, FlatWindow, RsiConfig, StreamingRsi, ZeroFloor};

/// Relative Strength Index on Wilder's smoothing
#[derive(Parser, Debug)]
#[command(name = "wilder-rsi", version, about)]
struct Cli {
    /// Closing prices, oldest first (used when --input is not given)
    #[arg(allow_negative_numbers = true)]
    prices: Vec<f64>,

    /// JSON array of closes or OHLCV records, or plain numbers; `-` for stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Settings file (toml/json/yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Smoothing period [default: 14]
    #[arg(short, long)]
    period: Option<usize>,

    #[arg(long, value_enum)]
    zero_floor: Option<ZeroFloor>,

    #[arg(long, value_enum)]
    flat_window: Option<FlatWindow>,

    /// Feed bars one at a time through the streaming engine
    #[arg(long)]
    stream: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let input = load_input(&cli)?;

    tracing::info!(
        "RSI({}) over {} prices (zero_floor={:?}, flat_window={:?})",
        config.period,
        input.len(),
        config.zero_floor,
        config.flat_window
    );

    if cli.stream {
        run_stream(&input, config, cli.json)
    } else {
        run_batch(&input, &config, cli.json)
    }
}

// ============================================================================
// Initialization Functions
// ============================================================================

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wilder_rsi=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Settings file and RSI_* env first, then command-line flags on top
fn resolve_config(cli: &Cli) -> anyhow::Result<RsiConfig> {
    let mut config = wilder_rsi::settings::load(cli.config.as_deref())
        .context("Failed to load RSI settings")?;

    if let Some(period) = cli.period {
        config.period = period;
    }
    if let Some(zero_floor) = cli.zero_floor {
        config.zero_floor = zero_floor;
    }
    if let Some(flat_window) = cli.flat_window {
        config.flat_window = flat_window;
    }

    config.validate()?;
    Ok(config)
}

fn load_input(cli: &Cli) -> anyhow::Result<PriceInput> {
    if let Some(path) = &cli.input {
        return read_prices(path)
            .with_context(|| format!("Failed to read prices from {}", path.display()));
    }

    if cli.prices.is_empty() {
        bail!("No prices given: pass them as arguments or use --input");
    }

    Ok(PriceInput::Closes(cli.prices.clone()))
}

// ============================================================================
// Output
// ============================================================================

fn run_batch(input: &PriceInput, config: &RsiConfig, as_json: bool) -> anyhow::Result<()> {
    let closes = input.closes();
    let rsi = compute_rsi_with(&closes, config)?;

    if as_json {
        let out = json!({
            "period": config.period,
            "zero_floor": config.zero_floor,
            "flat_window": config.flat_window,
            "first_index": config.period,
            "rsi": rsi,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{:>6} {:>14} {:>8}", "Index", "Close", "RSI");
    println!("{}", "─".repeat(30));
    for (j, value) in rsi.iter().enumerate() {
        let index = j + config.period;
        println!("{:>6} {:>14} {:>8.2}", index, closes[index], value);
    }

    Ok(())
}

fn run_stream(input: &PriceInput, config: RsiConfig, as_json: bool) -> anyhow::Result<()> {
    let mut stream = StreamingRsi::new(config)?;

    let rows: Vec<(f64, Option<f64>)> = match input.candles() {
        Some(candles) => candles
            .iter()
            .map(|c| (c.close, stream.push_candle(c)))
            .collect(),
        None => input
            .closes()
            .into_iter()
            .map(|close| (close, stream.push_close(close)))
            .collect(),
    };

    if as_json {
        let out: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, (close, rsi))| json!({ "index": i, "close": close, "rsi": rsi }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{:>6} {:>14} {:>8}", "Bar", "Close", "RSI");
    println!("{}", "─".repeat(30));
    for (i, (close, rsi)) in rows.iter().enumerate() {
        match rsi {
            Some(value) => println!("{:>6} {:>14} {:>8.2}", i, close, value),
            None => println!("{:>6} {:>14} {:>8}", i, close, "-"),
        }
    }

    tracing::info!("Streamed {} bars", stream.bars_seen());
    Ok(())
}
