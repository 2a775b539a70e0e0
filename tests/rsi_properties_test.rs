use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wilder_rsi::indicators::{extract_deltas, smooth};
use wilder_rsi::*;

/// Random walk with occasional flat steps
fn random_walk(seed: u64, len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 100.0;
    let mut prices = Vec::with_capacity(len);

    for _ in 0..len {
        prices.push(price);
        if !rng.gen_bool(0.1) {
            price *= 1.0 + rng.gen_range(-0.05..0.05);
        }
    }

    prices
}

fn has_at_most_two_decimals(value: f64) -> bool {
    (value * 100.0).round() / 100.0 == value
}

#[test]
fn test_bounded_and_rounded_on_random_walks() {
    for seed in 0..50 {
        let prices = random_walk(seed, 200);

        for period in [1, 2, 5, 14, 30] {
            for zero_floor in [ZeroFloor::Exact, ZeroFloor::Epsilon] {
                let config = RsiConfig {
                    period,
                    zero_floor,
                    ..RsiConfig::default()
                };
                let rsi = compute_rsi_with(&prices, &config).unwrap();

                assert_eq!(rsi.len(), prices.len() - period);
                for value in &rsi {
                    assert!(
                        (0.0..=100.0).contains(value),
                        "seed {} period {}: {} out of range",
                        seed,
                        period,
                        value
                    );
                    assert!(has_at_most_two_decimals(*value));
                }
            }
        }
    }
}

#[test]
fn test_length_contract() {
    let prices = random_walk(7, 40);

    for period in 1..40 {
        let rsi = compute_rsi(&prices, period).unwrap();
        assert_eq!(rsi.len(), prices.len() - period);
    }

    assert!(matches!(
        compute_rsi(&prices, 40),
        Err(RsiError::InsufficientData { needed: 41, got: 40 })
    ));
    assert!(matches!(
        compute_rsi(&[], 14),
        Err(RsiError::InsufficientData { needed: 15, got: 0 })
    ));
}

#[test]
fn test_strictly_increasing_is_100() {
    let prices: Vec<f64> = (0..50).map(|i| 10.0 + i as f64 * 0.37).collect();
    let rsi = compute_rsi(&prices, 14).unwrap();

    assert_eq!(rsi.len(), 36);
    assert!(rsi.iter().all(|v| *v == 100.0));
}

#[test]
fn test_strictly_decreasing_is_0() {
    let prices: Vec<f64> = (0..50).map(|i| 500.0 - i as f64 * 1.5).collect();
    let rsi = compute_rsi(&prices, 14).unwrap();

    assert!(rsi.iter().all(|v| *v == 0.0));
}

#[test]
fn test_flat_series_uses_documented_convention() {
    let prices = vec![123.45; 30];

    let neutral = compute_rsi(&prices, 14).unwrap();
    assert_eq!(neutral, vec![50.0; 16]);

    let config = RsiConfig {
        flat_window: FlatWindow::Zero,
        ..RsiConfig::default()
    };
    let zero = compute_rsi_with(&prices, &config).unwrap();
    assert_eq!(zero, vec![0.0; 16]);
}

#[test]
fn test_reference_vector() {
    let prices = vec![
        44.0, 44.25, 44.5, 43.75, 44.65, 45.12, 45.61, 46.28, 46.28, 46.0, 46.03, 46.41, 46.22,
        45.64, 46.21,
    ];

    let rsi = compute_rsi(&prices, DEFAULT_PERIOD).unwrap();
    assert_eq!(rsi, vec![69.02]);
}

#[test]
fn test_textbook_series() {
    let prices = vec![
        44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
        45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64, 46.21, 46.25, 45.71, 46.45,
        45.78, 45.35, 44.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
    ];

    let rsi = compute_rsi(&prices, 14).unwrap();
    let expected = vec![
        70.46, 66.25, 66.48, 69.35, 66.29, 57.92, 62.88, 63.21, 56.01, 62.34, 54.67, 50.39,
        40.02, 41.49, 41.9, 45.5, 37.32, 33.09, 37.79,
    ];

    assert_eq!(rsi, expected);
}

#[test]
fn test_deterministic() {
    let prices = random_walk(99, 500);
    let first = compute_rsi(&prices, 14).unwrap();
    let second = compute_rsi(&prices, 14).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_pipeline_stages_line_up() {
    let prices = random_walk(3, 60);
    let deltas = extract_deltas(&prices, ZeroFloor::Exact).unwrap();
    assert_eq!(deltas.len(), prices.len() - 1);

    let gains = smooth(&deltas.gains, 14).unwrap();
    let losses = smooth(&deltas.losses, 14).unwrap();
    assert_eq!(gains.len(), deltas.len() - 14 + 1);
    assert_eq!(gains.len(), losses.len());
    assert!(gains.iter().chain(&losses).all(|v| v.is_finite() && *v >= 0.0));

    let rsi = compute_rsi(&prices, 14).unwrap();
    assert_eq!(rsi.len(), gains.len());
}

#[test]
fn test_streaming_matches_batch_on_random_walks() {
    for seed in 0..20 {
        let prices = random_walk(seed, 120);
        let batch = compute_rsi(&prices, 14).unwrap();

        let mut stream = StreamingRsi::with_period(14).unwrap();
        let streamed: Vec<f64> = prices
            .iter()
            .filter_map(|&close| stream.push_close(close))
            .collect();

        assert_eq!(streamed, batch, "seed {}", seed);
    }
}

#[test]
fn test_streaming_revisions_match_batch() {
    use chrono::{DateTime, Duration, Utc};

    let start = DateTime::from_timestamp(1_721_476_800, 0).unwrap();
    let prices = random_walk(11, 80);
    let mut rng = StdRng::seed_from_u64(11);
    let mut stream = StreamingRsi::with_period(10).unwrap();

    let mut last = None;
    for (i, &close) in prices.iter().enumerate() {
        let ts = start + Duration::minutes(5 * i as i64);

        // A couple of intermediate ticks before the bar settles
        for _ in 0..2 {
            stream.push(ts, close * (1.0 + rng.gen_range(-0.02..0.02)));
        }
        last = stream.push(ts, close);
    }

    let batch = compute_rsi(&prices, 10).unwrap();
    assert_eq!(last, batch.last().copied());
    assert_eq!(stream.bars_seen(), prices.len());
}
