use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

use super::TxKind;

pub const SERIES_LEN: usize = 60;
const BASE_PRICE: f64 = 0.0001;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub direction: TxKind,
    pub amount_in: f64,
    pub amount_out: f64,
}

/// One point per minute for the last hour, oldest first: the oldest sits 60
/// minutes back and the newest one minute back. The price follows a slow sine
/// wave around 0.0001 with a little noise on top. Both amounts are drawn
/// independently from 100-1099.
pub fn swap_series<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Vec<SwapPoint> {
    (0..SERIES_LEN)
        .map(|i| {
            let minutes_ago = (SERIES_LEN - i) as i64;
            let price = BASE_PRICE
                + (i as f64 / 10.0).sin() * 0.00001
                + rng.gen::<f64>() * 0.000005;
            let amount_in = rng.gen_range(100..1_100) as f64;
            let amount_out = rng.gen_range(100..1_100) as f64;
            let direction = if rng.gen_bool(0.5) { TxKind::Buy } else { TxKind::Sell };
            SwapPoint {
                timestamp: now - Duration::minutes(minutes_ago),
                price,
                direction,
                amount_in,
                amount_out,
            }
        })
        .collect()
}
