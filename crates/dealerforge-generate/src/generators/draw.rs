use chrono::{Days, NaiveDate};
use rand::Rng;

use dealerforge_core::{DatePolicy, ValueRange};

/// Decimal places kept for monetary values.
pub const PRICE_PLACES: i32 = 2;
/// Decimal places kept for mileage and physical measurements.
pub const MEASURE_PLACES: i32 = 1;

/// Uniform pick from a non-empty pool.
pub fn pick<'a, R: Rng + ?Sized>(values: &'a [String], rng: &mut R) -> &'a str {
    let idx = rng.random_range(0..values.len());
    values[idx].as_str()
}

/// Uniform draw rounded to `places` decimals, clamped back into the range.
pub fn uniform_rounded<R: Rng + ?Sized>(
    range: &ValueRange<f64>,
    places: i32,
    rng: &mut R,
) -> f64 {
    let raw = rng.random_range(range.min..=range.max);
    round_to(raw, places).clamp(range.min, range.max)
}

pub fn uniform_int<R: Rng + ?Sized>(range: &ValueRange<u32>, rng: &mut R) -> u32 {
    rng.random_range(range.min..=range.max)
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Manufacture date `today - U(1, max_age)` and sale date
/// `manufacture + U(min_hold, max_hold)`; `min_hold >= 1` keeps the sale strictly later.
pub fn sale_window<R: Rng + ?Sized>(
    policy: &DatePolicy,
    today: NaiveDate,
    rng: &mut R,
) -> (NaiveDate, NaiveDate) {
    let age = rng.random_range(1..=policy.max_age_days);
    let manufacture_date = today - Days::new(u64::from(age));
    let hold = rng.random_range(policy.min_hold_days..=policy.max_hold_days);
    let sale_date = manufacture_date + Days::new(u64::from(hold));
    (manufacture_date, sale_date)
}
