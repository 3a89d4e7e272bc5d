//! Synthetic returns generator.
//!
//! Draws i.i.d. normal periodic returns for demonstration and testing. The
//! random source is always injected so callers control reproducibility.

use crate::returns::ReturnsHistory;
use crate::{RiskError, RiskResult};
use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Generates `periods` rows of N(`mean`, `std`) returns for each ticker.
///
/// Values are drawn period by period, ticker by ticker.
///
/// # Errors
///
/// Returns `InvalidInput` if `std` is negative or not finite, and
/// `InvalidReturns` for an empty or duplicated ticker list.
pub fn generate_returns<R: Rng + ?Sized>(
    tickers: &[String],
    periods: usize,
    mean: f64,
    std: f64,
    rng: &mut R,
) -> RiskResult<ReturnsHistory> {
    let normal = Normal::new(mean, std).map_err(|e| {
        RiskError::invalid_input(format!("normal distribution N({mean}, {std}): {e}"))
    })?;

    let n = tickers.len();
    let mut values = Vec::with_capacity(periods * n);
    for _ in 0..periods * n {
        values.push(normal.sample(rng));
    }

    let data = DMatrix::from_row_slice(periods, n, &values);
    ReturnsHistory::from_matrix(tickers.to_vec(), data)
}

/// [`generate_returns`] with a `StdRng` seeded from `seed`.
///
/// # Errors
///
/// See [`generate_returns`].
pub fn seeded_returns(
    tickers: &[String],
    periods: usize,
    mean: f64,
    std: f64,
    seed: u64,
) -> RiskResult<ReturnsHistory> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_returns(tickers, periods, mean, std, &mut rng)
}
