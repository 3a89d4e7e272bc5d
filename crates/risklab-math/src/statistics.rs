//! Descriptive statistics over return series.
//!
//! Conventions:
//! - Variance, standard deviation and covariance are **sample** statistics
//!   (divisor `n - 1`).
//! - Percentiles use linear interpolation between the two nearest order
//!   statistics, so `percentile(x, 0.0)` is the minimum and
//!   `percentile(x, 100.0)` the maximum.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

/// Arithmetic mean of a series.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (divisor `n - 1`).
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    if values.len() < 2 {
        return Err(MathError::insufficient_data(2, values.len()));
    }
    let mu = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - mu) * (v - mu)).sum();
    Ok(ss / (values.len() - 1) as f64)
}

/// Sample standard deviation (divisor `n - 1`).
pub fn sample_std(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Empirical percentile of a series, `q` in `[0, 100]`.
///
/// The rank `h = (n - 1) * q / 100` is split into an integer part and a
/// fraction; the result interpolates linearly between the surrounding
/// order statistics.
///
/// # Example
///
/// ```
/// use risklab_math::statistics::percentile;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// assert!((percentile(&x, 50.0).unwrap() - 2.5).abs() < 1e-12);
/// ```
pub fn percentile(values: &[f64], q: f64) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(MathError::invalid_input(format!(
            "percentile {q} outside [0, 100]"
        )));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::invalid_input("series contains NaN"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let h = (sorted.len() - 1) as f64 * q / 100.0;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;

    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Sample covariance matrix of the columns of `observations`.
///
/// `observations` is `periods x series`; the result is `series x series`.
pub fn covariance_matrix(observations: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let n = observations.nrows();
    let k = observations.ncols();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }

    let means: Vec<f64> = (0..k).map(|j| observations.column(j).mean()).collect();
    let centered = DMatrix::from_fn(n, k, |i, j| observations[(i, j)] - means[j]);
    let cov = centered.transpose() * &centered / (n - 1) as f64;

    if cov.iter().any(|v| !v.is_finite()) {
        log::debug!("covariance matrix has non-finite entries ({n} periods, {k} series)");
    }

    Ok(cov)
}

/// Quadratic form `wᵀ · M · w`.
pub fn quadratic_form(weights: &[f64], matrix: &DMatrix<f64>) -> MathResult<f64> {
    if matrix.nrows() != weights.len() || matrix.ncols() != weights.len() {
        return Err(MathError::DimensionMismatch {
            len: weights.len(),
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        });
    }
    let w = DVector::from_column_slice(weights);
    Ok(w.dot(&(matrix * &w)))
}

/// Rounds to a fixed number of decimal places (half away from zero).
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_sample_std() {
        // Sample variance of 2,4,4,4,5,5,7,9 is 32/7
        let x = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_variance(&x).unwrap(), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(sample_std(&x).unwrap(), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_std_needs_two_points() {
        assert_eq!(
            sample_std(&[1.0]).unwrap_err(),
            MathError::insufficient_data(2, 1)
        );
    }

    #[test]
    fn test_percentile_interpolates() {
        let x = [-0.02, -0.015, -0.01, -0.005, 0.0, 0.005, 0.01, 0.015, 0.02, 0.025];
        // h = 9 * 0.05 = 0.45 -> -0.02 + 0.45 * 0.005
        assert_relative_eq!(percentile(&x, 5.0).unwrap(), -0.01775, epsilon = 1e-12);
        assert_relative_eq!(percentile(&x, 0.0).unwrap(), -0.02);
        assert_relative_eq!(percentile(&x, 100.0).unwrap(), 0.025);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let x = [3.0, 1.0, 4.0, 2.0];
        assert_relative_eq!(percentile(&x, 50.0).unwrap(), 2.5);
    }

    #[test]
    fn test_percentile_rejects_bad_rank() {
        assert!(percentile(&[1.0, 2.0], 101.0).is_err());
        assert!(percentile(&[1.0, f64::NAN], 50.0).is_err());
    }

    #[test]
    fn test_covariance_matrix() {
        let obs = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
        let cov = covariance_matrix(&obs).unwrap();

        assert_relative_eq!(cov[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(cov[(1, 1)], 4.0, epsilon = 1e-12);
        assert_relative_eq!(cov[(0, 1)], 2.0, epsilon = 1e-12);
        assert_relative_eq!(cov[(1, 0)], cov[(0, 1)]);
    }

    #[test]
    fn test_covariance_needs_two_rows() {
        let obs = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        assert!(matches!(
            covariance_matrix(&obs),
            Err(MathError::InsufficientData { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_quadratic_form() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        // [1, 1] M [1, 1]ᵀ = 9
        assert_relative_eq!(quadratic_form(&[1.0, 1.0], &m).unwrap(), 9.0);
        assert!(quadratic_form(&[1.0], &m).is_err());
    }

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(0.814_999_9, 4), 0.815);
        assert_relative_eq!(round_to(0.005_000_4, 6), 0.005);
        assert_relative_eq!(round_to(-1.23456, 2), -1.23);
    }
}
