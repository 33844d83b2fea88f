//! Rolling statistics and the small numeric helpers shared by the processor.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Returns the index range of the trailing window that ends at `i`.
///
/// The window grows from the start of the series until `window` elements are
/// available, then slides with a fixed length of `window`.
pub fn trailing_window(i: usize, window: usize) -> Range<usize> {
    let len = window.min(i + 1);
    (i + 1 - len)..(i + 1)
}

/// Arithmetic mean. An empty slice has a mean of zero.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (denominator `n - 1`).
///
/// Returns `None` when fewer than two observations are available.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let sum_sq = values.iter().map(|&x| (x - m).powi(2)).sum::<f64>();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Computes the z-score of every element against its trailing window.
///
/// Degenerate cases resolve to zero in this order: a window of one or less,
/// a sub-window with fewer than two samples, and a constant sub-window.
/// The output always has the same length as `series`.
pub fn rolling_z_score(series: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 {
        return vec![0.0; series.len()];
    }

    (0..series.len())
        .map(|i| {
            let slice = &series[trailing_window(i, window)];
            let Some(std_dev) = sample_std_dev(slice) else {
                return 0.0;
            };
            if std_dev == 0.0 {
                return 0.0;
            }
            (series[i] - mean(slice)) / std_dev
        })
        .collect()
}

/// Fractional change from `previous` to `current`, e.g. `0.05` for +5%.
///
/// A missing or zero `previous` value yields zero instead of dividing by zero.
pub fn percentage_change(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(prev) if prev != 0.0 => (current - prev) / prev,
        _ => 0.0,
    }
}

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a least-squares line through `(x, y)` points.
///
/// Returns `None` for an empty input or when every `x` is identical.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), &(x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
    );

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(LinearFit { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trailing_window_grows_then_slides() {
        assert_eq!(trailing_window(0, 3), 0..1);
        assert_eq!(trailing_window(1, 3), 0..2);
        assert_eq!(trailing_window(2, 3), 0..3);
        assert_eq!(trailing_window(5, 3), 3..6);
        assert_eq!(trailing_window(4, 0), 5..5);
    }

    #[test]
    fn test_z_score_preserves_length() {
        for len in [0, 1, 2, 7, 30] {
            let series: Vec<f64> = (0..len).map(|x| (x * x) as f64).collect();
            for window in [0, 1, 2, 12, 100] {
                assert_eq!(rolling_z_score(&series, window).len(), len);
            }
        }
    }

    #[test]
    fn test_z_score_window_of_one_or_less_is_zero() {
        let series = [3.0, -1.0, 8.0, 2.5];
        assert_eq!(rolling_z_score(&series, 0), vec![0.0; 4]);
        assert_eq!(rolling_z_score(&series, 1), vec![0.0; 4]);
    }

    #[test]
    fn test_z_score_constant_series_is_zero() {
        assert_eq!(rolling_z_score(&[5.0, 5.0, 5.0, 5.0], 3), vec![0.0; 4]);
    }

    #[test]
    fn test_z_score_first_element_is_zero() {
        let z = rolling_z_score(&[10.0, 20.0], 12);
        assert_eq!(z[0], 0.0);
    }

    #[test]
    fn test_z_score_known_values() {
        let z = rolling_z_score(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);

        // Window [3, 4, 5]: mean 4, sample sd 1.
        assert_relative_eq!(z[4], 1.0);
        // Growing window [1, 2]: mean 1.5, sample sd sqrt(0.5).
        assert_relative_eq!(z[1], 0.5 / 0.5_f64.sqrt());
    }

    #[test]
    fn test_z_score_is_deterministic() {
        let series: Vec<f64> = (0..50).map(|x| (x as f64 * 0.37).sin() * 100.0).collect();
        let a = rolling_z_score(&series, 12);
        let b = rolling_z_score(&series, 12);
        assert_eq!(a, b);
    }

    #[test]
    fn test_z_score_propagates_nan() {
        let z = rolling_z_score(&[1.0, f64::NAN, 3.0], 3);
        assert!(z[1].is_nan());
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[]), None);
        assert_eq!(sample_std_dev(&[4.2]), None);
        assert_relative_eq!(
            sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap(),
            (32.0_f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_percentage_change() {
        assert_relative_eq!(percentage_change(110.0, Some(100.0)), 0.1);
        assert_relative_eq!(percentage_change(90.0, Some(100.0)), -0.1);
        assert_eq!(percentage_change(50.0, Some(0.0)), 0.0);
        assert_eq!(percentage_change(50.0, None), 0.0);
    }

    #[test]
    fn test_linear_fit_recovers_exact_line() {
        let points: Vec<(f64, f64)> = (0..10).map(|x| (x as f64, 2.5 * x as f64 - 1.0)).collect();
        let fit = linear_fit(&points).unwrap();
        assert_relative_eq!(fit.slope, 2.5, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, -1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.predict(4.0), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_fit_degenerate_inputs() {
        assert!(linear_fit(&[]).is_none());
        assert!(linear_fit(&[(20.0, 0.01), (20.0, 0.02), (20.0, 0.03)]).is_none());
    }
}
