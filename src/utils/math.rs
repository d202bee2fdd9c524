/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Numerical helpers shared by the spectral algorithms
//!
//! Piecewise-linear interpolation with boundary clamping and ordinary least
//! squares for a straight line.

use super::errors::{Result, UtilsError};

/// Below this the least-squares denominator is treated as zero
pub const REGRESSION_EPSILON: f64 = 1e-12;

/// Linear interpolation between two points
///
/// # Arguments
///
/// * `x` - The x-coordinate at which to interpolate
/// * `x0` - The x-coordinate of the first known point
/// * `y0` - The y-coordinate of the first known point
/// * `x1` - The x-coordinate of the second known point
/// * `y1` - The y-coordinate of the second known point
///
/// # Returns
///
/// The interpolated y-value at x
pub fn linear_interpolate(x: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    if (x1 - x0).abs() < 1e-10 {
        return y0;
    }

    let t = (x - x0) / (x1 - x0);
    y0 * (1.0 - t) + y1 * t
}

/// Linear interpolation on a tabulated function
///
/// Values of `x` outside the tabulated range clamp to the nearest boundary
/// value; nothing is extrapolated.
///
/// # Arguments
///
/// * `x` - The x-coordinate at which to interpolate
/// * `x_values` - Array of x coordinates (must be sorted in ascending order)
/// * `y_values` - Array of corresponding y coordinates
///
/// # Returns
///
/// The interpolated y-value at x or an error if inputs are invalid
pub fn interpolate_table(x: f64, x_values: &[f64], y_values: &[f64]) -> Result<f64> {
    if x_values.len() != y_values.len() {
        return Err(UtilsError::LengthMismatch(x_values.len(), y_values.len()));
    }

    let last = match x_values.len() {
        0 => {
            return Err(UtilsError::Math(
                "Empty arrays provided for interpolation".to_string(),
            ))
        }
        n => n - 1,
    };

    if x.is_nan() {
        return Err(UtilsError::Math("Cannot interpolate at NaN".to_string()));
    }

    if x <= x_values[0] {
        return Ok(y_values[0]);
    }
    if x >= x_values[last] {
        return Ok(y_values[last]);
    }

    // First index whose x is strictly greater than the query
    let idx = x_values.partition_point(|&v| v <= x);

    Ok(linear_interpolate(
        x,
        x_values[idx - 1],
        y_values[idx - 1],
        x_values[idx],
        y_values[idx],
    ))
}

/// Interpolate a tabulated function onto a whole grid of query points
pub fn interpolate_onto(targets: &[f64], x_values: &[f64], y_values: &[f64]) -> Result<Vec<f64>> {
    targets
        .iter()
        .map(|&x| interpolate_table(x, x_values, y_values))
        .collect()
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Result of a straight-line least-squares fit `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// True when the fit fell back to unit slope
    pub degenerate: bool,
}

/// Ordinary least-squares fit of `y = slope * x + intercept`
///
/// When the regression denominator `n·Σx² − (Σx)²` drops below
/// [`REGRESSION_EPSILON`] the slope falls back to 1 and the intercept to
/// `mean(y) − mean(x)`.
pub fn linear_fit(x_values: &[f64], y_values: &[f64]) -> Result<LinearFit> {
    if x_values.len() != y_values.len() {
        return Err(UtilsError::LengthMismatch(x_values.len(), y_values.len()));
    }
    if x_values.len() < 2 {
        return Err(UtilsError::Math(format!(
            "Linear fit needs at least 2 points, got {}",
            x_values.len()
        )));
    }

    let n = x_values.len() as f64;
    let sum_x: f64 = x_values.iter().sum();
    let sum_y: f64 = y_values.iter().sum();
    let sum_xx: f64 = x_values.iter().map(|x| x * x).sum();
    let sum_xy: f64 = x_values
        .iter()
        .zip(y_values.iter())
        .map(|(x, y)| x * y)
        .sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < REGRESSION_EPSILON {
        return Ok(LinearFit {
            slope: 1.0,
            intercept: (sum_y - sum_x) / n,
            degenerate: true,
        });
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Ok(LinearFit {
        slope,
        intercept,
        degenerate: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interpolate_table_inside_range() {
        let x = [1.0, 2.0, 4.0];
        let y = [10.0, 20.0, 0.0];
        assert_relative_eq!(interpolate_table(1.5, &x, &y).unwrap(), 15.0);
        assert_relative_eq!(interpolate_table(3.0, &x, &y).unwrap(), 10.0);
        assert_relative_eq!(interpolate_table(2.0, &x, &y).unwrap(), 20.0);
    }

    #[test]
    fn test_interpolate_table_clamps() {
        let x = [1.0, 2.0];
        let y = [3.0, 5.0];
        assert_relative_eq!(interpolate_table(-10.0, &x, &y).unwrap(), 3.0);
        assert_relative_eq!(interpolate_table(10.0, &x, &y).unwrap(), 5.0);
    }

    #[test]
    fn test_interpolate_table_invalid() {
        assert!(interpolate_table(1.0, &[], &[]).is_err());
        assert!(interpolate_table(1.0, &[1.0, 2.0], &[1.0]).is_err());
        assert!(interpolate_table(f64::NAN, &[1.0, 2.0], &[1.0, 2.0]).is_err());
        assert_relative_eq!(interpolate_table(7.0, &[1.0], &[4.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_linear_fit_exact_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.5 * v - 1.0).collect();
        let fit = linear_fit(&x, &y).unwrap();
        assert!(!fit.degenerate);
        assert_relative_eq!(fit.slope, 2.5, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_fit_degenerate() {
        let fit = linear_fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!(fit.degenerate);
        assert_relative_eq!(fit.slope, 1.0);
        assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_relative_eq!(mean(&[1.0, 2.0, 6.0]).unwrap(), 3.0);
    }
}
