//! Wavelength-domain helpers used alongside run classification.
//!
//! Stateless transforms over wavelength and flux arrays: Doppler shifting,
//! polynomial evaluation and cubic-spline resampling onto a new grid.

use crate::constants::{CONTINUUM_FILL_VALUE, SPEED_OF_LIGHT_KMS};
use crate::error::{Result, VeloceError};

/// Shift wavelengths into the rest frame of a source moving at `radial_velocity_kms`
pub fn radial_velocity_shift(radial_velocity_kms: f64, wavelengths: &[f64]) -> Vec<f64> {
    let factor = 1.0 + radial_velocity_kms / SPEED_OF_LIGHT_KMS;
    wavelengths.iter().map(|w| w / factor).collect()
}

/// Evaluate `sum(coeffs[i] * x^i)` at every point of `x`
pub fn polynomial_function(x: &[f64], coeffs: &[f64]) -> Vec<f64> {
    x.iter()
        .map(|&value| coeffs.iter().rev().fold(0.0, |acc, &c| acc * value + c))
        .collect()
}

/// Resample a spectrum onto `target_wavelength` with a not-a-knot cubic spline
///
/// Targets outside the sampled wavelength range (or NaN) get continuum flux
/// 1.0. Input samples need not be sorted but must have distinct wavelengths.
pub fn interpolate_spectrum(
    wavelength: &[f64],
    flux: &[f64],
    target_wavelength: &[f64],
) -> Result<Vec<f64>> {
    let spline = CubicSpline::fit(wavelength, flux)?;
    Ok(target_wavelength
        .iter()
        .map(|&target| spline.evaluate(target).unwrap_or(CONTINUUM_FILL_VALUE))
        .collect())
}

/// Not-a-knot cubic spline through sorted, distinct knots
#[derive(Debug, Clone)]
struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    second_derivatives: Vec<f64>,
}

impl CubicSpline {
    const MIN_POINTS: usize = 4;

    fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(VeloceError::invalid_spectrum(format!(
                "wavelength has {} samples but flux has {}",
                x.len(),
                y.len()
            )));
        }
        if x.len() < Self::MIN_POINTS {
            return Err(VeloceError::invalid_spectrum(format!(
                "cubic interpolation needs at least {} samples, got {}",
                Self::MIN_POINTS,
                x.len()
            )));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(VeloceError::invalid_spectrum("samples must be finite"));
        }

        let mut points: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        if points.windows(2).any(|pair| pair[0].0 == pair[1].0) {
            return Err(VeloceError::invalid_spectrum(
                "wavelength samples must be distinct",
            ));
        }

        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        let second_derivatives = Self::solve_second_derivatives(&x, &y);

        Ok(Self {
            x,
            y,
            second_derivatives,
        })
    }

    /// Knot second derivatives under not-a-knot end conditions
    ///
    /// The third derivative is continuous at `x[1]` and `x[n - 2]`. Both end
    /// values are eliminated from the first and last interior rows, which
    /// leaves a tridiagonal system over `m[1..n - 1]`.
    fn solve_second_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
        let n = x.len();
        let h: Vec<f64> = x.windows(2).map(|pair| pair[1] - pair[0]).collect();
        let mut m = vec![0.0; n];
        let mut lower = vec![0.0; n];
        let mut diag = vec![0.0; n];
        let mut upper = vec![0.0; n];
        let mut rhs = vec![0.0; n];

        for i in 1..n - 1 {
            lower[i] = h[i - 1];
            diag[i] = 2.0 * (h[i - 1] + h[i]);
            upper[i] = h[i];
            rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
        }

        let (h_first, h_second) = (h[0], h[1]);
        diag[1] = (h_first + h_second) * (h_first + 2.0 * h_second) / h_second;
        upper[1] = (h_second * h_second - h_first * h_first) / h_second;

        let (h_penult, h_last) = (h[n - 3], h[n - 2]);
        lower[n - 2] = (h_penult * h_penult - h_last * h_last) / h_penult;
        diag[n - 2] = (h_penult + h_last) * (2.0 * h_penult + h_last) / h_penult;

        // forward elimination
        for i in 2..n - 1 {
            let w = lower[i] / diag[i - 1];
            diag[i] -= w * upper[i - 1];
            rhs[i] -= w * rhs[i - 1];
        }

        m[n - 2] = rhs[n - 2] / diag[n - 2];
        for i in (1..n - 2).rev() {
            m[i] = (rhs[i] - upper[i] * m[i + 1]) / diag[i];
        }

        m[0] = ((h_first + h_second) * m[1] - h_first * m[2]) / h_second;
        m[n - 1] = ((h_penult + h_last) * m[n - 2] - h_last * m[n - 3]) / h_penult;

        m
    }

    /// Spline value at `target`, `None` outside the knot range
    fn evaluate(&self, target: f64) -> Option<f64> {
        let first = self.x[0];
        let last = self.x[self.x.len() - 1];
        if !(target >= first && target <= last) {
            return None;
        }

        let upper = self
            .x
            .partition_point(|&knot| knot < target)
            .clamp(1, self.x.len() - 1);
        let lower = upper - 1;

        let h = self.x[upper] - self.x[lower];
        let a = (self.x[upper] - target) / h;
        let b = (target - self.x[lower]) / h;

        Some(
            a * self.y[lower]
                + b * self.y[upper]
                + ((a.powi(3) - a) * self.second_derivatives[lower]
                    + (b.powi(3) - b) * self.second_derivatives[upper])
                    * h
                    * h
                    / 6.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_radial_velocity_shift() {
        let shifted = radial_velocity_shift(SPEED_OF_LIGHT_KMS, &[5000.0, 6000.0]);
        assert_close(shifted[0], 2500.0);
        assert_close(shifted[1], 3000.0);

        let unshifted = radial_velocity_shift(0.0, &[5000.0]);
        assert_close(unshifted[0], 5000.0);
    }

    #[test]
    fn test_negative_velocity_stretches_wavelengths() {
        let shifted = radial_velocity_shift(-30.0, &[6562.8]);
        assert!(shifted[0] > 6562.8);
    }

    #[test]
    fn test_polynomial_function() {
        // 1 + 2x + 3x^2
        let values = polynomial_function(&[0.0, 1.0, 2.0, -1.0], &[1.0, 2.0, 3.0]);
        assert_eq!(values, vec![1.0, 6.0, 17.0, 2.0]);
    }

    #[test]
    fn test_polynomial_without_coefficients_is_zero() {
        assert_eq!(polynomial_function(&[1.0, 2.0], &[]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_interpolation_reproduces_knots_and_lines() {
        let wavelength = [1.0, 2.0, 3.0, 4.0, 5.0];
        let flux = [0.9, 0.8, 0.7, 0.6, 0.5];

        let result = interpolate_spectrum(&wavelength, &flux, &[1.0, 2.5, 4.25, 5.0]).unwrap();

        assert_close(result[0], 0.9);
        assert_close(result[1], 0.75);
        assert_close(result[2], 0.575);
        assert_close(result[3], 0.5);
    }

    #[test]
    fn test_interpolation_passes_through_curved_knots() {
        let wavelength = [0.0, 1.0, 2.0, 3.0, 4.0];
        let flux = [0.0, 1.0, 4.0, 9.0, 16.0];

        let result = interpolate_spectrum(&wavelength, &flux, &wavelength).unwrap();

        for (actual, expected) in result.iter().zip(flux) {
            assert_close(*actual, expected);
        }
    }

    #[test]
    fn test_interpolation_reproduces_quadratic_between_knots() {
        let wavelength = [0.0, 1.0, 2.0, 3.0, 4.0];
        let flux = wavelength.map(|w| w * w);

        let result = interpolate_spectrum(&wavelength, &flux, &[0.5, 3.5]).unwrap();

        assert_close(result[0], 0.25);
        assert_close(result[1], 12.25);
    }

    #[test]
    fn test_interpolation_reproduces_cubic_on_uneven_grid() {
        let cubic = |w: f64| w.powi(3) - 2.0 * w * w + 0.5 * w + 1.0;
        let wavelength = [0.0, 0.5, 1.7, 2.0, 3.1, 4.4, 5.0];
        let flux = wavelength.map(cubic);
        let targets: Vec<f64> = (0..=50).map(|k| k as f64 * 0.1).collect();

        let result = interpolate_spectrum(&wavelength, &flux, &targets).unwrap();

        for (actual, target) in result.iter().zip(&targets) {
            assert!((actual - cubic(*target)).abs() < 1e-9, "at {}", target);
        }
    }

    #[test]
    fn test_four_samples_give_the_interpolating_cubic() {
        let result =
            interpolate_spectrum(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 0.0, 5.0], &[0.5, 2.5]).unwrap();

        assert_close(result[0], 2.5);
        assert_close(result[1], 1.0);
    }

    #[test]
    fn test_interpolation_fills_outside_range() {
        let wavelength = [4.0, 1.0, 3.0, 2.0];
        let flux = [0.4, 0.1, 0.3, 0.2];

        let result = interpolate_spectrum(&wavelength, &flux, &[0.5, 2.0, 4.5, f64::NAN]).unwrap();

        assert_close(result[0], CONTINUUM_FILL_VALUE);
        assert_close(result[1], 0.2);
        assert_close(result[2], CONTINUUM_FILL_VALUE);
        assert_close(result[3], CONTINUUM_FILL_VALUE);
    }

    #[test]
    fn test_interpolation_rejects_bad_input() {
        assert!(interpolate_spectrum(&[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0], &[1.5]).is_err());
        assert!(interpolate_spectrum(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0], &[1.5]).is_err());
        assert!(interpolate_spectrum(&[1.0, 2.0, 2.0, 4.0], &[1.0; 4], &[1.5]).is_err());
        assert!(interpolate_spectrum(&[1.0, f64::NAN, 3.0, 4.0], &[1.0; 4], &[1.5]).is_err());
    }
}
