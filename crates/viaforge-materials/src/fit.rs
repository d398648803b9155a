//! Ordinary least-squares line fitting.
//!
//! Both characterisation analyses are straight-line fits after a log
//! transform, so one small solver covers them. Implemented directly from
//! the normal equations; no matrix machinery needed for one slope and one
//! intercept.

use crate::FitError;

/// A fitted line `y = slope·x + intercept` with its goodness of fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination in `[0, 1]` (1 for a perfect fit).
    pub r_squared: f64,
}

impl LinearFit {
    /// Fit a line through `(x, y)` pairs.
    ///
    /// Requires at least two points and non-zero spread in `x`.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, FitError> {
        let n = xs.len().min(ys.len());
        if n < 2 {
            return Err(FitError::InsufficientData { needed: 2, got: n });
        }

        let nf = n as f64;
        let mean_x = xs[..n].iter().sum::<f64>() / nf;
        let mean_y = ys[..n].iter().sum::<f64>() / nf;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for i in 0..n {
            let dx = xs[i] - mean_x;
            sxx += dx * dx;
            sxy += dx * (ys[i] - mean_y);
        }
        if sxx <= 0.0 {
            return Err(FitError::DegenerateFit("all x values are identical"));
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        // r² = 1 − SS_res/SS_tot; a constant-y dataset fits any line
        // through its mean perfectly.
        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for i in 0..n {
            let predicted = slope * xs[i] + intercept;
            ss_res += (ys[i] - predicted).powi(2);
            ss_tot += (ys[i] - mean_y).powi(2);
        }
        let r_squared = if ss_tot > 0.0 {
            (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
        } else {
            1.0
        };

        Ok(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    /// Evaluate the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line_recovered() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.5 * x - 0.7).collect();
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert_relative_eq!(fit.slope, 2.5, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, -0.7, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_noisy_fit_has_reduced_r_squared() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [1.0, 2.2, 2.8, 4.2];
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!(fit.r_squared > 0.95 && fit.r_squared < 1.0);
    }

    #[test]
    fn test_degenerate_inputs_rejected() {
        assert!(matches!(
            LinearFit::fit(&[1.0], &[1.0]),
            Err(FitError::InsufficientData { .. })
        ));
        assert!(matches!(
            LinearFit::fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(FitError::DegenerateFit(_))
        ));
    }
}
