//! Ablation-rate analysis: threshold and penetration depth from
//! fluence/depth measurements.
//!
//! Dividing each measured depth by the shot count gives the per-pulse
//! rate, which the logarithmic ablation law predicts to be linear in
//! $\ln F$:
//!
//! $$ \text{rate} = \alpha^{-1} \ln F - \alpha^{-1} \ln F_{th} $$
//!
//! The slope of the fitted line *is* the effective penetration depth, and
//! the threshold is recovered from the x-intercept.

use serde::{Deserialize, Serialize};

use crate::fit::LinearFit;
use crate::FitError;

/// Results of an ablation-rate fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateAnalysis {
    /// Effective penetration depth $\alpha^{-1}$ (µm per pulse).
    pub penetration_depth_um: f64,
    /// Ablation threshold fluence (J/cm²).
    pub ablation_threshold_j_cm2: f64,
    /// Goodness of the underlying line fit.
    pub r_squared: f64,
    /// Slope of rate vs $\ln F$ (equals the penetration depth).
    pub slope: f64,
    /// Intercept of the fitted line (µm per pulse).
    pub intercept: f64,
}

/// Fit the ablation law to `(fluence_j_cm2, total_depth_um)` pairs
/// measured at a fixed `number_of_shots`.
pub fn analyze_ablation_rate(
    samples: &[(f64, f64)],
    number_of_shots: u32,
) -> Result<RateAnalysis, FitError> {
    if number_of_shots == 0 {
        return Err(FitError::DegenerateFit("shot count must be at least one"));
    }
    if samples.len() < 2 {
        return Err(FitError::InsufficientData {
            needed: 2,
            got: samples.len(),
        });
    }
    for (index, &(fluence, depth)) in samples.iter().enumerate() {
        if fluence <= 0.0 || depth <= 0.0 {
            return Err(FitError::NonPositiveSample { index });
        }
    }

    let shots = f64::from(number_of_shots);
    let log_fluence: Vec<f64> = samples.iter().map(|&(f, _)| f.ln()).collect();
    let rate_um: Vec<f64> = samples.iter().map(|&(_, d)| d / shots).collect();

    let fit = LinearFit::fit(&log_fluence, &rate_um)?;
    if fit.slope <= 0.0 {
        return Err(FitError::DegenerateFit(
            "ablation rate must grow with fluence",
        ));
    }

    Ok(RateAnalysis {
        penetration_depth_um: fit.slope,
        ablation_threshold_j_cm2: (-fit.intercept / fit.slope).exp(),
        r_squared: fit.r_squared,
        slope: fit.slope,
        intercept: fit.intercept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_synthetic_rates_recover_material() {
        // Ideal Liu-law data: alpha_inv = 0.8 µm, F_th = 0.9 J/cm², 50 shots
        let alpha_inv = 0.8_f64;
        let f_th = 0.9_f64;
        let fluences = [1.5, 2.0, 2.5, 3.0, 4.0];
        let samples: Vec<(f64, f64)> = fluences
            .iter()
            .map(|&f| (f, 50.0 * alpha_inv * (f / f_th).ln()))
            .collect();

        let analysis = analyze_ablation_rate(&samples, 50).unwrap();
        assert_relative_eq!(analysis.penetration_depth_um, 0.8, epsilon = 1e-9);
        assert_relative_eq!(analysis.ablation_threshold_j_cm2, 0.9, epsilon = 1e-9);
        assert_relative_eq!(analysis.r_squared, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_shots_rejected() {
        let samples = [(1.5, 15.0), (2.0, 45.0)];
        assert!(analyze_ablation_rate(&samples, 0).is_err());
    }
}
