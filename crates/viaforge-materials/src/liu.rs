//! Liu-plot analysis: threshold and spot size from crater diameters.
//!
//! For a Gaussian beam the squared crater diameter is linear in the log
//! of pulse energy:
//!
//! $$ D^2 = 2 w_0^2 \bigl(\ln E - \ln E_{th}\bigr) $$
//!
//! so a line fit of $D^2$ against $\ln E$ yields the beam waist from the
//! slope and the threshold energy from the x-intercept, without ever
//! measuring the beam directly. The threshold fluence follows from the
//! Gaussian peak normalisation $F_{th} = 2E_{th}/(\pi w_0^2)$.

use serde::{Deserialize, Serialize};

use crate::fit::LinearFit;
use crate::FitError;

const UJ_TO_J: f64 = 1e-6;
const UM_TO_CM: f64 = 1e-4;

/// Results of a Liu-plot fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiuAnalysis {
    /// Fitted beam waist $w_0$ (µm).
    pub waist_um: f64,
    /// Fitted 1/e² beam diameter (µm).
    pub beam_diameter_um: f64,
    /// Threshold pulse energy (µJ).
    pub threshold_energy_uj: f64,
    /// Threshold fluence (J/cm²).
    pub ablation_threshold_j_cm2: f64,
    /// Goodness of the underlying line fit.
    pub r_squared: f64,
    /// Slope of the $D^2$ vs $\ln E$ line (µm² per ln J).
    pub slope: f64,
    /// Intercept of the fitted line (µm²).
    pub intercept: f64,
}

/// Fit a Liu plot to `(pulse_energy_uj, crater_diameter_um)` pairs.
///
/// Points with non-positive energy or diameter cannot be log-transformed
/// and are rejected rather than silently dropped.
pub fn analyze_liu_plot(samples: &[(f64, f64)]) -> Result<LiuAnalysis, FitError> {
    if samples.len() < 2 {
        return Err(FitError::InsufficientData {
            needed: 2,
            got: samples.len(),
        });
    }
    for (index, &(energy, diameter)) in samples.iter().enumerate() {
        if energy <= 0.0 || diameter <= 0.0 {
            return Err(FitError::NonPositiveSample { index });
        }
    }

    let log_energy_j: Vec<f64> = samples
        .iter()
        .map(|&(e, _)| (e * UJ_TO_J).ln())
        .collect();
    let diameter_sq: Vec<f64> = samples.iter().map(|&(_, d)| d * d).collect();

    let fit = LinearFit::fit(&log_energy_j, &diameter_sq)?;
    if fit.slope <= 0.0 {
        return Err(FitError::DegenerateFit(
            "Liu-plot slope must be positive (craters must grow with energy)",
        ));
    }

    let waist_um = (fit.slope / 2.0).sqrt();
    let threshold_energy_j = (-fit.intercept / fit.slope).exp();
    let w0_cm = waist_um * UM_TO_CM;
    let area_cm2 = std::f64::consts::PI * w0_cm * w0_cm;
    let ablation_threshold_j_cm2 = 2.0 * threshold_energy_j / area_cm2;

    Ok(LiuAnalysis {
        waist_um,
        beam_diameter_um: 2.0 * waist_um,
        threshold_energy_uj: threshold_energy_j / UJ_TO_J,
        ablation_threshold_j_cm2,
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
    fn test_synthetic_liu_plot_recovers_beam_and_threshold() {
        // Generate ideal data for w0 = 14 µm, E_th = 3 µJ
        let w0 = 14.0_f64;
        let e_th_uj = 3.0_f64;
        let energies = [5.0, 8.0, 12.0, 20.0, 35.0];
        let samples: Vec<(f64, f64)> = energies
            .iter()
            .map(|&e| {
                let d_sq = 2.0 * w0 * w0 * (e / e_th_uj).ln();
                (e, d_sq.sqrt())
            })
            .collect();

        let analysis = analyze_liu_plot(&samples).unwrap();
        assert_relative_eq!(analysis.waist_um, 14.0, epsilon = 1e-9);
        assert_relative_eq!(analysis.beam_diameter_um, 28.0, epsilon = 1e-9);
        assert_relative_eq!(analysis.threshold_energy_uj, 3.0, epsilon = 1e-9);
        // F_th = 2·3e-6 / (π·(14e-4)²) ≈ 0.9745 J/cm²
        assert_relative_eq!(analysis.ablation_threshold_j_cm2, 0.9745, epsilon = 1e-4);
        assert_relative_eq!(analysis.r_squared, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_nonpositive_measurements() {
        let samples = [(10.0, 12.5), (0.0, 18.2)];
        assert!(matches!(
            analyze_liu_plot(&samples),
            Err(FitError::NonPositiveSample { index: 1 })
        ));
    }

    #[test]
    fn test_rejects_shrinking_craters() {
        // Diameter falling with energy gives a negative slope
        let samples = [(10.0, 30.0), (20.0, 20.0), (30.0, 10.0)];
        assert!(matches!(
            analyze_liu_plot(&samples),
            Err(FitError::DegenerateFit(_))
        ));
    }
}
