//! Heat-accumulation risk index.
//!
//! Compares the thermal diffusion time out of the irradiated zone,
//! $\tau_d = w_0^2 / 4D$, with the inter-pulse period $\Delta t = 1/f$.
//! An index $\tau_d/\Delta t \ll 1$ means each pulse sees cold material;
//! an index above one means heat piles up shot to shot and the process
//! drifts toward melting and charring. This is a screening number, not a
//! thermal simulation.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, EngineError};
use crate::units::{KHZ_TO_HZ, UM_TO_CM};

/// Qualitative heat-accumulation risk bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThermalRisk {
    /// Index below 0.1: single-pulse ablation regime.
    Low,
    /// Index in [0.1, 1): accumulation begins to influence the process.
    Moderate,
    /// Index at or above 1: thermally dominated, precision suffers.
    High,
}

/// Result of the heat-accumulation screening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalAnalysis {
    /// Time between consecutive pulses (s).
    pub inter_pulse_s: f64,
    /// Thermal diffusion time out of the spot (s).
    pub diffusion_time_s: f64,
    /// Ratio of the two; the risk index.
    pub heat_index: f64,
    /// Banded interpretation of the index.
    pub risk: ThermalRisk,
}

/// Screen a repetition rate / spot size / material combination for heat
/// accumulation.
pub fn analyze(
    repetition_rate_khz: f64,
    beam_diameter_um: f64,
    thermal_diffusivity_cm2_s: f64,
) -> Result<ThermalAnalysis, EngineError> {
    ensure_positive("repetition_rate_khz", repetition_rate_khz)?;
    ensure_positive("beam_diameter_um", beam_diameter_um)?;
    ensure_positive("thermal_diffusivity_cm2_s", thermal_diffusivity_cm2_s)?;

    let inter_pulse_s = 1.0 / (repetition_rate_khz * KHZ_TO_HZ);
    let w0_cm = (beam_diameter_um / 2.0) * UM_TO_CM;
    let diffusion_time_s = w0_cm * w0_cm / (4.0 * thermal_diffusivity_cm2_s);
    let heat_index = diffusion_time_s / inter_pulse_s;

    let risk = if heat_index < 0.1 {
        ThermalRisk::Low
    } else if heat_index < 1.0 {
        ThermalRisk::Moderate
    } else {
        ThermalRisk::High
    };

    Ok(ThermalAnalysis {
        inter_pulse_s,
        diffusion_time_s,
        heat_index,
        risk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kapton_at_100khz_accumulates() {
        // 100 kHz, 25 µm spot, D = 0.0014 cm²/s:
        // Δt = 10 µs, τ_d = (1.25e-3)²/(4·0.0014) ≈ 279 µs → index ≈ 27.9
        let t = analyze(100.0, 25.0, 0.0014).unwrap();
        assert_relative_eq!(t.inter_pulse_s, 1e-5, epsilon = 1e-12);
        assert_relative_eq!(t.heat_index, 27.9, epsilon = 0.1);
        assert_eq!(t.risk, ThermalRisk::High);
    }

    #[test]
    fn test_copper_diffuses_fast() {
        // Copper (D = 1.11 cm²/s) at the same settings barely accumulates
        let t = analyze(100.0, 25.0, 1.11).unwrap();
        assert_eq!(t.risk, ThermalRisk::Low);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(analyze(0.0, 25.0, 0.0014).is_err());
        assert!(analyze(100.0, 25.0, 0.0).is_err());
    }
}
