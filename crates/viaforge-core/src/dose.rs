//! Cumulative-dose solving: power from dose, shots from power.
//!
//! "Cumulative dose" here is the per-shot peak fluence multiplied by the
//! shot count: a budgeting number, not an integral. It ignores pulse
//! overlap and inter-pulse accumulation, and the two solver directions
//! are exact algebraic inverses of each other under that definition.
//!
//! The per-shot peak fluence uses the same Gaussian factor-of-two
//! normalisation as the forward model, $F = 2E/(\pi w_0^2)$, and average
//! power relates to pulse energy through the repetition rate,
//! $P = E \cdot f$ (conveniently, mW/kHz = µJ).

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, EngineError};
use crate::units::{KHZ_TO_HZ, UJ_TO_J, UM_TO_CM};

/// Result of solving for the average power that delivers a target dose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSolution {
    /// Average power to dial in (mW).
    pub required_average_power_mw: f64,
    /// Pulse energy implied by that power at the given rate (µJ).
    pub implied_pulse_energy_uj: f64,
    /// Peak fluence each shot must deliver (J/cm²).
    pub peak_fluence_per_shot_j_cm2: f64,
}

/// Result of solving for the shot count that delivers a target dose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotSolution {
    /// Shots required, rounded up to the next whole pulse.
    pub required_shots: u32,
    /// Pulse energy available from the given power (µJ).
    pub pulse_energy_uj: f64,
    /// Peak fluence each shot delivers (J/cm²).
    pub peak_fluence_per_shot_j_cm2: f64,
}

/// Pulse energy (µJ) from average power (mW) and repetition rate (kHz).
pub fn pulse_energy_uj(average_power_mw: f64, rate_khz: f64) -> f64 {
    average_power_mw / rate_khz
}

/// Average power (mW) from pulse energy (µJ) and repetition rate (kHz).
pub fn average_power_mw(pulse_energy_uj: f64, rate_khz: f64) -> f64 {
    pulse_energy_uj * rate_khz
}

/// Gaussian beam area (cm²) from the spot diameter.
fn beam_area_cm2(beam_diameter_um: f64) -> f64 {
    let radius_cm = (beam_diameter_um / 2.0) * UM_TO_CM;
    std::f64::consts::PI * radius_cm * radius_cm
}

/// Solve for the average power needed to reach `target_dose_j_cm2` in
/// `number_of_shots` pulses.
pub fn solve_power(
    target_dose_j_cm2: f64,
    beam_diameter_um: f64,
    repetition_rate_khz: f64,
    number_of_shots: u32,
) -> Result<PowerSolution, EngineError> {
    ensure_positive("target_dose_j_cm2", target_dose_j_cm2)?;
    ensure_positive("beam_diameter_um", beam_diameter_um)?;
    ensure_positive("repetition_rate_khz", repetition_rate_khz)?;
    if number_of_shots == 0 {
        return Err(EngineError::ZeroShots {
            name: "number_of_shots",
        });
    }

    let fluence_per_shot = target_dose_j_cm2 / f64::from(number_of_shots);
    let pulse_energy_j = fluence_per_shot * beam_area_cm2(beam_diameter_um) / 2.0;
    let power_mw = pulse_energy_j * repetition_rate_khz * KHZ_TO_HZ * 1e3;
    // All inputs are validated positive, so this only trips on float
    // underflow; report it rather than hand back a useless zero.
    ensure_positive("required_average_power_mw", power_mw)?;

    Ok(PowerSolution {
        required_average_power_mw: power_mw,
        implied_pulse_energy_uj: power_mw / repetition_rate_khz,
        peak_fluence_per_shot_j_cm2: fluence_per_shot,
    })
}

/// Solve for the shot count needed to reach `target_dose_j_cm2` with
/// `available_power_mw` at a fixed repetition rate.
pub fn solve_shots(
    target_dose_j_cm2: f64,
    beam_diameter_um: f64,
    repetition_rate_khz: f64,
    available_power_mw: f64,
) -> Result<ShotSolution, EngineError> {
    ensure_positive("target_dose_j_cm2", target_dose_j_cm2)?;
    ensure_positive("beam_diameter_um", beam_diameter_um)?;
    ensure_positive("repetition_rate_khz", repetition_rate_khz)?;
    ensure_positive("available_power_mw", available_power_mw)?;

    let energy_uj = pulse_energy_uj(available_power_mw, repetition_rate_khz);
    let fluence_per_shot =
        2.0 * energy_uj * UJ_TO_J / beam_area_cm2(beam_diameter_um);
    ensure_positive("peak_fluence_per_shot_j_cm2", fluence_per_shot)?;

    // An exact integer ratio can land one ulp above the integer after the
    // power conversion; absorb that noise before taking the ceiling so
    // the two solver directions stay exact inverses.
    let ratio = target_dose_j_cm2 / fluence_per_shot;
    let shots = if (ratio - ratio.round()).abs() < 1e-9 * ratio.max(1.0) {
        ratio.round()
    } else {
        ratio.ceil()
    };

    Ok(ShotSolution {
        required_shots: shots as u32,
        pulse_energy_uj: energy_uj,
        peak_fluence_per_shot_j_cm2: fluence_per_shot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pulse_energy_power_duality() {
        assert_relative_eq!(pulse_energy_uj(1000.0, 100.0), 10.0, epsilon = 1e-12);
        assert_relative_eq!(average_power_mw(10.0, 100.0), 1000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_power_closed_form() {
        // dose 175 J/cm², 30 µm spot, 50 kHz, 50 shots:
        // F/shot = 3.5, E = 3.5·π·(1.5e-3)²/2 = 1.237e-5 J, P = 618.5 mW
        let sol = solve_power(175.0, 30.0, 50.0, 50).unwrap();
        assert_relative_eq!(sol.peak_fluence_per_shot_j_cm2, 3.5, epsilon = 1e-12);
        assert_relative_eq!(sol.required_average_power_mw, 618.50, epsilon = 0.01);
        assert_relative_eq!(sol.implied_pulse_energy_uj, 12.370, epsilon = 1e-3);
    }

    #[test]
    fn test_validation_rejects_nonpositive_inputs() {
        assert!(solve_power(0.0, 30.0, 50.0, 50).is_err());
        assert!(solve_power(175.0, 30.0, 0.0, 50).is_err());
        assert!(solve_power(175.0, 30.0, 50.0, 0).is_err());
        assert!(solve_shots(175.0, 30.0, 50.0, -1.0).is_err());
        assert!(solve_shots(175.0, 0.0, 50.0, 500.0).is_err());
    }
}
