//! Standalone sidewall taper prediction from beam and material alone.
//!
//! Before any drilling parameters are chosen, the achievable wall angle is
//! already set by the beam radius against the material's energy
//! penetration depth:
//!
//! $$ \theta = \arctan\!\frac{w_0}{\alpha^{-1}} $$
//!
//! A smaller penetration depth gives a steeper, more vertical wall. This
//! is a geometry estimate independent of the shot-by-shot profile the
//! forward model reports.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, EngineError};

/// Predicted sidewall taper for a beam/material pairing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaperPrediction {
    /// Half-taper angle θ from the vertical wall (degrees).
    pub half_angle_deg: f64,
    /// Full included angle 2θ of the via cone (degrees).
    pub full_angle_deg: f64,
}

/// Predict the sidewall taper from the spot diameter and the effective
/// penetration depth.
pub fn predict(
    beam_diameter_um: f64,
    penetration_depth_um: f64,
) -> Result<TaperPrediction, EngineError> {
    ensure_positive("beam_diameter_um", beam_diameter_um)?;
    ensure_positive("penetration_depth_um", penetration_depth_um)?;

    let w0_um = beam_diameter_um / 2.0;
    let half_angle_deg = (w0_um / penetration_depth_um).atan().to_degrees();
    Ok(TaperPrediction {
        half_angle_deg,
        full_angle_deg: 2.0 * half_angle_deg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_radius_and_penetration_gives_45_degrees() {
        let t = predict(25.0, 12.5).unwrap();
        assert_relative_eq!(t.half_angle_deg, 45.0, epsilon = 1e-12);
        assert_relative_eq!(t.full_angle_deg, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shallow_penetration_approaches_horizontal() {
        // 25 µm beam, α⁻¹ = 1 µm: θ = atan(12.5) ≈ 85.43°
        let t = predict(25.0, 1.0).unwrap();
        assert_relative_eq!(t.half_angle_deg, 85.426, epsilon = 1e-3);
    }

    #[test]
    fn test_deep_penetration_steepens_the_wall() {
        let shallow = predict(25.0, 0.5).unwrap();
        let deep = predict(25.0, 5.0).unwrap();
        assert!(deep.half_angle_deg < shallow.half_angle_deg);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(predict(0.0, 1.0).is_err());
        assert!(predict(25.0, -1.0).is_err());
    }
}
