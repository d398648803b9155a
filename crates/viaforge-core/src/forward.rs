//! Forward ablation model: laser and material parameters → via geometry.
//!
//! The per-pulse removal depth wherever the local fluence exceeds the
//! ablation threshold follows the single-pulse Liu law
//!
//! $$ z(r) = \alpha^{-1} \ln\!\frac{F(r)}{F_{th}} $$
//!
//! and the cumulative crater after $N$ identical shots is $N z(r)$, clipped
//! to the material thickness. Top diameter comes from the analytic
//! threshold crossing; bottom diameter from the outermost samples whose
//! cumulative depth reaches the far side.

use crate::error::{ensure_positive, EngineError};
use crate::fluence;
use crate::types::{BeamParameters, MaterialProperties, RadialProfile, ViaGeometry};

/// Number of radial samples in the simulated profile.
pub const PROFILE_SAMPLES: usize = 501;

/// Simulate drilling one via.
///
/// A degenerate beam (`beam_diameter_um <= 0`) is a defined edge case and
/// yields all-zero fluence and geometry rather than an error; material
/// properties must be positive. A shot count of zero simply never
/// penetrates.
pub fn simulate(
    beam: &BeamParameters,
    material: &MaterialProperties,
    pulse_energy_uj: f64,
    number_of_shots: u32,
) -> Result<(ViaGeometry, RadialProfile), EngineError> {
    ensure_positive(
        "ablation_threshold_j_cm2",
        material.ablation_threshold_j_cm2,
    )?;
    ensure_positive("penetration_depth_um", material.penetration_depth_um)?;
    ensure_positive("material_thickness_um", material.material_thickness_um)?;

    let w0_um = beam.waist_um();
    let peak = fluence::peak_fluence_j_cm2(beam.profile, w0_um, pulse_energy_uj);
    let f_th = material.ablation_threshold_j_cm2;

    let radius_um = fluence::radial_samples(beam.beam_diameter_um.max(0.0), PROFILE_SAMPLES);
    let fluence_j_cm2: Vec<f64> = radius_um
        .iter()
        .map(|&r| fluence::fluence_at(beam.profile, peak, w0_um, r))
        .collect();

    // Liu law, evaluated only where F(r) > F_th so the log argument stays
    // positive.
    let depth_per_pulse_um: Vec<f64> = fluence_j_cm2
        .iter()
        .map(|&f| {
            if f > f_th {
                material.penetration_depth_um * (f / f_th).ln()
            } else {
                0.0
            }
        })
        .collect();

    let max_depth_per_pulse_um = depth_per_pulse_um.iter().fold(0.0_f64, |m, &d| m.max(d));

    let shots = f64::from(number_of_shots);
    let thickness = material.material_thickness_um;
    let cumulative_depth_um: Vec<f64> = depth_per_pulse_um
        .iter()
        .map(|&d| (shots * d).clamp(0.0, thickness))
        .collect();

    let top_diameter_um =
        fluence::threshold_diameter_um(beam.profile, peak, f_th, w0_um);

    // Bottom diameter: separation of the outermost samples whose unclipped
    // cumulative depth reaches the material thickness.
    let penetrated: Vec<usize> = depth_per_pulse_um
        .iter()
        .enumerate()
        .filter(|&(_, &d)| shots * d >= thickness)
        .map(|(i, _)| i)
        .collect();
    let bottom_diameter_um = match (penetrated.first(), penetrated.last()) {
        (Some(&first), Some(&last)) => radius_um[last] - radius_um[first],
        _ => 0.0,
    };

    let (taper_angle_deg, taper_ratio) = if bottom_diameter_um > 0.0 {
        let radius_diff = (top_diameter_um - bottom_diameter_um) / 2.0;
        (
            (radius_diff / thickness).atan().to_degrees(),
            radius_diff / thickness,
        )
    } else {
        // The wall never opens at the base: incomplete via.
        (90.0, f64::INFINITY)
    };

    let geometry = ViaGeometry {
        peak_fluence_j_cm2: peak,
        max_depth_per_pulse_um,
        top_diameter_um,
        bottom_diameter_um,
        taper_angle_deg,
        taper_ratio,
    };
    let profile = RadialProfile {
        radius_um,
        fluence_j_cm2,
        depth_per_pulse_um,
        cumulative_depth_um,
    };

    log::debug!(
        "simulate: F0={:.3} J/cm², top={:.2} µm, bottom={:.2} µm, taper={:.2}°",
        geometry.peak_fluence_j_cm2,
        geometry.top_diameter_um,
        geometry.bottom_diameter_um,
        geometry.taper_angle_deg
    );

    Ok((geometry, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BeamProfile;
    use approx::assert_relative_eq;

    fn kapton() -> MaterialProperties {
        MaterialProperties {
            ablation_threshold_j_cm2: 0.18,
            penetration_depth_um: 0.30,
            material_thickness_um: 50.0,
        }
    }

    #[test]
    fn test_top_diameter_matches_liu_relation() {
        let beam = BeamParameters {
            beam_diameter_um: 30.0,
            profile: BeamProfile::Gaussian,
        };
        let (geom, _) = simulate(&beam, &kapton(), 10.0, 75).unwrap();
        // D² = 2 w0² ln(F0/Fth) with F0 = 2.829 J/cm²
        let expected = (2.0 * 15.0_f64.powi(2) * (geom.peak_fluence_j_cm2 / 0.18).ln()).sqrt();
        assert_relative_eq!(geom.top_diameter_um, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_diameter_beam_is_all_zero() {
        let beam = BeamParameters {
            beam_diameter_um: 0.0,
            profile: BeamProfile::Gaussian,
        };
        let (geom, profile) = simulate(&beam, &kapton(), 10.0, 75).unwrap();
        assert_eq!(geom.peak_fluence_j_cm2, 0.0);
        assert_eq!(geom.top_diameter_um, 0.0);
        assert_eq!(geom.bottom_diameter_um, 0.0);
        assert_eq!(geom.max_depth_per_pulse_um, 0.0);
        assert!(profile.fluence_j_cm2.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_subthreshold_tophat_does_not_drill() {
        let beam = BeamParameters {
            beam_diameter_um: 30.0,
            profile: BeamProfile::TopHat,
        };
        // 0.05 µJ over a 15 µm waist is far below a 0.18 J/cm² threshold
        let (geom, _) = simulate(&beam, &kapton(), 0.05, 100).unwrap();
        assert!(geom.peak_fluence_j_cm2 <= 0.18);
        assert_eq!(geom.top_diameter_um, 0.0);
        assert_eq!(geom.max_depth_per_pulse_um, 0.0);
        assert_eq!(geom.taper_angle_deg, 90.0);
        assert!(geom.taper_ratio.is_infinite());
    }

    #[test]
    fn test_invalid_material_rejected() {
        let beam = BeamParameters {
            beam_diameter_um: 30.0,
            profile: BeamProfile::Gaussian,
        };
        let mut bad = kapton();
        bad.material_thickness_um = 0.0;
        assert!(simulate(&beam, &bad, 10.0, 75).is_err());
    }
}
