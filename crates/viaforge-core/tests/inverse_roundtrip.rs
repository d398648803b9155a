//! Integration tests: algebraic inverse laws and model invariants.
//!
//! The forward model and the two inverse solvers are closed-form inverses
//! of one another; these tests sweep parameter grids and require the
//! round trips to close to floating tolerance.

use approx::assert_relative_eq;
use viaforge_core::types::{BeamParameters, BeamProfile, MaterialProperties};
use viaforge_core::{dose, forward, recipe};

fn material(threshold: f64, alpha_inv: f64, thickness: f64) -> MaterialProperties {
    MaterialProperties {
        ablation_threshold_j_cm2: threshold,
        penetration_depth_um: alpha_inv,
        material_thickness_um: thickness,
    }
}

/// Forward top diameter fed back through the inverse solver must
/// reproduce the forward pulse energy (and peak fluence).
#[test]
fn test_top_diameter_roundtrip() {
    let mat = material(0.18, 0.30, 50.0);

    for &diameter in &[10.0, 20.0, 30.0, 45.0] {
        for &energy in &[2.0, 5.0, 10.0, 18.0] {
            let beam = BeamParameters {
                beam_diameter_um: diameter,
                profile: BeamProfile::Gaussian,
            };
            let (geom, _) = forward::simulate(&beam, &mat, energy, 50).unwrap();
            if geom.top_diameter_um <= 0.0 {
                continue; // below threshold, nothing to invert
            }

            let rec = recipe::solve_recipe(geom.top_diameter_um, &mat, &beam, 0).unwrap();
            assert!(rec.viable);
            assert_relative_eq!(
                rec.peak_fluence_j_cm2,
                geom.peak_fluence_j_cm2,
                max_relative = 1e-9
            );
            assert_relative_eq!(rec.pulse_energy_uj, energy, max_relative = 1e-9);
        }
    }
}

/// Geometry invariants hold across a parameter grid:
/// `top >= bottom >= 0` and `taper in [0, 90]`.
#[test]
fn test_geometry_invariants() {
    for &profile in &[BeamProfile::Gaussian, BeamProfile::TopHat] {
        for &diameter in &[5.0, 15.0, 30.0, 60.0] {
            for &energy in &[0.5, 5.0, 20.0] {
                for &shots in &[1u32, 30, 150] {
                    let beam = BeamParameters {
                        beam_diameter_um: diameter,
                        profile,
                    };
                    let mat = material(0.9, 0.8, 40.0);
                    let (geom, _) = forward::simulate(&beam, &mat, energy, shots).unwrap();
                    assert!(
                        geom.top_diameter_um >= geom.bottom_diameter_um,
                        "top {} < bottom {} at d={diameter}, E={energy}, N={shots}",
                        geom.top_diameter_um,
                        geom.bottom_diameter_um
                    );
                    assert!(geom.bottom_diameter_um >= 0.0);
                    assert!((0.0..=90.0).contains(&geom.taper_angle_deg));
                }
            }
        }
    }
}

/// Cumulative depth is non-decreasing in shot count, so the bottom
/// diameter can never shrink as shots are added.
#[test]
fn test_bottom_diameter_monotone_in_shots() {
    let beam = BeamParameters {
        beam_diameter_um: 30.0,
        profile: BeamProfile::Gaussian,
    };
    let mat = material(0.18, 0.30, 50.0);

    let mut previous = 0.0;
    for shots in (10..=300).step_by(10) {
        let (geom, _) = forward::simulate(&beam, &mat, 10.0, shots).unwrap();
        assert!(
            geom.bottom_diameter_um >= previous,
            "bottom shrank from {previous} to {} at N={shots}",
            geom.bottom_diameter_um
        );
        previous = geom.bottom_diameter_um;
    }
}

/// solve_power and solve_shots are inverses: the power solved for a shot
/// count yields that shot count back, across a grid of scenarios.
#[test]
fn test_dose_solver_roundtrip() {
    for &dose_target in &[20.0, 175.0, 900.0] {
        for &diameter in &[12.0, 30.0, 55.0] {
            for &rate in &[10.0, 50.0, 400.0] {
                for &shots in &[1u32, 50, 777] {
                    let p = dose::solve_power(dose_target, diameter, rate, shots).unwrap();
                    let s = dose::solve_shots(
                        dose_target,
                        diameter,
                        rate,
                        p.required_average_power_mw,
                    )
                    .unwrap();
                    assert_eq!(
                        s.required_shots, shots,
                        "roundtrip failed at dose={dose_target}, d={diameter}, f={rate}"
                    );
                    assert_relative_eq!(
                        s.pulse_energy_uj,
                        p.implied_pulse_energy_uj,
                        max_relative = 1e-12
                    );
                }
            }
        }
    }
}
