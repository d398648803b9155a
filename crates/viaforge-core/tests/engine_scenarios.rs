//! Integration tests: hand-derived scenarios against the closed forms.
//!
//! Every expected number below is derived on paper from the model
//! equations (peak fluence normalisation, Liu law, dose definition), so
//! these tests pin the engine to the physics rather than to itself.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use viaforge_core::types::{BeamParameters, BeamProfile, MaterialProperties};
use viaforge_core::{dose, forward, recipe};

fn kapton_50um() -> MaterialProperties {
    MaterialProperties {
        ablation_threshold_j_cm2: 0.18,
        penetration_depth_um: 0.30,
        material_thickness_um: 50.0,
    }
}

/// Gaussian reference scenario: 30 µm spot, 10 µJ, 75 shots into 50 µm
/// of polyimide.
///
/// By hand: w0 = 15 µm = 1.5e-3 cm, E = 1e-5 J,
/// F0 = 2E/(π w0²) = 2.8294 J/cm²,
/// depth/pulse = 0.3·ln(F0/0.18) = 0.8265 µm,
/// top = sqrt(2·w0²·ln(F0/0.18)) = 35.209 µm,
/// penetration radius r* from 75·depth(r) ≥ 50 → r* = 7.741 µm,
/// so bottom ≈ 15.48 µm (minus up to one 0.18 µm grid step per side).
#[test]
fn test_gaussian_reference_scenario() {
    let beam = BeamParameters {
        beam_diameter_um: 30.0,
        profile: BeamProfile::Gaussian,
    };
    let (geom, profile) = forward::simulate(&beam, &kapton_50um(), 10.0, 75).unwrap();

    eprintln!(
        "F0={:.4}, depth/pulse={:.4}, top={:.3}, bottom={:.3}, taper={:.3}°",
        geom.peak_fluence_j_cm2,
        geom.max_depth_per_pulse_um,
        geom.top_diameter_um,
        geom.bottom_diameter_um,
        geom.taper_angle_deg
    );

    assert_relative_eq!(geom.peak_fluence_j_cm2, 2.8294, epsilon = 1e-4);
    assert_relative_eq!(geom.max_depth_per_pulse_um, 0.8265, epsilon = 1e-4);
    assert_relative_eq!(geom.top_diameter_um, 35.209, epsilon = 1e-3);
    // Grid-sampled bottom: analytic 15.48 µm, resolved to the 0.18 µm grid
    assert_abs_diff_eq!(geom.bottom_diameter_um, 15.48, epsilon = 0.4);
    assert!(geom.bottom_diameter_um <= 15.482);

    // Taper is defined exactly by the reported diameters
    let expected_taper = ((geom.top_diameter_um - geom.bottom_diameter_um) / 2.0 / 50.0)
        .atan()
        .to_degrees();
    assert_relative_eq!(geom.taper_angle_deg, expected_taper, epsilon = 1e-12);
    assert_relative_eq!(geom.taper_ratio, expected_taper.to_radians().tan(), epsilon = 1e-9);

    // Profile bookkeeping: 501 samples over [-45, 45] µm, clipped depth
    assert_eq!(profile.radius_um.len(), 501);
    assert!(profile
        .cumulative_depth_um
        .iter()
        .all(|&d| (0.0..=50.0).contains(&d)));
    assert_relative_eq!(
        profile.cumulative_depth_um[250],
        50.0,
        epsilon = 1e-9 // centre punches through, so it is clipped
    );
}

/// Top-hat beam below threshold: nothing ablates, and the inverse solver
/// flags the same regime as non-viable.
#[test]
fn test_subthreshold_tophat_and_nonviable_recipe() {
    let beam = BeamParameters {
        beam_diameter_um: 30.0,
        profile: BeamProfile::TopHat,
    };
    // 0.1 µJ over a 15 µm waist: F0 = 1e-7/(π·2.25e-6) ≈ 0.0141 J/cm²
    let (geom, _) = forward::simulate(&beam, &kapton_50um(), 0.1, 200).unwrap();
    assert_eq!(geom.top_diameter_um, 0.0);
    assert_eq!(geom.max_depth_per_pulse_um, 0.0);
    assert_eq!(geom.bottom_diameter_um, 0.0);
    assert_eq!(geom.taper_angle_deg, 90.0);
    assert!(geom.taper_ratio.is_infinite());

    // The degenerate-beam inverse case signals non-viability the same way
    let zero_beam = BeamParameters {
        beam_diameter_um: 0.0,
        profile: BeamProfile::Gaussian,
    };
    let rec = recipe::solve_recipe(25.0, &kapton_50um(), &zero_beam, 10).unwrap();
    assert!(!rec.viable);
    assert_eq!(rec.number_of_shots, 0);
}

/// Dose scenario: 175 J/cm² in 50 shots at 50 kHz through a 30 µm spot.
///
/// F/shot = 3.5 J/cm², E = 3.5·π·(1.5e-3 cm)²/2 = 12.370 µJ,
/// P = 12.370 µJ · 50 kHz = 618.50 mW.
#[test]
fn test_dose_power_closed_form() {
    let sol = dose::solve_power(175.0, 30.0, 50.0, 50).unwrap();
    assert_relative_eq!(sol.required_average_power_mw, 618.50, epsilon = 0.01);
    assert_relative_eq!(sol.implied_pulse_energy_uj, 12.370, epsilon = 0.001);
    assert_relative_eq!(sol.peak_fluence_per_shot_j_cm2, 3.5, epsilon = 1e-12);
}

/// A vanishing beam must not raise a division error anywhere.
#[test]
fn test_vanishing_beam_is_all_zero() {
    for d in [0.0, -1.0] {
        let beam = BeamParameters {
            beam_diameter_um: d,
            profile: BeamProfile::Gaussian,
        };
        let (geom, _) = forward::simulate(&beam, &kapton_50um(), 10.0, 75).unwrap();
        assert_eq!(geom.top_diameter_um, 0.0);
        assert_eq!(geom.bottom_diameter_um, 0.0);
        assert!(geom.peak_fluence_j_cm2.is_finite());
        assert!(geom.taper_angle_deg == 90.0);
    }
}
