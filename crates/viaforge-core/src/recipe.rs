//! Inverse recipe solver: target geometry → laser settings.
//!
//! Inverts the Gaussian threshold-crossing relation: given the desired top
//! diameter $D$, the peak fluence that just opens it is
//!
//! $$ F_0 = F_{th} \exp\!\frac{D^2}{2 w_0^2} $$
//!
//! from which pulse energy follows via $E = F_0 \pi w_0^2 / 2$, per-pulse
//! depth via the Liu law, and the shot count as the ceiling of
//! thickness / depth plus a caller-supplied overkill margin.

use crate::error::{ensure_positive, EngineError};
use crate::fluence;
use crate::types::{BeamParameters, BeamProfile, MaterialProperties, Recipe};

/// Practical cap on the fluence exponent $D^2 / 2w_0^2$. Asking for a hole
/// much wider than the beam demands exponentially diverging energy; beyond
/// this the recipe is academic anyway.
const MAX_FLUENCE_EXPONENT: f64 = 15.0;

/// Solve for the pulse energy and shot count that drill a via of
/// `target_top_diameter_um` through the material.
///
/// Gaussian beams only: a top-hat crater is the beam diameter or nothing,
/// so the threshold-crossing relation has no inverse to solve and a
/// top-hat profile is rejected as an error. A degenerate beam
/// (`beam_diameter_um <= 0`) is reported as a non-viable recipe, not an
/// error. `viable = false` (with zero shots) also covers the physically
/// impossible regime where the required fluence cannot exceed the
/// ablation threshold.
pub fn solve_recipe(
    target_top_diameter_um: f64,
    material: &MaterialProperties,
    beam: &BeamParameters,
    overkill_shots: u32,
) -> Result<Recipe, EngineError> {
    if beam.profile != BeamProfile::Gaussian {
        return Err(EngineError::UnsupportedProfile {
            operation: "the recipe solver",
        });
    }
    ensure_positive("target_top_diameter_um", target_top_diameter_um)?;
    ensure_positive(
        "ablation_threshold_j_cm2",
        material.ablation_threshold_j_cm2,
    )?;
    ensure_positive("penetration_depth_um", material.penetration_depth_um)?;
    ensure_positive("material_thickness_um", material.material_thickness_um)?;

    let w0_um = beam.waist_um();
    if w0_um <= 0.0 {
        return Ok(not_viable());
    }

    let f_th = material.ablation_threshold_j_cm2;

    // The ratio D²/2w0² is dimensionless, so µm are fine here.
    let exponent = (target_top_diameter_um * target_top_diameter_um
        / (2.0 * w0_um * w0_um))
        .min(MAX_FLUENCE_EXPONENT);
    let required_peak = f_th * exponent.exp();
    let pulse_energy_uj =
        fluence::pulse_energy_uj_for_peak(beam.profile, w0_um, required_peak);

    let depth_per_pulse_um = if required_peak > f_th {
        material.penetration_depth_um * (required_peak / f_th).ln()
    } else {
        0.0
    };

    if depth_per_pulse_um <= 0.0 {
        // Required fluence sits at or below threshold: nothing ablates.
        return Ok(not_viable());
    }

    let min_shots = (material.material_thickness_um / depth_per_pulse_um).ceil() as u32;
    Ok(Recipe {
        pulse_energy_uj,
        number_of_shots: min_shots + overkill_shots,
        peak_fluence_j_cm2: required_peak,
        depth_per_pulse_um,
        viable: true,
    })
}

fn not_viable() -> Recipe {
    Recipe {
        pulse_energy_uj: 0.0,
        number_of_shots: 0,
        peak_fluence_j_cm2: 0.0,
        depth_per_pulse_um: 0.0,
        viable: false,
    }
}
