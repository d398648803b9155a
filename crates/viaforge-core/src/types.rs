//! Parameter and result records shared across the ViaForge engine.
//!
//! Every record is an immutable value type constructed fresh per call:
//! nothing here has identity beyond its fields and nothing persists between
//! engine invocations.

use serde::{Deserialize, Serialize};

/// Radial energy distribution of the focused beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeamProfile {
    /// $F(r) = F_0 \exp(-2r^2/w_0^2)$, where the diameter is the 1/e² width.
    #[default]
    Gaussian,
    /// Uniform fluence inside the beam radius, zero outside.
    TopHat,
}

/// Focused beam geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamParameters {
    /// Focused spot diameter (µm): the 1/e² diameter for Gaussian beams,
    /// the full width for top-hat beams.
    pub beam_diameter_um: f64,
    /// Radial energy distribution shape.
    pub profile: BeamProfile,
}

impl BeamParameters {
    /// Beam waist $w_0$ (µm), half the spot diameter.
    pub fn waist_um(&self) -> f64 {
        self.beam_diameter_um / 2.0
    }
}

/// Ablation properties of the substrate being drilled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Fluence below which no material is removed (J/cm²).
    pub ablation_threshold_j_cm2: f64,
    /// Effective penetration depth $\alpha^{-1}$ (µm): the slope of the
    /// logarithmic ablation law, per pulse.
    pub penetration_depth_um: f64,
    /// Thickness of the layer to drill through (µm).
    pub material_thickness_um: f64,
}

/// Laser machine settings for a forward simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessSettings {
    /// Energy of a single pulse (µJ).
    pub pulse_energy_uj: f64,
    /// Number of pulses fired at one location.
    pub number_of_shots: u32,
    /// Pulse repetition rate (kHz). Only the dose/power solver uses this.
    pub repetition_rate_khz: f64,
}

/// Sampled radial profiles over the symmetric domain
/// `[-1.5·d, +1.5·d]` around the beam axis. Derived per call, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialProfile {
    /// Sample positions (µm), evenly spaced, symmetric about zero.
    pub radius_um: Vec<f64>,
    /// Single-pulse fluence at each sample (J/cm²).
    pub fluence_j_cm2: Vec<f64>,
    /// Per-pulse ablation depth at each sample (µm).
    pub depth_per_pulse_um: Vec<f64>,
    /// Cumulative depth after all shots, clipped to the material
    /// thickness (µm).
    pub cumulative_depth_um: Vec<f64>,
}

/// Predicted microvia geometry, the primary forward-model output.
///
/// Invariants: `top_diameter_um >= bottom_diameter_um >= 0` and
/// `taper_angle_deg ∈ [0, 90]`. A via that never opens at the base is
/// reported with `bottom_diameter_um = 0`, `taper_angle_deg = 90` and
/// `taper_ratio = +inf`: a meaningful "does not penetrate" answer, not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViaGeometry {
    /// Fluence at the beam centre (J/cm²).
    pub peak_fluence_j_cm2: f64,
    /// Maximum single-pulse removal depth across the profile (µm).
    pub max_depth_per_pulse_um: f64,
    /// Entry diameter at the material surface (µm).
    pub top_diameter_um: f64,
    /// Exit diameter at the material base (µm); zero if not penetrated.
    pub bottom_diameter_um: f64,
    /// Sidewall angle from vertical (degrees).
    pub taper_angle_deg: f64,
    /// Sidewall slope `(top − bottom)/2 / thickness`; `+inf` when the
    /// hole does not penetrate.
    pub taper_ratio: f64,
}

/// Output of the inverse recipe solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Pulse energy required to open the target top diameter (µJ).
    pub pulse_energy_uj: f64,
    /// Recommended shot count: ceiling of the minimum penetrating count
    /// plus the caller's overkill margin. Zero when not viable.
    pub number_of_shots: u32,
    /// Peak fluence implied by the required energy (J/cm²).
    pub peak_fluence_j_cm2: f64,
    /// Per-pulse depth at the required fluence (µm).
    pub depth_per_pulse_um: f64,
    /// False when the required fluence cannot exceed the ablation
    /// threshold, i.e. the requested via is unreachable with this beam
    /// and material.
    pub viable: bool,
}
