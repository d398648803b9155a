//! Reference thermal-diffusivity values for common substrate materials.
//!
//! Used to seed the heat-accumulation screening; engineers override them
//! with measured values when available.

/// A named thermal-diffusivity reference entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalPreset {
    pub name: &'static str,
    /// Thermal diffusivity D (cm²/s).
    pub diffusivity_cm2_s: f64,
}

/// Handbook diffusivities for the substrates this toolkit is usually
/// pointed at.
pub const THERMAL_PRESETS: &[ThermalPreset] = &[
    ThermalPreset {
        name: "Kapton (polyimide)",
        diffusivity_cm2_s: 0.0014,
    },
    ThermalPreset {
        name: "Silicon",
        diffusivity_cm2_s: 0.9,
    },
    ThermalPreset {
        name: "Copper",
        diffusivity_cm2_s: 1.11,
    },
    ThermalPreset {
        name: "Stainless steel",
        diffusivity_cm2_s: 0.04,
    },
    ThermalPreset {
        name: "Fused silica",
        diffusivity_cm2_s: 0.0085,
    },
];

/// Look up a preset by (case-insensitive) name prefix.
pub fn find_preset(name: &str) -> Option<&'static ThermalPreset> {
    let needle = name.to_ascii_lowercase();
    THERMAL_PRESETS
        .iter()
        .find(|p| p.name.to_ascii_lowercase().starts_with(&needle))
}
