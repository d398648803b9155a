//! Unit conversion constants shared across the engine.
//!
//! All engine interfaces use the units process engineers actually work in
//! (µJ, µm, kHz, J/cm²); these factors convert to SI where the closed
//! forms need it.

/// Microjoules to joules.
pub const UJ_TO_J: f64 = 1e-6;

/// Micrometres to centimetres.
pub const UM_TO_CM: f64 = 1e-4;

/// Kilohertz to hertz.
pub const KHZ_TO_HZ: f64 = 1e3;

/// Mask diameter (mm) required to image a via of `via_diameter_um` through
/// a projection system with the given demagnification factor.
pub fn mask_diameter_mm(via_diameter_um: f64, demagnification: f64) -> f64 {
    via_diameter_um * demagnification / 1000.0
}
