//! Engine error type.
//!
//! Invalid caller input is rejected before any computation. Non-physical
//! *results* (a process that cannot drill through) are not errors: they are
//! reported through sentinel values on the result records
//! (`number_of_shots = 0`, `taper_angle_deg = 90`, `taper_ratio = +inf`).

use thiserror::Error;

/// Errors from engine input validation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be at least one shot")]
    ZeroShots { name: &'static str },

    #[error("sweep range is empty: [{min}, {max}] µm")]
    EmptySweepRange { min: f64, max: f64 },

    #[error("{operation} is only defined for gaussian beams")]
    UnsupportedProfile { operation: &'static str },
}

/// Reject a non-positive scalar parameter before computing.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), EngineError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NonPositive { name, value })
    }
}
