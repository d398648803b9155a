//! # ViaForge Materials
//!
//! Material characterisation from experimental data. The engine needs two
//! numbers per substrate, the ablation threshold $F_{th}$ and the
//! effective penetration depth $\alpha^{-1}$, and this crate extracts
//! them from the measurements process engineers actually take:
//!
//! | Analysis | Module | Data |
//! |----------|--------|------|
//! | Liu plot ($D^2$ vs $\ln E$) | [`liu`] | crater diameters vs pulse energy |
//! | Ablation-rate fit (rate vs $\ln F$) | [`rate`] | depths vs fluence |
//! | Thermal diffusivity presets | [`presets`] | reference table |
//!
//! Both analyses reduce to a least-squares line fit ([`fit::LinearFit`])
//! after a logarithmic change of variables.

pub mod fit;
pub mod liu;
pub mod presets;
pub mod rate;

use thiserror::Error;

/// Errors from characterisation fits.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("at least {needed} valid data points are required (got {got})")]
    InsufficientData { needed: usize, got: usize },

    #[error("data point {index} is non-positive and cannot be log-transformed")]
    NonPositiveSample { index: usize },

    #[error("degenerate fit: {0}")]
    DegenerateFit(&'static str),
}
