//! # ViaForge Core
//!
//! The physics engine of the ViaForge toolkit. This crate implements the
//! closed-form beam-ablation model used to predict laser-drilled microvia
//! geometry in printed-circuit substrates.
//!
//! ## Model
//!
//! A focused pulse deposits a radial fluence profile (Gaussian or top-hat);
//! wherever the local fluence exceeds the material's ablation threshold, the
//! per-pulse removal depth follows the logarithmic Liu law
//! $z(r) = \alpha^{-1} \ln(F(r)/F_{th})$. Via geometry, recipe solving,
//! dose budgets and sensitivity sweeps are all derived from that single
//! relation and the beam-energy normalisation.
//!
//! Every operation is a synchronous pure function over caller-supplied value
//! records. The engine holds no state between calls and never performs I/O.
//!
//! ## Modules
//!
//! - [`types`] — Parameter and result records (beams, materials, geometry).
//! - [`fluence`] — Beam-energy normalisation and radial fluence profiles.
//! - [`forward`] — Forward simulation: parameters → via geometry.
//! - [`recipe`] — Inverse solver: target geometry → pulse energy and shots.
//! - [`dose`] — Cumulative-dose power/shot solving.
//! - [`sweep`] — Spot-size sensitivity sweeps.
//! - [`score`] — Configurable process-quality scoring.
//! - [`taper`] — Standalone sidewall taper prediction.
//! - [`thermal`] — Heat-accumulation risk index.
//! - [`units`] — Unit conversion constants.

pub mod dose;
pub mod error;
pub mod fluence;
pub mod forward;
pub mod recipe;
pub mod score;
pub mod sweep;
pub mod taper;
pub mod thermal;
pub mod types;
pub mod units;

pub use error::EngineError;
