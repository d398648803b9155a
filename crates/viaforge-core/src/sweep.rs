//! Spot-size sensitivity sweeps.
//!
//! Evaluates the forward model (fixed pulse energy) or the inverse recipe
//! solver (fixed target diameter, energy solved per sample) at evenly
//! spaced beam spot diameters, yielding one metrics record per spot. The
//! sweep is a lazy, cloneable iterator: trade-off curves are drawn by
//! consuming it, and cloning restarts it from the beginning.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, EngineError};
use crate::fluence;
use crate::forward;
use crate::recipe;
use crate::types::{BeamParameters, BeamProfile, MaterialProperties};

/// Radial resolution used for bottom-diameter recovery inside recipe-mode
/// sweeps. Coarser than the forward model's grid; a sweep runs hundreds of
/// these.
const SWEEP_PROFILE_SAMPLES: usize = 201;

/// What is held fixed while the spot diameter varies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepMode {
    /// Fixed laser settings; geometry responds to the spot size.
    Forward {
        pulse_energy_uj: f64,
        number_of_shots: u32,
    },
    /// Fixed target top diameter; the required energy is solved per spot.
    Recipe { target_top_diameter_um: f64 },
}

/// Metrics for one swept spot diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSample {
    /// Beam spot diameter at this sample (µm).
    pub spot_diameter_um: f64,
    /// Pulse energy: the fixed input (forward) or the solved requirement
    /// (recipe), in µJ.
    pub pulse_energy_uj: f64,
    /// Peak fluence at this spot size (J/cm²).
    pub peak_fluence_j_cm2: f64,
    /// Peak fluence over ablation threshold; drives the efficiency score.
    pub fluence_ratio: f64,
    /// Shot count: fixed (forward) or minimum penetrating (recipe).
    pub number_of_shots: u32,
    /// Sidewall angle (degrees); 90 when not penetrated.
    pub taper_angle_deg: f64,
    /// Exit diameter (µm); zero when not penetrated.
    pub bottom_diameter_um: f64,
    /// Process window: top-to-bottom diameter margin (µm).
    pub process_window_um: f64,
}

/// Lazy finite sweep over spot diameters. `Clone` restarts it.
#[derive(Debug, Clone)]
pub struct SpotSweep {
    material: MaterialProperties,
    mode: SweepMode,
    min_um: f64,
    max_um: f64,
    sample_count: usize,
    index: usize,
}

impl SpotSweep {
    /// Build a sweep of `sample_count` evenly spaced spot diameters over
    /// `[min_um, max_um]`. Gaussian beams only — the inverse relation the
    /// recipe mode rests on has no top-hat analogue.
    pub fn new(
        material: MaterialProperties,
        mode: SweepMode,
        min_um: f64,
        max_um: f64,
        sample_count: usize,
    ) -> Result<Self, EngineError> {
        ensure_positive(
            "ablation_threshold_j_cm2",
            material.ablation_threshold_j_cm2,
        )?;
        ensure_positive("penetration_depth_um", material.penetration_depth_um)?;
        ensure_positive("material_thickness_um", material.material_thickness_um)?;
        ensure_positive("spot_min_um", min_um)?;
        if max_um < min_um || sample_count == 0 {
            return Err(EngineError::EmptySweepRange {
                min: min_um,
                max: max_um,
            });
        }
        Ok(Self {
            material,
            mode,
            min_um,
            max_um,
            sample_count,
            index: 0,
        })
    }

    fn spot_at(&self, i: usize) -> f64 {
        if self.sample_count == 1 {
            return self.min_um;
        }
        self.min_um
            + (self.max_um - self.min_um) * i as f64 / (self.sample_count - 1) as f64
    }

    fn evaluate(&self, spot_um: f64) -> SweepSample {
        match self.mode {
            SweepMode::Forward {
                pulse_energy_uj,
                number_of_shots,
            } => self.evaluate_forward(spot_um, pulse_energy_uj, number_of_shots),
            SweepMode::Recipe {
                target_top_diameter_um,
            } => self.evaluate_recipe(spot_um, target_top_diameter_um),
        }
    }

    fn evaluate_forward(
        &self,
        spot_um: f64,
        pulse_energy_uj: f64,
        number_of_shots: u32,
    ) -> SweepSample {
        let beam = BeamParameters {
            beam_diameter_um: spot_um,
            profile: BeamProfile::Gaussian,
        };
        // Material was validated in the constructor, so this cannot fail.
        let (geom, _) =
            forward::simulate(&beam, &self.material, pulse_energy_uj, number_of_shots)
                .unwrap_or_else(|_| unreachable!("material validated at construction"));
        SweepSample {
            spot_diameter_um: spot_um,
            pulse_energy_uj,
            peak_fluence_j_cm2: geom.peak_fluence_j_cm2,
            fluence_ratio: geom.peak_fluence_j_cm2
                / self.material.ablation_threshold_j_cm2,
            number_of_shots,
            taper_angle_deg: geom.taper_angle_deg,
            bottom_diameter_um: geom.bottom_diameter_um,
            process_window_um: geom.top_diameter_um - geom.bottom_diameter_um,
        }
    }

    fn evaluate_recipe(&self, spot_um: f64, target_um: f64) -> SweepSample {
        let beam = BeamParameters {
            beam_diameter_um: spot_um,
            profile: BeamProfile::Gaussian,
        };
        let rec = recipe::solve_recipe(target_um, &self.material, &beam, 0)
            .unwrap_or_else(|_| unreachable!("inputs validated at construction"));

        let bottom_diameter_um = if rec.viable {
            bottom_diameter_at(
                spot_um,
                rec.peak_fluence_j_cm2,
                &self.material,
                rec.number_of_shots,
            )
        } else {
            0.0
        };
        let taper_angle_deg = if bottom_diameter_um > 0.0 {
            let radius_diff = (target_um - bottom_diameter_um) / 2.0;
            (radius_diff / self.material.material_thickness_um)
                .atan()
                .to_degrees()
        } else {
            90.0
        };

        SweepSample {
            spot_diameter_um: spot_um,
            pulse_energy_uj: rec.pulse_energy_uj,
            peak_fluence_j_cm2: rec.peak_fluence_j_cm2,
            fluence_ratio: rec.peak_fluence_j_cm2
                / self.material.ablation_threshold_j_cm2,
            number_of_shots: rec.number_of_shots,
            taper_angle_deg,
            bottom_diameter_um,
            process_window_um: target_um - bottom_diameter_um,
        }
    }
}

/// Exit diameter for a Gaussian beam at the minimum penetrating shot
/// count, recovered from a sampled radial profile like the forward model.
fn bottom_diameter_at(
    spot_um: f64,
    peak_j_cm2: f64,
    material: &MaterialProperties,
    shots: u32,
) -> f64 {
    let w0_um = spot_um / 2.0;
    let f_th = material.ablation_threshold_j_cm2;
    let radii = fluence::radial_samples(spot_um, SWEEP_PROFILE_SAMPLES);
    let shots = f64::from(shots);

    let penetrated: Vec<f64> = radii
        .iter()
        .copied()
        .filter(|&r| {
            let f = fluence::fluence_at(BeamProfile::Gaussian, peak_j_cm2, w0_um, r);
            f > f_th
                && shots * material.penetration_depth_um * (f / f_th).ln()
                    >= material.material_thickness_um
        })
        .collect();
    match (penetrated.first(), penetrated.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    }
}

impl Iterator for SpotSweep {
    type Item = SweepSample;

    fn next(&mut self) -> Option<SweepSample> {
        if self.index >= self.sample_count {
            return None;
        }
        let spot = self.spot_at(self.index);
        self.index += 1;
        Some(self.evaluate(spot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sample_count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SpotSweep {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn material() -> MaterialProperties {
        MaterialProperties {
            ablation_threshold_j_cm2: 0.9,
            penetration_depth_um: 0.8,
            material_thickness_um: 40.0,
        }
    }

    #[test]
    fn test_sweep_is_finite_and_evenly_spaced() {
        let sweep = SpotSweep::new(
            material(),
            SweepMode::Recipe {
                target_top_diameter_um: 25.0,
            },
            15.0,
            40.0,
            100,
        )
        .unwrap();
        let samples: Vec<_> = sweep.collect();
        assert_eq!(samples.len(), 100);
        assert_relative_eq!(samples[0].spot_diameter_um, 15.0, epsilon = 1e-12);
        assert_relative_eq!(samples[99].spot_diameter_um, 40.0, epsilon = 1e-12);
        let step = samples[1].spot_diameter_um - samples[0].spot_diameter_um;
        assert_relative_eq!(step, 25.0 / 99.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clone_restarts_the_sweep() {
        let mut sweep = SpotSweep::new(
            material(),
            SweepMode::Forward {
                pulse_energy_uj: 10.0,
                number_of_shots: 60,
            },
            20.0,
            30.0,
            11,
        )
        .unwrap();
        let fresh = sweep.clone();
        sweep.nth(5);
        let first_again = fresh.clone().next().unwrap();
        assert_relative_eq!(first_again.spot_diameter_um, 20.0, epsilon = 1e-12);
        assert_eq!(fresh.count(), 11);
    }

    #[test]
    fn test_recipe_mode_energy_minimum_at_sqrt2_target() {
        // E(w0) = F_th·π·w0²·exp(D²/2w0²)/2 has its minimum where
        // w0 = D/√2, i.e. spot = √2·D ≈ 35.36 µm for a 25 µm target.
        let samples: Vec<_> = SpotSweep::new(
            material(),
            SweepMode::Recipe {
                target_top_diameter_um: 25.0,
            },
            20.0,
            50.0,
            301,
        )
        .unwrap()
        .collect();
        let cheapest = samples
            .iter()
            .min_by(|a, b| a.pulse_energy_uj.partial_cmp(&b.pulse_energy_uj).unwrap())
            .unwrap();
        assert_relative_eq!(
            cheapest.spot_diameter_um,
            25.0 * std::f64::consts::SQRT_2,
            epsilon = 0.2
        );
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(SpotSweep::new(
            material(),
            SweepMode::Recipe {
                target_top_diameter_um: 25.0
            },
            40.0,
            15.0,
            100
        )
        .is_err());
    }
}
