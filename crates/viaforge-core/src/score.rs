//! Configurable process-quality scoring for sweep samples.
//!
//! One weighted blend of three normalised sub-scores replaces the pile of
//! presentation gauges the tool grew over time:
//!
//! - **taper quality** — straighter walls score higher;
//! - **energy efficiency** — peak fluence near the optimal removal point
//!   $F_0 = e^2 F_{th}$ scores higher, gross overdriving scores lower;
//! - **stability** — a wider top-to-bottom process window tolerates more
//!   parameter drift.
//!
//! The band edges are process policy, not physics, so they live in a
//! caller-supplied configuration record rather than in constants.

use serde::{Deserialize, Serialize};

use crate::sweep::SweepSample;

/// Quality-band edges and blend weights. All tunable per process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    /// Taper at or below this is ideal (degrees).
    pub good_taper_deg: f64,
    /// Taper at or above this scores zero (degrees).
    pub reject_taper_deg: f64,
    /// Fluence ratio $F_0/F_{th}$ at or above this scores zero on
    /// efficiency.
    pub inefficient_fluence_ratio: f64,
    /// Process window (µm) at or above which stability saturates at 1.
    pub stable_window_um: f64,
    /// Blend weight for the taper sub-score.
    pub taper_weight: f64,
    /// Blend weight for the efficiency sub-score.
    pub efficiency_weight: f64,
    /// Blend weight for the stability sub-score.
    pub stability_weight: f64,
    /// Scores at or above this classify as [`QualityBand::Good`].
    pub good_score: f64,
    /// Scores at or above this (but below `good_score`) classify as
    /// [`QualityBand::Average`].
    pub average_score: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            good_taper_deg: 5.0,
            reject_taper_deg: 20.0,
            inefficient_fluence_ratio: 50.0,
            stable_window_um: 10.0,
            taper_weight: 0.50,
            efficiency_weight: 0.25,
            stability_weight: 0.25,
            good_score: 0.75,
            average_score: 0.40,
        }
    }
}

/// Coarse quality classification of a blended score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityBand {
    Good,
    Average,
    Poor,
}

/// Fluence ratio at which specific removal is maximal for the
/// logarithmic ablation law.
const OPTIMAL_FLUENCE_RATIO: f64 = std::f64::consts::E * std::f64::consts::E;

/// Blend the three sub-scores into a scalar in `[0, 1]`.
///
/// A sample that never penetrates (taper sentinel at 90°) scores zero on
/// both taper and stability regardless of thresholds.
pub fn quality_score(sample: &SweepSample, thresholds: &ScoreThresholds) -> f64 {
    let taper = ramp_down(
        sample.taper_angle_deg,
        thresholds.good_taper_deg,
        thresholds.reject_taper_deg,
    );

    let efficiency = if sample.fluence_ratio <= 1.0 {
        0.0
    } else if sample.fluence_ratio <= OPTIMAL_FLUENCE_RATIO {
        1.0
    } else {
        ramp_down(
            sample.fluence_ratio,
            OPTIMAL_FLUENCE_RATIO,
            thresholds.inefficient_fluence_ratio,
        )
    };

    let stability = if sample.bottom_diameter_um > 0.0 {
        (sample.process_window_um / thresholds.stable_window_um).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let total_weight = thresholds.taper_weight
        + thresholds.efficiency_weight
        + thresholds.stability_weight;
    if total_weight <= 0.0 {
        return 0.0;
    }
    (thresholds.taper_weight * taper
        + thresholds.efficiency_weight * efficiency
        + thresholds.stability_weight * stability)
        / total_weight
}

/// Classify a blended score against the configured band edges.
pub fn classify(score: f64, thresholds: &ScoreThresholds) -> QualityBand {
    if score >= thresholds.good_score {
        QualityBand::Good
    } else if score >= thresholds.average_score {
        QualityBand::Average
    } else {
        QualityBand::Poor
    }
}

/// 1 at or below `good`, 0 at or above `bad`, linear between.
fn ramp_down(value: f64, good: f64, bad: f64) -> f64 {
    if bad <= good {
        return if value <= good { 1.0 } else { 0.0 };
    }
    ((bad - value) / (bad - good)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample(taper: f64, ratio: f64, bottom: f64, window: f64) -> SweepSample {
        SweepSample {
            spot_diameter_um: 30.0,
            pulse_energy_uj: 10.0,
            peak_fluence_j_cm2: ratio * 0.9,
            fluence_ratio: ratio,
            number_of_shots: 60,
            taper_angle_deg: taper,
            bottom_diameter_um: bottom,
            process_window_um: window,
        }
    }

    #[test]
    fn test_ideal_sample_scores_one() {
        let s = sample(3.0, 5.0, 20.0, 15.0);
        assert_relative_eq!(
            quality_score(&s, &ScoreThresholds::default()),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_unpenetrated_sample_loses_taper_and_stability() {
        let s = sample(90.0, 5.0, 0.0, 25.0);
        // Only the efficiency quarter survives
        assert_relative_eq!(
            quality_score(&s, &ScoreThresholds::default()),
            0.25,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_weights_follow_configuration() {
        let mut t = ScoreThresholds::default();
        t.taper_weight = 1.0;
        t.efficiency_weight = 0.0;
        t.stability_weight = 0.0;
        // Taper halfway between good (5°) and reject (20°)
        let s = sample(12.5, 200.0, 0.0, 0.0);
        assert_relative_eq!(quality_score(&s, &t), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_band_classification() {
        let t = ScoreThresholds::default();
        assert_eq!(classify(0.9, &t), QualityBand::Good);
        assert_eq!(classify(0.5, &t), QualityBand::Average);
        assert_eq!(classify(0.1, &t), QualityBand::Poor);
    }
}
