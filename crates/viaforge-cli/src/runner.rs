//! Job runner: dispatches a parsed job to the engine and formats output.

use std::path::Path;

use anyhow::{Context, Result};

use viaforge_core::score::{self, ScoreThresholds};
use viaforge_core::sweep::{SpotSweep, SweepMode, SweepSample};
use viaforge_core::types::{RadialProfile, ViaGeometry};
use viaforge_core::{dose, forward, recipe};

use crate::config::{JobConfig, JobMode};

/// Everything a job can produce; one variant per mode.
pub enum JobOutput {
    Forward {
        geometry: ViaGeometry,
        profile: RadialProfile,
    },
    Recipe(viaforge_core::types::Recipe),
    DosePower(dose::PowerSolution),
    DoseShots(dose::ShotSolution),
    Sweep(Vec<SweepSample>),
}

/// Run a parsed job configuration.
pub fn run_job(job: &JobConfig) -> Result<JobOutput> {
    log::info!("running {:?} job", job.job.mode);
    let beam = job.beam.to_params();
    let material = job.material.to_props();
    let process = job.process.to_settings();

    match job.job.mode {
        JobMode::Forward => {
            let (geometry, profile) = forward::simulate(
                &beam,
                &material,
                process.pulse_energy_uj,
                process.number_of_shots,
            )?;
            println!("Peak fluence:     {:>10.3} J/cm²", geometry.peak_fluence_j_cm2);
            println!("Depth per pulse:  {:>10.3} µm", geometry.max_depth_per_pulse_um);
            println!("Top diameter:     {:>10.2} µm", geometry.top_diameter_um);
            println!("Bottom diameter:  {:>10.2} µm", geometry.bottom_diameter_um);
            println!("Taper angle:      {:>10.2}°", geometry.taper_angle_deg);
            if geometry.bottom_diameter_um > 0.0 {
                println!("Status:           penetrates");
            } else {
                println!("Status:           INCOMPLETE — does not penetrate");
            }
            Ok(JobOutput::Forward { geometry, profile })
        }
        JobMode::Recipe => {
            // Presence was validated at load time
            let target = job.target.as_ref().context("missing [target] table")?;
            let rec = recipe::solve_recipe(
                target.top_diameter_um,
                &material,
                &beam,
                target.overkill_shots,
            )?;
            if rec.viable {
                println!("Required pulse energy:  {:>10.3} µJ", rec.pulse_energy_uj);
                println!("Required shots:         {:>10}", rec.number_of_shots);
                println!("Peak fluence:           {:>10.3} J/cm²", rec.peak_fluence_j_cm2);
                println!("Depth per pulse:        {:>10.3} µm", rec.depth_per_pulse_um);
            } else {
                println!("No viable recipe: required fluence never exceeds the ablation threshold.");
            }
            Ok(JobOutput::Recipe(rec))
        }
        JobMode::DosePower => {
            let cfg = job.dose.as_ref().context("missing [dose] table")?;
            let shots = cfg.number_of_shots.context("missing dose.number_of_shots")?;
            let sol = dose::solve_power(
                cfg.target_dose_j_cm2,
                job.beam.diameter_um,
                process.repetition_rate_khz,
                shots,
            )?;
            println!("Required avg. power:  {:>10.2} mW", sol.required_average_power_mw);
            println!("Implied pulse energy: {:>10.3} µJ", sol.implied_pulse_energy_uj);
            println!("Fluence per shot:     {:>10.3} J/cm²", sol.peak_fluence_per_shot_j_cm2);
            Ok(JobOutput::DosePower(sol))
        }
        JobMode::DoseShots => {
            let cfg = job.dose.as_ref().context("missing [dose] table")?;
            let power = cfg.available_power_mw.context("missing dose.available_power_mw")?;
            let sol = dose::solve_shots(
                cfg.target_dose_j_cm2,
                job.beam.diameter_um,
                process.repetition_rate_khz,
                power,
            )?;
            println!("Required shots:       {:>10}", sol.required_shots);
            println!("Pulse energy:         {:>10.3} µJ", sol.pulse_energy_uj);
            println!("Fluence per shot:     {:>10.3} J/cm²", sol.peak_fluence_per_shot_j_cm2);
            Ok(JobOutput::DoseShots(sol))
        }
        JobMode::Sweep => {
            let cfg = job.sweep.as_ref().context("missing [sweep] table")?;
            let mode = match &job.target {
                Some(target) => SweepMode::Recipe {
                    target_top_diameter_um: target.top_diameter_um,
                },
                None => SweepMode::Forward {
                    pulse_energy_uj: process.pulse_energy_uj,
                    number_of_shots: process.number_of_shots,
                },
            };
            let samples: Vec<SweepSample> = SpotSweep::new(
                material,
                mode,
                cfg.spot_min_um,
                cfg.spot_max_um,
                cfg.samples,
            )?
            .collect();

            let thresholds = ScoreThresholds::default();
            if let Some(best) = samples.iter().max_by(|a, b| {
                score::quality_score(a, &thresholds)
                    .partial_cmp(&score::quality_score(b, &thresholds))
                    .expect("scores are finite")
            }) {
                println!(
                    "Best spot: {:.2} µm (score {:.3}, taper {:.2}°, {:.2} µJ)",
                    best.spot_diameter_um,
                    score::quality_score(best, &thresholds),
                    best.taper_angle_deg,
                    best.pulse_energy_uj
                );
            }
            println!("Swept {} spot diameters.", samples.len());
            Ok(JobOutput::Sweep(samples))
        }
    }
}

/// Write the radial profile of a forward run as commented-header CSV.
pub fn write_profile_csv(profile: &RadialProfile, geometry: &ViaGeometry, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "# ViaForge — Radial Ablation Profile")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# peak_fluence_j_cm2: {:.6}", geometry.peak_fluence_j_cm2)?;
    writeln!(file, "# top_diameter_um: {:.4}", geometry.top_diameter_um)?;
    writeln!(file, "# bottom_diameter_um: {:.4}", geometry.bottom_diameter_um)?;
    writeln!(file, "#")?;
    writeln!(file, "radius_um,fluence_j_cm2,depth_per_pulse_um,cumulative_depth_um")?;

    for i in 0..profile.radius_um.len() {
        writeln!(
            file,
            "{:.4},{:.6e},{:.6e},{:.6e}",
            profile.radius_um[i],
            profile.fluence_j_cm2[i],
            profile.depth_per_pulse_um[i],
            profile.cumulative_depth_um[i]
        )?;
    }

    println!("Profile written to: {}", path.display());
    Ok(())
}

/// Write sweep samples (with quality scores) as commented-header CSV.
pub fn write_sweep_csv(samples: &[SweepSample], path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    let thresholds = ScoreThresholds::default();

    writeln!(file, "# ViaForge — Spot-Size Sensitivity Sweep")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "#")?;
    writeln!(
        file,
        "spot_diameter_um,pulse_energy_uj,peak_fluence_j_cm2,number_of_shots,taper_angle_deg,bottom_diameter_um,process_window_um,quality_score"
    )?;

    for s in samples {
        writeln!(
            file,
            "{:.3},{:.6},{:.6},{},{:.4},{:.4},{:.4},{:.4}",
            s.spot_diameter_um,
            s.pulse_energy_uj,
            s.peak_fluence_j_cm2,
            s.number_of_shots,
            s.taper_angle_deg,
            s.bottom_diameter_um,
            s.process_window_um,
            score::quality_score(s, &thresholds)
        )?;
    }

    println!("Sweep written to: {}", path.display());
    Ok(())
}

/// Write any serialisable result record as pretty JSON.
pub fn write_json<T: serde::Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;
    println!("JSON written to: {}", path.display());
    Ok(())
}
