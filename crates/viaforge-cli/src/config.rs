//! TOML job configuration for the ViaForge CLI.

use serde::Deserialize;
use viaforge_core::types::{BeamParameters, BeamProfile, MaterialProperties, ProcessSettings};

/// Top-level job file.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub job: JobSpec,
    pub beam: BeamConfig,
    pub material: MaterialConfig,
    #[serde(default)]
    pub process: ProcessConfig,
    #[serde(default)]
    pub target: Option<TargetConfig>,
    #[serde(default)]
    pub dose: Option<DoseConfig>,
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which calculation to run.
#[derive(Debug, Deserialize)]
pub struct JobSpec {
    pub mode: JobMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobMode {
    /// Forward simulation: settings → via geometry.
    Forward,
    /// Inverse recipe: target diameter → energy and shots.
    Recipe,
    /// Dose budget: solve for average power.
    DosePower,
    /// Dose budget: solve for shot count.
    DoseShots,
    /// Spot-size sensitivity sweep.
    Sweep,
}

/// Beam geometry from TOML.
#[derive(Debug, Deserialize)]
pub struct BeamConfig {
    pub diameter_um: f64,
    #[serde(default)]
    pub profile: BeamProfile,
}

impl BeamConfig {
    pub fn to_params(&self) -> BeamParameters {
        BeamParameters {
            beam_diameter_um: self.diameter_um,
            profile: self.profile,
        }
    }
}

/// Material properties from TOML.
#[derive(Debug, Deserialize)]
pub struct MaterialConfig {
    pub ablation_threshold_j_cm2: f64,
    pub penetration_depth_um: f64,
    pub thickness_um: f64,
}

impl MaterialConfig {
    pub fn to_props(&self) -> MaterialProperties {
        MaterialProperties {
            ablation_threshold_j_cm2: self.ablation_threshold_j_cm2,
            penetration_depth_um: self.penetration_depth_um,
            material_thickness_um: self.thickness_um,
        }
    }
}

/// Laser settings from TOML.
#[derive(Debug, Deserialize)]
pub struct ProcessConfig {
    #[serde(default = "default_pulse_energy")]
    pub pulse_energy_uj: f64,
    #[serde(default = "default_shots")]
    pub number_of_shots: u32,
    #[serde(default = "default_rate")]
    pub repetition_rate_khz: f64,
}

impl ProcessConfig {
    pub fn to_settings(&self) -> ProcessSettings {
        ProcessSettings {
            pulse_energy_uj: self.pulse_energy_uj,
            number_of_shots: self.number_of_shots,
            repetition_rate_khz: self.repetition_rate_khz,
        }
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            pulse_energy_uj: default_pulse_energy(),
            number_of_shots: default_shots(),
            repetition_rate_khz: default_rate(),
        }
    }
}

fn default_pulse_energy() -> f64 {
    10.0
}
fn default_shots() -> u32 {
    75
}
fn default_rate() -> f64 {
    50.0
}

/// Goal for recipe mode.
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    pub top_diameter_um: f64,
    #[serde(default)]
    pub overkill_shots: u32,
}

/// Goal for the two dose modes.
#[derive(Debug, Deserialize)]
pub struct DoseConfig {
    pub target_dose_j_cm2: f64,
    /// Fixed shot count (dose-power mode).
    #[serde(default)]
    pub number_of_shots: Option<u32>,
    /// Available power in mW (dose-shots mode).
    #[serde(default)]
    pub available_power_mw: Option<f64>,
}

/// Sweep range for sweep mode. Runs the recipe solver per spot when a
/// `[target]` table is present, otherwise the forward model.
#[derive(Debug, Deserialize)]
pub struct SweepConfig {
    pub spot_min_um: f64,
    pub spot_max_um: f64,
    #[serde(default = "default_sweep_samples")]
    pub samples: usize,
}

fn default_sweep_samples() -> usize {
    100
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save tabular results as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also save the result record as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Load and parse a TOML job file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Cross-field checks that serde cannot express.
fn validate(config: &JobConfig) -> anyhow::Result<()> {
    match config.job.mode {
        JobMode::Recipe => {
            if config.target.is_none() {
                anyhow::bail!("recipe mode requires a [target] table");
            }
            if config.beam.profile != BeamProfile::Gaussian {
                anyhow::bail!("recipe mode requires a gaussian beam profile");
            }
        }
        JobMode::DosePower => {
            let dose = config
                .dose
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("dose-power mode requires a [dose] table"))?;
            if dose.number_of_shots.is_none() {
                anyhow::bail!("dose-power mode requires dose.number_of_shots");
            }
        }
        JobMode::DoseShots => {
            let dose = config
                .dose
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("dose-shots mode requires a [dose] table"))?;
            if dose.available_power_mw.is_none() {
                anyhow::bail!("dose-shots mode requires dose.available_power_mw");
            }
        }
        JobMode::Sweep => {
            if config.sweep.is_none() {
                anyhow::bail!("sweep mode requires a [sweep] table");
            }
        }
        JobMode::Forward => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_forward_job_parses() {
        let toml_src = r#"
            [job]
            mode = "forward"

            [beam]
            diameter_um = 30.0
            profile = "gaussian"

            [material]
            ablation_threshold_j_cm2 = 0.18
            penetration_depth_um = 0.30
            thickness_um = 50.0
        "#;
        let config: JobConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.job.mode, JobMode::Forward);
        assert_eq!(config.process.number_of_shots, 75);
        assert!(config.output.save_csv);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_recipe_with_tophat_beam_rejected() {
        let toml_src = r#"
            [job]
            mode = "recipe"

            [beam]
            diameter_um = 20.0
            profile = "top-hat"

            [material]
            ablation_threshold_j_cm2 = 0.9
            penetration_depth_um = 0.8
            thickness_um = 40.0

            [target]
            top_diameter_um = 25.0
        "#;
        let config: JobConfig = toml::from_str(toml_src).unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_recipe_without_target_rejected() {
        let toml_src = r#"
            [job]
            mode = "recipe"

            [beam]
            diameter_um = 30.0

            [material]
            ablation_threshold_j_cm2 = 0.9
            penetration_depth_um = 0.8
            thickness_um = 40.0
        "#;
        let config: JobConfig = toml::from_str(toml_src).unwrap();
        assert!(validate(&config).is_err());
    }
}
