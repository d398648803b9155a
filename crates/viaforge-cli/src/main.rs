//! ViaForge command-line interface.
//!
//! Run microvia process calculations from TOML job files:
//! ```sh
//! viaforge run job.toml
//! viaforge validate job.toml
//! viaforge presets
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use viaforge_materials::presets::THERMAL_PRESETS;

#[derive(Parser)]
#[command(name = "viaforge")]
#[command(about = "ViaForge: Laser Microvia Process Calculator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a job from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file without running it.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Display the built-in thermal-diffusivity reference values.
    Presets,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("ViaForge Process Calculator");
            println!("===========================");
            let job = config::load_config(&config)?;
            println!("Job file: {}", config.display());
            println!();

            let result = runner::run_job(&job)?;

            // Determine output directory
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            match &result {
                runner::JobOutput::Forward { geometry, profile } => {
                    if job.output.save_csv {
                        runner::write_profile_csv(profile, geometry, &out_dir.join("profile.csv"))?;
                    }
                    if job.output.save_json {
                        runner::write_json(geometry, &out_dir.join("geometry.json"))?;
                    }
                }
                runner::JobOutput::Recipe(rec) => {
                    if job.output.save_json {
                        runner::write_json(rec, &out_dir.join("recipe.json"))?;
                    }
                }
                runner::JobOutput::DosePower(sol) => {
                    if job.output.save_json {
                        runner::write_json(sol, &out_dir.join("dose_power.json"))?;
                    }
                }
                runner::JobOutput::DoseShots(sol) => {
                    if job.output.save_json {
                        runner::write_json(sol, &out_dir.join("dose_shots.json"))?;
                    }
                }
                runner::JobOutput::Sweep(samples) => {
                    if job.output.save_csv {
                        runner::write_sweep_csv(samples, &out_dir.join("sweep.csv"))?;
                    }
                    if job.output.save_json {
                        runner::write_json(samples, &out_dir.join("sweep.json"))?;
                    }
                }
            }

            println!("Job complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let _job = config::load_config(&config)?;
            println!("Job file is valid: {}", config.display());
            Ok(())
        }
        Commands::Presets => {
            println!("Thermal diffusivity reference values:");
            println!();
            for preset in THERMAL_PRESETS {
                println!("  {:<22} {:>8.4} cm²/s", preset.name, preset.diffusivity_cm2_s);
            }
            Ok(())
        }
    }
}
