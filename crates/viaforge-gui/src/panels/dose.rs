//! Dose budgeting and heat-accumulation panel.

use egui::Ui;
use viaforge_core::{dose, thermal};
use viaforge_materials::presets::THERMAL_PRESETS;

/// Which unknown the dose solver is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoseUnknown {
    /// Solve for average power given a shot count.
    Power,
    /// Solve for shot count given available power.
    Shots,
}

/// State for the dose and thermal panel.
#[derive(Debug)]
pub struct DosePanel {
    /// Cumulative peak fluence goal (J/cm²).
    pub target_dose_j_cm2: f64,
    /// Focused spot diameter 2w₀ (µm).
    pub beam_diameter_um: f64,
    /// Repetition rate (kHz).
    pub repetition_rate_khz: f64,
    /// What to solve for.
    pub unknown: DoseUnknown,
    /// Shot count (power mode input).
    pub number_of_shots: u32,
    /// Available average power in mW (shots mode input).
    pub available_power_mw: f64,
    /// Index into the thermal preset table.
    pub preset_index: usize,
    /// Thermal diffusivity (cm²/s), seeded from the preset.
    pub diffusivity_cm2_s: f64,
}

impl Default for DosePanel {
    fn default() -> Self {
        Self {
            target_dose_j_cm2: 250.0,
            beam_diameter_um: 30.0,
            repetition_rate_khz: 50.0,
            unknown: DoseUnknown::Power,
            number_of_shots: 100,
            available_power_mw: 500.0,
            preset_index: 0,
            diffusivity_cm2_s: THERMAL_PRESETS[0].diffusivity_cm2_s,
        }
    }
}

impl DosePanel {
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("Dose & Thermal");
        ui.separator();

        ui.label(
            egui::RichText::new(
                "Dose is modelled as peak fluence per shot times shot count; \
                 incubation and plume shielding are not included.",
            )
            .weak()
            .small(),
        );
        ui.add_space(4.0);

        ui.add(
            egui::Slider::new(&mut self.target_dose_j_cm2, 1.0..=10_000.0)
                .logarithmic(true)
                .text("Target dose (J/cm²)"),
        );
        ui.add(
            egui::Slider::new(&mut self.beam_diameter_um, 2.0..=100.0)
                .text("Spot diameter 2w₀ (µm)"),
        );
        ui.add(
            egui::Slider::new(&mut self.repetition_rate_khz, 1.0..=2000.0)
                .logarithmic(true)
                .text("Repetition rate (kHz)"),
        );

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Solve for:");
            ui.selectable_value(&mut self.unknown, DoseUnknown::Power, "Average power");
            ui.selectable_value(&mut self.unknown, DoseUnknown::Shots, "Shot count");
        });

        match self.unknown {
            DoseUnknown::Power => {
                let mut shots = self.number_of_shots as f64;
                ui.add(egui::Slider::new(&mut shots, 1.0..=10_000.0).text("Number of shots"));
                self.number_of_shots = shots as u32;

                ui.add_space(8.0);
                match dose::solve_power(
                    self.target_dose_j_cm2,
                    self.beam_diameter_um,
                    self.repetition_rate_khz,
                    self.number_of_shots,
                ) {
                    Ok(sol) => {
                        egui::Grid::new("dose_power_grid").min_col_width(180.0).show(ui, |ui| {
                            ui.label("Required avg. power:");
                            ui.strong(format!("{:.2} mW", sol.required_average_power_mw));
                            ui.end_row();
                            ui.label("Implied pulse energy:");
                            ui.strong(format!("{:.3} µJ", sol.implied_pulse_energy_uj));
                            ui.end_row();
                            ui.label("Fluence per shot:");
                            ui.strong(format!("{:.3} J/cm²", sol.peak_fluence_per_shot_j_cm2));
                            ui.end_row();
                        });
                    }
                    Err(e) => {
                        ui.colored_label(egui::Color32::RED, format!("Error: {}", e));
                    }
                }
            }
            DoseUnknown::Shots => {
                ui.add(
                    egui::Slider::new(&mut self.available_power_mw, 1.0..=20_000.0)
                        .logarithmic(true)
                        .text("Available power (mW)"),
                );

                ui.add_space(8.0);
                match dose::solve_shots(
                    self.target_dose_j_cm2,
                    self.beam_diameter_um,
                    self.repetition_rate_khz,
                    self.available_power_mw,
                ) {
                    Ok(sol) => {
                        egui::Grid::new("dose_shots_grid").min_col_width(180.0).show(ui, |ui| {
                            ui.label("Required shots:");
                            ui.strong(format!("{}", sol.required_shots));
                            ui.end_row();
                            ui.label("Pulse energy:");
                            ui.strong(format!("{:.3} µJ", sol.pulse_energy_uj));
                            ui.end_row();
                            ui.label("Fluence per shot:");
                            ui.strong(format!("{:.3} J/cm²", sol.peak_fluence_per_shot_j_cm2));
                            ui.end_row();
                        });
                    }
                    Err(e) => {
                        ui.colored_label(egui::Color32::RED, format!("Error: {}", e));
                    }
                }
            }
        }

        ui.add_space(16.0);
        ui.separator();
        ui.label("Heat accumulation screening");

        ui.horizontal_wrapped(|ui| {
            ui.label("Substrate:");
            for (i, preset) in THERMAL_PRESETS.iter().enumerate() {
                if ui
                    .selectable_label(self.preset_index == i, preset.name)
                    .clicked()
                {
                    self.preset_index = i;
                    self.diffusivity_cm2_s = preset.diffusivity_cm2_s;
                }
            }
        });
        ui.add(
            egui::Slider::new(&mut self.diffusivity_cm2_s, 1e-4..=2.0)
                .logarithmic(true)
                .text("Thermal diffusivity (cm²/s)"),
        );

        match thermal::analyze(
            self.repetition_rate_khz,
            self.beam_diameter_um,
            self.diffusivity_cm2_s,
        ) {
            Ok(analysis) => {
                let (colour, label) = match analysis.risk {
                    thermal::ThermalRisk::Low => (egui::Color32::GREEN, "Low"),
                    thermal::ThermalRisk::Moderate => (egui::Color32::YELLOW, "Moderate"),
                    thermal::ThermalRisk::High => (egui::Color32::RED, "High"),
                };
                ui.label(format!(
                    "Diffusion time {:.2e} s, inter-pulse {:.2e} s, index {:.3}",
                    analysis.diffusion_time_s, analysis.inter_pulse_s, analysis.heat_index
                ));
                ui.horizontal(|ui| {
                    ui.label("Heat accumulation risk:");
                    ui.colored_label(colour, label);
                });
            }
            Err(e) => {
                ui.colored_label(egui::Color32::RED, format!("Error: {}", e));
            }
        }
    }
}
