//! Recipe solver panel: target diameter in, pulse energy and shots out.

use egui::Ui;
use viaforge_core::recipe;
use viaforge_core::types::{BeamParameters, BeamProfile, MaterialProperties, Recipe};

/// State for the inverse recipe panel.
#[derive(Debug)]
pub struct RecipePanel {
    /// Target top diameter (µm).
    pub target_top_diameter_um: f64,
    /// Safety shots added on top of the breakthrough count.
    pub overkill_shots: u32,
    /// Focused spot diameter 2w₀ (µm). The solver inverts the Gaussian
    /// threshold-crossing relation, so the profile is fixed to Gaussian.
    pub beam_diameter_um: f64,
    /// Material under the beam.
    pub material: MaterialProperties,
    /// Last solved recipe.
    pub result: Option<Recipe>,
    /// Set when the user asks to load the recipe into the simulator.
    pub send_requested: bool,
    /// Error message from the last evaluation, if any.
    pub error_message: Option<String>,
}

impl Default for RecipePanel {
    fn default() -> Self {
        Self {
            target_top_diameter_um: 25.0,
            overkill_shots: 10,
            beam_diameter_um: 20.0,
            material: MaterialProperties {
                ablation_threshold_j_cm2: 0.9,
                penetration_depth_um: 0.8,
                material_thickness_um: 50.0,
            },
            result: None,
            send_requested: false,
            error_message: None,
        }
    }
}

impl RecipePanel {
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("Recipe Solver");
        ui.separator();

        ui.add(
            egui::Slider::new(&mut self.target_top_diameter_um, 1.0..=200.0)
                .text("Target top diameter (µm)"),
        );
        let mut overkill = self.overkill_shots as f64;
        ui.add(egui::Slider::new(&mut overkill, 0.0..=100.0).text("Overkill shots"));
        self.overkill_shots = overkill as u32;

        ui.add_space(8.0);
        ui.add(
            egui::Slider::new(&mut self.beam_diameter_um, 2.0..=100.0)
                .text("Spot diameter 2w₀ (µm)"),
        );
        ui.label(
            egui::RichText::new("Gaussian beam (the inverse relation has no top-hat analogue).")
                .weak()
                .small(),
        );

        ui.add_space(8.0);
        super::material_inputs(ui, &mut self.material);

        ui.add_space(12.0);
        ui.separator();

        let beam = BeamParameters {
            beam_diameter_um: self.beam_diameter_um,
            profile: BeamProfile::Gaussian,
        };

        match recipe::solve_recipe(
            self.target_top_diameter_um,
            &self.material,
            &beam,
            self.overkill_shots,
        ) {
            Ok(rec) => {
                self.error_message = None;
                self.result = Some(rec);
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                self.result = None;
            }
        }

        if let Some(err) = &self.error_message {
            ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
            return;
        }

        let Some(rec) = self.result else {
            return;
        };

        if !rec.viable {
            ui.colored_label(
                egui::Color32::YELLOW,
                "No viable recipe: this beam cannot raise the fluence above \
                 the ablation threshold.",
            );
            return;
        }

        egui::Grid::new("recipe_grid")
            .min_col_width(180.0)
            .show(ui, |ui| {
                ui.label("Required pulse energy:");
                ui.strong(format!("{:.3} µJ", rec.pulse_energy_uj));
                ui.end_row();
                ui.label("Required shots:");
                ui.strong(format!("{}", rec.number_of_shots));
                ui.end_row();
                ui.label("Peak fluence:");
                ui.strong(format!("{:.3} J/cm²", rec.peak_fluence_j_cm2));
                ui.end_row();
                ui.label("Depth per pulse:");
                ui.strong(format!("{:.3} µm", rec.depth_per_pulse_um));
                ui.end_row();
            });

        let fluence_ratio = rec.peak_fluence_j_cm2 / self.material.ablation_threshold_j_cm2;
        if fluence_ratio > 50.0 {
            ui.colored_label(
                egui::Color32::YELLOW,
                format!(
                    "Peak fluence is {:.0}× the threshold; expect heavy thermal load.",
                    fluence_ratio
                ),
            );
        }

        ui.add_space(8.0);
        if ui.button("Load into Simulator").clicked() {
            self.send_requested = true;
        }
    }
}
