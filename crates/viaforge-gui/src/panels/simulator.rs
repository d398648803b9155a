//! Forward simulator panel: beam and process inputs, live via geometry.

use egui::Ui;
use viaforge_core::types::{BeamParameters, BeamProfile, MaterialProperties};
use viaforge_core::{forward, taper};

/// State for the forward simulation panel.
#[derive(Debug)]
pub struct SimulatorPanel {
    /// Focused spot diameter 2w₀ (µm).
    pub beam_diameter_um: f64,
    /// Spatial beam profile.
    pub profile: BeamProfile,
    /// Material under the beam.
    pub material: MaterialProperties,
    /// Pulse energy (µJ).
    pub pulse_energy_uj: f64,
    /// Shots per via.
    pub number_of_shots: u32,
    /// Error message from the last evaluation, if any.
    pub error_message: Option<String>,
}

impl Default for SimulatorPanel {
    fn default() -> Self {
        Self {
            beam_diameter_um: 20.0,
            profile: BeamProfile::Gaussian,
            material: MaterialProperties {
                ablation_threshold_j_cm2: 0.9,
                penetration_depth_um: 0.8,
                material_thickness_um: 50.0,
            },
            pulse_energy_uj: 10.0,
            number_of_shots: 75,
            error_message: None,
        }
    }
}

impl SimulatorPanel {
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("Forward Simulator");
        ui.separator();

        ui.add(
            egui::Slider::new(&mut self.beam_diameter_um, 2.0..=100.0)
                .text("Spot diameter 2w₀ (µm)"),
        );
        super::profile_selector(ui, &mut self.profile);

        ui.add_space(8.0);
        super::material_inputs(ui, &mut self.material);

        ui.add_space(8.0);
        ui.add(
            egui::Slider::new(&mut self.pulse_energy_uj, 0.1..=200.0)
                .logarithmic(true)
                .text("Pulse energy (µJ)"),
        );
        let mut shots = self.number_of_shots as f64;
        ui.add(egui::Slider::new(&mut shots, 1.0..=2000.0).text("Number of shots"));
        self.number_of_shots = shots as u32;

        ui.add_space(12.0);
        ui.separator();

        let beam = BeamParameters {
            beam_diameter_um: self.beam_diameter_um,
            profile: self.profile,
        };

        let (geometry, profile) = match forward::simulate(
            &beam,
            &self.material,
            self.pulse_energy_uj,
            self.number_of_shots,
        ) {
            Ok(result) => {
                self.error_message = None;
                result
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                ui.colored_label(egui::Color32::RED, format!("Error: {}", e));
                return;
            }
        };

        // Metrics summary
        egui::Grid::new("geometry_grid")
            .min_col_width(160.0)
            .show(ui, |ui| {
                ui.label("Peak fluence:");
                ui.strong(format!("{:.3} J/cm²", geometry.peak_fluence_j_cm2));
                ui.end_row();
                ui.label("Depth per pulse:");
                ui.strong(format!("{:.3} µm", geometry.max_depth_per_pulse_um));
                ui.end_row();
                ui.label("Top diameter:");
                ui.strong(format!("{:.2} µm", geometry.top_diameter_um));
                ui.end_row();
                ui.label("Bottom diameter:");
                ui.strong(format!("{:.2} µm", geometry.bottom_diameter_um));
                ui.end_row();
                ui.label("Taper angle:");
                if geometry.taper_ratio.is_finite() {
                    ui.strong(format!(
                        "{:.2}° (taper ratio {:.3})",
                        geometry.taper_angle_deg, geometry.taper_ratio
                    ));
                } else {
                    ui.strong(format!("{:.2}°", geometry.taper_angle_deg));
                }
                ui.end_row();
            });

        // Beam-geometry taper estimate, independent of energy and shots
        if let Ok(predicted) = taper::predict(
            self.beam_diameter_um,
            self.material.penetration_depth_um,
        ) {
            ui.label(
                egui::RichText::new(format!(
                    "Beam-geometry taper estimate: θ = {:.2}° (full angle {:.2}°)",
                    predicted.half_angle_deg, predicted.full_angle_deg
                ))
                .weak()
                .small(),
            );
        }

        if geometry.peak_fluence_j_cm2 <= self.material.ablation_threshold_j_cm2 {
            ui.colored_label(
                egui::Color32::YELLOW,
                "Peak fluence is below the ablation threshold: no material removal.",
            );
        } else if geometry.bottom_diameter_um <= 0.0 {
            ui.colored_label(
                egui::Color32::YELLOW,
                "Via does not penetrate the full thickness (blind via).",
            );
        }

        ui.add_space(8.0);

        // Fluence profile with the threshold marked
        let fluence_points: egui_plot::PlotPoints = profile
            .radius_um
            .iter()
            .zip(&profile.fluence_j_cm2)
            .map(|(&r, &f)| [r, f])
            .collect();
        let fluence_line = egui_plot::Line::new(fluence_points)
            .name("Fluence")
            .color(egui::Color32::from_rgb(220, 120, 50))
            .width(2.0);
        let threshold_line = egui_plot::HLine::new(self.material.ablation_threshold_j_cm2)
            .name("F_th")
            .color(egui::Color32::from_rgb(220, 50, 50));

        egui_plot::Plot::new("fluence_plot")
            .height(200.0)
            .x_axis_label("Radius (µm)")
            .y_axis_label("Fluence (J/cm²)")
            .legend(egui_plot::Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(fluence_line);
                plot_ui.hline(threshold_line);
            });

        ui.add_space(8.0);

        // Via cross-section: cumulative depth clipped at the back surface,
        // drawn downwards from the top surface
        let thickness = self.material.material_thickness_um;
        let wall_points: egui_plot::PlotPoints = profile
            .radius_um
            .iter()
            .zip(&profile.cumulative_depth_um)
            .map(|(&r, &d)| [r, -d.min(thickness)])
            .collect();
        let wall_line = egui_plot::Line::new(wall_points)
            .name("Via wall")
            .color(egui::Color32::from_rgb(50, 120, 220))
            .width(2.0);
        let back_line = egui_plot::HLine::new(-thickness)
            .name("Back surface")
            .color(egui::Color32::GRAY);

        egui_plot::Plot::new("cross_section_plot")
            .height(220.0)
            .x_axis_label("Radius (µm)")
            .y_axis_label("Depth (µm)")
            .legend(egui_plot::Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(wall_line);
                plot_ui.hline(back_line);
            });
    }
}
