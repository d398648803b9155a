//! Spot-size sensitivity panel: trade-off curves over a range of spots.

use egui::Ui;
use viaforge_core::score::{self, ScoreThresholds};
use viaforge_core::sweep::{SpotSweep, SweepMode, SweepSample};
use viaforge_core::types::MaterialProperties;

/// What each swept spot is asked to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepGoal {
    /// Re-solve the recipe for a fixed target diameter at every spot.
    TargetDiameter,
    /// Hold pulse energy and shots fixed at every spot.
    FixedSettings,
}

/// State for the spot-size sweep panel.
#[derive(Debug)]
pub struct SweepPanel {
    /// Material under the beam.
    pub material: MaterialProperties,
    /// Sweep goal.
    pub goal: SweepGoal,
    /// Target top diameter (µm), target mode.
    pub target_top_diameter_um: f64,
    /// Pulse energy (µJ), fixed-settings mode.
    pub pulse_energy_uj: f64,
    /// Shots per via, fixed-settings mode.
    pub number_of_shots: u32,
    /// Smallest spot diameter swept (µm).
    pub spot_min_um: f64,
    /// Largest spot diameter swept (µm).
    pub spot_max_um: f64,
    /// Number of sweep points.
    pub samples: usize,
    /// Last computed sweep.
    pub results: Option<Vec<SweepSample>>,
    /// Error message from the last run, if any.
    pub error_message: Option<String>,
}

impl Default for SweepPanel {
    fn default() -> Self {
        Self {
            material: MaterialProperties {
                ablation_threshold_j_cm2: 0.9,
                penetration_depth_um: 0.8,
                material_thickness_um: 50.0,
            },
            goal: SweepGoal::TargetDiameter,
            target_top_diameter_um: 25.0,
            pulse_energy_uj: 10.0,
            number_of_shots: 75,
            spot_min_um: 10.0,
            spot_max_um: 60.0,
            samples: 100,
            results: None,
            error_message: None,
        }
    }
}

impl SweepPanel {
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("Spot-Size Sweep");
        ui.separator();

        super::material_inputs(ui, &mut self.material);

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Goal:");
            ui.selectable_value(&mut self.goal, SweepGoal::TargetDiameter, "Target diameter");
            ui.selectable_value(&mut self.goal, SweepGoal::FixedSettings, "Fixed settings");
        });

        match self.goal {
            SweepGoal::TargetDiameter => {
                ui.add(
                    egui::Slider::new(&mut self.target_top_diameter_um, 1.0..=200.0)
                        .text("Target top diameter (µm)"),
                );
            }
            SweepGoal::FixedSettings => {
                ui.add(
                    egui::Slider::new(&mut self.pulse_energy_uj, 0.1..=200.0)
                        .logarithmic(true)
                        .text("Pulse energy (µJ)"),
                );
                let mut shots = self.number_of_shots as f64;
                ui.add(egui::Slider::new(&mut shots, 1.0..=2000.0).text("Number of shots"));
                self.number_of_shots = shots as u32;
            }
        }

        ui.add_space(8.0);
        ui.add(
            egui::Slider::new(&mut self.spot_min_um, 1.0..=100.0).text("Spot minimum (µm)"),
        );
        ui.add(
            egui::Slider::new(&mut self.spot_max_um, 2.0..=150.0).text("Spot maximum (µm)"),
        );
        let mut samples = self.samples as f64;
        ui.add(egui::Slider::new(&mut samples, 10.0..=500.0).text("Sweep points"));
        self.samples = samples as usize;

        ui.add_space(8.0);
        if ui.button("Run Sweep").clicked() {
            let mode = match self.goal {
                SweepGoal::TargetDiameter => SweepMode::Recipe {
                    target_top_diameter_um: self.target_top_diameter_um,
                },
                SweepGoal::FixedSettings => SweepMode::Forward {
                    pulse_energy_uj: self.pulse_energy_uj,
                    number_of_shots: self.number_of_shots,
                },
            };
            match SpotSweep::new(
                self.material,
                mode,
                self.spot_min_um,
                self.spot_max_um,
                self.samples,
            ) {
                Ok(sweep) => {
                    self.error_message = None;
                    let samples: Vec<SweepSample> = sweep.collect();
                    log::debug!("sweep produced {} samples", samples.len());
                    self.results = Some(samples);
                }
                Err(e) => {
                    self.error_message = Some(e.to_string());
                    self.results = None;
                }
            }
        }

        if let Some(err) = &self.error_message {
            ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
        }

        let Some(samples) = &self.results else {
            ui.add_space(8.0);
            ui.label("No sweep yet. Set the range and press Run Sweep.");
            return;
        };

        let thresholds = ScoreThresholds::default();

        // Best spot by composite quality score
        if let Some(best) = samples.iter().max_by(|a, b| {
            score::quality_score(a, &thresholds)
                .partial_cmp(&score::quality_score(b, &thresholds))
                .unwrap()
        }) {
            let band = score::classify(score::quality_score(best, &thresholds), &thresholds);
            ui.add_space(4.0);
            ui.label(format!(
                "Best spot: {:.2} µm ({:?}, score {:.3}, taper {:.2}°, {:.2} µJ)",
                best.spot_diameter_um,
                band,
                score::quality_score(best, &thresholds),
                best.taper_angle_deg,
                best.pulse_energy_uj
            ));
        }

        ui.add_space(8.0);

        // Taper and score against spot size
        let taper_points: egui_plot::PlotPoints = samples
            .iter()
            .filter(|s| s.taper_angle_deg.is_finite())
            .map(|s| [s.spot_diameter_um, s.taper_angle_deg])
            .collect();
        let score_points: egui_plot::PlotPoints = samples
            .iter()
            .map(|s| [s.spot_diameter_um, 10.0 * score::quality_score(s, &thresholds)])
            .collect();

        let taper_line = egui_plot::Line::new(taper_points)
            .name("Taper (°)")
            .color(egui::Color32::from_rgb(220, 50, 50))
            .width(2.0);
        let score_line = egui_plot::Line::new(score_points)
            .name("Score × 10")
            .color(egui::Color32::from_rgb(50, 180, 80))
            .width(2.0);

        egui_plot::Plot::new("taper_plot")
            .height(200.0)
            .x_axis_label("Spot diameter (µm)")
            .legend(egui_plot::Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(taper_line);
                plot_ui.line(score_line);
            });

        ui.add_space(8.0);

        // Pulse energy against spot size
        let energy_points: egui_plot::PlotPoints = samples
            .iter()
            .map(|s| [s.spot_diameter_um, s.pulse_energy_uj])
            .collect();
        let energy_line = egui_plot::Line::new(energy_points)
            .name("Pulse energy (µJ)")
            .color(egui::Color32::from_rgb(220, 120, 50))
            .width(2.0);

        egui_plot::Plot::new("energy_plot")
            .height(180.0)
            .x_axis_label("Spot diameter (µm)")
            .y_axis_label("Pulse energy (µJ)")
            .legend(egui_plot::Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(energy_line);
            });

        ui.add_space(8.0);

        // Process window against spot size
        let window_points: egui_plot::PlotPoints = samples
            .iter()
            .map(|s| [s.spot_diameter_um, s.process_window_um])
            .collect();
        let window_line = egui_plot::Line::new(window_points)
            .name("Process window (µm)")
            .color(egui::Color32::from_rgb(50, 120, 220))
            .width(2.0);

        egui_plot::Plot::new("window_plot")
            .height(180.0)
            .x_axis_label("Spot diameter (µm)")
            .y_axis_label("Window (µm)")
            .legend(egui_plot::Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(window_line);
            });
    }
}
