//! Material characterisation panel: Liu-plot and ablation-rate fits from
//! pasted measurement data, plus the thermal reference table.

use egui::Ui;
use viaforge_materials::liu::{self, LiuAnalysis};
use viaforge_materials::presets::THERMAL_PRESETS;
use viaforge_materials::rate::{self, RateAnalysis};

/// State for the material characterisation panel.
#[derive(Debug)]
pub struct MaterialsPanel {
    /// Pasted Liu-plot data: "pulse_energy_uj  crater_diameter_um" per line.
    pub liu_input: String,
    /// Pasted rate data: "fluence_j_cm2  total_depth_um" per line.
    pub rate_input: String,
    /// Shot count behind the rate measurements.
    pub rate_shots: u32,
    /// Last Liu fit.
    pub liu_result: Option<Result<LiuAnalysis, String>>,
    /// Last rate fit.
    pub rate_result: Option<Result<RateAnalysis, String>>,
}

impl Default for MaterialsPanel {
    fn default() -> Self {
        Self {
            liu_input: String::new(),
            rate_input: String::new(),
            rate_shots: 50,
            liu_result: None,
            rate_result: None,
        }
    }
}

impl MaterialsPanel {
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("Material Characterisation");
        ui.separator();

        ui.label("Liu plot: crater diameter vs pulse energy (one pair per line)");
        ui.add(
            egui::TextEdit::multiline(&mut self.liu_input)
                .hint_text("2.0  9.5\n4.0  14.1\n8.0  17.9")
                .desired_rows(5)
                .font(egui::TextStyle::Monospace),
        );
        if ui.button("Fit Liu Plot").clicked() {
            self.liu_result = Some(match parse_pairs(&self.liu_input) {
                Ok(samples) => {
                    liu::analyze_liu_plot(&samples).map_err(|e| e.to_string())
                }
                Err(e) => Err(e),
            });
        }
        if let Some(result) = &self.liu_result {
            match result {
                Ok(fit) => {
                    egui::Grid::new("liu_grid").min_col_width(180.0).show(ui, |ui| {
                        ui.label("Beam waist w₀:");
                        ui.strong(format!("{:.3} µm ({:.3} µm diameter)", fit.waist_um, fit.beam_diameter_um));
                        ui.end_row();
                        ui.label("Threshold energy:");
                        ui.strong(format!("{:.4} µJ", fit.threshold_energy_uj));
                        ui.end_row();
                        ui.label("Ablation threshold:");
                        ui.strong(format!("{:.4} J/cm²", fit.ablation_threshold_j_cm2));
                        ui.end_row();
                        ui.label("Fit R²:");
                        ui.strong(format!("{:.4}", fit.r_squared));
                        ui.end_row();
                    });
                }
                Err(e) => {
                    ui.colored_label(egui::Color32::RED, format!("Fit failed: {}", e));
                }
            }
        }

        ui.add_space(16.0);
        ui.separator();

        ui.label("Ablation rate: total depth vs fluence (one pair per line)");
        ui.add(
            egui::TextEdit::multiline(&mut self.rate_input)
                .hint_text("0.5  15.3\n1.0  25.8\n2.0  36.1")
                .desired_rows(5)
                .font(egui::TextStyle::Monospace),
        );
        let mut shots = self.rate_shots as f64;
        ui.add(egui::Slider::new(&mut shots, 1.0..=1000.0).text("Shots per measurement"));
        self.rate_shots = shots as u32;

        if ui.button("Fit Ablation Rate").clicked() {
            self.rate_result = Some(match parse_pairs(&self.rate_input) {
                Ok(samples) => rate::analyze_ablation_rate(&samples, self.rate_shots)
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e),
            });
        }
        if let Some(result) = &self.rate_result {
            match result {
                Ok(fit) => {
                    egui::Grid::new("rate_grid").min_col_width(180.0).show(ui, |ui| {
                        ui.label("Penetration depth α⁻¹:");
                        ui.strong(format!("{:.4} µm", fit.penetration_depth_um));
                        ui.end_row();
                        ui.label("Ablation threshold:");
                        ui.strong(format!("{:.4} J/cm²", fit.ablation_threshold_j_cm2));
                        ui.end_row();
                        ui.label("Fit R²:");
                        ui.strong(format!("{:.4}", fit.r_squared));
                        ui.end_row();
                    });
                }
                Err(e) => {
                    ui.colored_label(egui::Color32::RED, format!("Fit failed: {}", e));
                }
            }
        }

        ui.add_space(16.0);
        ui.separator();

        ui.label("Thermal diffusivity reference values:");
        egui::Grid::new("preset_grid")
            .striped(true)
            .min_col_width(160.0)
            .show(ui, |ui| {
                ui.strong("Material");
                ui.strong("D (cm²/s)");
                ui.end_row();
                for preset in THERMAL_PRESETS {
                    ui.label(preset.name);
                    ui.label(format!("{:.4}", preset.diffusivity_cm2_s));
                    ui.end_row();
                }
            });
    }
}

/// Parse whitespace- or comma-separated number pairs, one per line.
fn parse_pairs(input: &str) -> Result<Vec<(f64, f64)>, String> {
    let mut pairs = Vec::new();
    for (line_no, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();
        if fields.len() != 2 {
            return Err(format!("line {}: expected two values", line_no + 1));
        }
        let x: f64 = fields[0]
            .parse()
            .map_err(|_| format!("line {}: bad number {:?}", line_no + 1, fields[0]))?;
        let y: f64 = fields[1]
            .parse()
            .map_err(|_| format!("line {}: bad number {:?}", line_no + 1, fields[1]))?;
        pairs.push((x, y));
    }
    Ok(pairs)
}
