//! GUI panels, one module per sidebar entry.

pub mod dose;
pub mod materials;
pub mod recipe;
pub mod simulator;
pub mod sweep;

use egui::Ui;
use viaforge_core::types::{BeamProfile, MaterialProperties};

/// Shared material-property editor used by several panels.
pub fn material_inputs(ui: &mut Ui, material: &mut MaterialProperties) {
    ui.add(
        egui::Slider::new(&mut material.ablation_threshold_j_cm2, 0.01..=10.0)
            .logarithmic(true)
            .text("Ablation threshold F_th (J/cm²)"),
    );
    ui.add(
        egui::Slider::new(&mut material.penetration_depth_um, 0.01..=5.0)
            .text("Penetration depth α⁻¹ (µm)"),
    );
    ui.add(
        egui::Slider::new(&mut material.material_thickness_um, 1.0..=500.0)
            .text("Material thickness (µm)"),
    );
}

/// Shared beam-profile selector.
pub fn profile_selector(ui: &mut Ui, profile: &mut BeamProfile) {
    ui.horizontal(|ui| {
        ui.label("Beam profile:");
        ui.selectable_value(profile, BeamProfile::Gaussian, "Gaussian");
        ui.selectable_value(profile, BeamProfile::TopHat, "Top-hat");
    });
}
