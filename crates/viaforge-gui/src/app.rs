//! Main application state and egui integration.

use eframe::egui;

use crate::panels;

/// The main ViaForge application.
pub struct ViaForgeApp {
    /// Which panel is currently selected in the sidebar.
    active_panel: Panel,
    /// State for the forward simulator panel.
    pub simulator_state: panels::simulator::SimulatorPanel,
    /// State for the recipe solver panel.
    pub recipe_state: panels::recipe::RecipePanel,
    /// State for the dose and thermal panel.
    pub dose_state: panels::dose::DosePanel,
    /// State for the spot-size sweep panel.
    pub sweep_state: panels::sweep::SweepPanel,
    /// State for the material characterisation panel.
    pub materials_state: panels::materials::MaterialsPanel,
}

/// Sidebar navigation panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Simulator,
    Recipe,
    Dose,
    Sweep,
    Materials,
}

impl Default for ViaForgeApp {
    fn default() -> Self {
        Self {
            active_panel: Panel::Simulator,
            simulator_state: panels::simulator::SimulatorPanel::default(),
            recipe_state: panels::recipe::RecipePanel::default(),
            dose_state: panels::dose::DosePanel::default(),
            sweep_state: panels::sweep::SweepPanel::default(),
            materials_state: panels::materials::MaterialsPanel::default(),
        }
    }
}

impl eframe::App for ViaForgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Recipe → simulator handoff: the recipe panel raises a flag, the
        // app owns moving the settings across.
        if self.recipe_state.send_requested {
            self.recipe_state.send_requested = false;
            if let Some(recipe) = &self.recipe_state.result {
                if recipe.viable {
                    self.simulator_state.beam_diameter_um = self.recipe_state.beam_diameter_um;
                    self.simulator_state.profile = viaforge_core::types::BeamProfile::Gaussian;
                    self.simulator_state.material = self.recipe_state.material;
                    self.simulator_state.pulse_energy_uj = recipe.pulse_energy_uj;
                    self.simulator_state.number_of_shots = recipe.number_of_shots;
                    self.active_panel = Panel::Simulator;
                }
            }
        }

        // Sidebar navigation
        egui::SidePanel::left("nav_panel")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                ui.heading("ViaForge");
                ui.separator();

                ui.selectable_value(&mut self.active_panel, Panel::Simulator, "Simulator");
                ui.selectable_value(&mut self.active_panel, Panel::Recipe, "Recipe");
                ui.selectable_value(&mut self.active_panel, Panel::Dose, "Dose & Thermal");
                ui.selectable_value(&mut self.active_panel, Panel::Sweep, "Spot Sweep");
                ui.selectable_value(&mut self.active_panel, Panel::Materials, "Materials");
            });

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| match self.active_panel {
            Panel::Simulator => self.simulator_state.ui(ui),
            Panel::Recipe => self.recipe_state.ui(ui),
            Panel::Dose => self.dose_state.ui(ui),
            Panel::Sweep => self.sweep_state.ui(ui),
            Panel::Materials => self.materials_state.ui(ui),
        });
    }
}
