//! Control Panel Widget
//! Top panel with the title block, axis order, actions and status line.

use crate::config::CategoryOrder;
use egui::{Color32, RichText};

pub const TITLE: &str = "Doping in Professional Bicycle Racing";
pub const SUBTITLE: &str = "35 Fastest times up Alpe d'Huez";

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const OK_COLOR: Color32 = Color32::from_rgb(40, 167, 69);

/// Title block and chart controls above the chart viewer.
pub struct ControlPanel {
    pub category_order: CategoryOrder,
    pub status: String,
    pub failed: bool,
    /// Last dataset fetch failed; offers a retry
    pub fetch_failed: bool,
    pub loading: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            category_order: CategoryOrder::default(),
            status: "Ready".to_string(),
            failed: false,
            fetch_failed: false,
            loading: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a normal status message
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.failed = false;
    }

    /// Set an error status message
    pub fn set_error(&mut self, status: &str) {
        self.status = format!("Error: {}", status);
        self.failed = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(RichText::new(TITLE).size(22.0).strong());
            ui.label(RichText::new(SUBTITLE).size(14.0).color(Color32::GRAY));
        });
        ui.add_space(5.0);
        ui.separator();

        ui.horizontal(|ui| {
            ui.label(RichText::new("⏱ Time axis:").strong());
            let before = self.category_order;
            ui.radio_value(
                &mut self.category_order,
                CategoryOrder::Ascending,
                "Sorted by time",
            );
            ui.radio_value(
                &mut self.category_order,
                CategoryOrder::FirstOccurrence,
                "Dataset order",
            );
            if self.category_order != before {
                action = ControlPanelAction::CategoryOrderChanged;
            }

            ui.separator();

            ui.add_enabled_ui(self.export_enabled, |ui| {
                if ui.button("💾 Export SVG").clicked() {
                    action = ControlPanelAction::ExportSvg;
                }
            });

            if self.fetch_failed && !self.loading && ui.button("🔄 Retry").clicked() {
                action = ControlPanelAction::Retry;
            }

            if self.loading {
                ui.spinner();
            }

            let status_color = if self.failed {
                ERROR_COLOR
            } else if self.export_enabled {
                OK_COLOR
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });
        ui.add_space(5.0);

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    CategoryOrderChanged,
    ExportSvg,
    Retry,
}
