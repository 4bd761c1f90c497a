//! The three linked chart views

pub mod bar;
pub mod lexis;
pub mod scatter;

// Utilities
pub mod utils;

// Re-exports
pub use bar::{BarChartView, BarModel, GenderBar};
pub use lexis::{LexisModel, LexisSegment, LexisView};
pub use scatter::{ScatterModel, ScatterPoint, ScatterView};

use egui::Ui;

use crate::SpaceViewId;

/// Tooltip next to the pointer, one line per entry with the first in bold
pub(crate) fn show_tooltip(ui: &Ui, view: SpaceViewId, padding: f32, lines: &[String]) {
    egui::show_tooltip_at_pointer(ui.ctx(), egui::Id::new((view, "tooltip")), |ui| {
        egui::Frame::none()
            .inner_margin(egui::Margin::same(padding))
            .show(ui, |ui| {
                for (idx, line) in lines.iter().enumerate() {
                    if idx == 0 {
                        ui.strong(line);
                    } else {
                        ui.label(line);
                    }
                }
            });
    });
}

/// Note drawn at `center` of a plot that has no marks; axes stay visible underneath
pub(crate) fn empty_overlay(plot_ui: &mut egui_plot::PlotUi, center: [f64; 2], message: &str) {
    plot_ui.text(
        egui_plot::Text::new(
            egui_plot::PlotPoint::new(center[0], center[1]),
            egui::RichText::new(message).weak(),
        )
        .anchor(egui::Align2::CENTER_CENTER),
    );
}
