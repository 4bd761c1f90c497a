use egui::{Context, TopBottomPanel};

use crate::theme::{error_color, warning_color};

/// A menu command the app must carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    /// Load the dataset again and start over from the default filters
    ReloadDataset,
    Quit,
    ResetLayout,
    ClearSelection,
}

/// Render the main menu bar
pub fn menu_bar(ctx: &Context, dashboard_ready: bool) -> Option<ShellAction> {
    let mut action = None;

    TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                if ui.button("Reload dataset").clicked() {
                    action = Some(ShellAction::ReloadDataset);
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Quit").clicked() {
                    action = Some(ShellAction::Quit);
                    ui.close_menu();
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                ui.add_enabled_ui(dashboard_ready, |ui| {
                    if ui.button("Reset layout").clicked() {
                        action = Some(ShellAction::ResetLayout);
                        ui.close_menu();
                    }

                    if ui.button("Clear selection").clicked() {
                        action = Some(ShellAction::ClearSelection);
                        ui.close_menu();
                    }
                });
            });
        });
    });

    action
}

/// What the status bar reports about the dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLine {
    pub dataset_name: String,
    pub record_count: usize,
    pub skipped_rows: usize,
    pub group: String,
    pub gender_filter: Vec<String>,
    pub selected_count: usize,
    /// Most recent coordinator event, already formatted
    pub last_event: Option<String>,
}

impl StatusLine {
    /// Left-to-right status bar entries
    pub fn segments(&self) -> Vec<String> {
        let mut segments = vec![format!("{}: {} leaders", self.dataset_name, self.record_count)];
        if self.skipped_rows > 0 {
            segments.push(format!("{} rows skipped", self.skipped_rows));
        }
        segments.push(format!("Group: {}", crate::display_group_name(&self.group)));
        if self.gender_filter.is_empty() {
            segments.push("Gender: all".to_string());
        } else {
            segments.push(format!("Gender: {}", self.gender_filter.join(", ")));
        }
        segments.push(format!("{} selected", self.selected_count));
        segments
    }
}

/// Render the status bar along the bottom edge
pub fn status_bar(ctx: &Context, status: &StatusLine) {
    TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let segments = status.segments();
            for (idx, segment) in segments.iter().enumerate() {
                if idx > 0 {
                    ui.separator();
                }
                if idx == 1 && status.skipped_rows > 0 {
                    ui.label(egui::RichText::new(segment).color(warning_color()));
                } else {
                    ui.label(segment);
                }
            }

            if let Some(event) = &status.last_event {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(event).weak());
                });
            }
        });
    });
}

/// Shown while the startup load runs
pub fn loading_screen(ui: &mut egui::Ui, source: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(100.0);
        ui.heading("Leader Tenure Dashboard");
        ui.add_space(20.0);
        ui.spinner();
        ui.label(format!("Loading {source}..."));
    });
}

/// Fatal startup error; returns true when the user asks to retry
pub fn error_screen(ui: &mut egui::Ui, title: &str, message: &str) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        egui::Frame::none()
            .fill(error_color().linear_multiply(0.1))
            .stroke(egui::Stroke::new(1.0, error_color()))
            .rounding(4.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.label(egui::RichText::new(title).heading().color(error_color()));
                ui.add_space(8.0);
                ui.label(message);
                ui.add_space(12.0);
                retry = ui.button("Retry").clicked();
            });
    });
    retry
}
