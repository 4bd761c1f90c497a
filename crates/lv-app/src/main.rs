//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{self, Context};
use lv_core::{Dataset, LeaderSource};
use lv_data::{CsvLeaderSource, DatasetConfig};
use lv_ui::{ShellAction, Theme};
use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

mod dashboard;
mod settings;

use dashboard::Dashboard;
use settings::{DashboardSettings, DATA_ENV};

/// Progress of the background dataset load
enum LoadState {
    Idle,
    Loading,
    Finished(Result<Dataset, String>),
}

/// Load progress shared between the frame loop and the load task
#[derive(Clone)]
struct LoadSlot(Arc<RwLock<LoadState>>);

impl LoadSlot {
    fn new() -> Self {
        Self(Arc::new(RwLock::new(LoadState::Idle)))
    }

    /// Mark a load as started; false if one is already running
    fn begin(&self) -> bool {
        let mut state = self.0.write();
        if matches!(*state, LoadState::Loading) {
            return false;
        }
        *state = LoadState::Loading;
        true
    }

    fn finish(&self, outcome: Result<Dataset, String>) {
        *self.0.write() = LoadState::Finished(outcome);
    }

    /// The finished outcome, once; the slot goes back to idle
    fn take_finished(&self) -> Option<Result<Dataset, String>> {
        let mut state = self.0.write();
        if !matches!(*state, LoadState::Finished(_)) {
            return None;
        }
        match std::mem::replace(&mut *state, LoadState::Idle) {
            LoadState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Main application state
struct LeaderVizApp {
    settings: DashboardSettings,
    dataset_config: DatasetConfig,

    /// Shared with the load task
    load: LoadSlot,

    /// Present once the dataset is loaded
    dashboard: Option<Dashboard>,

    /// Fatal startup error shown instead of the charts
    fatal: Option<String>,

    /// Tokio runtime
    runtime: tokio::runtime::Runtime,

    /// Egui context
    egui_ctx: egui::Context,
}

impl LeaderVizApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        settings: DashboardSettings,
        dataset_config: DatasetConfig,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        lv_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let mut app = Self {
            settings,
            dataset_config,
            load: LoadSlot::new(),
            dashboard: None,
            fatal: None,
            runtime,
            egui_ctx: cc.egui_ctx.clone(),
        };
        app.start_load();
        app
    }

    /// Drop any current dashboard and load the dataset from scratch.
    ///
    /// Ignored while a load is already running.
    fn start_load(&mut self) {
        if !self.load.begin() {
            debug!("Load already in progress; ignoring reload");
            return;
        }
        self.dashboard = None;
        self.fatal = None;

        let source = CsvLeaderSource::new(self.dataset_config.clone());
        let load = self.load.clone();
        let ctx = self.egui_ctx.clone();

        self.runtime.spawn(async move {
            let outcome = match source.load_with_report().await {
                Ok((dataset, report)) => {
                    if !report.diagnostics.is_empty() {
                        warn!(
                            "{} of {} rows in {} were skipped",
                            report.diagnostics.len(),
                            report.rows_read,
                            source.source_name()
                        );
                    }
                    Ok(dataset)
                }
                Err(e) => {
                    error!("Failed to load {}: {}", source.source_name(), e);
                    Err(format!("{}: {}", source.path().display(), e))
                }
            };
            load.finish(outcome);
            ctx.request_repaint();
        });
    }

    /// Build the dashboard once the load task has finished
    fn poll_load(&mut self) {
        let Some(outcome) = self.load.take_finished() else {
            return;
        };

        match outcome {
            Ok(dataset) => {
                match Dashboard::new(dataset, self.dataset_config.file_name(), &self.settings) {
                    Ok(dashboard) => self.dashboard = Some(dashboard),
                    Err(e) => {
                        error!("Invalid chart configuration: {}", e);
                        self.fatal = Some(format!("Invalid chart configuration: {e}"));
                    }
                }
            }
            Err(message) => self.fatal = Some(message),
        }
    }

    fn handle_shell_action(&mut self, ctx: &Context, action: ShellAction) {
        info!("Menu: {:?}", action);
        match action {
            ShellAction::ReloadDataset => self.start_load(),
            ShellAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            ShellAction::ResetLayout => {
                if let Some(dashboard) = &mut self.dashboard {
                    dashboard.reset_layout();
                }
            }
            ShellAction::ClearSelection => {
                if let Some(dashboard) = &self.dashboard {
                    dashboard.clear_selection();
                }
            }
        }
    }
}

impl eframe::App for LeaderVizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        // Menu bar
        if let Some(action) = lv_ui::menu_bar(ctx, self.dashboard.is_some()) {
            self.handle_shell_action(ctx, action);
        }

        if let Some(dashboard) = &self.dashboard {
            lv_ui::status_bar(ctx, &dashboard.status());
        }

        // Main content area
        let mut retry = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(dashboard) = &mut self.dashboard {
                dashboard.controls_ui(ui);
                ui.separator();
                dashboard.ui(ui);
            } else if let Some(message) = &self.fatal {
                retry = lv_ui::error_screen(ui, "Could not load the leader list", message);
            } else {
                lv_ui::loading_screen(ui, &self.dataset_config.file_name());
            }
        });

        if retry {
            self.start_load();
        }

        // Views only queue their clicks; state changes land after everything has drawn
        if let Some(dashboard) = &mut self.dashboard {
            if dashboard.end_frame() != lv_core::UpdateScope::None {
                ctx.request_repaint();
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let settings = DashboardSettings::from_env()?;
    let data_path = settings.resolve_data_path(
        std::env::args_os().nth(1).map(PathBuf::from),
        std::env::var_os(DATA_ENV).map(PathBuf::from),
    );
    let dataset_config = settings.dataset_config(data_path);
    info!("Starting leader dashboard with {:?}", dataset_config.path);

    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: eframe::Theme::Light,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Leader Tenure Dashboard",
        options,
        Box::new(move |cc| Box::new(LeaderVizApp::new(cc, settings, dataset_config, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
