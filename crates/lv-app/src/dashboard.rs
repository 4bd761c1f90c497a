//! The loaded dashboard: coordinator, docked views and the status they report

use std::sync::Arc;

use egui::Ui;
use lv_core::events::events::{
    DatasetLoaded, GenderFilterChanged, GroupChanged, SelectionChanged,
};
use lv_core::{
    ActionQueue, Coordinator, Dataset, EventBus, InteractionSink, SelectionChange, UpdateScope,
};
use lv_ui::StatusLine;
use lv_views::{dashboard_views, ChartConfigError, Viewport, ViewerContext};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::settings::DashboardSettings;

pub struct Dashboard {
    coordinator: Coordinator,
    viewport: Viewport,
    viewer_context: ViewerContext,
    source_name: String,
    last_event: Arc<RwLock<Option<String>>>,
}

impl Dashboard {
    /// Build the coordinator and the three views for a freshly loaded dataset
    pub fn new(dataset: Dataset, source_name: String, settings: &DashboardSettings) -> Result<Self, ChartConfigError> {
        let views = dashboard_views(&settings.charts)?;

        let event_bus = Arc::new(EventBus::new());
        let last_event = Arc::new(RwLock::new(None));
        subscribe_status(&event_bus, &last_event);

        event_bus.publish(DatasetLoaded {
            source_name: source_name.clone(),
            record_count: dataset.len(),
            skipped_rows: dataset.skipped_rows(),
        });

        let coordinator = Coordinator::new(Arc::new(dataset), settings.policy.clone(), event_bus);
        let mut viewport = Viewport::new(views);
        viewport.broadcast(coordinator.inputs(), UpdateScope::All);

        Ok(Self {
            coordinator,
            viewport,
            viewer_context: ViewerContext::default(),
            source_name,
            last_event,
        })
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interactions(&self) -> &ActionQueue {
        &self.viewer_context.interactions
    }

    pub fn reset_layout(&mut self) {
        self.viewport.reset_layout();
    }

    /// Queue a selection clear, applied with the rest of the frame's interactions
    pub fn clear_selection(&self) {
        self.interactions().on_selection_changed(SelectionChange::Clear);
    }

    /// Apply everything queued during the frame; call once all views have drawn
    pub fn end_frame(&mut self) -> UpdateScope {
        let scope = self
            .viewport
            .flush_interactions(&mut self.coordinator, &self.viewer_context.interactions);
        if scope != UpdateScope::None {
            debug!("Frame ended with {:?} update", scope);
        }
        scope
    }

    pub fn status(&self) -> StatusLine {
        let state = self.coordinator.state();
        let dataset = self.coordinator.dataset();
        StatusLine {
            dataset_name: self.source_name.clone(),
            record_count: dataset.len(),
            skipped_rows: dataset.skipped_rows(),
            group: state.selected_group().to_string(),
            gender_filter: state.gender_filter().iter().cloned().collect(),
            selected_count: state.selected_leaders().len(),
            last_event: self.last_event.read().clone(),
        }
    }

    /// Controls above the charts
    pub fn controls_ui(&self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            lv_ui::group_selector(
                ui,
                self.coordinator.dataset().group_columns(),
                self.coordinator.state().selected_group(),
                self.interactions(),
            );
        });
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        self.viewport.ui(ui, &self.viewer_context);
    }
}

/// Log coordinator events and keep the latest one for the status bar
fn subscribe_status(event_bus: &EventBus, last_event: &Arc<RwLock<Option<String>>>) {
    let slot = Arc::clone(last_event);
    event_bus.subscribe_fn::<DatasetLoaded, _>(move |event| {
        info!(
            "Loaded {} leaders from {} ({} rows skipped)",
            event.record_count, event.source_name, event.skipped_rows
        );
        *slot.write() = Some(format!("Loaded {}", event.source_name));
    });

    let slot = Arc::clone(last_event);
    event_bus.subscribe_fn::<GroupChanged, _>(move |event| {
        info!("Group changed to '{}' ({} leaders)", event.group, event.base_count);
        *slot.write() = Some(format!(
            "Group: {} ({} leaders)",
            lv_ui::display_group_name(&event.group),
            event.base_count
        ));
    });

    let slot = Arc::clone(last_event);
    event_bus.subscribe_fn::<GenderFilterChanged, _>(move |event| {
        info!("Gender filter {:?} ({} leaders)", event.genders, event.filtered_count);
        let genders = if event.genders.is_empty() {
            "all".to_string()
        } else {
            event.genders.join(", ")
        };
        *slot.write() = Some(format!("Gender: {genders} ({} leaders)", event.filtered_count));
    });

    let slot = Arc::clone(last_event);
    event_bus.subscribe_fn::<SelectionChanged, _>(move |event| {
        debug!("Selection now {:?}", event.selected);
        *slot.write() = Some(format!("{} leaders selected", event.selected.len()));
    });
}
