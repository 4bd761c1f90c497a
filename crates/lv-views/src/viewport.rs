//! Viewport - manages the dockable chart views

use std::collections::HashMap;

use egui::Ui;
use egui_dock::{DockArea, DockState, NodeIndex, TabViewer};
use lv_core::{ActionQueue, Coordinator, UpdateScope, ViewInputs, ViewKind};
use tracing::debug;

use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Share of the height the Lexis chart gets
const LEXIS_FRACTION: f32 = 0.55;
/// Share of the lower row the bar chart gets
const BAR_FRACTION: f32 = 0.45;

/// The main viewport that manages dockable space views
pub struct Viewport {
    dock_state: DockState<SpaceViewId>,
    space_views: HashMap<SpaceViewId, Box<dyn SpaceView>>,
}

impl Viewport {
    /// Lay the views out with the Lexis chart on top and the others side by side below
    pub fn new(views: Vec<Box<dyn SpaceView>>) -> Self {
        let space_views: HashMap<_, _> = views.into_iter().map(|v| (v.id(), v)).collect();
        let dock_state = dashboard_layout(&space_views);
        Self {
            dock_state,
            space_views,
        }
    }

    /// Rebuild the dock tree; view state is untouched
    pub fn reset_layout(&mut self) {
        debug!("Resetting viewport layout");
        self.dock_state = dashboard_layout(&self.space_views);
    }

    /// Hand `inputs` to every view whose kind is in `scope`, returning how many were updated
    pub fn broadcast(&mut self, inputs: &ViewInputs, scope: UpdateScope) -> usize {
        let mut updated = 0;
        for view in self.space_views.values_mut() {
            if scope.includes(view.kind()) {
                view.set_data(inputs);
                updated += 1;
            }
        }
        if updated > 0 {
            debug!("Updated {updated} views at revision {}", inputs.revision);
        }
        updated
    }

    /// Apply the interactions queued during the frame, then update the views they affect
    pub fn flush_interactions(&mut self, coordinator: &mut Coordinator, queue: &ActionQueue) -> UpdateScope {
        let actions = queue.drain();
        if actions.is_empty() {
            return UpdateScope::None;
        }
        let scope = coordinator.apply_all(actions);
        self.broadcast(coordinator.inputs(), scope);
        scope
    }

    pub fn view(&self, kind: ViewKind) -> Option<&dyn SpaceView> {
        self.space_views
            .values()
            .find(|v| v.kind() == kind)
            .map(|v| v.as_ref())
    }

    /// Typed access to the view of `kind`
    pub fn view_as<T: 'static>(&self, kind: ViewKind) -> Option<&T> {
        self.view(kind).and_then(|v| v.as_any().downcast_ref::<T>())
    }

    /// Number of tabs currently docked
    pub fn tab_count(&self) -> usize {
        self.dock_state.main_surface().num_tabs()
    }

    /// Draw the viewport
    pub fn ui(&mut self, ui: &mut Ui, viewer_context: &ViewerContext) {
        DockArea::new(&mut self.dock_state)
            .show_close_buttons(false)
            .draggable_tabs(true)
            .show_tab_name_on_hover(true)
            .show_inside(
                ui,
                &mut ViewportTabViewer {
                    space_views: &mut self.space_views,
                    viewer_context,
                },
            );
    }
}

/// Tab viewer for egui_dock
struct ViewportTabViewer<'a> {
    space_views: &'a mut HashMap<SpaceViewId, Box<dyn SpaceView>>,
    viewer_context: &'a ViewerContext,
}

impl<'a> TabViewer for ViewportTabViewer<'a> {
    type Tab = SpaceViewId;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        if let Some(view) = self.space_views.get(tab) {
            view.display_name().into()
        } else {
            "Unknown".into()
        }
    }

    fn id(&mut self, tab: &mut Self::Tab) -> egui::Id {
        match self.space_views.get(tab) {
            Some(view) => egui::Id::new(view.kind().target_id()),
            None => egui::Id::new(*tab),
        }
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        if let Some(view) = self.space_views.get_mut(tab) {
            view.ui(self.viewer_context, ui);
        }
    }
}

fn dashboard_layout(space_views: &HashMap<SpaceViewId, Box<dyn SpaceView>>) -> DockState<SpaceViewId> {
    let id_of = |kind: ViewKind| {
        space_views
            .values()
            .find(|v| v.kind() == kind)
            .map(|v| v.id())
    };

    let (Some(lexis), Some(bar), Some(scatter)) =
        (id_of(ViewKind::Lexis), id_of(ViewKind::Bar), id_of(ViewKind::Scatter))
    else {
        // Incomplete set: dock whatever exists as tabs of one node
        let ids: Vec<SpaceViewId> = ViewKind::ALL.iter().filter_map(|&k| id_of(k)).collect();
        return DockState::new(ids);
    };

    let mut dock_state = DockState::new(vec![lexis]);
    let surface = dock_state.main_surface_mut();
    let [_, lower] = surface.split_below(NodeIndex::root(), LEXIS_FRACTION, vec![bar]);
    surface.split_right(lower, BAR_FRACTION, vec![scatter]);
    dock_state
}
