//! Space view abstraction - base trait for all dockable views

use egui::Ui;
use lv_core::{ViewInputs, ViewKind};
use uuid::Uuid;

use crate::{ChartConfig, ViewerContext};

/// Unique identifier for a space view
pub type SpaceViewId = Uuid;

/// Base trait for the linked charts
pub trait SpaceView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> SpaceViewId;

    /// Get the display name
    fn display_name(&self) -> &str;

    /// Which derived subset this view renders
    fn kind(&self) -> ViewKind;

    fn config(&self) -> &ChartConfig;

    /// Replace the view's inputs and rebuild its render model
    fn set_data(&mut self, inputs: &ViewInputs);

    /// Rebuild the render model from the inputs last given to `set_data`
    fn recompute(&mut self);

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);

    /// Get as any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;
}
