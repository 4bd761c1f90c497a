//! The interface views call back into when the user interacts with them

use std::sync::Arc;

use parking_lot::Mutex;

use crate::record::LeaderKey;

/// A request to change the country group or gender filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    SelectGroup(String),
    ToggleGender(String),
}

/// A request to change the shared leader selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Toggle(LeaderKey),
    Clear,
}

/// Any state transition a view or control can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    Filter(FilterChange),
    Selection(SelectionChange),
}

impl From<FilterChange> for DashboardAction {
    fn from(change: FilterChange) -> Self {
        DashboardAction::Filter(change)
    }
}

impl From<SelectionChange> for DashboardAction {
    fn from(change: SelectionChange) -> Self {
        DashboardAction::Selection(change)
    }
}

/// Receiver of view interactions
pub trait InteractionSink {
    fn on_filter_changed(&self, change: FilterChange);

    fn on_selection_changed(&self, change: SelectionChange);
}

/// Interaction sink that defers every request until the frame is done drawing.
///
/// Cloning shares the same queue.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    pending: Arc<Mutex<Vec<DashboardAction>>>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, action: impl Into<DashboardAction>) {
        self.pending.lock().push(action.into());
    }

    /// Take all queued actions in the order they were requested
    pub fn drain(&self) -> Vec<DashboardAction> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl InteractionSink for ActionQueue {
    fn on_filter_changed(&self, change: FilterChange) {
        tracing::debug!("Queued filter change: {:?}", change);
        self.push(change);
    }

    fn on_selection_changed(&self, change: SelectionChange) {
        tracing::debug!("Queued selection change: {:?}", change);
        self.push(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order_and_drains() {
        let queue = ActionQueue::new();
        let handle = queue.clone();

        handle.on_filter_changed(FilterChange::ToggleGender("F".into()));
        handle.on_selection_changed(SelectionChange::Toggle("a".into()));

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                DashboardAction::Filter(FilterChange::ToggleGender("F".into())),
                DashboardAction::Selection(SelectionChange::Toggle("a".into())),
            ]
        );
        assert!(queue.is_empty());
    }
}
