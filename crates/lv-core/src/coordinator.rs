//! Coordinator: owns the filter state and keeps the linked views consistent

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::derive::{derive_base_subset, derive_gender_subset, Subset, ViewInputs, ViewKind};
use crate::events::events::{GenderFilterChanged, GroupChanged, SelectionChanged};
use crate::events::EventBus;
use crate::filter::{FilterPolicy, FilterState};
use crate::interaction::{DashboardAction, FilterChange, SelectionChange};
use crate::record::Dataset;

/// Which views must recompute after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum UpdateScope {
    #[default]
    None,
    /// Lexis and scatter, the views sharing the leader selection
    Selection,
    /// All three views
    All,
}

impl UpdateScope {
    pub fn merge(self, other: UpdateScope) -> UpdateScope {
        self.max(other)
    }

    pub fn includes(self, kind: ViewKind) -> bool {
        match self {
            UpdateScope::None => false,
            UpdateScope::Selection => matches!(kind, ViewKind::Lexis | ViewKind::Scatter),
            UpdateScope::All => true,
        }
    }
}

/// Owns the dataset and filter state, derives each view's inputs
pub struct Coordinator {
    dataset: Arc<Dataset>,
    state: FilterState,
    policy: FilterPolicy,
    base: Subset,
    filtered: Subset,
    inputs: ViewInputs,
    revision: u64,
    event_bus: Arc<EventBus>,
}

impl Coordinator {
    pub fn new(dataset: Arc<Dataset>, policy: FilterPolicy, event_bus: Arc<EventBus>) -> Self {
        if !dataset.has_group(&policy.default_group) {
            warn!(
                "Default group '{}' is not a column of the dataset (groups: {:?})",
                policy.default_group,
                dataset.group_columns()
            );
        }

        let state = FilterState::new(policy.default_group.clone());
        let base = derive_base_subset(dataset.records(), state.selected_group());
        let filtered = derive_gender_subset(&base, state.gender_filter());

        let mut coordinator = Self {
            dataset,
            state,
            policy,
            base,
            filtered,
            inputs: ViewInputs::empty(),
            revision: 0,
            event_bus,
        };
        coordinator.refresh_inputs();

        info!(
            "Coordinator ready: group '{}', {} of {} records in base subset",
            coordinator.state.selected_group(),
            coordinator.base.len(),
            coordinator.dataset.len()
        );
        coordinator
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot handed to every view's `set_data`
    pub fn inputs(&self) -> &ViewInputs {
        &self.inputs
    }

    /// Apply one action and report which views must recompute
    pub fn apply(&mut self, action: DashboardAction) -> UpdateScope {
        let scope = match action {
            DashboardAction::Filter(change) => self.apply_filter(change),
            DashboardAction::Selection(change) => self.apply_selection(change),
        };

        if scope != UpdateScope::None {
            self.refresh_inputs();
            debug!("State revision {} ({:?})", self.revision, scope);
        }
        scope
    }

    /// Apply actions in order, returning the widest resulting scope
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = DashboardAction>) -> UpdateScope {
        actions
            .into_iter()
            .fold(UpdateScope::None, |scope, action| scope.merge(self.apply(action)))
    }

    fn apply_filter(&mut self, change: FilterChange) -> UpdateScope {
        match change {
            FilterChange::SelectGroup(group) => {
                if !self.dataset.has_group(&group) {
                    warn!("Ignoring unknown country group '{}'", group);
                    return UpdateScope::None;
                }
                let had_selection = !self.state.selected_leaders().is_empty();
                if !self.state.set_group(&group, self.policy.on_group_change) {
                    return UpdateScope::None;
                }
                self.rederive();
                info!("Country group changed to '{}' ({} records)", group, self.base.len());
                self.event_bus.publish(GroupChanged {
                    group,
                    base_count: self.base.len(),
                });
                if had_selection && self.state.selected_leaders().is_empty() {
                    self.publish_selection();
                }
                UpdateScope::All
            }
            FilterChange::ToggleGender(gender) => {
                self.state.toggle_gender(&gender, self.policy.gender_mode);
                self.filtered = derive_gender_subset(&self.base, self.state.gender_filter());
                info!(
                    "Gender filter now {:?} ({} records)",
                    self.state.gender_filter(),
                    self.filtered.len()
                );
                self.event_bus.publish(GenderFilterChanged {
                    genders: self.state.gender_filter().iter().cloned().collect(),
                    filtered_count: self.filtered.len(),
                });
                UpdateScope::All
            }
        }
    }

    fn apply_selection(&mut self, change: SelectionChange) -> UpdateScope {
        match change {
            SelectionChange::Toggle(leader) => {
                if !self.dataset.contains(&leader) {
                    warn!("Ignoring selection of unknown leader '{}'", leader);
                    return UpdateScope::None;
                }
                let selected = self.state.toggle_leader(&leader);
                debug!("Leader '{}' {}", leader, if selected { "selected" } else { "deselected" });
            }
            SelectionChange::Clear => {
                if !self.state.clear_selection() {
                    return UpdateScope::None;
                }
                debug!("Selection cleared");
            }
        }
        self.publish_selection();
        UpdateScope::Selection
    }

    fn publish_selection(&self) {
        self.event_bus.publish(SelectionChanged {
            selected: self.state.selected_leaders().iter().cloned().collect(),
        });
    }

    fn rederive(&mut self) {
        self.base = derive_base_subset(self.dataset.records(), self.state.selected_group());
        self.filtered = derive_gender_subset(&self.base, self.state.gender_filter());
    }

    fn refresh_inputs(&mut self) {
        self.revision += 1;
        self.inputs = ViewInputs {
            base: self.base.clone(),
            filtered: self.filtered.clone(),
            gender_filter: Arc::new(self.state.gender_filter().clone()),
            selected_leaders: Arc::new(self.state.selected_leaders().clone()),
            revision: self.revision,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::GroupChangePolicy;
    use crate::record::test_support::leader;
    use parking_lot::Mutex;

    fn dataset() -> Arc<Dataset> {
        let records = vec![
            leader("A", "F", 0, 5.0, None, &[("oecd", true), ("eu27", false)]),
            leader("B", "M", 0, 3.0, Some(20000.0), &[("oecd", true), ("eu27", true)]),
            leader("C", "M", 1, 0.0, Some(9000.0), &[("oecd", true), ("eu27", true)]),
        ];
        Arc::new(Dataset::new(records, vec!["oecd".into(), "eu27".into()]).unwrap())
    }

    fn coordinator(policy: FilterPolicy) -> Coordinator {
        Coordinator::new(dataset(), policy, Arc::new(EventBus::new()))
    }

    fn names(subset: &Subset) -> Vec<&str> {
        subset.iter().map(|r| r.leader.as_str()).collect()
    }

    fn toggle_gender(g: &str) -> DashboardAction {
        FilterChange::ToggleGender(g.into()).into()
    }

    fn toggle_leader(l: &str) -> DashboardAction {
        SelectionChange::Toggle(l.into()).into()
    }

    #[test]
    fn test_initial_inputs_use_default_group() {
        let coordinator = coordinator(FilterPolicy::default());
        let inputs = coordinator.inputs();
        assert_eq!(names(&inputs.base), vec!["A", "B"]);
        assert!(Arc::ptr_eq(&inputs.base, &inputs.filtered));
        assert_eq!(inputs.revision, 1);
    }

    #[test]
    fn test_gender_toggle_recomputes_everything() {
        let mut coordinator = coordinator(FilterPolicy::default());
        assert_eq!(coordinator.apply(toggle_gender("F")), UpdateScope::All);

        let inputs = coordinator.inputs();
        assert_eq!(names(&inputs.filtered), vec!["A"]);
        assert_eq!(names(&inputs.base), vec!["A", "B"]);
        assert_eq!(names(inputs.subset_for(ViewKind::Bar)), vec!["A", "B"]);
        assert_eq!(names(inputs.subset_for(ViewKind::Lexis)), vec!["A"]);

        coordinator.apply(toggle_gender("F"));
        assert!(coordinator.state().gender_filter().is_empty());
        assert!(Arc::ptr_eq(&coordinator.inputs().base, &coordinator.inputs().filtered));
    }

    #[test]
    fn test_selection_shared_across_linked_views() {
        let mut coordinator = coordinator(FilterPolicy::default());
        assert_eq!(coordinator.apply(toggle_leader("B")), UpdateScope::Selection);
        assert!(coordinator.inputs().is_selected("B"));

        assert_eq!(coordinator.apply(toggle_leader("B")), UpdateScope::Selection);
        assert!(coordinator.inputs().selected_leaders.is_empty());
    }

    #[test]
    fn test_no_op_actions_do_not_bump_revision() {
        let mut coordinator = coordinator(FilterPolicy::default());
        let revision = coordinator.revision();

        assert_eq!(coordinator.apply(SelectionChange::Clear.into()), UpdateScope::None);
        assert_eq!(coordinator.apply(FilterChange::SelectGroup("oecd".into()).into()), UpdateScope::None);
        assert_eq!(coordinator.apply(FilterChange::SelectGroup("nato".into()).into()), UpdateScope::None);
        assert_eq!(coordinator.apply(toggle_leader("nobody")), UpdateScope::None);
        assert_eq!(coordinator.revision(), revision);
    }

    #[test]
    fn test_group_change_keeps_selection_and_filter() {
        let mut coordinator = coordinator(FilterPolicy::default());
        coordinator.apply(toggle_leader("A"));
        coordinator.apply(toggle_gender("M"));

        let scope = coordinator.apply(FilterChange::SelectGroup("eu27".into()).into());
        assert_eq!(scope, UpdateScope::All);
        assert_eq!(names(&coordinator.inputs().base), vec!["B"]);
        assert!(coordinator.inputs().is_selected("A"));
        assert!(coordinator.inputs().gender_active("M"));
    }

    #[test]
    fn test_group_change_reset_policy() {
        let bus = Arc::new(EventBus::new());
        let selections = Arc::new(Mutex::new(Vec::new()));
        let seen = selections.clone();
        bus.subscribe_fn(move |e: &SelectionChanged| seen.lock().push(e.selected.len()));

        let policy = FilterPolicy {
            on_group_change: GroupChangePolicy::Reset,
            ..FilterPolicy::default()
        };
        let mut coordinator = Coordinator::new(dataset(), policy, bus);
        coordinator.apply(toggle_leader("A"));
        coordinator.apply(toggle_gender("M"));
        coordinator.apply(FilterChange::SelectGroup("eu27".into()).into());

        assert!(coordinator.inputs().selected_leaders.is_empty());
        assert!(!coordinator.inputs().has_gender_filter());
        assert_eq!(*selections.lock(), vec![1, 0]);
    }

    #[test]
    fn test_apply_all_merges_scopes() {
        let mut coordinator = coordinator(FilterPolicy::default());
        let scope = coordinator.apply_all(vec![toggle_leader("A"), toggle_gender("F")]);
        assert_eq!(scope, UpdateScope::All);

        let scope = coordinator.apply_all(vec![toggle_leader("A"), SelectionChange::Clear.into()]);
        assert_eq!(scope, UpdateScope::Selection);
    }

    #[test]
    fn test_scope_targets() {
        assert!(!UpdateScope::Selection.includes(ViewKind::Bar));
        assert!(UpdateScope::Selection.includes(ViewKind::Lexis));
        assert!(UpdateScope::Selection.includes(ViewKind::Scatter));
        assert!(UpdateScope::All.includes(ViewKind::Bar));
        assert!(!UpdateScope::None.includes(ViewKind::Lexis));
    }

    #[test]
    fn test_empty_group_derives_empty_inputs() {
        let records = vec![leader("X", "F", 0, 2.0, None, &[("oecd", false), ("g20", false)])];
        let dataset = Arc::new(Dataset::new(records, vec!["oecd".into(), "g20".into()]).unwrap());
        let coordinator = Coordinator::new(dataset, FilterPolicy::default(), Arc::new(EventBus::new()));
        assert!(coordinator.inputs().base.is_empty());
        assert!(coordinator.inputs().filtered.is_empty());
    }
}
