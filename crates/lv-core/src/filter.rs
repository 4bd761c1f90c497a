//! Filter and selection state shared by the linked views

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::LeaderKey;

/// Group selected when a dataset is first shown
pub const DEFAULT_GROUP: &str = "oecd";

/// How clicks on a gender bar edit the gender filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderFilterMode {
    /// Clicking the active gender clears the filter, clicking another replaces it
    #[default]
    SingleSelect,
    /// Clicking a gender flips its membership in the filter
    MultiSelect,
}

/// What happens to the gender filter and leader selection when the group changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupChangePolicy {
    /// Only the derived subsets are recomputed
    #[default]
    Keep,
    /// Gender filter and leader selection are cleared together
    Reset,
}

/// Interaction policy for a dashboard session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPolicy {
    pub default_group: String,
    pub gender_mode: GenderFilterMode,
    pub on_group_change: GroupChangePolicy,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            default_group: DEFAULT_GROUP.to_string(),
            gender_mode: GenderFilterMode::default(),
            on_group_change: GroupChangePolicy::default(),
        }
    }
}

/// Mutable filter state for one dashboard session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    selected_group: String,
    gender_filter: BTreeSet<String>,
    selected_leaders: BTreeSet<LeaderKey>,
}

impl FilterState {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            selected_group: group.into(),
            gender_filter: BTreeSet::new(),
            selected_leaders: BTreeSet::new(),
        }
    }

    pub fn selected_group(&self) -> &str {
        &self.selected_group
    }

    pub fn gender_filter(&self) -> &BTreeSet<String> {
        &self.gender_filter
    }

    pub fn selected_leaders(&self) -> &BTreeSet<LeaderKey> {
        &self.selected_leaders
    }

    /// Switch the country group. Returns `false` when `group` is already selected.
    pub fn set_group(&mut self, group: &str, policy: GroupChangePolicy) -> bool {
        if self.selected_group == group {
            return false;
        }
        self.selected_group = group.to_string();
        if policy == GroupChangePolicy::Reset {
            self.gender_filter.clear();
            self.selected_leaders.clear();
        }
        true
    }

    /// Apply a click on the bar for `gender`
    pub fn toggle_gender(&mut self, gender: &str, mode: GenderFilterMode) {
        match mode {
            GenderFilterMode::SingleSelect => {
                let was_active = self.gender_filter.contains(gender);
                self.gender_filter.clear();
                if !was_active {
                    self.gender_filter.insert(gender.to_string());
                }
            }
            GenderFilterMode::MultiSelect => {
                if !self.gender_filter.remove(gender) {
                    self.gender_filter.insert(gender.to_string());
                }
            }
        }
    }

    /// Flip `leader`'s membership in the selection. Returns whether it is now selected.
    pub fn toggle_leader(&mut self, leader: &str) -> bool {
        if self.selected_leaders.remove(leader) {
            false
        } else {
            self.selected_leaders.insert(leader.to_string());
            true
        }
    }

    /// Clear the leader selection. Returns `false` if it was already empty.
    pub fn clear_selection(&mut self) -> bool {
        if self.selected_leaders.is_empty() {
            return false;
        }
        self.selected_leaders.clear();
        true
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_select_gender_toggle_is_self_inverse() {
        let mut state = FilterState::default();
        let before = state.clone();

        state.toggle_gender("F", GenderFilterMode::SingleSelect);
        assert_eq!(state.gender_filter().iter().collect::<Vec<_>>(), vec!["F"]);

        state.toggle_gender("F", GenderFilterMode::SingleSelect);
        assert_eq!(state, before);
    }

    #[test]
    fn test_single_select_replaces_other_gender() {
        let mut state = FilterState::default();
        state.toggle_gender("F", GenderFilterMode::SingleSelect);
        state.toggle_gender("M", GenderFilterMode::SingleSelect);
        assert_eq!(state.gender_filter().iter().collect::<Vec<_>>(), vec!["M"]);
    }

    #[test]
    fn test_multi_select_accumulates() {
        let mut state = FilterState::default();
        state.toggle_gender("F", GenderFilterMode::MultiSelect);
        state.toggle_gender("M", GenderFilterMode::MultiSelect);
        assert_eq!(state.gender_filter().len(), 2);

        state.toggle_gender("F", GenderFilterMode::MultiSelect);
        assert_eq!(state.gender_filter().iter().collect::<Vec<_>>(), vec!["M"]);
    }

    #[test]
    fn test_leader_toggle_is_self_inverse() {
        let mut state = FilterState::default();
        state.toggle_leader("x");
        let before = state.clone();

        assert!(state.toggle_leader("y"));
        assert!(!state.toggle_leader("y"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_group_change_keeps_selection_by_default() {
        let mut state = FilterState::default();
        state.toggle_gender("F", GenderFilterMode::SingleSelect);
        state.toggle_leader("x");

        assert!(state.set_group("eu27", GroupChangePolicy::Keep));
        assert_eq!(state.selected_group(), "eu27");
        assert!(state.selected_leaders().contains("x"));
        assert!(state.gender_filter().contains("F"));
    }

    #[test]
    fn test_group_change_reset_clears_filter_and_selection_together() {
        let mut state = FilterState::default();
        state.toggle_gender("F", GenderFilterMode::SingleSelect);
        state.toggle_leader("x");

        assert!(state.set_group("eu27", GroupChangePolicy::Reset));
        assert!(state.selected_leaders().is_empty());
        assert!(state.gender_filter().is_empty());
    }

    #[test]
    fn test_reselecting_group_is_a_no_op() {
        let mut state = FilterState::default();
        state.toggle_leader("x");
        assert!(!state.set_group(DEFAULT_GROUP, GroupChangePolicy::Reset));
        assert!(state.selected_leaders().contains("x"));
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: FilterPolicy = serde_json::from_str(r#"{"gender_mode": "multi_select"}"#).unwrap();
        assert_eq!(policy.gender_mode, GenderFilterMode::MultiSelect);
        assert_eq!(policy.default_group, "oecd");
        assert_eq!(policy.on_group_change, GroupChangePolicy::Keep);
    }
}
