//! Subset derivation from the dataset and filter state

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::record::{LeaderKey, LeaderRecord};

/// A shared, immutable subset of records
pub type Subset = Arc<[Arc<LeaderRecord>]>;

/// Opacity of every scatter point when no gender filter is active
pub const OPACITY_UNFILTERED: f32 = 1.0;
/// Opacity of scatter points matching the active gender filter
pub const OPACITY_MATCHING: f32 = 0.7;
/// Opacity of scatter points outside the active gender filter
pub const OPACITY_DIMMED: f32 = 0.15;

/// Records of `group` with a positive duration, in dataset order
pub fn derive_base_subset(records: &[Arc<LeaderRecord>], group: &str) -> Subset {
    records
        .iter()
        .filter(|r| r.in_group(group) && r.has_tenure())
        .cloned()
        .collect()
}

/// Narrow `base` to the genders in `filter`.
///
/// An empty filter returns `base` itself rather than a copy.
pub fn derive_gender_subset(base: &Subset, filter: &BTreeSet<String>) -> Subset {
    if filter.is_empty() {
        return Arc::clone(base);
    }
    base.iter()
        .filter(|r| filter.contains(&r.gender))
        .cloned()
        .collect()
}

/// The three views whose inputs the coordinator derives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewKind {
    Bar,
    Lexis,
    Scatter,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Lexis, ViewKind::Bar, ViewKind::Scatter];

    /// Stable identifier of the view's render target
    pub fn target_id(self) -> &'static str {
        match self {
            ViewKind::Bar => "bar-chart",
            ViewKind::Lexis => "lexis-chart",
            ViewKind::Scatter => "scatter-plot",
        }
    }
}

/// Everything a view needs to recompute itself
#[derive(Debug, Clone)]
pub struct ViewInputs {
    /// Records of the selected group with positive duration
    pub base: Subset,
    /// `base` narrowed by the gender filter
    pub filtered: Subset,
    pub gender_filter: Arc<BTreeSet<String>>,
    /// One set shared by every linked view
    pub selected_leaders: Arc<BTreeSet<LeaderKey>>,
    /// Bumped on every effective state change
    pub revision: u64,
}

impl ViewInputs {
    pub fn empty() -> Self {
        let nothing: Subset = Arc::from(Vec::new());
        Self {
            base: nothing.clone(),
            filtered: nothing,
            gender_filter: Arc::default(),
            selected_leaders: Arc::default(),
            revision: 0,
        }
    }

    /// The subset a given view renders
    pub fn subset_for(&self, kind: ViewKind) -> &Subset {
        match kind {
            ViewKind::Bar | ViewKind::Scatter => &self.base,
            ViewKind::Lexis => &self.filtered,
        }
    }

    pub fn has_gender_filter(&self) -> bool {
        !self.gender_filter.is_empty()
    }

    pub fn gender_active(&self, gender: &str) -> bool {
        self.gender_filter.contains(gender)
    }

    pub fn is_selected(&self, leader: &str) -> bool {
        self.selected_leaders.contains(leader)
    }

    /// Scatter opacity and interactivity for a record of `gender`
    pub fn gender_emphasis(&self, gender: &str) -> (f32, bool) {
        if !self.has_gender_filter() {
            (OPACITY_UNFILTERED, true)
        } else if self.gender_active(gender) {
            (OPACITY_MATCHING, true)
        } else {
            (OPACITY_DIMMED, false)
        }
    }
}

impl Default for ViewInputs {
    fn default() -> Self {
        Self::empty()
    }
}
