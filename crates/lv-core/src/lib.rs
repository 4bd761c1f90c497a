//! Core functionality for the leader tenure dashboard
//!
//! This crate holds the record model, the filter and selection state, the
//! derivation rules for each view's working set, and the coordinator that keeps
//! the linked views consistent.

pub mod coordinator;
pub mod derive;
pub mod events;
pub mod filter;
pub mod interaction;
pub mod record;
pub mod tier;

// Re-export commonly used types
pub use coordinator::{Coordinator, UpdateScope};
pub use derive::{derive_base_subset, derive_gender_subset, Subset, ViewInputs, ViewKind};
pub use events::EventBus;
pub use filter::{FilterPolicy, FilterState, GenderFilterMode, GroupChangePolicy, DEFAULT_GROUP};
pub use interaction::{ActionQueue, DashboardAction, FilterChange, InteractionSink, SelectionChange};
pub use record::{Dataset, DatasetError, LeaderKey, LeaderRecord};
pub use tier::Tier;
pub use data::LeaderSource;

pub mod data {
    use crate::record::Dataset;

    /// Trait for sources the dashboard can load its dataset from
    #[async_trait::async_trait]
    pub trait LeaderSource: Send + Sync {
        /// Load and validate the full dataset
        async fn load(&self) -> anyhow::Result<Dataset>;

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }
}
