//! Utilities for plot views

pub mod colors;
pub mod hit;

// Re-export commonly used items
pub use colors::{bar_fill, lexis_style, scatter_fill, TierStyle};
pub use hit::{distance_to_segment, nearest_point, nearest_segment};
