//! User interface components for the leader tenure dashboard
//!
//! This crate provides the egui chrome around the chart views: theme, menu
//! bar, status bar, the country-group selector and the startup screens.

pub mod group_selector;
pub mod shell;
pub mod theme;

/// Re-export commonly used types
pub use group_selector::{display_group_name, group_selector};
pub use shell::{error_screen, loading_screen, menu_bar, status_bar, ShellAction, StatusLine};
pub use theme::{apply_theme, Theme};
