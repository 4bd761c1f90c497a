//! Color utilities for plots

use egui::Color32;
use lv_core::Tier;

/// Bar of a gender in the active filter
pub const BAR_ACTIVE: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
/// Bar of a gender outside the filter, or every bar when no filter is set
pub const BAR_INACTIVE: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);
pub const BAR_HOVER_STROKE: Color32 = Color32::from_rgb(0x46, 0x82, 0xb4);

pub const SCATTER_SELECTED: Color32 = Color32::from_rgb(0x00, 0x00, 0xff);
pub const SCATTER_DEFAULT: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);
/// Fill alpha of a point that is not in the selection
pub const SCATTER_UNSELECTED_ALPHA: f32 = 0.7;

pub const LABEL_TEXT: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

/// How a Lexis segment of a given tier is stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierStyle {
    pub stroke: Color32,
    pub width: f32,
    /// Arrow head at the end of the term
    pub head: Color32,
}

/// Stroke, width and head color of a Lexis segment
pub fn lexis_style(tier: Tier) -> TierStyle {
    match tier {
        Tier::Default => TierStyle {
            stroke: Color32::from_rgb(0x88, 0x88, 0x88),
            width: 2.0,
            head: Color32::from_rgb(0xdd, 0xdd, 0xdd),
        },
        Tier::Highlighted => TierStyle {
            stroke: Color32::from_rgb(0x00, 0x00, 0xff),
            width: 3.0,
            head: Color32::from_rgb(0xae, 0xae, 0xca),
        },
        Tier::Selected => TierStyle {
            stroke: Color32::from_rgb(0xff, 0x00, 0x00),
            width: 4.0,
            head: Color32::from_rgb(0xe8, 0x9f, 0x03),
        },
        Tier::Hover => TierStyle {
            stroke: Color32::BLACK,
            width: 4.0,
            head: Color32::from_rgb(0x88, 0x88, 0x88),
        },
    }
}

pub fn bar_fill(active: bool) -> Color32 {
    if active {
        BAR_ACTIVE
    } else {
        BAR_INACTIVE
    }
}

/// Fill of a scatter point after applying its gender opacity
pub fn scatter_fill(selected: bool, opacity: f32) -> Color32 {
    let (base, alpha) = if selected {
        (SCATTER_SELECTED, 1.0)
    } else {
        (SCATTER_DEFAULT, SCATTER_UNSELECTED_ALPHA)
    };
    base.linear_multiply((alpha * opacity).clamp(0.0, 1.0))
}
