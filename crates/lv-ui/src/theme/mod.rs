use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    /// Light, since the chart palette is tuned for a white page
    fn default() -> Self {
        Self {
            name: "Paper".to_string(),
            dark_mode: false,
        }
    }
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    let (bg_color, panel_bg, widget_bg, hover_color, active_color, text_color) = if theme.dark_mode {
        (
            Color32::from_rgb(23, 23, 23),
            Color32::from_rgb(31, 31, 31),
            Color32::from_rgb(40, 40, 40),
            Color32::from_rgb(50, 50, 50),
            Color32::from_rgb(60, 60, 60),
            Color32::from_rgb(220, 220, 220),
        )
    } else {
        (
            Color32::WHITE,
            Color32::from_rgb(248, 248, 248),
            Color32::from_rgb(238, 238, 238),
            Color32::from_rgb(225, 225, 225),
            Color32::from_rgb(210, 210, 210),
            Color32::from_rgb(40, 40, 40),
        )
    };
    let border = if theme.dark_mode {
        Color32::from_rgb(70, 70, 70)
    } else {
        Color32::from_rgb(200, 200, 200)
    };
    let accent = accent_color();

    // Window and panel styling
    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.extreme_bg_color = bg_color;
    visuals.faint_bg_color = widget_bg;

    // Widget styling
    for (widget, fill) in [
        (&mut visuals.widgets.noninteractive, widget_bg),
        (&mut visuals.widgets.inactive, widget_bg),
        (&mut visuals.widgets.hovered, hover_color),
    ] {
        widget.bg_fill = fill;
        widget.bg_stroke = Stroke::new(1.0, border);
        widget.fg_stroke = Stroke::new(1.0, text_color);
        widget.rounding = Rounding::same(4.0);
    }
    visuals.widgets.active.bg_fill = active_color;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    // Selection and highlighting
    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;

    // Shadows
    visuals.window_shadow.extrusion = 8.0;
    visuals.popup_shadow.extrusion = 4.0;

    // Apply spacing
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    // Font sizes
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(70, 130, 180)
}

/// Get the error color for the theme
pub fn error_color() -> Color32 {
    Color32::from_rgb(200, 60, 60)
}

/// Get the warning color for the theme
pub fn warning_color() -> Color32 {
    Color32::from_rgb(200, 140, 40)
}
