//! Typed chart dimensions shared by every view

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Space around the plotting area, in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    fn sides(&self) -> [(&'static str, f32); 4] {
        [("top", self.top), ("right", self.right), ("bottom", self.bottom), ("left", self.left)]
    }
}

impl From<Margin> for egui::Margin {
    fn from(m: Margin) -> Self {
        egui::Margin {
            left: m.left,
            right: m.right,
            top: m.top,
            bottom: m.bottom,
        }
    }
}

/// Invalid chart dimensions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartConfigError {
    #[error("container size must be positive, got {width}x{height}")]
    InvalidContainer { width: f32, height: f32 },

    #[error("{side} margin must be a non-negative number, got {value}")]
    InvalidMargin { side: &'static str, value: f32 },

    #[error("margins leave no room to draw in a {width}x{height} container")]
    NoInnerArea { width: f32, height: f32 },

    #[error("tooltip padding must be a non-negative number, got {0}")]
    InvalidTooltipPadding(f32),
}

/// Size and spacing of one chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub container_width: f32,
    pub container_height: f32,
    pub margin: Margin,
    #[serde(default = "default_tooltip_padding")]
    pub tooltip_padding: f32,
}

fn default_tooltip_padding() -> f32 {
    10.0
}

impl ChartConfig {
    /// Gender bar chart defaults
    pub const fn bar() -> Self {
        Self {
            container_width: 400.0,
            container_height: 300.0,
            margin: Margin::new(40.0, 20.0, 50.0, 50.0),
            tooltip_padding: 10.0,
        }
    }

    /// Lexis chart defaults
    pub const fn lexis() -> Self {
        Self {
            container_width: 1000.0,
            container_height: 380.0,
            margin: Margin::new(15.0, 15.0, 20.0, 25.0),
            tooltip_padding: 10.0,
        }
    }

    /// Scatter plot defaults
    pub const fn scatter() -> Self {
        Self {
            container_width: 500.0,
            container_height: 300.0,
            margin: Margin::new(40.0, 40.0, 50.0, 50.0),
            tooltip_padding: 10.0,
        }
    }

    pub fn validate(self) -> Result<Self, ChartConfigError> {
        let (width, height) = (self.container_width, self.container_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ChartConfigError::InvalidContainer { width, height });
        }
        for (side, value) in self.margin.sides() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ChartConfigError::InvalidMargin { side, value });
            }
        }
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(ChartConfigError::NoInnerArea { width, height });
        }
        if !(self.tooltip_padding.is_finite() && self.tooltip_padding >= 0.0) {
            return Err(ChartConfigError::InvalidTooltipPadding(self.tooltip_padding));
        }
        Ok(self)
    }

    /// Width of the plotting area inside the margins
    pub fn inner_width(&self) -> f32 {
        self.container_width - self.margin.left - self.margin.right
    }

    /// Height of the plotting area inside the margins
    pub fn inner_height(&self) -> f32 {
        self.container_height - self.margin.top - self.margin.bottom
    }

    /// Plot size for the space available, never larger than the configured inner area
    pub fn plot_size(&self, available: egui::Vec2) -> egui::Vec2 {
        let width = (available.x - self.margin.left - self.margin.right).min(self.inner_width());
        let height = (available.y - self.margin.top - self.margin.bottom).min(self.inner_height());
        egui::vec2(width.max(1.0), height.max(1.0))
    }
}

/// Configuration of all three charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardCharts {
    pub bar: ChartConfig,
    pub lexis: ChartConfig,
    pub scatter: ChartConfig,
}

impl Default for DashboardCharts {
    fn default() -> Self {
        Self {
            bar: ChartConfig::bar(),
            lexis: ChartConfig::lexis(),
            scatter: ChartConfig::scatter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        for config in [ChartConfig::bar(), ChartConfig::lexis(), ChartConfig::scatter()] {
            assert!(config.validate().is_ok());
        }
        assert_eq!(ChartConfig::bar().inner_width(), 330.0);
        assert_eq!(ChartConfig::lexis().inner_height(), 345.0);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let mut config = ChartConfig::scatter();
        config.container_width = 0.0;
        assert!(matches!(config.validate(), Err(ChartConfigError::InvalidContainer { .. })));

        let mut config = ChartConfig::scatter();
        config.margin.left = -1.0;
        assert_eq!(
            config.validate(),
            Err(ChartConfigError::InvalidMargin { side: "left", value: -1.0 })
        );

        let mut config = ChartConfig::scatter();
        config.margin.top = 200.0;
        config.margin.bottom = 100.0;
        assert!(matches!(config.validate(), Err(ChartConfigError::NoInnerArea { .. })));

        let mut config = ChartConfig::scatter();
        config.tooltip_padding = f32::NAN;
        assert!(matches!(config.validate(), Err(ChartConfigError::InvalidTooltipPadding(_))));
    }

    #[test]
    fn test_plot_size_shrinks_to_available() {
        let config = ChartConfig::bar();
        assert_eq!(config.plot_size(egui::vec2(1000.0, 1000.0)), egui::vec2(330.0, 210.0));
        assert_eq!(config.plot_size(egui::vec2(170.0, 190.0)), egui::vec2(100.0, 100.0));
    }

    #[test]
    fn test_json_field_names() {
        let config: ChartConfig = serde_json::from_str(
            r#"{"containerWidth": 640, "containerHeight": 480,
                "margin": {"top": 10, "right": 10, "bottom": 10, "left": 10}}"#,
        )
        .unwrap();
        assert_eq!(config.inner_width(), 620.0);
        assert_eq!(config.tooltip_padding, 10.0);
    }

    #[test]
    fn test_partial_chart_set() {
        let charts: DashboardCharts = serde_json::from_str(
            r#"{"bar": {"containerWidth": 600, "containerHeight": 300,
                        "margin": {"top": 0, "right": 0, "bottom": 0, "left": 0}}}"#,
        )
        .unwrap();
        assert_eq!(charts.bar.container_width, 600.0);
        assert_eq!(charts.lexis, ChartConfig::lexis());
    }
}
