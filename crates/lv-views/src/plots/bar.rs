//! Bar chart of leaders per gender

use std::collections::BTreeMap;

use egui::{Align2, Stroke, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotBounds, PlotPoint, Text};
use lv_core::{FilterChange, InteractionSink, ViewInputs, ViewKind};
use uuid::Uuid;

use super::utils::colors::{bar_fill, BAR_HOVER_STROKE, LABEL_TEXT};
use super::{empty_overlay, show_tooltip};
use crate::{ChartConfig, ChartConfigError, SpaceView, SpaceViewId, ViewerContext};

/// Bar width in category units
const BAR_WIDTH: f64 = 0.7;

/// Clickable height of a bar, as a share of the y domain, however short the bar is
const MIN_HIT_FRACTION: f64 = 0.1;

/// One bar: a gender and how many leaders of the base subset have it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderBar {
    pub gender: String,
    pub count: usize,
    /// Whether the gender is part of the active filter
    pub active: bool,
}

impl GenderBar {
    pub fn tooltip(&self) -> String {
        format!("{}: {} leaders", self.gender, self.count)
    }
}

/// Render model of the bar chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarModel {
    /// Sorted by gender name
    pub bars: Vec<GenderBar>,
}

impl BarModel {
    pub fn from_inputs(inputs: &ViewInputs) -> Self {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in inputs.subset_for(ViewKind::Bar).iter() {
            *counts.entry(record.gender.as_str()).or_default() += 1;
        }
        // A filtered gender the group lacks keeps a bar so it can be toggled off
        for gender in inputs.gender_filter.iter() {
            counts.entry(gender.as_str()).or_default();
        }

        let bars = counts
            .into_iter()
            .map(|(gender, count)| GenderBar {
                gender: gender.to_string(),
                count,
                active: inputs.gender_active(gender),
            })
            .collect();
        Self { bars }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn count_of(&self, gender: &str) -> Option<usize> {
        self.bars.iter().find(|b| b.gender == gender).map(|b| b.count)
    }

    pub fn total(&self) -> usize {
        self.bars.iter().map(|b| b.count).sum()
    }

    /// Top of the y domain, at least 1 so an empty chart still has an axis
    pub fn y_max(&self) -> f64 {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64
    }

    /// Index of the bar covering plot coordinate (`x`, `y`)
    pub fn bar_at(&self, x: f64, y: f64) -> Option<usize> {
        let idx = x.round();
        if idx < 0.0 || (x - idx).abs() > BAR_WIDTH / 2.0 {
            return None;
        }
        let bar = self.bars.get(idx as usize)?;
        let top = (bar.count as f64).max(self.y_max() * MIN_HIT_FRACTION);
        (y >= 0.0 && y <= top).then_some(idx as usize)
    }
}

/// Bar chart view
pub struct BarChartView {
    id: SpaceViewId,
    title: String,
    config: ChartConfig,
    inputs: ViewInputs,
    model: BarModel,
    hovered: Option<usize>,
}

impl BarChartView {
    pub fn new(config: ChartConfig) -> Result<Self, ChartConfigError> {
        Ok(Self {
            id: Uuid::new_v4(),
            title: "Leaders by Gender".to_string(),
            config: config.validate()?,
            inputs: ViewInputs::empty(),
            model: BarModel::default(),
            hovered: None,
        })
    }

    pub fn model(&self) -> &BarModel {
        &self.model
    }

    /// The bar under the pointer during the last frame
    pub fn hovered(&self) -> Option<&GenderBar> {
        self.hovered.and_then(|idx| self.model.bars.get(idx))
    }

    /// Report a click on bar `index`
    pub fn click_bar(&self, sink: &dyn InteractionSink, index: usize) {
        if let Some(bar) = self.model.bars.get(index) {
            tracing::debug!("Bar clicked: {}", bar.gender);
            sink.on_filter_changed(FilterChange::ToggleGender(bar.gender.clone()));
        }
    }
}

impl SpaceView for BarChartView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Bar
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn set_data(&mut self, inputs: &ViewInputs) {
        self.inputs = inputs.clone();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.model = BarModel::from_inputs(&self.inputs);
        if self.hovered.map_or(false, |idx| idx >= self.model.bars.len()) {
            self.hovered = None;
        }
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let size = self.config.plot_size(ui.available_size());
        let model = &self.model;
        let y_max = model.y_max();
        let x_max = model.bars.len().max(1) as f64 - 0.4;

        let response = egui::Frame::none()
            .inner_margin(egui::Margin::from(self.config.margin))
            .show(ui, |ui| {
                Plot::new(self.id)
                    .width(size.x)
                    .height(size.y)
                    .allow_zoom(false)
                    .allow_drag(false)
                    .allow_scroll(false)
                    .allow_boxed_zoom(false)
                    .show_grid(false)
                    .show_x(false)
                    .show_y(false)
                    .show_axes([false, true])
                    .y_axis_label("Leaders")
                    .show(ui, |plot_ui| {
                        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                            [-0.6, -0.08 * y_max],
                            [x_max, y_max * 1.05],
                        ));
                        if model.is_empty() {
                            empty_overlay(
                                plot_ui,
                                [(x_max - 0.6) / 2.0, y_max / 2.0],
                                "No leaders in this group",
                            );
                        }

                        let hovered = plot_ui
                            .pointer_coordinate()
                            .and_then(|p| model.bar_at(p.x, p.y));

                        let bars = model
                            .bars
                            .iter()
                            .enumerate()
                            .map(|(idx, bar)| {
                                let mut item = Bar::new(idx as f64, bar.count as f64)
                                    .width(BAR_WIDTH)
                                    .fill(bar_fill(bar.active))
                                    .name(&bar.gender);
                                if hovered == Some(idx) {
                                    item = item.stroke(Stroke::new(2.0, BAR_HOVER_STROKE));
                                }
                                item
                            })
                            .collect();
                        plot_ui.bar_chart(
                            BarChart::new(bars).element_formatter(Box::new(|_, _| String::new())),
                        );

                        for (idx, bar) in model.bars.iter().enumerate() {
                            plot_ui.text(
                                Text::new(PlotPoint::new(idx as f64, 0.0), bar.gender.as_str())
                                    .color(LABEL_TEXT)
                                    .anchor(Align2::CENTER_TOP),
                            );
                        }

                        (hovered, plot_ui.plot_clicked())
                    })
                    .inner
            })
            .inner;

        let (hovered, clicked) = response;
        self.hovered = hovered;

        if let Some(bar) = self.hovered() {
            show_tooltip(ui, self.id, self.config.tooltip_padding, &[bar.tooltip()]);
        }
        if clicked {
            if let Some(idx) = hovered {
                self.click_bar(&ctx.interactions, idx);
            }
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{inputs, leader, rendered_text};
    use lv_core::{ActionQueue, DashboardAction};

    fn view() -> BarChartView {
        let mut view = BarChartView::new(ChartConfig::bar()).unwrap();
        view.set_data(&inputs(
            vec![
                leader("a", "Male", 0),
                leader("b", "Female", 0),
                leader("c", "Male", 1),
            ],
            &["Female"],
            &[],
        ));
        view
    }

    #[test]
    fn test_bars_sorted_by_gender() {
        let view = view();
        let genders: Vec<_> = view.model().bars.iter().map(|b| b.gender.as_str()).collect();
        assert_eq!(genders, vec!["Female", "Male"]);
        assert_eq!(view.model().count_of("Male"), Some(2));
        assert_eq!(view.model().total(), 3);
        assert_eq!(view.model().y_max(), 2.0);
    }

    #[test]
    fn test_active_follows_filter() {
        let view = view();
        assert!(view.model().bars[0].active);
        assert!(!view.model().bars[1].active);
    }

    #[test]
    fn test_tooltip_text() {
        let view = view();
        assert_eq!(view.model().bars[1].tooltip(), "Male: 2 leaders");
    }

    #[test]
    fn test_bar_hit_testing() {
        let model = view().model().clone();
        assert_eq!(model.bar_at(0.1, 0.5), Some(0));
        assert_eq!(model.bar_at(1.2, 1.9), Some(1));
        assert_eq!(model.bar_at(0.0, 1.5), None);
        assert_eq!(model.bar_at(0.5, 0.5), None);
        assert_eq!(model.bar_at(2.0, 0.5), None);
        assert_eq!(model.bar_at(-1.0, 0.5), None);
    }

    #[test]
    fn test_click_requests_gender_toggle() {
        let view = view();
        let queue = ActionQueue::new();
        view.click_bar(&queue, 1);
        view.click_bar(&queue, 7);
        assert_eq!(
            queue.drain(),
            vec![DashboardAction::Filter(FilterChange::ToggleGender("Male".into()))]
        );
    }

    #[test]
    fn test_empty_subset() {
        let mut view = view();
        view.set_data(&ViewInputs::empty());
        assert!(view.model().is_empty());
        assert_eq!(view.model().y_max(), 1.0);
    }

    #[test]
    fn test_filtered_gender_missing_from_group_keeps_a_bar() {
        let mut view = BarChartView::new(ChartConfig::bar()).unwrap();
        view.set_data(&inputs(vec![leader("a", "Male", 0)], &["Female"], &[]));
        assert_eq!(
            view.model().bars,
            vec![
                GenderBar { gender: "Female".into(), count: 0, active: true },
                GenderBar { gender: "Male".into(), count: 1, active: false },
            ]
        );
        assert_eq!(view.model().total(), 1);
        assert_eq!(view.model().bar_at(0.0, 0.05), Some(0));

        let queue = ActionQueue::new();
        view.click_bar(&queue, 0);
        assert_eq!(
            queue.drain(),
            vec![DashboardAction::Filter(FilterChange::ToggleGender("Female".into()))]
        );
    }

    #[test]
    fn test_empty_subset_still_draws_axes() {
        let mut view = BarChartView::new(ChartConfig::bar()).unwrap();
        view.set_data(&ViewInputs::empty());
        let texts = rendered_text(&mut view);
        assert!(texts.iter().any(|t| t == "Leaders"), "{texts:?}");
        assert!(texts.iter().any(|t| t == "No leaders in this group"));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = ChartConfig::bar();
        config.container_height = -5.0;
        assert!(BarChartView::new(config).is_err());
    }
}
