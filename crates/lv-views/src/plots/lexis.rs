//! Lexis chart: every term as an arrow from (start year, start age) to (end year, end age)

use std::sync::Arc;

use egui::{Align2, Pos2, Ui};
use egui_plot::{Arrows, Line, Plot, PlotBounds, PlotPoint, PlotPoints, Text};
use lv_core::{InteractionSink, LeaderRecord, SelectionChange, Tier, ViewInputs, ViewKind};
use uuid::Uuid;

use super::utils::colors::{lexis_style, LABEL_TEXT};
use super::utils::hit::nearest_segment;
use super::{empty_overlay, show_tooltip};
use crate::{ChartConfig, ChartConfigError, SpaceView, SpaceViewId, ViewerContext};

pub const YEAR_DOMAIN: [f64; 2] = [1950.0, 2021.0];
pub const AGE_DOMAIN: [f64; 2] = [25.0, 95.0];

/// Pointer distance, in points, within which a segment counts as hovered
const HIT_TOLERANCE: f32 = 5.0;
/// Share of the segment the arrow head shaft covers
const HEAD_FRACTION: f64 = 0.08;
const HEAD_LENGTH: f32 = 9.0;

/// One term in the chart
#[derive(Debug, Clone)]
pub struct LexisSegment {
    pub record: Arc<LeaderRecord>,
    /// Persistent tier, without hover
    pub tier: Tier,
}

impl LexisSegment {
    pub fn leader(&self) -> &str {
        &self.record.leader
    }

    pub fn start(&self) -> [f64; 2] {
        [self.record.start_year as f64, self.record.start_age]
    }

    pub fn end(&self) -> [f64; 2] {
        [self.record.end_year as f64, self.record.end_age]
    }
}

/// Tooltip lines for a hovered term
pub fn tooltip_lines(record: &LeaderRecord) -> Vec<String> {
    let gdp = match record.pcgdp {
        Some(value) => format!("${value}"),
        None => "N/A".to_string(),
    };
    vec![
        record.leader.clone(),
        format!("Country: {}", record.country),
        format!("Years: {} - {}", record.start_year, record.end_year),
        format!("Age: {} - {}", record.start_age, record.end_age),
        format!("Duration: {} years", record.duration),
        format!("GDP per capita: {gdp}"),
    ]
}

/// Render model of the Lexis chart
#[derive(Debug, Clone, Default)]
pub struct LexisModel {
    /// In subset order, so label-1 terms come last
    pub segments: Vec<LexisSegment>,
}

impl LexisModel {
    pub fn from_inputs(inputs: &ViewInputs) -> Self {
        let segments = inputs
            .subset_for(ViewKind::Lexis)
            .iter()
            .map(|record| LexisSegment {
                tier: Tier::resolve(record.is_labelled(), inputs.is_selected(&record.leader), false),
                record: Arc::clone(record),
            })
            .collect();
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn position(&self, leader: &str) -> Option<usize> {
        self.segments.iter().position(|s| s.leader() == leader)
    }

    pub fn tier_of(&self, leader: &str) -> Option<Tier> {
        self.position(leader).map(|idx| self.segments[idx].tier)
    }

    /// Tier of segment `idx` once hover is taken into account
    pub fn effective_tier(&self, idx: usize, hovered: Option<usize>) -> Option<Tier> {
        let segment = self.segments.get(idx)?;
        Some(if hovered == Some(idx) { Tier::Hover } else { segment.tier })
    }

    /// Leaders whose name label is drawn
    pub fn labelled_leaders(&self, hovered: Option<usize>) -> Vec<&str> {
        self.draw_order(hovered)
            .into_iter()
            .filter(|&idx| self.effective_tier(idx, hovered).map_or(false, Tier::shows_label))
            .map(|idx| self.segments[idx].leader())
            .collect()
    }

    /// Segment indices in paint order: subset order, with the hovered one last
    pub fn draw_order(&self, hovered: Option<usize>) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.segments.len())
            .filter(|&idx| Some(idx) != hovered)
            .collect();
        if let Some(idx) = hovered.filter(|&idx| idx < self.segments.len()) {
            order.push(idx);
        }
        order
    }
}

/// Lexis chart view
pub struct LexisView {
    id: SpaceViewId,
    title: String,
    config: ChartConfig,
    years: [f64; 2],
    ages: [f64; 2],
    inputs: ViewInputs,
    model: LexisModel,
    hovered: Option<usize>,
}

impl LexisView {
    pub fn new(config: ChartConfig) -> Result<Self, ChartConfigError> {
        Ok(Self {
            id: Uuid::new_v4(),
            title: "Leader Tenure".to_string(),
            config: config.validate()?,
            years: YEAR_DOMAIN,
            ages: AGE_DOMAIN,
            inputs: ViewInputs::empty(),
            model: LexisModel::default(),
            hovered: None,
        })
    }

    /// Override the fixed axis domains
    pub fn with_domains(mut self, years: [f64; 2], ages: [f64; 2]) -> Self {
        self.years = years;
        self.ages = ages;
        self
    }

    pub fn model(&self) -> &LexisModel {
        &self.model
    }

    pub fn hovered(&self) -> Option<&LexisSegment> {
        self.hovered.and_then(|idx| self.model.segments.get(idx))
    }

    /// Report a click on segment `index`
    pub fn click_segment(&self, sink: &dyn InteractionSink, index: usize) {
        if let Some(segment) = self.model.segments.get(index) {
            sink.on_selection_changed(SelectionChange::Toggle(segment.leader().to_string()));
        }
    }
}

impl SpaceView for LexisView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Lexis
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn set_data(&mut self, inputs: &ViewInputs) {
        self.inputs = inputs.clone();
        self.recompute();
    }

    fn recompute(&mut self) {
        let hovered_leader = self.hovered().map(|s| s.leader().to_string());
        self.model = LexisModel::from_inputs(&self.inputs);
        self.hovered = hovered_leader.and_then(|leader| self.model.position(&leader));
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let size = self.config.plot_size(ui.available_size());
        let model = &self.model;
        let (years, ages) = (self.years, self.ages);

        let (hovered, clicked) = egui::Frame::none()
            .inner_margin(egui::Margin::from(self.config.margin))
            .show(ui, |ui| {
                Plot::new(self.id)
                    .width(size.x)
                    .height(size.y)
                    .allow_zoom(false)
                    .allow_drag(false)
                    .allow_scroll(false)
                    .allow_boxed_zoom(false)
                    .show_x(false)
                    .show_y(false)
                    .x_axis_label("Year")
                    .y_axis_label("Age")
                    .show(ui, |plot_ui| {
                        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                            [years[0], ages[0]],
                            [years[1], ages[1]],
                        ));
                        if model.is_empty() {
                            empty_overlay(
                                plot_ui,
                                [(years[0] + years[1]) / 2.0, (ages[0] + ages[1]) / 2.0],
                                "No leaders match the current filters",
                            );
                        }

                        let to_screen = |p: [f64; 2]| -> Pos2 {
                            plot_ui.screen_from_plot(PlotPoint::new(p[0], p[1]))
                        };
                        let hovered = plot_ui.pointer_coordinate().and_then(|p| {
                            let pointer = to_screen([p.x, p.y]);
                            nearest_segment(
                                pointer,
                                model.draw_order(None).into_iter().map(|idx| {
                                    let segment = &model.segments[idx];
                                    (idx, to_screen(segment.start()), to_screen(segment.end()))
                                }),
                                HIT_TOLERANCE,
                            )
                        });

                        for idx in model.draw_order(hovered) {
                            let segment = &model.segments[idx];
                            let tier = model.effective_tier(idx, hovered).unwrap_or(segment.tier);
                            let style = lexis_style(tier);
                            let (start, end) = (segment.start(), segment.end());

                            plot_ui.line(
                                Line::new(PlotPoints::new(vec![start, end]))
                                    .color(style.stroke)
                                    .width(style.width),
                            );
                            if start != end {
                                let shaft = [
                                    end[0] - (end[0] - start[0]) * HEAD_FRACTION,
                                    end[1] - (end[1] - start[1]) * HEAD_FRACTION,
                                ];
                                plot_ui.arrows(
                                    Arrows::new(vec![shaft], vec![end])
                                        .color(style.head)
                                        .tip_length(HEAD_LENGTH),
                                );
                            }
                            if tier.shows_label() {
                                plot_ui.text(
                                    Text::new(PlotPoint::new(start[0], start[1]), segment.leader())
                                        .color(LABEL_TEXT)
                                        .anchor(Align2::RIGHT_BOTTOM),
                                );
                            }
                        }

                        (hovered, plot_ui.plot_clicked())
                    })
                    .inner
            })
            .inner;

        self.hovered = hovered;

        if let Some(segment) = self.hovered() {
            let lines = tooltip_lines(&segment.record);
            show_tooltip(ui, self.id, self.config.tooltip_padding, &lines);
        }
        if clicked {
            if let Some(idx) = hovered {
                self.click_segment(&ctx.interactions, idx);
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
    use crate::test_support::{inputs, leader, leader_with_gdp, rendered_text};
    use lv_core::{ActionQueue, DashboardAction};

    fn view(filter: &[&str], selected: &[&str]) -> LexisView {
        let mut view = LexisView::new(ChartConfig::lexis()).unwrap();
        view.set_data(&inputs(
            vec![
                leader("plain", "Male", 0),
                leader("labelled", "Female", 1),
                leader("both", "Male", 1),
            ],
            filter,
            selected,
        ));
        view
    }

    #[test]
    fn test_tiers() {
        let view = view(&[], &["both", "plain"]);
        let model = view.model();
        assert_eq!(model.tier_of("plain"), Some(Tier::Selected));
        assert_eq!(model.tier_of("labelled"), Some(Tier::Highlighted));
        assert_eq!(model.tier_of("both"), Some(Tier::Selected));
    }

    #[test]
    fn test_renders_gender_subset() {
        let view = view(&["Female"], &[]);
        assert_eq!(view.model().len(), 1);
        assert_eq!(view.model().tier_of("plain"), None);
    }

    #[test]
    fn test_labels_only_for_emphasised_tiers() {
        let view = view(&[], &["plain"]);
        let mut labelled = view.model().labelled_leaders(None);
        labelled.sort_unstable();
        assert_eq!(labelled, vec!["both", "labelled", "plain"]);

        let view = self::view(&[], &[]);
        assert_eq!(view.model().labelled_leaders(None), vec!["labelled", "both"]);
        assert_eq!(view.model().labelled_leaders(Some(0)), vec!["labelled", "both", "plain"]);
    }

    #[test]
    fn test_hover_is_drawn_last_and_never_persisted() {
        let view = view(&[], &[]);
        let model = view.model();
        assert_eq!(model.draw_order(Some(0)), vec![1, 2, 0]);
        assert_eq!(model.effective_tier(0, Some(0)), Some(Tier::Hover));
        assert_eq!(model.effective_tier(1, Some(0)), Some(Tier::Highlighted));
        assert_eq!(model.effective_tier(3, Some(3)), None);
        assert_eq!(model.tier_of("plain"), Some(Tier::Default));
        assert!(view.inputs.selected_leaders.is_empty());
    }

    #[test]
    fn test_empty_subset_still_draws_axes() {
        let mut view = LexisView::new(ChartConfig::lexis()).unwrap();
        view.set_data(&ViewInputs::empty());
        let texts = rendered_text(&mut view);
        assert!(texts.iter().any(|t| t == "Year"), "{texts:?}");
        assert!(texts.iter().any(|t| t == "Age"));
        assert!(texts.iter().any(|t| t == "No leaders match the current filters"));
    }

    #[test]
    fn test_click_toggles_selection() {
        let view = view(&[], &[]);
        let queue = ActionQueue::new();
        view.click_segment(&queue, 1);
        assert_eq!(
            queue.drain(),
            vec![DashboardAction::Selection(SelectionChange::Toggle("labelled".into()))]
        );
    }

    #[test]
    fn test_tooltip_lines() {
        let record = leader_with_gdp("x", "Female", 0, None);
        let lines = tooltip_lines(&record);
        assert_eq!(lines[0], "x");
        assert_eq!(lines[2], "Years: 1990 - 1994");
        assert_eq!(lines[5], "GDP per capita: N/A");

        let record = leader_with_gdp("y", "Female", 0, Some(1234.5));
        assert_eq!(tooltip_lines(&record)[5], "GDP per capita: $1234.5");
    }
}
