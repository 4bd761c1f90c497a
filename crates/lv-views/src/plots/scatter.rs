//! Scatter plot of GDP per capita against age at the start of the term

use std::sync::Arc;

use egui::{Color32, Ui};
use egui_plot::{MarkerShape, Plot, PlotBounds, PlotPoint, Points};
use lv_core::{InteractionSink, LeaderRecord, SelectionChange, ViewInputs, ViewKind};
use uuid::Uuid;

use super::lexis::AGE_DOMAIN;
use super::utils::colors::scatter_fill;
use super::utils::hit::nearest_point;
use super::{empty_overlay, show_tooltip};
use crate::{ChartConfig, ChartConfigError, SpaceView, SpaceViewId, ViewerContext};

pub const POINT_RADIUS: f32 = 5.0;
/// Seconds an opacity change takes to settle
pub const FADE_SECONDS: f32 = 0.3;

/// One leader in the scatter
#[derive(Debug, Clone)]
pub struct ScatterPoint {
    pub record: Arc<LeaderRecord>,
    pub gdp: f64,
    pub age: f64,
    pub selected: bool,
    /// Settled gender opacity
    pub opacity: f32,
    /// Whether hover and click reach this point
    pub interactive: bool,
}

impl ScatterPoint {
    pub fn leader(&self) -> &str {
        &self.record.leader
    }

    pub fn fill(&self) -> Color32 {
        scatter_fill(self.selected, self.opacity)
    }

    pub fn tooltip_lines(&self) -> Vec<String> {
        vec![
            self.record.leader.clone(),
            format!("Country: {}", self.record.country),
            format!("GDP per capita: ${}", self.gdp),
        ]
    }
}

/// Render model of the scatter plot
#[derive(Debug, Clone, Default)]
pub struct ScatterModel {
    pub points: Vec<ScatterPoint>,
}

impl ScatterModel {
    /// Records without a GDP value are left out entirely
    pub fn from_inputs(inputs: &ViewInputs) -> Self {
        let points = inputs
            .subset_for(ViewKind::Scatter)
            .iter()
            .filter_map(|record| {
                let gdp = record.pcgdp?;
                let (opacity, interactive) = inputs.gender_emphasis(&record.gender);
                Some(ScatterPoint {
                    gdp,
                    age: record.start_age,
                    selected: inputs.is_selected(&record.leader),
                    opacity,
                    interactive,
                    record: Arc::clone(record),
                })
            })
            .collect();
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn point(&self, leader: &str) -> Option<&ScatterPoint> {
        self.points.iter().find(|p| p.leader() == leader)
    }

    /// Top of the x domain, 1 when no point has a positive GDP
    pub fn x_max(&self) -> f64 {
        let max = self.points.iter().map(|p| p.gdp).fold(0.0, f64::max);
        if max > 0.0 {
            max
        } else {
            1.0
        }
    }

    /// Indices of the points hit testing considers, in paint order
    pub fn interactive(&self) -> impl Iterator<Item = usize> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.interactive)
            .map(|(idx, _)| idx)
    }
}

/// Scatter plot view
pub struct ScatterView {
    id: SpaceViewId,
    title: String,
    config: ChartConfig,
    inputs: ViewInputs,
    model: ScatterModel,
    hovered: Option<usize>,
}

impl ScatterView {
    pub fn new(config: ChartConfig) -> Result<Self, ChartConfigError> {
        Ok(Self {
            id: Uuid::new_v4(),
            title: "GDP vs. Age".to_string(),
            config: config.validate()?,
            inputs: ViewInputs::empty(),
            model: ScatterModel::default(),
            hovered: None,
        })
    }

    pub fn model(&self) -> &ScatterModel {
        &self.model
    }

    pub fn hovered(&self) -> Option<&ScatterPoint> {
        self.hovered.and_then(|idx| self.model.points.get(idx))
    }

    /// Report a click; `hit` is the interactive point under the pointer, if any.
    ///
    /// A click that hits no interactive point clears the selection.
    pub fn click(&self, sink: &dyn InteractionSink, hit: Option<usize>) {
        match hit.and_then(|idx| self.model.points.get(idx)).filter(|p| p.interactive) {
            Some(point) => {
                sink.on_selection_changed(SelectionChange::Toggle(point.leader().to_string()))
            }
            None => sink.on_selection_changed(SelectionChange::Clear),
        }
    }
}

impl SpaceView for ScatterView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Scatter
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn set_data(&mut self, inputs: &ViewInputs) {
        self.inputs = inputs.clone();
        self.recompute();
    }

    fn recompute(&mut self) {
        let hovered_leader = self.hovered().map(|p| p.leader().to_string());
        self.model = ScatterModel::from_inputs(&self.inputs);
        self.hovered = hovered_leader.and_then(|leader| {
            self.model
                .points
                .iter()
                .position(|p| p.interactive && p.leader() == leader)
        });
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        // Fade towards the settled opacity; the model itself never holds in-between values
        let egui_ctx = ui.ctx().clone();
        let fills: Vec<Color32> = self
            .model
            .points
            .iter()
            .map(|p| {
                let id = egui::Id::new((self.id, p.leader()));
                let opacity = egui_ctx.animate_value_with_time(id, p.opacity, FADE_SECONDS);
                scatter_fill(p.selected, opacity)
            })
            .collect();

        let size = self.config.plot_size(ui.available_size());
        let model = &self.model;
        let x_max = model.x_max();

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
                    .x_axis_label("GDP per capita (US$)")
                    .y_axis_label("Age")
                    .show(ui, |plot_ui| {
                        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                            [0.0, AGE_DOMAIN[0]],
                            [x_max, AGE_DOMAIN[1]],
                        ));
                        if model.is_empty() {
                            empty_overlay(
                                plot_ui,
                                [x_max / 2.0, (AGE_DOMAIN[0] + AGE_DOMAIN[1]) / 2.0],
                                "No leaders with GDP data",
                            );
                        }

                        let hovered = plot_ui.pointer_coordinate().and_then(|p| {
                            let pointer = plot_ui.screen_from_plot(p);
                            nearest_point(
                                pointer,
                                model.interactive().map(|idx| {
                                    let point = &model.points[idx];
                                    (idx, plot_ui.screen_from_plot(PlotPoint::new(point.gdp, point.age)))
                                }),
                                POINT_RADIUS,
                            )
                        });

                        for (point, fill) in model.points.iter().zip(&fills) {
                            plot_ui.points(
                                Points::new(vec![[point.gdp, point.age]])
                                    .shape(MarkerShape::Circle)
                                    .radius(POINT_RADIUS)
                                    .filled(true)
                                    .color(*fill),
                            );
                        }
                        if let Some(point) = hovered.map(|idx| &model.points[idx]) {
                            plot_ui.points(
                                Points::new(vec![[point.gdp, point.age]])
                                    .shape(MarkerShape::Circle)
                                    .radius(POINT_RADIUS + 1.0)
                                    .filled(false)
                                    .color(Color32::BLACK),
                            );
                        }

                        (hovered, plot_ui.plot_clicked())
                    })
                    .inner
            })
            .inner;

        self.hovered = hovered;

        if let Some(point) = self.hovered() {
            let lines = point.tooltip_lines();
            show_tooltip(ui, self.id, self.config.tooltip_padding, &lines);
        }
        if clicked {
            self.click(&ctx.interactions, hovered);
        }

        if fills
            .iter()
            .zip(&self.model.points)
            .any(|(fill, point)| *fill != point.fill())
        {
            ui.ctx().request_repaint();
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
