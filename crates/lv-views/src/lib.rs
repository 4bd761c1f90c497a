//! View system for the leader tenure dashboard

mod config;
pub mod plots;
mod space_view;
mod viewport;

pub use config::{ChartConfig, ChartConfigError, DashboardCharts, Margin};
pub use plots::{BarChartView, LexisView, ScatterView};
pub use space_view::{SpaceView, SpaceViewId};
pub use viewport::Viewport;

use lv_core::ActionQueue;

/// Context passed to views during rendering
#[derive(Clone, Default)]
pub struct ViewerContext {
    /// Where views report clicks; drained by the app once the frame is drawn
    pub interactions: ActionQueue,
}

impl ViewerContext {
    pub fn new(interactions: ActionQueue) -> Self {
        Self { interactions }
    }
}

/// Build the three linked views, validating each chart's configuration
pub fn dashboard_views(charts: &DashboardCharts) -> Result<Vec<Box<dyn SpaceView>>, ChartConfigError> {
    let views: Vec<Box<dyn SpaceView>> = vec![
        Box::new(LexisView::new(charts.lexis)?),
        Box::new(BarChartView::new(charts.bar)?),
        Box::new(ScatterView::new(charts.scatter)?),
    ];
    Ok(views)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use lv_core::{derive_base_subset, derive_gender_subset, LeaderRecord, ViewInputs};

    use crate::{SpaceView, ViewerContext};

    /// OECD member with a four-year term and a GDP value
    pub fn leader(name: &str, gender: &str, label: u8) -> LeaderRecord {
        leader_with_gdp(name, gender, label, Some(10000.0))
    }

    pub fn leader_with_gdp(name: &str, gender: &str, label: u8, pcgdp: Option<f64>) -> LeaderRecord {
        LeaderRecord {
            leader: name.to_string(),
            country: format!("{name}-land"),
            gender: gender.to_string(),
            start_year: 1990,
            end_year: 1994,
            start_age: 50.0,
            end_age: 54.0,
            duration: 4.0,
            pcgdp,
            label,
            groups: [("oecd".to_string(), true)].into_iter().collect(),
        }
    }

    /// Text painted by two headless frames of `view`, axis labels included
    pub fn rendered_text(view: &mut dyn SpaceView) -> Vec<String> {
        let egui_ctx = egui::Context::default();
        let viewer = ViewerContext::default();
        let mut texts = Vec::new();
        for _ in 0..2 {
            let output = egui_ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| view.ui(&viewer, ui));
            });
            texts = output
                .shapes
                .iter()
                .flat_map(|clipped| shape_text(&clipped.shape))
                .collect();
        }
        texts
    }

    fn shape_text(shape: &egui::Shape) -> Vec<String> {
        match shape {
            egui::Shape::Text(text) => vec![text.galley.text().to_string()],
            egui::Shape::Vec(shapes) => shapes.iter().flat_map(shape_text).collect(),
            _ => Vec::new(),
        }
    }

    /// View inputs for the OECD group of `records`
    pub fn inputs(records: Vec<LeaderRecord>, filter: &[&str], selected: &[&str]) -> ViewInputs {
        let records: Vec<Arc<LeaderRecord>> = records.into_iter().map(Arc::new).collect();
        let gender_filter: BTreeSet<String> = filter.iter().map(|g| g.to_string()).collect();
        let base = derive_base_subset(&records, "oecd");
        let filtered = derive_gender_subset(&base, &gender_filter);
        ViewInputs {
            base,
            filtered,
            gender_filter: Arc::new(gender_filter),
            selected_leaders: Arc::new(selected.iter().map(|l| l.to_string()).collect()),
            revision: 1,
        }
    }
}
