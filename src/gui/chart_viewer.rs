//! Chart Viewer Widget
//! Central panel holding the dataset, its rendered scene and the tooltip.
//! A scene is rebuilt only when the dataset identity or the axis order changes.

use crate::charts::{ChartPlotter, ChartRenderer, ChartScene, Tooltip};
use crate::config::{CategoryOrder, ChartConfig};
use crate::data::Dataset;
use egui::RichText;
use log::{debug, info, warn};

pub struct ChartViewer {
    renderer: ChartRenderer,
    dataset: Dataset,
    scene: Option<ChartScene>,
    tooltip: Tooltip,
}

impl ChartViewer {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            renderer: ChartRenderer::new(config),
            dataset: Dataset::default(),
            scene: None,
            tooltip: Tooltip::new(),
        }
    }

    pub fn scene(&self) -> Option<&ChartScene> {
        self.scene.as_ref()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Hand the viewer a dataset. Returns true when the scene was replaced.
    pub fn set_dataset(&mut self, dataset: Dataset) -> bool {
        if self.dataset.same_as(&dataset) {
            debug!("dataset unchanged, keeping current scene");
            return false;
        }

        self.dataset = dataset;
        self.redraw();
        true
    }

    /// Change the time axis order, rebuilding the scene if it differs.
    pub fn set_category_order(&mut self, order: CategoryOrder) {
        if self.renderer.config().category_order == order {
            return;
        }

        let mut config = self.renderer.config().clone();
        config.category_order = order;
        self.renderer = ChartRenderer::new(config);
        self.redraw();
    }

    /// Drop the dataset and the scene
    pub fn clear(&mut self) {
        self.dataset = Dataset::default();
        self.scene = None;
        self.tooltip.reset();
    }

    fn redraw(&mut self) {
        self.tooltip.reset();
        self.scene = self.renderer.render(&self.dataset);

        match &self.scene {
            Some(scene) => info!(
                "rendered {} marks, {} time categories, years {} to {}",
                scene.marks.len(),
                scene.y_axis.ticks.len(),
                scene.x_domain.0.format("%Y"),
                scene.x_domain.1.format("%Y")
            ),
            None => info!("dataset is empty, nothing to draw"),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let Some(scene) = &self.scene else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let clicked =
            ChartPlotter::draw_scatter_chart(ui, scene, &self.dataset, &mut self.tooltip);
        ChartPlotter::draw_tooltip(ctx, &self.tooltip);

        if clicked {
            self.open_highlighted_source();
        }
    }

    /// Open the allegation source of the hovered rider, if it has one.
    fn open_highlighted_source(&self) {
        let Some(record) = self
            .tooltip
            .highlighted()
            .and_then(|i| self.dataset.get(i))
        else {
            return;
        };
        if record.url.is_empty() {
            return;
        }

        info!("opening {}", record.url);
        if let Err(e) = open::that(&record.url) {
            warn!("failed to open {}: {}", record.url, e);
        }
    }
}
