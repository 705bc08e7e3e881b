//! Doping Chart Main Application
//! Title panel on top, chart viewer below; the dataset is fetched on a
//! background thread once at startup.

use crate::charts::StaticChartRenderer;
use crate::config::ChartConfig;
use crate::data::{DataLoader, Dataset};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use anyhow::Context;
use log::{error, info};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset fetch result from background thread
enum LoadResult {
    Complete(Dataset),
    Error(String),
}

/// Main application window.
pub struct DopingChartApp {
    config: ChartConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async fetch
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DopingChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::with_config(ChartConfig::default());
        app.start_fetch();
        app
    }

    fn with_config(config: ChartConfig) -> Self {
        Self {
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(config.clone()),
            config,
            load_rx: None,
            is_loading: false,
        }
    }

    /// Fetch the dataset in a background thread
    fn start_fetch(&mut self) {
        if self.is_loading {
            return;
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.chart_viewer.clear();
        self.control_panel.loading = true;
        self.control_panel.fetch_failed = false;
        self.control_panel.export_enabled = false;
        self.control_panel.set_status("Fetching dataset...");

        let loader = DataLoader::new(&self.config);
        thread::spawn(move || {
            let result = match loader.fetch() {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for fetch results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(dataset)) => {
                self.chart_viewer.set_dataset(dataset);
                self.control_panel.export_enabled = self.chart_viewer.scene().is_some();

                let dataset = self.chart_viewer.dataset();
                if dataset.is_empty() {
                    self.control_panel.set_status("Dataset is empty");
                } else {
                    self.control_panel.set_status(&format!(
                        "Loaded {} records, {} with doping allegations",
                        dataset.len(),
                        dataset.allegation_count()
                    ));
                }
                self.finish_loading();
            }
            Ok(LoadResult::Error(e)) => {
                error!("Error fetching data: {}", e);
                self.control_panel.set_error(&e);
                self.control_panel.fetch_failed = true;
                self.finish_loading();
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                error!("Fetch thread ended without a result");
                self.control_panel.set_error("fetch thread ended without a result");
                self.control_panel.fetch_failed = true;
                self.finish_loading();
            }
        }
    }

    fn finish_loading(&mut self) {
        self.is_loading = false;
        self.control_panel.loading = false;
    }

    /// Handle SVG export - render the current scene and write it to a file
    fn handle_export_svg(&mut self) {
        let output_path = match rfd::FileDialog::new()
            .add_filter("SVG Image", &["svg"])
            .set_file_name("doping_chart.svg")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match self.export_to(&output_path) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
            }
            Err(e) => {
                error!("{:#}", e);
                self.control_panel.set_error(&format!("{:#}", e));
            }
        }
    }

    fn export_to(&self, path: &Path) -> anyhow::Result<()> {
        StaticChartRenderer::export_svg(self.chart_viewer.scene(), path)
            .with_context(|| format!("exporting chart to {}", path.display()))?;
        open::that(path).with_context(|| format!("opening {}", path.display()))?;
        Ok(())
    }

    fn handle_category_order_changed(&mut self) {
        let order = self.control_panel.category_order;
        info!("time axis order set to {:?}", order);
        self.chart_viewer.set_category_order(order);
    }
}

impl eframe::App for DopingChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Top panel - Title and controls
        egui::TopBottomPanel::top("control_panel").show(ctx, |ui| {
            let action = self.control_panel.show(ui);

            match action {
                ControlPanelAction::CategoryOrderChanged => self.handle_category_order_changed(),
                ControlPanelAction::ExportSvg => self.handle_export_svg(),
                ControlPanelAction::Retry => self.start_fetch(),
                ControlPanelAction::None => {}
            }
        });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ctx, ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_fetch(app: &mut DopingChartApp) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while app.is_loading && Instant::now() < deadline {
            app.check_load_results();
            thread::sleep(Duration::from_millis(20));
        }
    }

    #[test]
    fn failed_fetch_leaves_chart_blank_and_offers_retry() {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = ChartConfig {
            data_url: "http://127.0.0.1:1/cyclist-data.json".to_string(),
            request_timeout_secs: 2,
            ..ChartConfig::default()
        };
        let mut app = DopingChartApp::with_config(config);
        app.start_fetch();
        assert!(app.control_panel.loading);

        wait_for_fetch(&mut app);

        assert!(!app.is_loading);
        assert!(!app.control_panel.loading);
        assert!(app.control_panel.fetch_failed);
        assert!(app.control_panel.status.starts_with("Error: "));
        assert!(!app.control_panel.export_enabled);
        assert!(app.chart_viewer.scene().is_none());
        assert!(app.chart_viewer.dataset().is_empty());
    }
}
