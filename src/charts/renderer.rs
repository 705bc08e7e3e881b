//! Static Chart Renderer
//! Writes a rendered [`ChartScene`] as an SVG document with plotters.
//!
//! Layout matches the interactive view:
//! 1. Plot area inset by the scene margins
//! 2. Bottom axis: one tick per year
//! 3. Left axis: one tick per time category
//! 4. One circle per mark, legend swatches in the lower right

use crate::charts::scene::{ChartScene, LEGEND_SPACING, LEGEND_SWATCH};
use crate::config::Rgb;
use log::info;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

const TICK_SIZE: i32 = 6;
const TICK_PADDING: i32 = 3;
const AXIS_FONT_SIZE: i32 = 10;
const LEGEND_FONT_SIZE: i32 = 10;
const MARK_OPACITY: f64 = 0.8;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: no chart has been rendered")]
    EmptyScene,
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Rgb> for RGBColor {
    fn from(rgb: Rgb) -> Self {
        RGBColor(rgb.0, rgb.1, rgb.2)
    }
}

fn draw_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the scene to an SVG string.
    pub fn render_svg(scene: &ChartScene) -> Result<String, ExportError> {
        let layout = scene.layout;
        let inner_w = layout.inner_width().round() as i32;
        let inner_h = layout.inner_height().round() as i32;
        let axis_style = BLACK.stroke_width(1);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(
                &mut svg,
                (layout.width.round() as u32, layout.height.round() as u32),
            )
            .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let area = root.margin(
                layout.margin.top.round() as i32,
                layout.margin.bottom.round() as i32,
                layout.margin.left.round() as i32,
                layout.margin.right.round() as i32,
            );

            // Bottom axis
            area.draw(&PathElement::new(
                vec![(0, inner_h), (inner_w, inner_h)],
                axis_style,
            ))
            .map_err(draw_err)?;
            let year_font = ("sans-serif", AXIS_FONT_SIZE)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));
            for tick in &scene.x_axis.ticks {
                let x = tick.position.round() as i32;
                area.draw(&PathElement::new(
                    vec![(x, inner_h), (x, inner_h + TICK_SIZE)],
                    axis_style,
                ))
                .map_err(draw_err)?;
                area.draw(&Text::new(
                    tick.label.clone(),
                    (x, inner_h + TICK_SIZE + TICK_PADDING),
                    year_font.clone(),
                ))
                .map_err(draw_err)?;
            }

            // Left axis
            area.draw(&PathElement::new(vec![(0, 0), (0, inner_h)], axis_style))
                .map_err(draw_err)?;
            let time_font = ("sans-serif", AXIS_FONT_SIZE)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Right, VPos::Center));
            for tick in &scene.y_axis.ticks {
                let y = tick.position.round() as i32;
                area.draw(&PathElement::new(vec![(-TICK_SIZE, y), (0, y)], axis_style))
                    .map_err(draw_err)?;
                area.draw(&Text::new(
                    tick.label.clone(),
                    (-TICK_SIZE - TICK_PADDING, y),
                    time_font.clone(),
                ))
                .map_err(draw_err)?;
            }

            // Marks
            for mark in &scene.marks {
                let color = RGBColor::from(mark.color).mix(MARK_OPACITY);
                area.draw(&Circle::new(
                    (mark.x.round() as i32, mark.y.round() as i32),
                    mark.radius.round() as i32,
                    color.filled(),
                ))
                .map_err(draw_err)?;
            }

            // Legend
            let swatch = LEGEND_SWATCH.round() as i32;
            let legend_font = ("sans-serif", LEGEND_FONT_SIZE)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Center));
            for entry in &scene.legend.entries {
                let x = entry.x.round() as i32;
                let y = entry.y.round() as i32;
                area.draw(&Rectangle::new(
                    [(x, y), (x + swatch, y + swatch)],
                    RGBColor::from(entry.color).filled(),
                ))
                .map_err(draw_err)?;
                area.draw(&Text::new(
                    entry.label,
                    (x + swatch + LEGEND_SPACING.round() as i32, y + swatch / 2),
                    legend_font.clone(),
                ))
                .map_err(draw_err)?;
            }

            root.present().map_err(draw_err)?;
        }

        Ok(svg)
    }

    /// Render and write the scene to `path`.
    pub fn export_svg(scene: Option<&ChartScene>, path: &Path) -> Result<(), ExportError> {
        let scene = scene.ok_or(ExportError::EmptyScene)?;
        let svg = Self::render_svg(scene)?;
        std::fs::write(path, svg)?;
        info!("exported chart with {} marks to {}", scene.marks.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::scene::tests::sample_dataset;
    use crate::charts::scene::{ChartRenderer, ALLEGATION_LABEL, CLEAN_LABEL};
    use crate::config::ChartConfig;

    fn scene() -> ChartScene {
        ChartRenderer::new(ChartConfig::default())
            .render(&sample_dataset())
            .unwrap()
    }

    #[test]
    fn svg_has_one_circle_per_mark() {
        let scene = scene();
        let svg = StaticChartRenderer::render_svg(&scene).unwrap();
        assert_eq!(svg.matches("<circle").count(), scene.marks.len());
    }

    #[test]
    fn svg_has_surface_size_and_legend() {
        let svg = StaticChartRenderer::render_svg(&scene()).unwrap();
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"500\""));
        assert!(svg.contains(ALLEGATION_LABEL));
        assert!(svg.contains(CLEAN_LABEL));
    }

    #[test]
    fn svg_labels_axes() {
        let svg = StaticChartRenderer::render_svg(&scene()).unwrap();
        assert!(svg.contains("1994"));
        assert!(svg.contains("2015"));
        assert!(svg.contains("36:50"));
        assert!(svg.contains("39:46"));
    }

    #[test]
    fn svg_uses_class_colors() {
        let svg = StaticChartRenderer::render_svg(&scene())
            .unwrap()
            .to_uppercase();
        assert!(svg.contains("#4682B4"));
        assert!(svg.contains("#FFA500"));
    }

    #[test]
    fn export_without_scene_is_rejected() {
        let path = std::env::temp_dir().join("doping_chart_never_written.svg");
        let err = StaticChartRenderer::export_svg(None, &path).unwrap_err();
        assert!(matches!(err, ExportError::EmptyScene));
        assert!(!path.exists());
    }

    #[test]
    fn export_writes_file() {
        let path = std::env::temp_dir().join(format!("doping_chart_{}.svg", std::process::id()));
        StaticChartRenderer::export_svg(Some(&scene()), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
        std::fs::remove_file(&path).unwrap();
    }
}
