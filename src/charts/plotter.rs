//! Chart Plotter Module
//! Interactive scatter chart drawn from a [`ChartScene`] using egui_plot.
//!
//! Plot coordinates are the scene's plot-area pixels with y flipped, so the
//! scene stays the single source of truth for positions and ticks.

use crate::charts::scene::{nearest_within, ChartScene, MarkClass};
use crate::charts::tooltip::Tooltip;
use crate::config::Rgb;
use crate::data::Dataset;
use egui::{Color32, RichText};
use egui_plot::{Corner, GridMark, Legend, MarkerShape, Plot, PlotPoint, Points};

/// Opacity of marks that are not hovered.
pub const MARK_OPACITY: f32 = 0.8;
/// How far from a mark's center the pointer still counts as over it.
pub const HOVER_RADIUS: f32 = 6.0;

const TOOLTIP_FILL: Color32 = Color32::from_rgb(96, 125, 139); // Blue Grey

impl From<Rgb> for Color32 {
    fn from(rgb: Rgb) -> Self {
        Color32::from_rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Draws the scatter chart and routes pointer events to the tooltip.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Grid marks at the given positions, all with the same weight.
    fn fixed_marks(positions: &[f64], span: f64) -> Vec<GridMark> {
        positions
            .iter()
            .map(|&value| GridMark {
                value,
                step_size: span,
            })
            .collect()
    }

    fn label_at(ticks: &[(f64, String)], value: f64) -> String {
        ticks
            .iter()
            .find(|(position, _)| (position - value).abs() < 0.5)
            .map(|(_, label)| label.clone())
            .unwrap_or_default()
    }

    /// Draw the scene. Hover state is written into `tooltip`; returns whether
    /// the plot was clicked.
    pub fn draw_scatter_chart(
        ui: &mut egui::Ui,
        scene: &ChartScene,
        dataset: &Dataset,
        tooltip: &mut Tooltip,
    ) -> bool {
        let inner_w = scene.layout.inner_width() as f64;
        let inner_h = scene.layout.inner_height() as f64;
        let to_plot = move |x: f32, y: f32| [x as f64, inner_h - y as f64];

        let x_ticks: Vec<(f64, String)> = scene
            .x_axis
            .ticks
            .iter()
            .map(|t| (t.position as f64, t.label.clone()))
            .collect();
        let y_ticks: Vec<(f64, String)> = scene
            .y_axis
            .ticks
            .iter()
            .map(|t| (inner_h - t.position as f64, t.label.clone()))
            .collect();
        let x_positions: Vec<f64> = x_ticks.iter().map(|(p, _)| *p).collect();
        let y_positions: Vec<f64> = y_ticks.iter().map(|(p, _)| *p).collect();

        Plot::new("doping_scatter")
            .width(scene.layout.width)
            .height(scene.layout.height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_x(false)
            .show_y(false)
            .include_x(0.0)
            .include_x(inner_w)
            .include_y(0.0)
            .include_y(inner_h)
            .x_axis_label("Year")
            .y_axis_label("Time in Minutes")
            .legend(Legend::default().position(Corner::RightBottom))
            .x_grid_spacer(move |_input| Self::fixed_marks(&x_positions, inner_w))
            .y_grid_spacer(move |_input| Self::fixed_marks(&y_positions, inner_h))
            .x_axis_formatter(move |mark, _range| Self::label_at(&x_ticks, mark.value))
            .y_axis_formatter(move |mark, _range| Self::label_at(&y_ticks, mark.value))
            .show(ui, |plot_ui| {
                for class in [MarkClass::Allegation, MarkClass::Clean] {
                    let points: Vec<[f64; 2]> =
                        scene.marks_of(class).map(|m| to_plot(m.x, m.y)).collect();
                    let color = scene
                        .legend
                        .entries
                        .iter()
                        .find(|e| e.class == class)
                        .map(|e| Color32::from(e.color))
                        .unwrap_or(Color32::GRAY);

                    plot_ui.points(
                        Points::new(points)
                            .shape(MarkerShape::Circle)
                            .radius(scene.marks.first().map_or(3.0, |m| m.radius))
                            .color(color.gamma_multiply(MARK_OPACITY))
                            .name(class.label()),
                    );
                }

                // Hit test in screen space so the radius is in pixels
                let pointer = plot_ui.response().hover_pos();
                let hit = pointer.and_then(|p| {
                    let positions = scene.marks.iter().map(|m| {
                        let [x, y] = to_plot(m.x, m.y);
                        let screen = plot_ui.screen_from_plot(PlotPoint::new(x, y));
                        (m.record, [screen.x, screen.y])
                    });
                    nearest_within(positions, [p.x, p.y], HOVER_RADIUS)
                });
                let pointer = pointer.map_or([0.0, 0.0], |p| [p.x, p.y]);
                tooltip.track(hit.and_then(|i| dataset.get(i).map(|r| (i, r))), pointer);

                if let Some(mark) = tooltip
                    .highlighted()
                    .and_then(|i| scene.mark_for_record(i))
                {
                    let center = to_plot(mark.x, mark.y);
                    plot_ui.points(
                        Points::new(vec![center])
                            .shape(MarkerShape::Circle)
                            .radius(mark.radius)
                            .color(Color32::from(mark.color)),
                    );
                    plot_ui.points(
                        Points::new(vec![center])
                            .shape(MarkerShape::Circle)
                            .radius(mark.radius + 1.5)
                            .filled(false)
                            .color(Color32::WHITE),
                    );
                }
            })
            .response
            .clicked()
    }

    /// Draw the tooltip overlay next to the pointer when visible.
    pub fn draw_tooltip(ctx: &egui::Context, tooltip: &Tooltip) {
        if !tooltip.is_visible() {
            return;
        }

        let [x, y] = tooltip.position();
        egui::Area::new(egui::Id::new("tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(egui::pos2(x, y))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(TOOLTIP_FILL.gamma_multiply(tooltip.opacity()))
                    .rounding(10.0)
                    .inner_margin(5.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(tooltip.content())
                                .size(12.0)
                                .color(Color32::WHITE.gamma_multiply(tooltip.opacity())),
                        );
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_palette_colors() {
        assert_eq!(Color32::from(Rgb::STEEL_BLUE), Color32::from_rgb(70, 130, 180));
        assert_eq!(Color32::from(Rgb::ORANGE), Color32::from_rgb(255, 165, 0));
    }

    #[test]
    fn labels_only_exact_tick_positions() {
        let ticks = vec![(0.0, "1994".to_string()), (32.3, "1995".to_string())];
        assert_eq!(ChartPlotter::label_at(&ticks, 32.3), "1995");
        assert_eq!(ChartPlotter::label_at(&ticks, 16.0), "");
    }

    #[test]
    fn fixed_marks_share_one_step_size() {
        let marks = ChartPlotter::fixed_marks(&[0.0, 10.0, 20.0], 20.0);
        assert_eq!(marks.len(), 3);
        assert!(marks.iter().all(|m| m.step_size == 20.0));
        assert_eq!(marks[1].value, 10.0);
    }
}
