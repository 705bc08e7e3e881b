//! Chart Scene
//! Turns a dataset into a backend-independent description of the scatter
//! chart: axes, marks and legend in plot-area pixel coordinates (origin at
//! the top-left corner of the area inside the margins, y growing downwards).

use crate::charts::scale::{PointScale, TimeScale};
use crate::config::{CategoryOrder, ChartConfig, Margin, Palette, Rgb};
use crate::data::{year_start, Dataset, RaceRecord};
use chrono::NaiveDate;
use std::collections::HashMap;

pub const ALLEGATION_LABEL: &str = "Riders with doping allegations";
pub const CLEAN_LABEL: &str = "No doping allegations";

/// Legend geometry
pub const LEGEND_SWATCH: f32 = 18.0;
pub const LEGEND_SPACING: f32 = 4.0;
const LEGEND_OFFSET_X: f32 = 100.0;
const LEGEND_OFFSET_Y: f32 = 150.0;

/// Whether a mark belongs to a rider with a doping allegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkClass {
    Allegation,
    Clean,
}

impl MarkClass {
    pub fn of(record: &RaceRecord) -> Self {
        if record.has_allegation() {
            MarkClass::Allegation
        } else {
            MarkClass::Clean
        }
    }

    pub fn color(self, palette: &Palette) -> Rgb {
        match self {
            MarkClass::Allegation => palette.allegation,
            MarkClass::Clean => palette.clean,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarkClass::Allegation => ALLEGATION_LABEL,
            MarkClass::Clean => CLEAN_LABEL,
        }
    }
}

/// Size of the outer surface and its margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f32,
    pub height: f32,
    pub margin: Margin,
}

impl ChartLayout {
    pub fn inner_width(&self) -> f32 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f32 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub ticks: Vec<Tick>,
}

/// One rendered point.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    /// Index of the record in the dataset
    pub record: usize,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub class: MarkClass,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub class: MarkClass,
    pub color: Rgb,
    pub label: &'static str,
    /// Top-left corner of the swatch
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

/// Complete description of one rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub layout: ChartLayout,
    pub x_domain: (NaiveDate, NaiveDate),
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub marks: Vec<Mark>,
    pub legend: Legend,
}

impl ChartScene {
    pub fn mark_for_record(&self, record: usize) -> Option<&Mark> {
        self.marks.iter().find(|m| m.record == record)
    }

    pub fn marks_of(&self, class: MarkClass) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(move |m| m.class == class)
    }
}

/// Builds a [`ChartScene`] from a dataset.
pub struct ChartRenderer {
    config: ChartConfig,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn layout(&self) -> ChartLayout {
        ChartLayout {
            width: self.config.width,
            height: self.config.height,
            margin: self.config.margin,
        }
    }

    /// Render the dataset. `None` for an empty dataset: no axes, marks or legend.
    pub fn render(&self, dataset: &Dataset) -> Option<ChartScene> {
        let (min_year, max_year) = dataset.year_range()?;
        let layout = self.layout();
        let width = layout.inner_width();
        let height = layout.inner_height();

        // One year of padding on the left
        let x_scale = TimeScale::new(
            (year_start(min_year - 1)?, year_start(max_year)?),
            (0.0, width),
        );
        let y_scale = PointScale::new(
            time_categories(dataset, self.config.category_order),
            (height, 0.0),
        );

        let x_axis = Axis {
            ticks: x_scale
                .yearly_ticks()
                .into_iter()
                .map(|(date, label)| Tick {
                    position: x_scale.position(date),
                    label,
                })
                .collect(),
        };
        let y_axis = Axis {
            ticks: y_scale
                .ticks()
                .into_iter()
                .map(|(position, label)| Tick { position, label })
                .collect(),
        };

        let palette = &self.config.palette;
        let marks = dataset
            .records()
            .iter()
            .enumerate()
            .filter_map(|(i, record)| {
                let class = MarkClass::of(record);
                Some(Mark {
                    record: i,
                    x: x_scale.position(record.year_start()?),
                    y: y_scale.position(&record.time_label())?,
                    radius: self.config.point_radius,
                    class,
                    color: class.color(palette),
                })
            })
            .collect();

        Some(ChartScene {
            layout,
            x_domain: x_scale.domain(),
            x_axis,
            y_axis,
            marks,
            legend: self.legend(width, height),
        })
    }

    fn legend(&self, width: f32, height: f32) -> Legend {
        let x = width - LEGEND_OFFSET_X;
        let y = height - LEGEND_OFFSET_Y;

        let entries = [MarkClass::Allegation, MarkClass::Clean]
            .into_iter()
            .enumerate()
            .map(|(i, class)| LegendEntry {
                class,
                color: class.color(&self.config.palette),
                label: class.label(),
                x,
                y: y + i as f32 * (LEGEND_SWATCH + LEGEND_SPACING),
            })
            .collect();

        Legend { entries }
    }
}

/// Distinct time labels in axis order.
pub fn time_categories(dataset: &Dataset, order: CategoryOrder) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    let mut fastest: HashMap<String, f64> = HashMap::new();

    for record in dataset.records() {
        let label = record.time_label();
        match fastest.get_mut(&label) {
            Some(seconds) => *seconds = seconds.min(record.seconds),
            None => {
                fastest.insert(label.clone(), record.seconds);
                labels.push(label);
            }
        }
    }

    if order == CategoryOrder::Ascending {
        labels.sort_by(|a, b| {
            fastest[a]
                .partial_cmp(&fastest[b])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.cmp(b))
        });
    }

    labels
}

/// Index of the nearest point within `radius` of `pointer`.
pub fn nearest_within(
    points: impl IntoIterator<Item = (usize, [f32; 2])>,
    pointer: [f32; 2],
    radius: f32,
) -> Option<usize> {
    let max_dist2 = radius * radius;
    points
        .into_iter()
        .map(|(i, [x, y])| {
            let dx = x - pointer[0];
            let dy = y - pointer[1];
            (i, dx * dx + dy * dy)
        })
        .filter(|&(_, d2)| d2 <= max_dist2)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}
