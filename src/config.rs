//! Chart Configuration
//! Fixed surface geometry, palette and data source for the chart.

/// Source of the cyclist dataset.
pub const DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/cyclist-data.json";

/// Plain RGB color, converted to the egui / plotters color types at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const STEEL_BLUE: Rgb = Rgb(70, 130, 180);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
}

/// Margins around the inner plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 30.0,
            bottom: 30.0,
            left: 60.0,
        }
    }
}

/// Colors for the two mark classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Riders with a doping allegation
    pub allegation: Rgb,
    /// Riders without one
    pub clean: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            allegation: Rgb::STEEL_BLUE,
            clean: Rgb::ORANGE,
        }
    }
}

/// Order of the categories on the time (y) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryOrder {
    /// Sorted by the underlying seconds value
    #[default]
    Ascending,
    /// Order in which each label first appears in the dataset
    FirstOccurrence,
}

/// Everything the renderer and the loader need to know up front.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub data_url: String,
    pub request_timeout_secs: u64,
    /// Outer surface width
    pub width: f32,
    /// Outer surface height
    pub height: f32,
    pub margin: Margin,
    pub point_radius: f32,
    pub palette: Palette,
    pub category_order: CategoryOrder,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_url: DATA_URL.to_string(),
            request_timeout_secs: 30,
            width: 800.0,
            height: 500.0,
            margin: Margin::default(),
            point_radius: 3.0,
            palette: Palette::default(),
            category_order: CategoryOrder::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_chart() {
        let config = ChartConfig::default();
        assert_eq!((config.width, config.height), (800.0, 500.0));
        assert_eq!(config.margin.left, 60.0);
        assert_eq!(config.palette.allegation, Rgb::STEEL_BLUE);
        assert_eq!(config.palette.clean, Rgb::ORANGE);
        assert_eq!(config.category_order, CategoryOrder::Ascending);
    }
}
