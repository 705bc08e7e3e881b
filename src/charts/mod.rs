//! Charts module - Scene building, interactive and static rendering

mod plotter;
mod renderer;
mod scale;
mod scene;
mod tooltip;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use scene::{ChartRenderer, ChartScene};
pub use tooltip::Tooltip;
