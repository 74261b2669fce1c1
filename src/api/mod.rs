mod bar_plot;
mod layout_snapshot;
mod plot_config;

pub use bar_plot::{BarPlot, BarPlotLayout, StackGroupLayout};
pub use layout_snapshot::{
    LAYOUT_SNAPSHOT_VERSION, LayoutSnapshot, layout_from_json, layout_to_json,
};
pub use plot_config::BarPlotConfig;
