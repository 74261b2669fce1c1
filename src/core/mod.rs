pub mod band_scale;
pub mod grouping;
pub mod scale;
pub mod series;
pub mod slots;
pub mod stack_layout;
pub mod types;

pub use band_scale::{AxisScale, BandScale};
pub use grouping::{StackGroup, StackGroupKey, group_stack_series};
pub use scale::LinearScale;
pub use series::{BarSeries, DEFAULT_Y_AXIS_ID, SeriesStyle};
pub use slots::{CategorySlot, stack_group_slots};
pub use stack_layout::{
    BarGeometry, StackEntry, StackLayout, StackRect, StackSizing, layout_bar_stack,
    stack_baseline,
};
pub use types::{DrawRect, SeriesValue};
