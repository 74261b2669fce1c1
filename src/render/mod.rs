mod bar_path;
mod frame;
mod null_renderer;
mod primitives;

pub use bar_path::rounded_bar_path;
pub use frame::{BarFigure, BarRenderFrame, SilhouetteFigure};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, PathCommand, StrokeStyle};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `BarRenderFrame` so
/// drawing code remains isolated from layout and sizing logic.
pub trait Renderer {
    fn render(&mut self, frame: &BarRenderFrame) -> ChartResult<()>;
}
