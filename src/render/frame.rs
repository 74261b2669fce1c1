use serde::{Deserialize, Serialize};

use crate::core::DrawRect;
use crate::render::{Color, PathCommand, StrokeStyle};

/// One filled bar outline ready for a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarFigure {
    pub series_id: String,
    pub category_index: usize,
    pub path: Vec<PathCommand>,
    pub fill: Color,
    #[serde(default)]
    pub stroke: Option<StrokeStyle>,
}

/// Stack silhouette outline, used by backends as a clip path around one
/// stack column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilhouetteFigure {
    pub stack_id: String,
    pub category_index: usize,
    pub path: Vec<PathCommand>,
}

/// Backend-agnostic scene for one bar-plot draw pass.
///
/// Fully materialized and deterministic so drawing code stays isolated from
/// layout logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRenderFrame {
    pub draw_rect: DrawRect,
    pub figures: Vec<BarFigure>,
    pub silhouettes: Vec<SilhouetteFigure>,
}

impl BarRenderFrame {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}
