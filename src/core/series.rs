use serde::{Deserialize, Serialize};

use crate::core::SeriesValue;
use crate::render::Color;

/// Default Y-axis identifier used when a series does not name one.
pub const DEFAULT_Y_AXIS_ID: &str = "left";

/// Per-series visual overrides. Unset fields fall back to plot-level
/// configuration and the default palette.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesStyle {
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default)]
    pub stroke_width_px: Option<f64>,
    #[serde(default)]
    pub corner_radius_px: Option<f64>,
    /// Minimum rendered height hint for this series' bars, overriding the
    /// plot-level minimum.
    #[serde(default)]
    pub min_bar_height_px: Option<f64>,
}

/// A named bar data source assigned to the shared category axis.
///
/// `data` is index-aligned with category positions; `None` marks a missing
/// sample. Series are immutable during one layout pass; a new pass recomputes
/// everything from the current list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub id: String,
    pub data: Vec<Option<SeriesValue>>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub y_axis_id: Option<String>,
    #[serde(default)]
    pub style: SeriesStyle,
}

impl BarSeries {
    #[must_use]
    pub fn new(id: impl Into<String>, data: Vec<Option<SeriesValue>>) -> Self {
        Self {
            id: id.into(),
            data,
            stack_id: None,
            y_axis_id: None,
            style: SeriesStyle::default(),
        }
    }

    /// Convenience constructor for plain scalar data with no gaps.
    #[must_use]
    pub fn from_scalars(id: impl Into<String>, values: &[f64]) -> Self {
        Self::new(
            id,
            values
                .iter()
                .map(|v| Some(SeriesValue::Scalar(*v)))
                .collect(),
        )
    }

    #[must_use]
    pub fn with_stack_id(mut self, stack_id: impl Into<String>) -> Self {
        self.stack_id = Some(stack_id.into());
        self
    }

    #[must_use]
    pub fn with_y_axis_id(mut self, y_axis_id: impl Into<String>) -> Self {
        self.y_axis_id = Some(y_axis_id.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }

    /// Resolved Y-axis identifier.
    #[must_use]
    pub fn y_axis_id(&self) -> &str {
        self.y_axis_id.as_deref().unwrap_or(DEFAULT_Y_AXIS_ID)
    }

    /// Resolved stacking key. A series without an explicit `stack_id` is
    /// synthesized into its own singleton stack so ungrouped series render as
    /// independent bars through the same layout machinery.
    #[must_use]
    pub fn stack_key(&self) -> String {
        match &self.stack_id {
            Some(stack_id) => stack_id.clone(),
            None => format!("individual-{}", self.id),
        }
    }

    /// Sample at `category_index`, if present.
    #[must_use]
    pub fn value_at(&self, category_index: usize) -> Option<SeriesValue> {
        self.data.get(category_index).copied().flatten()
    }
}
