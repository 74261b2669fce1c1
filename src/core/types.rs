use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Drawing-area rectangle in pixel coordinates, supplied by the surrounding
/// chart layout. Pixel Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> ChartResult<Self> {
        if !x.is_finite() || !y.is_finite() || !width.is_finite() || !height.is_finite() {
            return Err(ChartError::InvalidDrawRect { width, height });
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidDrawRect { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Top edge in pixel Y.
    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    /// Bottom edge in pixel Y.
    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Clamps a pixel Y coordinate into the rect's vertical extent.
    #[must_use]
    pub fn clamp_y(self, pixel_y: f64) -> f64 {
        pixel_y.clamp(self.top(), self.bottom())
    }
}

/// One series sample at one category index.
///
/// Scalars participate in baseline-relative stacking and receive the
/// stack-gap offset. Spans are externally pre-stacked ranges: they are used
/// as-is, never gap-adjusted, and never feed the running stack totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SeriesValue {
    Scalar(f64),
    Span(f64, f64),
}

impl SeriesValue {
    /// Returns `true` when the value came in as a plain number and therefore
    /// takes part in stacking and gap placement.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Span(a, b) => a.is_finite() && b.is_finite(),
        }
    }
}

impl From<f64> for SeriesValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<(f64, f64)> for SeriesValue {
    fn from(value: (f64, f64)) -> Self {
        Self::Span(value.0, value.1)
    }
}
