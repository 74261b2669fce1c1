use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Categorical scale mapping discrete category indices onto pixel bands of
/// uniform width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    range_start: f64,
    range_end: f64,
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    /// Creates a band scale covering `count` categories over `range`, with no
    /// inner or outer padding.
    pub fn new(count: usize, range: (f64, f64)) -> ChartResult<Self> {
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            range_start: range.0,
            range_end: range.1,
            count,
            padding_inner: 0.0,
            padding_outer: 0.0,
        })
    }

    /// Sets inner and outer padding in band-width units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> ChartResult<Self> {
        if !inner.is_finite() || !outer.is_finite() || inner < 0.0 || outer < 0.0 {
            return Err(ChartError::InvalidData(
                "band scale padding must be finite and >= 0".to_owned(),
            ));
        }
        self.padding_inner = inner;
        self.padding_outer = outer;
        Ok(self)
    }

    /// Returns the number of categories.
    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    /// Returns the fixed per-category pixel width.
    #[must_use]
    pub fn bandwidth(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let span = (self.range_end - self.range_start).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the left pixel edge of the band at `index`, or `None` when the
    /// index is outside the category domain.
    #[must_use]
    pub fn position(self, index: usize) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        let bandwidth = self.bandwidth();
        let step = bandwidth * (1.0 + self.padding_inner);
        let start = self.range_start.min(self.range_end);
        Some(start + bandwidth * self.padding_outer + step * index as f64)
    }
}

/// X-axis scale input seam: the stack-group positioner requires a band
/// scale and refuses to lay out against a continuous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisScale {
    Band(BandScale),
    Linear(LinearScale),
}

impl AxisScale {
    /// Categorical-scale predicate from the scale contract.
    #[must_use]
    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Band(_))
    }

    /// Returns the band scale, or a configuration error for continuous
    /// scales.
    pub fn as_band(self) -> ChartResult<BandScale> {
        match self {
            Self::Band(band) => Ok(band),
            Self::Linear(_) => Err(ChartError::NonCategoricalScale),
        }
    }
}

impl From<BandScale> for AxisScale {
    fn from(scale: BandScale) -> Self {
        Self::Band(scale)
    }
}

impl From<LinearScale> for AxisScale {
    fn from(scale: LinearScale) -> Self {
        Self::Linear(scale)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{AxisScale, BandScale};
    use crate::core::LinearScale;
    use crate::error::ChartError;

    #[test]
    fn unpadded_bands_tile_the_range() {
        let scale = BandScale::new(4, (0.0, 400.0)).expect("valid scale");
        assert_abs_diff_eq!(scale.bandwidth(), 100.0);
        assert_abs_diff_eq!(scale.position(0).unwrap(), 0.0);
        assert_abs_diff_eq!(scale.position(3).unwrap(), 300.0);
        assert!(scale.position(4).is_none());
    }

    #[test]
    fn padding_shrinks_bands_and_offsets_the_first_edge() {
        let scale = BandScale::new(2, (0.0, 110.0))
            .expect("valid scale")
            .with_padding(0.1, 0.0)
            .expect("valid padding");
        // 2 bands + one inner gap of 0.1 band widths: 2.1 units over 110px.
        let bandwidth = scale.bandwidth();
        assert_abs_diff_eq!(bandwidth, 110.0 / 2.1, epsilon = 1e-9);
        assert_abs_diff_eq!(
            scale.position(1).unwrap(),
            bandwidth * 1.1,
            epsilon = 1e-9
        );
    }

    #[test]
    fn continuous_axis_scale_is_refused_as_band() {
        let linear = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("valid scale");
        let axis = AxisScale::from(linear);
        assert!(!axis.is_categorical());
        assert!(matches!(
            axis.as_band(),
            Err(ChartError::NonCategoricalScale)
        ));
    }
}
