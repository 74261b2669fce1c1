use serde::{Deserialize, Serialize};

use crate::core::{DrawRect, StackSizing};
use crate::error::{ChartError, ChartResult};

/// Plot-level layout configuration.
///
/// All spacing values are resolved pixels: abstract theme spacing units are
/// converted by the host before they reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPlotConfig {
    pub draw_rect: DrawRect,
    /// Fraction of each category band given to gaps between competing
    /// stacks (0..=1).
    #[serde(default)]
    pub bar_padding: f64,
    /// Pixel gap between successive same-side scalar bars in a stack.
    #[serde(default)]
    pub stack_gap_px: f64,
    /// Minimum rendered height for an individual bar.
    #[serde(default)]
    pub bar_min_height_px: f64,
    /// Minimum rendered height for a whole stack.
    #[serde(default)]
    pub stack_min_height_px: f64,
    /// Forces silhouette rounding even where a stack touches the baseline.
    #[serde(default)]
    pub round_baseline: bool,
    /// Corner radius applied to rounded bar ends.
    #[serde(default)]
    pub corner_radius_px: f64,
}

impl BarPlotConfig {
    /// Creates a validated config with no gaps, minimums, or rounding.
    pub fn new(draw_rect: DrawRect) -> ChartResult<Self> {
        Self {
            draw_rect,
            bar_padding: 0.0,
            stack_gap_px: 0.0,
            bar_min_height_px: 0.0,
            stack_min_height_px: 0.0,
            round_baseline: false,
            corner_radius_px: 0.0,
        }
        .validate()
    }

    #[must_use]
    pub fn with_bar_padding(mut self, bar_padding: f64) -> Self {
        self.bar_padding = bar_padding;
        self
    }

    #[must_use]
    pub fn with_stack_gap(mut self, stack_gap_px: f64) -> Self {
        self.stack_gap_px = stack_gap_px;
        self
    }

    #[must_use]
    pub fn with_bar_min_height(mut self, bar_min_height_px: f64) -> Self {
        self.bar_min_height_px = bar_min_height_px;
        self
    }

    #[must_use]
    pub fn with_stack_min_height(mut self, stack_min_height_px: f64) -> Self {
        self.stack_min_height_px = stack_min_height_px;
        self
    }

    #[must_use]
    pub fn with_round_baseline(mut self, round_baseline: bool) -> Self {
        self.round_baseline = round_baseline;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius_px: f64) -> Self {
        self.corner_radius_px = corner_radius_px;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.bar_padding.is_finite() || !(0.0..=1.0).contains(&self.bar_padding) {
            return Err(ChartError::InvalidData(
                "bar padding must be finite and within [0, 1]".to_owned(),
            ));
        }
        for (name, value) in [
            ("stack gap", self.stack_gap_px),
            ("bar min height", self.bar_min_height_px),
            ("stack min height", self.stack_min_height_px),
            ("corner radius", self.corner_radius_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    /// Per-stack sizing view of this config.
    #[must_use]
    pub fn stack_sizing(self) -> StackSizing {
        StackSizing {
            stack_gap_px: self.stack_gap_px,
            bar_min_height_px: self.bar_min_height_px,
            stack_min_height_px: self.stack_min_height_px,
            round_baseline: self.round_baseline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BarPlotConfig;
    use crate::core::DrawRect;

    fn rect() -> DrawRect {
        DrawRect::new(0.0, 0.0, 400.0, 200.0).expect("valid rect")
    }

    #[test]
    fn builder_round_trips_through_validation() {
        let config = BarPlotConfig::new(rect())
            .expect("valid config")
            .with_bar_padding(0.25)
            .with_stack_gap(2.0)
            .validate()
            .expect("still valid");
        assert_eq!(config.bar_padding, 0.25);
        assert_eq!(config.stack_gap_px, 2.0);
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let config = BarPlotConfig::new(rect())
            .expect("valid config")
            .with_bar_min_height(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn padding_above_one_is_rejected() {
        let config = BarPlotConfig::new(rect())
            .expect("valid config")
            .with_bar_padding(1.5);
        assert!(config.validate().is_err());
    }
}
