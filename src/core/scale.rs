use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Continuous linear mapping from a data domain onto a pixel range.
///
/// The pixel range may be inverted (`range_start > range_end`), which is the
/// normal configuration for a Y axis where larger values sit higher on
/// screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 == domain.1 {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    /// Returns the data domain as `(min, max)`.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (
            self.domain_start.min(self.domain_end),
            self.domain_start.max(self.domain_end),
        )
    }

    /// Maps a data value to a pixel coordinate.
    ///
    /// Returns `None` for non-finite input or a non-finite mapped result, in
    /// which case layout code skips the affected bar defensively.
    #[must_use]
    pub fn position(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        let pixel = self.range_start + normalized * (self.range_end - self.range_start);
        pixel.is_finite().then_some(pixel)
    }

    /// Maps a pixel coordinate back into the data domain.
    #[must_use]
    pub fn value_at(self, pixel: f64) -> Option<f64> {
        if !pixel.is_finite() {
            return None;
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return None;
        }
        let normalized = (pixel - self.range_start) / range_span;
        let value = self.domain_start + normalized * (self.domain_end - self.domain_start);
        value.is_finite().then_some(value)
    }

    /// Pixel size of one data unit, used to convert pixel deltas back into
    /// data-space deltas during minimum-size expansion.
    #[must_use]
    pub fn unit_size(self) -> f64 {
        let span = self.domain_end - self.domain_start;
        ((self.range_end - self.range_start) / span).abs()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::LinearScale;

    #[test]
    fn inverted_range_maps_larger_values_higher_on_screen() {
        let scale = LinearScale::new((-10.0, 30.0), (200.0, 0.0)).expect("valid scale");
        assert_abs_diff_eq!(scale.position(0.0).unwrap(), 150.0);
        assert_abs_diff_eq!(scale.position(30.0).unwrap(), 0.0);
        assert_abs_diff_eq!(scale.position(-10.0).unwrap(), 200.0);
    }

    #[test]
    fn round_trip_recovers_the_value() {
        let scale = LinearScale::new((0.0, 50.0), (300.0, 20.0)).expect("valid scale");
        let px = scale.position(12.5).unwrap();
        assert_abs_diff_eq!(scale.value_at(px).unwrap(), 12.5, epsilon = 1e-9);
    }

    #[test]
    fn non_finite_input_yields_none() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("valid scale");
        assert!(scale.position(f64::NAN).is_none());
        assert!(scale.value_at(f64::INFINITY).is_none());
    }

    #[test]
    fn unit_size_is_pixel_size_of_one_data_unit() {
        let scale = LinearScale::new((-10.0, 30.0), (200.0, 0.0)).expect("valid scale");
        assert_abs_diff_eq!(scale.unit_size(), 5.0);
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        assert!(LinearScale::new((4.0, 4.0), (0.0, 10.0)).is_err());
        assert!(LinearScale::new((f64::NAN, 4.0), (0.0, 10.0)).is_err());
    }
}
