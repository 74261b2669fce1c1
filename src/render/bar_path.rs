use crate::render::PathCommand;

/// Builds the closed outline of one bar rectangle with optionally rounded
/// top and bottom edges.
///
/// Pure path geometry: stacking logic never reaches this level. Returns
/// `None` for degenerate sizes (`width <= 0` or `height <= 0`), in which
/// case the caller renders nothing. The corner radius is clamped to half the
/// smaller rectangle dimension.
#[must_use]
pub fn rounded_bar_path(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    corner_radius_px: f64,
    round_top: bool,
    round_bottom: bool,
) -> Option<Vec<PathCommand>> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let radius = corner_radius_px
        .max(0.0)
        .min(width / 2.0)
        .min(height / 2.0);
    let top_radius = if round_top { radius } else { 0.0 };
    let bottom_radius = if round_bottom { radius } else { 0.0 };

    let left = x;
    let right = x + width;
    let top = y;
    let bottom = y + height;

    // Clockwise from the left edge just below the top-left corner.
    let mut path = Vec::with_capacity(10);
    path.push(PathCommand::MoveTo {
        x: left,
        y: top + top_radius,
    });
    if top_radius > 0.0 {
        path.push(PathCommand::QuadTo {
            cx: left,
            cy: top,
            x: left + top_radius,
            y: top,
        });
        path.push(PathCommand::LineTo {
            x: right - top_radius,
            y: top,
        });
        path.push(PathCommand::QuadTo {
            cx: right,
            cy: top,
            x: right,
            y: top + top_radius,
        });
    } else {
        path.push(PathCommand::LineTo { x: left, y: top });
        path.push(PathCommand::LineTo { x: right, y: top });
    }
    path.push(PathCommand::LineTo {
        x: right,
        y: bottom - bottom_radius,
    });
    if bottom_radius > 0.0 {
        path.push(PathCommand::QuadTo {
            cx: right,
            cy: bottom,
            x: right - bottom_radius,
            y: bottom,
        });
        path.push(PathCommand::LineTo {
            x: left + bottom_radius,
            y: bottom,
        });
        path.push(PathCommand::QuadTo {
            cx: left,
            cy: bottom,
            x: left,
            y: bottom - bottom_radius,
        });
    } else {
        path.push(PathCommand::LineTo { x: right, y: bottom });
        path.push(PathCommand::LineTo { x: left, y: bottom });
    }
    path.push(PathCommand::Close);

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::rounded_bar_path;
    use crate::render::PathCommand;

    #[test]
    fn degenerate_sizes_yield_no_path() {
        assert!(rounded_bar_path(0.0, 0.0, 0.0, 10.0, 2.0, true, true).is_none());
        assert!(rounded_bar_path(0.0, 0.0, 10.0, -1.0, 2.0, true, true).is_none());
    }

    #[test]
    fn square_bar_has_no_curve_segments() {
        let path = rounded_bar_path(0.0, 0.0, 10.0, 20.0, 4.0, false, false).expect("path");
        assert!(
            path.iter()
                .all(|cmd| !matches!(cmd, PathCommand::QuadTo { .. }))
        );
        assert!(matches!(path.last(), Some(PathCommand::Close)));
    }

    #[test]
    fn radius_is_clamped_to_half_the_smaller_dimension() {
        let path = rounded_bar_path(0.0, 0.0, 6.0, 100.0, 50.0, true, true).expect("path");
        let starts_at = path.first().expect("move");
        // Clamped to width / 2 = 3.
        assert!(matches!(starts_at, PathCommand::MoveTo { x, y } if *x == 0.0 && *y == 3.0));
    }

    #[test]
    fn one_sided_rounding_curves_only_that_edge() {
        let path = rounded_bar_path(0.0, 0.0, 10.0, 20.0, 2.0, true, false).expect("path");
        let quads = path
            .iter()
            .filter(|cmd| matches!(cmd, PathCommand::QuadTo { .. }))
            .count();
        assert_eq!(quads, 2);
    }
}
