use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CategorySlot, DrawRect, LinearScale, SeriesValue};

/// Tolerance for edge-coincidence checks on pixel coordinates.
const EDGE_EPSILON: f64 = 1e-6;

/// Sizing configuration for one stack layout, in resolved pixels.
///
/// Spacing values arrive already resolved from abstract theme units; this
/// engine only ever sees pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StackSizing {
    /// Pixel gap inserted between successive same-side scalar bars.
    pub stack_gap_px: f64,
    /// Minimum rendered height for an individual bar.
    pub bar_min_height_px: f64,
    /// Minimum rendered height for the whole stack.
    pub stack_min_height_px: f64,
    /// Forces silhouette rounding even where the stack touches the baseline.
    pub round_baseline: bool,
}

/// One series' contribution to a stack at one category index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackEntry {
    pub series_index: usize,
    pub value: SeriesValue,
    /// Per-series minimum-height hint overriding the stack-level minimum.
    pub min_height_px: Option<f64>,
}

impl StackEntry {
    #[must_use]
    pub fn new(series_index: usize, value: SeriesValue) -> Self {
        Self {
            series_index,
            value,
            min_height_px: None,
        }
    }

    #[must_use]
    pub fn with_min_height(mut self, min_height_px: f64) -> Self {
        self.min_height_px = Some(min_height_px);
        self
    }
}

/// Final pixel geometry for one bar of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub series_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Data-space span after stacking (ascending).
    pub value_bottom: f64,
    pub value_top: f64,
    pub round_top: bool,
    pub round_bottom: bool,
}

/// Union rectangle enclosing all bars of one stack at one category, used for
/// clip-path / silhouette rendering. Always derived from post-correction bar
/// positions and clamped to the drawing rect's vertical extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub round_top: bool,
    pub round_bottom: bool,
}

/// Layout result for one stack group at one category index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackLayout {
    /// Pixel Y of the shared zero reference all bars grow away from.
    pub baseline: f64,
    pub bars: SmallVec<[BarGeometry; 4]>,
    pub bounds: Option<StackRect>,
}

/// Sign side of a bar relative to the zero baseline. Zero-width and
/// baseline-straddling spans are neutral: they pass through untouched by gap
/// placement and repositioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarSide {
    Above,
    Below,
    Neutral,
}

#[derive(Debug, Clone, Copy)]
struct WorkingBar {
    series_index: usize,
    value_bottom: f64,
    value_top: f64,
    y: f64,
    height: f64,
    gap_offset_px: f64,
    gap_adjusted: bool,
    min_height_px: f64,
    round_top: bool,
    round_bottom: bool,
}

/// Running state threaded through the per-series fold: cumulative stacked
/// totals per sign side plus the same-side bar counts that drive gap
/// placement. Ordering of the input entries is semantically significant.
#[derive(Debug, Clone, Copy, Default)]
struct StackAccumulator {
    positive_total: f64,
    negative_total: f64,
    positive_count: usize,
    negative_count: usize,
}

/// Pixel Y of the data-zero reference for a stack.
///
/// If the domain minimum is >= 0 the baseline sits at the domain minimum; if
/// the maximum is <= 0 it sits at the maximum; otherwise at data zero. The
/// result is clamped into the drawing rect's vertical extent.
#[must_use]
pub fn stack_baseline(y_scale: LinearScale, rect: DrawRect) -> f64 {
    let (domain_min, domain_max) = y_scale.domain();
    let anchor = if domain_min >= 0.0 {
        domain_min
    } else if domain_max <= 0.0 {
        domain_max
    } else {
        0.0
    };
    let pixel = y_scale.position(anchor).unwrap_or(rect.bottom());
    rect.clamp_y(pixel)
}

/// Lays out every bar of one stack group at one category index.
///
/// Pass order is fixed: initial baseline-relative layout, minimum bar-height
/// expansion with gap-preserving repositioning, corner-rounding inference,
/// conditional minimum stack-height enforcement (rounding re-inferred only
/// when that pass changed geometry), then the silhouette rect.
#[must_use]
pub fn layout_bar_stack(
    entries: &[StackEntry],
    slot: CategorySlot,
    y_scale: LinearScale,
    rect: DrawRect,
    sizing: StackSizing,
) -> StackLayout {
    let baseline = stack_baseline(y_scale, rect);
    let mut bars = initial_bars(entries, y_scale, sizing);

    if bars.iter().any(|bar| bar.min_height_px > 0.0) {
        let snapshot = geometry_snapshot(&bars);
        if expand_undersized_bars(&mut bars, y_scale) {
            reposition_outward(&mut bars, &snapshot, baseline);
        }
    }

    infer_corner_rounding(&mut bars, sizing.stack_gap_px);

    if sizing.stack_min_height_px > 0.0
        && enforce_stack_min(&mut bars, y_scale, baseline, sizing.stack_min_height_px)
    {
        infer_corner_rounding(&mut bars, sizing.stack_gap_px);
    }

    let bounds = stack_bounds(&bars, slot, rect, baseline, sizing.round_baseline);
    let bars = bars
        .into_iter()
        .filter(|bar| bar.height > 0.0 && slot.width > 0.0)
        .map(|bar| BarGeometry {
            series_index: bar.series_index,
            x: slot.x,
            y: bar.y,
            width: slot.width,
            height: bar.height,
            value_bottom: bar.value_bottom,
            value_top: bar.value_top,
            round_top: bar.round_top,
            round_bottom: bar.round_bottom,
        })
        .collect();

    StackLayout {
        baseline,
        bars,
        bounds,
    }
}

fn classify_side(value_bottom: f64, value_top: f64) -> BarSide {
    if value_top == value_bottom {
        BarSide::Neutral
    } else if value_bottom >= 0.0 {
        BarSide::Above
    } else if value_top <= 0.0 {
        BarSide::Below
    } else {
        BarSide::Neutral
    }
}

fn project_span(
    y_scale: LinearScale,
    value_bottom: f64,
    value_top: f64,
    gap_offset_px: f64,
) -> Option<(f64, f64)> {
    let bottom_px = y_scale.position(value_bottom)?;
    let top_px = y_scale.position(value_top)?;
    let height = (bottom_px - top_px).abs();
    let y = bottom_px.min(top_px) + gap_offset_px;
    Some((y, height))
}

/// Initial baseline-relative extents: scalars accumulate onto the running
/// same-sign total and are pushed away from the baseline by one stack gap
/// per preceding same-side bar; spans pass through flush.
fn initial_bars(
    entries: &[StackEntry],
    y_scale: LinearScale,
    sizing: StackSizing,
) -> Vec<WorkingBar> {
    let mut acc = StackAccumulator::default();
    let mut bars = Vec::with_capacity(entries.len());

    for entry in entries {
        if !entry.value.is_finite() {
            continue;
        }

        let (value_bottom, value_top, gap_adjusted) = match entry.value {
            SeriesValue::Scalar(v) => {
                if v >= 0.0 {
                    let bottom = acc.positive_total;
                    acc.positive_total += v;
                    (bottom, bottom + v, true)
                } else {
                    let top = acc.negative_total;
                    acc.negative_total += v;
                    (top + v, top, true)
                }
            }
            SeriesValue::Span(a, b) => (a.min(b), a.max(b), false),
        };

        let side = classify_side(value_bottom, value_top);
        let gap_offset_px = match side {
            BarSide::Above => {
                let count = acc.positive_count;
                acc.positive_count += 1;
                if gap_adjusted {
                    -(sizing.stack_gap_px * count as f64)
                } else {
                    0.0
                }
            }
            BarSide::Below => {
                let count = acc.negative_count;
                acc.negative_count += 1;
                if gap_adjusted {
                    sizing.stack_gap_px * count as f64
                } else {
                    0.0
                }
            }
            BarSide::Neutral => 0.0,
        };

        let Some((y, height)) = project_span(y_scale, value_bottom, value_top, gap_offset_px)
        else {
            continue;
        };
        if height <= 0.0 {
            continue;
        }

        bars.push(WorkingBar {
            series_index: entry.series_index,
            value_bottom,
            value_top,
            y,
            height,
            gap_offset_px,
            gap_adjusted,
            min_height_px: entry.min_height_px.unwrap_or(sizing.bar_min_height_px),
            round_top: false,
            round_bottom: false,
        });
    }

    bars
}

fn geometry_snapshot(bars: &[WorkingBar]) -> Vec<(f64, f64)> {
    bars.iter().map(|bar| (bar.y, bar.height)).collect()
}

/// Grows a bar to `min_height_px` in data space. An end sitting exactly on
/// data zero is pinned and all growth goes to the opposite end; otherwise
/// the increase is split evenly between both ends.
fn expand_bar_to(bar: &mut WorkingBar, y_scale: LinearScale, min_height_px: f64) -> bool {
    let unit = y_scale.unit_size();
    if !unit.is_finite() || unit <= 0.0 {
        return false;
    }

    let height_increase = min_height_px - bar.height;
    if height_increase <= 0.0 {
        return false;
    }
    let value_increase = height_increase / unit;

    if bar.value_bottom == 0.0 {
        bar.value_top += value_increase;
    } else if bar.value_top == 0.0 {
        bar.value_bottom -= value_increase;
    } else {
        bar.value_bottom -= value_increase / 2.0;
        bar.value_top += value_increase / 2.0;
    }

    match project_span(y_scale, bar.value_bottom, bar.value_top, bar.gap_offset_px) {
        Some((y, height)) => {
            bar.y = y;
            bar.height = height;
            true
        }
        None => false,
    }
}

fn expand_undersized_bars(bars: &mut [WorkingBar], y_scale: LinearScale) -> bool {
    let mut expanded = false;
    for bar in bars.iter_mut() {
        if bar.min_height_px > 0.0 && bar.height < bar.min_height_px {
            expanded |= expand_bar_to(bar, y_scale, bar.min_height_px);
        }
    }
    expanded
}

/// Re-lays bars outward from the baseline, eliminating overlaps introduced
/// by height changes while preserving inter-bar gaps measured on the
/// pre-change `snapshot` geometry. The innermost bar keeps its original
/// distance from the baseline, so spans starting off-baseline are not
/// snapped onto it. With unchanged heights this is the identity.
///
/// Bars that straddle the baseline are left in place.
fn reposition_outward(bars: &mut [WorkingBar], snapshot: &[(f64, f64)], baseline: f64) {
    let mut above: Vec<usize> = Vec::new();
    let mut below: Vec<usize> = Vec::new();
    for (index, &(pre_y, pre_height)) in snapshot.iter().enumerate() {
        if pre_y + pre_height <= baseline + EDGE_EPSILON {
            above.push(index);
        } else if pre_y >= baseline - EDGE_EPSILON {
            below.push(index);
        }
    }

    above.sort_by_key(|&i| OrderedFloat(snapshot[i].0));
    below.sort_by_key(|&i| OrderedFloat(snapshot[i].0));

    // Above-baseline bars walk upward, nearest to the baseline first.
    let mut cursor = baseline;
    let mut prev: Option<usize> = None;
    for &i in above.iter().rev() {
        let (pre_y, pre_height) = snapshot[i];
        let gap = match prev {
            None => baseline - (pre_y + pre_height),
            Some(p) => snapshot[p].0 - (pre_y + pre_height),
        };
        let bottom_edge = cursor - gap;
        bars[i].y = bottom_edge - bars[i].height;
        cursor = bars[i].y;
        prev = Some(i);
    }

    // Below-baseline bars walk downward, nearest first.
    let mut cursor = baseline;
    let mut prev: Option<usize> = None;
    for &i in &below {
        let (pre_y, _) = snapshot[i];
        let gap = match prev {
            None => pre_y - baseline,
            Some(p) => pre_y - (snapshot[p].0 + snapshot[p].1),
        };
        bars[i].y = cursor + gap;
        cursor = bars[i].y + bars[i].height;
        prev = Some(i);
    }
}

/// Decides per-bar corner rounding on the current geometry: an end is
/// rounded when it is the outermost in that direction, when the bar belongs
/// to a gapped scalar stack, or when there is a visible discontinuity with
/// the neighbor on that side.
fn infer_corner_rounding(bars: &mut [WorkingBar], stack_gap_px: f64) {
    if bars.is_empty() {
        return;
    }

    // Bottom-to-top visual order.
    let mut order: Vec<usize> = (0..bars.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(OrderedFloat(bars[i].y)));

    let last = order.len() - 1;
    for (pos, &i) in order.iter().enumerate() {
        let gapped = bars[i].gap_adjusted && stack_gap_px > 0.0;

        let round_bottom = pos == 0 || gapped || {
            let beneath = order[pos - 1];
            (bars[beneath].y - (bars[i].y + bars[i].height)).abs() > EDGE_EPSILON
        };
        let round_top = pos == last || gapped || {
            let over = order[pos + 1];
            ((bars[over].y + bars[over].height) - bars[i].y).abs() > EDGE_EPSILON
        };

        bars[i].round_bottom = round_bottom;
        bars[i].round_top = round_top;
    }
}

fn vertical_extent(bars: &[WorkingBar]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for bar in bars {
        min_y = min_y.min(bar.y);
        max_y = max_y.max(bar.y + bar.height);
    }
    (min_y <= max_y).then_some((min_y, max_y))
}

/// Enforces the minimum stack height. A lone bar expands exactly like the
/// per-bar minimum; multiple bars keep their gap pixels and rescale bar
/// heights uniformly, then re-lay outward from the baseline. Returns whether
/// any geometry changed.
fn enforce_stack_min(
    bars: &mut [WorkingBar],
    y_scale: LinearScale,
    baseline: f64,
    stack_min_height_px: f64,
) -> bool {
    let Some((min_y, max_y)) = vertical_extent(bars) else {
        return false;
    };
    let stack_height = max_y - min_y;
    if stack_height >= stack_min_height_px {
        return false;
    }

    let snapshot = geometry_snapshot(bars);

    if bars.len() == 1 {
        if !expand_bar_to(&mut bars[0], y_scale, stack_min_height_px) {
            return false;
        }
        reposition_outward(bars, &snapshot, baseline);
        return true;
    }

    let total_bar_height: f64 = bars.iter().map(|bar| bar.height).sum();
    let total_gap_height = stack_height - total_bar_height;
    let required_bar_height = stack_min_height_px - total_gap_height;
    if total_bar_height <= 0.0 || required_bar_height <= 0.0 {
        return false;
    }

    let scale_factor = required_bar_height / total_bar_height;
    for bar in bars.iter_mut() {
        bar.height *= scale_factor;
    }
    reposition_outward(bars, &snapshot, baseline);
    true
}

/// Silhouette rect for the whole stack: union of the final bars, clamped
/// vertically into the drawing rect. An edge is rounded when rounding at the
/// baseline is forced or when that edge does not coincide with the baseline.
fn stack_bounds(
    bars: &[WorkingBar],
    slot: CategorySlot,
    rect: DrawRect,
    baseline: f64,
    round_baseline: bool,
) -> Option<StackRect> {
    let (min_y, max_y) = vertical_extent(bars)?;
    let top = min_y.max(rect.top());
    let bottom = max_y.min(rect.bottom());

    Some(StackRect {
        x: slot.x,
        y: top,
        width: slot.width,
        height: (bottom - top).max(0.0),
        round_top: round_baseline || (top - baseline).abs() > EDGE_EPSILON,
        round_bottom: round_baseline || (bottom - baseline).abs() > EDGE_EPSILON,
    })
}
