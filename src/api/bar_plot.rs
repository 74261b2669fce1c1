use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

#[cfg(feature = "parallel-layout")]
use rayon::prelude::*;

use crate::core::{
    AxisScale, BarSeries, CategorySlot, DEFAULT_Y_AXIS_ID, LinearScale, SeriesStyle,
    StackEntry, StackGroup, StackLayout, group_stack_series, layout_bar_stack,
    stack_group_slots,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BarFigure, BarRenderFrame, Color, Renderer, SilhouetteFigure, StrokeStyle,
    rounded_bar_path,
};

use super::BarPlotConfig;

/// Default categorical fill palette applied to series without an explicit
/// fill, repeating when the series count exceeds the palette length.
const SERIES_PALETTE: [Color; 6] = [
    Color::rgb(0.39, 0.58, 0.93),
    Color::rgb(1.00, 0.65, 0.00),
    Color::rgb(0.24, 0.70, 0.44),
    Color::rgb(0.86, 0.08, 0.24),
    Color::rgb(0.85, 0.65, 0.13),
    Color::rgb(0.42, 0.35, 0.80),
];

/// Layout of one stack group across all categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackGroupLayout {
    pub stack_id: String,
    pub y_axis_id: String,
    pub categories: Vec<StackLayout>,
}

/// Full geometry of one layout pass: every stack group, every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPlotLayout {
    pub groups: Vec<StackGroupLayout>,
}

impl BarPlotLayout {
    /// Total number of rendered bars across all groups and categories.
    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|group| &group.categories)
            .map(|stack| stack.bars.len())
            .sum()
    }
}

/// Bar-plot engine: owns the series list, the category x-scale, per-axis
/// y-scales, and layout configuration.
///
/// Every layout pass recomputes geometry from the current snapshot; nothing
/// is carried across passes.
#[derive(Debug, Clone)]
pub struct BarPlot {
    series: Vec<BarSeries>,
    x_scale: AxisScale,
    y_scales: IndexMap<String, LinearScale>,
    config: BarPlotConfig,
}

impl BarPlot {
    /// Creates a plot with a validated config and a default-axis y-scale.
    pub fn new(
        x_scale: impl Into<AxisScale>,
        y_scale: LinearScale,
        config: BarPlotConfig,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let mut y_scales = IndexMap::new();
        y_scales.insert(DEFAULT_Y_AXIS_ID.to_owned(), y_scale);
        Ok(Self {
            series: Vec::new(),
            x_scale: x_scale.into(),
            y_scales,
            config,
        })
    }

    #[must_use]
    pub fn with_series(mut self, series: Vec<BarSeries>) -> Self {
        self.set_series(series);
        self
    }

    /// Replaces the series list.
    pub fn set_series(&mut self, series: Vec<BarSeries>) {
        debug!(count = series.len(), "set bar series");
        self.series = series;
    }

    /// Registers a y-scale for an additional axis id.
    #[must_use]
    pub fn with_y_scale(mut self, y_axis_id: impl Into<String>, y_scale: LinearScale) -> Self {
        self.y_scales.insert(y_axis_id.into(), y_scale);
        self
    }

    #[must_use]
    pub fn series(&self) -> &[BarSeries] {
        &self.series
    }

    #[must_use]
    pub fn config(&self) -> BarPlotConfig {
        self.config
    }

    /// Computes geometry for every series.
    #[must_use]
    pub fn layout(&self) -> BarPlotLayout {
        self.layout_subset(None)
    }

    /// Computes geometry for an explicit subset of series ids (all series
    /// when `None`).
    ///
    /// Configuration errors (non-categorical x-scale, unknown y-axis id) are
    /// reported once per pass and resolve to empty output for the affected
    /// groups; they never abort the pass.
    #[must_use]
    pub fn layout_subset(&self, include: Option<&[&str]>) -> BarPlotLayout {
        let groups = group_stack_series(&self.series, include);
        let total_stacks = groups.len();

        let mut out = Vec::with_capacity(total_stacks);
        let mut non_band_reported = false;
        for (stack_index, group) in groups.iter().enumerate() {
            let Some(y_scale) = self.y_scales.get(&group.key.y_axis_id) else {
                warn!(
                    y_axis_id = %group.key.y_axis_id,
                    stack_id = %group.key.stack_id,
                    "skipping stack group with unknown y-axis id"
                );
                continue;
            };

            let slots = match stack_group_slots(
                self.x_scale,
                total_stacks,
                stack_index,
                self.config.bar_padding,
                group.category_count,
            ) {
                Ok(slots) => slots,
                Err(err) => {
                    let non_band = matches!(err, ChartError::NonCategoricalScale);
                    if !non_band || !non_band_reported {
                        warn!(error = %err, "skipping stack group positioning");
                    }
                    non_band_reported |= non_band;
                    continue;
                }
            };

            out.push(StackGroupLayout {
                stack_id: group.key.stack_id.clone(),
                y_axis_id: group.key.y_axis_id.clone(),
                categories: self.layout_group_categories(group, &slots, *y_scale),
            });
        }

        let layout = BarPlotLayout { groups: out };
        debug!(
            groups = layout.groups.len(),
            bars = layout.bar_count(),
            "bar plot layout pass"
        );
        layout
    }

    fn layout_group_categories(
        &self,
        group: &StackGroup,
        slots: &[CategorySlot],
        y_scale: LinearScale,
    ) -> Vec<StackLayout> {
        let sizing = self.config.stack_sizing();
        let lay = |(category_index, slot): (usize, &CategorySlot)| -> StackLayout {
            let entries: SmallVec<[StackEntry; 4]> = group
                .series_indices
                .iter()
                .filter_map(|&series_index| {
                    let series = &self.series[series_index];
                    series.value_at(category_index).map(|value| {
                        let mut entry = StackEntry::new(series_index, value);
                        if let Some(min) = series.style.min_bar_height_px {
                            entry = entry.with_min_height(min);
                        }
                        entry
                    })
                })
                .collect();
            layout_bar_stack(&entries, *slot, y_scale, self.config.draw_rect, sizing)
        };

        // Categories are independent; the optional parallel path changes
        // throughput only, never results.
        #[cfg(feature = "parallel-layout")]
        {
            slots.par_iter().enumerate().map(lay).collect()
        }
        #[cfg(not(feature = "parallel-layout"))]
        {
            slots.iter().enumerate().map(lay).collect()
        }
    }

    /// Materializes the current layout into backend-ready figures.
    #[must_use]
    pub fn build_render_frame(&self) -> BarRenderFrame {
        let layout = self.layout();
        let mut figures = Vec::with_capacity(layout.bar_count());
        let mut silhouettes = Vec::new();

        for group in &layout.groups {
            for (category_index, stack) in group.categories.iter().enumerate() {
                for bar in &stack.bars {
                    let series = &self.series[bar.series_index];
                    let radius = series
                        .style
                        .corner_radius_px
                        .unwrap_or(self.config.corner_radius_px);
                    let Some(path) = rounded_bar_path(
                        bar.x,
                        bar.y,
                        bar.width,
                        bar.height,
                        radius,
                        bar.round_top,
                        bar.round_bottom,
                    ) else {
                        continue;
                    };
                    figures.push(BarFigure {
                        series_id: series.id.clone(),
                        category_index,
                        path,
                        fill: resolve_fill(&series.style, bar.series_index),
                        stroke: resolve_stroke(&series.style),
                    });
                }

                let Some(bounds) = stack.bounds else {
                    continue;
                };
                let Some(path) = rounded_bar_path(
                    bounds.x,
                    bounds.y,
                    bounds.width,
                    bounds.height,
                    self.config.corner_radius_px,
                    bounds.round_top,
                    bounds.round_bottom,
                ) else {
                    continue;
                };
                silhouettes.push(SilhouetteFigure {
                    stack_id: group.stack_id.clone(),
                    category_index,
                    path,
                });
            }
        }

        BarRenderFrame {
            draw_rect: self.config.draw_rect,
            figures,
            silhouettes,
        }
    }

    /// Builds the current frame and submits it to a backend.
    pub fn render_into<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        renderer.render(&self.build_render_frame())
    }
}

fn resolve_fill(style: &SeriesStyle, series_index: usize) -> Color {
    style
        .fill
        .unwrap_or(SERIES_PALETTE[series_index % SERIES_PALETTE.len()])
}

fn resolve_stroke(style: &SeriesStyle) -> Option<StrokeStyle> {
    style.stroke.map(|color| StrokeStyle {
        color,
        width_px: style.stroke_width_px.unwrap_or(1.0),
    })
}
