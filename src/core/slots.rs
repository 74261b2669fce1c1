use serde::{Deserialize, Serialize};

use crate::core::AxisScale;
use crate::error::{ChartError, ChartResult};

/// Horizontal slot occupied by one stack group at one category index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategorySlot {
    pub x: f64,
    pub width: f64,
}

/// Computes per-category `{x, width}` slots for one stack group.
///
/// `total_stacks` is the number of stack groups competing for the same
/// categories and `stack_index` this group's 0-based position among them.
/// `bar_padding` is the fraction of the band given to gaps between sibling
/// stacks; a single occupant uses the full band. Slot widths plus gaps
/// exactly tile the band.
///
/// A continuous x-scale is a usage error (`NonCategoricalScale`): the caller
/// reports it and renders nothing for the group.
pub fn stack_group_slots(
    x_scale: AxisScale,
    total_stacks: usize,
    stack_index: usize,
    bar_padding: f64,
    category_count: usize,
) -> ChartResult<Vec<CategorySlot>> {
    let band = x_scale.as_band()?;

    if total_stacks == 0 || stack_index >= total_stacks {
        return Err(ChartError::InvalidData(format!(
            "stack index {stack_index} out of range for {total_stacks} stacks"
        )));
    }
    if !bar_padding.is_finite() || !(0.0..=1.0).contains(&bar_padding) {
        return Err(ChartError::InvalidData(
            "bar padding must be finite and within [0, 1]".to_owned(),
        ));
    }

    let category_width = band.bandwidth();
    let gap = if total_stacks > 1 {
        category_width * bar_padding / (total_stacks - 1) as f64
    } else {
        0.0
    };
    // Redistribute the total gap width across occupants so that
    // total_stacks * width + (total_stacks - 1) * gap == category_width.
    let size_adjustment = gap * (total_stacks - 1) as f64 / total_stacks as f64;
    let width = category_width / total_stacks as f64 - size_adjustment;
    let offset = stack_index as f64 * (width + gap);

    let mut slots = Vec::with_capacity(category_count.min(band.count()));
    for category_index in 0..category_count {
        let Some(band_x) = band.position(category_index) else {
            break;
        };
        slots.push(CategorySlot {
            x: band_x + offset,
            width,
        });
    }

    Ok(slots)
}
