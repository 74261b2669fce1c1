use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::BarSeries;

/// Grouping key for one stack: series on different Y axes never combine,
/// even when their `stack_id` matches, so values of incompatible scales are
/// never composited into one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackGroupKey {
    pub stack_id: String,
    pub y_axis_id: String,
}

/// One stack group: the ordered member series (indices into the plot's
/// series list) plus the category count derived from the longest member.
#[derive(Debug, Clone, PartialEq)]
pub struct StackGroup {
    pub key: StackGroupKey,
    pub series_indices: Vec<usize>,
    pub category_count: usize,
}

/// Partitions series into stack groups keyed by `(stack-id, y-axis-id)`.
///
/// Groups appear in first-encounter order and members keep the original
/// series order. `include` optionally restricts grouping to an explicit
/// subset of series ids. An empty series list yields an empty group list.
#[must_use]
pub fn group_stack_series(series: &[BarSeries], include: Option<&[&str]>) -> Vec<StackGroup> {
    let mut groups: IndexMap<StackGroupKey, StackGroup> = IndexMap::new();

    for (index, entry) in series.iter().enumerate() {
        if let Some(ids) = include {
            if !ids.contains(&entry.id.as_str()) {
                continue;
            }
        }

        let key = StackGroupKey {
            stack_id: entry.stack_key(),
            y_axis_id: entry.y_axis_id().to_owned(),
        };
        let group = groups.entry(key.clone()).or_insert_with(|| StackGroup {
            key,
            series_indices: Vec::new(),
            category_count: 0,
        });
        group.series_indices.push(index);
        group.category_count = group.category_count.max(entry.data.len());
    }

    groups.into_values().collect()
}
