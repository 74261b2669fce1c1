use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::BarPlotLayout;

/// Current snapshot wire version.
pub const LAYOUT_SNAPSHOT_VERSION: u32 = 1;

/// Versioned JSON envelope around one computed layout, for golden tests and
/// host-app interop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub version: u32,
    pub layout: BarPlotLayout,
}

/// Serializes a layout into the versioned JSON snapshot format.
pub fn layout_to_json(layout: &BarPlotLayout) -> ChartResult<String> {
    let snapshot = LayoutSnapshot {
        version: LAYOUT_SNAPSHOT_VERSION,
        layout: layout.clone(),
    };
    serde_json::to_string_pretty(&snapshot)
        .map_err(|err| ChartError::InvalidData(format!("layout snapshot encoding failed: {err}")))
}

/// Parses a snapshot produced by [`layout_to_json`], rejecting unknown
/// versions.
pub fn layout_from_json(json: &str) -> ChartResult<LayoutSnapshot> {
    let snapshot: LayoutSnapshot = serde_json::from_str(json)
        .map_err(|err| ChartError::InvalidData(format!("layout snapshot decoding failed: {err}")))?;
    if snapshot.version != LAYOUT_SNAPSHOT_VERSION {
        return Err(ChartError::InvalidData(format!(
            "unsupported layout snapshot version {}",
            snapshot.version
        )));
    }
    Ok(snapshot)
}
