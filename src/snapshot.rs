//! Serializable view of a gallery's published state.
//!
//! Used by the CLI output, the `snapshot()` JavaScript export and tests.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::WrapDirection;

/// One cell's published geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSnapshot {
    pub x: f32,
    pub target: f32,
    pub shift: WrapDirection,
    pub outer_width: f32,
    pub outer_height: f32,
}

/// Everything collaborators may read from a gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub cells: Vec<CellSnapshot>,
    pub slideable_width: f32,
    pub max_cell_height: f32,
    pub cursor_position: f32,
    pub x: f32,
    pub selected_index: Option<usize>,
    pub before_shift: Vec<usize>,
    pub after_shift: Vec<usize>,
}

impl LayoutSnapshot {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
