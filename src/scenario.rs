//! Scripted gallery runs over the in-memory host.
//!
//! A scenario is a JSON document describing a surface, its initial cells and
//! a list of operations. Running it yields the final [`LayoutSnapshot`].
//!
//! ```json
//! {
//!   "options": { "wrapAround": true },
//!   "surface": { "width": 300, "height": 200 },
//!   "cells": [{ "width": 100, "height": 80 }, { "width": 100, "height": 80 }],
//!   "ops": [{ "op": "next" }, { "op": "insert", "index": 0, "cells": [{ "width": 50, "height": 40 }] }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::gallery::Gallery;
use crate::host::memory::{MemoryElement, MemorySurface};
use crate::host::CellSize;
use crate::options::GalleryOptions;
use crate::snapshot::LayoutSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SurfaceShape {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellShape {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub margin_left: f32,
    #[serde(default)]
    pub margin_right: f32,
}

impl CellShape {
    fn size(&self) -> CellSize {
        CellSize::new(self.width, self.height).with_margins(self.margin_left, self.margin_right)
    }
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ScenarioOp {
    Select {
        index: isize,
        #[serde(default, rename = "isWrap")]
        is_wrap: bool,
    },
    Next,
    Previous,
    Insert {
        index: usize,
        cells: Vec<CellShape>,
    },
    Append {
        cells: Vec<CellShape>,
    },
    Prepend {
        cells: Vec<CellShape>,
    },
    /// Remove the cells currently at `indices`.
    Remove {
        indices: Vec<usize>,
    },
    /// Change the surface size and re-measure.
    Resize {
        width: f32,
        height: f32,
    },
    /// Change one cell's size and re-measure it.
    ResizeCell {
        index: usize,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub options: GalleryOptions,
    pub surface: SurfaceShape,
    #[serde(default)]
    pub cells: Vec<CellShape>,
    #[serde(default)]
    pub ops: Vec<ScenarioOp>,
}

impl Scenario {
    /// Parse a scenario from JSON.
    ///
    /// # Errors
    /// Returns an error for malformed JSON or unknown operations.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build the gallery, apply every operation and snapshot the result.
    ///
    /// # Errors
    /// Returns an error if the options fail validation.
    pub fn run(&self) -> Result<LayoutSnapshot> {
        let mut counter = 0usize;
        let mut make = |shape: &CellShape| {
            counter += 1;
            MemoryElement::with_size(format!("cell{counter}"), shape.size())
        };
        let elements: Vec<MemoryElement> = self.cells.iter().map(&mut make).collect();
        let surface =
            MemorySurface::with_children(self.surface.width, self.surface.height, elements);
        let mut gallery = Gallery::new(surface, self.options.clone())?;
        info!(cells = self.cells.len(), ops = self.ops.len(), "running scenario");

        for op in &self.ops {
            debug!(?op, "apply");
            match op {
                ScenarioOp::Select { index, is_wrap } => gallery.select(*index, *is_wrap),
                ScenarioOp::Next => gallery.next(false),
                ScenarioOp::Previous => gallery.previous(false),
                ScenarioOp::Insert { index, cells } => {
                    let elements: Vec<MemoryElement> = cells.iter().map(&mut make).collect();
                    gallery.insert(&elements, *index);
                }
                ScenarioOp::Append { cells } => {
                    let elements: Vec<MemoryElement> = cells.iter().map(&mut make).collect();
                    gallery.append(&elements);
                }
                ScenarioOp::Prepend { cells } => {
                    let elements: Vec<MemoryElement> = cells.iter().map(&mut make).collect();
                    gallery.prepend(&elements);
                }
                ScenarioOp::Remove { indices } => {
                    let elements: Vec<MemoryElement> = indices
                        .iter()
                        .filter_map(|i| gallery.cells().get(*i))
                        .map(|cell| cell.element().clone())
                        .collect();
                    gallery.remove(&elements);
                }
                ScenarioOp::Resize { width, height } => {
                    gallery.surface_mut().set_size(*width, *height);
                    gallery.resize();
                }
                ScenarioOp::ResizeCell {
                    index,
                    width,
                    height,
                } => {
                    let Some(element) = gallery.cells().get(*index).map(|c| c.element().clone())
                    else {
                        continue;
                    };
                    element.set_size(CellSize::new(*width, *height));
                    gallery.cell_size_change(&element);
                }
            }
        }
        Ok(gallery.snapshot())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let scenario = Scenario::from_json(
            r#"{"surface":{"width":300,"height":200},
                "cells":[{"width":100,"height":80},{"width":100,"height":80},{"width":100,"height":80}]}"#,
        )
        .unwrap();
        let snapshot = scenario.run().unwrap();
        assert_eq!(snapshot.slideable_width, 300.0);
        assert_eq!(snapshot.selected_index, Some(0));
        assert_eq!(snapshot.cursor_position, 150.0);
    }

    #[test]
    fn test_ops_apply_in_order() {
        let scenario = Scenario::from_json(
            r#"{"surface":{"width":300,"height":200},
                "cells":[{"width":100,"height":80},{"width":100,"height":80},{"width":100,"height":80}],
                "ops":[
                    {"op":"select","index":2},
                    {"op":"insert","index":0,"cells":[{"width":50,"height":120,"marginLeft":5}]},
                    {"op":"remove","indices":[3]},
                    {"op":"resizeCell","index":1,"width":40,"height":80}
                ]}"#,
        )
        .unwrap();
        let snapshot = scenario.run().unwrap();
        let xs: Vec<f32> = snapshot.cells.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0.0, 55.0, 95.0]);
        assert_eq!(snapshot.max_cell_height, 120.0);
        assert_eq!(snapshot.selected_index, Some(2));
    }

    #[test]
    fn test_unknown_op_rejected() {
        let result = Scenario::from_json(
            r#"{"surface":{"width":300,"height":200},"ops":[{"op":"explode"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let scenario = Scenario::from_json(
            r#"{"options":{"cursorPosition":2.0},"surface":{"width":300,"height":200}}"#,
        )
        .unwrap();
        assert!(scenario.run().is_err());
    }
}
