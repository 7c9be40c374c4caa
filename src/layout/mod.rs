//! Layout engine for computing cell positions and wrap-around shift cells.
//!
//! This module handles:
//! - Measuring cells and positioning them by running sum of outer widths
//! - Tracking the slideable width and tallest cell for container sizing
//! - Choosing which boundary cells are rendered one loop away when wrapping

mod cell;
mod cells;
mod wrap;

pub use cell::{Cell, WrapDirection};
pub use cells::CellSequence;
pub use wrap::{collect_gap_cells, WrapMetrics, WrapShift};
