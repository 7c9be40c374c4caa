//! Wrap-around gap filling.
//!
//! When the sequence loops, the space between the surface's left edge and
//! the cursor must show the tail of the sequence, and the space after the
//! cursor must show its head. The cells that cover those gaps are rendered
//! one loop before or after their base position instead of being cloned.

use tracing::debug;

use super::cell::{Cell, WrapDirection};
use crate::host::{CellElement, OriginSide};

/// Walk from `start` by `step`, collecting cell indices until their outer
/// widths cover `gap` or the cells run out.
///
/// A cell is taken while the remaining gap is still non-negative, so a gap
/// that is an exact multiple of the cell width takes one extra cell.
pub fn collect_gap_cells<E>(cells: &[Cell<E>], gap: f32, start: usize, step: isize) -> Vec<usize> {
    let mut found = Vec::new();
    let mut remaining = gap;
    let mut cursor = Some(start);
    while remaining >= 0.0 {
        let Some((index, cell)) = cursor.and_then(|i| cells.get(i).map(|c| (i, c))) else {
            break;
        };
        found.push(index);
        remaining -= cell.size.outer_width;
        cursor = index.checked_add_signed(step);
    }
    if remaining >= 0.0 {
        debug!(gap, remaining, cells = found.len(), "wrap gap not fully covered");
    }
    found
}

/// Shift sets for both edges of a looping sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapShift {
    /// Tail cells, last first, shown before the first cell
    before: Vec<usize>,
    /// Head cells, first first, shown after the last cell
    after: Vec<usize>,
}

impl WrapShift {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before(&self) -> &[usize] {
        &self.before
    }

    pub fn after(&self) -> &[usize] {
        &self.after
    }

    /// Revert the previous sets and collect fresh ones.
    pub fn recompute<E: CellElement>(
        &mut self,
        cells: &mut [Cell<E>],
        surface_width: f32,
        cursor_position: f32,
        side: OriginSide,
    ) {
        self.revert(cells, side);
        let Some(last) = cells.len().checked_sub(1) else {
            return;
        };
        self.before = collect_gap_cells(cells, cursor_position, last, -1);
        self.after = collect_gap_cells(cells, surface_width - cursor_position, 0, 1);
        debug!(
            before = self.before.len(),
            after = self.after.len(),
            "wrap shift cells"
        );
    }

    /// Put every shifted cell back at its base position and clear the sets.
    ///
    /// Cells already at their base position are skipped, so a cell present
    /// in both sets is restored once.
    pub fn revert<E: CellElement>(&mut self, cells: &mut [Cell<E>], side: OriginSide) {
        for index in self.before.drain(..).chain(self.after.drain(..)) {
            if let Some(cell) = cells.get_mut(index) {
                cell.unshift(side);
            }
        }
    }

    /// Shift the cells that fall inside the visible gaps for slider offset
    /// `slider_x` (already normalized into `[-slideable_width, 0)`).
    pub fn apply<E: CellElement>(
        &self,
        cells: &mut [Cell<E>],
        slider_x: f32,
        metrics: WrapMetrics,
        side: OriginSide,
    ) {
        let before_gap = metrics.cursor_position + slider_x;
        shift_cells(cells, &self.before, before_gap, WrapDirection::Before, metrics, side);

        let after_gap = metrics.surface_width
            - (slider_x + metrics.slideable_width + metrics.cursor_position);
        shift_cells(cells, &self.after, after_gap, WrapDirection::After, metrics, side);
    }
}

/// Geometry needed to render shift cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapMetrics {
    pub surface_width: f32,
    pub cursor_position: f32,
    pub slideable_width: f32,
}

fn shift_cells<E: CellElement>(
    cells: &mut [Cell<E>],
    indices: &[usize],
    mut gap: f32,
    direction: WrapDirection,
    metrics: WrapMetrics,
    side: OriginSide,
) {
    for &index in indices {
        let Some(cell) = cells.get_mut(index) else {
            continue;
        };
        let shift = if gap > 0.0 {
            direction
        } else {
            WrapDirection::None
        };
        cell.wrap_shift(shift, metrics.slideable_width, side);
        gap -= cell.size.outer_width;
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
    use crate::host::memory::MemoryElement;
    use crate::layout::CellSequence;

    fn uniform(count: usize, width: f32) -> CellSequence<MemoryElement> {
        let elements: Vec<MemoryElement> = (0..count)
            .map(|i| MemoryElement::new(format!("cell{i}"), width, 40.0))
            .collect();
        let mut seq = CellSequence::new();
        seq.replace(CellSequence::build(&elements, None));
        seq.size_all();
        seq.position_from(0, OriginSide::Left, 0.5);
        seq
    }

    #[test]
    fn test_gap_cells_cover_gap() {
        let seq = uniform(10, 100.0);
        assert_eq!(collect_gap_cells(seq.as_slice(), 250.0, 9, -1), vec![9, 8, 7]);
        assert_eq!(collect_gap_cells(seq.as_slice(), 250.0, 0, 1), vec![0, 1, 2]);
    }

    #[test]
    fn test_gap_exact_multiple_takes_extra_cell() {
        let seq = uniform(10, 100.0);
        assert_eq!(collect_gap_cells(seq.as_slice(), 200.0, 0, 1).len(), 3);
    }

    #[test]
    fn test_gap_cells_partial_when_exhausted() {
        let seq = uniform(2, 100.0);
        assert_eq!(collect_gap_cells(seq.as_slice(), 1000.0, 1, -1), vec![1, 0]);
        assert_eq!(collect_gap_cells(seq.as_slice(), 1000.0, 0, 1), vec![0, 1]);
    }

    #[test]
    fn test_gap_cells_empty() {
        let seq = uniform(0, 100.0);
        assert!(collect_gap_cells(seq.as_slice(), 100.0, 0, 1).is_empty());
    }

    #[test]
    fn test_recompute_three_cells() {
        let mut seq = uniform(3, 100.0);
        let mut wrap = WrapShift::new();
        wrap.recompute(seq.cells_mut(), 250.0, 125.0, OriginSide::Left);
        assert_eq!(wrap.before(), &[2, 1]);
        assert_eq!(wrap.after(), &[0, 1]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut seq = uniform(3, 100.0);
        let mut wrap = WrapShift::new();
        wrap.recompute(seq.cells_mut(), 250.0, 125.0, OriginSide::Left);
        let first = wrap.clone();
        wrap.recompute(seq.cells_mut(), 250.0, 125.0, OriginSide::Left);
        assert_eq!(wrap, first);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_revert_overlapping_sets() {
        let mut seq = uniform(2, 100.0);
        let mut wrap = WrapShift::new();
        wrap.recompute(seq.cells_mut(), 600.0, 300.0, OriginSide::Left);
        assert_eq!(wrap.before(), &[1, 0]);
        assert_eq!(wrap.after(), &[0, 1]);

        let metrics = WrapMetrics {
            surface_width: 600.0,
            cursor_position: 300.0,
            slideable_width: seq.slideable_width(),
        };
        wrap.apply(seq.cells_mut(), -50.0, metrics, OriginSide::Left);
        wrap.revert(seq.cells_mut(), OriginSide::Left);

        for cell in seq.iter() {
            assert_eq!(cell.shift, WrapDirection::None);
            assert_eq!(cell.element().offset(), Some(cell.x));
        }
        assert!(wrap.before().is_empty());
        assert!(wrap.after().is_empty());
    }

    #[test]
    fn test_apply_shifts_only_cells_in_gap() {
        let mut seq = uniform(5, 100.0);
        let mut wrap = WrapShift::new();
        wrap.recompute(seq.cells_mut(), 250.0, 125.0, OriginSide::Left);
        let metrics = WrapMetrics {
            surface_width: 250.0,
            cursor_position: 125.0,
            slideable_width: 500.0,
        };
        // Slider at the first cell: 125px of gap before it
        wrap.apply(seq.cells_mut(), -50.0, metrics, OriginSide::Left);
        assert_eq!(seq.get(4).unwrap().shift, WrapDirection::Before);
        assert_eq!(seq.get(4).unwrap().element().offset(), Some(-100.0));
        // After gap = 250 - (-50 + 500 + 125) < 0
        assert_eq!(seq.get(0).unwrap().shift, WrapDirection::None);
    }
}
