//! Ordered cell collection and running-sum positioning.
//!
//! Cell offsets are the cumulative outer widths of the cells before them,
//! like column positions in a spreadsheet layout. Positioning can restart
//! from any index so inserts near the tail only touch the cells after them.

use std::ops::Range;

use tracing::trace;

use super::cell::Cell;
use crate::host::{CellElement, OriginSide};

/// Ordered cells plus the measurements derived from them.
#[derive(Debug, Clone)]
pub struct CellSequence<E> {
    cells: Vec<Cell<E>>,
    /// Sum of all outer widths (= last cell's `x + outer_width`)
    slideable_width: f32,
    /// Tallest outer height seen by the last positioning pass
    max_cell_height: f32,
}

impl<E> Default for CellSequence<E> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            slideable_width: 0.0,
            max_cell_height: 0.0,
        }
    }
}

impl<E: CellElement> CellSequence<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn elements into cells, keeping document order.
    ///
    /// With a selector, an element becomes a cell if it matches, and any
    /// matching descendants become cells after it.
    pub fn build(elements: &[E], cell_selector: Option<&str>) -> Vec<Cell<E>> {
        let mut cells = Vec::with_capacity(elements.len());
        for element in elements {
            match cell_selector {
                None => cells.push(Cell::new(element.clone())),
                Some(selector) => {
                    if element.matches(selector) {
                        cells.push(Cell::new(element.clone()));
                    }
                    cells.extend(element.find_all(selector).into_iter().map(Cell::new));
                }
            }
        }
        cells
    }

    /// Replace every cell. Derived values are zeroed until repositioned.
    pub fn replace(&mut self, cells: Vec<Cell<E>>) {
        self.cells = cells;
        self.slideable_width = 0.0;
        self.max_cell_height = 0.0;
    }

    /// Remove and return every cell.
    pub fn take_all(&mut self) -> Vec<Cell<E>> {
        self.slideable_width = 0.0;
        self.max_cell_height = 0.0;
        std::mem::take(&mut self.cells)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cell<E>> {
        self.cells.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cell<E>> {
        self.cells.get_mut(index)
    }

    pub fn last(&self) -> Option<&Cell<E>> {
        self.cells.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell<E>> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[Cell<E>] {
        &self.cells
    }

    /// Index of the cell owning `element`.
    pub fn index_of(&self, element: &E) -> Option<usize> {
        self.cells.iter().position(|cell| cell.element() == element)
    }

    pub fn slideable_width(&self) -> f32 {
        self.slideable_width
    }

    pub fn max_cell_height(&self) -> f32 {
        self.max_cell_height
    }

    /// Measure every cell.
    pub fn size_all(&mut self) {
        self.size_range(0..self.cells.len());
    }

    /// Measure only the cells in `range` (clamped to the sequence).
    pub fn size_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.cells.len());
        let start = range.start.min(end);
        for cell in self.cells.get_mut(start..end).into_iter().flatten() {
            cell.measure();
        }
    }

    /// Reposition cells from `start` onward.
    ///
    /// The running offset starts at the end of the cell before `start`. The
    /// height maximum restarts only for a full pass; a partial pass folds
    /// into the retained maximum.
    pub fn position_from(&mut self, start: usize, side: OriginSide, target_position: f32) {
        let start = start.min(self.cells.len());
        let mut cell_x = 0.0;
        if start == 0 {
            self.max_cell_height = 0.0;
        } else if let Some(prev) = self.cells.get(start - 1) {
            cell_x = prev.x + prev.size.outer_width;
        }

        for cell in self.cells.get_mut(start..).into_iter().flatten() {
            cell.set_position(cell_x, side, target_position);
            cell_x += cell.size.outer_width;
            self.max_cell_height = self.max_cell_height.max(cell.size.outer_height);
        }
        self.slideable_width = cell_x;
        trace!(
            start,
            slideable_width = self.slideable_width,
            max_cell_height = self.max_cell_height,
            "positioned cells"
        );
    }

    /// Splice `cells` in at `index` (clamped to the length). Returns the
    /// index actually used.
    pub fn insert(&mut self, index: usize, cells: Vec<Cell<E>>) -> usize {
        let index = index.min(self.cells.len());
        if index == self.cells.len() {
            self.cells.extend(cells);
        } else {
            let tail = self.cells.split_off(index);
            self.cells.extend(cells);
            self.cells.extend(tail);
        }
        index
    }

    /// Remove and return the cells matching `pred`, in sequence order.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&Cell<E>) -> bool) -> Vec<Cell<E>> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.cells.len());
        for cell in self.cells.drain(..) {
            if pred(&cell) {
                removed.push(cell);
            } else {
                kept.push(cell);
            }
        }
        self.cells = kept;
        removed
    }

    /// Remove the cells owning any of `elements`.
    pub fn remove_elements(&mut self, elements: &[E]) -> Vec<Cell<E>> {
        self.remove_where(|cell| elements.contains(cell.element()))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell<E>] {
        &mut self.cells
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

    fn elements(widths: &[f32]) -> Vec<MemoryElement> {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| MemoryElement::new(format!("cell{i}"), *w, 50.0 + i as f32))
            .collect()
    }

    fn positioned(widths: &[f32]) -> CellSequence<MemoryElement> {
        let mut seq = CellSequence::new();
        seq.replace(CellSequence::build(&elements(widths), None));
        seq.size_all();
        seq.position_from(0, OriginSide::Left, 0.5);
        seq
    }

    #[test]
    fn test_contiguous_positions() {
        let seq = positioned(&[100.0, 50.0, 75.0]);
        let xs: Vec<f32> = seq.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0.0, 100.0, 150.0]);
        assert_eq!(seq.slideable_width(), 225.0);
        assert_eq!(seq.max_cell_height(), 52.0);
    }

    #[test]
    fn test_empty_sequence() {
        let mut seq: CellSequence<MemoryElement> = CellSequence::new();
        seq.position_from(0, OriginSide::Left, 0.5);
        assert_eq!(seq.slideable_width(), 0.0);
        assert_eq!(seq.max_cell_height(), 0.0);
        assert!(seq.last().is_none());
    }

    #[test]
    fn test_insert_middle_and_partial_reposition() {
        let mut seq = positioned(&[100.0; 5]);
        let new = CellSequence::build(&[MemoryElement::new("new", 100.0, 10.0)], None);
        let index = seq.insert(2, new);
        assert_eq!(index, 2);
        seq.size_range(2..3);
        seq.position_from(2, OriginSide::Left, 0.5);

        assert_eq!(seq.len(), 6);
        assert_eq!(seq.get(2).unwrap().x, 200.0);
        assert_eq!(seq.get(5).unwrap().x, 500.0);
        assert_eq!(seq.slideable_width(), 600.0);
        // Heights of the untouched leading cells are retained
        assert_eq!(seq.max_cell_height(), 54.0);
    }

    #[test]
    fn test_full_reposition_resets_height() {
        let mut seq = positioned(&[100.0, 100.0]);
        assert_eq!(seq.max_cell_height(), 51.0);
        for cell in seq.cells_mut() {
            cell.element().set_size(crate::host::CellSize::new(100.0, 20.0));
        }
        seq.size_all();
        seq.position_from(0, OriginSide::Left, 0.5);
        assert_eq!(seq.max_cell_height(), 20.0);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut seq = positioned(&[100.0, 100.0]);
        let new = CellSequence::build(&[MemoryElement::new("tail", 10.0, 10.0)], None);
        assert_eq!(seq.insert(99, new), 2);
        assert_eq!(seq.last().unwrap().element().name(), "tail");
    }

    #[test]
    fn test_remove_elements() {
        let els = elements(&[100.0, 100.0, 100.0]);
        let mut seq = CellSequence::new();
        seq.replace(CellSequence::build(&els, None));
        let removed = seq.remove_elements(&[els[1].clone()]);
        assert_eq!(removed.len(), 1);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.index_of(&els[2]), Some(1));
        assert_eq!(seq.index_of(&els[1]), None);
    }

    #[test]
    fn test_build_with_selector() {
        let plain = MemoryElement::new("div", 10.0, 10.0);
        let cell = MemoryElement::new("div", 10.0, 10.0).with_class("cell");
        let wrapper = MemoryElement::new("section", 10.0, 10.0);
        let nested = MemoryElement::new("div", 10.0, 10.0).with_class("cell");
        wrapper.add_child(nested.clone());

        let cells = CellSequence::build(&[plain, cell.clone(), wrapper], Some(".cell"));
        let built: Vec<MemoryElement> = cells.iter().map(|c| c.element().clone()).collect();
        assert_eq!(built, vec![cell, nested]);
    }
}
