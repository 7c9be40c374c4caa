//! Structural changes: reload, insert, remove.
//!
//! Every edit funnels into `cell_change`, which re-derives positions, wrap
//! shift cells, container height and selection in that order before
//! returning.

use tracing::debug;

use super::{ElementOf, Gallery};
use crate::events::GalleryEvent;
use crate::host::Surface;
use crate::layout::{CellSequence, WrapShift};

impl<S: Surface> Gallery<S> {
    /// Rebuild cells from the slider's current children.
    pub fn reload_cells(&mut self) {
        let children = self.surface.slider_children();
        let cells = CellSequence::build(&children, self.options.cell_selector.as_deref());
        self.cells.replace(cells);
        // Indices from the old sequence mean nothing now.
        self.wrap = WrapShift::new();
        self.position_cells();
        self.get_wrap_shift_cells();
        self.set_container_size();
    }

    /// Insert `elements` as cells before the cell at `index` (appends when
    /// `index` is past the end).
    pub fn insert(&mut self, elements: &[ElementOf<S>], index: usize) {
        let new_cells = CellSequence::build(elements, self.options.cell_selector.as_deref());
        if new_cells.is_empty() {
            return;
        }
        let count = new_cells.len();
        let new_elements: Vec<ElementOf<S>> =
            new_cells.iter().map(|cell| cell.element().clone()).collect();
        let before = self.cells.get(index).map(|cell| cell.element().clone());
        self.surface.insert_elements(&new_elements, before.as_ref());

        let index = self.cells.insert(index, new_cells);
        self.cells.size_range(index..index + count);
        debug!(index, count, "inserted cells");
        self.cell_change(index, true);
    }

    /// Add `elements` after the last cell.
    pub fn append(&mut self, elements: &[ElementOf<S>]) {
        let len = self.cells.len();
        self.insert(elements, len);
    }

    /// Add `elements` before the first cell.
    pub fn prepend(&mut self, elements: &[ElementOf<S>]) {
        self.insert(elements, 0);
    }

    /// Remove the cells owning `elements` and detach them.
    ///
    /// The selected index is kept as a number: removing a cell before the
    /// selection moves the selection onto whatever cell now has that index.
    pub fn remove(&mut self, elements: &[ElementOf<S>]) {
        let removed = self.cells.remove_elements(elements);
        if removed.is_empty() {
            return;
        }
        for cell in &removed {
            cell.destroy(self.side);
        }
        debug!(count = removed.len(), "removed cells");
        self.cell_change(0, true);
    }

    /// Re-derive layout after cells from `index` onward changed.
    ///
    /// Unless `skip_sizing` is set every cell is re-measured first.
    pub fn cell_change(&mut self, index: usize, skip_sizing: bool) {
        if !skip_sizing {
            self.cells.size_all();
        }
        self.cells
            .position_from(index, self.side, self.options.target_position);
        self.get_wrap_shift_cells();
        self.set_container_size();
        self.listeners.emit(GalleryEvent::CellChange);
        self.selection.clamp(self.cells.len());

        if self.options.free_scroll {
            self.render_slider();
        } else {
            let selected = self.selected_signed();
            self.select(selected, false);
        }
    }

    /// Re-measure one element's cell after its content changed size.
    ///
    /// A cell that got shorter may have been the tallest, so the height
    /// maximum is then folded again from the first cell.
    pub fn cell_size_change(&mut self, element: &ElementOf<S>) {
        let Some(index) = self.cells.index_of(element) else {
            return;
        };
        let mut start = index;
        if let Some(cell) = self.cells.get_mut(index) {
            let old_height = cell.size.outer_height;
            cell.measure();
            if cell.size.outer_height < old_height {
                start = 0;
            }
        }
        self.cell_change(start, true);
    }

    /// Elements of every cell, in order.
    pub fn cell_elements(&self) -> Vec<ElementOf<S>> {
        self.cells
            .iter()
            .map(|cell| cell.element().clone())
            .collect()
    }

    /// Whether `element` belongs to this gallery.
    pub fn owns(&self, element: &ElementOf<S>) -> bool {
        self.cells.iter().any(|cell| cell.element() == element)
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
    use crate::host::memory::{MemoryElement, MemorySurface};
    use crate::host::{CellSize, Surface};
    use crate::options::GalleryOptions;
    use crate::Gallery;

    fn gallery(count: usize) -> (Gallery<MemorySurface>, Vec<MemoryElement>) {
        let elements: Vec<MemoryElement> = (0..count)
            .map(|i| MemoryElement::new(format!("cell{i}"), 100.0, 80.0))
            .collect();
        let surface = MemorySurface::with_children(300.0, 200.0, elements.clone());
        let gallery = Gallery::new(surface, GalleryOptions::default()).unwrap();
        (gallery, elements)
    }

    #[test]
    fn test_cell_size_change_repositions_followers() {
        let (mut gallery, elements) = gallery(3);
        elements[1].set_size(CellSize::new(150.0, 120.0));
        gallery.cell_size_change(&elements[1]);

        let xs: Vec<f32> = gallery.cells().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0.0, 100.0, 250.0]);
        assert_eq!(gallery.slideable_width(), 350.0);
        assert_eq!(gallery.max_cell_height(), 120.0);
        assert_eq!(gallery.surface().viewport_height(), 120.0);
    }

    #[test]
    fn test_cell_size_change_shrinking_tallest_lowers_height() {
        let (mut gallery, elements) = gallery(3);
        elements[1].set_size(CellSize::new(100.0, 120.0));
        gallery.cell_size_change(&elements[1]);
        assert_eq!(gallery.max_cell_height(), 120.0);

        elements[1].set_size(CellSize::new(100.0, 40.0));
        gallery.cell_size_change(&elements[1]);
        assert_eq!(gallery.max_cell_height(), 80.0);
        assert_eq!(gallery.surface().viewport_height(), 80.0);
        let xs: Vec<f32> = gallery.cells().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0.0, 100.0, 200.0]);
    }

    #[test]
    fn test_insert_places_elements_in_slider() {
        let (mut gallery, elements) = gallery(2);
        let new = MemoryElement::new("new", 100.0, 80.0);
        gallery.insert(&[new.clone()], 1);

        let slider: Vec<MemoryElement> = gallery.surface().slider_children();
        assert_eq!(slider, vec![elements[0].clone(), new, elements[1].clone()]);
    }

    #[test]
    fn test_remove_unknown_element_is_noop() {
        let (mut gallery, _) = gallery(2);
        let stranger = MemoryElement::new("stranger", 100.0, 80.0);
        gallery.remove(&[stranger]);
        assert_eq!(gallery.cells().len(), 2);
    }

    #[test]
    fn test_owns() {
        let (gallery, elements) = gallery(2);
        assert!(gallery.owns(&elements[0]));
        assert!(!gallery.owns(&MemoryElement::new("x", 1.0, 1.0)));
        assert_eq!(gallery.cell_elements(), elements);
    }
}
