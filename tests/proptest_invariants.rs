//! Property-based invariant tests for gallery layout.
//!
//! These tests verify structural invariants that must hold for any valid inputs:
//!
//! 1. Cells are contiguous from 0 and slideable width is their total.
//! 2. Insert and remove keep contiguity and the height maximum.
//! 3. The selected index is always in range after structural change.
//! 4. With wrap-around any requested index resolves into range.
//! 5. Gap sets cover their gap unless every cell was taken.
//! 6. Recomputing the wrap sets is idempotent.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::wrap_options;
use proptest::prelude::*;
use slidekit::host::memory::{MemoryElement, MemorySurface};
use slidekit::{Gallery, GalleryOptions};

// ── Helpers ─────────────────────────────────────────────────────────────

// Whole-pixel widths keep every running sum exact in f32.
fn widths(max_len: usize) -> impl Strategy<Value = Vec<u16>> {
    proptest::collection::vec(1u16..=400, 0..=max_len)
}

fn build(widths: &[u16], surface_width: f32, options: GalleryOptions) -> Gallery<MemorySurface> {
    let elements: Vec<MemoryElement> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| MemoryElement::new(format!("cell{i}"), f32::from(*w), f32::from(*w % 97)))
        .collect();
    let surface = MemorySurface::with_children(surface_width, 300.0, elements);
    Gallery::new(surface, options).unwrap()
}

fn assert_contiguous(gallery: &Gallery<MemorySurface>) -> Result<(), TestCaseError> {
    let mut expected_x = 0.0f32;
    let mut max_height = 0.0f32;
    for cell in gallery.cells().iter() {
        prop_assert_eq!(cell.x, expected_x);
        expected_x += cell.size.outer_width;
        max_height = max_height.max(cell.size.outer_height);
    }
    prop_assert_eq!(gallery.slideable_width(), expected_x);
    prop_assert_eq!(gallery.max_cell_height(), max_height);
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Contiguity after activation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cells_contiguous_after_activation(values in widths(40)) {
        let gallery = build(&values, 500.0, GalleryOptions::default());
        prop_assert_eq!(gallery.cells().len(), values.len());
        assert_contiguous(&gallery)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Insert and remove keep contiguity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn insert_keeps_contiguity(
        values in widths(30),
        inserted in widths(5),
        index in 0usize..40,
    ) {
        let mut gallery = build(&values, 500.0, GalleryOptions::default());
        let new: Vec<MemoryElement> = inserted
            .iter()
            .map(|w| MemoryElement::new("new", f32::from(*w), 10.0))
            .collect();
        gallery.insert(&new, index);
        prop_assert_eq!(gallery.cells().len(), values.len() + inserted.len());
        assert_contiguous(&gallery)?;
    }
}

proptest! {
    #[test]
    fn remove_keeps_contiguity_and_selection(
        values in widths(30),
        selected in 0isize..30,
        mask in proptest::collection::vec(any::<bool>(), 30),
    ) {
        let mut gallery = build(&values, 500.0, GalleryOptions::default());
        gallery.select(selected, false);
        let doomed: Vec<MemoryElement> = gallery
            .cell_elements()
            .into_iter()
            .zip(mask.iter())
            .filter(|(_, remove)| **remove)
            .map(|(element, _)| element)
            .collect();
        let remaining = values.len() - doomed.len();
        gallery.remove(&doomed);

        prop_assert_eq!(gallery.cells().len(), remaining);
        assert_contiguous(&gallery)?;
        match gallery.selected_index() {
            Some(index) => prop_assert!(index < remaining),
            None => prop_assert_eq!(remaining, 0),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Wrap-around resolves every index into range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wrap_select_always_in_range(values in widths(20), requested in -1000isize..1000) {
        let mut gallery = build(&values, 500.0, wrap_options());
        gallery.select(requested, false);
        match gallery.selected_index() {
            Some(index) => {
                let len = isize::try_from(values.len()).unwrap();
                prop_assert_eq!(isize::try_from(index).unwrap(), requested.rem_euclid(len));
            }
            None => prop_assert!(values.is_empty()),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Gap coverage
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn gap_sets_cover_their_gaps(values in widths(20), surface_width in 50u16..1500) {
        let gallery = build(&values, f32::from(surface_width), wrap_options());
        let width_of = |indices: &[usize]| -> f32 {
            indices
                .iter()
                .map(|i| gallery.cells().get(*i).unwrap().size.outer_width)
                .sum()
        };
        let cursor = gallery.cursor_position();
        let before = gallery.before_shift_cells();
        let after = gallery.after_shift_cells();

        if !values.is_empty() {
            prop_assert!(width_of(before) > cursor || before.len() == values.len());
            prop_assert!(
                width_of(after) > f32::from(surface_width) - cursor || after.len() == values.len()
            );
        }
        // Walk order: backward from the end, forward from the start.
        for (step, index) in before.iter().enumerate() {
            prop_assert_eq!(*index, values.len() - 1 - step);
        }
        for (step, index) in after.iter().enumerate() {
            prop_assert_eq!(*index, step);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Idempotent recompute
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wrap_recompute_idempotent(values in widths(20), selected in 0isize..20) {
        let mut gallery = build(&values, 400.0, wrap_options());
        gallery.select(selected, false);
        gallery.resize();
        let first = gallery.snapshot();
        gallery.resize();
        prop_assert_eq!(first, gallery.snapshot());
    }
}
