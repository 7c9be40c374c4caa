//! Wrap-around tests
//!
//! Gap cell collection, shift rendering at the loop seam and index folding.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{uniform_gallery, wrap_options, RecordingDriver};
use slidekit::host::memory::{MemoryElement, MemorySurface};
use slidekit::layout::WrapDirection;
use slidekit::{Gallery, GalleryOptions};

fn shifts(gallery: &Gallery<MemorySurface>) -> Vec<WrapDirection> {
    gallery.cells().iter().map(|c| c.shift).collect()
}

#[test]
fn test_three_cells_gap_sets() {
    let (gallery, _) = uniform_gallery(3, 100.0, 250.0, wrap_options());
    assert_eq!(gallery.cursor_position(), 125.0);
    assert_eq!(gallery.before_shift_cells(), &[2, 1]);
    assert_eq!(gallery.after_shift_cells(), &[0, 1]);
}

#[test]
fn test_exact_multiple_gap_takes_extra_cell() {
    let (gallery, _) = uniform_gallery(4, 100.0, 400.0, wrap_options());
    assert_eq!(gallery.before_shift_cells(), &[3, 2, 1]);
    assert_eq!(gallery.after_shift_cells(), &[0, 1, 2]);
}

#[test]
fn test_gap_sets_stop_when_cells_run_out() {
    let (gallery, _) = uniform_gallery(2, 50.0, 1000.0, wrap_options());
    assert_eq!(gallery.before_shift_cells(), &[1, 0]);
    assert_eq!(gallery.after_shift_cells(), &[0, 1]);
}

#[test]
fn test_no_gap_sets_without_wrap() {
    let (gallery, _) = uniform_gallery(3, 100.0, 250.0, GalleryOptions::default());
    assert!(gallery.before_shift_cells().is_empty());
    assert!(gallery.after_shift_cells().is_empty());
}

#[test]
fn test_last_cell_fills_gap_before_first() {
    let (gallery, cells) = uniform_gallery(3, 100.0, 250.0, wrap_options());
    // Slider sits at -50: the 75px left of cell 0 is filled by cell 2.
    assert_eq!(gallery.x(), -50.0);
    assert_eq!(gallery.surface().slider_offset(), Some(75.0));
    assert_eq!(
        shifts(&gallery),
        vec![WrapDirection::None, WrapDirection::None, WrapDirection::Before]
    );
    assert_eq!(cells[2].offset(), Some(-100.0));
}

#[test]
fn test_first_cell_fills_gap_after_last() {
    let (mut gallery, cells) = uniform_gallery(3, 100.0, 250.0, wrap_options());
    gallery.select(2, false);
    assert_eq!(gallery.x(), -250.0);
    assert_eq!(
        shifts(&gallery),
        vec![WrapDirection::After, WrapDirection::None, WrapDirection::None]
    );
    assert_eq!(cells[0].offset(), Some(300.0));
    assert_eq!(cells[2].offset(), Some(200.0));
}

#[test]
fn test_middle_selection_unshifts_everything() {
    let (mut gallery, cells) = uniform_gallery(3, 100.0, 250.0, wrap_options());
    gallery.next(false);
    assert_eq!(gallery.selected_index(), Some(1));
    assert!(shifts(&gallery).iter().all(|s| *s == WrapDirection::None));
    let offsets: Vec<Option<f32>> = cells.iter().map(MemoryElement::offset).collect();
    assert_eq!(offsets, vec![Some(0.0), Some(100.0), Some(200.0)]);
}

#[test]
fn test_recompute_is_idempotent() {
    let (mut gallery, _) = uniform_gallery(5, 100.0, 250.0, wrap_options());
    gallery.resize();
    let first = (
        gallery.before_shift_cells().to_vec(),
        gallery.after_shift_cells().to_vec(),
        shifts(&gallery),
    );
    gallery.resize();
    let second = (
        gallery.before_shift_cells().to_vec(),
        gallery.after_shift_cells().to_vec(),
        shifts(&gallery),
    );
    assert_eq!(first, second);
}

#[test]
fn test_gap_sets_follow_inserts() {
    let (mut gallery, _) = uniform_gallery(3, 100.0, 250.0, wrap_options());
    gallery.prepend(&[MemoryElement::new("wide", 200.0, 80.0)]);
    assert_eq!(gallery.before_shift_cells(), &[3, 2]);
    assert_eq!(gallery.after_shift_cells(), &[0]);
}

#[test]
fn test_wrap_with_no_cells() {
    let surface = MemorySurface::new(250.0, 200.0);
    let mut gallery = Gallery::new(surface, wrap_options()).unwrap();
    assert!(gallery.before_shift_cells().is_empty());
    gallery.next(false);
    gallery.resize();
    assert_eq!(gallery.selected_index(), None);
    assert_eq!(gallery.surface().slider_offset(), Some(125.0));
}

#[test]
fn test_select_before_first_wraps_to_last() {
    let (mut gallery, _) = uniform_gallery(5, 100.0, 250.0, wrap_options());
    gallery.select(-1, false);
    assert_eq!(gallery.selected_index(), Some(4));
}

#[test]
fn test_select_past_last_wraps_to_first() {
    let (mut gallery, _) = uniform_gallery(5, 100.0, 250.0, wrap_options());
    gallery.select(4, false);
    gallery.next(false);
    assert_eq!(gallery.selected_index(), Some(0));
    gallery.previous(false);
    assert_eq!(gallery.selected_index(), Some(4));
}

#[test]
fn test_is_wrap_folds_without_wrap_around() {
    let (mut gallery, _) = uniform_gallery(5, 100.0, 250.0, GalleryOptions::default());
    gallery.select(2 * 5 + 3, true);
    assert_eq!(gallery.selected_index(), Some(3));

    gallery.select(7, false);
    assert_eq!(gallery.selected_index(), Some(3), "out of range without wrap is ignored");
    gallery.select(-1, false);
    assert_eq!(gallery.selected_index(), Some(3));
}

#[test]
fn test_loop_crossing_keeps_offset_continuous() {
    let driver = RecordingDriver::default();
    let elements: Vec<MemoryElement> = (0..3)
        .map(|i| MemoryElement::new(format!("cell{i}"), 100.0, 80.0))
        .collect();
    let surface = MemorySurface::with_children(250.0, 200.0, elements);
    let mut gallery = Gallery::with_driver(surface, wrap_options(), Box::new(driver)).unwrap();
    assert_eq!(gallery.x(), -50.0);

    // The driver leaves the offset alone, so only the loop shift applies.
    gallery.select(-1, false);
    assert_eq!(gallery.selected_index(), Some(2));
    assert_eq!(gallery.x(), -350.0);

    gallery.select(3, false);
    assert_eq!(gallery.selected_index(), Some(0));
    assert_eq!(gallery.x(), -50.0);
}

#[test]
fn test_resize_normalizes_offset_into_loop() {
    let driver = RecordingDriver::default();
    let elements: Vec<MemoryElement> = (0..3)
        .map(|i| MemoryElement::new(format!("cell{i}"), 100.0, 80.0))
        .collect();
    let surface = MemorySurface::with_children(250.0, 200.0, elements);
    let mut gallery = Gallery::with_driver(surface, wrap_options(), Box::new(driver)).unwrap();
    gallery.select(-1, false);
    gallery.resize();
    // Positioned back at the selected cell's target.
    assert_eq!(gallery.x(), -250.0);
}
