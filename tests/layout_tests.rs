//! Cell positioning tests
//!
//! Offsets, targets, container height, insert/remove repositioning and
//! resize handling on the in-memory host.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{elements, uniform_gallery, xs};
use slidekit::host::memory::{MemoryElement, MemorySurface};
use slidekit::host::{CellSize, OriginSide, Surface};
use slidekit::{Gallery, GalleryOptions};

#[test]
fn test_cells_are_contiguous() {
    let cells = vec![
        MemoryElement::with_size("a", CellSize::new(100.0, 50.0).with_margins(10.0, 5.0)),
        MemoryElement::with_size("b", CellSize::new(60.0, 90.0)),
        MemoryElement::with_size("c", CellSize::new(30.0, 70.0).with_margins(0.0, 20.0)),
    ];
    let surface = MemorySurface::with_children(400.0, 200.0, cells);
    let gallery = Gallery::new(surface, GalleryOptions::default()).unwrap();

    assert_eq!(xs(&gallery), vec![0.0, 115.0, 175.0]);
    assert_eq!(gallery.slideable_width(), 225.0);
    assert_eq!(gallery.max_cell_height(), 90.0);
    assert_eq!(gallery.surface().viewport_height(), 90.0);
}

#[test]
fn test_target_includes_origin_margin() {
    let cell = MemoryElement::with_size("a", CellSize::new(100.0, 50.0).with_margins(10.0, 30.0));
    let surface = MemorySurface::with_children(400.0, 200.0, vec![cell.clone()]);
    let gallery = Gallery::new(surface, GalleryOptions::default()).unwrap();
    assert_eq!(gallery.cells().get(0).unwrap().target, 60.0);

    let surface = MemorySurface::with_children(400.0, 200.0, vec![cell]);
    let options = GalleryOptions {
        right_to_left: true,
        ..GalleryOptions::default()
    };
    let gallery = Gallery::new(surface, options).unwrap();
    assert_eq!(gallery.origin_side(), OriginSide::Right);
    assert_eq!(gallery.cells().get(0).unwrap().target, 80.0);
}

#[test]
fn test_target_position_fraction() {
    let surface = MemorySurface::with_children(400.0, 200.0, elements(&[100.0, 100.0]));
    let options = GalleryOptions {
        target_position: 0.0,
        ..GalleryOptions::default()
    };
    let gallery = Gallery::new(surface, options).unwrap();
    let targets: Vec<f32> = gallery.cells().iter().map(|c| c.target).collect();
    assert_eq!(targets, vec![0.0, 100.0]);
}

#[test]
fn test_elements_render_at_offsets() {
    let (gallery, cells) = uniform_gallery(3, 100.0, 300.0, GalleryOptions::default());
    let offsets: Vec<Option<f32>> = cells.iter().map(MemoryElement::offset).collect();
    assert_eq!(offsets, vec![Some(0.0), Some(100.0), Some(200.0)]);
    assert_eq!(cells[0].offset_side(), Some(OriginSide::Left));
    assert!(gallery.surface().is_mounted());
    assert!(gallery.surface().container_children().is_empty());
}

#[test]
fn test_insert_repositions_tail() {
    let (mut gallery, _) = uniform_gallery(5, 100.0, 300.0, GalleryOptions::default());
    let new = MemoryElement::new("new", 100.0, 80.0);
    gallery.insert(&[new.clone()], 2);

    assert_eq!(gallery.cells().len(), 6);
    assert_eq!(gallery.cells().get(2).unwrap().x, 200.0);
    assert_eq!(gallery.cells().get(5).unwrap().x, 500.0);
    assert_eq!(gallery.cells().get(2).unwrap().element(), &new);
    assert_eq!(gallery.slideable_width(), 600.0);
}

#[test]
fn test_insert_past_end_appends() {
    let (mut gallery, _) = uniform_gallery(2, 100.0, 300.0, GalleryOptions::default());
    let new = MemoryElement::new("new", 50.0, 80.0);
    gallery.insert(&[new.clone()], 99);
    assert_eq!(xs(&gallery), vec![0.0, 100.0, 200.0]);
    assert_eq!(gallery.last_cell().unwrap().element(), &new);
}

#[test]
fn test_append_and_prepend() {
    let (mut gallery, cells) = uniform_gallery(2, 100.0, 300.0, GalleryOptions::default());
    let first = MemoryElement::new("first", 40.0, 80.0);
    let last = MemoryElement::new("last", 60.0, 80.0);
    gallery.prepend(&[first.clone()]);
    gallery.append(&[last.clone()]);

    assert_eq!(
        gallery.cell_elements(),
        vec![first, cells[0].clone(), cells[1].clone(), last]
    );
    assert_eq!(xs(&gallery), vec![0.0, 40.0, 140.0, 240.0]);
    assert_eq!(gallery.slideable_width(), 300.0);
}

#[test]
fn test_insert_taller_cell_grows_container() {
    let (mut gallery, _) = uniform_gallery(3, 100.0, 300.0, GalleryOptions::default());
    gallery.append(&[MemoryElement::new("tall", 100.0, 300.0)]);
    assert_eq!(gallery.max_cell_height(), 300.0);
    assert_eq!(gallery.surface().viewport_height(), 300.0);
}

#[test]
fn test_remove_repositions_and_detaches() {
    let (mut gallery, cells) = uniform_gallery(4, 100.0, 300.0, GalleryOptions::default());
    gallery.remove(&[cells[1].clone(), cells[2].clone()]);

    assert_eq!(xs(&gallery), vec![0.0, 100.0]);
    assert_eq!(gallery.slideable_width(), 200.0);
    assert!(!cells[1].is_attached());
    assert_eq!(cells[1].offset(), None);
    assert_eq!(
        gallery.surface().slider_children(),
        vec![cells[0].clone(), cells[3].clone()]
    );
}

#[test]
fn test_remove_tallest_shrinks_container() {
    let surface = MemorySurface::with_children(
        300.0,
        200.0,
        vec![
            MemoryElement::new("a", 100.0, 80.0),
            MemoryElement::new("tall", 100.0, 150.0),
        ],
    );
    let mut gallery = Gallery::new(surface, GalleryOptions::default()).unwrap();
    let tall = gallery.cells().get(1).unwrap().element().clone();
    gallery.remove(&[tall]);
    assert_eq!(gallery.max_cell_height(), 80.0);
}

#[test]
fn test_resize_moves_cursor_and_slider() {
    let (mut gallery, _) = uniform_gallery(5, 100.0, 300.0, GalleryOptions::default());
    gallery.select(2, false);
    assert_eq!(gallery.cursor_position(), 150.0);
    assert_eq!(gallery.x(), -250.0);
    assert_eq!(gallery.surface().slider_offset(), Some(-100.0));

    gallery.surface_mut().set_size(600.0, 200.0);
    gallery.resize();
    assert_eq!(gallery.cursor_position(), 300.0);
    assert_eq!(gallery.x(), -250.0);
    assert_eq!(gallery.surface().slider_offset(), Some(50.0));
    assert_eq!(gallery.selected_index(), Some(2));
}

#[test]
fn test_resize_remeasures_cells() {
    let (mut gallery, cells) = uniform_gallery(3, 100.0, 300.0, GalleryOptions::default());
    cells[0].set_size(CellSize::new(50.0, 80.0));
    // Not picked up until something asks for a re-measure.
    assert_eq!(xs(&gallery), vec![0.0, 100.0, 200.0]);

    gallery.resize();
    assert_eq!(xs(&gallery), vec![0.0, 50.0, 150.0]);
}

#[test]
fn test_cell_change_with_sizing() {
    let (mut gallery, cells) = uniform_gallery(3, 100.0, 300.0, GalleryOptions::default());
    cells[2].set_size(CellSize::new(100.0, 160.0));
    gallery.cell_change(0, false);
    assert_eq!(gallery.max_cell_height(), 160.0);
}

#[test]
fn test_cell_selector_filters_children() {
    let cells = vec![
        MemoryElement::new("a", 100.0, 80.0).with_class("slide"),
        MemoryElement::new("decoration", 20.0, 20.0),
        MemoryElement::new("b", 100.0, 80.0).with_class("slide"),
    ];
    let surface = MemorySurface::with_children(300.0, 200.0, cells.clone());
    let options = GalleryOptions {
        cell_selector: Some(".slide".to_string()),
        ..GalleryOptions::default()
    };
    let gallery = Gallery::new(surface, options).unwrap();

    assert_eq!(gallery.cell_elements(), vec![cells[0].clone(), cells[2].clone()]);
    assert_eq!(xs(&gallery), vec![0.0, 100.0]);
}

#[test]
fn test_cell_selector_finds_descendants() {
    let group = MemoryElement::new("group", 0.0, 0.0);
    let inner = MemoryElement::new("inner", 70.0, 80.0).with_class("slide");
    group.add_child(inner.clone());
    let surface = MemorySurface::with_children(300.0, 200.0, vec![group]);
    let options = GalleryOptions {
        cell_selector: Some(".slide".to_string()),
        ..GalleryOptions::default()
    };
    let gallery = Gallery::new(surface, options).unwrap();
    assert_eq!(gallery.cell_elements(), vec![inner]);
}

#[test]
fn test_deactivate_returns_children() {
    let (mut gallery, cells) = uniform_gallery(3, 100.0, 300.0, GalleryOptions::default());
    gallery.deactivate();

    assert!(!gallery.is_active());
    assert!(gallery.cells().is_empty());
    assert_eq!(gallery.selected_index(), None);
    assert!(!gallery.surface().is_mounted());
    assert_eq!(gallery.surface().container_children(), cells);
    assert!(cells.iter().all(|c| c.offset().is_none() && !c.is_selected()));
}

#[test]
fn test_reactivate_rebuilds_layout() {
    let (mut gallery, _) = uniform_gallery(3, 100.0, 300.0, GalleryOptions::default());
    gallery.deactivate();
    gallery.activate();
    assert_eq!(xs(&gallery), vec![0.0, 100.0, 200.0]);
    assert_eq!(gallery.selected_index(), Some(0));
}

#[test]
fn test_destroy_hands_back_surface() {
    let (gallery, cells) = uniform_gallery(2, 100.0, 300.0, GalleryOptions::default());
    let surface = gallery.destroy();
    assert_eq!(surface.container_children(), cells);
    assert!(surface.slider_children().is_empty());
}

#[test]
fn test_reload_cells_picks_up_slider_changes() {
    let (mut gallery, _) = uniform_gallery(2, 100.0, 300.0, GalleryOptions::default());
    let extra = MemoryElement::new("extra", 50.0, 80.0);
    gallery.surface_mut().insert_elements(&[extra.clone()], None);
    assert_eq!(gallery.cells().len(), 2);

    gallery.reload_cells();
    assert_eq!(gallery.cells().len(), 3);
    assert_eq!(gallery.slideable_width(), 250.0);
    assert_eq!(gallery.last_cell().unwrap().element(), &extra);
}

#[test]
fn test_cell_lookup() {
    let (gallery, cells) = uniform_gallery(3, 100.0, 300.0, GalleryOptions::default());
    assert_eq!(gallery.cell(&cells[1]).unwrap().x, 100.0);
    let stranger = MemoryElement::new("x", 1.0, 1.0);
    let found = gallery.cells_for(&[cells[2].clone(), stranger]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].x, 200.0);
}
