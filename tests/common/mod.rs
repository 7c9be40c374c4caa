//! Common gallery builders and recorders for integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use slidekit::host::memory::{MemoryElement, MemorySurface};
use slidekit::{Gallery, GalleryEvent, GalleryOptions, MotionDriver, Positionable};

/// Elements named `cell0..` with the given widths and a fixed height.
pub fn elements(widths: &[f32]) -> Vec<MemoryElement> {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| MemoryElement::new(format!("cell{i}"), *w, 80.0))
        .collect()
}

pub fn uniform_elements(count: usize, width: f32) -> Vec<MemoryElement> {
    elements(&vec![width; count])
}

pub fn wrap_options() -> GalleryOptions {
    GalleryOptions {
        wrap_around: true,
        ..GalleryOptions::default()
    }
}

/// Gallery over `count` cells of `width`, in a surface `surface_width` wide.
pub fn uniform_gallery(
    count: usize,
    width: f32,
    surface_width: f32,
    options: GalleryOptions,
) -> (Gallery<MemorySurface>, Vec<MemoryElement>) {
    let cells = uniform_elements(count, width);
    let surface = MemorySurface::with_children(surface_width, 200.0, cells.clone());
    let gallery = Gallery::new(surface, options).expect("valid options");
    (gallery, cells)
}

pub fn xs(gallery: &Gallery<MemorySurface>) -> Vec<f32> {
    gallery.cells().iter().map(|c| c.x).collect()
}

/// Collect every event the gallery fires from now on.
pub fn record_events(gallery: &mut Gallery<MemorySurface>) -> Rc<RefCell<Vec<GalleryEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    gallery.on(move |event| sink.borrow_mut().push(event));
    log
}

/// Motion driver that records start calls and leaves the offset alone.
#[derive(Debug, Default, Clone)]
pub struct RecordingDriver {
    pub targets: Rc<RefCell<Vec<Option<f32>>>>,
    pub stops: Rc<RefCell<usize>>,
}

impl MotionDriver for RecordingDriver {
    fn start(&mut self, gallery: &mut dyn Positionable) {
        self.targets.borrow_mut().push(gallery.selected_target());
    }

    fn stop(&mut self) {
        *self.stops.borrow_mut() += 1;
    }
}
