//! Gallery controller - the primary entry point of the engine.
//!
//! `Gallery` owns the cell sequence and every value derived from it, and
//! re-runs the layout pipeline in a fixed order whenever something changes:
//! measure surface → size and position cells → wrap shift cells → container
//! height → selection. Structural edits live in `structure.rs`, selection
//! and slider rendering in `select.rs`.

pub mod motion;
mod select;
mod structure;

use tracing::debug;

use crate::error::Result;
use crate::events::{GalleryEvent, Listeners};
use crate::host::{OriginSide, Surface, SurfaceSize};
use crate::layout::{Cell, CellSequence, WrapShift};
use crate::options::GalleryOptions;
use crate::selection::Selection;
use crate::snapshot::{CellSnapshot, LayoutSnapshot};

use motion::{InstantSnap, MotionDriver};

/// Element type of a surface.
pub type ElementOf<S> = <S as Surface>::Element;

/// Horizontal gallery attached to a surface.
pub struct Gallery<S: Surface> {
    surface: S,
    options: GalleryOptions,
    side: OriginSide,
    is_active: bool,
    /// Surface size from the last measure
    size: SurfaceSize,
    /// Anchor offset in pixels (`inner_width * options.cursor_position`)
    cursor_position: f32,
    cells: CellSequence<ElementOf<S>>,
    wrap: WrapShift,
    selection: Selection<ElementOf<S>>,
    /// Tracked slider offset
    x: f32,
    velocity: f32,
    listeners: Listeners,
    driver: Option<Box<dyn MotionDriver>>,
}

impl<S: Surface> Gallery<S> {
    /// Attach to `surface` and activate, snapping instantly to selections.
    ///
    /// # Errors
    /// Returns an error if `options` fail validation.
    pub fn new(surface: S, options: GalleryOptions) -> Result<Self> {
        Self::with_driver(surface, options, Box::new(InstantSnap))
    }

    /// Attach to `surface` with a custom motion driver and activate.
    ///
    /// # Errors
    /// Returns an error if `options` fail validation.
    pub fn with_driver(
        surface: S,
        options: GalleryOptions,
        driver: Box<dyn MotionDriver>,
    ) -> Result<Self> {
        options.validate()?;
        let side = OriginSide::from_right_to_left(options.right_to_left);
        let mut gallery = Self {
            surface,
            options,
            side,
            is_active: false,
            size: SurfaceSize::default(),
            cursor_position: 0.0,
            cells: CellSequence::new(),
            wrap: WrapShift::new(),
            selection: Selection::default(),
            x: 0.0,
            velocity: 0.0,
            listeners: Listeners::new(),
            driver: Some(driver),
        };
        gallery.activate();
        Ok(gallery)
    }

    /// Take over the surface's children and lay them out. No-op if active.
    pub fn activate(&mut self) {
        if self.is_active {
            return;
        }
        self.is_active = true;
        self.surface.mount(self.side);
        self.get_size();
        self.reload_cells();
        self.position_slider_at_selected();
        let index = self.selected_signed();
        self.select(index, false);
        debug!(
            cells = self.cells.len(),
            slideable_width = self.cells.slideable_width(),
            "gallery activated"
        );
        self.listeners.emit(GalleryEvent::Activate);
    }

    /// Hand every element back to the container and drop derived state.
    /// No-op if inactive.
    pub fn deactivate(&mut self) {
        if !self.is_active {
            return;
        }
        for cell in self.cells.take_all() {
            cell.release(self.side);
        }
        self.selection.clear_marker();
        self.wrap = WrapShift::new();
        self.surface.unmount();
        if let Some(driver) = self.driver.as_mut() {
            driver.stop();
        }
        self.velocity = 0.0;
        self.is_active = false;
        debug!("gallery deactivated");
        self.listeners.emit(GalleryEvent::Deactivate);
    }

    /// Deactivate and give the surface back.
    pub fn destroy(mut self) -> S {
        self.deactivate();
        self.listeners.clear();
        self.surface
    }

    /// Re-measure everything after the surface changed size.
    pub fn resize(&mut self) {
        if !self.is_active {
            return;
        }
        self.get_size();
        if self.options.wrap_around {
            self.x = crate::selection::modulo(self.x, self.cells.slideable_width());
        }
        self.position_cells();
        self.get_wrap_shift_cells();
        self.set_container_size();
        self.position_slider_at_selected();
        debug!(
            inner_width = self.size.inner_width,
            cursor_position = self.cursor_position,
            "gallery resized"
        );
        self.listeners.emit(GalleryEvent::Resize);
    }

    /// Register a listener for every [`GalleryEvent`].
    pub fn on(&mut self, listener: impl FnMut(GalleryEvent) + 'static) {
        self.listeners.add(listener);
    }

    /// Replace the motion driver.
    pub fn set_motion_driver(&mut self, driver: Box<dyn MotionDriver>) {
        if let Some(mut old) = self.driver.replace(driver) {
            old.stop();
        }
    }

    // ----- pipeline stages ----- //

    fn get_size(&mut self) {
        self.size = self.surface.measure();
        self.cursor_position = self.size.inner_width * self.options.cursor_position;
    }

    fn position_cells(&mut self) {
        self.cells.size_all();
        self.cells
            .position_from(0, self.side, self.options.target_position);
    }

    fn get_wrap_shift_cells(&mut self) {
        if !self.options.wrap_around {
            return;
        }
        self.wrap.recompute(
            self.cells.cells_mut(),
            self.size.inner_width,
            self.cursor_position,
            self.side,
        );
    }

    fn set_container_size(&mut self) {
        self.surface
            .set_viewport_height(self.cells.max_cell_height());
    }

    // ----- queries ----- //

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn options(&self) -> &GalleryOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn origin_side(&self) -> OriginSide {
        self.side
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    pub fn cells(&self) -> &CellSequence<ElementOf<S>> {
        &self.cells
    }

    /// Cell owning `element`.
    pub fn cell(&self, element: &ElementOf<S>) -> Option<&Cell<ElementOf<S>>> {
        self.cells.index_of(element).and_then(|i| self.cells.get(i))
    }

    /// Cells owning `elements`; unknown elements are skipped.
    pub fn cells_for(&self, elements: &[ElementOf<S>]) -> Vec<&Cell<ElementOf<S>>> {
        elements.iter().filter_map(|e| self.cell(e)).collect()
    }

    pub fn last_cell(&self) -> Option<&Cell<ElementOf<S>>> {
        self.cells.last()
    }

    /// Selected index, `None` while inactive or empty.
    pub fn selected_index(&self) -> Option<usize> {
        if !self.is_active || self.cells.is_empty() {
            return None;
        }
        Some(self.selection.index())
    }

    pub fn selected_cell(&self) -> Option<&Cell<ElementOf<S>>> {
        self.selected_index().and_then(|i| self.cells.get(i))
    }

    pub fn slideable_width(&self) -> f32 {
        self.cells.slideable_width()
    }

    pub fn max_cell_height(&self) -> f32 {
        self.cells.max_cell_height()
    }

    pub fn cursor_position(&self) -> f32 {
        self.cursor_position
    }

    /// Tracked slider offset.
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn before_shift_cells(&self) -> &[usize] {
        self.wrap.before()
    }

    pub fn after_shift_cells(&self) -> &[usize] {
        self.wrap.after()
    }

    /// Published state as a serializable record.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            cells: self
                .cells
                .iter()
                .map(|cell| CellSnapshot {
                    x: cell.x,
                    target: cell.target,
                    shift: cell.shift,
                    outer_width: cell.size.outer_width,
                    outer_height: cell.size.outer_height,
                })
                .collect(),
            slideable_width: self.cells.slideable_width(),
            max_cell_height: self.cells.max_cell_height(),
            cursor_position: self.cursor_position,
            x: self.x,
            selected_index: self.selected_index(),
            before_shift: self.wrap.before().to_vec(),
            after_shift: self.wrap.after().to_vec(),
        }
    }

    fn selected_signed(&self) -> isize {
        isize::try_from(self.selection.index()).unwrap_or(isize::MAX)
    }
}
