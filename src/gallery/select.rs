//! Selection, slider rendering and the motion capability impls.

use tracing::trace;

use super::motion::{Positionable, Selectable};
use super::Gallery;
use crate::events::GalleryEvent;
use crate::host::Surface;
use crate::layout::WrapMetrics;
use crate::selection::{modulo, resolve, step_for_key, LoopShift, Step};

impl<S: Surface> Gallery<S> {
    /// Select the cell at `index`.
    ///
    /// With wrap-around, out-of-range requests fold into range and the
    /// tracked offset moves by one loop so the slider stays continuous.
    /// `is_wrap` folds without moving the offset. Requests with no backing
    /// cell are ignored.
    pub fn select(&mut self, index: isize, is_wrap: bool) {
        if !self.is_active {
            return;
        }
        let Some(resolution) = resolve(
            index,
            self.cells.len(),
            self.options.wrap_around,
            is_wrap,
        ) else {
            return;
        };
        match resolution.shift {
            LoopShift::Backward => self.x -= self.cells.slideable_width(),
            LoopShift::Forward => self.x += self.cells.slideable_width(),
            LoopShift::None => {}
        }
        let Some(element) = self
            .cells
            .get(resolution.index)
            .map(|cell| cell.element().clone())
        else {
            return;
        };
        self.selection.commit(resolution.index, &element);
        trace!(requested = index, selected = resolution.index, "select");
        self.start_animation();
        self.listeners.emit(GalleryEvent::Select);
    }

    /// Select the cell before the current one.
    pub fn previous(&mut self, is_wrap: bool) {
        let index = self.selected_signed().saturating_sub(1);
        self.select(index, is_wrap);
    }

    /// Select the cell after the current one.
    pub fn next(&mut self, is_wrap: bool) {
        let index = self.selected_signed().saturating_add(1);
        self.select(index, is_wrap);
    }

    /// Step one cell for an arrow key when keyboard access is enabled.
    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.is_active || !self.options.accessibility {
            return false;
        }
        match step_for_key(key, self.options.right_to_left) {
            Some(Step::Previous) => self.previous(false),
            Some(Step::Next) => self.next(false),
            None => return false,
        }
        true
    }

    /// Jump the tracked offset to the selected cell and render.
    pub fn position_slider_at_selected(&mut self) {
        if let Some(cell) = self.cells.get(self.selection.index()) {
            self.x = -cell.target;
        }
        self.render_slider();
    }

    /// Render the slider at the tracked offset.
    ///
    /// With wrap-around the offset is normalized into one loop and the
    /// boundary cells are shifted to fill the gaps either side.
    pub(super) fn render_slider(&mut self) {
        let mut x = self.x;
        let slideable_width = self.cells.slideable_width();
        if self.options.wrap_around && slideable_width > 0.0 {
            x = modulo(x, slideable_width) - slideable_width;
            let metrics = WrapMetrics {
                surface_width: self.size.inner_width,
                cursor_position: self.cursor_position,
                slideable_width,
            };
            self.wrap
                .apply(self.cells.cells_mut(), x, metrics, self.side);
        }
        self.surface
            .render_slider(self.side, x + self.cursor_position);
    }

    fn start_animation(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            driver.start(self);
            self.driver = Some(driver);
        }
    }

    /// Whether the motion driver reports an animation in flight.
    pub fn is_animating(&self) -> bool {
        self.driver.as_ref().is_some_and(|d| d.is_animating())
    }
}

impl<S: Surface> Positionable for Gallery<S> {
    fn position(&self) -> f32 {
        self.x
    }

    fn set_position(&mut self, x: f32) {
        self.x = x;
    }

    fn velocity(&self) -> f32 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    fn selected_target(&self) -> Option<f32> {
        self.selected_cell().map(|cell| cell.target)
    }

    fn render_position(&mut self) {
        self.render_slider();
    }
}

impl<S: Surface> Selectable for Gallery<S> {
    fn selected_index(&self) -> Option<usize> {
        Gallery::selected_index(self)
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell_target(&self, index: usize) -> Option<f32> {
        self.cells.get(index).map(|cell| cell.target)
    }

    fn slideable_width(&self) -> f32 {
        self.cells.slideable_width()
    }

    fn select(&mut self, index: isize, is_wrap: bool) {
        Gallery::select(self, index, is_wrap);
    }
}
