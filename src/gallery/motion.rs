//! Capabilities the gallery exposes to an external motion driver.
//!
//! Drag and momentum physics live outside the engine. A driver receives the
//! gallery through [`Positionable`] when a selection is committed and may
//! read or write the slider offset and velocity. Frame-driven drivers keep a
//! handle to the gallery and call back through [`Selectable`] when a drag
//! settles on a new cell.

/// Slider offset and velocity, plus rendering.
pub trait Positionable {
    /// Tracked slider offset (negative moves content toward the origin).
    fn position(&self) -> f32;

    fn set_position(&mut self, x: f32);

    fn velocity(&self) -> f32;

    fn set_velocity(&mut self, velocity: f32);

    /// Target of the selected cell, if any.
    fn selected_target(&self) -> Option<f32>;

    /// Push the tracked offset to the surface (including wrap shifts).
    fn render_position(&mut self);
}

/// Selection queries and navigation.
pub trait Selectable {
    fn selected_index(&self) -> Option<usize>;

    fn cell_count(&self) -> usize;

    /// Target of the cell at `index`.
    fn cell_target(&self, index: usize) -> Option<f32>;

    /// Width of one full loop.
    fn slideable_width(&self) -> f32;

    /// Select `index`; `is_wrap` folds out-of-range requests into range.
    fn select(&mut self, index: isize, is_wrap: bool);
}

/// Moves the slider toward the selection after it changes.
pub trait MotionDriver {
    /// Called after every committed selection.
    fn start(&mut self, gallery: &mut dyn Positionable);

    /// Called on deactivation.
    fn stop(&mut self) {}

    fn is_animating(&self) -> bool {
        false
    }
}

/// Driver that jumps straight to the selected cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantSnap;

impl MotionDriver for InstantSnap {
    fn start(&mut self, gallery: &mut dyn Positionable) {
        let Some(target) = gallery.selected_target() else {
            return;
        };
        gallery.set_velocity(0.0);
        gallery.set_position(-target);
        gallery.render_position();
    }
}
