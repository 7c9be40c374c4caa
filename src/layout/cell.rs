//! A single gallery cell: one element plus its measured size and position.

use serde::{Deserialize, Serialize};

use crate::host::{CellElement, CellSize, OriginSide};

/// Which loop a cell is rendered in while wrap-around is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapDirection {
    /// Rendered at its base position.
    #[default]
    None,
    /// Rendered one full loop before its base position.
    Before,
    /// Rendered one full loop after its base position.
    After,
}

impl WrapDirection {
    /// Multiplier applied to the slideable width.
    pub fn sign(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Before => -1.0,
            Self::After => 1.0,
        }
    }
}

/// Element wrapper owned by a [`super::CellSequence`].
#[derive(Debug, Clone)]
pub struct Cell<E> {
    element: E,
    /// Outer size including margins; refreshed by [`Cell::measure`]
    pub size: CellSize,
    /// Offset from the slider's origin side
    pub x: f32,
    /// Slider offset that aligns this cell with the cursor
    pub target: f32,
    /// Current wrap-around rendering
    pub shift: WrapDirection,
}

impl<E: CellElement> Cell<E> {
    /// Wrap an element. Size is zero until [`Cell::measure`] runs.
    pub fn new(element: E) -> Self {
        Self {
            element,
            size: CellSize::default(),
            x: 0.0,
            target: 0.0,
            shift: WrapDirection::None,
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Read the element's current outer size.
    pub fn measure(&mut self) {
        self.size = self.element.measure();
    }

    /// Store `x`, update the target and render at `x`.
    ///
    /// Rendering at the base position also clears any wrap shift.
    pub fn set_position(&mut self, x: f32, side: OriginSide, target_position: f32) {
        self.x = x;
        self.shift = WrapDirection::None;
        self.target = x + self.size.origin_margin(side) + self.size.width * target_position;
        self.element.render_offset(side, x);
    }

    /// Render one loop before or after the base position.
    pub fn wrap_shift(&mut self, shift: WrapDirection, slideable_width: f32, side: OriginSide) {
        self.shift = shift;
        self.element
            .render_offset(side, self.x + slideable_width * shift.sign());
    }

    /// Return to the base position. Returns `false` if it was not shifted.
    pub fn unshift(&mut self, side: OriginSide) -> bool {
        if self.shift == WrapDirection::None {
            return false;
        }
        self.shift = WrapDirection::None;
        self.element.render_offset(side, self.x);
        true
    }

    /// Clear marker and offset, then detach the element.
    pub fn destroy(&self, side: OriginSide) {
        self.release(side);
        self.element.detach();
    }

    /// Clear marker and offset but leave the element where it is, so
    /// teardown can hand it back to the container.
    pub fn release(&self, side: OriginSide) {
        self.element.set_selected(false);
        self.element.clear_offset(side);
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
    use crate::host::memory::{MemoryElement, MemorySurface};

    #[test]
    fn test_target_includes_origin_margin() {
        let element =
            MemoryElement::with_size("a", CellSize::new(100.0, 50.0).with_margins(10.0, 20.0));
        let mut cell = Cell::new(element.clone());
        cell.measure();
        assert_eq!(cell.size.outer_width, 130.0);

        cell.set_position(200.0, OriginSide::Left, 0.5);
        assert_eq!(cell.target, 200.0 + 10.0 + 50.0);
        assert_eq!(element.offset(), Some(200.0));

        cell.set_position(200.0, OriginSide::Right, 0.5);
        assert_eq!(cell.target, 200.0 + 20.0 + 50.0);
        assert_eq!(element.offset_side(), Some(OriginSide::Right));
    }

    #[test]
    fn test_wrap_shift_and_unshift() {
        let element = MemoryElement::new("a", 100.0, 50.0);
        let mut cell = Cell::new(element.clone());
        cell.measure();
        cell.set_position(100.0, OriginSide::Left, 0.5);

        cell.wrap_shift(WrapDirection::Before, 500.0, OriginSide::Left);
        assert_eq!(element.offset(), Some(-400.0));
        assert_eq!(cell.x, 100.0, "base position is untouched");

        assert!(cell.unshift(OriginSide::Left));
        assert_eq!(element.offset(), Some(100.0));
        assert!(!cell.unshift(OriginSide::Left), "second unshift is a no-op");
    }

    #[test]
    fn test_destroy_detaches() {
        let element = MemoryElement::new("a", 100.0, 50.0);
        let surface = MemorySurface::with_children(300.0, 100.0, vec![element.clone()]);
        let mut cell = Cell::new(element.clone());
        cell.measure();
        cell.set_position(0.0, OriginSide::Left, 0.5);
        element.set_selected(true);

        cell.destroy(OriginSide::Left);
        assert!(!element.is_selected());
        assert_eq!(element.offset(), None);
        assert!(!element.is_attached());
        assert!(surface.container_children().is_empty());
    }
}
