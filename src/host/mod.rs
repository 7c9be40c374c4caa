//! Host abstraction: the surface and elements the gallery lays out.
//!
//! The engine never touches a DOM directly. It measures and positions
//! elements through [`CellElement`] and moves them between the container and
//! the slider through [`Surface`]. Two hosts ship with the crate:
//! - [`memory`]: elements with explicit sizes (CLI, tests, benchmarks)
//! - `dom` (wasm32 only): `web_sys::HtmlElement` backed

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side of the slider that cell offsets are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginSide {
    /// Left-to-right layout; offsets are CSS `left`.
    Left,
    /// Right-to-left layout; offsets are CSS `right`.
    Right,
}

impl OriginSide {
    /// Origin side for the given direction flag.
    pub fn from_right_to_left(right_to_left: bool) -> Self {
        if right_to_left {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// CSS property name for this side.
    pub fn css_property(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Measured size of a cell element, in logical pixels.
///
/// Outer sizes include margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
    pub outer_width: f32,
    pub outer_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl CellSize {
    /// Size of an element without margins.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            outer_width: width,
            outer_height: height,
            margin_left: 0.0,
            margin_right: 0.0,
        }
    }

    /// Add horizontal margins, growing the outer width.
    pub fn with_margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self.outer_width = self.width + left + right;
        self
    }

    /// Margin on the origin side, used to compute a cell's target.
    pub fn origin_margin(&self, side: OriginSide) -> f32 {
        match side {
            OriginSide::Left => self.margin_left,
            OriginSide::Right => self.margin_right,
        }
    }
}

/// Inner size of the gallery surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSize {
    pub inner_width: f32,
    pub inner_height: f32,
}

/// One visual item that can become a cell.
///
/// Handles are cheap to clone and compare by identity.
pub trait CellElement: Clone + PartialEq + fmt::Debug {
    /// Current outer size including margins.
    fn measure(&self) -> CellSize;

    /// Place the element at `x` from the origin side of the slider.
    fn render_offset(&self, side: OriginSide, x: f32);

    /// Remove any offset previously rendered on `side`.
    fn clear_offset(&self, side: OriginSide);

    /// Toggle the selected marker.
    fn set_selected(&self, selected: bool);

    /// Detach from the current parent without relocating.
    fn detach(&self);

    /// Whether the element matches a cell selector.
    fn matches(&self, selector: &str) -> bool;

    /// Descendants matching `selector`, in document order.
    fn find_all(&self, _selector: &str) -> Vec<Self> {
        Vec::new()
    }
}

/// The container a gallery is attached to.
///
/// On mount, the container's children move into an inner slider strip;
/// unmount moves them back.
pub trait Surface {
    type Element: CellElement;

    /// Inner size of the viewport.
    fn measure(&self) -> SurfaceSize;

    /// Create the viewport/slider and move the container's children into it.
    fn mount(&mut self, side: OriginSide);

    /// Return slider children to the container and drop the viewport.
    fn unmount(&mut self);

    /// Children currently in the slider, in order.
    fn slider_children(&self) -> Vec<Self::Element>;

    /// Insert elements into the slider before `before`, or at the end.
    fn insert_elements(&mut self, elements: &[Self::Element], before: Option<&Self::Element>);

    /// Size the viewport to fit the tallest cell.
    fn set_viewport_height(&mut self, height: f32);

    /// Translate the slider to `offset` from the origin side.
    fn render_slider(&mut self, side: OriginSide, offset: f32);
}
