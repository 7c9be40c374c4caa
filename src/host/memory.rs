//! In-memory host for running the engine without a browser.
//!
//! Elements carry explicit sizes instead of being measured from CSS. Parent
//! links mirror the DOM closely enough that mount, insert, detach and unmount
//! behave like their browser counterparts.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{CellElement, CellSize, OriginSide, Surface, SurfaceSize};

type ElementList = Rc<RefCell<Vec<MemoryElement>>>;

struct ElementState {
    name: String,
    classes: Vec<String>,
    size: CellSize,
    offset: Option<(OriginSide, f32)>,
    selected: bool,
    parent: Option<Weak<RefCell<Vec<MemoryElement>>>>,
    children: Vec<MemoryElement>,
}

/// Element handle with an explicit size.
///
/// Clones share state; equality is identity.
#[derive(Clone)]
pub struct MemoryElement(Rc<RefCell<ElementState>>);

impl MemoryElement {
    /// Create a detached element with no margins.
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self::with_size(name, CellSize::new(width, height))
    }

    /// Create a detached element with a full size record.
    pub fn with_size(name: impl Into<String>, size: CellSize) -> Self {
        Self(Rc::new(RefCell::new(ElementState {
            name: name.into(),
            classes: Vec::new(),
            size,
            offset: None,
            selected: false,
            parent: None,
            children: Vec::new(),
        })))
    }

    /// Add a class, matched by `.class` selectors.
    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.0.borrow_mut().classes.push(class.into());
        self
    }

    /// Nest `child` under this element (found by [`CellElement::find_all`]).
    pub fn add_child(&self, child: MemoryElement) {
        self.0.borrow_mut().children.push(child);
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Change the size reported by the next [`CellElement::measure`].
    pub fn set_size(&self, size: CellSize) {
        self.0.borrow_mut().size = size;
    }

    /// Offset last rendered on the element, if any.
    pub fn offset(&self) -> Option<f32> {
        self.0.borrow().offset.map(|(_, x)| x)
    }

    pub fn offset_side(&self) -> Option<OriginSide> {
        self.0.borrow().offset.map(|(side, _)| side)
    }

    pub fn is_selected(&self) -> bool {
        self.0.borrow().selected
    }

    /// Whether the element currently has a parent list.
    pub fn is_attached(&self) -> bool {
        self.0
            .borrow()
            .parent
            .as_ref()
            .is_some_and(|parent| parent.strong_count() > 0)
    }

    fn adopt_into(&self, list: &ElementList, index: Option<usize>) {
        self.detach();
        self.0.borrow_mut().parent = Some(Rc::downgrade(list));
        let mut items = list.borrow_mut();
        match index {
            Some(i) if i <= items.len() => items.insert(i, self.clone()),
            _ => items.push(self.clone()),
        }
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.borrow();
        f.debug_struct("MemoryElement")
            .field("name", &state.name)
            .field("outer_width", &state.size.outer_width)
            .field("offset", &state.offset)
            .finish()
    }
}

impl CellElement for MemoryElement {
    fn measure(&self) -> CellSize {
        self.0.borrow().size
    }

    fn render_offset(&self, side: OriginSide, x: f32) {
        self.0.borrow_mut().offset = Some((side, x));
    }

    fn clear_offset(&self, side: OriginSide) {
        let mut state = self.0.borrow_mut();
        if state.offset.is_some_and(|(s, _)| s == side) {
            state.offset = None;
        }
    }

    fn set_selected(&self, selected: bool) {
        self.0.borrow_mut().selected = selected;
    }

    fn detach(&self) {
        let parent = self.0.borrow_mut().parent.take();
        if let Some(list) = parent.and_then(|weak| weak.upgrade()) {
            list.borrow_mut().retain(|e| e != self);
        }
    }

    fn matches(&self, selector: &str) -> bool {
        let state = self.0.borrow();
        match selector.strip_prefix('.') {
            Some(class) => state.classes.iter().any(|c| c == class),
            None => state.name == selector,
        }
    }

    fn find_all(&self, selector: &str) -> Vec<Self> {
        let mut found = Vec::new();
        for child in &self.0.borrow().children {
            if child.matches(selector) {
                found.push(child.clone());
            }
            found.extend(child.find_all(selector));
        }
        found
    }
}

/// Surface backed by two element lists: the container and the slider.
pub struct MemorySurface {
    size: SurfaceSize,
    container: ElementList,
    slider: ElementList,
    mounted: bool,
    viewport_height: f32,
    slider_offset: Option<(OriginSide, f32)>,
}

impl MemorySurface {
    /// Create an empty surface of the given inner size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: SurfaceSize {
                inner_width: width,
                inner_height: height,
            },
            container: Rc::new(RefCell::new(Vec::new())),
            slider: Rc::new(RefCell::new(Vec::new())),
            mounted: false,
            viewport_height: 0.0,
            slider_offset: None,
        }
    }

    /// Create a surface whose container already holds `children`.
    pub fn with_children(width: f32, height: f32, children: Vec<MemoryElement>) -> Self {
        let surface = Self::new(width, height);
        for child in children {
            surface.append_child(&child);
        }
        surface
    }

    /// Append an element to the container (not the slider).
    pub fn append_child(&self, child: &MemoryElement) {
        child.adopt_into(&self.container, None);
    }

    /// Change the size reported by the next [`Surface::measure`].
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = SurfaceSize {
            inner_width: width,
            inner_height: height,
        };
    }

    pub fn container_children(&self) -> Vec<MemoryElement> {
        self.container.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Offset last rendered on the slider.
    pub fn slider_offset(&self) -> Option<f32> {
        self.slider_offset.map(|(_, x)| x)
    }

    fn move_all(from: &ElementList, to: &ElementList) {
        let moving: Vec<MemoryElement> = from.borrow().clone();
        for element in moving {
            element.adopt_into(to, None);
        }
    }
}

impl Surface for MemorySurface {
    type Element = MemoryElement;

    fn measure(&self) -> SurfaceSize {
        self.size
    }

    fn mount(&mut self, _side: OriginSide) {
        Self::move_all(&self.container, &self.slider);
        self.mounted = true;
    }

    fn unmount(&mut self) {
        Self::move_all(&self.slider, &self.container);
        self.mounted = false;
        self.viewport_height = 0.0;
        self.slider_offset = None;
    }

    fn slider_children(&self) -> Vec<MemoryElement> {
        self.slider.borrow().clone()
    }

    fn insert_elements(&mut self, elements: &[MemoryElement], before: Option<&MemoryElement>) {
        for element in elements {
            // Look up the anchor each time: adopting may detach it from a prior slot.
            let index = before.and_then(|b| self.slider.borrow().iter().position(|e| e == b));
            element.adopt_into(&self.slider, index);
        }
    }

    fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    fn render_slider(&mut self, side: OriginSide, offset: f32) {
        self.slider_offset = Some((side, offset));
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

    #[test]
    fn test_mount_and_unmount_preserve_order() {
        let a = MemoryElement::new("a", 10.0, 10.0);
        let b = MemoryElement::new("b", 10.0, 10.0);
        let mut surface = MemorySurface::with_children(100.0, 50.0, vec![a.clone(), b.clone()]);

        surface.mount(OriginSide::Left);
        assert!(surface.container_children().is_empty());
        assert_eq!(surface.slider_children(), vec![a.clone(), b.clone()]);

        surface.unmount();
        assert_eq!(surface.container_children(), vec![a, b]);
        assert!(surface.slider_children().is_empty());
    }

    #[test]
    fn test_detach_removes_from_parent() {
        let a = MemoryElement::new("a", 10.0, 10.0);
        let surface = MemorySurface::with_children(100.0, 50.0, vec![a.clone()]);
        assert!(a.is_attached());
        a.detach();
        assert!(!a.is_attached());
        assert!(surface.container_children().is_empty());
    }

    #[test]
    fn test_insert_before_anchor() {
        let a = MemoryElement::new("a", 10.0, 10.0);
        let c = MemoryElement::new("c", 10.0, 10.0);
        let mut surface = MemorySurface::with_children(100.0, 50.0, vec![a.clone(), c.clone()]);
        surface.mount(OriginSide::Left);

        let b1 = MemoryElement::new("b1", 10.0, 10.0);
        let b2 = MemoryElement::new("b2", 10.0, 10.0);
        surface.insert_elements(&[b1.clone(), b2.clone()], Some(&c));
        assert_eq!(surface.slider_children(), vec![a, b1, b2, c]);
    }

    #[test]
    fn test_selector_matching() {
        let cell = MemoryElement::new("div", 10.0, 10.0).with_class("cell");
        assert!(cell.matches(".cell"));
        assert!(cell.matches("div"));
        assert!(!cell.matches(".other"));

        let wrapper = MemoryElement::new("section", 10.0, 10.0);
        wrapper.add_child(cell.clone());
        assert_eq!(wrapper.find_all(".cell"), vec![cell]);
    }
}
