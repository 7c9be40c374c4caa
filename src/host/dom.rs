//! DOM host backed by `web_sys::HtmlElement`.
//!
//! The container keeps a viewport div, which holds an absolutely positioned
//! slider div, which holds the cells. Cells are placed with `left`/`right`
//! and the slider is translated the same way.

use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, HtmlElement, Node};

use super::{CellElement, CellSize, OriginSide, Surface, SurfaceSize};
use crate::error::{GalleryError, Result};

const ENABLED_CLASS: &str = "slidekit-enabled";
const VIEWPORT_CLASS: &str = "slidekit-viewport";
const SLIDER_CLASS: &str = "slidekit-slider";
const SELECTED_CLASS: &str = "is-selected";

fn px(value: f32) -> String {
    format!("{value}px")
}

fn parse_px(value: &str) -> f32 {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f32>()
        .unwrap_or(0.0)
}

fn computed_style(element: &HtmlElement) -> Option<CssStyleDeclaration> {
    web_sys::window()?.get_computed_style(element).ok().flatten()
}

fn style_px(style: Option<&CssStyleDeclaration>, property: &str) -> f32 {
    style
        .and_then(|s| s.get_property_value(property).ok())
        .map(|v| parse_px(&v))
        .unwrap_or(0.0)
}

fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| GalleryError::Dom("no document".to_string()))
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement> {
    let element = document
        .create_element("div")
        .map_err(|e| GalleryError::Dom(format!("{e:?}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GalleryError::Dom("created element is not an HtmlElement".to_string()))?;
    element.set_class_name(class);
    Ok(element)
}

fn html_children(parent: &HtmlElement) -> Vec<HtmlElement> {
    let children = parent.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Cell element handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement(pub HtmlElement);

impl DomElement {
    pub fn html(&self) -> &HtmlElement {
        &self.0
    }
}

impl From<HtmlElement> for DomElement {
    fn from(element: HtmlElement) -> Self {
        Self(element)
    }
}

impl CellElement for DomElement {
    fn measure(&self) -> CellSize {
        let style = computed_style(&self.0);
        let style = style.as_ref();
        let width = self.0.offset_width() as f32;
        let height = self.0.offset_height() as f32;
        let margin_left = style_px(style, "margin-left");
        let margin_right = style_px(style, "margin-right");
        let margin_top = style_px(style, "margin-top");
        let margin_bottom = style_px(style, "margin-bottom");
        CellSize {
            width,
            height,
            outer_width: width + margin_left + margin_right,
            outer_height: height + margin_top + margin_bottom,
            margin_left,
            margin_right,
        }
    }

    fn render_offset(&self, side: OriginSide, x: f32) {
        let style = self.0.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property(side.css_property(), &px(x));
    }

    fn clear_offset(&self, side: OriginSide) {
        let style = self.0.style();
        let _ = style.remove_property("position");
        let _ = style.remove_property(side.css_property());
    }

    fn set_selected(&self, selected: bool) {
        let _ = self
            .0
            .class_list()
            .toggle_with_force(SELECTED_CLASS, selected);
    }

    fn detach(&self) {
        if let Some(parent) = self.0.parent_node() {
            let _ = parent.remove_child(&self.0);
        }
    }

    fn matches(&self, selector: &str) -> bool {
        self.0.matches(selector).unwrap_or(false)
    }

    fn find_all(&self, selector: &str) -> Vec<Self> {
        let Ok(nodes) = self.0.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
            .collect()
    }
}

/// Gallery container plus the viewport and slider created for it.
#[derive(Debug)]
pub struct DomSurface {
    element: HtmlElement,
    viewport: HtmlElement,
    slider: HtmlElement,
}

impl DomSurface {
    /// Prepare viewport and slider for `element` (not yet mounted).
    ///
    /// # Errors
    /// Returns an error if there is no document to create elements in.
    pub fn new(element: HtmlElement) -> Result<Self> {
        let document = document()?;
        let viewport = create_div(&document, VIEWPORT_CLASS)?;
        let slider = create_div(&document, SLIDER_CLASS)?;
        let style = slider.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("width", "100%");
        Ok(Self {
            element,
            viewport,
            slider,
        })
    }

    /// Look up the container by CSS selector.
    ///
    /// # Errors
    /// Returns [`GalleryError::ElementNotFound`] if nothing matches.
    pub fn from_selector(selector: &str) -> Result<Self> {
        let element = document()?
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| GalleryError::ElementNotFound(selector.to_string()))?;
        Self::new(element)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl Surface for DomSurface {
    type Element = DomElement;

    fn measure(&self) -> SurfaceSize {
        let style = computed_style(&self.element);
        let style = style.as_ref();
        let padding_x = style_px(style, "padding-left") + style_px(style, "padding-right");
        let padding_y = style_px(style, "padding-top") + style_px(style, "padding-bottom");
        SurfaceSize {
            inner_width: (self.element.client_width() as f32 - padding_x).max(0.0),
            inner_height: (self.element.client_height() as f32 - padding_y).max(0.0),
        }
    }

    fn mount(&mut self, side: OriginSide) {
        let _ = self.element.class_list().add_1(ENABLED_CLASS);
        let _ = self.slider.style().set_property(side.css_property(), "0");
        for child in html_children(&self.element) {
            let _ = self.slider.append_child(&child);
        }
        let _ = self.viewport.append_child(&self.slider);
        let _ = self.element.append_child(&self.viewport);
    }

    fn unmount(&mut self) {
        let _ = self.element.class_list().remove_1(ENABLED_CLASS);
        if self.viewport.parent_node().is_some() {
            let _ = self.element.remove_child(&self.viewport);
        }
        for child in html_children(&self.slider) {
            let _ = self.element.append_child(&child);
        }
        let _ = self.viewport.style().remove_property("height");
    }

    fn slider_children(&self) -> Vec<DomElement> {
        html_children(&self.slider)
            .into_iter()
            .map(DomElement)
            .collect()
    }

    fn insert_elements(&mut self, elements: &[DomElement], before: Option<&DomElement>) {
        let Ok(document) = document() else {
            return;
        };
        let fragment = document.create_document_fragment();
        for element in elements {
            let _ = fragment.append_child(&element.0);
        }
        let anchor: Option<&Node> = before.map(|b| b.0.as_ref());
        let _ = self.slider.insert_before(&fragment, anchor);
    }

    fn set_viewport_height(&mut self, height: f32) {
        let _ = self.viewport.style().set_property("height", &px(height));
    }

    fn render_slider(&mut self, side: OriginSide, offset: f32) {
        let _ = self
            .slider
            .style()
            .set_property(side.css_property(), &px(offset));
    }
}
