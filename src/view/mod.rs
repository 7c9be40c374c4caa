//! `GalleryView` - the gallery exported to JavaScript.
//!
//! Wraps a [`Gallery`] over the DOM host. Window resize and arrow-key
//! handlers are registered on construction when the options ask for them,
//! so no manual JavaScript wiring is needed.
//!
//! Gallery events are queued while the gallery is borrowed and delivered to
//! JavaScript callbacks afterwards, so a callback may call back into the
//! view.

mod resize;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};

use crate::debounce::Debounce;
use crate::error::GalleryError;
use crate::events::GalleryEvent;
use crate::gallery::Gallery;
use crate::host::dom::{DomElement, DomSurface};
use crate::options::{GalleryOptions, RESIZE_DEBOUNCE_MS};

pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// State shared between the view and its DOM closures.
pub(crate) struct SharedState {
    /// `None` once destroyed
    pub(crate) gallery: Option<Gallery<DomSurface>>,
    /// Events fired by the gallery, waiting for delivery
    pub(crate) fired: Rc<RefCell<Vec<GalleryEvent>>>,
    pub(crate) callbacks: Vec<(GalleryEvent, Function)>,
    pub(crate) resize: Debounce<()>,
    pub(crate) resize_timer: Option<i32>,
    pub(crate) resize_closure: Option<Closure<dyn FnMut()>>,
}

/// Gallery bound to a DOM element.
#[wasm_bindgen]
pub struct GalleryView {
    state: Rc<RefCell<SharedState>>,
    element: HtmlElement,
    window_resize_closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
    key_closure: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

fn elements_from(value: &JsValue) -> Vec<DomElement> {
    if Array::is_array(value) {
        Array::from(value)
            .iter()
            .filter_map(|v| v.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
            .collect()
    } else {
        value
            .clone()
            .dyn_into::<HtmlElement>()
            .map(|e| vec![DomElement(e)])
            .unwrap_or_default()
    }
}

fn options_from(value: &JsValue) -> Result<GalleryOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(GalleryOptions::default());
    }
    serde_wasm_bindgen::from_value(value.clone()).map_err(|e| {
        JsValue::from(GalleryError::InvalidOption {
            name: "options",
            reason: e.to_string(),
        })
    })
}

impl GalleryView {
    /// Run `f` against the live gallery, then deliver any events it fired.
    pub(crate) fn with_gallery<R>(
        state: &Rc<RefCell<SharedState>>,
        f: impl FnOnce(&mut Gallery<DomSurface>) -> R,
    ) -> Option<R> {
        let result = {
            let mut s = state.borrow_mut();
            s.gallery.as_mut().map(f)
        };
        Self::deliver_events(state);
        result
    }

    fn deliver_events(state: &Rc<RefCell<SharedState>>) {
        let calls: Vec<(Function, &'static str)> = {
            let s = state.borrow();
            let fired: Vec<GalleryEvent> = s.fired.borrow_mut().drain(..).collect();
            fired
                .iter()
                .flat_map(|event| {
                    s.callbacks
                        .iter()
                        .filter(move |(kind, _)| kind == event)
                        .map(move |(_, callback)| (callback.clone(), event.name()))
                })
                .collect()
        };
        for (callback, name) in calls {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(name));
        }
    }

    fn key_down(state: &Rc<RefCell<SharedState>>, key: &str) -> bool {
        Self::with_gallery(state, |g| g.handle_key(key)).unwrap_or(false)
    }
}

#[wasm_bindgen]
impl GalleryView {
    /// Create a gallery over `element`'s children.
    ///
    /// `options` is a plain object with camelCase keys (`wrapAround`,
    /// `cellSelector`, ...); `undefined` uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, options: JsValue) -> Result<GalleryView, JsValue> {
        console_error_panic_hook::set_once();
        let options = options_from(&options)?;
        let resize_bound = options.resize_bound;
        let accessibility = options.accessibility;

        let surface = DomSurface::new(element.clone())?;
        let mut gallery = Gallery::new(surface, options)?;
        let fired = Rc::new(RefCell::new(Vec::new()));
        {
            let fired = Rc::clone(&fired);
            gallery.on(move |event| fired.borrow_mut().push(event));
        }

        let state = Rc::new(RefCell::new(SharedState {
            gallery: Some(gallery),
            fired,
            callbacks: Vec::new(),
            resize: Debounce::new(RESIZE_DEBOUNCE_MS),
            resize_timer: None,
            resize_closure: None,
        }));

        let window_resize_closure = if resize_bound {
            let weak_state = Rc::downgrade(&state);
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                if let Some(state) = weak_state.upgrade() {
                    GalleryView::schedule_resize(&state);
                }
            }) as Box<dyn FnMut(web_sys::Event)>);
            if let Some(window) = web_sys::window() {
                window
                    .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                    .ok();
            }
            Some(closure)
        } else {
            None
        };

        let key_closure = if accessibility {
            element.set_tab_index(0);
            let weak_state = Rc::downgrade(&state);
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if let Some(state) = weak_state.upgrade() {
                    if GalleryView::key_down(&state, &event.key()) {
                        event.prevent_default();
                    }
                }
            }) as Box<dyn FnMut(KeyboardEvent)>);
            element
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .ok();
            Some(closure)
        } else {
            None
        };

        Ok(GalleryView {
            state,
            element,
            window_resize_closure,
            key_closure,
        })
    }

    /// Select the cell at `index`.
    pub fn select(&self, index: i32, is_wrap: Option<bool>) {
        let index = isize::try_from(index).unwrap_or(0);
        Self::with_gallery(&self.state, |g| g.select(index, is_wrap.unwrap_or(false)));
    }

    pub fn previous(&self, is_wrap: Option<bool>) {
        Self::with_gallery(&self.state, |g| g.previous(is_wrap.unwrap_or(false)));
    }

    pub fn next(&self, is_wrap: Option<bool>) {
        Self::with_gallery(&self.state, |g| g.next(is_wrap.unwrap_or(false)));
    }

    /// Insert an element or array of elements before the cell at `index`.
    /// Without an index the elements are appended.
    pub fn insert(&self, elements: JsValue, index: Option<usize>) {
        let elements = elements_from(&elements);
        Self::with_gallery(&self.state, |g| {
            let index = index.unwrap_or_else(|| g.cells().len());
            g.insert(&elements, index);
        });
    }

    pub fn append(&self, elements: JsValue) {
        let elements = elements_from(&elements);
        Self::with_gallery(&self.state, |g| g.append(&elements));
    }

    pub fn prepend(&self, elements: JsValue) {
        let elements = elements_from(&elements);
        Self::with_gallery(&self.state, |g| g.prepend(&elements));
    }

    /// Remove the cells owning an element or array of elements.
    pub fn remove(&self, elements: JsValue) {
        let elements = elements_from(&elements);
        Self::with_gallery(&self.state, |g| g.remove(&elements));
    }

    /// Re-measure immediately.
    pub fn resize(&self) {
        Self::with_gallery(&self.state, Gallery::resize);
    }

    /// Re-measure once resize notifications have been quiet for a while.
    #[wasm_bindgen(js_name = "onResize")]
    pub fn on_resize(&self) {
        Self::schedule_resize(&self.state);
    }

    /// Handle a key press; returns whether it moved the selection.
    #[wasm_bindgen(js_name = "onKeyDown")]
    pub fn on_key_down(&self, key: &str) -> bool {
        Self::key_down(&self.state, key)
    }

    #[wasm_bindgen(js_name = "reloadCells")]
    pub fn reload_cells(&self) {
        Self::with_gallery(&self.state, Gallery::reload_cells);
    }

    /// Re-measure one cell after its content changed size.
    #[wasm_bindgen(js_name = "cellSizeChange")]
    pub fn cell_size_change(&self, element: HtmlElement) {
        let element = DomElement(element);
        Self::with_gallery(&self.state, |g| g.cell_size_change(&element));
    }

    /// Call `callback(eventName)` whenever `event` fires.
    ///
    /// # Errors
    /// Returns an error for unknown event names.
    pub fn on(&self, event: &str, callback: Function) -> Result<(), JsValue> {
        let kind = GalleryEvent::from_name(event).ok_or_else(|| {
            JsValue::from(GalleryError::InvalidOption {
                name: "event",
                reason: format!("unknown event {event:?}"),
            })
        })?;
        self.state.borrow_mut().callbacks.push((kind, callback));
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = "selectedIndex")]
    pub fn selected_index(&self) -> Option<usize> {
        self.state
            .borrow()
            .gallery
            .as_ref()
            .and_then(Gallery::selected_index)
    }

    /// Current layout as a plain object.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let Some(gallery) = s.gallery.as_ref() else {
            return Ok(JsValue::NULL);
        };
        serde_wasm_bindgen::to_value(&gallery.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Tear down: restore the element's children and drop all handlers.
    pub fn destroy(&mut self) {
        Self::cancel_resize(&self.state);
        if let Some(closure) = self.window_resize_closure.take() {
            if let Some(window) = web_sys::window() {
                window
                    .remove_event_listener_with_callback(
                        "resize",
                        closure.as_ref().unchecked_ref(),
                    )
                    .ok();
            }
        }
        if let Some(closure) = self.key_closure.take() {
            self.element
                .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .ok();
            self.element.remove_attribute("tabindex").ok();
        }
        let gallery = self.state.borrow_mut().gallery.take();
        if let Some(gallery) = gallery {
            gallery.destroy();
        }
        let mut s = self.state.borrow_mut();
        s.callbacks.clear();
        s.fired.borrow_mut().clear();
    }
}
