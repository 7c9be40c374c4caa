//! Debounced resize for `GalleryView`.
//!
//! Window resize events arrive in bursts. Each one pushes the debounce
//! deadline out; a single `setTimeout` is kept armed for the current
//! deadline and the gallery re-measures once the burst has gone quiet.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{now_ms, GalleryView, SharedState};
use crate::gallery::Gallery;

impl GalleryView {
    pub(crate) fn schedule_resize(state: &Rc<RefCell<SharedState>>) {
        state.borrow_mut().resize.call((), now_ms());
        Self::arm_resize_timeout(state);
    }

    fn arm_resize_timeout(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.resize_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        let Some(deadline) = s.resize.deadline() else {
            return;
        };
        if s.resize_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GalleryView::handle_resize_timeout(&state);
                }
            }) as Box<dyn FnMut()>);
            s.resize_closure = Some(closure);
        }
        let Some(callback) = s.resize_closure.as_ref() else {
            return;
        };
        let delay = (deadline - now_ms()).clamp(0.0, f64::from(i32::MAX)).ceil();
        #[allow(clippy::cast_possible_truncation)]
        let delay = delay as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(id) => s.resize_timer = Some(id),
            Err(_) => s.resize_timer = None,
        }
    }

    fn handle_resize_timeout(state: &Rc<RefCell<SharedState>>) {
        let due = {
            let mut s = state.borrow_mut();
            s.resize_timer = None;
            s.resize.poll(now_ms()).is_some()
        };
        if due {
            Self::with_gallery(state, Gallery::resize);
        } else if state.borrow().resize.is_pending() {
            // Timer fired a little early
            Self::arm_resize_timeout(state);
        }
    }

    pub(crate) fn cancel_resize(state: &Rc<RefCell<SharedState>>) {
        let mut s = state.borrow_mut();
        s.resize.cancel();
        if let Some(timer_id) = s.resize_timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timer_id);
            }
        }
        s.resize_closure = None;
    }
}
