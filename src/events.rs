//! Gallery notifications.
//!
//! Events carry no payload; listeners read whatever published state they
//! need from the gallery afterwards.

use std::fmt;

/// Lifecycle and selection notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryEvent {
    Activate,
    Select,
    CellChange,
    Resize,
    Deactivate,
}

impl GalleryEvent {
    /// Event name as exposed to JavaScript.
    pub fn name(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Select => "select",
            Self::CellChange => "cellChange",
            Self::Resize => "resize",
            Self::Deactivate => "deactivate",
        }
    }

    /// Parse a JavaScript event name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "activate" => Some(Self::Activate),
            "select" => Some(Self::Select),
            "cellChange" => Some(Self::CellChange),
            "resize" => Some(Self::Resize),
            "deactivate" => Some(Self::Deactivate),
            _ => None,
        }
    }
}

impl fmt::Display for GalleryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Listener = Box<dyn FnMut(GalleryEvent)>;

/// Ordered listener list; listeners run synchronously in registration order.
#[derive(Default)]
pub struct Listeners {
    listeners: Vec<Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl FnMut(GalleryEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: GalleryEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
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
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_names_round_trip() {
        for event in [
            GalleryEvent::Activate,
            GalleryEvent::Select,
            GalleryEvent::CellChange,
            GalleryEvent::Resize,
            GalleryEvent::Deactivate,
        ] {
            assert_eq!(GalleryEvent::from_name(event.name()), Some(event));
        }
        assert_eq!(GalleryEvent::from_name("settle"), None);
    }

    #[test]
    fn test_emit_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        let first = Rc::clone(&log);
        listeners.add(move |e| first.borrow_mut().push(format!("1:{e}")));
        let second = Rc::clone(&log);
        listeners.add(move |e| second.borrow_mut().push(format!("2:{e}")));

        listeners.emit(GalleryEvent::Select);
        assert_eq!(*log.borrow(), vec!["1:select", "2:select"]);
    }
}
