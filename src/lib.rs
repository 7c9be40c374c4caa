//! slidekit - horizontal gallery engine for the web
//!
//! Lays out a row of cells inside a surface and keeps every derived value
//! consistent as the row changes:
//! - Cell offsets from the running sum of outer widths
//! - Selection with wrap-around index folding
//! - Wrap-around shift cells that fill the gaps at both edges
//! - Insert, remove and resize without full recomputation
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GalleryView } from 'slidekit';
//! await init();
//! const gallery = new GalleryView(element, { wrapAround: true });
//! gallery.on('select', () => console.log(gallery.selectedIndex));
//! gallery.next();
//! ```
//!
//! # Usage (Rust)
//!
//! ```rust
//! use slidekit::host::memory::{MemoryElement, MemorySurface};
//! use slidekit::{Gallery, GalleryOptions};
//!
//! let cells: Vec<_> = (0..5).map(|i| MemoryElement::new(format!("c{i}"), 100.0, 80.0)).collect();
//! let surface = MemorySurface::with_children(300.0, 200.0, cells);
//! let mut gallery = Gallery::new(surface, GalleryOptions::default()).unwrap();
//! gallery.next(false);
//! assert_eq!(gallery.selected_index(), Some(1));
//! ```

pub mod debounce;
pub mod error;
pub mod events;
pub mod gallery;
pub mod host;
pub mod layout;
pub mod options;
pub mod registry;
pub mod scenario;
pub mod selection;
pub mod snapshot;

// WASM bindings (DOM host)
#[cfg(target_arch = "wasm32")]
pub mod view;

use wasm_bindgen::prelude::*;

pub use error::{GalleryError, Result};
pub use events::GalleryEvent;
pub use gallery::motion::{InstantSnap, MotionDriver, Positionable, Selectable};
pub use gallery::Gallery;
pub use options::GalleryOptions;
pub use registry::{GalleryId, GalleryRegistry};
pub use scenario::Scenario;
pub use snapshot::LayoutSnapshot;

#[cfg(target_arch = "wasm32")]
pub use view::GalleryView;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
