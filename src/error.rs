//! Structured error types for slidekit.
//!
//! Layout and selection never fail; errors only come from configuration and
//! from attaching to a host surface.

/// All errors that can occur while configuring or attaching a gallery.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// An option value is outside its accepted range.
    #[error("Invalid option `{name}`: {reason}")]
    InvalidOption {
        /// Option name as written in JSON (camelCase).
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Options or scenario JSON could not be decoded.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A selector or handle did not resolve to an element.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GalleryError>;

impl GalleryError {
    pub(crate) fn invalid_option(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GalleryError> for wasm_bindgen::JsValue {
    fn from(e: GalleryError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
