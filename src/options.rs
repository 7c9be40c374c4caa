//! Gallery configuration.
//!
//! Field names are camelCase on the wire so the same JSON object works from
//! JavaScript (`new GalleryView(el, { wrapAround: true })`) and from the CLI
//! scenario files.

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

/// Quiet window for coalescing resize notifications.
pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;

/// Options controlling layout, selection and the optional collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryOptions {
    /// Enable keyboard navigation.
    pub accessibility: bool,
    /// Autoplay interval in milliseconds (disabled when `None`).
    pub auto_play: Option<u32>,
    /// Only children matching this selector become cells.
    pub cell_selector: Option<String>,
    /// Anchor point as a fraction of the surface's inner width.
    pub cursor_position: f32,
    /// Allow pointer dragging.
    pub draggable: bool,
    /// Do not snap to the selected cell after structural changes.
    pub free_scroll: bool,
    /// Friction applied while free-scrolling.
    pub free_scroll_friction: f32,
    /// Friction applied while attracting to a selection.
    pub friction: f32,
    /// Show page indicator dots.
    pub page_dots: bool,
    /// Show previous/next buttons.
    pub prev_next_buttons: bool,
    /// Re-layout when the window resizes.
    pub resize_bound: bool,
    /// Lay cells out from the right edge.
    pub right_to_left: bool,
    /// Attraction strength toward the selected cell.
    pub selected_attraction: f32,
    /// Point within a cell aligned to the cursor, as a fraction of its width.
    pub target_position: f32,
    /// Treat the sequence as a loop.
    pub wrap_around: bool,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            accessibility: true,
            auto_play: None,
            cell_selector: None,
            cursor_position: 0.5,
            draggable: true,
            free_scroll: false,
            free_scroll_friction: 0.075,
            friction: 0.25,
            page_dots: true,
            prev_next_buttons: true,
            resize_bound: true,
            right_to_left: false,
            selected_attraction: 0.025,
            target_position: 0.5,
            wrap_around: false,
        }
    }
}

impl GalleryOptions {
    /// Parse options from JSON, filling unspecified fields with defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a value fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that every numeric option is usable.
    ///
    /// # Errors
    /// Returns [`GalleryError::InvalidOption`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        check_fraction("cursorPosition", self.cursor_position)?;
        check_fraction("targetPosition", self.target_position)?;
        check_non_negative("friction", self.friction)?;
        check_non_negative("freeScrollFriction", self.free_scroll_friction)?;
        check_non_negative("selectedAttraction", self.selected_attraction)?;
        if let Some(selector) = &self.cell_selector {
            if selector.trim().is_empty() {
                return Err(GalleryError::invalid_option(
                    "cellSelector",
                    "selector must not be empty",
                ));
            }
        }
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(GalleryError::invalid_option(
            name,
            format!("expected a fraction in [0, 1], got {value}"),
        ));
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GalleryError::invalid_option(
            name,
            format!("expected a non-negative number, got {value}"),
        ));
    }
    Ok(())
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
    fn test_defaults() {
        let options = GalleryOptions::default();
        assert_eq!(options.cursor_position, 0.5);
        assert_eq!(options.target_position, 0.5);
        assert!(!options.wrap_around);
        assert!(!options.free_scroll);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let options =
            GalleryOptions::from_json(r#"{"wrapAround": true, "cursorPosition": 0.25}"#).unwrap();
        assert!(options.wrap_around);
        assert_eq!(options.cursor_position, 0.25);
        // Untouched fields keep their defaults
        assert_eq!(options.friction, 0.25);
        assert!(options.page_dots);
    }

    #[test]
    fn test_rejects_out_of_range_cursor() {
        let err = GalleryOptions::from_json(r#"{"cursorPosition": 1.5}"#).unwrap_err();
        assert!(matches!(
            err,
            GalleryError::InvalidOption {
                name: "cursorPosition",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_friction() {
        let options = GalleryOptions {
            friction: -0.1,
            ..GalleryOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_selector() {
        let options = GalleryOptions {
            cell_selector: Some("  ".to_string()),
            ..GalleryOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = GalleryOptions::from_json("{wrapAround").unwrap_err();
        assert!(matches!(err, GalleryError::Json(_)));
    }
}
