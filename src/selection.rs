//! Selected-index state and index resolution.
//!
//! Navigation requests may point past either end of the sequence. With
//! wrap-around they are folded back into range and the caller is told which
//! way the slider crossed the loop seam so it can keep its offset continuous.

use crate::host::CellElement;

/// Which way a wrapped request crossed the loop seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopShift {
    /// Request was already in range.
    None,
    /// Request was before the first cell; unroll the slider one loop back.
    Backward,
    /// Request was past the last cell; roll the slider one loop forward.
    Forward,
}

/// Result of resolving a requested index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub index: usize,
    pub shift: LoopShift,
}

/// Resolve `requested` against a sequence of `len` cells.
///
/// Returns `None` when no cell backs the result (empty sequence, or an
/// out-of-range request without wrapping).
pub fn resolve(requested: isize, len: usize, wrap_around: bool, is_wrap: bool) -> Option<Resolution> {
    let signed_len = isize::try_from(len).ok()?;
    if signed_len == 0 {
        return None;
    }
    let shift = if !wrap_around {
        LoopShift::None
    } else if requested < 0 {
        LoopShift::Backward
    } else if requested >= signed_len {
        LoopShift::Forward
    } else {
        LoopShift::None
    };
    let index = if wrap_around || is_wrap {
        requested.rem_euclid(signed_len)
    } else {
        requested
    };
    let index = usize::try_from(index).ok().filter(|i| *i < len)?;
    Some(Resolution { index, shift })
}

/// Clamp an index into `[0, len - 1]` (0 for an empty sequence).
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Modulo with a result carrying the divisor's sign.
///
/// A zero divisor yields 0 so an empty loop never produces NaN offsets.
pub fn modulo(value: f32, divisor: f32) -> f32 {
    if divisor == 0.0 || !divisor.is_finite() {
        return 0.0;
    }
    ((value % divisor) + divisor) % divisor
}

/// One navigation step along the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

/// Map a keyboard key to a step. Arrow keys follow the reading direction,
/// so they swap meaning in right-to-left galleries.
pub fn step_for_key(key: &str, right_to_left: bool) -> Option<Step> {
    let step = match key {
        "ArrowLeft" => Step::Previous,
        "ArrowRight" => Step::Next,
        _ => return None,
    };
    Some(match (step, right_to_left) {
        (Step::Previous, true) => Step::Next,
        (Step::Next, true) => Step::Previous,
        (step, false) => step,
    })
}

/// Selected index plus a back-reference used to move the selected marker.
#[derive(Debug, Clone)]
pub struct Selection<E> {
    index: usize,
    element: Option<E>,
}

impl<E> Default for Selection<E> {
    fn default() -> Self {
        Self {
            index: 0,
            element: None,
        }
    }
}

impl<E: CellElement> Selection<E> {
    /// Index to re-select after a structural change (may be stale until
    /// clamped).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Element carrying the selected marker, if any.
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    /// Commit `index`, moving the marker from the previous element.
    pub fn commit(&mut self, index: usize, element: &E) {
        if let Some(previous) = self.element.take() {
            previous.set_selected(false);
        }
        element.set_selected(true);
        self.index = index;
        self.element = Some(element.clone());
    }

    /// Clamp the index after cells were added or removed.
    pub fn clamp(&mut self, len: usize) {
        self.index = clamp_index(self.index, len);
    }

    /// Drop the marker and forget the element.
    pub fn clear_marker(&mut self) {
        if let Some(previous) = self.element.take() {
            previous.set_selected(false);
        }
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
    use crate::host::memory::MemoryElement;
    use test_case::test_case;

    #[test_case(2, 5, false, false => Some((2, LoopShift::None)); "in range")]
    #[test_case(5, 5, false, false => None; "past end without wrap")]
    #[test_case(-1, 5, false, false => None; "before start without wrap")]
    #[test_case(-1, 5, false, true => Some((4, LoopShift::None)); "wrap request only")]
    #[test_case(-1, 5, true, false => Some((4, LoopShift::Backward)); "wrap around backward")]
    #[test_case(5, 5, true, false => Some((0, LoopShift::Forward)); "wrap around forward")]
    #[test_case(13, 5, false, true => Some((3, LoopShift::None)); "overflow by two loops")]
    #[test_case(0, 0, true, true => None; "empty sequence")]
    fn test_resolve(requested: isize, len: usize, wrap_around: bool, is_wrap: bool) -> Option<(usize, LoopShift)> {
        resolve(requested, len, wrap_around, is_wrap).map(|r| (r.index, r.shift))
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(7, 5), 4);
        assert_eq!(clamp_index(3, 5), 3);
        assert_eq!(clamp_index(3, 0), 0);
    }

    #[test]
    fn test_modulo() {
        assert_eq!(modulo(-50.0, 300.0), 250.0);
        assert_eq!(modulo(350.0, 300.0), 50.0);
        assert_eq!(modulo(-350.0, 300.0), 250.0);
        assert_eq!(modulo(42.0, 0.0), 0.0);
    }

    #[test]
    fn test_commit_moves_marker() {
        let a = MemoryElement::new("a", 10.0, 10.0);
        let b = MemoryElement::new("b", 10.0, 10.0);
        let mut selection = Selection::default();

        selection.commit(0, &a);
        assert!(a.is_selected());
        selection.commit(1, &b);
        assert!(!a.is_selected());
        assert!(b.is_selected());
        assert_eq!(selection.index(), 1);

        selection.clear_marker();
        assert!(!b.is_selected());
        assert!(selection.element().is_none());
    }

    #[test_case("ArrowLeft", false => Some(Step::Previous); "left ltr")]
    #[test_case("ArrowRight", false => Some(Step::Next); "right ltr")]
    #[test_case("ArrowLeft", true => Some(Step::Next); "left rtl")]
    #[test_case("ArrowRight", true => Some(Step::Previous); "right rtl")]
    #[test_case("Enter", false => None; "other key")]
    fn test_step_for_key(key: &str, right_to_left: bool) -> Option<Step> {
        step_for_key(key, right_to_left)
    }
}
