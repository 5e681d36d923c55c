//! Sequential navigation over the annotation list.
//!
//! The controller only tracks the cursor. Callers pass the current
//! annotation count into every operation, so the cursor can never point
//! past the list. Camera flights and detail panels are driven by the engine
//! from the [`TourStep`]s returned here.

use crate::error::InteractionError;

/// The annotation the engine should focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourStep {
    /// Index of the focused annotation.
    pub index: usize,
}

/// Tour cursor over `0..len`, or `None` when no tour is running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourController {
    cursor: Option<usize>,
}

impl TourController {
    /// Create a controller with no focused annotation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently focused index.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// 1-based position and total, for "2 / 5" style displays.
    #[must_use]
    pub fn progress(&self, len: usize) -> Option<(usize, usize)> {
        self.cursor.map(|c| (c + 1, len))
    }

    /// Focus the first annotation.
    ///
    /// # Errors
    ///
    /// [`InteractionError::NoAnnotations`] when `len == 0`; the cursor is
    /// left unchanged.
    pub fn start(&mut self, len: usize) -> Result<TourStep, InteractionError> {
        if len == 0 {
            return Err(InteractionError::NoAnnotations);
        }
        self.focus(0, len)
    }

    /// Advance one stop. `None` (no-op) at the last stop. From "no tour"
    /// this focuses the first annotation.
    pub fn next(&mut self, len: usize) -> Option<TourStep> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= len {
            return None;
        }
        self.focus(next, len).ok()
    }

    /// Step back one stop. `None` (no-op) at the first stop or with no tour.
    pub fn prev(&mut self, len: usize) -> Option<TourStep> {
        let current = self.cursor.filter(|&c| c > 0)?;
        self.focus(current - 1, len).ok()
    }

    /// Stop the tour.
    pub fn end(&mut self) {
        self.cursor = None;
    }

    /// Focus `index`.
    ///
    /// # Errors
    ///
    /// [`InteractionError::IndexOutOfRange`] when `index >= len`; the
    /// cursor is left unchanged.
    pub fn focus(
        &mut self,
        index: usize,
        len: usize,
    ) -> Result<TourStep, InteractionError> {
        if index >= len {
            return Err(InteractionError::IndexOutOfRange { index, len });
        }
        self.cursor = Some(index);
        Ok(TourStep { index })
    }

    /// Keep the cursor valid after the annotation at `removed` was deleted,
    /// leaving `new_len` entries. Returns the new cursor.
    pub fn on_deleted(
        &mut self,
        removed: usize,
        new_len: usize,
    ) -> Option<usize> {
        self.cursor = match self.cursor {
            _ if new_len == 0 => None,
            Some(c) if removed < c => Some(c - 1),
            Some(c) if removed == c => Some(c.min(new_len - 1)),
            other => other,
        };
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_with_no_annotations_is_rejected() {
        let mut tour = TourController::new();
        assert_eq!(tour.start(0), Err(InteractionError::NoAnnotations));
        assert_eq!(tour.cursor(), None);
    }

    #[test]
    fn next_and_prev_stop_at_the_ends() {
        let mut tour = TourController::new();
        assert_eq!(tour.start(3), Ok(TourStep { index: 0 }));
        assert_eq!(tour.prev(3), None);
        assert_eq!(tour.next(3), Some(TourStep { index: 1 }));
        assert_eq!(tour.next(3), Some(TourStep { index: 2 }));
        assert_eq!(tour.next(3), None);
        assert_eq!(tour.cursor(), Some(2));
        assert_eq!(tour.prev(3), Some(TourStep { index: 1 }));
        assert_eq!(tour.progress(3), Some((2, 3)));
    }

    #[test]
    fn next_without_tour_focuses_first() {
        let mut tour = TourController::new();
        assert_eq!(tour.next(0), None);
        assert_eq!(tour.next(2), Some(TourStep { index: 0 }));
    }

    #[test]
    fn focus_out_of_range_leaves_cursor() {
        let mut tour = TourController::new();
        let _ = tour.focus(1, 3).unwrap();
        assert_eq!(
            tour.focus(3, 3),
            Err(InteractionError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(tour.cursor(), Some(1));
    }

    #[test]
    fn end_clears_cursor() {
        let mut tour = TourController::new();
        let _ = tour.start(2).unwrap();
        tour.end();
        assert_eq!(tour.cursor(), None);
        assert_eq!(tour.progress(2), None);
    }

    #[test]
    fn deleting_before_cursor_shifts_it() {
        let mut tour = TourController::new();
        let _ = tour.focus(2, 4).unwrap();
        assert_eq!(tour.on_deleted(0, 3), Some(1));
    }

    #[test]
    fn deleting_after_cursor_keeps_it() {
        let mut tour = TourController::new();
        let _ = tour.focus(1, 4).unwrap();
        assert_eq!(tour.on_deleted(3, 3), Some(1));
    }

    #[test]
    fn deleting_focused_last_entry_clamps() {
        let mut tour = TourController::new();
        let _ = tour.focus(2, 3).unwrap();
        assert_eq!(tour.on_deleted(2, 2), Some(1));
    }

    #[test]
    fn deleting_the_only_entry_ends_tour() {
        let mut tour = TourController::new();
        let _ = tour.start(1).unwrap();
        assert_eq!(tour.on_deleted(0, 0), None);
    }

    #[test]
    fn cursor_stays_in_range_over_deletions() {
        let mut tour = TourController::new();
        let mut len = 6;
        let _ = tour.focus(5, len).unwrap();
        for removed in [5, 0, 2, 1, 0, 0] {
            len -= 1;
            let cursor = tour.on_deleted(removed.min(len), len);
            match cursor {
                Some(c) => assert!(c < len),
                None => assert_eq!(len, 0),
            }
        }
        assert_eq!(tour.cursor(), None);
    }
}
