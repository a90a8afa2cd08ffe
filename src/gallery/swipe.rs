// SPDX-License-Identifier: MPL-2.0
//! Horizontal swipe gesture on the main frame.
//!
//! While the pointer is held, the frame follows it with a small elastic
//! factor. On release the total horizontal displacement decides whether to
//! navigate or snap back.

use crate::config::SWIPE_ELASTICITY;
use crate::gallery::selection::Direction;
use iced::{Point, Vector};

/// What a finished drag resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Navigate(Direction),
    SnapBack,
}

/// Classifies a drag by its horizontal displacement.
///
/// Only displacements strictly greater than `threshold` navigate: dragging
/// right (positive) goes to the previous image, dragging left to the next.
#[must_use]
pub fn classify(dx: f32, threshold: f32) -> SwipeOutcome {
    if dx.abs() > threshold {
        if dx > 0.0 {
            SwipeOutcome::Navigate(Direction::Previous)
        } else {
            SwipeOutcome::Navigate(Direction::Next)
        }
    } else {
        SwipeOutcome::SnapBack
    }
}

/// Manages the in-progress swipe.
#[derive(Debug, Clone, Default)]
pub struct SwipeState {
    /// Where the press happened, if a drag is active.
    start: Option<Point>,

    /// Last known cursor position over the frame.
    cursor: Option<Point>,
}

impl SwipeState {
    /// Tracks the cursor. Positions arrive even when no drag is active so a
    /// later press knows where it started.
    pub fn cursor_moved(&mut self, position: Point) {
        self.cursor = Some(position);
    }

    /// Starts a drag at the last known cursor position.
    pub fn press(&mut self) {
        self.start = self.cursor;
    }

    /// Ends the drag and classifies it. Returns `None` if no drag was active.
    pub fn release(&mut self, threshold: f32) -> Option<SwipeOutcome> {
        let start = self.start.take()?;
        let end = self.cursor.unwrap_or(start);
        Some(classify(end.x - start.x, threshold))
    }

    /// Abandons the drag without navigating.
    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Forgets the cursor, e.g. when it leaves the frame.
    pub fn cursor_left(&mut self) {
        self.cursor = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Raw displacement since the press.
    #[must_use]
    pub fn displacement(&self) -> Option<Vector> {
        let start = self.start?;
        let cursor = self.cursor?;
        Some(cursor - start)
    }

    /// Horizontal offset the frame is drawn at while dragging.
    #[must_use]
    pub fn visual_offset(&self) -> f32 {
        self.displacement()
            .map_or(0.0, |delta| delta.x * SWIPE_ELASTICITY)
    }
}
