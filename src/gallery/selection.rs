// SPDX-License-Identifier: MPL-2.0
//! Selected-image state machine shared by the inline viewer and the lightbox.
//!
//! Navigation wraps around in both directions. Transitions return the new
//! index so the orchestrator can react (reload, preload, scroll thumbnails)
//! only when something actually changed.

/// Direction of a relative navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Index of the image currently shown, bounded by the gallery length.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    /// Creates a selection over `len` images, starting at the first one.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Moves forward, wrapping from the last image to the first.
    ///
    /// Returns the new index, or `None` when nothing changed (empty or
    /// single-image galleries).
    pub fn next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.set((self.index + 1) % self.len)
    }

    /// Moves backward, wrapping from the first image to the last.
    pub fn previous(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.set((self.index + self.len - 1) % self.len)
    }

    pub fn step(&mut self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Next => self.next(),
            Direction::Previous => self.previous(),
        }
    }

    /// Jumps to `index`, clamped into `[0, len)`.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.set(index.min(self.len - 1))
    }

    /// Replaces the gallery length and returns to the first image.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
    }

    fn set(&mut self, index: usize) -> Option<usize> {
        if index == self.index {
            return None;
        }
        self.index = index;
        Some(index)
    }
}
