// SPDX-License-Identifier: MPL-2.0
//! Lightbox zoom factor.

use crate::config::{DEFAULT_ZOOM, DEFAULT_ZOOM_STEP, DOUBLE_CLICK_ZOOM, MAX_ZOOM, MIN_ZOOM};

/// Zoom factor, guaranteed to be within the valid range (1.0–3.0).
///
/// This type ensures that zoom values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new zoom factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_nan() {
            return Self::default();
        }
        Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Whether the image is magnified beyond its fitted size. Panning is
    /// only possible in that case.
    #[must_use]
    pub fn is_zoomed(self) -> bool {
        self.0 > MIN_ZOOM
    }

    /// Increases zoom by the given step.
    #[must_use]
    pub fn zoom_in(self, step: f32) -> Self {
        Self::new(round_step(self.0 + step))
    }

    /// Decreases zoom by the given step.
    #[must_use]
    pub fn zoom_out(self, step: f32) -> Self {
        Self::new(round_step(self.0 - step))
    }

    /// Double-click behaviour: from rest jump to 2x, from anything else
    /// return to rest.
    #[must_use]
    pub fn toggled(self) -> Self {
        if (self.0 - DEFAULT_ZOOM).abs() < f32::EPSILON {
            Self::new(DOUBLE_CLICK_ZOOM)
        } else {
            Self::default()
        }
    }

    /// One step per wheel tick, by the sign of the vertical delta.
    #[must_use]
    pub fn wheel(self, delta_y: f32, step: f32) -> Self {
        if delta_y > 0.0 {
            self.zoom_in(step)
        } else if delta_y < 0.0 {
            self.zoom_out(step)
        } else {
            self
        }
    }

    /// Zoom as a whole percentage for display (e.g., 1.5 → 150).
    #[must_use]
    pub fn percent(self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.0 * 100.0).round() as u32;
        percent
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

/// Zoom step, defaulting to 0.1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStep(f32);

impl ZoomStep {
    #[must_use]
    pub fn new(step: f32) -> Self {
        Self(step.clamp(crate::config::MIN_ZOOM_STEP, crate::config::MAX_ZOOM_STEP))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ZoomStep {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_STEP)
    }
}

// Keeps repeated ±0.1 steps from drifting (1.0 + 0.1 * 3 != 1.3 in f32).
fn round_step(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
