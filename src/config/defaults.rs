// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the gallery. Constants are organized by category.
//!
//! # Categories
//!
//! - **Lightbox zoom**: Zoom factor bounds and step
//! - **Swipe**: Horizontal drag distance needed to navigate
//! - **Warm cache**: Preload cache limits
//! - **Timing**: Double-click and scroll animation durations

use std::time::Duration;

// ==========================================================================
// Lightbox Zoom Defaults
// ==========================================================================

/// Zoom factor applied when the lightbox opens.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Minimum lightbox zoom factor.
pub const MIN_ZOOM: f32 = 1.0;

/// Maximum lightbox zoom factor.
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom factor reached by a double-click from the resting zoom.
pub const DOUBLE_CLICK_ZOOM: f32 = 2.0;

/// Default zoom step for wheel ticks and +/- controls.
pub const DEFAULT_ZOOM_STEP: f32 = 0.1;

/// Minimum allowed zoom step.
pub const MIN_ZOOM_STEP: f32 = 0.05;

/// Maximum allowed zoom step.
pub const MAX_ZOOM_STEP: f32 = 1.0;

// ==========================================================================
// Swipe Defaults
// ==========================================================================

/// Horizontal displacement (logical pixels) a drag must exceed to navigate.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 80.0;

/// Minimum configurable swipe threshold.
pub const MIN_SWIPE_THRESHOLD_PX: f32 = 20.0;

/// Maximum configurable swipe threshold.
pub const MAX_SWIPE_THRESHOLD_PX: f32 = 400.0;

/// Fraction of the pointer displacement the main frame follows while dragging.
pub const SWIPE_ELASTICITY: f32 = 0.1;

// ==========================================================================
// Warm Cache Defaults
// ==========================================================================

/// Default number of decoded images kept warm.
pub const DEFAULT_CACHE_MAX_IMAGES: usize = 16;

/// Minimum number of images kept warm.
pub const MIN_CACHE_MAX_IMAGES: usize = 4;

/// Maximum number of images kept warm.
pub const MAX_CACHE_MAX_IMAGES: usize = 64;

/// Default warm cache budget in megabytes.
pub const DEFAULT_CACHE_MAX_MB: u32 = 64;

/// Minimum warm cache budget in megabytes.
pub const MIN_CACHE_MAX_MB: u32 = 8;

/// Maximum warm cache budget in megabytes.
pub const MAX_CACHE_MAX_MB: u32 = 512;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Duration of the smooth thumbnail scroll animation.
pub const THUMBNAIL_SCROLL_DURATION: Duration = Duration::from_millis(250);

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_ZOOM > 0.0);
    assert!(MAX_ZOOM > MIN_ZOOM);
    assert!(DEFAULT_ZOOM >= MIN_ZOOM);
    assert!(DEFAULT_ZOOM <= MAX_ZOOM);
    assert!(DOUBLE_CLICK_ZOOM > MIN_ZOOM);
    assert!(DOUBLE_CLICK_ZOOM <= MAX_ZOOM);
    assert!(MIN_ZOOM_STEP > 0.0);
    assert!(MAX_ZOOM_STEP > MIN_ZOOM_STEP);
    assert!(DEFAULT_ZOOM_STEP >= MIN_ZOOM_STEP);
    assert!(DEFAULT_ZOOM_STEP <= MAX_ZOOM_STEP);

    assert!(MIN_SWIPE_THRESHOLD_PX > 0.0);
    assert!(DEFAULT_SWIPE_THRESHOLD_PX >= MIN_SWIPE_THRESHOLD_PX);
    assert!(DEFAULT_SWIPE_THRESHOLD_PX <= MAX_SWIPE_THRESHOLD_PX);

    assert!(MIN_CACHE_MAX_IMAGES > 0);
    assert!(DEFAULT_CACHE_MAX_IMAGES >= MIN_CACHE_MAX_IMAGES);
    assert!(DEFAULT_CACHE_MAX_IMAGES <= MAX_CACHE_MAX_IMAGES);
    assert!(MIN_CACHE_MAX_MB > 0);
    assert!(DEFAULT_CACHE_MAX_MB >= MIN_CACHE_MAX_MB);
    assert!(DEFAULT_CACHE_MAX_MB <= MAX_CACHE_MAX_MB);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_defaults_are_valid() {
        assert_eq!(DEFAULT_ZOOM, 1.0);
        assert_eq!(MAX_ZOOM, 3.0);
        assert!(DOUBLE_CLICK_ZOOM > DEFAULT_ZOOM);
    }

    #[test]
    fn swipe_threshold_matches_touch_default() {
        assert_eq!(DEFAULT_SWIPE_THRESHOLD_PX, 80.0);
        assert!(SWIPE_ELASTICITY > 0.0 && SWIPE_ELASTICITY < 1.0);
    }
}
