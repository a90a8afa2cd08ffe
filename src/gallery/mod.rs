// SPDX-License-Identifier: MPL-2.0
//! The gallery component: an inline viewer with thumbnails plus a
//! full-window lightbox, both driven by one shared selection.
//!
//! The orchestrator in [`component`] owns the sub-components and follows the
//! usual `handle_message(msg) -> (Effect, Task)` contract; views live in
//! [`crate::ui`].

pub mod component;
pub mod layout;
pub mod lightbox;
pub mod loading;
pub mod selection;
pub mod swipe;
pub mod thumbnails;
pub mod zoom;

pub use component::{Effect, Message, State};
pub use layout::{Arrangement, Layout};
pub use selection::{Direction, Selection};

use crate::config::{Config, DEFAULT_SWIPE_THRESHOLD_PX};
use crate::media::ImageSource;
use zoom::ZoomStep;

/// What a gallery shows. Supplied by the content provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryInput {
    /// Ordered images; duplicates are allowed and indexed independently.
    pub images: Vec<ImageSource>,
    pub title: Option<String>,
    pub layout: Layout,
}

impl GalleryInput {
    #[must_use]
    pub fn new(images: Vec<ImageSource>) -> Self {
        Self {
            images,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

/// Tunables taken from the user configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryOptions {
    pub swipe_threshold_px: f32,
    pub zoom_step: ZoomStep,
    pub preload_neighbors: bool,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            zoom_step: ZoomStep::default(),
            preload_neighbors: true,
        }
    }
}

impl From<&Config> for GalleryOptions {
    fn from(config: &Config) -> Self {
        Self {
            swipe_threshold_px: config.swipe_threshold_px(),
            zoom_step: ZoomStep::new(config.zoom_step()),
            preload_neighbors: config.preload_neighbors(),
        }
    }
}
