// SPDX-License-Identifier: MPL-2.0
//! Gallery arrangements and their geometry.
//!
//! A gallery asks for a [`Layout`]; the window width then decides the
//! [`Arrangement`] actually rendered. Narrow windows always get the stacked
//! mobile arrangement.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Windows narrower than this render the mobile arrangement.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Mobile windows at least this wide use the shorter frame.
pub const COMPACT_BREAKPOINT: f32 = 640.0;

/// Height of the title/counter header row.
pub const HEADER_HEIGHT: f32 = 32.0;

/// Vertical spacing between gallery rows.
pub const ROW_SPACING: f32 = 12.0;

/// Width of the thumbnail column in the vertical arrangement.
pub const VERTICAL_COLUMN_WIDTH: f32 = 200.0;

/// Requested desktop arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Main frame on the left, thumbnail column on the right.
    #[default]
    Vertical,
    /// Main frame on top, thumbnail strip below.
    Horizontal,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(format!("unknown layout '{other}'")),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        })
    }
}

/// Arrangement rendered for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    Horizontal,
    Vertical,
    Mobile,
}

impl Arrangement {
    #[must_use]
    pub fn resolve(layout: Layout, window_width: f32) -> Self {
        if window_width < MOBILE_BREAKPOINT {
            return Self::Mobile;
        }
        match layout {
            Layout::Horizontal => Self::Horizontal,
            Layout::Vertical => Self::Vertical,
        }
    }

    /// Height of the main image frame for a window of the given size.
    #[must_use]
    pub fn frame_height(self, window: iced::Size) -> f32 {
        let fraction = match self {
            Self::Horizontal => 0.55,
            Self::Vertical => 0.70,
            Self::Mobile if window.width >= COMPACT_BREAKPOINT => 0.50,
            Self::Mobile => 0.56,
        };
        (window.height * fraction).max(0.0)
    }

    /// Thumbnail container rendered by this arrangement.
    #[must_use]
    pub fn thumbnail_container(self) -> ThumbnailContainer {
        match self {
            Self::Horizontal => ThumbnailContainer::InlineHorizontal,
            Self::Vertical => ThumbnailContainer::InlineVertical,
            Self::Mobile => ThumbnailContainer::Mobile,
        }
    }
}

/// The three thumbnail containers a gallery can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailContainer {
    /// Strip under the main frame (desktop horizontal).
    InlineHorizontal,
    /// Column beside the main frame (desktop vertical).
    InlineVertical,
    /// Strip under the main frame (narrow windows).
    Mobile,
}

/// Scroll alignment used when the active thumbnail must be revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Centre the item in the viewport.
    Center,
    /// Scroll the least distance that makes the item fully visible.
    Nearest,
}

/// Fixed geometry of one thumbnail container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailMetrics {
    /// Item width (cross axis for the vertical list, which fills the column).
    pub item_width: f32,
    /// Item height.
    pub item_height: f32,
    /// Gap between consecutive items.
    pub gap: f32,
    /// Inner padding before the first and after the last item.
    pub padding: f32,
    /// Whether items flow vertically.
    pub vertical: bool,
    pub alignment: Alignment,
}

impl ThumbnailMetrics {
    /// Length of one item along the scroll axis.
    #[must_use]
    pub fn item_extent(&self) -> f32 {
        if self.vertical {
            self.item_height
        } else {
            self.item_width
        }
    }

    /// Cross-axis size of a horizontal strip, including padding.
    #[must_use]
    pub fn strip_height(&self) -> f32 {
        self.item_height + self.padding * 2.0
    }
}

impl ThumbnailContainer {
    #[must_use]
    pub fn metrics(self) -> ThumbnailMetrics {
        match self {
            Self::InlineHorizontal => ThumbnailMetrics {
                item_width: 160.0,
                item_height: 96.0,
                gap: 12.0,
                padding: 8.0,
                vertical: false,
                alignment: Alignment::Center,
            },
            Self::InlineVertical => ThumbnailMetrics {
                item_width: VERTICAL_COLUMN_WIDTH - 16.0,
                item_height: 112.0,
                gap: 8.0,
                padding: 8.0,
                vertical: true,
                alignment: Alignment::Nearest,
            },
            Self::Mobile => ThumbnailMetrics {
                item_width: 96.0,
                item_height: 64.0,
                gap: 8.0,
                padding: 4.0,
                vertical: false,
                alignment: Alignment::Center,
            },
        }
    }

    /// Visible length of the container along its scroll axis, given the
    /// width available to the gallery and the frame height.
    #[must_use]
    pub fn viewport_extent(self, gallery_width: f32, frame_height: f32) -> f32 {
        match self {
            Self::InlineVertical => frame_height,
            Self::InlineHorizontal | Self::Mobile => gallery_width,
        }
    }
}

/// Total height of a gallery, reported to the host as advisory.
#[must_use]
pub fn gallery_height(
    arrangement: Arrangement,
    window: iced::Size,
    len: usize,
    has_title: bool,
) -> f32 {
    if len == 0 {
        return 0.0;
    }

    let mut height = arrangement.frame_height(window);
    if has_title {
        height += HEADER_HEIGHT + ROW_SPACING;
    }
    if len > 1 && arrangement != Arrangement::Vertical {
        height += ROW_SPACING + arrangement.thumbnail_container().metrics().strip_height();
    }
    height
}
