// SPDX-License-Identifier: MPL-2.0
//! Keeps the active thumbnail visible.
//!
//! Thumbnails are laid out at fixed sizes, so the position of the active one
//! follows from its index alone. After a selection change the synchronizer
//! checks whether that span is fully inside the container viewport and, if
//! not, animates the scroll offset towards a target chosen by the
//! container's [`Alignment`].

use crate::config::THUMBNAIL_SCROLL_DURATION;
use crate::gallery::layout::{Alignment, ThumbnailContainer, ThumbnailMetrics};
use iced::widget::scrollable::{AbsoluteOffset, Viewport};
use iced::widget::{operation, Id};
use iced::Task;
use std::time::{Duration, Instant};

/// Extent of one item along the scroll axis, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f32,
    pub end: f32,
}

impl Span {
    #[must_use]
    pub fn center(self) -> f32 {
        (self.start + self.end) / 2.0
    }
}

/// Position of thumbnail `index` along the scroll axis.
#[must_use]
pub fn item_span(metrics: &ThumbnailMetrics, index: usize) -> Span {
    #[allow(clippy::cast_precision_loss)]
    let start = metrics.padding + index as f32 * (metrics.item_extent() + metrics.gap);
    Span {
        start,
        end: start + metrics.item_extent(),
    }
}

/// Total scrollable length of a container holding `len` thumbnails.
#[must_use]
pub fn content_extent(metrics: &ThumbnailMetrics, len: usize) -> f32 {
    if len == 0 {
        return metrics.padding * 2.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let items = len as f32 * metrics.item_extent() + (len - 1) as f32 * metrics.gap;
    items + metrics.padding * 2.0
}

/// Whether `span` lies fully inside the viewport `[offset, offset + extent]`.
///
/// The cross axis always fits because items are sized to the container.
#[must_use]
pub fn is_fully_visible(span: Span, offset: f32, extent: f32) -> bool {
    span.start >= offset && span.end <= offset + extent
}

/// Scroll offset that reveals thumbnail `index`, or `None` if it is already
/// fully visible.
#[must_use]
pub fn scroll_target(
    metrics: &ThumbnailMetrics,
    index: usize,
    len: usize,
    offset: f32,
    extent: f32,
) -> Option<f32> {
    if index >= len || extent <= 0.0 {
        return None;
    }

    let span = item_span(metrics, index);
    if is_fully_visible(span, offset, extent) {
        return None;
    }

    let target = match metrics.alignment {
        Alignment::Center => span.center() - extent / 2.0,
        Alignment::Nearest => {
            if span.start < offset {
                span.start
            } else {
                span.end - extent
            }
        }
    };
    let max_offset = (content_extent(metrics, len) - extent).max(0.0);
    Some(target.clamp(0.0, max_offset))
}

fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Smooth scroll between two offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    #[must_use]
    pub fn new(from: f32, to: f32, started_at: Instant) -> Self {
        Self {
            from,
            to,
            started_at,
            duration: THUMBNAIL_SCROLL_DURATION,
        }
    }

    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Offset at `now` and whether the animation has finished.
    #[must_use]
    pub fn sample(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration || self.duration.is_zero() {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.from + (self.to - self.from) * ease_out_cubic(t), false)
    }
}

/// Scroll state of one thumbnail container.
#[derive(Debug, Clone)]
pub struct ContainerScroll {
    kind: ThumbnailContainer,
    id: Id,
    offset: f32,
    /// Visible extent reported by the scrollable itself.
    measured_extent: Option<f32>,
    animation: Option<ScrollAnimation>,
}

impl ContainerScroll {
    #[must_use]
    pub fn new(kind: ThumbnailContainer) -> Self {
        Self {
            kind,
            id: Id::unique(),
            offset: 0.0,
            measured_extent: None,
            animation: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ThumbnailContainer {
        self.kind
    }

    /// Widget id of the container's scrollable.
    #[must_use]
    pub fn id(&self) -> Id {
        self.id.clone()
    }

    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Records a viewport reported by the scrollable (user scroll or our
    /// own programmatic scroll).
    pub fn scrolled(&mut self, viewport: Viewport) {
        let offset = viewport.absolute_offset();
        let bounds = viewport.bounds();
        let (offset, extent) = if self.kind.metrics().vertical {
            (offset.y, bounds.height)
        } else {
            (offset.x, bounds.width)
        };
        self.measured_extent = Some(extent);
        if self.animation.is_none() {
            self.offset = offset;
        }
    }

    /// Visible extent: measured if available, else the layout budget.
    #[must_use]
    pub fn extent(&self, budget: f32) -> f32 {
        self.measured_extent.unwrap_or(budget)
    }

    /// Starts a smooth scroll if thumbnail `index` is not fully visible.
    /// Returns `true` when an animation was started.
    pub fn reveal(&mut self, index: usize, len: usize, budget: f32, now: Instant) -> bool {
        let metrics = self.kind.metrics();
        let extent = self.extent(budget);
        match scroll_target(&metrics, index, len, self.offset, extent) {
            Some(target) if (target - self.offset).abs() > f32::EPSILON => {
                // A new target replaces the animation in flight
                self.animation = Some(ScrollAnimation::new(self.offset, target, now));
                true
            }
            _ => false,
        }
    }

    /// Advances the animation. Returns the scroll operation to apply, if any.
    pub fn tick<M: Send + 'static>(&mut self, now: Instant) -> Option<Task<M>> {
        let animation = self.animation?;
        let (offset, finished) = animation.sample(now);
        self.offset = offset;
        if finished {
            self.animation = None;
        }
        let offset = if self.kind.metrics().vertical {
            AbsoluteOffset { x: 0.0, y: offset }
        } else {
            AbsoluteOffset { x: offset, y: 0.0 }
        };
        Some(operation::scroll_to(self.id.clone(), offset))
    }

    /// Drops any animation and returns to the start.
    pub fn reset<M: Send + 'static>(&mut self) -> Task<M> {
        self.animation = None;
        self.offset = 0.0;
        operation::scroll_to(self.id.clone(), AbsoluteOffset { x: 0.0, y: 0.0 })
    }
}
