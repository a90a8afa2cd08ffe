// SPDX-License-Identifier: MPL-2.0
//! Loading spinner drawn on a canvas.
//!
//! The rotation comes from the gallery's loading state, which advances it on
//! every animation tick while a probe is in flight.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::PI;

/// Arc length of the moving part.
const SWEEP: f32 = PI * 0.75;

const SEGMENTS: u16 = 24;

const STROKE_WIDTH: f32 = 3.0;

pub struct AnimatedSpinner {
    cache: Cache,
    /// Radians.
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::ICON_XL,
        }
    }

    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

/// Points along the arc starting at `rotation`, measured from twelve o'clock.
fn arc_points(center: Point, radius: f32, rotation: f32) -> impl Iterator<Item = Point> {
    let start = rotation - PI / 2.0;
    (0..=SEGMENTS).map(move |i| {
        let angle = start + SWEEP * f32::from(i) / f32::from(SEGMENTS);
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    })
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH;

                frame.stroke(
                    &Path::circle(center, radius),
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(Color { a: 0.25, ..self.color }),
                );

                let mut builder = canvas::path::Builder::new();
                let mut points = arc_points(center, radius, self.rotation);
                if let Some(first) = points.next() {
                    builder.move_to(first);
                    for point in points {
                        builder.line_to(point);
                    }
                }
                frame.stroke(
                    &builder.build(),
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn arc_starts_at_top_without_rotation() {
        let first = arc_points(Point::ORIGIN, 10.0, 0.0)
            .next()
            .expect("arc has points");
        assert_abs_diff_eq!(first.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(first.y, -10.0, epsilon = 1e-4);
    }

    #[test]
    fn arc_stays_on_circle() {
        for point in arc_points(Point::new(5.0, 5.0), 8.0, 1.3) {
            let distance = ((point.x - 5.0).powi(2) + (point.y - 5.0).powi(2)).sqrt();
            assert_abs_diff_eq!(distance, 8.0, epsilon = 1e-3);
        }
    }
}
