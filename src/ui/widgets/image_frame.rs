// SPDX-License-Identifier: MPL-2.0
//! Canvas that draws one image fitted into its bounds, then scaled and
//! shifted.
//!
//! The inline viewer uses it with zoom `1.0` and the elastic swipe offset;
//! the lightbox passes its zoom factor and pan offset. Anything outside the
//! canvas bounds is clipped.
//!
//! Presses are only reported when they land on the drawn image, so a
//! backdrop underneath still receives clicks on the margin. Wheel ticks are
//! captured anywhere inside the canvas bounds.

use iced::widget::canvas::{self, Canvas, Frame, Geometry};
use iced::widget::{image, Action};
use iced::advanced::mouse;
use iced::{Element, Event, Length, Point, Rectangle, Renderer, Size, Theme, Vector};

pub struct ImageFrame<Message> {
    handle: image::Handle,
    natural: Size,
    zoom: f32,
    offset: Vector,
    on_press: Option<Message>,
    on_double_click: Option<Message>,
    on_scroll: Option<fn(mouse::ScrollDelta) -> Message>,
    interaction: mouse::Interaction,
}

impl<Message> ImageFrame<Message> {
    #[must_use]
    pub fn new(handle: image::Handle, natural: Size<u32>) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let natural = Size::new(natural.width as f32, natural.height as f32);
        Self {
            handle,
            natural,
            zoom: 1.0,
            offset: Vector::ZERO,
            on_press: None,
            on_double_click: None,
            on_scroll: None,
            interaction: mouse::Interaction::default(),
        }
    }

    /// Message published when the left button goes down on the image.
    #[must_use]
    pub fn on_press(mut self, message: Message) -> Self {
        self.on_press = Some(message);
        self
    }

    /// Message published instead of `on_press` for the second press of a
    /// double-click on the image.
    #[must_use]
    pub fn on_double_click(mut self, message: Message) -> Self {
        self.on_double_click = Some(message);
        self
    }

    /// Message published for wheel ticks over the canvas.
    #[must_use]
    pub fn on_scroll(mut self, f: fn(mouse::ScrollDelta) -> Message) -> Self {
        self.on_scroll = Some(f);
        self
    }

    /// Cursor shown while hovering the image.
    #[must_use]
    pub fn interaction(mut self, interaction: mouse::Interaction) -> Self {
        self.interaction = interaction;
        self
    }

    #[must_use]
    pub fn zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: Vector) -> Self {
        self.offset = offset;
        self
    }

    pub fn into_element<'a>(self) -> Element<'a, Message>
    where
        Message: Clone + 'a,
    {
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Where the image lands inside `bounds`: contained, centred, scaled by
/// `zoom` around the centre and shifted by `offset`.
#[must_use]
pub fn placement(natural: Size, bounds: Size, zoom: f32, offset: Vector) -> Rectangle {
    if natural.width <= 0.0 || natural.height <= 0.0 {
        return Rectangle::new(Point::ORIGIN, Size::ZERO);
    }

    let fit = (bounds.width / natural.width).min(bounds.height / natural.height);
    let scale = (fit * zoom).max(0.0);
    let size = Size::new(natural.width * scale, natural.height * scale);
    let top_left = Point::new(
        (bounds.width - size.width) / 2.0 + offset.x,
        (bounds.height - size.height) / 2.0 + offset.y,
    );
    Rectangle::new(top_left, size)
}

impl<Message> ImageFrame<Message> {
    fn target(&self, bounds: Rectangle) -> Rectangle {
        placement(self.natural, bounds.size(), self.zoom, self.offset)
    }

    fn is_over_image(&self, bounds: Rectangle, cursor: mouse::Cursor) -> bool {
        cursor
            .position_in(bounds)
            .is_some_and(|position| self.target(bounds).contains(position))
    }
}

impl<Message: Clone> ImageFrame<Message> {
    /// Picks the message for a left press, tracking the previous click in
    /// `last_click` so the framework can classify double-clicks.
    fn press(&self, last_click: &mut Option<mouse::Click>, position: Point) -> Option<Message> {
        let click = mouse::Click::new(position, mouse::Button::Left, *last_click);
        *last_click = Some(click);

        match (click.kind(), &self.on_double_click) {
            (mouse::click::Kind::Double, Some(message)) => Some(message.clone()),
            _ => self.on_press.clone(),
        }
    }
}

impl<Message: Clone> canvas::Program<Message> for ImageFrame<Message> {
    type State = Option<mouse::Click>;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::WheelScrolled { delta }) if cursor.is_over(bounds) => self
                .on_scroll
                .map(|f| Action::publish(f(*delta)).and_capture()),
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
                if self.is_over_image(bounds, cursor) =>
            {
                let position = cursor.position()?;
                self.press(state, position)
                    .map(|message| Action::publish(message).and_capture())
            }
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.is_over_image(bounds, cursor) {
            self.interaction
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let target = self.target(bounds);
        if target.width > 0.0 && target.height > 0.0 {
            frame.draw_image(target, canvas::Image::new(self.handle.clone()));
        }
        vec![frame.into_geometry()]
    }
}
