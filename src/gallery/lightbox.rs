// SPDX-License-Identifier: MPL-2.0
//! Lightbox sub-component: full-window overlay with zoom and pan.
//!
//! The lightbox shares the gallery selection; it never owns an index. It
//! reports navigation requests to the orchestrator as [`Effect::Navigate`].

use crate::gallery::selection::Direction;
use crate::gallery::zoom::{ZoomFactor, ZoomStep};
use iced::keyboard::{self, key};
use iced::mouse::ScrollDelta;
use iced::{Point, Vector};

/// Lightbox state.
#[derive(Debug, Clone, Default)]
pub struct State {
    is_open: bool,
    zoom: ZoomFactor,
    step: ZoomStep,
    /// Image displacement from the centred position, in logical pixels.
    pan: Vector,
    /// Cursor and pan at the moment a pan drag started.
    drag_origin: Option<(Point, Vector)>,
    cursor: Option<Point>,
}

/// Messages for the lightbox sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    Open,
    /// Close control activated.
    Close,
    ZoomIn,
    ZoomOut,
    /// Wheel anywhere over the stage.
    Wheel(ScrollDelta),
    /// Cursor moved over the overlay.
    CursorMoved(Point),
    /// Left button pressed on the image.
    ImagePressed,
    /// Second press of a double-click on the image.
    ImageDoubleClicked,
    /// Left button released anywhere on the overlay.
    Released,
    /// Press landed on the backdrop itself, not on the image or a control.
    BackdropPressed,
    /// Previous/next controls.
    Navigate(Direction),
    /// Key pressed while the overlay has focus.
    KeyPressed(keyboard::Key),
}

/// Effects produced by the lightbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    Opened,
    Closed,
    /// Selection should move; shared with the inline viewer.
    Navigate(Direction),
    ZoomChanged(ZoomFactor),
}

impl State {
    /// Creates a closed lightbox with the given zoom step.
    #[must_use]
    pub fn new(step: ZoomStep) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomFactor {
        self.zoom
    }

    #[must_use]
    pub fn pan(&self) -> Vector {
        self.pan
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Recentres the image. Called when the shared selection changes.
    pub fn reset_pan(&mut self) {
        self.pan = Vector::ZERO;
        self.drag_origin = None;
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        if !self.is_open {
            return match msg {
                Message::Open => self.open(),
                _ => Effect::None,
            };
        }

        match msg {
            Message::Open => Effect::None,
            Message::Close | Message::BackdropPressed => self.close(),
            Message::ZoomIn => self.set_zoom(self.zoom.zoom_in(self.step.value())),
            Message::ZoomOut => self.set_zoom(self.zoom.zoom_out(self.step.value())),
            Message::Wheel(delta) => {
                let y = match delta {
                    ScrollDelta::Lines { y, .. } | ScrollDelta::Pixels { y, .. } => y,
                };
                self.set_zoom(self.zoom.wheel(y, self.step.value()))
            }
            Message::CursorMoved(position) => {
                self.cursor = Some(position);
                if let Some((origin, start_pan)) = self.drag_origin {
                    self.pan = start_pan + (position - origin);
                }
                Effect::None
            }
            Message::ImagePressed => {
                if self.zoom.is_zoomed() {
                    if let Some(cursor) = self.cursor {
                        self.drag_origin = Some((cursor, self.pan));
                    }
                }
                Effect::None
            }
            Message::ImageDoubleClicked => {
                self.drag_origin = None;
                self.set_zoom(self.zoom.toggled())
            }
            Message::Released => {
                self.drag_origin = None;
                Effect::None
            }
            Message::Navigate(direction) => Effect::Navigate(direction),
            Message::KeyPressed(key) => match key {
                keyboard::Key::Named(key::Named::Escape) => self.close(),
                keyboard::Key::Named(key::Named::ArrowLeft) => {
                    Effect::Navigate(Direction::Previous)
                }
                keyboard::Key::Named(key::Named::ArrowRight) => Effect::Navigate(Direction::Next),
                _ => Effect::None,
            },
        }
    }

    fn open(&mut self) -> Effect {
        self.is_open = true;
        self.zoom = ZoomFactor::default();
        self.reset_pan();
        Effect::Opened
    }

    fn close(&mut self) -> Effect {
        self.is_open = false;
        self.zoom = ZoomFactor::default();
        self.reset_pan();
        self.cursor = None;
        Effect::Closed
    }

    fn set_zoom(&mut self, zoom: ZoomFactor) -> Effect {
        if zoom == self.zoom {
            return Effect::None;
        }
        self.zoom = zoom;
        if !zoom.is_zoomed() {
            self.reset_pan();
        }
        Effect::ZoomChanged(zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_ZOOM;
    use crate::test_utils::assert_abs_diff_eq;

    fn open() -> State {
        let mut state = State::default();
        assert_eq!(state.handle(Message::Open), Effect::Opened);
        state
    }

    fn named(key: key::Named) -> Message {
        Message::KeyPressed(keyboard::Key::Named(key))
    }

    #[test]
    fn closed_lightbox_ignores_input() {
        let mut state = State::default();
        assert_eq!(state.handle(Message::ZoomIn), Effect::None);
        assert_eq!(state.handle(named(key::Named::ArrowRight)), Effect::None);
        assert_eq!(state.zoom(), ZoomFactor::default());
    }

    #[test]
    fn zoom_controls_step_by_tenth() {
        let mut state = open();
        state.handle(Message::ZoomIn);
        state.handle(Message::ZoomIn);
        assert_abs_diff_eq!(state.zoom().value(), 1.2);
        state.handle(Message::ZoomOut);
        assert_abs_diff_eq!(state.zoom().value(), 1.1);
    }

    #[test]
    fn zoom_out_at_minimum_is_noop() {
        let mut state = open();
        assert_eq!(state.handle(Message::ZoomOut), Effect::None);
        assert_eq!(state.zoom(), ZoomFactor::default());
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut state = open();
        for _ in 0..40 {
            state.handle(Message::Wheel(ScrollDelta::Lines { x: 0.0, y: 1.0 }));
        }
        assert_eq!(state.zoom().value(), MAX_ZOOM);

        state.handle(Message::Wheel(ScrollDelta::Pixels { x: 0.0, y: -120.0 }));
        assert_abs_diff_eq!(state.zoom().value(), 2.9);
    }

    #[test]
    fn wheel_out_at_minimum_stays_at_rest() {
        let mut state = open();
        for delta in [
            ScrollDelta::Lines { x: 0.0, y: -1.0 },
            ScrollDelta::Pixels { x: 0.0, y: -480.0 },
        ] {
            assert_eq!(state.handle(Message::Wheel(delta)), Effect::None);
            assert_eq!(state.zoom().value(), 1.0);
        }
    }

    #[test]
    fn double_click_toggles_between_one_and_two() {
        let mut state = open();
        state.handle(Message::ImagePressed);
        let effect = state.handle(Message::ImageDoubleClicked);
        assert_eq!(effect, Effect::ZoomChanged(ZoomFactor::new(2.0)));

        state.handle(Message::ImagePressed);
        state.handle(Message::ImageDoubleClicked);
        assert_eq!(state.zoom(), ZoomFactor::default());
    }

    #[test]
    fn double_click_from_other_zoom_returns_to_rest() {
        let mut state = open();
        for _ in 0..5 {
            state.handle(Message::ZoomIn);
        }
        state.handle(Message::CursorMoved(Point::new(10.0, 10.0)));
        state.handle(Message::ImagePressed);
        state.handle(Message::ImageDoubleClicked);
        assert_eq!(state.zoom(), ZoomFactor::default());
        assert!(!state.is_panning());
        assert_eq!(state.pan(), Vector::ZERO);
    }

    #[test]
    fn single_presses_do_not_zoom() {
        let mut state = open();
        assert_eq!(state.handle(Message::ImagePressed), Effect::None);
        assert_eq!(state.handle(Message::ImagePressed), Effect::None);
        assert_eq!(state.zoom(), ZoomFactor::default());
    }

    #[test]
    fn pan_requires_zoom() {
        let mut state = open();
        state.handle(Message::CursorMoved(Point::new(100.0, 100.0)));
        state.handle(Message::ImagePressed);
        state.handle(Message::CursorMoved(Point::new(150.0, 80.0)));
        assert_eq!(state.pan(), Vector::ZERO);
        assert!(!state.is_panning());
    }

    #[test]
    fn pan_is_unbounded_while_zoomed() {
        let mut state = open();
        state.handle(Message::ZoomIn);
        state.handle(Message::CursorMoved(Point::new(0.0, 0.0)));
        state.handle(Message::ImagePressed);
        state.handle(Message::CursorMoved(Point::new(5000.0, -3000.0)));
        assert_eq!(state.pan(), Vector::new(5000.0, -3000.0));

        state.handle(Message::Released);
        state.handle(Message::CursorMoved(Point::new(0.0, 0.0)));
        assert_eq!(state.pan(), Vector::new(5000.0, -3000.0));
    }

    #[test]
    fn zooming_back_to_rest_recentres() {
        let mut state = open();
        state.handle(Message::ZoomIn);
        state.handle(Message::CursorMoved(Point::new(0.0, 0.0)));
        state.handle(Message::ImagePressed);
        state.handle(Message::CursorMoved(Point::new(40.0, 40.0)));
        state.handle(Message::Released);

        state.handle(Message::ZoomOut);
        assert_eq!(state.pan(), Vector::ZERO);
    }

    #[test]
    fn reopen_resets_zoom() {
        let mut state = open();
        state.handle(Message::ZoomIn);
        state.handle(Message::ZoomIn);
        assert_eq!(state.handle(named(key::Named::Escape)), Effect::Closed);
        assert!(!state.is_open());

        state.handle(Message::Open);
        assert_eq!(state.zoom(), ZoomFactor::default());
        assert_eq!(state.pan(), Vector::ZERO);
    }

    #[test]
    fn backdrop_press_closes() {
        let mut state = open();
        assert_eq!(state.handle(Message::BackdropPressed), Effect::Closed);
    }

    #[test]
    fn arrows_request_navigation() {
        let mut state = open();
        assert_eq!(
            state.handle(named(key::Named::ArrowLeft)),
            Effect::Navigate(Direction::Previous)
        );
        assert_eq!(
            state.handle(named(key::Named::ArrowRight)),
            Effect::Navigate(Direction::Next)
        );
        assert_eq!(
            state.handle(Message::Navigate(Direction::Next)),
            Effect::Navigate(Direction::Next)
        );
    }
}
