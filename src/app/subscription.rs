// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window size changes go to every gallery; key presses only matter while a
//! lightbox is open, so the update loop drops them otherwise.

use super::Message;
use crate::gallery;
use iced::{event, keyboard, window, Subscription};

/// Routes native window and keyboard events.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Window(window::Event::Opened { size, .. })
        | event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        // Escape must reach the lightbox even when a widget has focus
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            Some(Message::KeyPressed(key))
        }
        _ => None,
    })
}

/// Animation ticks of one gallery, tagged with its entry index.
pub fn gallery_subscription(index: usize, state: &gallery::State) -> Subscription<Message> {
    state
        .subscription()
        .with(index)
        .map(|(index, message)| Message::Gallery(index, message))
}
