// SPDX-License-Identifier: MPL-2.0
//! Full-window lightbox overlay.
//!
//! The dimmed backdrop is the bottom layer of the stack and the only one that
//! closes the lightbox on press. Everything drawn above it (image canvas,
//! controls, caption, read-outs) captures its own presses.
//!
//! Wheel ticks anywhere on the overlay zoom and are captured, so the host
//! page underneath never scrolls while the lightbox is open.

use crate::gallery::lightbox::Message as LightboxMessage;
use crate::gallery::{Direction, Message, State};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::inline::{control, error_placeholder};
use crate::ui::styles;
use crate::ui::widgets::{AnimatedSpinner, ImageFrame};
use iced::widget::{container, mouse_area, opaque, text, Column, Row, Stack};
use iced::{mouse, Alignment, Element, Length, Point};

const CLOSE_GLYPH: &str = "\u{2715}";
const ZOOM_IN_GLYPH: &str = "+";
const ZOOM_OUT_GLYPH: &str = "\u{2212}";
const PREVIOUS_GLYPH: &str = "\u{2039}";
const NEXT_GLYPH: &str = "\u{203A}";

fn lightbox(message: LightboxMessage) -> Message {
    Message::Lightbox(message)
}

pub fn view<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let backdrop = mouse_area(
        container(Column::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::backdrop),
    )
    .on_press(lightbox(LightboxMessage::BackdropPressed))
    .on_scroll(|delta| lightbox(LightboxMessage::Wheel(delta)));

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(backdrop)
        .push(
            container(stage(state, i18n))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(spacing::XL * 2.0),
        );

    if state.is_loading() {
        layers = layers.push(
            container(
                AnimatedSpinner::new(palette::WHITE, state.spinner_rotation())
                    .size(sizing::ICON_XL * 1.5)
                    .into_element(),
            )
            .center(Length::Fill),
        );
    }

    layers = layers.push(
        container(opaque(toolbar(state, i18n)))
            .align_right(Length::Fill)
            .align_top(Length::Fill)
            .padding(spacing::MD),
    );

    if state.len() > 1 {
        layers = layers
            .push(
                container(control(
                    PREVIOUS_GLYPH,
                    i18n.tr("gallery-previous"),
                    lightbox(LightboxMessage::Navigate(Direction::Previous)),
                ))
                .align_left(Length::Fill)
                .center_y(Length::Fill)
                .padding(spacing::MD),
            )
            .push(
                container(control(
                    NEXT_GLYPH,
                    i18n.tr("gallery-next"),
                    lightbox(LightboxMessage::Navigate(Direction::Next)),
                ))
                .align_right(Length::Fill)
                .center_y(Length::Fill)
                .padding(spacing::MD),
            );
    }

    layers = layers.push(
        container(opaque(caption(state, i18n)))
            .center_x(Length::Fill)
            .align_bottom(Length::Fill)
            .padding(spacing::MD),
    );

    mouse_area(layers)
        .on_move(|position: Point| lightbox(LightboxMessage::CursorMoved(position)))
        .on_release(lightbox(LightboxMessage::Released))
        .into()
}

fn stage<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    if let Some(reason) = state.failure_key() {
        return container(opaque(error_placeholder(i18n, reason, sizing::ICON_XL * 2.0)))
            .center(Length::Fill)
            .into();
    }

    let (Some(handle), Some(size)) = (state.current_handle(), state.natural_size()) else {
        return Column::new().into();
    };

    let zoom = state.zoom();
    let interaction = if state.is_panning() {
        mouse::Interaction::Grabbing
    } else if zoom.is_zoomed() {
        mouse::Interaction::Grab
    } else {
        mouse::Interaction::ZoomIn
    };

    ImageFrame::new(handle.clone(), size)
        .zoom(zoom.value())
        .offset(state.pan())
        .on_press(lightbox(LightboxMessage::ImagePressed))
        .on_double_click(lightbox(LightboxMessage::ImageDoubleClicked))
        .on_scroll(|delta| Message::Lightbox(LightboxMessage::Wheel(delta)))
        .interaction(interaction)
        .into_element()
}

fn toolbar<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let zoom = state.zoom();
    let level = i18n.tr_with_args(
        "lightbox-zoom-level",
        &[("percent", &zoom.percent().to_string())],
    );

    Row::new()
        .spacing(spacing::XS)
        .align_y(Alignment::Center)
        .push(control(
            ZOOM_OUT_GLYPH,
            i18n.tr("lightbox-zoom-out"),
            lightbox(LightboxMessage::ZoomOut),
        ))
        .push(
            container(text(level).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::container::indicator),
        )
        .push(control(
            ZOOM_IN_GLYPH,
            i18n.tr("lightbox-zoom-in"),
            lightbox(LightboxMessage::ZoomIn),
        ))
        .push(control(
            CLOSE_GLYPH,
            i18n.tr("lightbox-close"),
            lightbox(LightboxMessage::Close),
        ))
        .into()
}

fn caption<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let index = state.selected_index();
    let label = crate::ui::image_label(i18n, state.input().title.as_deref(), index);

    let mut line = Row::new()
        .spacing(spacing::MD)
        .align_y(Alignment::Center)
        .push(text(label).size(typography::BODY));
    if state.len() > 1 {
        line = line.push(text(crate::ui::counter(i18n, index, state.len())).size(typography::CAPTION));
    }

    container(
        Column::new()
            .spacing(spacing::XXS)
            .align_x(Alignment::Center)
            .push(line)
            .push(text(i18n.tr("lightbox-hint")).size(typography::CAPTION)),
    )
    .padding([spacing::XS, spacing::MD])
    .style(styles::container::indicator)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Error;
    use crate::gallery::{GalleryInput, GalleryOptions};
    use crate::media::{ImageSource, WarmCache, WarmCacheConfig};
    use iced_test::simulator;
    use std::path::PathBuf;

    fn open_on_failed_image() -> State {
        let images = vec![
            ImageSource::Local(PathBuf::from("/nonexistent/a.png")),
            ImageSource::Local(PathBuf::from("/nonexistent/b.png")),
        ];
        let (mut state, _) = State::new(
            GalleryInput::new(images).with_title("Atlas"),
            GalleryOptions::default(),
            WarmCache::shared(WarmCacheConfig::disabled()),
        );
        let ticket = state.current_ticket().expect("image load in flight");
        let _ = state.handle_message(Message::ProbeFinished {
            ticket,
            result: Err(Error::Decode("corrupt".into())),
        });
        let _ = state.handle_message(Message::OpenLightbox);
        assert!(state.is_lightbox_open());
        state
    }

    fn click(state: &mut State, i18n: &I18n, label: &str) {
        let messages: Vec<Message> = {
            let mut ui = simulator(view(state, i18n));
            ui.click(label).expect("label is rendered");
            ui.into_messages().collect()
        };
        for message in messages {
            let _ = state.handle_message(message);
        }
    }

    #[test]
    fn clicking_text_on_the_overlay_keeps_it_open() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        let mut state = open_on_failed_image();

        for label in ["Failed to load", "100%", "Atlas screenshot 1", "1 / 2"] {
            click(&mut state, &i18n, label);
            assert!(state.is_lightbox_open(), "clicking {label:?} closed the lightbox");
        }
    }

    #[test]
    fn close_control_still_closes() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        let mut state = open_on_failed_image();

        click(&mut state, &i18n, CLOSE_GLYPH);
        assert!(!state.is_lightbox_open());
    }
}
