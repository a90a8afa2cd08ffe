// SPDX-License-Identifier: MPL-2.0
//! Inline viewer: header, main frame and thumbnails, arranged by window
//! width and the requested layout.

use crate::gallery::layout::{Arrangement, ROW_SPACING, VERTICAL_COLUMN_WIDTH};
use crate::gallery::{Message, State};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::thumbnails;
use crate::ui::widgets::{AnimatedSpinner, ImageFrame};
use iced::widget::{button, container, mouse_area, text, tooltip, Column, Row, Stack};
use iced::{mouse, Alignment, Element, Length, Padding, Vector};

const PREVIOUS_GLYPH: &str = "\u{2039}";
const NEXT_GLYPH: &str = "\u{203A}";
const EXPAND_GLYPH: &str = "\u{2922}";
const IMAGE_OFF_GLYPH: &str = "\u{2298}";

pub fn view<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    if state.is_empty() {
        return Column::new().into();
    }

    let mut content = Column::new().spacing(ROW_SPACING);
    if let Some(title) = &state.input().title {
        content = content.push(header(state, title, i18n));
    }

    let show_thumbnails = state.len() > 1;
    let arrangement = state.arrangement();
    let kind = arrangement.thumbnail_container();

    let body: Element<'a, Message> = match arrangement {
        Arrangement::Vertical if show_thumbnails => Row::new()
            .spacing(ROW_SPACING)
            .push(frame(state, i18n))
            .push(
                container(thumbnails::view(state, kind, i18n))
                    .width(Length::Fixed(VERTICAL_COLUMN_WIDTH))
                    .height(Length::Fixed(state.frame_height())),
            )
            .into(),
        _ if show_thumbnails => Column::new()
            .spacing(ROW_SPACING)
            .push(frame(state, i18n))
            .push(thumbnails::view(state, kind, i18n))
            .into(),
        _ => frame(state, i18n),
    };

    content.push(body).width(Length::Fill).into()
}

fn header<'a>(state: &'a State, title: &'a str, i18n: &'a I18n) -> Element<'a, Message> {
    Row::new()
        .align_y(Alignment::Center)
        .push(text(title).size(typography::TITLE_SM).width(Length::Fill))
        .push(
            text(crate::ui::counter(i18n, state.selected_index(), state.len()))
                .size(typography::CAPTION),
        )
        .into()
}

fn frame<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let picture: Element<'a, Message> = if let Some(reason) = state.failure_key() {
        container(error_placeholder(i18n, reason, sizing::ICON_XL))
            .center(Length::Fill)
            .into()
    } else if let (Some(handle), Some(size)) = (state.current_handle(), state.natural_size()) {
        ImageFrame::new(handle.clone(), size)
            .offset(Vector::new(state.swipe_offset(), 0.0))
            .into_element()
    } else {
        Column::new().into()
    };

    let interaction = if state.is_swiping() {
        mouse::Interaction::Grabbing
    } else if state.len() > 1 {
        mouse::Interaction::Grab
    } else {
        mouse::Interaction::default()
    };

    let surface = mouse_area(container(picture).width(Length::Fill).height(Length::Fill))
        .on_move(Message::FrameCursorMoved)
        .on_press(Message::FramePressed)
        .on_release(Message::FrameReleased)
        .on_exit(Message::FrameExited)
        .interaction(interaction);

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(surface);

    if state.is_loading() {
        layers = layers.push(
            container(AnimatedSpinner::new(palette::WHITE, state.spinner_rotation()).into_element())
                .center(Length::Fill),
        );
    }

    layers = layers.push(
        container(control(
            EXPAND_GLYPH,
            i18n.tr("gallery-expand"),
            Message::OpenLightbox,
        ))
        .align_right(Length::Fill)
        .align_top(Length::Fill)
        .padding(spacing::XS),
    );

    let label = crate::ui::image_label(i18n, state.input().title.as_deref(), state.selected_index());
    layers = layers.push(
        container(
            container(text(label).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::container::indicator),
        )
        .align_left(Length::Fill)
        .align_bottom(Length::Fill)
        .padding(spacing::XS),
    );

    if state.len() > 1 {
        layers = layers
            .push(
                container(control(
                    PREVIOUS_GLYPH,
                    i18n.tr("gallery-previous"),
                    Message::Previous,
                ))
                .align_left(Length::Fill)
                .center_y(Length::Fill)
                .padding(spacing::XS),
            )
            .push(
                container(control(NEXT_GLYPH, i18n.tr("gallery-next"), Message::Next))
                    .align_right(Length::Fill)
                    .center_y(Length::Fill)
                    .padding(spacing::XS),
            );
    }

    container(layers)
        .width(Length::Fill)
        .height(Length::Fixed(state.frame_height()))
        .style(styles::container::frame)
        .clip(true)
        .into()
}

/// Round overlay control with a tooltip carrying its label.
pub fn control<'a, M: Clone + 'a>(glyph: &'a str, label: String, on_press: M) -> Element<'a, M> {
    let face = button(
        text(glyph)
            .size(typography::TITLE_MD)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(),
    )
    .width(Length::Fixed(sizing::CONTROL))
    .height(Length::Fixed(sizing::CONTROL))
    .padding(Padding::ZERO)
    .style(styles::button::overlay(
        palette::WHITE,
        opacity::OVERLAY_MEDIUM,
        opacity::OVERLAY_STRONG,
    ))
    .on_press(on_press);

    tooltip(
        face,
        container(text(label).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::XS])
            .style(styles::container::indicator),
        tooltip::Position::Bottom,
    )
    .into()
}

/// Shown in place of an image that failed to load. `reason` is an i18n key.
///
/// Sized to its content; callers center it in the frame.
pub fn error_placeholder<'a, M: 'a>(i18n: &I18n, reason: &str, glyph_size: f32) -> Element<'a, M> {
    container(
        Column::new()
            .spacing(spacing::XS)
            .align_x(Alignment::Center)
            .push(text(IMAGE_OFF_GLYPH).size(glyph_size))
            .push(text(i18n.tr(reason)).size(typography::BODY)),
    )
    .padding([spacing::MD, spacing::LG])
    .style(styles::container::error_placeholder)
    .into()
}
