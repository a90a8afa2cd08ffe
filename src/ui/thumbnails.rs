// SPDX-License-Identifier: MPL-2.0
//! Thumbnail containers.
//!
//! Tiles have the fixed sizes from [`ThumbnailContainer::metrics`] so the
//! scroll synchronizer can locate any index without measuring.

use crate::gallery::layout::ThumbnailContainer;
use crate::gallery::{Message, State};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, typography};
use crate::ui::styles;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, container, image, text, Column, Row, Scrollable};
use iced::{ContentFit, Element, Length, Padding};

pub fn view<'a>(state: &'a State, kind: ThumbnailContainer, i18n: &'a I18n) -> Element<'a, Message> {
    let metrics = kind.metrics();
    let selected = state.selected_index();

    let tiles = (0..state.len()).map(|index| tile(state, kind, index, index == selected, i18n));

    let content: Element<'a, Message> = if metrics.vertical {
        Column::with_children(tiles)
            .spacing(metrics.gap)
            .padding(metrics.padding)
            .width(Length::Fill)
            .into()
    } else {
        Row::with_children(tiles)
            .spacing(metrics.gap)
            .padding(metrics.padding)
            .into()
    };

    let scrollbar = Scrollbar::new().width(4.0).scroller_width(4.0);
    let direction = if metrics.vertical {
        Direction::Vertical(scrollbar)
    } else {
        Direction::Horizontal(scrollbar)
    };

    let Some(scroll) = state.container(kind) else {
        return content;
    };

    let scrollable = Scrollable::new(content)
        .id(scroll.id())
        .direction(direction)
        .on_scroll(move |viewport| Message::ThumbnailsScrolled(kind, viewport));

    if metrics.vertical {
        scrollable.width(Length::Fill).height(Length::Fill).into()
    } else {
        scrollable
            .width(Length::Fill)
            .height(Length::Fixed(metrics.strip_height()))
            .into()
    }
}

fn tile<'a>(
    state: &'a State,
    kind: ThumbnailContainer,
    index: usize,
    active: bool,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let metrics = kind.metrics();
    let width = if metrics.vertical {
        Length::Fill
    } else {
        Length::Fixed(metrics.item_width)
    };
    let height = Length::Fixed(metrics.item_height);

    let face: Element<'a, Message> = match state.thumbnail_handle(index) {
        Some(handle) => image(handle)
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fill)
            .opacity(if active {
                opacity::OPAQUE
            } else {
                opacity::INACTIVE_THUMBNAIL
            })
            .into(),
        // Remote images get a face once they are warm
        None => container(text(crate::ui::thumbnail_label(i18n, index)).size(typography::CAPTION))
            .center(Length::Fill)
            .into(),
    };

    button(face)
        .padding(Padding::ZERO)
        .width(width)
        .height(height)
        .style(styles::button::thumbnail(active))
        .on_press(Message::Select(index))
        .into()
}
