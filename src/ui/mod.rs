// SPDX-License-Identifier: MPL-2.0
//! Views for the gallery surfaces.
//!
//! - [`inline`] - header, main frame and thumbnail container
//! - [`thumbnails`] - the three thumbnail containers
//! - [`lightbox`] - full-window overlay with zoom and pan
//! - [`widgets`] - canvas image frame and spinner
//! - [`styles`] / [`design_tokens`] - shared look

pub mod design_tokens;
pub mod inline;
pub mod lightbox;
pub mod styles;
pub mod thumbnails;
pub mod widgets;

use crate::i18n::fluent::I18n;

/// Label of the main image, e.g. "Atlas screenshot 3".
#[must_use]
pub fn image_label(i18n: &I18n, title: Option<&str>, index: usize) -> String {
    let fallback;
    let title = match title {
        Some(title) => title,
        None => {
            fallback = i18n.tr("gallery-untitled");
            &fallback
        }
    };
    let index = (index + 1).to_string();
    i18n.tr_with_args("gallery-image-label", &[("title", title), ("index", &index)])
}

/// Label of thumbnail `index`, e.g. "Thumbnail 3".
#[must_use]
pub fn thumbnail_label(i18n: &I18n, index: usize) -> String {
    let index = (index + 1).to_string();
    i18n.tr_with_args("gallery-thumbnail-label", &[("index", &index)])
}

/// One-based position read-out, e.g. "3 / 7".
#[must_use]
pub fn counter(i18n: &I18n, index: usize, len: usize) -> String {
    let current = (index + 1).to_string();
    let total = len.to_string();
    i18n.tr_with_args("gallery-counter", &[("current", &current), ("total", &total)])
}
