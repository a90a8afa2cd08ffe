// SPDX-License-Identifier: MPL-2.0
//! `folio_gallery` is a portfolio media viewer built with the Iced GUI
//! framework.
//!
//! Each portfolio entry gets an inline gallery (main frame, thumbnails,
//! swipe navigation) that can expand into a zoomable lightbox. Translations
//! use Fluent and preferences live in a `settings.toml` file.

#![doc(html_root_url = "https://docs.rs/folio_gallery/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod manifest;
pub mod media;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
