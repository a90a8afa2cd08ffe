// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::gallery::{self, Layout};
use iced::{keyboard, Size};
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Message for the gallery of entry `index`.
    Gallery(usize, gallery::Message),
    WindowResized(Size),
    KeyPressed(keyboard::Key),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override (e.g. `--lang ko`).
    pub lang: Option<String>,
    /// Layout for entries that do not pick one.
    pub layout: Option<Layout>,
    /// Title of the gallery built from loose images.
    pub title: Option<String>,
    /// Optional config directory override (e.g. `--config-dir /path`).
    pub config_dir: Option<String>,
    /// Content manifest listing the portfolio entries.
    pub manifest: Option<PathBuf>,
    /// Loose image paths or URLs, shown as a single entry.
    pub images: Vec<String>,
}
