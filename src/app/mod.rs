// SPDX-License-Identifier: MPL-2.0
//! Application root: the host page that lists portfolio entries and embeds
//! one gallery per entry.
//!
//! The host owns the window size and hands every gallery a clone of one
//! shared warm cache. Galleries report
//! `LightboxOpened`/`LightboxClosed` effects and the host stacks the open
//! lightbox over the page.

mod message;
pub mod paths;
mod subscription;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::error::Result;
use crate::gallery::{self, GalleryOptions};
use crate::i18n::fluent::I18n;
use crate::manifest::{Entry, Manifest};
use crate::media::{WarmCache, WarmCacheConfig};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{container, scrollable, text, Column, Stack};
use iced::{keyboard, window, Element, Length, Size, Subscription, Task, Theme};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: f32 = 1280.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 360.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// Padding around the page column.
const PAGE_PADDING: f32 = spacing::LG;
/// Padding inside an entry card.
const CARD_PADDING: f32 = spacing::MD;

/// One portfolio entry and its gallery.
struct EntryView {
    entry: Entry,
    gallery: gallery::State,
}

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    entries: Vec<EntryView>,
    window: Size,
    /// Entry whose lightbox is currently open.
    open_lightbox: Option<usize>,
    /// i18n key of a problem shown above the entries.
    notice: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("entries", &self.entries.len())
            .field("window", &self.window)
            .field("open_lightbox", &self.open_lightbox)
            .field("notice", &self.notice)
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced asks for an `Fn` boot closure; the flags are consumed once
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Width a gallery gets inside its card for a given window size.
#[must_use]
pub fn gallery_width(window: Size) -> f32 {
    let page = (window.width - 2.0 * PAGE_PADDING).min(sizing::CONTENT_MAX_WIDTH);
    (page - 2.0 * CARD_PADDING).max(0.0)
}

/// Reads the manifest (if any) and appends loose command-line images as
/// one extra entry.
pub fn collect_entries(flags: &Flags) -> Result<Manifest> {
    let mut manifest = match &flags.manifest {
        Some(path) => Manifest::load(path)?,
        None => Manifest::default(),
    };
    if !flags.images.is_empty() {
        let ad_hoc = Manifest::from_images(flags.images.clone(), flags.title.clone());
        manifest.entries.extend(ad_hoc.entries);
    }
    Ok(manifest)
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::set_cli_dir(flags.config_dir.clone());
        let (config, warning) = config::load();
        Self::with_config(flags, &config, warning)
    }

    /// Builds the host from already loaded settings.
    pub fn with_config(
        flags: Flags,
        config: &Config,
        config_warning: Option<String>,
    ) -> (Self, Task<Message>) {
        let i18n = I18n::new(flags.lang.clone(), config);
        let cache = WarmCache::shared(WarmCacheConfig {
            max_bytes: config.cache_max_bytes(),
            max_images: config.cache_max_images(),
            enabled: config.preload_neighbors(),
        });
        let default_layout = flags.layout.unwrap_or_else(|| config.default_layout());
        let options = GalleryOptions::from(config);

        let mut notice = config_warning;
        let manifest = collect_entries(&flags).unwrap_or_else(|err| {
            log::error!("failed to read content manifest: {err}");
            notice = Some("error-manifest".to_string());
            Manifest::default()
        });

        let mut tasks = Vec::new();
        let entries = manifest
            .entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let input = entry.gallery_input(default_layout).unwrap_or_else(|err| {
                    log::warn!("entry '{}' has unusable images: {err}", entry.id);
                    gallery::GalleryInput::default().with_layout(default_layout)
                });
                let (gallery, task) = gallery::State::new(input, options, cache.clone());
                tasks.push(task.map(move |message| Message::Gallery(index, message)));
                EntryView { entry, gallery }
            })
            .collect::<Vec<_>>();

        log::info!("showing {} portfolio entries", entries.len());

        let app = Self {
            i18n,
            entries,
            window: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            open_lightbox: None,
            notice,
        };
        (app, Task::batch(tasks))
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let galleries = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, view)| subscription::gallery_subscription(index, &view.gallery));

        Subscription::batch(
            std::iter::once(subscription::create_event_subscription()).chain(galleries),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Gallery(index, message) => self.update_gallery(index, message),
            Message::WindowResized(size) => {
                self.window = size;
                let width = gallery_width(size);
                let tasks = (0..self.entries.len())
                    .map(|index| {
                        self.update_gallery(
                            index,
                            gallery::Message::ViewportChanged { window: size, width },
                        )
                    })
                    .collect::<Vec<_>>();
                Task::batch(tasks)
            }
            Message::KeyPressed(key) => match self.open_lightbox {
                Some(index) if is_lightbox_key(&key) => self.update_gallery(
                    index,
                    gallery::Message::Lightbox(gallery::lightbox::Message::KeyPressed(key)),
                ),
                _ => Task::none(),
            },
        }
    }

    fn update_gallery(&mut self, index: usize, message: gallery::Message) -> Task<Message> {
        let Some(view) = self.entries.get_mut(index) else {
            return Task::none();
        };
        let (effect, task) = view.gallery.handle_message(message);

        match effect {
            gallery::Effect::None => {}
            gallery::Effect::HeightMeasured(height) => {
                log::debug!("entry '{}' measures {height:.0}px", view.entry.id);
            }
            gallery::Effect::LightboxOpened => {
                // Only one overlay at a time
                if let Some(previous) = self.open_lightbox.replace(index) {
                    if previous != index {
                        log::warn!("lightbox of entry {previous} was still open");
                    }
                }
            }
            gallery::Effect::LightboxClosed(height) => {
                if self.open_lightbox == Some(index) {
                    self.open_lightbox = None;
                }
                if let Some(height) = height {
                    log::debug!("entry '{}' measures {height:.0}px", view.entry.id);
                }
            }
        }

        task.map(move |message| Message::Gallery(index, message))
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut column = Column::new().spacing(spacing::LG).width(Length::Fill);

        if let Some(key) = &self.notice {
            column = column.push(
                container(text(self.i18n.tr(key)).size(typography::BODY))
                    .padding(CARD_PADDING)
                    .width(Length::Fill)
                    .style(styles::container::error_placeholder),
            );
        }

        if self.entries.is_empty() {
            column = column.push(
                container(text(self.i18n.tr("host-empty")).size(typography::BODY))
                    .center_x(Length::Fill),
            );
        }

        for (index, view) in self.entries.iter().enumerate() {
            column = column.push(self.card(index, view));
        }

        let page = scrollable(
            container(column.max_width(sizing::CONTENT_MAX_WIDTH))
                .center_x(Length::Fill)
                .padding(PAGE_PADDING),
        )
        .width(Length::Fill)
        .height(Length::Fill);

        let overlay = self.open_lightbox.and_then(|index| {
            self.entries.get(index).and_then(|view| {
                view.gallery
                    .view_lightbox(&self.i18n)
                    .map(|element| element.map(move |message| Message::Gallery(index, message)))
            })
        });

        // The page stays the first layer either way so its scroll offset
        // survives opening the overlay. The overlay covers the window and
        // captures every wheel tick, which keeps the page still.
        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(page);
        if let Some(overlay) = overlay {
            layers = layers.push(overlay);
        }
        layers.into()
    }

    fn card<'a>(&'a self, index: usize, view: &'a EntryView) -> Element<'a, Message> {
        let mut content = Column::new().spacing(spacing::SM);

        if view.gallery.is_empty() {
            if !view.entry.title.is_empty() {
                content = content.push(text(&view.entry.title).size(typography::TITLE_SM));
            }
            content = content.push(text(self.i18n.tr("host-entry-empty")).size(typography::BODY));
        } else {
            content = content.push(
                view.gallery
                    .view(&self.i18n)
                    .map(move |message| Message::Gallery(index, message)),
            );
        }

        if let Some(description) = &view.entry.description {
            content = content.push(text(description).size(typography::BODY));
        }

        container(content)
            .padding(CARD_PADDING)
            .width(Length::Fill)
            .style(styles::container::card)
            .into()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn gallery(&self, index: usize) -> Option<&gallery::State> {
        self.entries.get(index).map(|view| &view.gallery)
    }

    #[must_use]
    pub fn open_lightbox(&self) -> Option<usize> {
        self.open_lightbox
    }

    /// Whether page scrolling is currently suppressed by an open overlay.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.open_lightbox.is_some()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn window(&self) -> Size {
        self.window
    }
}

/// Keys the host forwards to an open lightbox.
#[must_use]
pub fn is_lightbox_key(key: &keyboard::Key) -> bool {
    matches!(
        key,
        keyboard::Key::Named(
            keyboard::key::Named::Escape
                | keyboard::key::Named::ArrowLeft
                | keyboard::key::Named::ArrowRight
        )
    )
}
