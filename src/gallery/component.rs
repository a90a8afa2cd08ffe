// SPDX-License-Identifier: MPL-2.0
//! Gallery orchestrator.
//!
//! Owns the selection, loading, swipe, thumbnail and lightbox
//! sub-components and turns their effects into tasks. Every selection change
//! goes through [`State::selection_changed`], which resets loading, issues
//! the probe, warms the neighbours and reveals the active thumbnail.

use crate::error::Error;
use crate::gallery::layout::{self, Arrangement, ThumbnailContainer};
use crate::gallery::lightbox;
use crate::gallery::loading::{self, ProbeOutcome, ProbeTicket};
use crate::gallery::selection::{Direction, Selection};
use crate::gallery::swipe::{SwipeOutcome, SwipeState};
use crate::gallery::thumbnails::ContainerScroll;
use crate::gallery::zoom::ZoomFactor;
use crate::gallery::{GalleryInput, GalleryOptions};
use crate::i18n::fluent::I18n;
use crate::media::{self, ImageData, ImageSource, Preloader, SharedWarmCache};
use iced::widget::image;
use iced::widget::scrollable::Viewport;
use iced::{time, Element, Point, Size, Subscription, Task};
use std::time::{Duration, Instant};

/// Frame interval for spinner and scroll animations.
const ANIMATION_TICK: Duration = Duration::from_millis(16);

/// Window size assumed until the host reports the real one.
const INITIAL_WINDOW: Size = Size::new(1280.0, 800.0);

/// Messages handled by the gallery.
#[derive(Debug, Clone)]
pub enum Message {
    /// Replace the images (e.g. the content provider switched entries).
    SetInput(GalleryInput),
    /// Window size and the width available to this gallery changed.
    ViewportChanged { window: Size, width: f32 },
    Next,
    Previous,
    /// Thumbnail activated.
    Select(usize),
    ProbeFinished {
        ticket: ProbeTicket,
        result: Result<ImageData, Error>,
    },
    FrameCursorMoved(Point),
    FramePressed,
    FrameReleased,
    FrameExited,
    ThumbnailsScrolled(ThumbnailContainer, Viewport),
    Tick(Instant),
    OpenLightbox,
    Lightbox(lightbox::Message),
}

/// Effects reported to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Advisory: the gallery's rendered height changed.
    HeightMeasured(f32),
    /// The lightbox opened; the host should lock page scrolling.
    LightboxOpened,
    /// The lightbox closed; page scrolling may resume. Carries the new
    /// height when new input closed it and also changed the measurement.
    LightboxClosed(Option<f32>),
}

/// Gallery state.
#[derive(Debug)]
pub struct State {
    input: GalleryInput,
    options: GalleryOptions,
    selection: Selection,
    loading: loading::State,
    lightbox: lightbox::State,
    swipe: SwipeState,
    containers: Vec<ContainerScroll>,
    preloader: Preloader,
    cache: SharedWarmCache,
    current_image: Option<ImageData>,
    window: Size,
    width: f32,
    last_height: Option<f32>,
}

impl State {
    /// Mounts a gallery: selects the first image, probes it and warms its
    /// neighbours.
    pub fn new(
        input: GalleryInput,
        options: GalleryOptions,
        cache: SharedWarmCache,
    ) -> (Self, Task<Message>) {
        let len = input.images.len();
        let mut state = Self {
            selection: Selection::new(len),
            loading: loading::State::default(),
            lightbox: lightbox::State::new(options.zoom_step),
            swipe: SwipeState::default(),
            containers: vec![
                ContainerScroll::new(ThumbnailContainer::InlineHorizontal),
                ContainerScroll::new(ThumbnailContainer::InlineVertical),
                ContainerScroll::new(ThumbnailContainer::Mobile),
            ],
            preloader: Preloader::new(cache.clone()).with_enabled(options.preload_neighbors),
            cache,
            current_image: None,
            window: INITIAL_WINDOW,
            width: INITIAL_WINDOW.width,
            last_height: None,
            input,
            options,
        };
        let task = state.mount();
        (state, task)
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::SetInput(input) => {
                let was_open = self.lightbox.is_open();
                self.input = input;
                self.selection.reset(self.input.images.len());
                self.lightbox = lightbox::State::new(self.options.zoom_step);
                self.swipe = SwipeState::default();
                let resets = Task::batch(
                    self.containers
                        .iter_mut()
                        .map(ContainerScroll::reset::<Message>)
                        .collect::<Vec<_>>(),
                );
                let mount = self.mount();

                let effect = match (was_open, self.height_effect()) {
                    (true, Effect::HeightMeasured(height)) => Effect::LightboxClosed(Some(height)),
                    (true, _) => Effect::LightboxClosed(None),
                    (false, height) => height,
                };
                (effect, Task::batch([resets, mount]))
            }
            Message::ViewportChanged { window, width } => {
                self.window = window;
                self.width = width;
                (self.height_effect(), Task::none())
            }
            Message::Next => self.navigate(Direction::Next),
            Message::Previous => self.navigate(Direction::Previous),
            Message::Select(index) => {
                let task = if self.selection.select(index).is_some() {
                    self.selection_changed()
                } else {
                    Task::none()
                };
                (Effect::None, task)
            }
            Message::ProbeFinished { ticket, result } => {
                self.probe_finished(ticket, result);
                (Effect::None, Task::none())
            }
            Message::FrameCursorMoved(position) => {
                self.swipe.cursor_moved(position);
                (Effect::None, Task::none())
            }
            Message::FramePressed => {
                if self.selection.len() > 1 {
                    self.swipe.press();
                }
                (Effect::None, Task::none())
            }
            Message::FrameReleased => self.finish_swipe(),
            Message::FrameExited => {
                // Leaving the frame ends the drag just like a release
                let result = self.finish_swipe();
                self.swipe.cursor_left();
                result
            }
            Message::ThumbnailsScrolled(kind, viewport) => {
                if let Some(container) = self.container_mut(kind) {
                    container.scrolled(viewport);
                }
                (Effect::None, Task::none())
            }
            Message::Tick(now) => {
                self.loading.handle(loading::Message::SpinnerTick);
                let tasks: Vec<Task<Message>> = self
                    .containers
                    .iter_mut()
                    .filter_map(|container| container.tick(now))
                    .collect();
                (Effect::None, Task::batch(tasks))
            }
            Message::OpenLightbox => self.handle_lightbox(lightbox::Message::Open),
            Message::Lightbox(msg) => self.handle_lightbox(msg),
        }
    }

    fn handle_lightbox(&mut self, msg: lightbox::Message) -> (Effect, Task<Message>) {
        if self.selection.is_empty() {
            return (Effect::None, Task::none());
        }
        match self.lightbox.handle(msg) {
            lightbox::Effect::None | lightbox::Effect::ZoomChanged(_) => {
                (Effect::None, Task::none())
            }
            lightbox::Effect::Opened => {
                self.swipe.cancel();
                (Effect::LightboxOpened, Task::none())
            }
            lightbox::Effect::Closed => (Effect::LightboxClosed(None), Task::none()),
            lightbox::Effect::Navigate(direction) => self.navigate(direction),
        }
    }

    fn navigate(&mut self, direction: Direction) -> (Effect, Task<Message>) {
        let task = if self.selection.step(direction).is_some() {
            self.selection_changed()
        } else {
            Task::none()
        };
        (Effect::None, task)
    }

    fn finish_swipe(&mut self) -> (Effect, Task<Message>) {
        match self.swipe.release(self.options.swipe_threshold_px) {
            Some(SwipeOutcome::Navigate(direction)) => self.navigate(direction),
            Some(SwipeOutcome::SnapBack) | None => (Effect::None, Task::none()),
        }
    }

    /// Mount-time work: the same as a selection change, for index 0.
    fn mount(&mut self) -> Task<Message> {
        self.loading.clear();
        self.current_image = None;
        if self.selection.is_empty() {
            return Task::none();
        }
        self.selection_changed()
    }

    /// Resets loading, probes the new image, warms neighbours and reveals
    /// the active thumbnail.
    fn selection_changed(&mut self) -> Task<Message> {
        let index = self.selection.index();
        let Some(source) = self.input.images.get(index).cloned() else {
            return Task::none();
        };

        let ticket = self.loading.begin(index);
        self.current_image = None;
        self.lightbox.reset_pan();
        self.swipe.cancel();
        self.preloader.preload_neighbors(&self.input.images, index);
        self.reveal_active_thumbnail(Instant::now());

        probe(source, self.cache.clone(), ticket)
    }

    fn reveal_active_thumbnail(&mut self, now: Instant) {
        let len = self.selection.len();
        if len <= 1 {
            return;
        }
        let index = self.selection.index();
        let active = self.arrangement().thumbnail_container();
        let budget = active.viewport_extent(self.width, self.frame_height());
        if let Some(container) = self.container_mut(active) {
            container.reveal(index, len, budget, now);
        }
    }

    fn probe_finished(&mut self, ticket: ProbeTicket, result: Result<ImageData, Error>) {
        let (outcome, image) = match result {
            Ok(image) => (
                ProbeOutcome::Loaded(Size::new(image.width, image.height)),
                Some(image),
            ),
            Err(err) => (ProbeOutcome::Failed(err), None),
        };

        match self
            .loading
            .handle(loading::Message::Finished { ticket, outcome })
        {
            loading::Effect::Loaded => self.current_image = image,
            loading::Effect::Failed(reason) => {
                log::warn!(
                    "failed to load {}: {reason}",
                    self.current_source()
                        .map_or_else(String::new, ToString::to_string)
                );
            }
            loading::Effect::Stale => {
                log::debug!("dropping stale probe result for index {}", ticket.index);
            }
            loading::Effect::None => {}
        }
    }

    fn height_effect(&mut self) -> Effect {
        let height = layout::gallery_height(
            self.arrangement(),
            self.window,
            self.selection.len(),
            self.input.title.is_some(),
        );
        if self
            .last_height
            .is_some_and(|last| (last - height).abs() < 0.5)
        {
            return Effect::None;
        }
        self.last_height = Some(height);
        Effect::HeightMeasured(height)
    }

    fn container_mut(&mut self, kind: ThumbnailContainer) -> Option<&mut ContainerScroll> {
        self.containers.iter_mut().find(|c| c.kind() == kind)
    }

    /// Spinner and scroll animation ticks, only while something moves.
    pub fn subscription(&self) -> Subscription<Message> {
        let animating = self.containers.iter().any(ContainerScroll::is_animating);
        if self.loading.is_loading() || animating {
            time::every(ANIMATION_TICK).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        crate::ui::inline::view(self, i18n)
    }

    /// Full-window overlay, when open. The host stacks it over everything.
    pub fn view_lightbox<'a>(&'a self, i18n: &'a I18n) -> Option<Element<'a, Message>> {
        if self.lightbox.is_open() && !self.selection.is_empty() {
            Some(crate::ui::lightbox::view(self, i18n))
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Read accessors used by the views and the host
    // ------------------------------------------------------------------

    #[must_use]
    pub fn input(&self) -> &GalleryInput {
        &self.input
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    #[must_use]
    pub fn current_source(&self) -> Option<&ImageSource> {
        self.input.images.get(self.selection.index())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.loading.has_error()
    }

    /// i18n key of the reason the current image failed.
    #[must_use]
    pub fn failure_key(&self) -> Option<&'static str> {
        self.loading.failure_key()
    }

    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.loading.spinner_rotation()
    }

    #[must_use]
    pub fn current_ticket(&self) -> Option<ProbeTicket> {
        self.loading.current_ticket()
    }

    /// Natural size of the current image once loaded.
    #[must_use]
    pub fn natural_size(&self) -> Option<Size<u32>> {
        self.loading.natural_size()
    }

    #[must_use]
    pub fn current_handle(&self) -> Option<&image::Handle> {
        self.current_image.as_ref().map(|image| &image.handle)
    }

    /// Handle for thumbnail `index`: local files load lazily from disk,
    /// remote images show once they are warm.
    #[must_use]
    pub fn thumbnail_handle(&self, index: usize) -> Option<image::Handle> {
        let source = self.input.images.get(index)?;
        match source {
            ImageSource::Local(path) => Some(image::Handle::from_path(path)),
            ImageSource::Remote(_) => media::prefetch::lock(&self.cache)
                .peek(source)
                .map(|image| image.handle),
        }
    }

    #[must_use]
    pub fn is_lightbox_open(&self) -> bool {
        self.lightbox.is_open()
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomFactor {
        self.lightbox.zoom()
    }

    #[must_use]
    pub fn pan(&self) -> iced::Vector {
        self.lightbox.pan()
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.lightbox.is_panning()
    }

    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.swipe.is_dragging()
    }

    /// Horizontal offset of the main frame while a swipe is in progress.
    #[must_use]
    pub fn swipe_offset(&self) -> f32 {
        self.swipe.visual_offset()
    }

    /// Indices targeted by the latest neighbour preload.
    #[must_use]
    pub fn preload_targets(&self) -> &[usize] {
        self.preloader.last_targets()
    }

    #[must_use]
    pub fn arrangement(&self) -> Arrangement {
        Arrangement::resolve(self.input.layout, self.window.width)
    }

    #[must_use]
    pub fn frame_height(&self) -> f32 {
        self.arrangement().frame_height(self.window)
    }

    #[must_use]
    pub fn container(&self, kind: ThumbnailContainer) -> Option<&ContainerScroll> {
        self.containers.iter().find(|c| c.kind() == kind)
    }
}

fn probe(source: ImageSource, cache: SharedWarmCache, ticket: ProbeTicket) -> Task<Message> {
    Task::perform(media::probe_image(source, cache), move |result| {
        Message::ProbeFinished { ticket, result }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::Layout;
    use crate::media::{WarmCache, WarmCacheConfig};
    use std::path::PathBuf;

    fn sources(names: &[&str]) -> Vec<ImageSource> {
        names
            .iter()
            .map(|name| ImageSource::Local(PathBuf::from(name)))
            .collect()
    }

    fn gallery(names: &[&str]) -> State {
        let cache = WarmCache::shared(WarmCacheConfig::default());
        let (state, _task) = State::new(
            GalleryInput::new(sources(names)),
            GalleryOptions::default(),
            cache,
        );
        state
    }

    fn sorted(targets: &[usize]) -> Vec<usize> {
        let mut targets = targets.to_vec();
        targets.sort_unstable();
        targets
    }

    fn finish(state: &mut State, result: Result<ImageData, Error>) {
        let ticket = state.current_ticket().expect("probe in flight");
        state.handle_message(Message::ProbeFinished { ticket, result });
    }

    fn pixel() -> ImageData {
        ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn mount_starts_loading_and_preloads() {
        let state = gallery(&["a.png", "b.png", "c.png"]);
        assert_eq!(state.selected_index(), 0);
        assert!(state.is_loading());
        assert!(!state.has_error());
        assert_eq!(sorted(state.preload_targets()), vec![1, 2]);
    }

    #[test]
    fn end_to_end_navigation_wraps_and_preloads_neighbors() {
        let mut state = gallery(&["a.png", "b.png", "c.png"]);

        state.handle_message(Message::Next);
        state.handle_message(Message::Next);
        assert_eq!(state.selected_index(), 2);
        assert_eq!(sorted(state.preload_targets()), vec![0, 1]);

        state.handle_message(Message::Next);
        assert_eq!(state.selected_index(), 0);
        assert_eq!(sorted(state.preload_targets()), vec![1, 2]);
    }

    #[test]
    fn every_change_resets_loading() {
        let mut state = gallery(&["a.png", "b.png", "c.png"]);
        finish(&mut state, Err(Error::Io("missing".into())));
        assert!(state.has_error());
        assert!(!state.is_loading());

        state.handle_message(Message::Previous);
        assert!(state.is_loading());
        assert!(!state.has_error());

        state.handle_message(Message::Select(1));
        assert!(state.is_loading());
        assert!(!state.has_error());
    }

    #[test]
    fn stale_probe_does_not_touch_new_image() {
        let mut state = gallery(&["a.png", "b.png"]);
        let first = state.current_ticket().expect("mount probe");

        state.handle_message(Message::Next);
        state.handle_message(Message::ProbeFinished {
            ticket: first,
            result: Err(Error::Io("late".into())),
        });

        assert_eq!(state.selected_index(), 1);
        assert!(state.is_loading());
        assert!(!state.has_error());
    }

    #[test]
    fn successful_probe_records_image() {
        let mut state = gallery(&["a.png", "b.png"]);
        finish(&mut state, Ok(ImageData::from_rgba(2, 3, vec![0; 24])));
        assert!(!state.is_loading());
        assert!(state.current_handle().is_some());
        assert_eq!(state.natural_size(), Some(Size::new(2, 3)));
    }

    #[test]
    fn single_image_never_navigates_or_preloads() {
        let mut state = gallery(&["only.png"]);
        assert!(state.preload_targets().is_empty());

        state.handle_message(Message::Next);
        state.handle_message(Message::Previous);
        state.handle_message(Message::FrameCursorMoved(Point::new(0.0, 0.0)));
        state.handle_message(Message::FramePressed);
        state.handle_message(Message::FrameCursorMoved(Point::new(-200.0, 0.0)));
        state.handle_message(Message::FrameReleased);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn empty_gallery_is_inert() {
        let mut state = gallery(&[]);
        assert!(state.is_empty());
        assert!(!state.is_loading());
        assert!(state.current_ticket().is_none());

        state.handle_message(Message::Next);
        state.handle_message(Message::Select(3));
        let (effect, _) = state.handle_message(Message::OpenLightbox);
        assert_eq!(effect, Effect::None);
        assert!(!state.is_lightbox_open());
        assert!(state.current_ticket().is_none());
    }

    #[test]
    fn select_clamps_to_last() {
        let mut state = gallery(&["a.png", "b.png", "c.png"]);
        state.handle_message(Message::Select(99));
        assert_eq!(state.selected_index(), 2);
    }

    fn swipe(state: &mut State, dx: f32) {
        state.handle_message(Message::FrameCursorMoved(Point::new(300.0, 100.0)));
        state.handle_message(Message::FramePressed);
        state.handle_message(Message::FrameCursorMoved(Point::new(300.0 + dx, 110.0)));
        state.handle_message(Message::FrameReleased);
    }

    #[test]
    fn swipe_threshold_is_strict() {
        let mut state = gallery(&["a.png", "b.png", "c.png"]);
        swipe(&mut state, -79.0);
        assert_eq!(state.selected_index(), 0);
        swipe(&mut state, 79.0);
        assert_eq!(state.selected_index(), 0);

        swipe(&mut state, -81.0);
        assert_eq!(state.selected_index(), 1);
        swipe(&mut state, 81.0);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn leaving_frame_finishes_swipe() {
        let mut state = gallery(&["a.png", "b.png", "c.png"]);
        state.handle_message(Message::FrameCursorMoved(Point::new(300.0, 100.0)));
        state.handle_message(Message::FramePressed);
        state.handle_message(Message::FrameCursorMoved(Point::new(150.0, 100.0)));
        state.handle_message(Message::FrameExited);
        assert_eq!(state.selected_index(), 1);
        assert_eq!(state.swipe_offset(), 0.0);
    }

    #[test]
    fn lightbox_shares_selection_and_resets_on_reopen() {
        let mut state = gallery(&["a.png", "b.png", "c.png"]);
        let (effect, _) = state.handle_message(Message::OpenLightbox);
        assert_eq!(effect, Effect::LightboxOpened);

        state.handle_message(Message::Lightbox(lightbox::Message::ZoomIn));
        state.handle_message(Message::Lightbox(lightbox::Message::KeyPressed(
            iced::keyboard::Key::Named(iced::keyboard::key::Named::ArrowRight),
        )));
        assert_eq!(state.selected_index(), 1);
        assert!(state.is_loading());
        assert!(state.zoom().is_zoomed());

        let (effect, _) = state.handle_message(Message::Lightbox(lightbox::Message::Close));
        assert_eq!(effect, Effect::LightboxClosed(None));

        state.handle_message(Message::OpenLightbox);
        assert_eq!(state.zoom(), ZoomFactor::default());
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn set_input_resets_everything() {
        let mut state = gallery(&["a.png", "b.png", "c.png"]);
        state.handle_message(Message::Next);
        state.handle_message(Message::OpenLightbox);

        let (effect, _) = state.handle_message(Message::SetInput(
            GalleryInput::new(sources(&["x.png", "y.png"])).with_layout(Layout::Horizontal),
        ));
        assert!(matches!(effect, Effect::LightboxClosed(Some(h)) if h > 0.0));
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.len(), 2);
        assert!(!state.is_lightbox_open());
        assert!(state.is_loading());
        assert_eq!(state.preload_targets(), &[1]);
    }

    #[test]
    fn new_input_with_open_lightbox_still_reports_height() {
        let mut state = gallery(&["a.png", "b.png", "c.png"]);
        let window = Size::new(1400.0, 1000.0);
        let (effect, _) = state.handle_message(Message::ViewportChanged {
            window,
            width: 900.0,
        });
        let Effect::HeightMeasured(before) = effect else {
            panic!("expected a first measurement, got {effect:?}");
        };
        state.handle_message(Message::OpenLightbox);

        let (effect, _) = state.handle_message(Message::SetInput(
            GalleryInput::new(sources(&["x.png"])).with_title("Solo"),
        ));
        let Effect::LightboxClosed(Some(after)) = effect else {
            panic!("expected close with a new height, got {effect:?}");
        };
        assert!((after - before).abs() >= 0.5);

        // Already reported, so the same viewport is quiet
        let (effect, _) = state.handle_message(Message::ViewportChanged {
            window,
            width: 900.0,
        });
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn height_is_reported_once_per_change() {
        let mut state = gallery(&["a.png", "b.png"]);
        let window = Size::new(1400.0, 1000.0);

        let (effect, _) = state.handle_message(Message::ViewportChanged {
            window,
            width: 900.0,
        });
        assert!(matches!(effect, Effect::HeightMeasured(h) if h > 0.0));

        let (effect, _) = state.handle_message(Message::ViewportChanged {
            window,
            width: 900.0,
        });
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn far_thumbnail_starts_scroll_animation() {
        let names: Vec<String> = (0..20).map(|i| format!("{i}.png")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = gallery(&refs);
        state.handle_message(Message::ViewportChanged {
            window: Size::new(1400.0, 900.0),
            width: 800.0,
        });

        state.handle_message(Message::Select(15));
        let container = state
            .container(ThumbnailContainer::InlineVertical)
            .expect("vertical container");
        assert!(container.is_animating());
        assert!(!state
            .container(ThumbnailContainer::Mobile)
            .expect("mobile container")
            .is_animating());
    }
}
