// SPDX-License-Identifier: MPL-2.0
use folio_gallery::app::{App, Flags};
use folio_gallery::config::{self, Config, CONFIG_LOAD_ERROR_KEY};
use folio_gallery::gallery::{self, GalleryInput, GalleryOptions, Layout, Message};
use folio_gallery::i18n::fluent::I18n;
use folio_gallery::manifest::Manifest;
use folio_gallery::media::{self, ImageSource, WarmCache, WarmCacheConfig};
use image_rs::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([30, 120, 200, 255]))
        .save(&path)
        .expect("failed to write fixture png");
    path
}

/// Runs the probe the gallery asked for and feeds the result back.
async fn finish_probe(state: &mut gallery::State) {
    let ticket = state.current_ticket().expect("a probe is pending");
    let source = state.current_source().cloned().expect("selected source");
    let cache = WarmCache::shared(WarmCacheConfig::disabled());
    let result = media::probe_image(source, cache).await;
    let _ = state.handle_message(Message::ProbeFinished { ticket, result });
}

#[tokio::test]
async fn navigating_three_images_loads_each_and_wraps() {
    let dir = tempdir().expect("temp dir");
    let images = vec![
        ImageSource::Local(write_png(dir.path(), "a.png", 40, 30)),
        ImageSource::Local(write_png(dir.path(), "b.png", 20, 60)),
        ImageSource::Local(write_png(dir.path(), "c.png", 10, 10)),
    ];
    let cache = WarmCache::shared(WarmCacheConfig::default());
    let (mut state, _) = gallery::State::new(
        GalleryInput::new(images).with_title("Atlas"),
        GalleryOptions::default(),
        cache,
    );

    assert!(state.is_loading());
    assert_eq!(state.preload_targets(), &[1, 2]);
    finish_probe(&mut state).await;
    assert!(!state.is_loading());
    assert_eq!(state.natural_size(), Some(iced::Size::new(40, 30)));

    let _ = state.handle_message(Message::Next);
    assert_eq!(state.selected_index(), 1);
    assert!(state.is_loading());
    assert_eq!(state.natural_size(), None);
    finish_probe(&mut state).await;
    assert_eq!(state.natural_size(), Some(iced::Size::new(20, 60)));

    let _ = state.handle_message(Message::Previous);
    let _ = state.handle_message(Message::Previous);
    assert_eq!(state.selected_index(), 2);
    assert_eq!(state.preload_targets(), &[0, 1]);
}

#[tokio::test]
async fn broken_image_shows_error_until_selection_moves() {
    let dir = tempdir().expect("temp dir");
    let broken = dir.path().join("broken.png");
    fs::write(&broken, b"not an image").expect("write broken file");
    let images = vec![
        ImageSource::Local(broken),
        ImageSource::Local(write_png(dir.path(), "ok.png", 8, 8)),
    ];
    let (mut state, _) = gallery::State::new(
        GalleryInput::new(images),
        GalleryOptions::default(),
        WarmCache::shared(WarmCacheConfig::disabled()),
    );

    finish_probe(&mut state).await;
    assert!(state.has_error());
    assert_eq!(state.failure_key(), Some("gallery-load-failed"));
    assert!(!state.is_loading());

    let _ = state.handle_message(Message::Select(1));
    assert!(!state.has_error());
    assert!(state.is_loading());
    finish_probe(&mut state).await;
    assert_eq!(state.natural_size(), Some(iced::Size::new(8, 8)));
}

#[tokio::test]
async fn late_probe_for_previous_image_is_dropped() {
    let dir = tempdir().expect("temp dir");
    let images = vec![
        ImageSource::Local(write_png(dir.path(), "a.png", 40, 30)),
        ImageSource::Local(write_png(dir.path(), "b.png", 20, 60)),
    ];
    let (mut state, _) = gallery::State::new(
        GalleryInput::new(images.clone()),
        GalleryOptions::default(),
        WarmCache::shared(WarmCacheConfig::disabled()),
    );
    let stale_ticket = state.current_ticket().expect("first probe");

    let _ = state.handle_message(Message::Next);
    let cache = WarmCache::shared(WarmCacheConfig::disabled());
    let result = media::probe_image(images[0].clone(), cache).await;
    let _ = state.handle_message(Message::ProbeFinished {
        ticket: stale_ticket,
        result,
    });

    assert!(state.is_loading());
    assert_eq!(state.natural_size(), None);
}

#[test]
fn manifest_entries_become_galleries() {
    let dir = tempdir().expect("temp dir");
    write_png(dir.path(), "one.png", 4, 4);
    write_png(dir.path(), "two.png", 4, 4);
    let manifest_path = dir.path().join("portfolio.toml");
    fs::write(
        &manifest_path,
        r#"
[[entries]]
id = "atlas"
title = "Atlas"
description = "Dashboard"
layout = "horizontal"
images = ["one.png", "two.png"]

[[entries]]
id = "draft"
title = "Draft"
"#,
    )
    .expect("write manifest");

    let manifest = Manifest::load(&manifest_path).expect("manifest loads");
    assert_eq!(manifest.entries.len(), 2);

    let flags = Flags {
        lang: Some("en-US".to_string()),
        manifest: Some(manifest_path),
        images: vec![dir.path().join("one.png").display().to_string()],
        ..Flags::default()
    };
    let (app, _) = App::with_config(flags, &Config::default(), None);

    assert_eq!(app.entry_count(), 3);
    let atlas = app.gallery(0).expect("atlas");
    assert_eq!(atlas.len(), 2);
    assert_eq!(atlas.input().layout, Layout::Horizontal);
    assert!(app.gallery(1).expect("draft").is_empty());
    assert_eq!(app.gallery(2).expect("loose images").len(), 1);
    assert_eq!(app.notice(), None);
}

#[test]
fn settings_round_trip_and_bad_file_falls_back() {
    let dir = tempdir().expect("temp dir");
    let mut settings = Config::default();
    settings.general.language = Some("ko".to_string());
    settings.gallery.layout = Some(Layout::Horizontal);
    settings.lightbox.zoom_step = Some(0.25);

    let content = toml::to_string_pretty(&settings).expect("serialize settings");
    fs::write(dir.path().join("settings.toml"), content).expect("write settings");
    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(warning, None);
    assert_eq!(loaded.default_layout(), Layout::Horizontal);

    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "ko");

    fs::write(dir.path().join("settings.toml"), "[gallery\nlayout =").expect("corrupt");
    let (fallback, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(fallback, Config::default());
    assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_ERROR_KEY));
}
