// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for gallery navigation.
//!
//! Measures:
//! - Stepping the wrap-around selection
//! - Computing the thumbnail scroll target for a far selection
//! - A full `Next` through the gallery orchestrator (no runtime, so neighbour
//!   warming is skipped)

use criterion::{criterion_group, criterion_main, Criterion};
use folio_gallery::gallery::layout::ThumbnailContainer;
use folio_gallery::gallery::thumbnails::{content_extent, scroll_target};
use folio_gallery::gallery::{self, Direction, GalleryInput, GalleryOptions, Message, Selection};
use folio_gallery::media::{ImageSource, WarmCache, WarmCacheConfig};
use std::hint::black_box;
use std::path::PathBuf;

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");

    group.bench_function("selection_step_wrap", |b| {
        let mut selection = Selection::new(12);
        b.iter(|| {
            black_box(selection.step(black_box(Direction::Next)));
        });
    });

    group.bench_function("thumbnail_scroll_target", |b| {
        let metrics = ThumbnailContainer::InlineHorizontal.metrics();
        let len = 200;
        let extent = 900.0;
        b.iter(|| {
            let far = black_box(len - 1);
            black_box(scroll_target(&metrics, far, len, 0.0, extent));
            black_box(content_extent(&metrics, len));
        });
    });

    group.finish();
}

fn bench_orchestrator(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");

    let images = (0..50)
        .map(|i| ImageSource::Local(PathBuf::from(format!("/nonexistent/{i}.png"))))
        .collect::<Vec<_>>();
    let cache = WarmCache::shared(WarmCacheConfig::disabled());
    let (mut state, _) = gallery::State::new(
        GalleryInput::new(images),
        GalleryOptions::default(),
        cache,
    );

    group.bench_function("orchestrator_next", |b| {
        b.iter(|| {
            let (effect, task) = state.handle_message(Message::Next);
            black_box((effect, task));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_selection, bench_orchestrator);
criterion_main!(benches);
