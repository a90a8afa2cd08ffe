// SPDX-License-Identifier: MPL-2.0
//! Neighbour preloading and the warm image cache.
//!
//! When the selection moves, the images right before and after it are
//! fetched and decoded in the background so the next navigation can be
//! served from memory.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used images are evicted first
//! - **Memory-bounded**: Total cache size limited by a byte budget
//! - **Source-keyed**: Images indexed by their [`ImageSource`]
//! - **Detached**: Warm-ups are spawned and never awaited; outcomes only
//!   affect the cache
//!
//! # Usage
//!
//! ```ignore
//! let cache = WarmCache::shared(WarmCacheConfig::default());
//! let mut preloader = Preloader::new(cache.clone());
//!
//! // After each selection change
//! preloader.preload_neighbors(&images, selected);
//! ```

use crate::config::{DEFAULT_CACHE_MAX_IMAGES, DEFAULT_CACHE_MAX_MB};
use crate::media::{load_image, ImageData, ImageSource};
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Configuration for the warm cache.
#[derive(Debug, Clone, Copy)]
pub struct WarmCacheConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of images to cache.
    pub max_images: usize,

    /// Whether warming is enabled.
    pub enabled: bool,
}

impl Default for WarmCacheConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_CACHE_MAX_MB as usize * 1024 * 1024,
            max_images: DEFAULT_CACHE_MAX_IMAGES,
            enabled: true,
        }
    }
}

impl WarmCacheConfig {
    /// Creates a disabled configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Statistics about warm cache usage.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarmCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub insertions: u64,
}

/// LRU cache of decoded images keyed by source.
pub struct WarmCache {
    cache: LruCache<ImageSource, ImageData>,
    config: WarmCacheConfig,
    current_bytes: usize,
    stats: WarmCacheStats,
}

/// Warm cache shared between the UI thread and preload tasks.
pub type SharedWarmCache = Arc<Mutex<WarmCache>>;

impl WarmCache {
    #[must_use]
    pub fn new(config: WarmCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_images).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            config,
            current_bytes: 0,
            stats: WarmCacheStats::default(),
        }
    }

    /// Creates a cache wrapped for sharing with background tasks.
    #[must_use]
    pub fn shared(config: WarmCacheConfig) -> SharedWarmCache {
        Arc::new(Mutex::new(Self::new(config)))
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Inserts an image into the cache.
    ///
    /// Returns `true` if the image was inserted, `false` if caching is disabled
    /// or the image is too large.
    pub fn insert(&mut self, source: ImageSource, image: ImageData) -> bool {
        if !self.config.enabled {
            return false;
        }

        let image_size = image.size_bytes();

        // Anything over half the budget would evict most of the cache
        if image_size > self.config.max_bytes / 2 {
            return false;
        }

        if let Some(existing) = self.cache.pop(&source) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes());
        }

        while self.current_bytes + image_size > self.config.max_bytes && !self.cache.is_empty() {
            if let Some((_, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
                self.stats.evictions += 1;
            }
        }

        // `push` reports the entry displaced by the count limit
        if let Some((_, displaced)) = self.cache.push(source, image) {
            self.current_bytes = self.current_bytes.saturating_sub(displaced.size_bytes());
            self.stats.evictions += 1;
        }
        self.current_bytes += image_size;
        self.stats.insertions += 1;

        true
    }

    /// Gets an image from the cache, updating LRU order.
    ///
    /// The returned handle shares pixel storage with the cached one.
    pub fn get(&mut self, source: &ImageSource) -> Option<ImageData> {
        if !self.config.enabled {
            return None;
        }

        if let Some(image) = self.cache.get(source) {
            self.stats.hits += 1;
            Some(image.clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Reads an image without touching LRU order or statistics. Used while
    /// rendering, which happens far more often than navigation.
    #[must_use]
    pub fn peek(&self, source: &ImageSource) -> Option<ImageData> {
        if !self.config.enabled {
            return None;
        }
        self.cache.peek(source).cloned()
    }

    /// Checks whether a source is warm without updating LRU order.
    #[must_use]
    pub fn contains(&self, source: &ImageSource) -> bool {
        self.config.enabled && self.cache.contains(source)
    }

    #[must_use]
    pub fn stats(&self) -> WarmCacheStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the current memory usage in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }
}

impl std::fmt::Debug for WarmCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarmCache")
            .field("enabled", &self.config.enabled)
            .field("image_count", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_images", &self.config.max_images)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Locks the shared cache, recovering from a poisoned lock.
pub fn lock(cache: &SharedWarmCache) -> MutexGuard<'_, WarmCache> {
    cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Looks up a source in the shared cache.
pub fn cached(cache: &SharedWarmCache, source: &ImageSource) -> Option<ImageData> {
    lock(cache).get(source)
}

/// Returns the wrap-around neighbour indices of `selected` in a list of `len`
/// items, next first. Empty when there is nothing to preload.
#[must_use]
pub fn neighbor_indices(len: usize, selected: usize) -> Vec<usize> {
    if len <= 1 {
        return Vec::new();
    }
    let next = (selected + 1) % len;
    let previous = (selected + len - 1) % len;
    if next == previous {
        vec![next]
    } else {
        vec![next, previous]
    }
}

/// Issues best-effort background loads for neighbour images.
#[derive(Debug, Clone)]
pub struct Preloader {
    cache: SharedWarmCache,
    in_flight: Arc<Mutex<HashSet<ImageSource>>>,
    enabled: bool,
    last_targets: Vec<usize>,
}

impl Preloader {
    #[must_use]
    pub fn new(cache: SharedWarmCache) -> Self {
        Self {
            cache,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            enabled: true,
            last_targets: Vec::new(),
        }
    }

    /// Enables or disables neighbour warming.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Indices requested by the most recent [`Self::preload_neighbors`] call.
    #[must_use]
    pub fn last_targets(&self) -> &[usize] {
        &self.last_targets
    }

    /// Requests the next and previous neighbours of `selected`.
    ///
    /// Returns the targeted indices. Sources that are already warm or
    /// already being fetched are not requested again.
    pub fn preload_neighbors(&mut self, images: &[ImageSource], selected: usize) -> &[usize] {
        self.last_targets = if self.enabled {
            neighbor_indices(images.len(), selected)
        } else {
            Vec::new()
        };

        for &index in &self.last_targets {
            if let Some(source) = images.get(index) {
                self.warm(source.clone());
            }
        }

        &self.last_targets
    }

    fn warm(&self, source: ImageSource) {
        if lock(&self.cache).contains(&source) {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::debug!("no async runtime, skipping preload of {source}");
            return;
        };

        {
            let mut in_flight = self
                .in_flight
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if !in_flight.insert(source.clone()) {
                return;
            }
        }

        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);
        drop(runtime.spawn(async move {
            match load_image(source.clone()).await {
                Ok(image) => {
                    let mut cache = lock(&cache);
                    cache.insert(source.clone(), image);
                    log::debug!("preloaded {source}: {:?}", cache.stats());
                }
                Err(err) => log::debug!("preload of {source} failed: {err}"),
            }
            in_flight
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .remove(&source);
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn create_test_image(width: u32, height: u32) -> ImageData {
        let pixels = vec![0u8; (width * height * 4) as usize];
        ImageData::from_rgba(width, height, pixels)
    }

    fn local(name: &str) -> ImageSource {
        ImageSource::Local(PathBuf::from(name))
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = WarmCache::new(WarmCacheConfig::default());
        assert!(cache.is_empty());
        assert_eq!(cache.memory_usage(), 0);
    }

    #[test]
    fn insert_and_get_image() {
        let mut cache = WarmCache::new(WarmCacheConfig::default());
        assert!(cache.insert(local("/test/a.png"), create_test_image(100, 100)));

        let retrieved = cache.get(&local("/test/a.png")).expect("cached image");
        assert_eq!(retrieved.width, 100);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn disabled_cache_returns_none() {
        let mut cache = WarmCache::new(WarmCacheConfig::disabled());
        assert!(!cache.insert(local("/test/a.png"), create_test_image(10, 10)));
        assert!(cache.get(&local("/test/a.png")).is_none());
    }

    #[test]
    fn lru_eviction_on_byte_limit() {
        let mut cache = WarmCache::new(WarmCacheConfig {
            max_bytes: 25_000,
            max_images: 100,
            enabled: true,
        });

        // 50x50 RGBA = 10,000 bytes each
        cache.insert(local("a"), create_test_image(50, 50));
        cache.insert(local("b"), create_test_image(50, 50));
        cache.insert(local("c"), create_test_image(50, 50));

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&local("a")));
        assert!(cache.contains(&local("c")));
        assert_eq!(cache.memory_usage(), 20_000);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn count_limit_keeps_byte_accounting_exact() {
        let mut cache = WarmCache::new(WarmCacheConfig {
            max_bytes: 10_000_000,
            max_images: 2,
            enabled: true,
        });

        cache.insert(local("a"), create_test_image(10, 10));
        cache.insert(local("b"), create_test_image(10, 10));
        cache.insert(local("c"), create_test_image(10, 10));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.memory_usage(), 800);
    }

    #[test]
    fn oversized_image_is_rejected() {
        let mut cache = WarmCache::new(WarmCacheConfig {
            max_bytes: 1_000,
            max_images: 4,
            enabled: true,
        });
        assert!(!cache.insert(local("big"), create_test_image(20, 20)));
    }

    #[test]
    fn reinserting_same_source_replaces_entry() {
        let mut cache = WarmCache::new(WarmCacheConfig::default());
        cache.insert(local("a"), create_test_image(10, 10));
        cache.insert(local("a"), create_test_image(20, 20));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.memory_usage(), 1_600);
    }

    #[test]
    fn peek_leaves_order_and_stats_alone() {
        let mut cache = WarmCache::new(WarmCacheConfig {
            max_bytes: 10_000_000,
            max_images: 2,
            enabled: true,
        });
        cache.insert(local("a"), create_test_image(10, 10));
        cache.insert(local("b"), create_test_image(10, 10));

        for _ in 0..3 {
            assert!(cache.peek(&local("a")).is_some());
        }
        assert!(cache.peek(&local("missing")).is_none());
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (0, 0));

        // "a" is still least recently used, so it goes first
        cache.insert(local("c"), create_test_image(10, 10));
        assert!(!cache.contains(&local("a")));
        assert!(cache.contains(&local("b")));
    }

    #[test]
    fn neighbor_indices_wrap_around() {
        assert_eq!(neighbor_indices(3, 0), vec![1, 2]);
        assert_eq!(neighbor_indices(3, 2), vec![0, 1]);
        assert_eq!(neighbor_indices(2, 0), vec![1]);
        assert!(neighbor_indices(1, 0).is_empty());
        assert!(neighbor_indices(0, 0).is_empty());
    }

    #[test]
    fn preloader_without_runtime_still_reports_targets() {
        let mut preloader = Preloader::new(WarmCache::shared(WarmCacheConfig::default()));
        let images = vec![local("a.png"), local("b.png"), local("c.png")];

        let targets = preloader.preload_neighbors(&images, 2).to_vec();
        assert_eq!(targets, vec![0, 1]);
    }

    #[test]
    fn disabled_preloader_targets_nothing() {
        let mut preloader =
            Preloader::new(WarmCache::shared(WarmCacheConfig::default())).with_enabled(false);
        let images = vec![local("a.png"), local("b.png")];
        assert!(preloader.preload_neighbors(&images, 0).is_empty());
    }

    #[tokio::test]
    async fn preloader_warms_cache_in_background() {
        use image_rs::{Rgba, RgbaImage};

        let temp_dir = tempfile::tempdir().expect("temp dir");
        let mut images = Vec::new();
        for name in ["a.png", "b.png", "c.png"] {
            let path = temp_dir.path().join(name);
            RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 255]))
                .save(&path)
                .expect("write png");
            images.push(ImageSource::Local(path));
        }

        let cache = WarmCache::shared(WarmCacheConfig::default());
        let mut preloader = Preloader::new(cache.clone());
        preloader.preload_neighbors(&images, 0);

        for _ in 0..200 {
            if lock(&cache).len() == 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        let cache = lock(&cache);
        assert!(cache.contains(&images[1]));
        assert!(cache.contains(&images[2]));
        assert!(!cache.contains(&images[0]));
    }
}
