// SPDX-License-Identifier: MPL-2.0
//! This module reads the gallery configuration from a `settings.toml` file.
//! The file is edited by hand; the gallery never writes it.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[gallery]` - Default layout, swipe threshold, neighbour preloading
//! - `[lightbox]` - Zoom step
//! - `[cache]` - Warm cache limits
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `FOLIO_GALLERY_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use folio_gallery::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (config, _warning) = config::load();
//! let layout = config.default_layout();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::gallery::Layout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// i18n key reported when an existing settings file cannot be parsed.
pub const CONFIG_LOAD_ERROR_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "ko").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Inline viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Layout used by entries that do not pick one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    /// Horizontal drag distance needed to navigate, in logical pixels.
    #[serde(
        default = "default_swipe_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub swipe_threshold_px: Option<f32>,

    /// Whether neighbours of the selected image are warmed in the background.
    #[serde(
        default = "default_preload_neighbors",
        skip_serializing_if = "Option::is_none"
    )]
    pub preload_neighbors: Option<bool>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            layout: None,
            swipe_threshold_px: default_swipe_threshold(),
            preload_neighbors: default_preload_neighbors(),
        }
    }
}

/// Lightbox overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightboxConfig {
    /// Zoom change per wheel tick or +/- activation.
    #[serde(default = "default_zoom_step", skip_serializing_if = "Option::is_none")]
    pub zoom_step: Option<f32>,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            zoom_step: default_zoom_step(),
        }
    }
}

/// Warm cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of decoded images kept warm.
    #[serde(
        default = "default_cache_max_images",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_images: Option<usize>,

    /// Memory budget of the warm cache in megabytes.
    #[serde(
        default = "default_cache_max_mb",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_megabytes: Option<u32>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_images: default_cache_max_images(),
            max_megabytes: default_cache_max_mb(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Inline viewer settings.
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// Lightbox settings.
    #[serde(default)]
    pub lightbox: LightboxConfig,

    /// Warm cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Swipe threshold clamped to the supported range.
    #[must_use]
    pub fn swipe_threshold_px(&self) -> f32 {
        finite_or(self.gallery.swipe_threshold_px, DEFAULT_SWIPE_THRESHOLD_PX)
            .clamp(MIN_SWIPE_THRESHOLD_PX, MAX_SWIPE_THRESHOLD_PX)
    }

    /// Lightbox zoom step clamped to the supported range.
    #[must_use]
    pub fn zoom_step(&self) -> f32 {
        finite_or(self.lightbox.zoom_step, DEFAULT_ZOOM_STEP).clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP)
    }

    #[must_use]
    pub fn preload_neighbors(&self) -> bool {
        self.gallery.preload_neighbors.unwrap_or(true)
    }

    #[must_use]
    pub fn default_layout(&self) -> Layout {
        self.gallery.layout.unwrap_or_default()
    }

    /// Warm cache image count clamped to the supported range.
    #[must_use]
    pub fn cache_max_images(&self) -> usize {
        self.cache
            .max_images
            .unwrap_or(DEFAULT_CACHE_MAX_IMAGES)
            .clamp(MIN_CACHE_MAX_IMAGES, MAX_CACHE_MAX_IMAGES)
    }

    /// Warm cache budget in bytes, clamped to the supported range.
    #[must_use]
    pub fn cache_max_bytes(&self) -> usize {
        let mb = self
            .cache
            .max_megabytes
            .unwrap_or(DEFAULT_CACHE_MAX_MB)
            .clamp(MIN_CACHE_MAX_MB, MAX_CACHE_MAX_MB);
        (mb as usize) * 1024 * 1024
    }
}

/// `nan` and `inf` are valid TOML floats but `clamp` lets NaN through.
fn finite_or(value: Option<f32>, default: f32) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_swipe_threshold() -> Option<f32> {
    Some(DEFAULT_SWIPE_THRESHOLD_PX)
}

fn default_preload_neighbors() -> Option<bool> {
    Some(true)
}

fn default_zoom_step() -> Option<f32> {
    Some(DEFAULT_ZOOM_STEP)
}

fn default_cache_max_images() -> Option<usize> {
    Some(DEFAULT_CACHE_MAX_IMAGES)
}

fn default_cache_max_mb() -> Option<u32> {
    Some(DEFAULT_CACHE_MAX_MB)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::settings_dir(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring unreadable settings at {}: {err}", path.display());
                    return (Config::default(), Some(CONFIG_LOAD_ERROR_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
