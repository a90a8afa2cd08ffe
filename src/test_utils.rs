// SPDX-License-Identifier: MPL-2.0
//! Test helpers: float assertions and image fixtures.
//!
//! The `approx` macros are re-exported because zoom factors, pan offsets and
//! scroll positions are all `f32` and `assert_eq!` is too strict for them.

pub use approx::assert_abs_diff_eq;

use image_rs::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Writes a solid PNG of the given size into `dir` and returns its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([200, 80, 40, 255]))
        .save(&path)
        .expect("failed to write fixture png");
    path
}
