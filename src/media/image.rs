// SPDX-License-Identifier: MPL-2.0
//! Image fetching and decoding for gallery sources.

use crate::error::{Error, Result};
use crate::media::ImageSource;
use iced::widget::image;
use image_rs::GenericImageView;

/// A decoded image ready for display.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let handle = image::Handle::from_rgba(width, height, pixels);
        Self {
            handle,
            width,
            height,
        }
    }

    /// Decoded size in bytes (RGBA, four bytes per pixel).
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Decodes encoded image bytes (PNG, JPEG, WebP, ...) into RGBA pixels.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the format is unknown or the data is corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<ImageData> {
    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Decode("image has empty dimensions".into()));
    }
    Ok(ImageData::from_rgba(width, height, img.to_rgba8().into_vec()))
}

/// Reads the raw bytes behind a source.
///
/// Remote sources are fetched with a plain GET; any non-success status is an
/// error. Local sources are read from disk.
pub async fn fetch_bytes(source: &ImageSource) -> Result<Vec<u8>> {
    match source {
        ImageSource::Remote(url) => {
            let response = reqwest::get(url.as_str()).await?.error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        }
        ImageSource::Local(path) => Ok(tokio::fs::read(path).await?),
    }
}

/// Fetches and decodes an image. Decoding runs on the blocking pool.
///
/// # Errors
///
/// Returns [`Error::Fetch`] or [`Error::Io`] when the bytes cannot be read
/// and [`Error::Decode`] when they are not a supported image.
pub async fn load_image(source: ImageSource) -> Result<ImageData> {
    let bytes = fetch_bytes(&source).await?;
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .unwrap_or_else(|e| Err(Error::Decode(format!("decode task failed: {e}"))))
}
