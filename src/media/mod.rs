// SPDX-License-Identifier: MPL-2.0
//! Gallery media: where images come from, how they are decoded and how
//! neighbours are kept warm.

pub mod image;
pub mod prefetch;
pub mod source;

pub use image::{decode_image, fetch_bytes, load_image, ImageData};
pub use prefetch::{Preloader, SharedWarmCache, WarmCache, WarmCacheConfig};
pub use source::ImageSource;

use crate::error::Result;

/// Loads the image shown in the main frame.
///
/// A warm cache hit is returned without touching the network or disk.
/// Fresh decodes are added to the cache so navigating back is instant.
pub async fn probe_image(source: ImageSource, cache: SharedWarmCache) -> Result<ImageData> {
    if let Some(image) = prefetch::cached(&cache, &source) {
        log::debug!("serving {source} from warm cache");
        return Ok(image);
    }

    let image = load_image(source.clone()).await?;
    prefetch::lock(&cache).insert(source, image.clone());
    Ok(image)
}
