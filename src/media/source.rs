// SPDX-License-Identifier: MPL-2.0
//! Image source locators.
//!
//! Galleries reference their images by string, exactly as a content manifest
//! lists them. A source is either a remote `http(s)` URL or a local file,
//! given as a plain path or a `file://` URL.

use crate::error::{Error, FetchError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the bytes of a gallery image come from.
///
/// Sources are compared by value. Two identical entries in one gallery are
/// still distinct positions; the equality only matters for cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// `http://` or `https://` URL fetched over the network.
    Remote(String),

    /// File on the local filesystem.
    Local(PathBuf),
}

impl ImageSource {
    /// Parses a source string.
    ///
    /// Strings without a scheme are treated as filesystem paths. Any scheme
    /// other than `http`, `https` or `file` is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::Manifest("empty image source".to_string()));
        }

        match trimmed.split_once("://") {
            Some((scheme, rest)) => match scheme.to_ascii_lowercase().as_str() {
                "http" | "https" => Ok(Self::Remote(trimmed.to_string())),
                "file" => Ok(Self::Local(PathBuf::from(rest))),
                other => Err(FetchError::UnsupportedScheme(other.to_string()).into()),
            },
            None => Ok(Self::Local(PathBuf::from(trimmed))),
        }
    }

    /// Resolves a relative local path against `base`. Remote URLs and
    /// absolute paths are returned unchanged.
    #[must_use]
    pub fn resolved_against(self, base: &Path) -> Self {
        match self {
            Self::Local(path) if path.is_relative() => Self::Local(base.join(path)),
            other => other,
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

impl std::str::FromStr for ImageSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
