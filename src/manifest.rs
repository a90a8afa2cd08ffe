// SPDX-License-Identifier: MPL-2.0
//! Content manifest: the portfolio entries the host renders, one gallery
//! each.
//!
//! ```toml
//! [[entries]]
//! id = "atlas"
//! title = "Atlas"
//! description = "Internal analytics dashboard"
//! layout = "horizontal"
//! images = ["shots/overview.png", "https://example.com/detail.png"]
//! ```
//!
//! Relative image paths resolve against the directory holding the manifest.

use crate::error::{Error, Result};
use crate::gallery::{GalleryInput, Layout};
use crate::media::ImageSource;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Id given to the entry built from command-line images.
pub const AD_HOC_ID: &str = "images";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// One project or experience entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Falls back to the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Manifest {
    /// Reads and validates a manifest file. Image sources are resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|err| Error::Manifest(format!("{}: {err}", path.display())))?;
        let mut manifest = Self::parse(&content)?;

        if let Some(base) = path.parent() {
            manifest.resolve_paths(base)?;
        }
        Ok(manifest)
    }

    /// Parses manifest text without touching the filesystem.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).map_err(|err| Error::Manifest(err.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// A single untitled-id entry built from loose image arguments.
    #[must_use]
    pub fn from_images(images: Vec<String>, title: Option<String>) -> Self {
        Self {
            entries: vec![Entry {
                id: AD_HOC_ID.to_string(),
                title: title.unwrap_or_default(),
                description: None,
                layout: None,
                images,
            }],
        }
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.id.trim().is_empty() {
                return Err(Error::Manifest("entry with empty id".to_string()));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(Error::Manifest(format!("duplicate entry id '{}'", entry.id)));
            }
            for image in &entry.images {
                ImageSource::parse(image).map_err(|err| {
                    Error::Manifest(format!("entry '{}': {err}", entry.id))
                })?;
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) -> Result<()> {
        for entry in &mut self.entries {
            for image in &mut entry.images {
                let source = ImageSource::parse(image)?.resolved_against(base);
                *image = source.to_string();
            }
        }
        Ok(())
    }
}

impl Entry {
    /// Builds the gallery input for this entry.
    pub fn gallery_input(&self, default_layout: Layout) -> Result<GalleryInput> {
        let images = self
            .images
            .iter()
            .map(|raw| ImageSource::parse(raw))
            .collect::<Result<Vec<_>>>()?;

        let mut input = GalleryInput::new(images).with_layout(self.layout.unwrap_or(default_layout));
        if !self.title.trim().is_empty() {
            input = input.with_title(self.title.clone());
        }
        Ok(input)
    }
}
