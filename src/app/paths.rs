// SPDX-License-Identifier: MPL-2.0
//! Where `settings.toml` lives.
//!
//! First match wins: an explicit directory (tests, `load_with_override`),
//! `--config-dir`, `FOLIO_GALLERY_CONFIG_DIR`, then the platform config
//! directory joined with `FolioGallery`.

use std::path::PathBuf;
use std::sync::OnceLock;

const DIR_NAME: &str = "FolioGallery";

/// Environment variable naming the settings directory.
pub const CONFIG_DIR_ENV: &str = "FOLIO_GALLERY_CONFIG_DIR";

static CLI_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Records `--config-dir`. The first value sticks for the whole process.
pub fn set_cli_dir(dir: Option<String>) {
    let Some(dir) = dir else {
        return;
    };
    if CLI_DIR.set(PathBuf::from(dir)).is_err() {
        log::warn!("--config-dir already recorded, keeping the first value");
    }
}

/// Directory that holds `settings.toml`, or `None` when the platform has no
/// config directory and nothing overrides it.
pub fn settings_dir(explicit: Option<PathBuf>) -> Option<PathBuf> {
    let from_env = std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from);
    first_override(explicit, CLI_DIR.get().cloned(), from_env).or_else(platform_dir)
}

fn first_override(
    explicit: Option<PathBuf>,
    cli: Option<PathBuf>,
    from_env: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit
        .or(cli)
        .or_else(|| from_env.filter(|dir| !dir.as_os_str().is_empty()))
}

fn platform_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(DIR_NAME))
}
