// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Manifest(String),
    Decode(String),
    Fetch(FetchError),
}

/// Failure modes of retrieving a remote image.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    Status(u16),

    /// Connection, TLS or protocol failure.
    Transport(String),

    /// The source string is not a URL or path we know how to read.
    UnsupportedScheme(String),
}

impl FetchError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FetchError::Status(404) => "error-fetch-not-found",
            FetchError::Status(_) => "error-fetch-status",
            FetchError::Transport(_) => "error-fetch-transport",
            FetchError::UnsupportedScheme(_) => "error-fetch-unsupported-scheme",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status(code) => write!(f, "HTTP status {}", code),
            FetchError::Transport(msg) => write!(f, "Transport failure: {}", msg),
            FetchError::UnsupportedScheme(scheme) => {
                write!(f, "Unsupported source scheme: {}", scheme)
            }
        }
    }
}

impl Error {
    /// Returns the i18n message key shown to the user for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Fetch(err) => err.i18n_key(),
            Error::Manifest(_) => "error-manifest",
            Error::Io(_) | Error::Config(_) | Error::Decode(_) => "gallery-load-failed",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Manifest(e) => write!(f, "Manifest Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::Fetch(FetchError::Status(status.as_u16())),
            None => Error::Fetch(FetchError::Transport(err.to_string())),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
