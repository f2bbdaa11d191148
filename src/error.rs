//! Error types for the shell.
//!
//! Nothing here is ever surfaced to the caller of a navigation or a
//! favourite signal. Errors exist so they can be logged, reported through
//! [`Analytics::track_exception`](crate::analytics::Analytics::track_exception),
//! and matched on in tests.
//!
//! | Type             | Raised by                          | Outcome                         |
//! |------------------|------------------------------------|---------------------------------|
//! | [`LoadError`]    | catalogue fetch                    | `is_error = true`               |
//! | [`StorageError`] | favourites medium                  | read: empty set, write: logged  |
//! | [`PageLoadError`]| lazy page loader                   | page region renders nothing     |
//! | [`ConfigError`]  | [`ShellConfig`](crate::ShellConfig)| construction fails              |
//!
//! Unknown pages are not errors at all: they validate to
//! [`PageId::Lost`](crate::PageId::Lost).
//!
//! # Examples
//!
//! ```
//! use gpui_talks_shell::error::{LoadError, ShellError};
//!
//! let err: ShellError = LoadError::Status { status: 503 }.into();
//! assert_eq!(err.to_string(), "catalogue load failed: unexpected status 503");
//! ```

use crate::page::PageId;
use thiserror::Error;

/// Failure to fetch or decode the talk catalogue.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// The body was not a JSON array of talk records.
    #[error("malformed catalogue: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading a local catalogue file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A source that is not backed by HTTP or a file gave up.
    #[error("{0}")]
    Unavailable(String),
}

/// Failure in the durable key-value medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Keys map to file names, so path separators and empty keys are refused.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage lock poisoned")]
    Poisoned,

    /// The medium refused the operation for its own reasons.
    #[error("{0}")]
    Rejected(String),
}

/// Failure to activate a page module.
#[derive(Debug, Clone, Error)]
#[error("page '{page}' failed to load: {message}")]
pub struct PageLoadError {
    pub page: PageId,
    pub message: String,
}

impl PageLoadError {
    pub fn new(page: PageId, message: impl Into<String>) -> Self {
        Self {
            page,
            message: message.into(),
        }
    }
}

/// Failure to read a [`ShellConfig`](crate::ShellConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid catalogue url {url:?}: {reason}")]
    CatalogueUrl { url: String, reason: String },
}

/// Umbrella error handed to analytics and returned from service construction.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("catalogue load failed: {0}")]
    Catalogue(#[from] LoadError),

    #[error("favourites storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    PageLoad(#[from] PageLoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ShellError {
    /// Short stable label for analytics grouping.
    pub fn kind(&self) -> &'static str {
        match self {
            ShellError::Catalogue(_) => "catalogue",
            ShellError::Storage(_) => "storage",
            ShellError::PageLoad(_) => "page-load",
            ShellError::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = LoadError::Status { status: 404 };
        assert_eq!(err.to_string(), "unexpected status 404");
    }

    #[test]
    fn test_shell_error_wraps_storage() {
        let err: ShellError = StorageError::InvalidKey("a/b".to_string()).into();
        assert_eq!(err.kind(), "storage");
        assert_eq!(
            err.to_string(),
            "favourites storage failed: invalid storage key: \"a/b\""
        );
    }

    #[test]
    fn test_page_load_error_is_transparent() {
        let err: ShellError = PageLoadError::new(PageId::Sponsors, "missing asset").into();
        assert_eq!(err.kind(), "page-load");
        assert_eq!(err.to_string(), "page 'sponsors' failed to load: missing asset");
    }

    #[test]
    fn test_decode_error_from_json() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: LoadError = json_err.into();
        assert!(matches!(err, LoadError::Decode(_)));
    }
}
