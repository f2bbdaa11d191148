//! Shell configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```
//! use gpui_talks_shell::ShellConfig;
//!
//! let config = ShellConfig::from_toml_str(r#"
//!     catalogue_url = "file:///srv/talks.json"
//!     initial_url = "/favourites"
//! "#).unwrap();
//!
//! assert_eq!(config.initial_url, "/favourites");
//! assert_eq!(config.request_timeout_secs, 10);
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where the public talk catalogue lives by default.
pub const DEFAULT_CATALOGUE_URL: &str = "https://ldf.azureedge.net/talks.json";

/// Settings for [`ShellServices::from_config`](crate::ShellServices::from_config).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// `http(s)://` for the network source, `file://` for a local catalogue.
    pub catalogue_url: String,
    /// Directory of the favourites file. `None` keeps favourites in memory.
    pub storage_dir: Option<PathBuf>,
    /// URL routed by [`Shell::start`](crate::Shell::start).
    pub initial_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            catalogue_url: DEFAULT_CATALOGUE_URL.to_string(),
            storage_dir: None,
            initial_url: "/".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Catalogue location after parsing [`ShellConfig::catalogue_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueLocation {
    Http(String),
    File(PathBuf),
}

impl ShellConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn catalogue_url(mut self, url: impl Into<String>) -> Self {
        self.catalogue_url = url.into();
        self
    }

    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn initial_url(mut self, url: impl Into<String>) -> Self {
        self.initial_url = url.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Classify the catalogue URL by scheme.
    pub fn catalogue_location(&self) -> Result<CatalogueLocation, ConfigError> {
        let invalid = |reason: String| ConfigError::CatalogueUrl {
            url: self.catalogue_url.clone(),
            reason,
        };

        let url = Url::parse(&self.catalogue_url).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(CatalogueLocation::Http(url.into())),
            "file" => url
                .to_file_path()
                .map(CatalogueLocation::File)
                .map_err(|()| invalid("not a local file path".to_string())),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.catalogue_url, DEFAULT_CATALOGUE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.storage_dir.is_none());
    }

    #[test]
    fn test_full_document() {
        let config = ShellConfig::from_toml_str(
            r#"
            catalogue_url = "http://localhost:8080/talks.json"
            storage_dir = "/var/lib/talks"
            initial_url = "/talk/3"
            request_timeout_secs = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.storage_dir, Some(PathBuf::from("/var/lib/talks")));
        assert_eq!(config.initial_url, "/talk/3");
        assert_eq!(config.request_timeout_secs, 2);
        assert_eq!(
            config.catalogue_location().unwrap(),
            CatalogueLocation::Http("http://localhost:8080/talks.json".to_string())
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            ShellConfig::from_toml_str("catalog_url = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = ShellConfig::new()
            .catalogue_url("file:///tmp/talks.json")
            .storage_dir("/tmp/fav")
            .initial_url("/sponsors")
            .request_timeout_secs(1);

        assert_eq!(
            config.catalogue_location().unwrap(),
            CatalogueLocation::File(PathBuf::from("/tmp/talks.json"))
        );
        assert_eq!(config.initial_url, "/sponsors");
    }

    #[test]
    fn test_bad_catalogue_urls() {
        let relative = ShellConfig::new().catalogue_url("talks.json");
        assert!(matches!(
            relative.catalogue_location(),
            Err(ConfigError::CatalogueUrl { .. })
        ));

        let ftp = ShellConfig::new().catalogue_url("ftp://example.com/talks.json");
        let err = ftp.catalogue_location().unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }
}
