//! The talk catalogue and the sources it is fetched from.
//!
//! A catalogue is a JSON array of talk records:
//!
//! ```json
//! [{ "id": "7", "title": "Talk", "date": "2020-02-11T20:18:20.026Z",
//!    "speaker": "Roger", "description": "..." }]
//! ```
//!
//! `id` is optional. A record without one is identified by its position in
//! the array (`"0"`, `"1"`, ...), so every record has a [`FavouriteId`].
//!
//! Sources are blocking and run on the GPUI background executor.

use crate::error::LoadError;
use crate::favourites::FavouriteId;
use crate::{debug_log, info_log};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One talk of the festival programme. Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkRecord {
    #[serde(default, skip_serializing_if = "FavouriteId::is_empty")]
    pub id: FavouriteId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub speaker: String,
    #[serde(default)]
    pub description: String,
}

impl TalkRecord {
    /// The identifier used when favouriting this talk.
    pub fn favourite_id(&self) -> &FavouriteId {
        &self.id
    }
}

/// Decode a catalogue body and give every record an id.
pub fn parse_catalogue(body: &str) -> Result<Vec<TalkRecord>, LoadError> {
    let mut talks: Vec<TalkRecord> = serde_json::from_str(body)?;
    for (index, talk) in talks.iter_mut().enumerate() {
        if talk.id.is_empty() {
            talk.id = FavouriteId::new(index.to_string());
        }
    }
    Ok(talks)
}

/// Where the talk catalogue comes from.
pub trait TalkSource: Send + Sync + 'static {
    /// Fetch the whole catalogue. Blocking.
    fn fetch_talks(&self) -> Result<Vec<TalkRecord>, LoadError>;

    /// Source description for logs.
    fn describe(&self) -> String {
        "talk source".to_string()
    }
}

impl<F> TalkSource for F
where
    F: Fn() -> Result<Vec<TalkRecord>, LoadError> + Send + Sync + 'static,
{
    fn fetch_talks(&self) -> Result<Vec<TalkRecord>, LoadError> {
        self()
    }
}

/// Catalogue served over HTTP(S).
///
/// Only a 2xx response with a parseable body counts as success; the body
/// is not read for any other status.
#[derive(Debug, Clone)]
pub struct HttpTalkSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTalkSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TalkSource for HttpTalkSource {
    fn fetch_talks(&self) -> Result<Vec<TalkRecord>, LoadError> {
        debug_log!("Fetching talk catalogue from {}", self.url);
        let response = self.client.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let talks = parse_catalogue(&response.text()?)?;
        info_log!("Fetched {} talks from {}", talks.len(), self.url);
        Ok(talks)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Catalogue read from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileTalkSource {
    path: PathBuf,
}

impl FileTalkSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TalkSource for FileTalkSource {
    fn fetch_talks(&self) -> Result<Vec<TalkRecord>, LoadError> {
        let body = std::fs::read_to_string(&self.path)?;
        parse_catalogue(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
