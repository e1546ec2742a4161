use serde::Deserialize;

use crate::config::Endpoints;
use crate::errors::FetchError;
use crate::platform::Platform;
use crate::utils::download::Fetcher;

/// One element of a channel's `index.json`. Fields other than these are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexEntry {
    pub version: String,
    pub files: Manifest,
}

/// Artifact keys published for a version.
///
/// nodejs.org publishes a list; an object keyed by artifact is accepted as well.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Manifest {
    List(Vec<String>),
    Table(serde_json::Map<String, serde_json::Value>),
}

impl Manifest {
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Self::List(keys) => keys.iter().any(|k| k == key),
            Self::Table(table) => table.contains_key(key),
        }
    }
}

pub fn index_url(endpoints: &Endpoints, channel: &str) -> String {
    format!(
        "{}/{}/index.json",
        endpoints.dist_base.trim_end_matches('/'),
        channel
    )
}

/// Downloads and parses the version index of `channel`.
///
/// An HTTP error status or a body that is not an index both mean the channel does
/// not exist. Transport failures stay network errors.
pub fn fetch_index(
    fetcher: &Fetcher,
    endpoints: &Endpoints,
    channel: &str,
) -> Result<Vec<IndexEntry>, FetchError> {
    let url = index_url(endpoints, channel);

    let body = match fetcher.fetch_bytes(&url) {
        Ok(body) => body,
        Err(err) => {
            return Err(match err.status() {
                Some(status) => FetchError::not_found(format!(
                    "unknown channel '{}' ({} returned HTTP {})",
                    channel, url, status
                )),
                None => err,
            })
        }
    };

    serde_json::from_slice(&body).map_err(|e| {
        FetchError::not_found(format!(
            "unknown channel '{}' ({} is not a version index: {})",
            channel, url, e
        ))
    })
}

/// First entry, in index order, whose version starts with `version_prefix` and which
/// ships an artifact for `platform`.
///
/// The index is published newest first; that order is the tie-break and is never
/// re-sorted here.
pub fn select_version<'a>(
    entries: &'a [IndexEntry],
    platform: Platform,
    version_prefix: &str,
) -> Option<&'a str> {
    let key = platform.manifest_key();
    entries
        .iter()
        .find(|entry| entry.version.starts_with(version_prefix) && entry.files.contains(key))
        .map(|entry| entry.version.as_str())
}
