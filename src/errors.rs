//! Error types shared by every stage of a fetch.
//!
//! Each variant names one failure category. Nothing is retried or swallowed:
//! the first error ends the run and `main` prints it with its cause chain.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure or a non-2xx HTTP status.
    #[error("request to {url} failed")]
    Network {
        url: String,
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
        #[source]
        source: BoxError,
    },

    /// The response body is not valid UTF-8.
    #[error("response from {url} is not valid UTF-8")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Unknown channel or no version matching the request.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The downloaded bytes are not an archive of the expected kind.
    #[error("corrupt archive: {message}")]
    CorruptArchive {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// An expected marker is missing from a scraped HTML page.
    #[error("scrape failed: {message}")]
    Scrape { message: String },

    /// The host OS has no platform key and none was given explicitly.
    #[error("unsupported platform: {os} (pass --platform win-x64, linux-x64 or darwin-x64)")]
    UnsupportedPlatform { os: String },

    /// Filesystem failure while writing, moving or chmod-ing.
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    #[must_use]
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            status: source.status().map(|s| s.as_u16()),
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn network_io(url: impl Into<String>, source: std::io::Error) -> Self {
        Self::Network {
            url: url.into(),
            status: None,
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn decode(url: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn corrupt_archive(message: impl Into<String>) -> Self {
        Self::CorruptArchive {
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn corrupt_archive_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::CorruptArchive {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    #[must_use]
    pub fn scrape(message: impl Into<String>) -> Self {
        Self::Scrape {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform { os: os.into() }
    }

    #[must_use]
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// HTTP status of a `Network` error, if the server replied.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }
}
