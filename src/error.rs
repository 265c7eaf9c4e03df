//! Error types surfaced by the client.

use reqwest::Method;

/// Errors returned by every fallible operation in this crate.
///
/// The client never retries and never aggregates: the first failure on any
/// path is returned to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Exchanging the API key for a bearer token failed.
    ///
    /// Wraps the underlying [`Error::Api`], [`Error::Network`], or
    /// [`Error::Decode`] from the auth endpoint call.
    #[error("credential exchange failed: {0}")]
    Auth(#[source] Box<Error>),

    /// The request was rejected locally, before any network call.
    ///
    /// Covers malformed resource IDs, malformed timecodes, and paths that do
    /// not resolve against the base URL.
    #[error("{0}")]
    InvalidRequest(String),

    /// The request could not be sent, or no response was obtained.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    ///
    /// Captures the status, method, and URL at the moment of failure together
    /// with the decoded error body (`type`/`title`/`name`) when the server
    /// sent one. A non-JSON body is carried verbatim in `title`.
    #[error("[{status}] {method} {url}: {}", .title.as_deref().unwrap_or("no error detail"))]
    Api {
        status: u16,
        method: Method,
        url: String,
        error_type: Option<String>,
        title: Option<String>,
        name: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A local file could not be opened or read during an upload.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The HTTP status code, for [`Error::Api`] failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Auth(inner) => inner.status(),
            _ => None,
        }
    }
}
