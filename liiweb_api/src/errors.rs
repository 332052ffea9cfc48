//! Error types for the API client.

/// Errors that can occur when talking to a LIIWeb site.
///
/// Every failure is handed straight back to the caller; the client never
/// retries or swallows an error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent or its body could not be read
    /// (DNS failure, refused connection, TLS error, timeout).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server rejected the credentials (HTTP 401 or 403).
    #[error("Authentication rejected with status {status}")]
    Unauthorized { status: u16, body: String },
    /// The API returned any other non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the JSON document we expected.
    #[error("Failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    /// The base URL and path did not combine into a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
