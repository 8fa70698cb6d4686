use thiserror::Error;

/// Why a request to the APOD API failed.
///
/// Carried inside iced messages, so it only holds owned, cloneable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("server returned HTTP {status}")]
    Server { status: u16 },

    /// The body didn't parse into the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if !status.is_success() => FetchError::Server {
                status: status.as_u16(),
            },
            _ if err.is_decode() => FetchError::MalformedResponse(err.to_string()),
            _ => FetchError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}
