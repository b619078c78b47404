//! Error types for the results-site client.

/// Errors that can occur when talking to the results site.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The site returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was neither JSON nor an HTML page wrapping JSON in `<pre>`.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl Error {
    /// Whether a retry has a chance of succeeding: transport failures,
    /// throttling (429) and server-side errors (5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidPayload(_) => false,
        }
    }
}
