//! Error types for the Mailisk client

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by Mailisk API operations
///
/// Every operation returns exactly one error or exactly one successful
/// response; partial results are never returned. Only the "zero matches"
/// condition is retried internally by the search operations — none of
/// these errors are.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No API key was configured (checked before any request is sent)
    #[error("You must set the MAILISK_API_KEY environment variable to use the Mailisk client.")]
    MissingApiKey,

    /// The configured API URL could not be parsed
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request had one or more invalid parameters (HTTP 400)
    ///
    /// The message contains one line per invalid field as reported by the
    /// API, or a generic description if the error body could not be parsed.
    #[error("{0}")]
    InvalidParams(String),

    /// Authentication failed (HTTP 401)
    #[error("Authentication failed, check your API key.")]
    AuthFailed,

    /// The API key lacks permission for this operation (HTTP 403)
    #[error("Insufficient permission to perform that task.")]
    PermissionDenied,

    /// The requested resource does not exist (HTTP 404)
    #[error("Not found, check input parameters.")]
    NotFound,

    /// Any other non-2xx response
    #[error("API request failed with status {0}")]
    Api(u16),

    /// Network-level failure, including a per-attempt timeout
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),
}
