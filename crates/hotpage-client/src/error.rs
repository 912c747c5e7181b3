//! Client error types.

/// Reload notifier client error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The page URL could not be parsed into a location.
    #[error("invalid page URL: {0}")]
    InvalidUrl(String),
}
