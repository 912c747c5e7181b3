//! Server error types.

/// Dev server error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// I/O error while binding or serving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file watcher could not be created or started.
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// The configured host/port is not a valid socket address.
    #[error("invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),
}
