/// Convenient result alias for update-engine operations.
pub type Result<T> = std::result::Result<T, OtaError>;

/// Errors that can occur while performing an update.
#[derive(thiserror::Error, Debug)]
pub enum OtaError {
    /// The HTTP transport failed before a status line was received
    /// (timeout, connection refused, DNS).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("unexpected http status {status} for {url}")]
    HttpStatus {
        /// Status code the server returned.
        status: u16,
        /// Request URL.
        url: String,
    },
    /// A manifest could not be decoded from JSON.
    #[error("manifest decoding failed: {0}")]
    ManifestDecode(#[from] serde_json::Error),
    /// Failed to perform a filesystem operation.
    #[error("filesystem operation failed: {0}")]
    Io(#[from] std::io::Error),
    /// Overwriting a live file during commit failed. The local version
    /// record must not be saved after this.
    #[error("install of {path} failed: {source}")]
    Install {
        /// Device path of the file that could not be installed.
        path: String,
        /// Underlying failure.
        source: Box<OtaError>,
    },
    /// A device path resolved outside the filesystem root.
    #[error("path escapes filesystem root: {0}")]
    PathEscape(String),
    /// Generic error.
    #[error("{0}")]
    Other(String),
}

impl OtaError {
    /// Helper for wrapping transport failures reported by an HTTP client.
    pub fn transport(msg: impl Into<String>) -> Self {
        OtaError::Transport(msg.into())
    }

    /// Helper for wrapping validation failures.
    pub fn validation(msg: impl Into<String>) -> Self {
        OtaError::Other(msg.into())
    }
}
