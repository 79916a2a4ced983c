//! Error types for upstream fetching.

use thiserror::Error;

/// Errors that can occur while fetching upstream proto files.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure; transient, retry by re-running the tool.
    #[error("Fetch error: {0}")]
    Http(#[from] reqwest::Error),

    /// The module's upstream directory is gone or empty.
    ///
    /// Non-retryable: the upstream source tree moved and the configuration
    /// needs investigation.
    #[error("Upstream layout changed: no proto files found for module '{module}' at {path}")]
    UpstreamLayoutChanged { module: String, path: String },

    /// The directory listing response could not be decoded.
    #[error("Listing error for module '{module}': {message}")]
    Listing { module: String, message: String },
}

impl FetchError {
    /// Create an upstream-layout-changed error.
    pub fn layout_changed(module: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UpstreamLayoutChanged {
            module: module.into(),
            path: path.into(),
        }
    }

    /// Create a listing error.
    pub fn listing(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Listing {
            module: module.into(),
            message: message.into(),
        }
    }
}
