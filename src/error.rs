// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for httpkit
//!
//! The request executor never surfaces these to callers (every failure
//! lands in `ResponseResult::error_info`); they are used by the text
//! utilities and internally while a request is being assembled.

use thiserror::Error;

/// Result type alias for httpkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for httpkit
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error (bad proxy string, unknown charset label)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A substring delimiter was not found in the haystack
    #[error("{role} delimiter '{needle}' not found")]
    DelimiterNotFound {
        /// The delimiter that was searched for
        needle: String,
        /// Which side of the extraction it bounds ("left" or "right")
        role: &'static str,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a delimiter-not-found error
    pub fn delimiter_not_found(needle: impl Into<String>, role: &'static str) -> Self {
        Error::DelimiterNotFound {
            needle: needle.into(),
            role,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a delimiter-not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::DelimiterNotFound { .. })
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
