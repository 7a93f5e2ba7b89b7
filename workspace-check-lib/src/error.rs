//! Error handling for Workspace status checking.
//!
//! This module defines a comprehensive error type that covers the different
//! ways a check can fail, from network issues to invalid configuration.
//!
//! Note that probe failures never reach API callers as errors: the checker
//! folds them into a [`crate::ProbeReport`] with the `error` flag set.

use std::fmt;

/// Main error type for Workspace status checking operations.
#[derive(Debug, Clone)]
pub enum WorkspaceCheckError {
    /// Invalid or missing user input
    InvalidInput {
        message: String,
    },

    /// Network-related errors (connection, TLS, body read, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// DNS resolution failures during the pre-check
    DnsError {
        host: String,
        message: String,
    },

    /// Timeout errors when the probe takes too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Configuration errors (invalid settings, bad TOML, etc.)
    ConfigError {
        message: String,
    },

    /// File I/O errors when reading domain lists or config files
    FileError {
        path: String,
        message: String,
    },

    /// Generic internal errors that don't fit other categories
    Internal {
        message: String,
    },
}

impl WorkspaceCheckError {
    /// Create a new invalid input error.
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new DNS error.
    pub fn dns<H: Into<String>, M: Into<String>>(host: H, message: M) -> Self {
        Self::DnsError {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for WorkspaceCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::DnsError { host, message } => {
                write!(f, "DNS error for '{}': {}", host, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for WorkspaceCheckError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for WorkspaceCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(30))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<std::io::Error> for WorkspaceCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}
