// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the Signzy connector.

use thiserror::Error;

/// Top-level error type for all connector operations.
#[derive(Debug, Error)]
pub enum SignzyError {
    // -- Pre-flight errors (no network I/O, no audit record) --
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // -- Vendor call errors --
    /// Non-2xx response carrying a parseable JSON body.
    #[error("vendor returned {status}: {message}")]
    Vendor { message: String, status: u16 },

    /// Connection failure, or a response body that is not JSON.
    #[error("transport failure: {message}")]
    Transport { message: String, status: Option<u16> },

    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("config file error: {0}")]
    ConfigFile(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SignzyError {
    /// HTTP status code attached to the error, if the vendor answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Vendor { status, .. } => Some(*status),
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the error was raised before any request left the process.
    pub fn is_pre_flight(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidInput(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SignzyError>;
