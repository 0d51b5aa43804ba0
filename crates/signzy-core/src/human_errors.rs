// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caller-facing error shape.
//
// The host shows every failure as a dialog with a fixed title and the
// extracted message. Titles are grouped by where the failure happened:
// connector settings, caller input, the vendor, or local storage.

use serde::{Deserialize, Serialize};

use crate::error::SignzyError;

pub const TITLE_CONFIGURATION: &str = "Configuration Error";
pub const TITLE_INPUT: &str = "KYC API Error";
pub const TITLE_VENDOR: &str = "Signzy API Error";
pub const TITLE_INTERNAL: &str = "Signzy Internal Error";

/// Fallback when the vendor error body carries no message at all.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A failure as presented to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerError {
    /// Fixed dialog title for the failure group.
    pub title: String,
    /// Message shown as the dialog body.
    pub message: String,
    /// Vendor HTTP status, when the vendor answered.
    pub status_code: Option<u16>,
}

/// Convert a `SignzyError` into the title/message pair the host displays.
pub fn caller_error(err: &SignzyError) -> CallerError {
    let (title, message) = match err {
        SignzyError::Configuration(detail) => (TITLE_CONFIGURATION, detail.clone()),
        SignzyError::InvalidInput(detail) => (TITLE_INPUT, detail.clone()),

        // Vendor text is relayed verbatim.
        SignzyError::Vendor { message, .. } => (TITLE_VENDOR, message.clone()),
        SignzyError::Transport { message, .. } => (TITLE_VENDOR, message.clone()),

        SignzyError::Database(_)
        | SignzyError::ConfigFile(_)
        | SignzyError::Io(_)
        | SignzyError::Serialization(_) => (TITLE_INTERNAL, err.to_string()),
    };

    CallerError {
        title: title.to_owned(),
        message,
        status_code: err.status_code(),
    }
}
