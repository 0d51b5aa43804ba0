// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! signzy-audit: write-once record of every outbound vendor call.
//!
//! Each record carries the operation name, endpoint, request headers (with
//! the credential fingerprinted), request payload, raw response and status
//! code. Records are never edited; an age-based sweep is the only way they
//! leave the table.

pub mod audit;
pub mod body;
pub mod redact;
pub mod sink;

// PUBLIC API
pub use audit::AuditLog;
pub use body::{LogBody, build_record, normalize};
pub use redact::{fingerprint, hash_bytes};
pub use sink::{AuditSink, NoopSink};
