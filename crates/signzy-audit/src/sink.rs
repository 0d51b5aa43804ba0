// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Destination for audit records written by the verification client.

use signzy_core::error::Result;
use signzy_core::types::VendorCallRecord;

/// Somewhere to persist one record per vendor call.
///
/// Implementations must commit before returning. Callers treat errors as
/// best-effort: they are logged, never surfaced in place of the call result.
pub trait AuditSink {
    fn record_call(&self, record: &VendorCallRecord) -> Result<()>;
}

impl<S: AuditSink + ?Sized> AuditSink for &S {
    fn record_call(&self, record: &VendorCallRecord) -> Result<()> {
        (**self).record_call(record)
    }
}

impl<S: AuditSink + ?Sized> AuditSink for Box<S> {
    fn record_call(&self, record: &VendorCallRecord) -> Result<()> {
        (**self).record_call(record)
    }
}

/// Sink used when auditing is switched off in the configuration.
pub struct NoopSink;

impl AuditSink for NoopSink {
    fn record_call(&self, record: &VendorCallRecord) -> Result<()> {
        tracing::trace!(id = %record.id, "audit disabled, record dropped");
        Ok(())
    }
}
