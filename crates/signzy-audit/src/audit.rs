// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Audit trail: append-only SQLite log of every outbound vendor call.
//
// Schema:
//   vendor_call_log(
//     id              TEXT    PRIMARY KEY,  -- UUID v4
//     operation       TEXT    NOT NULL,     -- e.g. "Verify PAN"
//     endpoint        TEXT    NOT NULL,     -- full vendor URL
//     request_headers TEXT,                 -- pretty JSON, credential redacted
//     request_body    TEXT,
//     response_body   TEXT,
//     status_code     INTEGER,              -- NULL when no response arrived
//     created_at      TEXT    NOT NULL      -- RFC 3339, UTC, microseconds
//   )
//
// Rows are never updated. The only delete path is the age-based sweep.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rusqlite::{Connection, Row, params};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use signzy_core::error::{Result, SignzyError};
use signzy_core::types::{CallId, VendorCallRecord};

use crate::body::{LogBody, build_record};
use crate::sink::AuditSink;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS vendor_call_log (
        id              TEXT    PRIMARY KEY,
        operation       TEXT    NOT NULL,
        endpoint        TEXT    NOT NULL,
        request_headers TEXT,
        request_body    TEXT,
        response_body   TEXT,
        status_code     INTEGER,
        created_at      TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS vendor_call_log_created_at
        ON vendor_call_log (created_at);
"#;

const SELECT_COLUMNS: &str = "SELECT id, operation, endpoint, request_headers, request_body,
        response_body, status_code, created_at
 FROM vendor_call_log";

// ---------------------------------------------------------------------------
// Local error helpers
// ---------------------------------------------------------------------------

/// Convert a `rusqlite::Error` into a `SignzyError::Database`.
fn db_err(e: rusqlite::Error) -> SignzyError {
    SignzyError::Database(e.to_string())
}

/// Fixed-width timestamps so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Append-only log of vendor calls backed by a SQLite database.
pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open (or create) the audit database at `path`.
    ///
    /// The table is created automatically if it does not already exist.
    /// WAL mode is enabled so operators can read while calls are logged.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(db_err)?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        info!("audit log opened");
        Ok(Self { conn })
    }

    /// Open an in-memory audit database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("in-memory audit log opened");
        Ok(Self { conn })
    }

    /// Record one vendor call.
    ///
    /// Headers and bodies are normalized (pretty JSON where possible, the
    /// Authorization value fingerprinted) and the row is committed before
    /// this returns.
    #[instrument(skip(self, request_headers, request_body, response_body), fields(%operation, ?status_code))]
    pub fn record(
        &self,
        operation: &str,
        endpoint: &str,
        request_headers: Option<LogBody>,
        request_body: Option<LogBody>,
        response_body: Option<LogBody>,
        status_code: Option<u16>,
    ) -> Result<VendorCallRecord> {
        let record = build_record(
            operation,
            endpoint,
            request_headers,
            request_body,
            response_body,
            status_code,
        );
        self.insert(&record)?;
        Ok(record)
    }

    /// Insert an already-built record.
    #[instrument(skip(self, record), fields(id = %record.id, operation = %record.operation))]
    pub fn insert(&self, record: &VendorCallRecord) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO vendor_call_log (id, operation, endpoint, request_headers,
                     request_body, response_body, status_code, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id.to_string(),
                    record.operation,
                    record.endpoint,
                    record.request_headers,
                    record.request_body,
                    record.response_body,
                    record.status_code,
                    format_timestamp(&record.created_at),
                ],
            )
            .map_err(db_err)?;

        debug!("audit entry recorded");
        Ok(())
    }

    /// Delete every record older than `days` days. Returns the number removed.
    ///
    /// An age reaching past the earliest representable date matches nothing.
    #[instrument(skip(self))]
    pub fn purge_older_than(&self, days: u32) -> Result<usize> {
        let cutoff = TimeDelta::try_days(i64::from(days))
            .and_then(|age| Utc::now().checked_sub_signed(age));

        match cutoff {
            Some(cutoff) => self.purge_before(cutoff),
            None => {
                debug!(days, "retention reaches past the earliest date, nothing to purge");
                Ok(0)
            }
        }
    }

    /// Delete every record created strictly before `cutoff`.
    pub fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM vendor_call_log WHERE created_at < ?1",
                params![format_timestamp(&cutoff)],
            )
            .map_err(db_err)?;

        info!(removed, cutoff = %cutoff, "purged old audit entries");
        Ok(removed)
    }

    /// All records for one operation, oldest first.
    pub fn entries_for_operation(&self, operation: &str) -> Result<Vec<VendorCallRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{SELECT_COLUMNS} WHERE operation = ?1 ORDER BY created_at ASC, rowid ASC"
            ))
            .map_err(db_err)?;

        stmt.query_map(params![operation], row_to_record)
            .map_err(db_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_err)
    }

    /// The most recent `limit` records, newest first.
    pub fn recent_entries(&self, limit: u32) -> Result<Vec<VendorCallRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY rowid DESC LIMIT ?1"))
            .map_err(db_err)?;

        stmt.query_map(params![limit], row_to_record)
            .map_err(db_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_err)
    }

    /// Return the total number of records.
    pub fn count(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM vendor_call_log", [], |row| row.get(0))
            .map_err(db_err)
    }
}

impl AuditSink for AuditLog {
    fn record_call(&self, record: &VendorCallRecord) -> Result<()> {
        self.insert(record)
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Map a SQLite row to a `VendorCallRecord`.
///
/// Column indices must match `SELECT_COLUMNS`.
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<VendorCallRecord> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: String = row.get(7)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(VendorCallRecord {
        id: CallId(id),
        operation: row.get(1)?,
        endpoint: row.get(2)?,
        request_headers: row.get(3)?,
        request_body: row.get(4)?,
        response_body: row.get(5)?,
        status_code: row.get(6)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_log() -> AuditLog {
        AuditLog::open_in_memory().expect("open in-memory audit log")
    }

    fn aged_record(operation: &str, days_old: i64) -> VendorCallRecord {
        let mut record = build_record(operation, "https://api.example.com/x", None, None, None, Some(200));
        record.created_at = Utc::now() - TimeDelta::days(days_old);
        record
    }

    #[test]
    fn record_and_count() {
        let log = make_log();
        assert_eq!(log.count().unwrap(), 0);

        log.record("Verify PAN", "https://api.example.com/pan/verify", None, None, None, Some(200))
            .unwrap();
        log.record(
            "Verify UPI",
            "https://api.example.com/bankAccountVerification/upiVerifications",
            None,
            Some(json!({"vpa": "a@upi"}).into()),
            None,
            None,
        )
        .unwrap();

        assert_eq!(log.count().unwrap(), 2);
    }

    #[test]
    fn stored_record_round_trips() {
        let log = make_log();
        let written = log
            .record(
                "Verify Aadhaar",
                "https://api.example.com/aadhaar/verify",
                Some(json!({"Authorization": "live-key", "Content-Type": "application/json"}).into()),
                Some(r#"{"uid":"234567890123"}"#.into()),
                Some(r#"{"result":{"verified":true}}"#.into()),
                Some(200),
            )
            .unwrap();

        let entries = log.entries_for_operation("Verify Aadhaar").unwrap();
        assert_eq!(entries.len(), 1);
        let read = &entries[0];
        assert_eq!(read.id, written.id);
        assert_eq!(read.status_code, Some(200));
        assert_eq!(read.request_body, written.request_body);
        assert_eq!(read.created_at, written.created_at);

        let headers = read.request_headers.as_deref().unwrap();
        assert!(!headers.contains("live-key"));
        assert!(headers.contains("redacted:sha256:"));
    }

    #[test]
    fn transport_failure_has_no_status_or_response() {
        let log = make_log();
        log.record("Verify PAN", "https://api.example.com/pan/verify", None, Some("{}".into()), None, None)
            .unwrap();

        let entry = &log.recent_entries(1).unwrap()[0];
        assert_eq!(entry.status_code, None);
        assert_eq!(entry.response_body, None);
    }

    #[test]
    fn recent_entries_ordering() {
        let log = make_log();
        for i in 0..5 {
            log.record(&format!("op_{i}"), "https://api.example.com", None, None, None, Some(200))
                .unwrap();
        }

        let recent = log.recent_entries(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].operation, "op_4");
        assert_eq!(recent[2].operation, "op_2");
    }

    #[test]
    fn purge_removes_only_old_records() {
        let log = make_log();
        log.insert(&aged_record("old", 1200)).unwrap();
        log.insert(&aged_record("edge", 999)).unwrap();
        log.insert(&aged_record("fresh", 0)).unwrap();

        let removed = log.purge_older_than(1000).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(log.count().unwrap(), 2);
        assert!(log.entries_for_operation("old").unwrap().is_empty());
        assert_eq!(log.entries_for_operation("edge").unwrap().len(), 1);
    }

    #[test]
    fn purge_with_unrepresentable_age_removes_nothing() {
        let log = make_log();
        log.insert(&aged_record("old", 1200)).unwrap();
        log.insert(&aged_record("fresh", 0)).unwrap();

        assert_eq!(log.purge_older_than(u32::MAX).unwrap(), 0);
        assert_eq!(log.count().unwrap(), 2);
    }

    #[test]
    fn purge_with_nothing_to_remove() {
        let log = make_log();
        log.insert(&aged_record("fresh", 0)).unwrap();
        assert_eq!(log.purge_older_than(1).unwrap(), 0);
        assert_eq!(log.count().unwrap(), 1);
    }

    #[test]
    fn file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.db");

        {
            let log = AuditLog::open(&path).unwrap();
            log.record("Generate OTP", "https://api.example.com/phone/generateOtp", None, None, None, Some(200))
                .unwrap();
        }

        let log = AuditLog::open(&path).unwrap();
        assert_eq!(log.count().unwrap(), 1);
    }

    #[test]
    fn sink_impl_inserts() {
        let log = make_log();
        let record = aged_record("via sink", 0);
        log.record_call(&record).unwrap();
        assert_eq!(log.entries_for_operation("via sink").unwrap()[0].id, record.id);
    }
}
