// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Normalization of headers and bodies before they reach the audit table.

use chrono::{SubsecRound, Utc};
use serde_json::Value;

use signzy_core::types::{CallId, VendorCallRecord};

use crate::redact::redact_headers;

/// A header map, request payload or response body handed to the log.
#[derive(Debug, Clone, PartialEq)]
pub enum LogBody {
    /// Already-structured data; stored pretty-printed.
    Json(Value),
    /// Raw text; re-encoded if it parses as JSON, kept verbatim otherwise.
    Text(String),
}

impl From<Value> for LogBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for LogBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for LogBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl LogBody {
    /// Decode text content to JSON when possible.
    fn into_value(self) -> Result<Value, String> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(text) => serde_json::from_str(&text).map_err(|_| text),
        }
    }
}

/// Text stored for a body. Empty text and JSON `null` store nothing.
pub fn normalize(body: LogBody) -> Option<String> {
    if let LogBody::Text(ref text) = body
        && text.trim().is_empty()
    {
        return None;
    }
    match body.into_value() {
        Ok(Value::Null) => None,
        Ok(value) => Some(pretty(&value)),
        Err(verbatim) => Some(verbatim),
    }
}

/// Like [`normalize`], with sensitive header values fingerprinted first.
pub fn normalize_headers(headers: LogBody) -> Option<String> {
    if let LogBody::Text(ref text) = headers
        && text.trim().is_empty()
    {
        return None;
    }
    match headers.into_value() {
        Ok(Value::Object(mut map)) => {
            redact_headers(&mut map);
            Some(pretty(&Value::Object(map)))
        }
        Ok(Value::Null) => None,
        Ok(other) => Some(pretty(&other)),
        Err(verbatim) => Some(verbatim),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Build an immutable audit record stamped with the current time.
///
/// The timestamp is truncated to the microsecond precision the table stores.
pub fn build_record(
    operation: &str,
    endpoint: &str,
    request_headers: Option<LogBody>,
    request_body: Option<LogBody>,
    response_body: Option<LogBody>,
    status_code: Option<u16>,
) -> VendorCallRecord {
    VendorCallRecord {
        id: CallId::new(),
        operation: operation.to_owned(),
        endpoint: endpoint.to_owned(),
        request_headers: request_headers.and_then(normalize_headers),
        request_body: request_body.and_then(normalize),
        response_body: response_body.and_then(normalize),
        status_code,
        created_at: Utc::now().trunc_subsecs(6),
    }
}
