// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Credential redaction: SHA-256 fingerprints in place of secrets.
//
// Stored request headers keep the Authorization key so the record shows a
// credential was sent, but the value is replaced with a short digest. Two
// records made with the same credential carry the same fingerprint.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

pub const REDACTED_PREFIX: &str = "redacted:sha256:";

/// Number of hex characters kept from the digest.
const FINGERPRINT_LEN: usize = 12;

/// Header names whose values are never stored verbatim.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "x-api-key"];

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Short, stable stand-in for a secret value.
pub fn fingerprint(secret: &str) -> String {
    let digest = hash_bytes(secret.as_bytes());
    format!("{REDACTED_PREFIX}{}", &digest[..FINGERPRINT_LEN])
}

/// Replace sensitive header values in place. Matching is case-insensitive.
pub fn redact_headers(headers: &mut Map<String, Value>) {
    for (name, value) in headers.iter_mut() {
        if !SENSITIVE_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
            continue;
        }
        let redacted = match &*value {
            Value::String(s) if s.starts_with(REDACTED_PREFIX) => continue,
            Value::String(s) => fingerprint(s),
            other => fingerprint(&other.to_string()),
        };
        *value = Value::String(redacted);
    }
}
