// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connector configuration.
//
// Settings live in a JSON file and can be overridden per process with
// SIGNZY_* environment variables. The verification client only ever reads
// them; nothing here is mutated after start-up.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignzyError};

/// Retention applied to audit records by the periodic sweep.
pub const DEFAULT_RETENTION_DAYS: u32 = 1000;

pub const ENV_URL: &str = "SIGNZY_URL";
pub const ENV_AUTHORIZATION: &str = "SIGNZY_AUTHORIZATION";
pub const ENV_SITE_URL: &str = "SIGNZY_SITE_URL";
pub const ENV_AUDIT_DB: &str = "SIGNZY_AUDIT_DB";

/// Pre-shared vendor credential. Never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw credential, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Vendor endpoint settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Vendor API base URL; endpoint paths are appended to it.
    pub url: String,
    /// Value sent verbatim in the `Authorization` header.
    pub authorization: Secret,
    /// Public base URL of the host site, used to absolutize uploaded
    /// image paths for Aadhaar OCR.
    pub site_url: Option<String>,
}

impl ConnectorConfig {
    pub fn new(url: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            authorization: Secret::new(authorization),
            site_url: None,
        }
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = Some(site_url.into());
        self
    }

    /// Both the base URL and the credential must be set before any call.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.url.trim().is_empty() || self.authorization.is_blank() {
            return Err(SignzyError::Configuration(
                "Signzy Connector URL or Authorization is not set".into(),
            ));
        }
        Ok(())
    }

    /// Full endpoint URL for a vendor path such as `pan/verify`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Audit trail settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Record every vendor call. When false a no-op sink is used.
    pub enabled: bool,
    /// SQLite database path; defaults to `<data dir>/audit.db`.
    pub database_path: Option<PathBuf>,
    /// Age in days after which the sweep deletes records.
    pub retention_days: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            database_path: None,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

/// Persistent connector settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignzyConfig {
    #[serde(default)]
    pub connector: ConnectorConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

impl SignzyConfig {
    /// Read settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|e| SignzyError::ConfigFile(format!("{}: {e}", path.display())))
    }

    /// Write settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Apply `SIGNZY_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_URL) {
            self.connector.url = url;
        }
        if let Some(auth) = get(ENV_AUTHORIZATION) {
            self.connector.authorization = Secret::new(auth);
        }
        if let Some(site) = get(ENV_SITE_URL) {
            self.connector.site_url = Some(site);
        }
        if let Some(db) = get(ENV_AUDIT_DB) {
            self.audit.database_path = Some(PathBuf::from(db));
        }
        self
    }
}
