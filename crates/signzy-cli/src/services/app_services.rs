// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: loads configuration, opens the audit log and runs
// verifications on behalf of the command handlers.

use std::path::{Path, PathBuf};

use signzy_audit::{AuditLog, AuditSink, NoopSink};
use signzy_client::{HttpTransport, VendorTransport, VerificationClient, VerificationRequest};
use signzy_core::error::{Result, SignzyError};
use signzy_core::types::{VendorCallRecord, VerificationOutcome, Verified};
use signzy_core::SignzyConfig;
use tracing::{info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";
const AUDIT_DB_FILE: &str = "audit.db";

/// Everything a command needs, initialised once per process.
pub struct AppServices {
    config: SignzyConfig,
    audit_log: Option<AuditLog>,
}

impl AppServices {
    /// Load configuration (file, then environment) and open the audit log.
    pub fn init(config_path: Option<&Path>) -> Result<Self> {
        let dir = data_dir::data_dir()?;
        info!(path = %dir.display(), "initialising services");

        let config = load_config(config_path, &dir)?.with_env_overrides();
        Self::with_config(config, &dir)
    }

    /// Build services from an already-resolved configuration.
    pub fn with_config(config: SignzyConfig, data_dir: &Path) -> Result<Self> {
        let audit_log = if config.audit.enabled {
            let path = audit_db_path(&config, data_dir);
            Some(AuditLog::open(&path)?)
        } else {
            warn!("audit log disabled, vendor calls will not be recorded");
            None
        };

        Ok(Self { config, audit_log })
    }

    pub fn config(&self) -> &SignzyConfig {
        &self.config
    }

    /// Run one verification over HTTP.
    pub fn verify(&self, request: &VerificationRequest) -> VerificationOutcome {
        match HttpTransport::new() {
            Ok(transport) => self.verify_with(transport, request),
            Err(e) => VerificationOutcome::from(Err::<Verified, _>(e)),
        }
    }

    /// Run one verification over the given transport.
    pub fn verify_with<T: VendorTransport>(
        &self,
        transport: T,
        request: &VerificationRequest,
    ) -> VerificationOutcome {
        let client = VerificationClient::new(self.config.connector.clone(), transport, self.sink());
        client.execute(request).into()
    }

    /// Most recent audit records, newest first.
    pub fn recent_audit_entries(&self, limit: u32) -> Result<Vec<VendorCallRecord>> {
        self.audit()?.recent_entries(limit)
    }

    /// Delete audit records older than `days`, or the configured retention.
    pub fn purge_audit(&self, days: Option<u32>) -> Result<usize> {
        let days = days.unwrap_or(self.config.audit.retention_days);
        self.audit()?.purge_older_than(days)
    }

    fn audit(&self) -> Result<&AuditLog> {
        self.audit_log
            .as_ref()
            .ok_or_else(|| SignzyError::Configuration("audit log is disabled".into()))
    }

    fn sink(&self) -> Box<dyn AuditSink + '_> {
        match &self.audit_log {
            Some(log) => Box::new(log),
            None => Box::new(NoopSink),
        }
    }
}

fn audit_db_path(config: &SignzyConfig, data_dir: &Path) -> PathBuf {
    config
        .audit
        .database_path
        .clone()
        .unwrap_or_else(|| data_dir.join(AUDIT_DB_FILE))
}

/// An explicit path must exist; the default location is optional.
fn load_config(explicit: Option<&Path>, data_dir: &Path) -> Result<SignzyConfig> {
    if let Some(path) = explicit {
        return SignzyConfig::load(path);
    }

    let path = data_dir.join(CONFIG_FILE);
    if path.exists() {
        SignzyConfig::load(&path)
    } else {
        info!(path = %path.display(), "no config file, using defaults");
        Ok(SignzyConfig::default())
    }
}
