// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Signzy connector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::SignzyError;
use crate::human_errors::caller_error;

/// Unique identifier for an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity and asset checks offered by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationKind {
    Aadhaar,
    AadhaarOcr,
    GenerateOtp,
    SubmitOtp,
    DrivingLicense,
    DrivingLicenseDetails,
    Pan,
    Upi,
    BankAccount,
    VehicleRc,
}

impl VerificationKind {
    pub const ALL: [VerificationKind; 10] = [
        Self::Aadhaar,
        Self::AadhaarOcr,
        Self::GenerateOtp,
        Self::SubmitOtp,
        Self::DrivingLicense,
        Self::DrivingLicenseDetails,
        Self::Pan,
        Self::Upi,
        Self::BankAccount,
        Self::VehicleRc,
    ];

    /// Name written to the audit log's operation column.
    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::Aadhaar => "Verify Aadhaar",
            Self::AadhaarOcr => "Verify Aadhaar - OCR",
            Self::GenerateOtp => "Generate OTP",
            Self::SubmitOtp => "Submit OTP",
            Self::DrivingLicense => "Verify Driving License",
            Self::DrivingLicenseDetails => "Verify Driving License Details",
            Self::Pan => "Verify PAN",
            Self::Upi => "Verify UPI",
            Self::BankAccount => "Verify Bank Account",
            Self::VehicleRc => "Verify Vehicle RC",
        }
    }

    /// Endpoint path below the connector base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar/verify",
            Self::AadhaarOcr => "aadhaar/extraction",
            Self::GenerateOtp => "phone/generateOtp",
            Self::SubmitOtp => "phone/getNumberDetails",
            Self::DrivingLicense => "dl_/verification",
            Self::DrivingLicenseDetails => "dl_number/based_search",
            Self::Pan => "pan/verify",
            Self::Upi => "bankAccountVerification/upiVerifications",
            Self::BankAccount => "bankaccountverifications/advancedverification",
            Self::VehicleRc => "vehicle/detailedsearches",
        }
    }
}

impl std::fmt::Display for VerificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.operation_name())
    }
}

/// One outbound vendor call, as stored in the audit log.
///
/// Header and body columns hold normalized text (pretty-printed JSON when
/// the content parsed as JSON, verbatim otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorCallRecord {
    pub id: CallId,
    pub operation: String,
    pub endpoint: String,
    pub request_headers: Option<String>,
    pub request_body: Option<String>,
    pub response_body: Option<String>,
    pub status_code: Option<u16>,
    pub created_at: DateTime<Utc>,
}

/// A successful verification: the vendor body plus per-operation echoes.
#[derive(Debug, Clone, PartialEq)]
pub struct Verified {
    pub kind: VerificationKind,
    /// Vendor JSON, unmodified.
    pub body: Value,
    /// Fields echoed back to the caller next to the vendor body.
    pub echo: Map<String, Value>,
}

impl Verified {
    pub fn new(kind: VerificationKind, body: Value) -> Self {
        Self {
            kind,
            body,
            echo: Map::new(),
        }
    }

    pub fn with_echo(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.echo.insert(key.to_owned(), value.into());
        self
    }

    /// Caller-facing shape: `{"message": <vendor body>, ...echo}`.
    pub fn to_response(&self) -> Value {
        let mut out = Map::with_capacity(self.echo.len() + 1);
        out.insert("message".into(), self.body.clone());
        for (key, value) in &self.echo {
            out.insert(key.clone(), value.clone());
        }
        Value::Object(out)
    }
}

/// Caller-facing result of one verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationOutcome {
    Success {
        response: Value,
    },
    Failure {
        title: String,
        message: String,
        status_code: Option<u16>,
    },
}

impl VerificationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<Verified, SignzyError>> for VerificationOutcome {
    fn from(result: Result<Verified, SignzyError>) -> Self {
        match result {
            Ok(verified) => Self::Success {
                response: verified.to_response(),
            },
            Err(err) => {
                let human = caller_error(&err);
                Self::Failure {
                    title: human.title,
                    message: human.message,
                    status_code: human.status_code,
                }
            }
        }
    }
}
