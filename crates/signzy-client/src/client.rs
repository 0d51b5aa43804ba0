// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Verification client for the Signzy KYC API.
//
// Every operation runs through `execute`:
//   1. connector settings present        (else Configuration, no I/O)
//   2. parameters valid, payload built   (else InvalidInput, no I/O)
//   3. one POST to {url}/{path}
//   4. one audit record, whatever happened on the wire
//   5. 2xx -> vendor JSON untouched; otherwise the vendor's error message

use serde_json::Value;
use tracing::{error, info, instrument, warn};

use signzy_audit::{AuditSink, LogBody, build_record};
use signzy_core::config::ConnectorConfig;
use signzy_core::error::{Result, SignzyError};
use signzy_core::human_errors::UNKNOWN_ERROR;
use signzy_core::types::{VerificationKind, Verified};

use crate::request::{BankAccountParams, VerificationRequest};
use crate::transport::{OutboundRequest, VendorResponse, VendorTransport};

/// Stateless client: configuration is read-only, nothing is kept between
/// calls.
pub struct VerificationClient<T, A> {
    config: ConnectorConfig,
    transport: T,
    audit: A,
}

impl<T: VendorTransport, A: AuditSink> VerificationClient<T, A> {
    pub fn new(config: ConnectorConfig, transport: T, audit: A) -> Self {
        Self {
            config,
            transport,
            audit,
        }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Run one verification end to end.
    #[instrument(skip(self, request), fields(kind = %request.kind()))]
    pub fn execute(&self, request: &VerificationRequest) -> Result<Verified> {
        self.config.ensure_ready()?;

        let kind = request.kind();
        let payload = request.payload(&self.config)?;
        let outbound = OutboundRequest::post_json(
            self.config.endpoint(kind.path()),
            self.config.authorization.expose(),
            &payload,
        )?;

        let sent = self.transport.send(&outbound);
        self.audit_call(kind, &outbound, &sent);

        let verified = map_response(kind, sent?)?;
        info!("verification succeeded");
        Ok(request.decorate(verified))
    }

    /// Write the audit record. Failures are logged and swallowed so the
    /// caller always sees the real verification result.
    fn audit_call(
        &self,
        kind: VerificationKind,
        outbound: &OutboundRequest,
        sent: &Result<VendorResponse>,
    ) {
        let (response_body, status_code) = match sent {
            Ok(response) => (Some(LogBody::Text(response.body.clone())), Some(response.status)),
            Err(e) => (None, e.status_code()),
        };

        let record = build_record(
            kind.operation_name(),
            &outbound.url,
            Some(LogBody::Json(outbound.headers_json())),
            Some(LogBody::Text(outbound.body.clone())),
            response_body,
            status_code,
        );

        if let Err(e) = self.audit.record_call(&record) {
            warn!(error = %e, operation = kind.operation_name(), "audit write failed");
        }
    }

    pub fn verify_aadhaar(&self, aadhaar_no: &str) -> Result<Verified> {
        self.execute(&VerificationRequest::Aadhaar {
            aadhaar_no: aadhaar_no.to_owned(),
        })
    }

    /// `front_url` and `back_url` may be site-relative upload paths.
    pub fn verify_aadhaar_ocr(&self, front_url: &str, back_url: &str) -> Result<Verified> {
        self.execute(&VerificationRequest::AadhaarOcr {
            front_url: front_url.to_owned(),
            back_url: back_url.to_owned(),
        })
    }

    /// Starts mobile verification. The response carries the reference id
    /// the caller must pass to [`Self::submit_otp`].
    pub fn generate_otp(&self, country_code: &str, mobile_no: &str) -> Result<Verified> {
        self.execute(&VerificationRequest::GenerateOtp {
            country_code: country_code.to_owned(),
            mobile_no: mobile_no.to_owned(),
        })
    }

    pub fn submit_otp(
        &self,
        country_code: &str,
        mobile_no: &str,
        reference_id: &str,
        otp: &str,
    ) -> Result<Verified> {
        self.execute(&VerificationRequest::SubmitOtp {
            country_code: country_code.to_owned(),
            mobile_no: mobile_no.to_owned(),
            reference_id: reference_id.to_owned(),
            otp: otp.to_owned(),
        })
    }

    pub fn verify_dl(&self, dl_number: &str, dob: &str, issue_date: &str) -> Result<Verified> {
        self.execute(&VerificationRequest::DrivingLicense {
            dl_number: dl_number.to_owned(),
            dob: dob.to_owned(),
            issue_date: issue_date.to_owned(),
        })
    }

    pub fn extract_dl(&self, dl_number: &str, dob: &str) -> Result<Verified> {
        self.execute(&VerificationRequest::DrivingLicenseDetails {
            dl_number: dl_number.to_owned(),
            dob: dob.to_owned(),
        })
    }

    pub fn verify_pan(&self, pan: &str, name: &str, dob: &str) -> Result<Verified> {
        self.execute(&VerificationRequest::Pan {
            pan: pan.to_owned(),
            name: name.to_owned(),
            dob: dob.to_owned(),
        })
    }

    pub fn verify_upi(&self, vpa: &str, name: &str) -> Result<Verified> {
        self.execute(&VerificationRequest::Upi {
            vpa: vpa.to_owned(),
            name: name.to_owned(),
        })
    }

    pub fn verify_bank_acc(&self, params: &BankAccountParams) -> Result<Verified> {
        self.execute(&VerificationRequest::BankAccount(params.clone()))
    }

    pub fn verify_rc(&self, vehicle_no: &str) -> Result<Verified> {
        self.execute(&VerificationRequest::VehicleRc {
            vehicle_no: vehicle_no.to_owned(),
        })
    }
}

/// Turn a raw vendor answer into a result.
pub fn map_response(kind: VerificationKind, response: VendorResponse) -> Result<Verified> {
    let status = response.status;
    let parsed: std::result::Result<Value, _> = serde_json::from_str(&response.body);

    if response.is_success() {
        return match parsed {
            Ok(body) => Ok(Verified::new(kind, body)),
            Err(e) => {
                error!(status, "vendor returned a malformed JSON body");
                Err(SignzyError::Transport {
                    message: format!("malformed JSON response from vendor: {e}"),
                    status: Some(status),
                })
            }
        };
    }

    match parsed {
        Ok(body) => {
            let message = extract_error_message(&body);
            error!(status, %message, "vendor rejected the request");
            Err(SignzyError::Vendor { message, status })
        }
        Err(_) => {
            error!(status, "vendor error with a non-JSON body");
            Err(SignzyError::Transport {
                message: format!("vendor returned HTTP {status} with a non-JSON body"),
                status: Some(status),
            })
        }
    }
}

/// `error.message`, else top-level `message`, else "Unknown error".
pub fn extract_error_message(body: &Value) -> String {
    let present = |v: &&Value| !v.is_null();
    body.pointer("/error/message")
        .filter(present)
        .or_else(|| body.get("message").filter(present))
        .map(|m| match m {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| UNKNOWN_ERROR.to_owned())
}
