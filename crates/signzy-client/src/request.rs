// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed verification requests and their vendor payloads.
//
// Each variant carries the caller's named parameters. `payload` validates
// them and produces the JSON body with the vendor's field names; `decorate`
// adds the per-operation echo fields to a successful result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use signzy_core::config::ConnectorConfig;
use signzy_core::error::Result;
use signzy_core::types::{VerificationKind, Verified};

use crate::validate;

/// Parameters for a bank account check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountParams {
    pub acc_no: String,
    pub ifsc_code: String,
    pub mobile_no: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One verification, with the caller's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerificationRequest {
    Aadhaar {
        aadhaar_no: String,
    },
    AadhaarOcr {
        front_url: String,
        back_url: String,
    },
    GenerateOtp {
        country_code: String,
        mobile_no: String,
    },
    /// `reference_id` comes from the `GenerateOtp` response; the client keeps
    /// no state between the two calls.
    SubmitOtp {
        country_code: String,
        mobile_no: String,
        reference_id: String,
        otp: String,
    },
    DrivingLicense {
        dl_number: String,
        dob: String,
        issue_date: String,
    },
    DrivingLicenseDetails {
        dl_number: String,
        dob: String,
    },
    Pan {
        pan: String,
        name: String,
        dob: String,
    },
    Upi {
        vpa: String,
        name: String,
    },
    BankAccount(BankAccountParams),
    VehicleRc {
        vehicle_no: String,
    },
}

impl VerificationRequest {
    pub fn kind(&self) -> VerificationKind {
        match self {
            Self::Aadhaar { .. } => VerificationKind::Aadhaar,
            Self::AadhaarOcr { .. } => VerificationKind::AadhaarOcr,
            Self::GenerateOtp { .. } => VerificationKind::GenerateOtp,
            Self::SubmitOtp { .. } => VerificationKind::SubmitOtp,
            Self::DrivingLicense { .. } => VerificationKind::DrivingLicense,
            Self::DrivingLicenseDetails { .. } => VerificationKind::DrivingLicenseDetails,
            Self::Pan { .. } => VerificationKind::Pan,
            Self::Upi { .. } => VerificationKind::Upi,
            Self::BankAccount(_) => VerificationKind::BankAccount,
            Self::VehicleRc { .. } => VerificationKind::VehicleRc,
        }
    }

    /// Validate the parameters and build the vendor JSON body.
    pub fn payload(&self, config: &ConnectorConfig) -> Result<Value> {
        let body = match self {
            Self::Aadhaar { aadhaar_no } => json!({
                "uid": validate::aadhaar_number(aadhaar_no)?,
            }),

            Self::AadhaarOcr {
                front_url,
                back_url,
            } => {
                let site = config.site_url.as_deref();
                json!({
                    "files": [
                        validate::absolute_url("front_url", front_url, site)?,
                        validate::absolute_url("back_url", back_url, site)?,
                    ],
                })
            }

            Self::GenerateOtp {
                country_code,
                mobile_no,
            } => json!({
                "countryCode": validate::required("country_code", country_code)?,
                "mobileNumber": validate::required("mobile_no", mobile_no)?,
            }),

            Self::SubmitOtp {
                country_code,
                mobile_no,
                reference_id,
                otp,
            } => json!({
                "countryCode": validate::required("country_code", country_code)?,
                "mobileNumber": validate::required("mobile_no", mobile_no)?,
                "referenceId": validate::required("reference_id", reference_id)?,
                "otp": validate::required("otp", otp)?,
                "extraFields": false,
            }),

            Self::DrivingLicense {
                dl_number,
                dob,
                issue_date,
            } => json!({
                "number": validate::required("dl_number", dl_number)?,
                "dob": validate::vendor_date("dob", dob)?,
                "issueDate": validate::vendor_date("issue_date", issue_date)?,
            }),

            Self::DrivingLicenseDetails { dl_number, dob } => json!({
                "number": validate::required("dl_number", dl_number)?,
                "dob": validate::vendor_date("dob", dob)?,
            }),

            Self::Pan { pan, name, dob } => json!({
                "pan": validate::required("pan", pan)?,
                "name": validate::required("name", name)?,
                "dob": validate::vendor_date("dob", dob)?,
            }),

            Self::Upi { vpa, name } => json!({
                "vpa": validate::required("vpa", vpa)?,
                "name": validate::required("name", name)?,
                "fuzzy": false,
            }),

            Self::BankAccount(params) => bank_account_payload(params)?,

            Self::VehicleRc { vehicle_no } => json!({
                "vehicleNumber": validate::required("vehicle_no", vehicle_no)?,
                "blacklistCheck": "true",
                "splitAddress": "true",
            }),
        };
        Ok(body)
    }

    /// Add operation-specific echo fields to a successful result. Echoed
    /// values match what was transmitted.
    pub fn decorate(&self, verified: Verified) -> Verified {
        match self {
            Self::GenerateOtp {
                country_code,
                mobile_no,
            } => verified
                .with_echo("generated_otp", true)
                .with_echo("mobile_no", mobile_no.trim())
                .with_echo("country_code", country_code.trim()),
            _ => verified,
        }
    }
}

/// `email` is only present when the caller supplied one.
fn bank_account_payload(params: &BankAccountParams) -> Result<Value> {
    let mut body = Map::new();
    body.insert(
        "beneficiaryAccount".into(),
        validate::required("acc_no", &params.acc_no)?.into(),
    );
    body.insert(
        "beneficiaryIFSC".into(),
        validate::required("ifsc_code", &params.ifsc_code)?.into(),
    );
    body.insert(
        "beneficiaryMobile".into(),
        validate::required("mobile_no", &params.mobile_no)?.into(),
    );
    body.insert(
        "beneficiaryName".into(),
        validate::required("name", &params.name)?.into(),
    );
    if let Some(email) = validate::optional(params.email.as_deref()) {
        body.insert("email".into(), email.into());
    }
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use signzy_core::error::SignzyError;

    fn config() -> ConnectorConfig {
        ConnectorConfig::new("https://api.example.com", "k").with_site_url("https://erp.example.com")
    }

    fn bank(email: Option<&str>) -> VerificationRequest {
        VerificationRequest::BankAccount(BankAccountParams {
            acc_no: "50100012345678".into(),
            ifsc_code: "HDFC0000123".into(),
            mobile_no: "9876543210".into(),
            name: "Asha Rao".into(),
            email: email.map(str::to_owned),
        })
    }

    #[test]
    fn bank_account_maps_to_beneficiary_fields() {
        let body = bank(Some("asha@example.com")).payload(&config()).unwrap();
        assert_eq!(
            body,
            json!({
                "beneficiaryAccount": "50100012345678",
                "beneficiaryIFSC": "HDFC0000123",
                "beneficiaryMobile": "9876543210",
                "beneficiaryName": "Asha Rao",
                "email": "asha@example.com",
            })
        );
    }

    #[test]
    fn missing_email_is_omitted() {
        for email in [None, Some(""), Some("   ")] {
            let body = bank(email).payload(&config()).unwrap();
            assert!(body.get("email").is_none(), "{email:?}");
        }
    }

    #[test]
    fn dates_are_sent_as_dd_mm_yyyy() {
        let req = VerificationRequest::DrivingLicense {
            dl_number: "KA0120190001234".into(),
            dob: "1990-07-04".into(),
            issue_date: "2024-01-15".into(),
        };
        let body = req.payload(&config()).unwrap();
        assert_eq!(body["dob"], "04/07/1990");
        assert_eq!(body["issueDate"], "15/01/2024");
    }

    #[test]
    fn upi_always_sends_fuzzy_false() {
        let req = VerificationRequest::Upi {
            vpa: "asha@okhdfc".into(),
            name: "Asha Rao".into(),
        };
        assert_eq!(req.payload(&config()).unwrap()["fuzzy"], json!(false));
    }

    #[test]
    fn ocr_files_are_absolute() {
        let req = VerificationRequest::AadhaarOcr {
            front_url: "/files/front.jpg".into(),
            back_url: "https://cdn.example.com/back.jpg".into(),
        };
        let body = req.payload(&config()).unwrap();
        assert_eq!(
            body["files"],
            json!(["https://erp.example.com/files/front.jpg", "https://cdn.example.com/back.jpg"])
        );
    }

    #[test]
    fn submit_otp_requires_reference_id() {
        let req = VerificationRequest::SubmitOtp {
            country_code: "91".into(),
            mobile_no: "9876543210".into(),
            reference_id: "".into(),
            otp: "123456".into(),
        };
        let err = req.payload(&config()).unwrap_err();
        assert!(matches!(err, SignzyError::InvalidInput(ref m) if m.contains("reference_id")));
    }

    #[test]
    fn echo_matches_transmitted_values() {
        let otp = VerificationRequest::GenerateOtp {
            country_code: " 91 ".into(),
            mobile_no: "9876543210  ".into(),
        };
        let body = otp.payload(&config()).unwrap();
        let verified = otp.decorate(Verified::new(VerificationKind::GenerateOtp, json!({})));

        assert_eq!(verified.echo["mobile_no"], body["mobileNumber"]);
        assert_eq!(verified.echo["country_code"], body["countryCode"]);
        assert_eq!(verified.echo["mobile_no"], "9876543210");
    }

    #[test]
    fn only_generate_otp_echoes() {
        let otp = VerificationRequest::GenerateOtp {
            country_code: "91".into(),
            mobile_no: "9876543210".into(),
        };
        let verified = otp.decorate(Verified::new(VerificationKind::GenerateOtp, json!({})));
        assert_eq!(verified.echo.len(), 3);

        let pan = VerificationRequest::Pan {
            pan: "ABCDE1234F".into(),
            name: "Asha Rao".into(),
            dob: "1990-07-04".into(),
        };
        let verified = pan.decorate(Verified::new(VerificationKind::Pan, json!({})));
        assert!(verified.echo.is_empty());
    }

    #[test]
    fn requests_deserialize_from_tagged_json() {
        let req: VerificationRequest = serde_json::from_value(json!({
            "kind": "bank_account",
            "acc_no": "1",
            "ifsc_code": "HDFC0000123",
            "mobile_no": "9876543210",
            "name": "Asha Rao",
        }))
        .unwrap();
        assert_eq!(req.kind(), VerificationKind::BankAccount);
    }
}
