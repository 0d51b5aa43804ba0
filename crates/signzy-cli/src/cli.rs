// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use signzy_client::{BankAccountParams, VerificationRequest};
use signzy_core::fields::Entity;

#[derive(Parser, Debug)]
#[command(name = "signzy", version, about = "Signzy KYC verification and audit log")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "SIGNZY_CONFIG",
        help = "Config file (default: <data dir>/config.json when present)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify an Aadhaar number.
    Aadhaar { aadhaar_no: String },
    /// Extract Aadhaar details from card images.
    AadhaarOcr {
        #[arg(long)]
        front_url: String,
        #[arg(long)]
        back_url: String,
    },
    /// Send a verification OTP to a mobile number.
    GenerateOtp {
        #[arg(long, default_value = "91")]
        country_code: String,
        #[arg(long)]
        mobile_no: String,
    },
    /// Confirm an OTP with the reference id from `generate-otp`.
    SubmitOtp {
        #[arg(long, default_value = "91")]
        country_code: String,
        #[arg(long)]
        mobile_no: String,
        #[arg(long)]
        reference_id: String,
        #[arg(long)]
        otp: String,
    },
    /// Verify a driving license.
    DlVerify {
        #[arg(long)]
        dl_number: String,
        #[arg(long)]
        dob: String,
        #[arg(long)]
        issue_date: String,
    },
    /// Fetch driving license details.
    DlExtract {
        #[arg(long)]
        dl_number: String,
        #[arg(long)]
        dob: String,
    },
    Pan {
        #[arg(long)]
        pan: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        dob: String,
    },
    Upi {
        #[arg(long)]
        vpa: String,
        #[arg(long)]
        name: String,
    },
    BankAccount {
        #[arg(long)]
        acc_no: String,
        #[arg(long)]
        ifsc_code: String,
        #[arg(long)]
        mobile_no: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Vehicle registration certificate search.
    Rc { vehicle_no: String },
    /// Run a request given as tagged JSON (`-` reads stdin).
    Execute {
        #[arg(long)]
        json: String,
    },
    Audit {
        #[command(subcommand)]
        command: AuditCommands,
    },
    /// Print the verification fields to inject into host entities.
    Fields {
        #[arg(long, value_parser = parse_entity)]
        entity: Option<Entity>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuditCommands {
    /// Show the most recent vendor calls.
    Recent {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Delete records older than the retention period.
    Purge {
        #[arg(long, help = "Age in days (default: configured retention)")]
        days: Option<u32>,
    },
}

impl Commands {
    /// The verification a subcommand stands for, if any. `execute` is
    /// resolved separately because its input has to be read and parsed.
    pub fn verification(&self) -> Option<VerificationRequest> {
        let request = match self {
            Self::Aadhaar { aadhaar_no } => VerificationRequest::Aadhaar {
                aadhaar_no: aadhaar_no.clone(),
            },
            Self::AadhaarOcr {
                front_url,
                back_url,
            } => VerificationRequest::AadhaarOcr {
                front_url: front_url.clone(),
                back_url: back_url.clone(),
            },
            Self::GenerateOtp {
                country_code,
                mobile_no,
            } => VerificationRequest::GenerateOtp {
                country_code: country_code.clone(),
                mobile_no: mobile_no.clone(),
            },
            Self::SubmitOtp {
                country_code,
                mobile_no,
                reference_id,
                otp,
            } => VerificationRequest::SubmitOtp {
                country_code: country_code.clone(),
                mobile_no: mobile_no.clone(),
                reference_id: reference_id.clone(),
                otp: otp.clone(),
            },
            Self::DlVerify {
                dl_number,
                dob,
                issue_date,
            } => VerificationRequest::DrivingLicense {
                dl_number: dl_number.clone(),
                dob: dob.clone(),
                issue_date: issue_date.clone(),
            },
            Self::DlExtract { dl_number, dob } => VerificationRequest::DrivingLicenseDetails {
                dl_number: dl_number.clone(),
                dob: dob.clone(),
            },
            Self::Pan { pan, name, dob } => VerificationRequest::Pan {
                pan: pan.clone(),
                name: name.clone(),
                dob: dob.clone(),
            },
            Self::Upi { vpa, name } => VerificationRequest::Upi {
                vpa: vpa.clone(),
                name: name.clone(),
            },
            Self::BankAccount {
                acc_no,
                ifsc_code,
                mobile_no,
                name,
                email,
            } => VerificationRequest::BankAccount(BankAccountParams {
                acc_no: acc_no.clone(),
                ifsc_code: ifsc_code.clone(),
                mobile_no: mobile_no.clone(),
                name: name.clone(),
                email: email.clone(),
            }),
            Self::Rc { vehicle_no } => VerificationRequest::VehicleRc {
                vehicle_no: vehicle_no.clone(),
            },
            Self::Execute { .. } | Self::Audit { .. } | Self::Fields { .. } => return None,
        };
        Some(request)
    }
}

fn parse_entity(value: &str) -> Result<Entity, String> {
    Entity::from_name(value).ok_or_else(|| {
        format!("unknown entity '{value}' (expected bank-account, driver or employee)")
    })
}
