// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signzy Client: request validation, vendor HTTP calls, response mapping and
// audit logging for the ten KYC verification operations.

pub mod client;
pub mod request;
pub mod stub;
pub mod transport;
pub mod validate;

pub use client::{VerificationClient, extract_error_message, map_response};
pub use request::{BankAccountParams, VerificationRequest};
pub use stub::StubTransport;
pub use transport::{HttpTransport, OutboundRequest, VendorResponse, VendorTransport};
