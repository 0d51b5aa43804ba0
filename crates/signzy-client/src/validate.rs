// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input validation applied before any vendor call.
//
// Rules are deliberately minimal: the vendor does the real checking. Every
// failure here is `SignzyError::InvalidInput` and happens before I/O.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use url::Url;

use signzy_core::error::{Result, SignzyError};

/// Twelve digits, the first one 2-9.
static AADHAAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[2-9][0-9]{11}$").expect("aadhaar pattern compiles"));

/// Date format the vendor expects.
const VENDOR_DATE_FORMAT: &str = "%d/%m/%Y";

/// Accept a well-formed Aadhaar number. No trimming is applied.
pub fn aadhaar_number(value: &str) -> Result<&str> {
    if AADHAAR_PATTERN.is_match(value) {
        Ok(value)
    } else {
        Err(SignzyError::InvalidInput("Aadhaar Number is not valid".into()))
    }
}

/// A parameter that must carry a non-blank value. Returns it trimmed.
pub fn required<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SignzyError::InvalidInput(format!("{name} is required")));
    }
    Ok(trimmed)
}

/// An optional parameter: blank counts as absent.
pub fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Normalize a date to `DD/MM/YYYY`.
///
/// Accepts ISO dates, ISO/RFC 3339 timestamps (the date part is used) and
/// dates already in the vendor format.
pub fn vendor_date(name: &str, value: &str) -> Result<String> {
    let value = required(name, value)?;
    parse_date(value)
        .map(|d| d.format(VENDOR_DATE_FORMAT).to_string())
        .ok_or_else(|| SignzyError::InvalidInput(format!("{name} is not a valid date: {value}")))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, VENDOR_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|ts| ts.date())
}

/// Resolve an uploaded file reference to an absolute `http(s)` URL.
///
/// Host file fields hold site-relative paths such as `/files/front.jpg`;
/// the vendor needs something it can fetch. Relative paths are appended to
/// the site URL as-is, so a site served under a sub-path keeps its prefix.
pub fn absolute_url(name: &str, value: &str, site_url: Option<&str>) -> Result<String> {
    let value = required(name, value)?;

    match Url::parse(value) {
        Ok(url) => http_only(name, url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let site = optional(site_url).ok_or_else(|| {
                SignzyError::InvalidInput(format!(
                    "{name} is a relative path and no site URL is configured"
                ))
            })?;
            Url::parse(site).map_err(|e| {
                SignzyError::Configuration(format!("site URL '{site}' is invalid: {e}"))
            })?;

            let joined = format!(
                "{}/{}",
                site.trim_end_matches('/'),
                value.trim_start_matches('/')
            );
            let url = Url::parse(&joined)
                .map_err(|e| SignzyError::InvalidInput(format!("{name} is not a valid path: {e}")))?;
            http_only(name, url)
        }
        Err(e) => Err(SignzyError::InvalidInput(format!("{name} is not a valid URL: {e}"))),
    }
}

fn http_only(name: &str, url: Url) -> Result<String> {
    if matches!(url.scheme(), "http" | "https") {
        Ok(url.into())
    } else {
        Err(SignzyError::InvalidInput(format!(
            "{name} must be an http(s) URL, got scheme '{}'",
            url.scheme()
        )))
    }
}
