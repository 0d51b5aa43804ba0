// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP transport for vendor calls.
//
// One blocking POST per call. No retries, no timeout override beyond the
// reqwest default, no state shared between calls other than the client's
// own connection handling.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use signzy_core::error::{Result, SignzyError};

/// A fully built request, exactly as it goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl OutboundRequest {
    /// JSON POST carrying the pre-shared credential.
    pub fn post_json(url: String, authorization: &str, payload: &Value) -> Result<Self> {
        Ok(Self {
            url,
            headers: vec![
                ("Authorization".to_owned(), authorization.to_owned()),
                ("Content-Type".to_owned(), "application/json".to_owned()),
            ],
            body: serde_json::to_string(payload)?,
        })
    }

    /// Headers as a JSON object, for the audit log.
    pub fn headers_json(&self) -> Value {
        let map: Map<String, Value> = self
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }

    /// Value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw vendor answer: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorResponse {
    pub status: u16,
    pub body: String,
}

impl VendorResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever the vendor answered.
///
/// Any HTTP status is a successful send; only failures to get a response
/// at all are errors (`SignzyError::Transport`).
pub trait VendorTransport {
    fn send(&self, request: &OutboundRequest) -> Result<VendorResponse>;
}

impl<T: VendorTransport + ?Sized> VendorTransport for &T {
    fn send(&self, request: &OutboundRequest) -> Result<VendorResponse> {
        (**self).send(request)
    }
}

/// Blocking `reqwest` transport over rustls.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("signzy-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SignzyError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
            })?;
        Ok(Self { client })
    }
}

impl VendorTransport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    fn send(&self, request: &OutboundRequest) -> Result<VendorResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        debug!(bytes = request.body.len(), "sending vendor request");
        let response = builder
            .body(request.body.clone())
            .send()
            .map_err(|e| SignzyError::Transport {
                message: format!("request to {} failed: {e}", request.url),
                status: None,
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| SignzyError::Transport {
            message: format!("failed to read vendor response: {e}"),
            status: Some(status),
        })?;

        debug!(status, bytes = body.len(), "vendor response received");
        Ok(VendorResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_json_sets_credential_and_content_type() {
        let req = OutboundRequest::post_json(
            "https://api.example.com/pan/verify".into(),
            "live-key",
            &json!({"pan": "ABCDE1234F"}),
        )
        .unwrap();

        assert_eq!(req.header("authorization"), Some("live-key"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.body, r#"{"pan":"ABCDE1234F"}"#);
        assert_eq!(req.headers_json()["Authorization"], "live-key");
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(VendorResponse::new(200, "{}").is_success());
        assert!(VendorResponse::new(204, "").is_success());
        assert!(!VendorResponse::new(302, "").is_success());
        assert!(!VendorResponse::new(422, "{}").is_success());
    }

    #[test]
    fn http_transport_builds() {
        assert!(HttpTransport::new().is_ok());
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        let transport = HttpTransport::new().unwrap();
        // Port 9 on localhost: nothing listens there in CI.
        let req = OutboundRequest::post_json(
            "http://127.0.0.1:9/aadhaar/verify".into(),
            "k",
            &json!({}),
        )
        .unwrap();

        let err = transport.send(&req).unwrap_err();
        assert!(matches!(err, SignzyError::Transport { status: None, .. }));
    }
}
