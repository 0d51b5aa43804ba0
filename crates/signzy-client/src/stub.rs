// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scripted transport for tests and offline runs.
//
// Replies are consumed in order. Every request is kept so callers can check
// what would have gone on the wire.

use std::cell::RefCell;
use std::collections::VecDeque;

use signzy_core::error::{Result, SignzyError};

use crate::transport::{OutboundRequest, VendorResponse, VendorTransport};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum StubReply {
    Respond(VendorResponse),
    Fail(String),
}

/// Transport that never touches the network.
#[derive(Debug, Default)]
pub struct StubTransport {
    replies: RefCell<VecDeque<StubReply>>,
    sent: RefCell<Vec<OutboundRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a vendor answer.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.replies
            .borrow_mut()
            .push_back(StubReply::Respond(VendorResponse::new(status, body)));
        self
    }

    /// Queue a connection-level failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.replies
            .borrow_mut()
            .push_back(StubReply::Fail(message.into()));
        self
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.sent.borrow().clone()
    }
}

impl VendorTransport for StubTransport {
    fn send(&self, request: &OutboundRequest) -> Result<VendorResponse> {
        self.sent.borrow_mut().push(request.clone());
        match self.replies.borrow_mut().pop_front() {
            Some(StubReply::Respond(response)) => Ok(response),
            Some(StubReply::Fail(message)) => Err(SignzyError::Transport {
                message,
                status: None,
            }),
            None => {
                tracing::warn!(url = %request.url, "stub transport has no scripted reply");
                Err(SignzyError::Transport {
                    message: "no scripted reply left".into(),
                    status: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> OutboundRequest {
        OutboundRequest::post_json("https://api.example.com/upi/verify".into(), "k", &json!({}))
            .unwrap()
    }

    #[test]
    fn replies_are_consumed_in_order() {
        let stub = StubTransport::new().respond(200, "{}").fail("reset by peer");

        assert_eq!(stub.send(&request()).unwrap().status, 200);
        assert!(stub.send(&request()).is_err());
        assert_eq!(stub.requests().len(), 2);
    }

    #[test]
    fn empty_script_is_a_transport_error() {
        let err = StubTransport::new().send(&request()).unwrap_err();
        assert!(matches!(err, SignzyError::Transport { status: None, .. }));
    }
}
