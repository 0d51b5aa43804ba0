// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for payload building and response mapping in the
// signzy-client crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use signzy_client::{
    BankAccountParams, StubTransport, VendorResponse, VerificationClient, VerificationRequest,
    map_response,
};
use signzy_core::config::ConnectorConfig;
use signzy_core::types::VerificationKind;
use signzy_audit::NoopSink;

fn config() -> ConnectorConfig {
    ConnectorConfig::new("https://api.example.com", "bench-key")
        .with_site_url("https://erp.example.com")
}

/// Validation plus JSON body construction, no I/O.
fn bench_payload(c: &mut Criterion) {
    let config = config();
    let requests = [
        VerificationRequest::Aadhaar {
            aadhaar_no: "234567898123".into(),
        },
        VerificationRequest::Pan {
            pan: "ABCDE1234F".into(),
            name: "Asha Rao".into(),
            dob: "1990-07-04".into(),
        },
        VerificationRequest::AadhaarOcr {
            front_url: "/files/front.jpg".into(),
            back_url: "/files/back.jpg".into(),
        },
        VerificationRequest::BankAccount(BankAccountParams {
            acc_no: "50100012345678".into(),
            ifsc_code: "HDFC0000123".into(),
            mobile_no: "9876543210".into(),
            name: "Asha Rao".into(),
            email: Some("asha@example.com".into()),
        }),
    ];

    let mut group = c.benchmark_group("payload");
    for request in &requests {
        group.bench_function(request.kind().to_string(), |b| {
            b.iter(|| black_box(request.payload(black_box(&config)).expect("valid payload")));
        });
    }
    group.finish();
}

fn bench_map_response(c: &mut Criterion) {
    let ok = json!({"result": {"verified": true, "name": "ASHA RAO"}}).to_string();
    let rejected = json!({"error": {"message": "Invalid account", "status": 422}}).to_string();

    c.bench_function("map_response (2xx)", |b| {
        b.iter(|| black_box(map_response(VerificationKind::Pan, VendorResponse::new(200, ok.clone()))));
    });
    c.bench_function("map_response (422)", |b| {
        b.iter(|| {
            black_box(map_response(
                VerificationKind::BankAccount,
                VendorResponse::new(422, rejected.clone()),
            ))
        });
    });
}

/// Whole `execute` path against a scripted transport.
fn bench_execute(c: &mut Criterion) {
    let request = VerificationRequest::Upi {
        vpa: "asha@okhdfc".into(),
        name: "Asha Rao".into(),
    };

    c.bench_function("execute (stub transport)", |b| {
        b.iter_batched(
            || {
                let transport = StubTransport::new().respond(200, r#"{"result":{"isValid":true}}"#);
                VerificationClient::new(config(), transport, NoopSink)
            },
            |client| black_box(client.execute(&request)),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_payload, bench_map_response, bench_execute);
criterion_main!(benches);
