// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for body normalization and audit inserts in the
// signzy-audit crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use signzy_audit::{AuditLog, LogBody, normalize};

/// A vendor response roughly the size of a detailed vehicle RC search.
fn sample_response() -> String {
    let owners: Vec<_> = (0..40)
        .map(|i| json!({"name": format!("Owner {i}"), "address": "12 MG Road, Bengaluru", "serial": i}))
        .collect();
    json!({"result": {"owners": owners, "blacklisted": false}}).to_string()
}

/// Re-encoding raw response text as pretty JSON versus storing it verbatim.
fn bench_normalize(c: &mut Criterion) {
    let response = sample_response();
    let html = "<html><body>502 Bad Gateway</body></html>".repeat(50);

    let mut group = c.benchmark_group("normalize_body");
    group.bench_function("json text", |b| {
        b.iter(|| black_box(normalize(LogBody::Text(black_box(response.clone())))));
    });
    group.bench_function("non-json text", |b| {
        b.iter(|| black_box(normalize(LogBody::Text(black_box(html.clone())))));
    });
    group.finish();
}

/// One full record (headers, payload, response) into an in-memory database.
fn bench_record(c: &mut Criterion) {
    let log = AuditLog::open_in_memory().expect("open in-memory audit log");
    let response = sample_response();

    c.bench_function("audit_record (in-memory)", |b| {
        b.iter(|| {
            log.record(
                "Verify Vehicle RC",
                "https://api.example.com/vehicle/detailedsearches",
                Some(json!({"Authorization": "bench-key", "Content-Type": "application/json"}).into()),
                Some(json!({"vehicleNumber": "KA01AB1234"}).into()),
                Some(LogBody::Text(response.clone())),
                Some(200),
            )
            .expect("record failed");
        });
    });
}

criterion_group!(benches, bench_normalize, bench_record);
criterion_main!(benches);
