//! Benchmark for HTML parsing and the full audit
//!
//! Compares parallel and sequential analyzer fan-out on a synthetic article
//! of increasing length.

use aeoscope::analyzers::QueryList;
use aeoscope::config::AuditConfig;
use aeoscope::document::html::parse_html;
use aeoscope::run_full_audit;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn article(sections: usize) -> String {
    let mut html = String::from(
        r#"<html lang="en"><head><title>Planner guide</title>
        <script type="application/ld+json">{"@type":"FAQPage"}</script></head><body><h1>Planner</h1>"#,
    );
    for i in 0..sections {
        html.push_str(&format!(
            "<h2>How does step {i} work?</h2>\
             <p>Step {i} is where the planner assigns 12 tasks to each team. \
             According to our research, teams ship 30% faster with it.</p>\
             <ul><li>Plan the work.</li><li>Review the board.</li></ul>"
        ));
    }
    html.push_str("</body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_html");
    for sections in [10, 100] {
        let html = article(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &html, |b, html| {
            b.iter(|| parse_html(black_box(html), "https://example.com/guide"))
        });
    }
    group.finish();
}

fn bench_full_audit(c: &mut Criterion) {
    let queries = QueryList::new(["how does the planner work", "planner vs spreadsheet"])
        .expect("valid queries");
    let parallel = AuditConfig::default();
    let mut sequential = AuditConfig::default();
    sequential.aggregation.parallel = false;

    let mut group = c.benchmark_group("full_audit");
    for sections in [10, 100] {
        let doc = parse_html(&article(sections), "https://example.com/guide");
        group.bench_with_input(BenchmarkId::new("parallel", sections), &doc, |b, doc| {
            b.iter(|| run_full_audit(black_box(doc), Some(&queries), &parallel))
        });
        group.bench_with_input(BenchmarkId::new("sequential", sections), &doc, |b, doc| {
            b.iter(|| run_full_audit(black_box(doc), Some(&queries), &sequential))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_full_audit);
criterion_main!(benches);
