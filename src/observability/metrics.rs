//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dictionary_requests_total` (counter): requests by method, route, status
//! - `dictionary_request_duration_seconds` (histogram): latency distribution
//! - `dictionary_words_loaded` (gauge): words held by the store
//! - `dictionary_alphabet_files_failed` (gauge): buckets that failed to load
//!
//! # Design Decisions
//! - Labels use the matched route template, not the raw path, so word ids
//!   and letters do not explode label cardinality

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::dictionary::WordStore;

/// Start the Prometheus exporter on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "dictionary_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "dictionary_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_store(store: &WordStore) {
    metrics::gauge!("dictionary_words_loaded").set(store.word_count() as f64);
    metrics::gauge!("dictionary_alphabet_files_failed").set(store.load_failures().count() as f64);
}

/// Route-level middleware recording request count and latency.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = request.method().to_string();

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
