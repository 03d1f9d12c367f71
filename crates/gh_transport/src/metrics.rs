use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Histogram, IntCounterVec,
    IntGauge,
};

pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gh_transport_requests_total",
        "Requests sent to GitHub grouped by response status class",
        &["status"]
    )
    .expect("requests metric")
});

pub static LATENCY: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "gh_transport_latency_seconds",
        "Round-trip latency of GitHub requests",
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("latency metric")
});

pub static RATE_REMAINING: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "gh_transport_rate_remaining",
        "Rate limit remaining as reported by the last response"
    )
    .expect("rate remaining")
});

pub static RATE_LIMIT: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "gh_transport_rate_limit",
        "Rate limit ceiling as reported by the last response"
    )
    .expect("rate limit")
});

pub(crate) fn status_class(status: http::StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}
