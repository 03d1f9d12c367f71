use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec, TextEncoder,
};

pub static RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "collector_runs_total",
        "Harvest runs grouped by outcome",
        &["outcome"]
    )
    .expect("collector runs total")
});

pub static RUN_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "collector_run_duration_seconds",
        "Duration of a full fetch, normalize and export run in seconds",
        vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0, 900.0]
    )
    .expect("collector run duration histogram")
});

pub static PAGES_FETCHED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "collector_pages_fetched_total",
        "Search result pages received from the GraphQL endpoint"
    )
    .expect("collector pages fetched")
});

pub static NODES_FETCHED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "collector_nodes_fetched_total",
        "Repository nodes received across all search pages"
    )
    .expect("collector nodes fetched")
});

pub static TRAVERSAL_STOPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "collector_traversal_stops_total",
        "Reasons the pagination loop stopped",
        &["reason"]
    )
    .expect("collector traversal stops")
});

pub static RECORDS_EXPORTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "collector_records_exported_total",
        "Normalized records written to the export artifact",
        &["format"]
    )
    .expect("collector records exported")
});

/// Prometheus text exposition of every registered metric.
pub fn render() -> String {
    TextEncoder::new()
        .encode_to_string(&prometheus::gather())
        .unwrap_or_else(|err| format!("# failed to encode metrics: {err}\n"))
}
