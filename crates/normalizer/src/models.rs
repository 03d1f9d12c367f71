use serde::{Deserialize, Serialize};

/// Language reported when a repository has no detected primary language.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Flattened per-repository metrics; every field is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlatRecord {
    pub name: String,
    pub owner: String,
    pub age_years: i64,
    pub days_since_update: i64,
    pub language: String,
    pub releases: u64,
    pub pull_requests: u64,
    pub closed_issues: u64,
    pub total_issues: u64,
    pub issue_closure_rate: f64,
    pub stars: u64,
}
