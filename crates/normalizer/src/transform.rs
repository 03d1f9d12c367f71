use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

use crate::error::NormalizeError;
use crate::models::{FlatRecord, UNKNOWN_LANGUAGE};
use crate::payloads::RawNode;

/// The only timestamp shape accepted from the service.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_YEAR: i64 = 365;

/// Normalizes a whole batch against one reference instant. Order is preserved
/// and the first malformed timestamp fails the batch.
pub fn normalize_nodes(
    nodes: &[RawNode],
    reference: DateTime<Utc>,
) -> Result<Vec<FlatRecord>, NormalizeError> {
    let records = nodes
        .iter()
        .map(|node| normalize_node(node, reference))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = records.len(), reference = %reference, "normalized repositories");
    Ok(records)
}

pub fn normalize_node(
    node: &RawNode,
    reference: DateTime<Utc>,
) -> Result<FlatRecord, NormalizeError> {
    let created_at = parse_timestamp(node, "createdAt", &node.created_at)?;
    let updated_at = parse_timestamp(node, "updatedAt", &node.updated_at)?;

    let closed_issues = node.issues.total_count;
    let total_issues = node.total_issues.total_count;

    Ok(FlatRecord {
        name: node.name.clone(),
        owner: node.owner.login.clone(),
        // Day count floor-divided by 365, not calendar years.
        age_years: whole_days(reference, created_at).div_euclid(DAYS_PER_YEAR),
        days_since_update: whole_days(reference, updated_at),
        language: node
            .primary_language
            .as_ref()
            .map(|lang| lang.name.clone())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
        releases: node.releases.total_count,
        pull_requests: node.pull_requests.total_count,
        closed_issues,
        total_issues,
        issue_closure_rate: issue_closure_rate(closed_issues, total_issues),
        stars: node.stargazer_count,
    })
}

pub fn issue_closure_rate(closed: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        closed as f64 / total as f64
    }
}

/// Whole days elapsed from `since` to `reference`, rounded toward negative infinity.
pub fn whole_days(reference: DateTime<Utc>, since: DateTime<Utc>) -> i64 {
    (reference - since).num_seconds().div_euclid(SECONDS_PER_DAY)
}

pub fn parse_service_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_timestamp(
    node: &RawNode,
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, NormalizeError> {
    parse_service_timestamp(value).map_err(|source| NormalizeError::InvalidTimestamp {
        repository: format!("{}/{}", node.owner.login, node.name),
        field,
        value: value.to_string(),
        source,
    })
}
