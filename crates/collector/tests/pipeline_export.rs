mod support;

use std::sync::Arc;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use collector::Pipeline;
use common::{AppError, OutputFormat};
use http::StatusCode;
use normalizer::FlatRecord;
use serde_json::json;

use support::{json_response, repo_node, search_page, temp_output, test_config, ScriptedExec};

fn reference() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[tokio::test]
async fn csv_export_contains_header_and_ordered_rows() -> Result<()> {
    let path = temp_output("ordered.csv");
    let exec = Arc::new(ScriptedExec::new(vec![
        search_page(&["first", "second"], Some("c1")),
        search_page(&["third"], None),
    ]));
    let pipeline = Pipeline::with_exec(&test_config(OutputFormat::Csv, path.clone()), exec)?
        .with_reference_instant(reference());

    let summary = pipeline.run().await?;

    assert_eq!(summary.records, 3);
    assert_eq!(summary.reference, reference());
    let text = std::fs::read_to_string(&path)?;
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Name,Owner,Age (years),Days since last update,Language,Releases,Pull Requests,Closed Issues,Total Issues,Issue Closure Rate,Stars"
    );
    assert_eq!(lines[1], "first,octo,4,214,Rust,1,2,1,4,0.25,1500");
    assert!(lines[2].starts_with("second,"));
    assert!(lines[3].starts_with("third,"));
    assert_eq!(lines.len(), 4);
    Ok(())
}

#[tokio::test]
async fn json_export_matches_normalized_records() -> Result<()> {
    let path = temp_output("records.json");
    let exec = Arc::new(ScriptedExec::new(vec![search_page(&["only"], None)]));
    let pipeline = Pipeline::with_exec(&test_config(OutputFormat::Json, path.clone()), exec)?
        .with_reference_instant(reference());

    pipeline.run().await?;

    let records: Vec<FlatRecord> = serde_json::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(
        records,
        vec![FlatRecord {
            name: "only".into(),
            owner: "octo".into(),
            age_years: 4,
            days_since_update: 214,
            language: "Rust".into(),
            releases: 1,
            pull_requests: 2,
            closed_issues: 1,
            total_issues: 4,
            issue_closure_rate: 0.25,
            stars: 1500,
        }]
    );
    Ok(())
}

#[tokio::test]
async fn http_failure_on_second_page_writes_nothing() -> Result<()> {
    let path = temp_output("aborted.csv");
    let exec = Arc::new(ScriptedExec::new(vec![
        search_page(&["a"], Some("c1")),
        json_response(StatusCode::INTERNAL_SERVER_ERROR, json!({"message": "boom"})),
        search_page(&["b"], None),
    ]));
    let pipeline = Pipeline::with_exec(&test_config(OutputFormat::Csv, path.clone()), exec)?
        .with_reference_instant(reference());

    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, AppError::Http(_)), "unexpected error: {err}");
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn malformed_timestamp_writes_nothing() -> Result<()> {
    let path = temp_output("bad-timestamp.csv");
    let exec = Arc::new(ScriptedExec::new(vec![json_response(
        StatusCode::OK,
        json!({"data": {"search": {
            "pageInfo": {"endCursor": "end", "hasNextPage": false},
            "edges": [
                {"node": repo_node("good", "2020-01-01T00:00:00Z", "2023-06-01T00:00:00Z")},
                {"node": repo_node("bad", "2020-01-01T00:00:00.000Z", "2023-06-01T00:00:00Z")}
            ]
        }}}),
    )]));
    let pipeline = Pipeline::with_exec(&test_config(OutputFormat::Csv, path.clone()), exec)?
        .with_reference_instant(reference());

    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, AppError::Normalize(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("octo/bad"));
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn missing_language_exports_sentinel() -> Result<()> {
    let path = temp_output("unknown-language.csv");
    let mut node = repo_node("plain", "2020-01-01T00:00:00Z", "2023-06-01T00:00:00Z");
    node.as_object_mut().unwrap().remove("primaryLanguage");
    let exec = Arc::new(ScriptedExec::new(vec![json_response(
        StatusCode::OK,
        json!({"data": {"search": {
            "pageInfo": {"endCursor": "end", "hasNextPage": false},
            "edges": [{"node": node}]
        }}}),
    )]));
    let pipeline = Pipeline::with_exec(&test_config(OutputFormat::Csv, path.clone()), exec)?
        .with_reference_instant(reference());

    pipeline.run().await?;

    let text = std::fs::read_to_string(&path)?;
    assert!(text.lines().nth(1).unwrap_or_default().contains(",Unknown,"));
    Ok(())
}

#[tokio::test]
async fn missing_token_is_a_config_error() -> Result<()> {
    let mut config = test_config(OutputFormat::Csv, temp_output("unused.csv"));
    config.github.token = Some("   ".into());
    if std::env::var(common::config::TOKEN_ENV_VAR).is_ok() {
        return Ok(());
    }

    let result = Pipeline::with_exec(&config, Arc::new(ScriptedExec::default()));

    assert!(matches!(result, Err(AppError::Config(_))));
    Ok(())
}
