#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use common::config::{AppConfig, GithubConfig, OutputConfig, SearchConfig};
use common::OutputFormat;
use gh_transport::HttpExec;
use http::{Request, Response, StatusCode};
use serde_json::{json, Value};

/// Replays canned responses in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedExec {
    responses: Mutex<VecDeque<Response<Vec<u8>>>>,
    requests: Mutex<Vec<SeenRequest>>,
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

impl ScriptedExec {
    pub fn new(responses: Vec<Response<Vec<u8>>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn cursors(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .map(|req| req.body["variables"]["cursor"].clone())
            .collect()
    }
}

#[async_trait]
impl HttpExec for ScriptedExec {
    async fn execute(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        let authorization = req
            .headers()
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body: Value = serde_json::from_slice(req.body())?;
        self.requests
            .lock()
            .unwrap()
            .push(SeenRequest { authorization, body });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted response left"))
    }
}

pub fn json_response(status: StatusCode, body: Value) -> Response<Vec<u8>> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.to_string().into_bytes())
        .unwrap()
}

pub fn repo_node(name: &str, created_at: &str, updated_at: &str) -> Value {
    json!({
        "name": name,
        "owner": { "login": "octo" },
        "createdAt": created_at,
        "updatedAt": updated_at,
        "primaryLanguage": { "name": "Rust" },
        "releases": { "totalCount": 1 },
        "pullRequests": { "totalCount": 2 },
        "issues": { "totalCount": 1 },
        "totalIssues": { "totalCount": 4 },
        "stargazerCount": 1500
    })
}

/// A successful search page holding `names`, continuing to `next_cursor` when set.
pub fn search_page(names: &[&str], next_cursor: Option<&str>) -> Response<Vec<u8>> {
    let edges: Vec<Value> = names
        .iter()
        .map(|name| json!({ "node": repo_node(name, "2020-01-01T00:00:00Z", "2023-06-01T00:00:00Z") }))
        .collect();
    json_response(
        StatusCode::OK,
        json!({
            "data": {
                "search": {
                    "pageInfo": {
                        "endCursor": next_cursor.unwrap_or("final"),
                        "hasNextPage": next_cursor.is_some()
                    },
                    "edges": edges
                }
            }
        }),
    )
}

pub fn temp_output(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("repo-metrics-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

pub fn test_config(format: OutputFormat, path: PathBuf) -> AppConfig {
    AppConfig {
        github: GithubConfig {
            token: Some("test-token".into()),
            ..GithubConfig::default()
        },
        search: SearchConfig::default(),
        output: OutputConfig { format, path },
        log_level: "debug".into(),
    }
}
