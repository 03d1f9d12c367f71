use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use common::config::AppConfig;
use common::{AppError, Result};
use gh_transport::{GithubToken, GithubTransport, HttpExec, ReqwestExecutor};
use normalizer::{normalize_nodes, FlatRecord};
use tracing::{info, instrument, warn};

use crate::client::GraphqlClient;
use crate::export::{self, RecordWriter};
use crate::fetcher::{GraphqlSearchFetcher, SearchPaginator};
use crate::metrics;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: usize,
    pub output: PathBuf,
    pub reference: DateTime<Utc>,
}

/// Fetch, normalize and export as one all-or-nothing run.
pub struct Pipeline {
    paginator: SearchPaginator,
    writer: Box<dyn RecordWriter>,
    output_path: PathBuf,
    reference: Option<DateTime<Utc>>,
}

impl Pipeline {
    pub fn new(
        paginator: SearchPaginator,
        writer: Box<dyn RecordWriter>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            paginator,
            writer,
            output_path: output_path.into(),
            reference: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let exec = ReqwestExecutor::new(
            &config.github.user_agent,
            Duration::from_secs(config.github.timeout_secs),
        )
        .map_err(AppError::http)?;
        Self::with_exec(config, Arc::new(exec))
    }

    /// Wires the pipeline from configuration over the given HTTP executor.
    pub fn with_exec(config: &AppConfig, exec: Arc<dyn HttpExec>) -> Result<Self> {
        let token = GithubToken::new(config.github.resolved_token()?);
        let transport = GithubTransport::new(exec, token);
        let client = GraphqlClient::new(
            transport,
            &config.github.endpoint,
            config.github.user_agent.clone(),
        )
        .map_err(AppError::Other)?;
        let fetcher = GraphqlSearchFetcher::new(
            client,
            config.search.query_filter(),
            config.search.effective_page_size(),
        );
        let paginator = SearchPaginator::new(Arc::new(fetcher), config.search.max_pages);
        Ok(Self::new(
            paginator,
            export::writer_for(config.output.format),
            config.output.path.clone(),
        ))
    }

    /// Pins the instant ages are measured against instead of reading the clock.
    pub fn with_reference_instant(mut self, reference: DateTime<Utc>) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Fetches every page, then normalizes the whole set against one instant.
    pub async fn collect(&self) -> Result<(Vec<FlatRecord>, DateTime<Utc>)> {
        let nodes = self.paginator.fetch_all().await.map_err(AppError::http)?;
        let reference = self.reference.unwrap_or_else(Utc::now);
        let records = normalize_nodes(&nodes, reference).map_err(AppError::normalize)?;
        Ok((records, reference))
    }

    #[instrument(skip(self), fields(output = %self.output_path.display(), format = self.writer.format().as_str()))]
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let _timer = metrics::RUN_DURATION.start_timer();
        let result = self.run_inner().await;
        match &result {
            Ok(summary) => {
                metrics::RUNS_TOTAL.with_label_values(&["success"]).inc();
                info!(
                    records = summary.records,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "export written"
                );
            }
            Err(err) => {
                metrics::RUNS_TOTAL.with_label_values(&[err.kind()]).inc();
                warn!(error = %err, "run aborted; no output written");
            }
        }
        result
    }

    async fn run_inner(&self) -> Result<RunSummary> {
        let (records, reference) = self.collect().await?;
        let bytes = export::render(self.writer.as_ref(), &records).map_err(AppError::export)?;
        write_atomically(&self.output_path, &bytes).await?;
        metrics::RECORDS_EXPORTED_TOTAL
            .with_label_values(&[self.writer.format().as_str()])
            .inc_by(records.len() as u64);
        Ok(RunSummary {
            records: records.len(),
            output: self.output_path.clone(),
            reference,
        })
    }
}

/// Writes to a sibling temp file and renames it into place, so readers never
/// observe a half-written export.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::export(anyhow!("output path {} has no file name", path.display())))?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".partial");
    let temp_path = path.with_file_name(temp_name);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&temp_path, bytes)
        .await
        .with_context(|| format!("writing {}", temp_path.display()))
        .map_err(AppError::export)?;
    if let Err(err) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(err.into());
    }
    Ok(())
}
