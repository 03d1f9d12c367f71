use anyhow::Result;
use collector::{metrics, Pipeline};
use common::{config::AppConfig, logging};
use tracing::{debug, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init_logging(&config.log_level);

    let pipeline = Pipeline::from_config(&config)?;
    info!(
        endpoint = %config.github.endpoint,
        filter = %config.search.query_filter(),
        page_size = config.search.effective_page_size(),
        format = config.output.format.as_str(),
        output = %pipeline.output_path().display(),
        "harvest started"
    );

    let summary = pipeline.run().await?;
    info!(
        records = summary.records,
        reference = %summary.reference,
        output = %summary.output.display(),
        "harvest finished"
    );
    debug!(metrics = %metrics::render(), "run metrics");
    Ok(())
}
