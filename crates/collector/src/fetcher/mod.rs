use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use normalizer::SearchPage;

pub mod graphql;
pub mod pages;

pub use graphql::GraphqlSearchFetcher;
pub use pages::{SearchPaginator, StopReason};

/// Produces one page of search results for a cursor (`None` means the first page).
///
/// `Ok(None)` signals that the response carried no search container; the
/// paginator treats that as the end of the data.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, cursor: Option<String>) -> Result<Option<SearchPage>>;
}

pub type SharedPageSource = Arc<dyn PageSource>;
