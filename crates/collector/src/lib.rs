pub mod client;
pub mod export;
pub mod fetcher;
pub mod metrics;
pub mod service;

pub use client::{GithubApiError, GraphqlClient};
pub use fetcher::{GraphqlSearchFetcher, PageSource, SearchPaginator};
pub use service::{Pipeline, RunSummary};
