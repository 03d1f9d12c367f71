use anyhow::{Context, Result};
use async_trait::async_trait;
use normalizer::SearchPage;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::GraphqlClient;
use crate::fetcher::PageSource;

pub const SEARCH_QUERY: &str = r#"
query PopularRepositories($searchQuery: String!, $pageSize: Int!, $cursor: String) {
  search(query: $searchQuery, type: REPOSITORY, first: $pageSize, after: $cursor) {
    pageInfo {
      endCursor
      hasNextPage
    }
    edges {
      node {
        ... on Repository {
          name
          owner {
            login
          }
          createdAt
          updatedAt
          primaryLanguage {
            name
          }
          releases {
            totalCount
          }
          pullRequests(states: MERGED) {
            totalCount
          }
          issues(states: [CLOSED]) {
            totalCount
          }
          totalIssues: issues {
            totalCount
          }
          stargazerCount
        }
      }
    }
  }
}
"#;

/// Repository search over GraphQL, one request per page.
pub struct GraphqlSearchFetcher {
    client: GraphqlClient,
    search_query: String,
    page_size: u32,
}

impl GraphqlSearchFetcher {
    pub fn new(client: GraphqlClient, search_query: impl Into<String>, page_size: u32) -> Self {
        Self {
            client,
            search_query: search_query.into(),
            page_size,
        }
    }
}

#[async_trait]
impl PageSource for GraphqlSearchFetcher {
    async fn fetch_page(&self, cursor: Option<String>) -> Result<Option<SearchPage>> {
        debug!(cursor = ?cursor, page_size = self.page_size, "requesting search page");
        let response = self
            .client
            .execute(
                SEARCH_QUERY,
                json!({
                    "searchQuery": self.search_query,
                    "pageSize": self.page_size as i64,
                    "cursor": cursor,
                }),
            )
            .await?;
        extract_search_page(&response)
    }
}

/// Pulls `data.search` out of a response. An absent or null container yields
/// `Ok(None)`; a container that does not match the expected shape is an error.
pub fn extract_search_page(root: &Value) -> Result<Option<SearchPage>> {
    let search = match root.get("data").and_then(|data| data.get("search")) {
        Some(search) if !search.is_null() => search,
        _ => return Ok(None),
    };
    let page = SearchPage::deserialize(search).context("decoding search page")?;
    Ok(Some(page))
}
