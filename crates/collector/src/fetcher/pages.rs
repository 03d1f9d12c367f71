use anyhow::Result;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use normalizer::{RawNode, SearchPage};
use tracing::{debug, info, warn};

use crate::fetcher::SharedPageSource;
use crate::metrics;

/// Why a traversal ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The service reported `hasNextPage = false`.
    Exhausted,
    /// The response had no `data.search` container.
    MissingSearch,
    /// `hasNextPage = true` arrived without an `endCursor`.
    MissingCursor,
    /// The configured page ceiling was reached.
    PageLimit,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Exhausted => "exhausted",
            StopReason::MissingSearch => "missing_search",
            StopReason::MissingCursor => "missing_cursor",
            StopReason::PageLimit => "page_limit",
        }
    }
}

enum Cursor {
    Start,
    After(String),
    Done,
}

struct Traversal {
    cursor: Cursor,
    pages: u32,
}

/// Walks a cursor-paginated search. Every call to [`SearchPaginator::pages`]
/// starts a fresh traversal from the first page.
pub struct SearchPaginator {
    source: SharedPageSource,
    max_pages: u32,
}

impl SearchPaginator {
    pub fn new(source: SharedPageSource, max_pages: u32) -> Self {
        Self { source, max_pages }
    }

    /// Lazily yields pages; one request is issued each time the consumer polls
    /// for the next item. The first error ends the stream.
    pub fn pages(&self) -> BoxStream<'static, Result<SearchPage>> {
        let source = self.source.clone();
        let max_pages = self.max_pages;
        let start = Traversal {
            cursor: Cursor::Start,
            pages: 0,
        };

        stream::try_unfold(start, move |state| {
            let source = source.clone();
            async move {
                let cursor = match state.cursor {
                    Cursor::Done => return Ok::<_, anyhow::Error>(None),
                    Cursor::Start => None,
                    Cursor::After(cursor) => Some(cursor),
                };
                if state.pages >= max_pages {
                    stopped(StopReason::PageLimit, state.pages);
                    return Ok(None);
                }

                let page = match source.fetch_page(cursor).await? {
                    Some(page) => page,
                    None => {
                        stopped(StopReason::MissingSearch, state.pages);
                        return Ok(None);
                    }
                };

                let pages = state.pages + 1;
                metrics::PAGES_FETCHED_TOTAL.inc();
                metrics::NODES_FETCHED_TOTAL.inc_by(page.edges.len() as u64);
                debug!(
                    page = pages,
                    nodes = page.edges.len(),
                    has_next_page = page.page_info.has_next_page,
                    "search page received"
                );

                let next = match (page.page_info.has_next_page, &page.page_info.end_cursor) {
                    (false, _) => {
                        stopped(StopReason::Exhausted, pages);
                        Cursor::Done
                    }
                    (true, Some(end_cursor)) => Cursor::After(end_cursor.clone()),
                    (true, None) => {
                        stopped(StopReason::MissingCursor, pages);
                        Cursor::Done
                    }
                };

                Ok(Some((
                    page,
                    Traversal {
                        cursor: next,
                        pages,
                    },
                )))
            }
        })
        .boxed()
    }

    /// Drains the traversal into one ordered node list. Any failed page
    /// discards everything gathered so far.
    pub async fn fetch_all(&self) -> Result<Vec<RawNode>> {
        let nodes = self
            .pages()
            .try_fold(Vec::new(), |mut nodes, page| async move {
                nodes.extend(page.into_nodes());
                Ok(nodes)
            })
            .await?;
        info!(nodes = nodes.len(), "search traversal complete");
        Ok(nodes)
    }
}

fn stopped(reason: StopReason, pages: u32) {
    metrics::TRAVERSAL_STOPS_TOTAL
        .with_label_values(&[reason.as_str()])
        .inc();
    match reason {
        StopReason::Exhausted => debug!(pages, "service reported no further pages"),
        StopReason::MissingSearch => warn!(
            pages,
            "response lacked data.search; treating it as the end of the result set"
        ),
        StopReason::MissingCursor => warn!(
            pages,
            "hasNextPage was set without an endCursor; stopping traversal"
        ),
        StopReason::PageLimit => warn!(pages, "page limit reached; stopping traversal"),
    }
}
