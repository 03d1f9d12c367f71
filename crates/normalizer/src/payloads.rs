//! Wire shapes of the GitHub GraphQL `search` connection, limited to the
//! fields the metrics consume.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub edges: Vec<SearchEdge>,
}

impl SearchPage {
    pub fn into_nodes(self) -> Vec<RawNode> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchEdge {
    pub node: RawNode,
}

/// One repository as returned by the search query. Timestamps are kept as the
/// service sent them; parsing happens during normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub name: String,
    pub owner: OwnerRef,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub primary_language: Option<LanguageRef>,
    pub releases: TotalCount,
    pub pull_requests: TotalCount,
    /// Closed issues (`issues(states: [CLOSED])`).
    pub issues: TotalCount,
    pub total_issues: TotalCount,
    pub stargazer_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerRef {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageRef {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: u64,
}
