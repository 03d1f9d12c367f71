use anyhow::{anyhow, Result};
use gh_transport::GithubTransport;
use http::{header, Request, StatusCode, Uri};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

#[derive(Debug, Error)]
pub enum GithubApiError {
    #[error("github api error: {status} for {endpoint}: {body}")]
    Http {
        status: StatusCode,
        endpoint: String,
        body: String,
    },
    #[error("github api returned an undecodable body for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GithubApiError {
    pub fn status(status: StatusCode, endpoint: impl Into<String>, body: &[u8]) -> Self {
        let excerpt = gh_transport::HttpStatusError::new(status).with_body(body);
        Self::Http {
            status,
            endpoint: endpoint.into(),
            body: excerpt.body,
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            GithubApiError::Http { status, .. } => Some(*status),
            GithubApiError::Decode { .. } => None,
        }
    }
}

/// Posts GraphQL documents to a single endpoint.
#[derive(Clone)]
pub struct GraphqlClient {
    transport: GithubTransport,
    endpoint: Uri,
    user_agent: String,
}

impl GraphqlClient {
    pub fn new(transport: GithubTransport, endpoint: &str, user_agent: String) -> Result<Self> {
        let url = Url::parse(endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("unsupported GraphQL endpoint scheme: {}", url.scheme()));
        }
        let endpoint: Uri = url.as_str().parse()?;
        Ok(Self {
            transport,
            endpoint,
            user_agent,
        })
    }

    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Returns the decoded response body. A non-2xx status is an error;
    /// GraphQL-level `errors` are only logged so callers can decide how to
    /// treat a response that lacks the data they asked for.
    #[instrument(skip(self, query, variables), fields(endpoint = %self.endpoint))]
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        let payload = json!({
            "query": query,
            "variables": variables,
        });

        let request = Request::builder()
            .method("POST")
            .uri(self.endpoint.clone())
            .header(header::USER_AGENT, self.user_agent.clone())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&payload)?)?;

        let response = self.transport.send(request).await?;
        let status = response.status();
        let body = response.into_body();
        if !status.is_success() {
            return Err(GithubApiError::status(status, "graphql", &body).into());
        }

        let value: Value =
            serde_json::from_slice(&body).map_err(|source| GithubApiError::Decode {
                endpoint: "graphql".to_string(),
                source,
            })?;

        if let Some(errors) = value.get("errors").and_then(Value::as_array) {
            warn!(
                count = errors.len(),
                first = %first_error_message(errors),
                "GraphQL response carried errors"
            );
        }
        debug!(bytes = body.len(), "GraphQL response received");

        Ok(value)
    }
}

fn first_error_message(errors: &[Value]) -> &str {
    errors
        .first()
        .and_then(|err| err.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("unknown GraphQL error")
}
