use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use http::{header, Request, Response};
use tracing::{debug, warn};

use crate::exec::HttpExec;
use crate::metrics;
use crate::rate_limit::parse_rate_limit;
use crate::token::GithubToken;

/// Remaining-budget level below which every response logs a warning.
const LOW_BUDGET_WARNING: i64 = 100;

/// Injects credentials and records request telemetry around an [`HttpExec`].
/// Responses are returned as-is; status interpretation is left to the caller.
#[derive(Clone)]
pub struct GithubTransport {
    exec: Arc<dyn HttpExec>,
    token: GithubToken,
}

impl GithubTransport {
    pub fn new(exec: Arc<dyn HttpExec>, token: GithubToken) -> Self {
        Self { exec, token }
    }

    pub async fn send(&self, mut request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, self.token.authorization_header()?);

        let start = Instant::now();
        let result = self.exec.execute(request).await;
        metrics::LATENCY.observe(start.elapsed().as_secs_f64());

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                metrics::REQUESTS_TOTAL.with_label_values(&["error"]).inc();
                return Err(err);
            }
        };

        let status = response.status();
        metrics::REQUESTS_TOTAL
            .with_label_values(&[metrics::status_class(status)])
            .inc();

        if let Some(rate) = parse_rate_limit(response.headers()) {
            metrics::RATE_LIMIT.set(rate.limit);
            metrics::RATE_REMAINING.set(rate.remaining);
            if rate.remaining < LOW_BUDGET_WARNING {
                warn!(
                    remaining = rate.remaining,
                    reset = %rate.reset,
                    "GitHub rate limit budget nearly exhausted"
                );
            } else {
                debug!(remaining = rate.remaining, "GitHub rate limit budget");
            }
        }

        Ok(response)
    }
}
