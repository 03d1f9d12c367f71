use std::fmt;

use http::StatusCode;

/// Upper bound on how much of a failed response body is kept for diagnostics.
const MAX_BODY_EXCERPT: usize = 2048;

#[derive(Debug)]
pub struct HttpStatusError {
    pub status: StatusCode,
    pub endpoint: String,
    pub body: String,
}

impl HttpStatusError {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            endpoint: String::new(),
            body: String::new(),
        }
    }

    pub fn with_endpoint(status: StatusCode, endpoint: impl Into<String>) -> Self {
        Self {
            status,
            endpoint: endpoint.into(),
            body: String::new(),
        }
    }

    pub fn with_body(mut self, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        self.body = match text.char_indices().nth(MAX_BODY_EXCERPT) {
            Some((idx, _)) => format!("{}…", &text[..idx]),
            None => text.into_owned(),
        };
        self
    }
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.endpoint.is_empty() {
            write!(f, "unexpected status {}", self.status)?;
        } else {
            write!(f, "unexpected status {} for {}", self.status, self.endpoint)?;
        }
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpStatusError {}
