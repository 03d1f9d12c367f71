use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("repository {repository}: {field} {value:?} does not match YYYY-MM-DDTHH:MM:SSZ")]
    InvalidTimestamp {
        repository: String,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
