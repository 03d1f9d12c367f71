pub mod error;
pub mod exec;
pub mod metrics;
pub mod rate_limit;
pub mod token;
pub mod transport;

pub use error::HttpStatusError;
pub use exec::{HttpExec, ReqwestExecutor};
pub use rate_limit::{parse_rate_limit, RateLimitSnapshot};
pub use token::GithubToken;
pub use transport::GithubTransport;
