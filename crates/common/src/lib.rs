pub mod config;
pub mod errors;
pub mod logging;

pub use crate::config::{AppConfig, OutputFormat};
pub use crate::errors::{AppError, Result};
