use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable consulted when `github.token` is not configured.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "AppConfig::default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    fn default_log_level() -> String {
        "info".to_string()
    }
}

#[derive(Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "GithubConfig::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "GithubConfig::default_user_agent")]
    pub user_agent: String,
    #[serde(default = "GithubConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GithubConfig {
    fn default_endpoint() -> String {
        "https://api.github.com/graphql".to_string()
    }

    fn default_user_agent() -> String {
        "repo-metrics".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    /// Returns the configured token, falling back to `GITHUB_TOKEN`.
    pub fn resolved_token(&self) -> Result<String, ConfigError> {
        self.token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| {
                std::env::var(TOKEN_ENV_VAR)
                    .ok()
                    .filter(|token| !token.trim().is_empty())
            })
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "no GitHub token configured (set github.token or {TOKEN_ENV_VAR})"
                ))
            })
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: Self::default_endpoint(),
            user_agent: Self::default_user_agent(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "SearchConfig::default_min_stars")]
    pub min_stars: u32,
    #[serde(default = "SearchConfig::default_page_size")]
    pub page_size: u32,
    #[serde(default = "SearchConfig::default_max_pages")]
    pub max_pages: u32,
}

impl SearchConfig {
    /// GitHub rejects `first` values above this.
    pub const MAX_PAGE_SIZE: u32 = 100;

    const fn default_min_stars() -> u32 {
        1000
    }

    const fn default_page_size() -> u32 {
        20
    }

    const fn default_max_pages() -> u32 {
        1000
    }

    /// Search qualifier sent as the GraphQL `query` argument.
    pub fn query_filter(&self) -> String {
        format!("stars:>{}", self.min_stars)
    }

    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, Self::MAX_PAGE_SIZE)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_stars: Self::default_min_stars(),
            page_size: Self::default_page_size(),
            max_pages: Self::default_max_pages(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_format")]
    pub format: OutputFormat,
    #[serde(default = "OutputConfig::default_path")]
    pub path: PathBuf,
}

impl OutputConfig {
    const fn default_format() -> OutputFormat {
        OutputFormat::Csv
    }

    fn default_path() -> PathBuf {
        PathBuf::from("github_repos_data.csv")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
            path: Self::default_path(),
        }
    }
}
