//! Command-line and environment configuration of the collector binary

use clap::Parser;
use std::path::PathBuf;

use crate::aggregate::DEFAULT_TOP_N;
use crate::collector::{DEFAULT_COURTESY_DELAY, FixedDelay, MaxResults};

/// Environment variable names backing the command-line flags
pub mod env {
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const TOPIC: &str = "TOPIC";
    pub const MAX_REPOS: &str = "MAX_REPOS";
    pub const DATA_DIR: &str = "DATA_DIR";
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ecosystem-collector",
    version,
    about = "Collects GitHub metrics for every repository tagged with a topic",
    long_about = "Crawls all repositories tagged with a topic, stores a dated JSON snapshot of per-repository and aggregate metrics, and regenerates the historical timeline from every snapshot on disk."
)]
pub struct Config {
    /// GitHub personal access token
    #[arg(long = "github-token", env = env::GITHUB_TOKEN, hide_env_values = true)]
    pub github_token: Option<String>,

    /// Topic whose repositories are collected
    #[arg(long, env = env::TOPIC, default_value = "json-schema")]
    pub topic: String,

    /// Maximum number of repositories to collect, -1 for no limit
    #[arg(long = "max-repos", env = env::MAX_REPOS, default_value = "-1", allow_negative_numbers = true)]
    pub max_repos: MaxResults,

    /// Directory holding the dated snapshot files
    #[arg(long = "data-dir", env = env::DATA_DIR, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Repositories kept per language in the top list
    #[arg(long = "top-n", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Pause after each collected repository, in milliseconds
    #[arg(long = "delay-ms", default_value_t = DEFAULT_COURTESY_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Copy the snapshot files into <STAGE_DIR>/data after the run
    #[arg(long = "stage-dir")]
    pub stage_dir: Option<PathBuf>,
}

impl Config {
    /// The token, or an error naming both places it can come from
    pub fn token(&self) -> Result<&str, String> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                format!(
                    "GitHub token is required. Provide via --github-token argument or {} environment variable",
                    env::GITHUB_TOKEN
                )
            })
    }

    /// Pause applied after each collected repository
    #[must_use]
    pub fn courtesy_delay(&self) -> FixedDelay {
        FixedDelay::from_millis(self.delay_ms)
    }
}
