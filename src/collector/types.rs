//! Type definitions for ecosystem collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::github::error::GitHubError;

/// Error handling for collection operations
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Failed to fetch repository {repository}: {source}")]
    Repository {
        repository: String,
        #[source]
        source: GitHubError,
    },

    #[error("Search for topic '{topic}' failed on page {page}: {source}")]
    Search {
        topic: String,
        page: u32,
        #[source]
        source: GitHubError,
    },
}

pub type CollectorResult<T> = Result<T, CollectorError>;

/// Release information of a repository.
///
/// A repository without releases and one whose releases could not be read
/// both yield the default value.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseInfo {
    pub has_releases: bool,
    pub latest_release: Option<String>,
    pub latest_release_date: Option<DateTime<Utc>>,
}

/// Observed state of one repository at collection time.
///
/// Missing numeric fields deserialize as 0; `language` stays `None` until
/// aggregation substitutes a bucket name.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryMetric {
    /// `owner/name`
    pub repository: String,
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    #[serde(rename = "openPRs")]
    pub open_prs: u64,
    pub contributors: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub default_branch: Option<String>,
    pub license: Option<String>,
    pub archived: bool,
    pub disabled: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub size: u64,
    #[serde(flatten)]
    pub release: ReleaseInfo,
}

/// Upper bound on the number of records a crawl emits.
///
/// The command line keeps the `-1 = unlimited` convention; it maps to `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxResults(Option<usize>);

impl MaxResults {
    pub const UNLIMITED: Self = Self(None);

    #[must_use]
    pub const fn bounded(limit: usize) -> Self {
        Self(Some(limit))
    }

    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        self.0
    }

    /// Whether `emitted` records already satisfy the bound
    #[must_use]
    pub fn is_reached(self, emitted: usize) -> bool {
        self.0.is_some_and(|limit| emitted >= limit)
    }
}

impl From<Option<usize>> for MaxResults {
    fn from(limit: Option<usize>) -> Self {
        Self(limit)
    }
}

impl FromStr for MaxResults {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|e| format!("invalid repository limit '{s}': {e}"))?;
        match value {
            -1 => Ok(Self::UNLIMITED),
            n if n >= 0 => usize::try_from(n)
                .map(Self::bounded)
                .map_err(|e| format!("repository limit {n} out of range: {e}")),
            n => Err(format!(
                "repository limit must be -1 (unlimited) or non-negative, got {n}"
            )),
        }
    }
}

impl fmt::Display for MaxResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(limit) => write!(f, "{limit}"),
            None => f.write_str("unlimited"),
        }
    }
}

/// Result of processing one search hit.
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryOutcome {
    Collected(RepositoryMetric),
    Skipped { repository: String, reason: String },
}

/// Everything a crawl produced, in search order.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub outcomes: Vec<RepositoryOutcome>,
    /// Set when a search page could not be fetched and the crawl ended early
    pub search_error: Option<CollectorError>,
}

impl CrawlReport {
    /// Number of search hits processed
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of repositories collected successfully
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RepositoryOutcome::Collected(_)))
            .count()
    }

    /// Skipped repositories with the reason each was dropped
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            RepositoryOutcome::Skipped { repository, reason } => {
                Some((repository.as_str(), reason.as_str()))
            }
            RepositoryOutcome::Collected(_) => None,
        })
    }

    /// Collected records, consuming the report
    #[must_use]
    pub fn into_repositories(self) -> Vec<RepositoryMetric> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                RepositoryOutcome::Collected(metric) => Some(metric),
                RepositoryOutcome::Skipped { .. } => None,
            })
            .collect()
    }
}
