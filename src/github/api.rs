//! The remote calls the collector depends on.
//!
//! `GitHubClient` implements [`EcosystemApi`] over octocrab; tests substitute
//! an in-memory implementation.

use chrono::{DateTime, Utc};
use std::future::Future;

use crate::github::error::GitHubResult;
use crate::github::pagination::PageProbe;

/// Repository metadata as returned by "get repository".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryDetails {
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub default_branch: Option<String>,
    /// SPDX identifier of the detected license
    pub license: Option<String>,
    pub archived: bool,
    pub disabled: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    /// Repository size in kilobytes
    pub size: u64,
}

/// The most recent release of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub tag_name: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// One hit of a repository search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub owner: String,
    pub name: String,
}

impl SearchHit {
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner/name`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// One page of repository search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    /// Whether the response linked to a following page
    pub has_next: bool,
}

/// Remote API surface consumed by the collector.
///
/// Calls are issued one at a time; implementations need not be reentrant.
pub trait EcosystemApi {
    /// `GET /repos/{owner}/{repo}`
    fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = GitHubResult<RepositoryDetails>> + Send;

    /// `GET /repos/{owner}/{repo}/contributors` with anonymous contributors included
    fn probe_contributors(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> impl Future<Output = GitHubResult<PageProbe>> + Send;

    /// `GET /repos/{owner}/{repo}/issues?state=open`
    fn probe_open_issues(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> impl Future<Output = GitHubResult<PageProbe>> + Send;

    /// `GET /repos/{owner}/{repo}/pulls?state=open`
    fn probe_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> impl Future<Output = GitHubResult<PageProbe>> + Send;

    /// Most recent release, or `None` when the repository has none
    fn latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = GitHubResult<Option<ReleaseSummary>>> + Send;

    /// One page of `topic:<topic>` search results sorted by stars, descending
    fn search_topic(
        &self,
        topic: &str,
        page: u32,
        per_page: u8,
    ) -> impl Future<Output = GitHubResult<SearchPage>> + Send;
}
