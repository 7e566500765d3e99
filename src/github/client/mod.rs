//! GitHub API client wrapper
//!
//! Provides the calls the ecosystem collector needs without exposing Octocrab.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ecosystem_observability::GitHubClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::with_token("ghp_...")?;
//!
//!     let repo = gh.repository("json-schema-org", "json-schema-spec").await?;
//!     println!("{} stars", repo.stars);
//!
//!     Ok(())
//! }
//! ```

use crate::github::api::{EcosystemApi, ReleaseSummary, RepositoryDetails, SearchPage};
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::pagination::PageProbe;
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use std::sync::Arc;

mod issues;
mod pull_requests;
mod releases;
mod repositories;
mod search;

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: create client with personal access token
    pub fn with_token(token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder().personal_token(token).build()
    }

    /// Get inner Octocrab client
    #[must_use]
    pub fn inner(&self) -> &Arc<Octocrab> {
        &self.inner
    }

    /// Request one page of a listing and keep only what the count needs.
    async fn probe<T: DeserializeOwned>(
        &self,
        route: String,
        params: &[(&str, String)],
    ) -> GitHubResult<PageProbe> {
        let page: Page<T> = self
            .inner
            .get(route, Some(params))
            .await
            .map_err(GitHubError::from)?;

        Ok(PageProbe::from(&page))
    }
}

impl EcosystemApi for GitHubClient {
    async fn get_repository(&self, owner: &str, repo: &str) -> GitHubResult<RepositoryDetails> {
        self.repository(owner, repo).await
    }

    async fn probe_contributors(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> GitHubResult<PageProbe> {
        self.contributors_probe(owner, repo, per_page).await
    }

    async fn probe_open_issues(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> GitHubResult<PageProbe> {
        self.open_issues_probe(owner, repo, per_page).await
    }

    async fn probe_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> GitHubResult<PageProbe> {
        self.open_pull_requests_probe(owner, repo, per_page).await
    }

    async fn latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<Option<ReleaseSummary>> {
        self.most_recent_release(owner, repo).await
    }

    async fn search_topic(&self, topic: &str, page: u32, per_page: u8) -> GitHubResult<SearchPage> {
        self.search_topic_page(topic, page, per_page).await
    }
}

/// Builder for creating `GitHubClient`
pub struct GitHubClientBuilder {
    token: Option<String>,
    base_uri: Option<String>,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            base_uri: None,
        }
    }

    /// Set personal access token for authentication
    #[must_use]
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set base URI (for GitHub Enterprise)
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Build the `GitHubClient`
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let mut builder = Octocrab::builder();

        if let Some(token) = self.token {
            if token.trim().is_empty() {
                return Err(GitHubError::InvalidInput(
                    "personal access token is empty".to_string(),
                ));
            }
            builder = builder.personal_token(token);
        }

        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(&uri)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
