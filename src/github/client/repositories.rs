//! Repositories API methods

use super::GitHubClient;
use crate::github::api::RepositoryDetails;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::pagination::PageProbe;
use octocrab::models::Repository;

impl GitHubClient {
    /// Get a repository's metadata
    pub async fn repository(&self, owner: &str, repo: &str) -> GitHubResult<RepositoryDetails> {
        let repository = self
            .inner
            .repos(owner, repo)
            .get()
            .await
            .map_err(GitHubError::from)?;
        Ok(details_from(repository))
    }

    /// Probe the contributors listing, anonymous contributors included.
    ///
    /// Items are kept as raw JSON: anonymous entries lack the fields of a
    /// regular user.
    pub async fn contributors_probe(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> GitHubResult<PageProbe> {
        self.probe::<serde_json::Value>(
            format!("/repos/{owner}/{repo}/contributors"),
            &[("per_page", per_page.to_string()), ("anon", "true".to_string())],
        )
        .await
    }
}

fn details_from(repo: Repository) -> RepositoryDetails {
    // `language` is untyped JSON in octocrab's model
    let language = repo
        .language
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);

    RepositoryDetails {
        name: repo.name,
        full_name: repo.full_name,
        description: repo.description,
        language,
        topics: repo.topics.unwrap_or_default(),
        stars: u64::from(repo.stargazers_count.unwrap_or(0)),
        forks: u64::from(repo.forks_count.unwrap_or(0)),
        watchers: u64::from(repo.watchers_count.unwrap_or(0)),
        created_at: repo.created_at,
        updated_at: repo.updated_at,
        pushed_at: repo.pushed_at,
        default_branch: repo.default_branch,
        license: repo.license.map(|license| license.spdx_id),
        archived: repo.archived.unwrap_or(false),
        disabled: repo.disabled.unwrap_or(false),
        has_wiki: repo.has_wiki.unwrap_or(false),
        has_pages: repo.has_pages.unwrap_or(false),
        size: u64::from(repo.size.unwrap_or(0)),
    }
}
