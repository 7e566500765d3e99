//! Releases API methods

use super::GitHubClient;
use crate::github::api::ReleaseSummary;
use crate::github::error::{GitHubError, GitHubResult};

impl GitHubClient {
    /// Most recent release of a repository
    ///
    /// Uses octocrab's releases API: client.repos(owner, repo).releases()
    pub async fn most_recent_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<Option<ReleaseSummary>> {
        let page = self
            .inner
            .repos(owner, repo)
            .releases()
            .list()
            .per_page(1)
            .send()
            .await
            .map_err(GitHubError::from)?;

        Ok(page.items.into_iter().next().map(|release| ReleaseSummary {
            tag_name: release.tag_name,
            published_at: release.published_at,
        }))
    }
}
