//! Pull Requests API methods

use super::GitHubClient;
use crate::github::error::GitHubResult;
use crate::github::pagination::PageProbe;

impl GitHubClient {
    /// Probe the open pull request listing
    pub async fn open_pull_requests_probe(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> GitHubResult<PageProbe> {
        self.probe::<serde_json::Value>(
            format!("/repos/{owner}/{repo}/pulls"),
            &[("state", "open".to_string()), ("per_page", per_page.to_string())],
        )
        .await
    }
}
