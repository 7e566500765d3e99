//! Issues API methods

use super::GitHubClient;
use crate::github::error::GitHubResult;
use crate::github::pagination::PageProbe;

impl GitHubClient {
    /// Probe the open-issues listing.
    ///
    /// The issues endpoint also lists pull requests, so this count includes them.
    pub async fn open_issues_probe(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> GitHubResult<PageProbe> {
        self.probe::<serde_json::Value>(
            format!("/repos/{owner}/{repo}/issues"),
            &[("state", "open".to_string()), ("per_page", per_page.to_string())],
        )
        .await
    }
}
