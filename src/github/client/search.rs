//! Search API methods

use super::GitHubClient;
use crate::github::api::{SearchHit, SearchPage};
use crate::github::error::{GitHubError, GitHubResult};
use log::debug;

impl GitHubClient {
    /// Fetch one page of repositories tagged with `topic`, most-starred first
    pub async fn search_topic_page(
        &self,
        topic: &str,
        page: u32,
        per_page: u8,
    ) -> GitHubResult<SearchPage> {
        if topic.trim().is_empty() {
            return Err(GitHubError::InvalidInput("topic cannot be empty".to_string()));
        }
        if page == 0 {
            return Err(GitHubError::InvalidInput(
                "page must be at least 1".to_string(),
            ));
        }

        let query = format!("topic:{topic}");
        let result = self
            .inner
            .search()
            .repositories(&query)
            .sort("stars")
            .order("desc")
            .per_page(per_page)
            .page(page)
            .send()
            .await
            .map_err(GitHubError::from)?;

        let has_next = result.next.is_some();
        let hits = result
            .items
            .into_iter()
            .filter_map(|repo| {
                let owner = repo.owner.as_ref().map(|owner| owner.login.clone()).or_else(|| {
                    repo.full_name
                        .as_deref()
                        .and_then(|full| full.split_once('/'))
                        .map(|(owner, _)| owner.to_string())
                });
                match owner {
                    Some(owner) => Some(SearchHit::new(owner, repo.name)),
                    None => {
                        debug!("Search hit {} has no owner, skipping", repo.name);
                        None
                    }
                }
            })
            .collect();

        Ok(SearchPage { hits, has_next })
    }
}
