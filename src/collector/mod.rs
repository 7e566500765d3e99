//! Ecosystem metrics collection
//!
//! Crawls every repository tagged with a topic and derives per-repository
//! metrics. Remote calls are issued strictly one after another, with a
//! courtesy pause after each repository that was collected.

mod config;
mod courtesy;
mod types;

pub use config::CollectorConfig;
pub use courtesy::{CourtesyDelay, DEFAULT_COURTESY_DELAY, FixedDelay, NoDelay};
pub use types::{
    CollectorError, CollectorResult, CrawlReport, MaxResults, ReleaseInfo, RepositoryMetric,
    RepositoryOutcome,
};

use log::{error, info, warn};

use crate::github::api::{EcosystemApi, SearchHit};
use crate::github::client::GitHubClient;
use crate::github::error::{GitHubError, GitHubResult};

/// Page size of the counting probes. The last-page count is exact only at 1.
const PROBE_PAGE_SIZE: u8 = 1;

/// Open issue and open pull request totals of one repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub open_issues: u64,
    pub open_prs: u64,
}

/// Collects repository metrics through an [`EcosystemApi`].
#[derive(Debug, Clone)]
pub struct EcosystemCollector<A, D = FixedDelay> {
    api: A,
    delay: D,
    config: CollectorConfig,
}

impl EcosystemCollector<GitHubClient, FixedDelay> {
    /// Collector over the live GitHub API
    pub fn new(token: impl Into<String>) -> GitHubResult<Self> {
        Self::with_config(token, CollectorConfig::default(), FixedDelay::default())
    }

    pub fn with_config(
        token: impl Into<String>,
        config: CollectorConfig,
        delay: FixedDelay,
    ) -> GitHubResult<Self> {
        let client = GitHubClient::with_token(token)?;
        Ok(Self::with_api(client, delay, config))
    }
}

impl<A, D> EcosystemCollector<A, D>
where
    A: EcosystemApi,
    D: CourtesyDelay,
{
    #[must_use]
    pub fn with_api(api: A, delay: D, config: CollectorConfig) -> Self {
        Self { api, delay, config }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    #[must_use]
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Fetch the metrics of one repository.
    ///
    /// Only the primary repository lookup can fail; the counting sub-calls
    /// degrade to 0. Release fields are left at their defaults.
    pub async fn fetch_repository_metrics(
        &self,
        owner: &str,
        repo: &str,
    ) -> CollectorResult<RepositoryMetric> {
        info!("Fetching metrics for {owner}/{repo}");

        let details = self
            .api
            .get_repository(owner, repo)
            .await
            .map_err(|source| CollectorError::Repository {
                repository: format!("{owner}/{repo}"),
                source,
            })?;

        let contributors = self.fetch_contributors_count(owner, repo).await;
        let counts = self.fetch_issue_and_pr_counts(owner, repo).await;

        Ok(RepositoryMetric {
            repository: format!("{owner}/{repo}"),
            name: details.name,
            full_name: details.full_name,
            description: details.description,
            language: details.language,
            topics: details.topics,
            stars: details.stars,
            forks: details.forks,
            watchers: details.watchers,
            open_issues: counts.open_issues,
            open_prs: counts.open_prs,
            contributors,
            created_at: details.created_at,
            updated_at: details.updated_at,
            pushed_at: details.pushed_at,
            default_branch: details.default_branch,
            license: details.license,
            archived: details.archived,
            disabled: details.disabled,
            has_wiki: details.has_wiki,
            has_pages: details.has_pages,
            size: details.size,
            release: ReleaseInfo::default(),
        })
    }

    /// Number of contributors, anonymous ones included. 0 when the listing fails.
    pub async fn fetch_contributors_count(&self, owner: &str, repo: &str) -> u64 {
        match self
            .api
            .probe_contributors(owner, repo, PROBE_PAGE_SIZE)
            .await
        {
            Ok(probe) => probe.count(),
            Err(e) => {
                warn!("Could not fetch contributors for {owner}/{repo}: {e}");
                0
            }
        }
    }

    /// Open issue and pull request counts; both 0 if either listing fails.
    pub async fn fetch_issue_and_pr_counts(&self, owner: &str, repo: &str) -> IssueCounts {
        let counts = async {
            let issues = self
                .api
                .probe_open_issues(owner, repo, PROBE_PAGE_SIZE)
                .await?;
            let pulls = self
                .api
                .probe_open_pull_requests(owner, repo, PROBE_PAGE_SIZE)
                .await?;
            Ok::<_, GitHubError>(IssueCounts {
                open_issues: issues.count(),
                open_prs: pulls.count(),
            })
        }
        .await;

        counts.unwrap_or_else(|e| {
            warn!("Could not fetch issue/PR counts for {owner}/{repo}: {e}");
            IssueCounts::default()
        })
    }

    /// Latest release of a repository. No release and a failed lookup look the same.
    pub async fn fetch_release_info(&self, owner: &str, repo: &str) -> ReleaseInfo {
        match self.api.latest_release(owner, repo).await {
            Ok(Some(release)) => ReleaseInfo {
                has_releases: true,
                latest_release: Some(release.tag_name),
                latest_release_date: release.published_at,
            },
            Ok(None) => ReleaseInfo::default(),
            Err(e) => {
                warn!("Could not fetch releases for {owner}/{repo}: {e}");
                ReleaseInfo::default()
            }
        }
    }

    /// Crawl all repositories tagged with `topic`, most-starred first.
    ///
    /// Repositories whose metadata cannot be fetched are skipped and recorded
    /// in the report. The crawl stops once `max_results` records have been
    /// collected, or when the search runs out of pages.
    pub async fn collect_topic_repositories(
        &self,
        topic: &str,
        max_results: MaxResults,
    ) -> CrawlReport {
        info!("Collecting repositories with topic: {topic}");

        let mut report = CrawlReport::default();
        let mut collected = 0usize;
        let mut page = 1u32;

        'pages: loop {
            if max_results.is_reached(collected) {
                info!("Reached maximum repository limit: {max_results}");
                break;
            }

            let result = match self
                .api
                .search_topic(topic, page, self.config.search_page_size)
                .await
            {
                Ok(result) => result,
                Err(source) => {
                    error!("Search for topic {topic} failed on page {page}: {source}");
                    report.search_error = Some(CollectorError::Search {
                        topic: topic.to_string(),
                        page,
                        source,
                    });
                    break;
                }
            };

            if result.hits.is_empty() {
                break;
            }

            for hit in &result.hits {
                if max_results.is_reached(collected) {
                    info!("Reached maximum repository limit: {max_results}");
                    break 'pages;
                }

                let outcome = self.collect_one(hit).await;
                if matches!(outcome, RepositoryOutcome::Collected(_)) {
                    collected += 1;
                    info!("Processed {collected} repositories");
                    self.delay.pause().await;
                }
                report.outcomes.push(outcome);
            }

            if !result.has_next {
                break;
            }
            page += 1;
        }

        report
    }

    async fn collect_one(&self, hit: &SearchHit) -> RepositoryOutcome {
        match self.fetch_repository_metrics(&hit.owner, &hit.name).await {
            Ok(mut metric) => {
                metric.release = self.fetch_release_info(&hit.owner, &hit.name).await;
                RepositoryOutcome::Collected(metric)
            }
            Err(e) => {
                error!("Failed to process {}: {e}", hit.full_name());
                RepositoryOutcome::Skipped {
                    repository: hit.full_name(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
