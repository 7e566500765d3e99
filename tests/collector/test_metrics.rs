//! Tests for per-repository metric fetching.

use super::fake_api::{FakeApi, details, last_page};
use chrono::{TimeZone, Utc};
use ecosystem_observability::{
    CollectorConfig, CollectorError, EcosystemCollector, IssueCounts, NoDelay, PageProbe,
    ReleaseInfo, ReleaseSummary,
};

fn collector(api: FakeApi) -> EcosystemCollector<FakeApi, NoDelay> {
    EcosystemCollector::with_api(api, NoDelay, CollectorConfig::default())
}

#[tokio::test]
async fn test_repository_metrics_combine_all_counts() {
    let mut api = FakeApi::default();
    let mut repo = details("json-schema-spec", 4200, Some("JavaScript"));
    repo.full_name = Some("json-schema-org/json-schema-spec".to_string());
    repo.license = Some("MIT".to_string());
    repo.topics = vec!["json-schema".to_string()];
    repo.archived = true;
    api.repositories
        .insert("json-schema-org/json-schema-spec".to_string(), repo);
    api.contributors
        .insert("json-schema-org/json-schema-spec".to_string(), last_page(87));
    api.issues
        .insert("json-schema-org/json-schema-spec".to_string(), last_page(31));
    api.pulls.insert(
        "json-schema-org/json-schema-spec".to_string(),
        PageProbe::new(1, None),
    );

    let collector = collector(api);
    let metric = collector
        .fetch_repository_metrics("json-schema-org", "json-schema-spec")
        .await
        .unwrap();

    assert_eq!(metric.repository, "json-schema-org/json-schema-spec");
    assert_eq!(metric.name, "json-schema-spec");
    assert_eq!(metric.language.as_deref(), Some("JavaScript"));
    assert_eq!(metric.stars, 4200);
    assert_eq!(metric.forks, 420);
    assert_eq!(metric.contributors, 87);
    assert_eq!(metric.open_issues, 31);
    assert_eq!(metric.open_prs, 1);
    assert_eq!(metric.license.as_deref(), Some("MIT"));
    assert!(metric.archived);
    assert_eq!(metric.release, ReleaseInfo::default());
}

#[tokio::test]
async fn test_counting_probes_use_page_size_one() {
    let mut api = FakeApi::default();
    api.add_repository("o", "r", 1);

    let collector = collector(api);
    collector.fetch_repository_metrics("o", "r").await.unwrap();

    assert_eq!(
        collector.api().calls(),
        vec![
            "repo:o/r".to_string(),
            "contributors:o/r:per_page=1".to_string(),
            "issues:o/r:per_page=1".to_string(),
            "pulls:o/r:per_page=1".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_language_is_not_defaulted_at_collection() {
    let mut api = FakeApi::default();
    api.repositories
        .insert("o/r".to_string(), details("r", 3, None));

    let metric = collector(api)
        .fetch_repository_metrics("o", "r")
        .await
        .unwrap();
    assert_eq!(metric.language, None);
}

#[tokio::test]
async fn test_primary_fetch_failure_is_an_error() {
    let api = FakeApi::default();

    let err = collector(api)
        .fetch_repository_metrics("ghost", "missing")
        .await
        .unwrap_err();
    match err {
        CollectorError::Repository { repository, .. } => {
            assert_eq!(repository, "ghost/missing");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_contributor_failure_degrades_to_zero() {
    let mut api = FakeApi::default();
    api.add_repository("o", "r", 10);
    api.contributors.insert("o/r".to_string(), last_page(50));
    api.failing.insert("contributors:o/r".to_string());
    api.issues.insert("o/r".to_string(), last_page(4));

    let collector = collector(api);
    assert_eq!(collector.fetch_contributors_count("o", "r").await, 0);

    let metric = collector.fetch_repository_metrics("o", "r").await.unwrap();
    assert_eq!(metric.contributors, 0);
    assert_eq!(metric.open_issues, 4);
}

#[tokio::test]
async fn test_single_contributor_without_marker() {
    let mut api = FakeApi::default();
    api.contributors
        .insert("o/r".to_string(), PageProbe::new(1, None));

    assert_eq!(collector(api).fetch_contributors_count("o", "r").await, 1);
}

#[tokio::test]
async fn test_issue_failure_zeroes_both_counts() {
    let mut api = FakeApi::default();
    api.issues.insert("o/r".to_string(), last_page(9));
    api.pulls.insert("o/r".to_string(), last_page(3));
    api.failing.insert("issues:o/r".to_string());

    let counts = collector(api).fetch_issue_and_pr_counts("o", "r").await;
    assert_eq!(counts, IssueCounts::default());
}

#[tokio::test]
async fn test_pull_request_failure_zeroes_both_counts() {
    let mut api = FakeApi::default();
    api.issues.insert("o/r".to_string(), last_page(9));
    api.failing.insert("pulls:o/r".to_string());

    let counts = collector(api).fetch_issue_and_pr_counts("o", "r").await;
    assert_eq!(counts.open_issues, 0);
    assert_eq!(counts.open_prs, 0);
}

#[tokio::test]
async fn test_issue_and_pr_counts_are_independent() {
    let mut api = FakeApi::default();
    api.issues.insert("o/r".to_string(), last_page(120));
    api.pulls.insert("o/r".to_string(), PageProbe::new(0, None));

    let counts = collector(api).fetch_issue_and_pr_counts("o", "r").await;
    assert_eq!(
        counts,
        IssueCounts {
            open_issues: 120,
            open_prs: 0
        }
    );
}

#[tokio::test]
async fn test_release_info() {
    let published = Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap();
    let mut api = FakeApi::default();
    api.releases.insert(
        "o/released".to_string(),
        ReleaseSummary {
            tag_name: "v2.1.0".to_string(),
            published_at: Some(published),
        },
    );
    api.failing.insert("releases:o/broken".to_string());

    let collector = collector(api);

    let info = collector.fetch_release_info("o", "released").await;
    assert!(info.has_releases);
    assert_eq!(info.latest_release.as_deref(), Some("v2.1.0"));
    assert_eq!(info.latest_release_date, Some(published));

    assert_eq!(
        collector.fetch_release_info("o", "none").await,
        ReleaseInfo::default()
    );
    assert_eq!(
        collector.fetch_release_info("o", "broken").await,
        ReleaseInfo::default()
    );
}
