//! Tests for aggregate statistics.

use super::repo;
use ecosystem_observability::{
    AggregateStats, RepositoryMetric, UNKNOWN_LANGUAGE, calculate_aggregate_stats,
};

#[test]
fn test_totals_sum_every_field() {
    let mut a = repo("a", Some("Rust"), 100);
    a.forks = 10;
    a.contributors = 7;
    a.open_issues = 3;
    a.open_prs = 2;
    a.release.has_releases = true;

    let mut b = repo("b", Some("Rust"), 50);
    b.forks = 5;
    b.contributors = 1;
    b.archived = true;

    let c = repo("c", None, 0);

    let stats = calculate_aggregate_stats(&[a, b, c]);

    assert_eq!(stats.total_repositories, 3);
    assert_eq!(stats.total_stars, 150);
    assert_eq!(stats.total_forks, 15);
    assert_eq!(stats.total_contributors, 8);
    assert_eq!(stats.total_open_issues, 3);
    assert_eq!(stats.total_open_prs, 2);
    assert_eq!(stats.repositories_with_releases, 1);
    assert_eq!(stats.archived_repositories, 1);
    assert_eq!(stats.language_distribution["Rust"], 2);
    assert_eq!(stats.language_distribution[UNKNOWN_LANGUAGE], 1);
}

#[test]
fn test_distribution_sums_to_total() {
    let repos: Vec<RepositoryMetric> = ["Go", "Go", "C", "Lua", "C", "Go"]
        .iter()
        .enumerate()
        .map(|(i, lang)| repo(&format!("r{i}"), Some(lang), i as u64))
        .chain(std::iter::once(repo("none", None, 0)))
        .collect();

    let stats = calculate_aggregate_stats(&repos);

    assert_eq!(stats.total_repositories, repos.len() as u64);
    assert_eq!(
        stats.language_distribution.values().sum::<u64>(),
        stats.total_repositories
    );
}

#[test]
fn test_missing_fields_count_as_zero() {
    let sparse: RepositoryMetric =
        serde_json::from_str(r#"{"repository": "org/sparse", "stars": 12}"#).unwrap();
    let full = repo("full", Some("Ruby"), 8);

    let stats = calculate_aggregate_stats(&[sparse, full]);

    assert_eq!(stats.total_repositories, 2);
    assert_eq!(stats.total_stars, 20);
    assert_eq!(stats.total_contributors, 0);
    assert_eq!(stats.language_distribution[UNKNOWN_LANGUAGE], 1);
}

#[test]
fn test_empty_input_yields_zeroed_stats() {
    assert_eq!(calculate_aggregate_stats(&[]), AggregateStats::default());
}

#[test]
fn test_serialized_field_names() {
    let mut r = repo("a", Some("Rust"), 1);
    r.open_prs = 4;
    let stats = calculate_aggregate_stats(&[r]);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["totalRepositories"], 1);
    assert_eq!(json["totalOpenPRs"], 4);
    assert_eq!(json["languageDistribution"]["Rust"], 1);
}

#[test]
fn test_top_languages() {
    let repos = vec![
        repo("a", Some("Go"), 1),
        repo("b", Some("Rust"), 1),
        repo("c", Some("Rust"), 1),
        repo("d", Some("C"), 1),
    ];
    let stats = calculate_aggregate_stats(&repos);

    assert_eq!(
        stats.top_languages(2),
        vec![("Rust", 2), ("C", 1)]
    );
}
