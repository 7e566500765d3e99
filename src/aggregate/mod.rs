//! In-memory rollups over collected repositories
//!
//! Pure functions: no I/O, no failure modes.

mod types;

pub use types::{AggregateStats, LanguageGroups};

use crate::collector::RepositoryMetric;

/// Bucket for repositories without a detected primary language
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Group size used when no other is requested
pub const DEFAULT_TOP_N: usize = 5;

fn language_of(repo: &RepositoryMetric) -> &str {
    repo.language.as_deref().unwrap_or(UNKNOWN_LANGUAGE)
}

/// Partition repositories by language, each group sorted by stars descending.
///
/// The sort is stable: repositories with equal stars keep their input order.
#[must_use]
pub fn group_by_language(repositories: &[RepositoryMetric]) -> LanguageGroups {
    let mut groups = LanguageGroups::new();

    for repo in repositories {
        groups
            .entry(language_of(repo).to_string())
            .or_default()
            .push(repo.clone());
    }

    for group in groups.values_mut() {
        group.sort_by(|a, b| b.stars.cmp(&a.stars));
    }

    groups
}

/// The `n` most-starred repositories of each language.
///
/// Groups smaller than `n` are returned whole.
#[must_use]
pub fn get_top_per_language(repositories: &[RepositoryMetric], n: usize) -> LanguageGroups {
    let mut groups = group_by_language(repositories);
    for group in groups.values_mut() {
        group.truncate(n);
    }
    groups
}

/// Sum the per-repository counters in a single pass
#[must_use]
pub fn calculate_aggregate_stats(repositories: &[RepositoryMetric]) -> AggregateStats {
    let mut stats = AggregateStats {
        total_repositories: repositories.len() as u64,
        ..AggregateStats::default()
    };

    for repo in repositories {
        stats.total_stars += repo.stars;
        stats.total_forks += repo.forks;
        stats.total_contributors += repo.contributors;
        stats.total_open_issues += repo.open_issues;
        stats.total_open_prs += repo.open_prs;

        if repo.release.has_releases {
            stats.repositories_with_releases += 1;
        }
        if repo.archived {
            stats.archived_repositories += 1;
        }

        *stats
            .language_distribution
            .entry(language_of(repo).to_string())
            .or_insert(0) += 1;
    }

    stats
}
