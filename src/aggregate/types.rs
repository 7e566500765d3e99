//! Aggregate statistics types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::collector::RepositoryMetric;

/// Repositories partitioned by primary language
pub type LanguageGroups = BTreeMap<String, Vec<RepositoryMetric>>;

/// Ecosystem-wide rollup over a list of repositories
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregateStats {
    pub total_repositories: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_contributors: u64,
    pub total_open_issues: u64,
    #[serde(rename = "totalOpenPRs")]
    pub total_open_prs: u64,
    pub language_distribution: BTreeMap<String, u64>,
    pub repositories_with_releases: u64,
    pub archived_repositories: u64,
}

impl AggregateStats {
    /// Languages ordered by repository count, most common first.
    ///
    /// Ties keep alphabetical order.
    #[must_use]
    pub fn top_languages(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut languages: Vec<(&str, u64)> = self
            .language_distribution
            .iter()
            .map(|(language, count)| (language.as_str(), *count))
            .collect();
        languages.sort_by(|a, b| b.1.cmp(&a.1));
        languages.truncate(limit);
        languages
    }
}
