//! On-disk document types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{AggregateStats, LanguageGroups};
use crate::collector::RepositoryMetric;

/// What a collection run hands over for persistence
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotInput {
    pub topic: String,
    pub repositories: Vec<RepositoryMetric>,
    pub aggregate_stats: AggregateStats,
    pub top_per_language: LanguageGroups,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotMetadata {
    pub topic: String,
    pub total_repositories: u64,
}

/// One dated capture, stored as `YYYY-MM-DD.json`.
///
/// Absent fields load as their defaults so older documents stay readable.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub collected_at: DateTime<Utc>,
    pub metadata: SnapshotMetadata,
    pub aggregate_stats: AggregateStats,
    pub repositories: Vec<RepositoryMetric>,
    pub top_per_language: LanguageGroups,
}

impl Snapshot {
    #[must_use]
    pub fn from_input(input: SnapshotInput, collected_at: DateTime<Utc>) -> Self {
        Self {
            collected_at,
            metadata: SnapshotMetadata {
                topic: input.topic,
                total_repositories: input.repositories.len() as u64,
            },
            aggregate_stats: input.aggregate_stats,
            repositories: input.repositories,
            top_per_language: input.top_per_language,
        }
    }
}

/// Scalar rollups of one snapshot date
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub date: String,
    pub total_repositories: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_contributors: u64,
    pub total_open_issues: u64,
    #[serde(rename = "totalOpenPRs")]
    pub total_open_prs: u64,
    pub repositories_with_releases: u64,
    pub archived_repositories: u64,
}

impl TimelineEntry {
    /// Project a raw snapshot document.
    ///
    /// Works on untyped JSON: any missing or non-numeric counter reads as 0.
    #[must_use]
    pub fn from_document(date: impl Into<String>, document: &Value) -> Self {
        let stats = document.get("aggregateStats");
        let field = |name: &str| {
            stats
                .and_then(|stats| stats.get(name))
                .and_then(Value::as_u64)
                .unwrap_or(0)
        };

        Self {
            date: date.into(),
            total_repositories: field("totalRepositories"),
            total_stars: field("totalStars"),
            total_forks: field("totalForks"),
            total_contributors: field("totalContributors"),
            total_open_issues: field("totalOpenIssues"),
            total_open_prs: field("totalOpenPRs"),
            repositories_with_releases: field("repositoriesWithReleases"),
            archived_repositories: field("archivedRepositories"),
        }
    }
}

/// First and last snapshot date, inclusive
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Time series rebuilt from every snapshot on disk, stored as `history.json`
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalTimeline {
    pub generated_at: DateTime<Utc>,
    pub snapshot_count: usize,
    pub date_range: DateRange,
    pub timeline: Vec<TimelineEntry>,
}

/// Latest snapshot plus history, for dashboard consumption
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationExport {
    pub current: Option<Snapshot>,
    pub historical: Option<HistoricalTimeline>,
    pub exported_at: DateTime<Utc>,
}
