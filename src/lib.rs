//! `ecosystem_observability` - topic-wide GitHub ecosystem metrics
//!
//! Collects metrics for every repository tagged with a topic, rolls them up
//! per language and ecosystem-wide, and keeps dated JSON snapshots together
//! with a historical timeline derived from them.
//!
//! The pipeline is Collector → Aggregator → Storage:
//! [`EcosystemCollector`] talks to the API through [`EcosystemApi`], the
//! [`aggregate`] functions are pure, and [`DataStorage`] owns the files.

// Module declarations
pub mod aggregate;
pub mod collector;
pub mod config;
pub mod github;
pub mod storage;

// Re-export GitHub client types
pub use github::{GitHubClient, GitHubClientBuilder};

// Re-export GitHub error types
pub use github::{GitHubError, GitHubResult};

pub use github::{
    EcosystemApi, PageProbe, ReleaseSummary, RepositoryDetails, SearchHit, SearchPage,
    last_page_or_item_count,
};

pub use collector::{
    CollectorConfig, CollectorError, CollectorResult, CourtesyDelay, CrawlReport,
    DEFAULT_COURTESY_DELAY, EcosystemCollector, FixedDelay, IssueCounts, MaxResults, NoDelay,
    ReleaseInfo, RepositoryMetric, RepositoryOutcome,
};

pub use aggregate::{
    AggregateStats, DEFAULT_TOP_N, LanguageGroups, UNKNOWN_LANGUAGE, calculate_aggregate_stats,
    get_top_per_language, group_by_language,
};

pub use storage::{
    DataStorage, DateRange, HISTORY_FILENAME, HistoricalTimeline, Snapshot, SnapshotInput,
    SnapshotMetadata, StorageError, StorageResult, TimelineEntry, VisualizationExport,
    stage_dashboard_data,
};
