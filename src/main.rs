// Ecosystem metrics collector
//
// Periodic batch job: crawl a topic, persist today's snapshot, rebuild the
// historical timeline.

use anyhow::{Context, Result, bail};
use clap::Parser;
use ecosystem_observability::config::Config;
use ecosystem_observability::{
    AggregateStats, CollectorConfig, DataStorage, EcosystemCollector, SnapshotInput,
    calculate_aggregate_stats, get_top_per_language, stage_dashboard_data,
};
use log::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let token = match config.token() {
        Ok(token) => token.to_string(),
        Err(message) => bail!(message),
    };

    info!("Ecosystem Observability Data Collector");
    info!("Topic: {}", config.topic);
    info!("Max repositories: {}", config.max_repos);
    info!("Data directory: {}", config.data_dir.display());

    let collector = EcosystemCollector::with_config(
        token,
        CollectorConfig::default(),
        config.courtesy_delay(),
    )
        .context("Failed to create GitHub client")?;
    let storage = DataStorage::new(&config.data_dir).context("Failed to open data directory")?;

    info!("Starting data collection...");
    let mut report = collector
        .collect_topic_repositories(&config.topic, config.max_repos)
        .await;

    let attempted = report.attempted();
    let succeeded = report.succeeded();
    for (repository, reason) in report.skipped() {
        error!("Skipped {repository}: {reason}");
    }
    if let Some(search_error) = report.search_error.take() {
        if succeeded == 0 {
            return Err(search_error).context("Repository search failed");
        }
        error!("Search ended early, keeping {succeeded} collected repositories: {search_error}");
    }

    let repositories = report.into_repositories();
    info!("Collected data for {succeeded} of {attempted} repositories");

    info!("Calculating aggregate statistics...");
    let aggregate_stats = calculate_aggregate_stats(&repositories);

    info!("Grouping repositories by language...");
    let top_per_language = get_top_per_language(&repositories, config.top_n);

    info!("Saving snapshot...");
    storage
        .save_snapshot(
            SnapshotInput {
                topic: config.topic.clone(),
                repositories,
                aggregate_stats: aggregate_stats.clone(),
                top_per_language,
            },
            None,
        )
        .context("Failed to save snapshot")?;

    info!("Generating historical summary...");
    storage
        .save_historical_summary()
        .context("Failed to save historical summary")?;

    if let Some(stage_dir) = &config.stage_dir {
        let staged = stage_dashboard_data(storage.data_dir(), stage_dir)
            .context("Failed to stage dashboard data")?;
        info!("Staged {} data files into {}", staged.len(), stage_dir.display());
    }

    log_summary(&aggregate_stats);
    info!("Data collection completed successfully!");

    Ok(())
}

fn log_summary(stats: &AggregateStats) {
    info!("Collection Summary");
    info!("Total repositories: {}", stats.total_repositories);
    info!("Total stars: {}", stats.total_stars);
    info!("Total forks: {}", stats.total_forks);
    info!("Total contributors: {}", stats.total_contributors);
    info!("Open issues: {}", stats.total_open_issues);
    info!("Open PRs: {}", stats.total_open_prs);
    info!("Repositories with releases: {}", stats.repositories_with_releases);
    info!("Archived repositories: {}", stats.archived_repositories);
    info!("Language distribution:");
    for (language, count) in stats.top_languages(10) {
        info!("  {language}: {count}");
    }
}
