//! Configuration for collection runs

/// Configuration for collection runs.
///
/// The pause between repositories is a [`CourtesyDelay`](super::CourtesyDelay)
/// policy handed to the collector, not a setting here.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Results per search page (GitHub API max is 100)
    pub search_page_size: u8,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            search_page_size: 100,
        }
    }
}
