//! GitHub API operations module
//!
//! Provides the remote calls of the ecosystem collector using the octocrab library.

pub mod api;
pub mod client;
pub mod error;
pub mod pagination;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};

// Re-export error types
pub use error::{GitHubError, GitHubResult};

pub use api::{EcosystemApi, ReleaseSummary, RepositoryDetails, SearchHit, SearchPage};
pub use pagination::{PageProbe, last_page_or_item_count};
