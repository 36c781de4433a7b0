//! Push payload types.

use serde::Deserialize;

/// GitHub repository.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct GhRepository {
    /// Full name, as `owner/name`.
    pub full_name: String,
}

/// GitHub commit, reduced to its file lists.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct GhCommit {
    /// Added paths.
    #[serde(default)]
    pub added: Vec<String>,
    /// Modified paths.
    #[serde(default)]
    pub modified: Vec<String>,
    /// Removed paths.
    #[serde(default)]
    pub removed: Vec<String>,
}

/// GitHub push event.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GhPushEvent {
    /// Reference.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Repository.
    pub repository: GhRepository,
    /// Commits.
    pub commits: Option<Vec<GhCommit>>,
}
