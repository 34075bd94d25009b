use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use serde::Serialize;
use strum_macros::EnumString;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error: {0}")]
    Error(&'static str),
    #[error("Username '{0}' not found.")]
    NotFound(String),
    #[error("Failed to retrieve {resource}: HTTP {status}")]
    Retrieval { resource: &'static str, status: u16 },
    // the only reason of `reqwest` dependency..
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Account attributes returned by a profile lookup.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Profile {
    pub login: String,
    pub created_at: DateTime<Utc>,
    pub public_repos: u64,
    pub followers: u64,
}

/// Public event kinds worth reporting as recent activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Serialize)]
pub enum EventKind {
    PushEvent,
    PullRequestEvent,
    IssuesEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Constructor)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub kind: EventKind,
    pub repo: String,
    pub created_at: DateTime<Utc>,
}

/// Source of public account statistics.
#[async_trait]
pub trait Client: Send + Sync {
    /// Fails with [`Error::NotFound`] when no account has the given login.
    async fn user_profile(&self, username: &str) -> Result<Profile>;

    /// Total number of public pull requests authored by `username`, across all repositories.
    async fn pull_request_count(&self, username: &str) -> Result<u64>;

    async fn recent_activity(&self, username: &str) -> Result<Vec<ActivityEvent>>;
}
