use crate::api::{self, ActivityEvent, Client};
use crate::calculator::{evaluate, AccountStatistics, EligibilityResult};
use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Failure of a single eligibility check. `Display` yields the message shown to the end user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("Username must not be empty.")]
    Validation,
    #[error("Sign in with GitHub to check your own allocation.")]
    NotSignedIn,
    #[error("Username '{0}' not found.")]
    NotFound(String),
    #[error("Failed to retrieve GitHub account data. Please try again later.")]
    Retrieval,
    #[error("Something went wrong while processing your request.")]
    Unexpected,
}

impl From<api::Error> for CheckError {
    fn from(err: api::Error) -> Self {
        match err {
            api::Error::NotFound(username) => CheckError::NotFound(username),
            err @ api::Error::Retrieval { .. } => {
                error!("{}", err);
                CheckError::Retrieval
            }
            err => {
                error!("Eligibility check failed: {:?}", err);
                CheckError::Unexpected
            }
        }
    }
}

/// Who is making the current request. Built per request and handed to [`EligibilityChecker::check_signed_in`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    login: Option<String>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Identity { login: None }
    }

    pub fn signed_in<STR: Into<String>>(login: STR) -> Self {
        Identity {
            login: Some(login.into()),
        }
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }
}

/// What the presentation layer renders for a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewState {
    Pending,
    Success { data: EligibilityResult },
    Error { message: String },
}

impl From<Result<EligibilityResult, CheckError>> for ViewState {
    fn from(result: Result<EligibilityResult, CheckError>) -> Self {
        match result {
            Ok(data) => ViewState::Success { data },
            Err(err) => ViewState::Error {
                message: err.to_string(),
            },
        }
    }
}

pub struct EligibilityChecker<CLIENT>
where
    CLIENT: Client,
{
    client: Arc<CLIENT>,
}

impl<CLIENT> EligibilityChecker<CLIENT>
where
    CLIENT: 'static + Client,
{
    pub fn new(client: CLIENT) -> Self {
        EligibilityChecker {
            client: Arc::new(client),
        }
    }

    /// Fetches the statistics of `username` and evaluates them at `now`.
    ///
    /// Profile and pull request lookups run concurrently. A missing profile takes precedence over
    /// any pull request lookup failure.
    pub async fn check(&self, username: &str, now: DateTime<Utc>) -> Result<EligibilityResult, CheckError> {
        let username = validate_username(username)?;
        debug!("Checking eligibility of {}", username);
        let (profile, pull_requests) = futures::join!(
            self.client.user_profile(username),
            self.client.pull_request_count(username)
        );
        let profile = profile?;
        let pull_requests = pull_requests?;
        let stats = AccountStatistics::new(
            profile.login,
            profile.created_at,
            profile.public_repos,
            profile.followers,
            pull_requests,
        );
        let result = evaluate(&stats, now);
        debug!("Evaluated {}", result);
        Ok(result)
    }

    pub async fn check_signed_in(&self, identity: &Identity, now: DateTime<Utc>) -> Result<EligibilityResult, CheckError> {
        match identity.login() {
            Some(login) => self.check(login, now).await,
            None => Err(CheckError::NotSignedIn),
        }
    }

    /// Recent push, pull request and issue events of `username`. Lookup failures yield an empty list.
    pub async fn recent_activity(&self, username: &str) -> Result<Vec<ActivityEvent>, CheckError> {
        let username = validate_username(username)?;
        match self.client.recent_activity(username).await {
            Ok(events) => Ok(events),
            Err(err) => {
                warn!("Failed to get recent activity of {}: {}", username, err);
                Ok(Vec::new())
            }
        }
    }
}

/// Trims `username`, rejecting blank input.
pub fn validate_username(username: &str) -> Result<&str, CheckError> {
    match username.trim() {
        "" => Err(CheckError::Validation),
        username => Ok(username),
    }
}
