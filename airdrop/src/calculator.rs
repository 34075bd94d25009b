use chrono::{DateTime, Utc};
use derive_more::Constructor;
use serde::Serialize;
use std::fmt::Display;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const DAYS_PER_YEAR: f64 = 365.25;

const AGE_WEIGHT: f64 = 10.0;
const REPO_WEIGHT: f64 = 2.0;
const FOLLOWER_WEIGHT: f64 = 1.5;
const PULL_REQUEST_WEIGHT: f64 = 5.0;

/// Allocation tiers, highest first. A score must be strictly greater than the bound to reach a tier.
const ALLOCATION_TIERS: [(f64, u32); 4] = [(100.0, 5000), (50.0, 2000), (20.0, 500), (0.0, 100)];

/// Public statistics of a single account, as reported by the statistics source.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct AccountStatistics {
    pub username: String,
    pub account_created_at: DateTime<Utc>,
    pub public_repo_count: u64,
    pub follower_count: u64,
    pub pull_request_count: u64,
}

/// Display-ready outcome of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Constructor)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub username: String,
    pub account_age_years: u64,
    pub public_repos: u64,
    pub followers: u64,
    pub pull_requests: u64,
    pub score: u64,
    pub allocation: u32,
}

impl Display for EligibilityResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "user: {}\tage: {}y\trepos: {}\tfollowers: {}\tpull requests: {}\tscore: {}\tallocation: {}",
            self.username,
            self.account_age_years,
            self.public_repos,
            self.followers,
            self.pull_requests,
            self.score,
            self.allocation
        ))
    }
}

/// Fractional age of an account in years at `now`. Never negative.
pub fn account_age_years(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = now.signed_duration_since(created_at).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY / DAYS_PER_YEAR).max(0.0)
}

/// Raw, unrounded activity score of `stats` evaluated at `now`.
///
/// Non-decreasing in the account age and in each of the three counters.
pub fn compute_score(stats: &AccountStatistics, now: DateTime<Utc>) -> f64 {
    account_age_years(stats.account_created_at, now) * AGE_WEIGHT
        + stats.public_repo_count as f64 * REPO_WEIGHT
        + stats.follower_count as f64 * FOLLOWER_WEIGHT
        + stats.pull_request_count as f64 * PULL_REQUEST_WEIGHT
}

/// Maps a raw score onto its allocation tier.
pub fn compute_allocation(score: f64) -> u32 {
    ALLOCATION_TIERS
        .iter()
        .find(|(bound, _)| score > *bound)
        .map(|(_, allocation)| *allocation)
        .unwrap_or(0)
}

/// Scores `stats` at `now`.
///
/// The allocation is looked up with the raw score. The reported age is floored while the reported score is rounded.
pub fn evaluate(stats: &AccountStatistics, now: DateTime<Utc>) -> EligibilityResult {
    let age = account_age_years(stats.account_created_at, now);
    let score = compute_score(stats, now);
    EligibilityResult::new(
        stats.username.clone(),
        age.floor() as u64,
        stats.public_repo_count,
        stats.follower_count,
        stats.pull_request_count,
        score.round() as u64,
        compute_allocation(score),
    )
}

/// Tests

#[cfg(test)]
fn years_before(now: DateTime<Utc>, years: f64) -> DateTime<Utc> {
    let millis = years * DAYS_PER_YEAR * MILLIS_PER_DAY;
    now - chrono::Duration::milliseconds(millis as i64)
}

#[cfg(test)]
fn stats(created_at: DateTime<Utc>, repos: u64, followers: u64, pull_requests: u64) -> AccountStatistics {
    AccountStatistics::new("octocat".to_string(), created_at, repos, followers, pull_requests)
}

#[test]
fn allocation_boundaries_test() {
    assert_eq!(compute_allocation(100.0001), 5000);
    assert_eq!(compute_allocation(100.0), 2000);
    assert_eq!(compute_allocation(50.0), 500);
    assert_eq!(compute_allocation(50.5), 2000);
    assert_eq!(compute_allocation(20.0), 100);
    assert_eq!(compute_allocation(20.01), 500);
    assert_eq!(compute_allocation(0.0001), 100);
    assert_eq!(compute_allocation(0.0), 0);
    assert_eq!(compute_allocation(-1.0), 0);
}

#[test]
fn allocation_is_step_function_test() {
    let mut previous = 0;
    for step in 0..2_000 {
        let allocation = compute_allocation(step as f64 * 0.1);
        assert!(allocation >= previous, "allocation dropped at score {}", step as f64 * 0.1);
        previous = allocation;
    }
}

#[test]
fn veteran_account_test() {
    let now = Utc::now();
    let result = evaluate(&stats(years_before(now, 10.0), 20, 100, 10), now);
    assert_eq!(result.account_age_years, 10);
    assert_eq!(result.score, 340);
    assert_eq!(result.allocation, 5000);
    assert_eq!(result.public_repos, 20);
    assert_eq!(result.followers, 100);
    assert_eq!(result.pull_requests, 10);
}

#[test]
fn idle_account_test() {
    let now = Utc::now();
    let stats = stats(years_before(now, 1.0), 0, 0, 0);
    assert!((compute_score(&stats, now) - 10.0).abs() < 1e-9);
    let result = evaluate(&stats, now);
    assert_eq!(result.account_age_years, 1);
    assert_eq!(result.score, 10);
    assert_eq!(result.allocation, 100);
}

#[test]
fn young_account_test() {
    let now = Utc::now();
    let result = evaluate(&stats(years_before(now, 0.5), 1, 2, 0), now);
    assert_eq!(result.account_age_years, 0);
    assert_eq!(result.score, 10);
    assert_eq!(result.allocation, 100);
}

#[test]
fn age_is_floored_test() {
    let now = Utc::now();
    let result = evaluate(&stats(years_before(now, 2.9), 0, 0, 0), now);
    assert_eq!(result.account_age_years, 2);
    assert_eq!(result.score, 29);
}

#[test]
fn score_is_rounded_but_tier_uses_raw_score_test() {
    let now = Utc::now();
    // 0.46y * 10 + 30 * 1.5 = 49.6
    let stats = stats(years_before(now, 0.46), 0, 30, 0);
    let raw = compute_score(&stats, now);
    assert!((raw - 49.6).abs() < 1e-6);
    let result = evaluate(&stats, now);
    assert_eq!(result.score, 50);
    assert_eq!(result.allocation, 500);
}

#[test]
fn future_creation_date_is_zero_age_test() {
    let now = Utc::now();
    let created_at = now + chrono::Duration::days(3);
    assert_eq!(account_age_years(created_at, now), 0.0);
    let result = evaluate(&stats(created_at, 0, 0, 0), now);
    assert_eq!(result.account_age_years, 0);
    assert_eq!(result.score, 0);
    assert_eq!(result.allocation, 0);
}

#[test]
fn score_is_monotonic_test() {
    let now = Utc::now();
    let created_at = years_before(now, 3.0);
    let base = stats(created_at, 4, 7, 2);
    let base_score = compute_score(&base, now);
    for extra in 0..50u64 {
        let more_repos = stats(created_at, 4 + extra, 7, 2);
        let more_followers = stats(created_at, 4, 7 + extra, 2);
        let more_pull_requests = stats(created_at, 4, 7, 2 + extra);
        assert!(compute_score(&more_repos, now) >= base_score);
        assert!(compute_score(&more_followers, now) >= base_score);
        assert!(compute_score(&more_pull_requests, now) >= base_score);
    }
    for days in 0..50i64 {
        let older = stats(created_at - chrono::Duration::days(days), 4, 7, 2);
        assert!(compute_score(&older, now) >= base_score);
    }
}

#[test]
fn result_serializes_camel_case_test() {
    let result = EligibilityResult::new("octocat".to_string(), 10, 20, 100, 10, 340, 5000);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["accountAgeYears"], 10);
    assert_eq!(json["publicRepos"], 20);
    assert_eq!(json["pullRequests"], 10);
    assert_eq!(json["allocation"], 5000);
}
