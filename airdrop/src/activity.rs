//! Alternative, rate based allocation.
//!
//! Unlike [`crate::calculator`] this formula weights account age, pull requests and followers only,
//! and converts the resulting score into tokens at a fixed rate instead of a tier table.
//! It is not used by [`crate::calculator::evaluate`].

use crate::calculator::account_age_years;
use chrono::{DateTime, Utc};

const AGE_WEIGHT: f64 = 0.3;
const PULL_REQUEST_WEIGHT: f64 = 0.4;
const FOLLOWER_WEIGHT: f64 = 0.3;

/// Score points per token.
const SCORE_PER_TOKEN: f64 = 0.0025;

/// Account age in years, rounded to two decimal points.
pub fn rounded_account_age_years(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    round_to_hundredths(account_age_years(created_at, now))
}

/// Activity score rounded to two decimal points.
pub fn activity_score(account_age_years: f64, pull_requests: u64, followers: u64) -> f64 {
    round_to_hundredths(
        account_age_years * AGE_WEIGHT + pull_requests as f64 * PULL_REQUEST_WEIGHT + followers as f64 * FOLLOWER_WEIGHT,
    )
}

pub fn token_allocation(activity_score: f64) -> u64 {
    (activity_score / SCORE_PER_TOKEN).round().max(0.0) as u64
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[test]
fn activity_score_test() {
    assert_eq!(activity_score(2.0, 10, 5), 6.1);
    assert_eq!(activity_score(0.0, 0, 0), 0.0);
    assert_eq!(activity_score(1.333, 0, 0), 0.4);
}

#[test]
fn token_allocation_test() {
    assert_eq!(token_allocation(6.1), 2440);
    assert_eq!(token_allocation(0.0), 0);
    assert_eq!(token_allocation(0.01), 4);
}

#[test]
fn rounded_age_test() {
    let now = Utc::now();
    let created_at = now - chrono::Duration::days(548);
    // 548 / 365.25 = 1.50034...
    assert_eq!(rounded_account_age_years(created_at, now), 1.5);
}
