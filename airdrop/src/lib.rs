//! Airdrop eligibility estimation
//!
//! # Overview
//!
//! Estimates a hypothetical airdrop token allocation for a GitHub account from a handful of its public attributes:
//! how old the account is, how many public repositories it owns, how many followers it has and how many public pull requests it authored.
//!
//! The statistics are turned into an activity score
//! `age_in_years * 10 + public_repos * 2 + followers * 1.5 + pull_requests * 5`,
//! and the score is mapped onto a fixed table of allocation tiers (`0`, `100`, `500`, `2000` or `5000` tokens).
//!
//! The [`calculator`] module holds that scoring engine. It is pure: the evaluation instant is always passed in by the caller.
//! With the `api` feature the [`api`] module describes the statistics source, and with the `checker` feature
//! [`checker::EligibilityChecker`] validates a submitted username, queries the source and evaluates the result.

pub mod activity;
#[cfg(feature = "api")]
pub mod api;
pub mod calculator;
#[cfg(feature = "checker")]
pub mod checker;

pub use calculator::{compute_allocation, compute_score, evaluate, AccountStatistics, EligibilityResult};
#[cfg(feature = "checker")]
pub use checker::{CheckError, EligibilityChecker, Identity, ViewState};
