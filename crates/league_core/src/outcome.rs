//! Outcome resolution.
//!
//! A match is decided by a cascade of tiers: stars (more is better), then
//! attack percentage (more is better), then completion time (less is better).
//! The first tier that separates the sides decides. A tier with a missing
//! value on either side leaves the match undetermined; equality on every
//! tier means the match has to be replayed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{LeagueError, Result};
use crate::types::{OutcomeRecord, Winner};

pub const MAX_STARS: u8 = 3;
pub const MAX_PCT: f64 = 100.0;

/// Result of comparing two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    A,
    B,
    /// Equal on every tier; the fixture must be replayed
    DrawRematch,
    /// Some tier needed a value that was not recorded
    Undetermined,
}

/// Raw metrics for both sides. Any value may still be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub stars_a: Option<u8>,
    pub stars_b: Option<u8>,
    pub pct_a: Option<f64>,
    pub pct_b: Option<f64>,
    pub time_a: Option<f64>,
    pub time_b: Option<f64>,
}

impl Metrics {
    pub fn complete(stars: (u8, u8), pct: (f64, f64), time: (f64, f64)) -> Self {
        Self {
            stars_a: Some(stars.0),
            stars_b: Some(stars.1),
            pct_a: Some(pct.0),
            pct_b: Some(pct.1),
            time_a: Some(time.0),
            time_b: Some(time.1),
        }
    }
}

/// Comparison tiers in the order they are consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Stars,
    Percentage,
    Time,
}

const CASCADE: [Tier; 3] = [Tier::Stars, Tier::Percentage, Tier::Time];

impl Tier {
    /// `Greater` means side A did better. `None` when a value is missing
    /// or not comparable.
    fn compare(self, m: &Metrics) -> Option<Ordering> {
        match self {
            Tier::Stars => Some(m.stars_a?.cmp(&m.stars_b?)),
            Tier::Percentage => m.pct_a?.partial_cmp(&m.pct_b?),
            Tier::Time => m.time_b?.partial_cmp(&m.time_a?),
        }
    }
}

/// Decide a match from raw metrics.
pub fn resolve_outcome(metrics: &Metrics) -> Outcome {
    for tier in CASCADE {
        match tier.compare(metrics) {
            None => return Outcome::Undetermined,
            Some(Ordering::Greater) => return Outcome::A,
            Some(Ordering::Less) => return Outcome::B,
            Some(Ordering::Equal) => {}
        }
    }
    Outcome::DrawRematch
}

/// Turn a submitted result into a storable record.
///
/// Stored records are never partial, so every value must be present, and
/// each must be inside its domain before the resolver sees it.
pub fn validate_submission(metrics: &Metrics, recorded_at: DateTime<Utc>) -> Result<OutcomeRecord> {
    let stars_a = require(metrics.stars_a, "stars_a")?;
    let stars_b = require(metrics.stars_b, "stars_b")?;
    let pct_a = require(metrics.pct_a, "pct_a")?;
    let pct_b = require(metrics.pct_b, "pct_b")?;
    let time_a = require(metrics.time_a, "time_a")?;
    let time_b = require(metrics.time_b, "time_b")?;

    check_stars("stars_a", stars_a)?;
    check_stars("stars_b", stars_b)?;
    check_pct("pct_a", pct_a)?;
    check_pct("pct_b", pct_b)?;
    check_time("time_a", time_a)?;
    check_time("time_b", time_b)?;

    let winner = Winner::from(resolve_outcome(metrics));
    Ok(OutcomeRecord {
        stars_a,
        stars_b,
        pct_a,
        pct_b,
        time_a,
        time_b,
        winner,
        recorded_at,
    })
}

fn require<T>(value: Option<T>, metric: &'static str) -> Result<T> {
    value.ok_or(LeagueError::IncompleteMetrics { metric })
}

fn check_stars(metric: &'static str, value: u8) -> Result<()> {
    if value > MAX_STARS {
        return Err(LeagueError::OutOfRangeMetric {
            metric,
            value: f64::from(value),
            range: "0..=3",
        });
    }
    Ok(())
}

fn check_pct(metric: &'static str, value: f64) -> Result<()> {
    if !(0.0..=MAX_PCT).contains(&value) {
        return Err(LeagueError::OutOfRangeMetric {
            metric,
            value,
            range: "0..=100",
        });
    }
    Ok(())
}

fn check_time(metric: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LeagueError::OutOfRangeMetric {
            metric,
            value,
            range: ">= 0 seconds",
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
