//! Standings aggregation.
//!
//! Folds a season's fixtures into one row per participant and ranks the
//! rows. Only fixtures with an outcome record count; unplayed fixtures only
//! make sure both sides show up in the table.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::outcome::{resolve_outcome, Outcome};
use crate::types::{Fixture, Participant, ParticipantId};

/// Points for a win. Rematches and losses give nothing.
pub const POINTS_PER_WIN: u32 = 1;

/// Shown when a fixture references someone missing from the roster
pub const UNKNOWN_NAME: &str = "N/A";

/// One line of the standings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    /// 1-based position, strictly sequential
    pub rank: usize,
    pub participant_id: ParticipantId,
    pub name: String,
    pub points: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub matches_played: u32,
    pub stars_scored: u32,
    pub stars_conceded: u32,
    pub star_diff: i64,
    /// Mean attack percentage, rounded to two decimals
    pub avg_pct: f64,
    /// Mean completion time in seconds, rounded to two decimals
    pub avg_time: f64,
}

#[derive(Debug, Default)]
struct Tally {
    points: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    matches_played: u32,
    stars_scored: u32,
    stars_conceded: u32,
    pcts: Vec<f64>,
    times: Vec<f64>,
}

impl Tally {
    fn record_side(&mut self, scored: u8, conceded: u8, pct: f64, time: f64) {
        self.matches_played += 1;
        self.stars_scored += u32::from(scored);
        self.stars_conceded += u32::from(conceded);
        self.pcts.push(pct);
        self.times.push(time);
    }

    fn win(&mut self) {
        self.points += POINTS_PER_WIN;
        self.wins += 1;
    }
}

type CmpFunc = fn(&StandingRow, &StandingRow) -> Ordering;

fn compare_points(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points.cmp(&a.points)
}

fn compare_star_diff(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.star_diff.cmp(&a.star_diff)
}

fn compare_avg_pct(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.avg_pct.total_cmp(&a.avg_pct)
}

// Faster is better
fn compare_avg_time(a: &StandingRow, b: &StandingRow) -> Ordering {
    a.avg_time.total_cmp(&b.avg_time)
}

// Last resort so equal rows still come out in a fixed order
fn compare_participant_id(a: &StandingRow, b: &StandingRow) -> Ordering {
    a.participant_id.cmp(&b.participant_id)
}

const RANKING: [CmpFunc; 5] = [
    compare_points,
    compare_star_diff,
    compare_avg_pct,
    compare_avg_time,
    compare_participant_id,
];

/// Ranking order between two rows.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    RANKING
        .iter()
        .map(|cmp| cmp(a, b))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Compute the ranked table for `fixtures`.
///
/// `roster` only supplies display names; any participant referenced by a
/// fixture gets a row whether or not it is on the roster.
pub fn compute_standings(fixtures: &[Fixture], roster: &[Participant]) -> Vec<StandingRow> {
    let mut tallies: BTreeMap<ParticipantId, Tally> = BTreeMap::new();

    for fixture in fixtures {
        tallies.entry(fixture.side_a).or_default();
        tallies.entry(fixture.side_b).or_default();

        let Some(record) = &fixture.outcome else {
            continue;
        };

        if let Some(a) = tallies.get_mut(&fixture.side_a) {
            a.record_side(record.stars_a, record.stars_b, record.pct_a, record.time_a);
        }
        if let Some(b) = tallies.get_mut(&fixture.side_b) {
            b.record_side(record.stars_b, record.stars_a, record.pct_b, record.time_b);
        }

        // Re-resolve from the raw values rather than trusting the stored winner
        let (winner, loser) = match resolve_outcome(&record.metrics()) {
            Outcome::A => (fixture.side_a, fixture.side_b),
            Outcome::B => (fixture.side_b, fixture.side_a),
            Outcome::DrawRematch => {
                for side in [fixture.side_a, fixture.side_b] {
                    if let Some(t) = tallies.get_mut(&side) {
                        t.draws += 1;
                    }
                }
                continue;
            }
            Outcome::Undetermined => continue,
        };
        if let Some(t) = tallies.get_mut(&winner) {
            t.win();
        }
        if let Some(t) = tallies.get_mut(&loser) {
            t.losses += 1;
        }
    }

    let names: HashMap<ParticipantId, &str> = roster
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    let mut rows: Vec<StandingRow> = tallies
        .into_iter()
        .map(|(id, t)| StandingRow {
            rank: 0,
            participant_id: id,
            name: names.get(&id).copied().unwrap_or(UNKNOWN_NAME).to_string(),
            points: t.points,
            wins: t.wins,
            losses: t.losses,
            draws: t.draws,
            matches_played: t.matches_played,
            stars_scored: t.stars_scored,
            stars_conceded: t.stars_conceded,
            star_diff: i64::from(t.stars_scored) - i64::from(t.stars_conceded),
            avg_pct: round2(mean(&t.pcts)),
            avg_time: round2(mean(&t.times)),
        })
        .collect();

    rows.sort_by(compare_rows);
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    rows
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "standings_tests.rs"]
mod standings_tests;
