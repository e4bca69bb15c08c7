//! Round-robin schedule generation using the circle method.
//!
//! The first participant stays fixed while everyone else rotates one seat
//! per round. Seat `i` plays seat `n - 1 - i`, which keeps every participant
//! to a single pairing per round and produces every unordered pair exactly
//! once over the whole schedule. With an odd roster an empty seat is added;
//! whoever faces it sits the round out.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{LeagueError, Result};
use crate::types::{Fixture, ParticipantId, SeasonId};

/// A single scheduled pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// 1-based round number
    pub round: u32,
    pub side_a: ParticipantId,
    pub side_b: ParticipantId,
}

/// Complete single round-robin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub rounds: Vec<Vec<Pairing>>,
}

impl Schedule {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn pairing_count(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }

    pub fn pairings(&self) -> impl Iterator<Item = &Pairing> {
        self.rounds.iter().flatten()
    }

    /// Materialize the schedule as unplayed fixtures of `season_id`.
    pub fn into_fixtures(self, season_id: SeasonId) -> Vec<Fixture> {
        self.rounds
            .into_iter()
            .flatten()
            .map(|p| Fixture::new(season_id, p.round, p.side_a, p.side_b))
            .collect()
    }
}

/// Number of rounds a roster of `participants` needs.
pub fn expected_rounds(participants: usize) -> usize {
    match participants {
        0 | 1 => 0,
        n if n % 2 == 0 => n - 1,
        n => n,
    }
}

/// Build the full schedule for `participants`, in the given order.
pub fn round_robin(participants: &[ParticipantId]) -> Result<Schedule> {
    if participants.len() < 2 {
        return Err(LeagueError::InsufficientParticipants {
            found: participants.len(),
        });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for id in participants {
        if !seen.insert(*id) {
            return Err(LeagueError::DuplicateParticipant(*id));
        }
    }

    // None is the bye seat
    let mut seats: Vec<Option<ParticipantId>> = participants.iter().copied().map(Some).collect();
    if seats.len() % 2 == 1 {
        seats.push(None);
    }
    let n = seats.len();

    let total = expected_rounds(participants.len());
    let mut rounds = Vec::with_capacity(total);
    for round in 1..=total as u32 {
        let mut pairings = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            if let (Some(side_a), Some(side_b)) = (seats[i], seats[n - 1 - i]) {
                pairings.push(Pairing {
                    round,
                    side_a,
                    side_b,
                });
            }
        }
        rounds.push(pairings);

        seats[1..].rotate_right(1);
    }

    Ok(Schedule { rounds })
}

/// Roster order after a seeded shuffle. The same seed always gives the same
/// order, so a shuffled schedule can be reproduced.
pub fn shuffled_roster(participants: &[ParticipantId], seed: u64) -> Vec<ParticipantId> {
    let mut roster = participants.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    roster.shuffle(&mut rng);
    roster
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod schedule_tests;
